//! In-memory implementations of the port traits for tests.
//!
//! [`InMemoryPullRequest`] serves a fixed commit list and assignee list,
//! can be told to fail any call, and records every add-assignees call it
//! receives so tests can assert on the exact writes a run made.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    AccountType, Assignee, AssigneeWriter, Commit, CommitAuthor, CommitSha, GitHubError, Login,
    PullRequestDetails, PullRequestNumber, PullRequestReader, RepositoryCoordinate,
};

/// A single pull request held in memory.
#[derive(Debug, Default)]
pub struct InMemoryPullRequest {
    commits: Vec<Commit>,
    details: PullRequestDetails,
    list_commits_error: Option<GitHubError>,
    get_pull_request_error: Option<GitHubError>,
    add_assignees_error: Option<GitHubError>,
    add_calls: Mutex<Vec<Vec<Login>>>,
}

impl InMemoryPullRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a commit by a human account.
    pub fn with_user_commit(self, sha: &str, login: &str) -> Self {
        self.with_linked_commit(sha, login, AccountType::User)
    }

    /// Adds a commit by a bot account.
    pub fn with_bot_commit(self, sha: &str, login: &str) -> Self {
        self.with_linked_commit(sha, login, AccountType::Bot)
    }

    /// Adds a commit whose author has no GitHub account.
    pub fn with_unlinked_commit(self, sha: &str) -> Self {
        self.with_commit(sha, CommitAuthor::Unlinked)
    }

    /// Adds a current assignee.
    pub fn with_assignee(mut self, login: &str) -> Self {
        if let Some(login) = Login::new(login) {
            self.details.assignees.push(Assignee { login });
        }
        self
    }

    pub fn failing_list_commits(mut self, error: GitHubError) -> Self {
        self.list_commits_error = Some(error);
        self
    }

    pub fn failing_get_pull_request(mut self, error: GitHubError) -> Self {
        self.get_pull_request_error = Some(error);
        self
    }

    pub fn failing_add_assignees(mut self, error: GitHubError) -> Self {
        self.add_assignees_error = Some(error);
        self
    }

    /// Every add-assignees call received so far, including failed ones.
    pub fn add_calls(&self) -> Vec<Vec<Login>> {
        self.add_calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn with_linked_commit(self, sha: &str, login: &str, account_type: AccountType) -> Self {
        self.with_commit(
            sha,
            CommitAuthor::Linked {
                login: Login::new(login),
                account_type,
            },
        )
    }

    fn with_commit(mut self, sha: &str, author: CommitAuthor) -> Self {
        if let Some(sha) = CommitSha::new(sha) {
            self.commits.push(Commit { sha, author });
        }
        self
    }
}

#[async_trait]
impl PullRequestReader for InMemoryPullRequest {
    async fn list_commits(
        &self,
        _repository: &RepositoryCoordinate,
        _pull_request: PullRequestNumber,
    ) -> Result<Vec<Commit>, GitHubError> {
        match &self.list_commits_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.commits.clone()),
        }
    }

    async fn get_pull_request(
        &self,
        _repository: &RepositoryCoordinate,
        _pull_request: PullRequestNumber,
    ) -> Result<PullRequestDetails, GitHubError> {
        match &self.get_pull_request_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.details.clone()),
        }
    }
}

#[async_trait]
impl AssigneeWriter for InMemoryPullRequest {
    async fn add_assignees(
        &self,
        _repository: &RepositoryCoordinate,
        _issue: PullRequestNumber,
        logins: &[Login],
    ) -> Result<(), GitHubError> {
        self.add_calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(logins.to_vec());

        match &self.add_assignees_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}
