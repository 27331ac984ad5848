//! Port traits the synchronizer calls through.
//!
//! Infrastructure crates implement these against a real hosting platform; the
//! [`crate::testing`] module implements them in memory. The synchronizer never
//! sees HTTP, authentication, or pagination.

use async_trait::async_trait;

use crate::{
    Commit, GitHubError, Login, PullRequestDetails, PullRequestNumber, RepositoryCoordinate,
};

/// Read access to a pull request.
#[async_trait]
pub trait PullRequestReader: Send + Sync {
    /// Lists the commits on `pull_request`.
    ///
    /// Only the first page the platform returns is read.
    async fn list_commits(
        &self,
        repository: &RepositoryCoordinate,
        pull_request: PullRequestNumber,
    ) -> Result<Vec<Commit>, GitHubError>;

    /// Reads the details of `pull_request`, including its current assignees.
    async fn get_pull_request(
        &self,
        repository: &RepositoryCoordinate,
        pull_request: PullRequestNumber,
    ) -> Result<PullRequestDetails, GitHubError>;
}

/// Write access to an issue's (or pull request's) assignees.
#[async_trait]
pub trait AssigneeWriter: Send + Sync {
    /// Adds `logins` as assignees of `issue`.
    ///
    /// Fails if any login cannot be assigned or the caller lacks permission.
    async fn add_assignees(
        &self,
        repository: &RepositoryCoordinate,
        issue: PullRequestNumber,
        logins: &[Login],
    ) -> Result<(), GitHubError>;
}
