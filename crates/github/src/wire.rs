//! REST payloads and their conversion into domain types.
//!
//! Only the fields auto-assign reads are declared; serde ignores the rest.

use assignment::{
    AccountType, Assignee, Commit, CommitAuthor, CommitSha, GitHubError, Login,
    PullRequestDetails,
};
use serde::{Deserialize, Serialize};

/// An account as embedded in commit and pull request payloads.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserDto {
    #[serde(default)]
    pub login: String,
    #[serde(rename = "type", default)]
    pub account_type: String,
}

/// One entry of `GET /repos/{owner}/{repo}/pulls/{n}/commits`.
///
/// The top-level `author` is GitHub's linked account and is `null` when the
/// commit email matches no account. The git-level author inside `commit` is
/// not used.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CommitDto {
    pub sha: String,
    #[serde(default)]
    pub author: Option<UserDto>,
}

/// The subset of `GET /repos/{owner}/{repo}/pulls/{n}` that is read.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PullRequestDto {
    #[serde(default)]
    pub assignees: Option<Vec<UserDto>>,
}

/// Body of `POST /repos/{owner}/{repo}/issues/{n}/assignees`.
#[derive(Debug, Serialize)]
pub(crate) struct AddAssigneesRequest<'a> {
    pub assignees: Vec<&'a str>,
}

/// GitHub's standard error body.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

impl CommitDto {
    pub fn into_domain(self) -> Result<Commit, GitHubError> {
        let sha = CommitSha::new(self.sha).ok_or_else(|| GitHubError::InvalidResponse {
            message: "commit without sha".to_string(),
        })?;

        let author = match self.author {
            Some(user) => {
                let account_type = AccountType::from_api(&user.account_type);
                match Login::new(user.login) {
                    Some(login) => CommitAuthor::Linked {
                        login: Some(login),
                        account_type,
                    },
                    // A bot is still reported as a bot even without a login.
                    None if account_type.is_bot() => CommitAuthor::Linked {
                        login: None,
                        account_type,
                    },
                    None => CommitAuthor::Unlinked,
                }
            }
            None => CommitAuthor::Unlinked,
        };

        Ok(Commit { sha, author })
    }
}

impl PullRequestDto {
    pub fn into_domain(self) -> PullRequestDetails {
        let assignees = self
            .assignees
            .unwrap_or_default()
            .into_iter()
            .filter_map(|user| Login::new(user.login))
            .map(|login| Assignee { login })
            .collect();

        PullRequestDetails { assignees }
    }
}

impl<'a> AddAssigneesRequest<'a> {
    pub fn new(logins: &'a [Login]) -> Self {
        Self {
            assignees: logins.iter().map(Login::as_str).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linked_user_commit_converts() {
        let dto: CommitDto = serde_json::from_str(
            r#"{
                "sha": "abc1234def",
                "commit": { "author": { "name": "Alice", "email": "alice@example.com" } },
                "author": { "login": "alice", "id": 1, "type": "User" }
            }"#,
        )
        .unwrap();

        let commit = dto.into_domain().unwrap();
        assert_eq!(commit.sha.as_str(), "abc1234def");
        assert_eq!(
            commit.author,
            CommitAuthor::Linked {
                login: Login::new("alice"),
                account_type: AccountType::User,
            }
        );
    }

    #[test]
    fn bot_commit_keeps_bot_type() {
        let dto: CommitDto = serde_json::from_str(
            r#"{ "sha": "bot1111", "author": { "login": "deploy-bot", "type": "Bot" } }"#,
        )
        .unwrap();

        match dto.into_domain().unwrap().author {
            CommitAuthor::Linked { account_type, .. } => assert!(account_type.is_bot()),
            CommitAuthor::Unlinked => panic!("expected a linked author"),
        }
    }

    #[test]
    fn bot_without_login_stays_a_bot() {
        let dto: CommitDto = serde_json::from_str(
            r#"{ "sha": "bot2222", "author": { "login": "", "type": "Bot" } }"#,
        )
        .unwrap();

        assert_eq!(
            dto.into_domain().unwrap().author,
            CommitAuthor::Linked {
                login: None,
                account_type: AccountType::Bot,
            }
        );
    }

    #[test]
    fn null_or_missing_author_is_unlinked() {
        for json in [
            r#"{ "sha": "noauth01", "author": null }"#,
            r#"{ "sha": "noauth01" }"#,
            r#"{ "sha": "noauth01", "author": { "login": "" } }"#,
        ] {
            let dto: CommitDto = serde_json::from_str(json).unwrap();
            assert_eq!(dto.into_domain().unwrap().author, CommitAuthor::Unlinked);
        }
    }

    #[test]
    fn empty_sha_is_an_invalid_response() {
        let dto: CommitDto = serde_json::from_str(r#"{ "sha": "", "author": null }"#).unwrap();
        assert!(matches!(
            dto.into_domain(),
            Err(GitHubError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn pull_request_assignees_convert() {
        let dto: PullRequestDto = serde_json::from_str(
            r#"{
                "number": 7,
                "assignee": { "login": "bob", "type": "User" },
                "assignees": [
                    { "login": "bob", "type": "User" },
                    { "login": "carol", "type": "User" }
                ]
            }"#,
        )
        .unwrap();

        let logins: Vec<String> = dto
            .into_domain()
            .assignees
            .into_iter()
            .map(|a| a.login.to_string())
            .collect();
        assert_eq!(logins, vec!["bob", "carol"]);
    }

    #[test]
    fn null_assignees_are_empty() {
        let dto: PullRequestDto = serde_json::from_str(r#"{ "assignees": null }"#).unwrap();
        assert!(dto.into_domain().assignees.is_empty());
    }

    #[test]
    fn add_assignees_body_serialises_logins() {
        let logins = vec![Login::new("alice").unwrap(), Login::new("bob").unwrap()];
        let body = serde_json::to_string(&AddAssigneesRequest::new(&logins)).unwrap();
        assert_eq!(body, r#"{"assignees":["alice","bob"]}"#);
    }
}
