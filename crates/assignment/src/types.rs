//! Value types read from GitHub for a single invocation.
//!
//! None of these outlive one run: they are a snapshot of the pull request's
//! commits and assignees at the moment the synchronizer reads them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{CommitSha, Login, PullRequestNumber, RepositoryCoordinate};

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Classification GitHub attaches to an account.
///
/// Only [`AccountType::Bot`] is treated as automated. Every other value,
/// including types GitHub may add later, counts as human.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    User,
    Bot,
    Organization,
    /// A type string this tool does not know about.
    Other(String),
}

impl AccountType {
    /// Maps the REST API's `type` field onto an [`AccountType`].
    pub fn from_api(value: &str) -> Self {
        match value {
            "User" => Self::User,
            "Bot" => Self::Bot,
            "Organization" => Self::Organization,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_bot(&self) -> bool {
        matches!(self, Self::Bot)
    }
}

// ---------------------------------------------------------------------------
// Commits
// ---------------------------------------------------------------------------

/// GitHub's association between a raw commit and a registered account.
///
/// A commit is `Unlinked` when its author email matches no GitHub account.
/// A linked account without a login can only be classified by its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitAuthor {
    Unlinked,
    Linked {
        login: Option<Login>,
        account_type: AccountType,
    },
}

/// One commit on a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: CommitSha,
    pub author: CommitAuthor,
}

// ---------------------------------------------------------------------------
// Pull requests
// ---------------------------------------------------------------------------

/// A user currently assigned to a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignee {
    pub login: Login,
}

/// The subset of a pull request's details the synchronizer reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestDetails {
    pub assignees: Vec<Assignee>,
}

impl PullRequestDetails {
    /// Returns the logins of all current assignees.
    pub fn assignee_logins(&self) -> HashSet<&Login> {
        self.assignees.iter().map(|a| &a.login).collect()
    }
}

/// Identifies the pull request an invocation operates on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationContext {
    pub repository: RepositoryCoordinate,
    pub pull_request: PullRequestNumber,
}

// ---------------------------------------------------------------------------
// Author set
// ---------------------------------------------------------------------------

/// Unique logins of the human authors of a pull request's commits.
///
/// Iteration follows the order in which each login was first inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorSet {
    order: Vec<Login>,
    seen: HashSet<Login>,
}

impl AuthorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `login`, returning `false` if it was already present.
    pub fn insert(&mut self, login: Login) -> bool {
        if self.seen.insert(login.clone()) {
            self.order.push(login);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, login: &Login) -> bool {
        self.seen.contains(login)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Login> {
        self.order.iter()
    }
}

impl<'a> IntoIterator for &'a AuthorSet {
    type Item = &'a Login;
    type IntoIter = std::slice::Iter<'a, Login>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of a successful synchronization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncOutcome {
    /// Every human author was already assigned; no write call was made.
    NothingToAdd,
    /// One write call added these logins, in this order.
    Assigned(Vec<Login>),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(value: &str) -> Login {
        Login::new(value).unwrap()
    }

    #[test]
    fn account_type_maps_known_values() {
        assert_eq!(AccountType::from_api("User"), AccountType::User);
        assert_eq!(AccountType::from_api("Bot"), AccountType::Bot);
        assert_eq!(AccountType::from_api("Organization"), AccountType::Organization);
        assert_eq!(
            AccountType::from_api("Mannequin"),
            AccountType::Other("Mannequin".to_string())
        );
    }

    #[test]
    fn only_bot_is_a_bot() {
        assert!(AccountType::Bot.is_bot());
        assert!(!AccountType::User.is_bot());
        assert!(!AccountType::Organization.is_bot());
        assert!(!AccountType::Other("bot".to_string()).is_bot());
    }

    #[test]
    fn author_set_ignores_duplicates_and_keeps_first_seen_order() {
        let mut set = AuthorSet::new();
        assert!(set.insert(login("carol")));
        assert!(set.insert(login("alice")));
        assert!(!set.insert(login("carol")));

        let logins: Vec<&str> = set.iter().map(Login::as_str).collect();
        assert_eq!(logins, vec!["carol", "alice"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains(&login("alice")));
    }

    #[test]
    fn assignee_logins_collects_every_assignee() {
        let details = PullRequestDetails {
            assignees: vec![
                Assignee { login: login("bob") },
                Assignee { login: login("dave") },
            ],
        };

        let logins = details.assignee_logins();
        assert_eq!(logins.len(), 2);
        assert!(logins.contains(&login("bob")));
    }
}
