//! Newtype domain identifiers.
//!
//! Every GitHub concept that has an identity is represented as a distinct newtype
//! wrapping a primitive. This prevents accidentally passing — for example — a
//! commit SHA where a login is expected, even though both are strings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — GitHub-integer-backed
// ---------------------------------------------------------------------------

/// Identifies a GitHub Pull Request within a repository.
///
/// Wraps the number assigned by GitHub. The same number addresses the issue
/// that backs the pull request, which is where assignees are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Creates a new identifier from a raw integer.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PullRequestNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single synchronization run.
///
/// Generated fresh for every invocation and attached to the run's tracing span
/// so all log lines from one CI step can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyncRunId(Uuid);

impl SyncRunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for SyncRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// A GitHub account login (e.g. `"octocat"`).
    ///
    /// Two logins are the same account exactly when their strings are equal.
    Login
}

string_id! {
    /// A Git commit SHA as reported by the GitHub API.
    CommitSha
}

/// Number of leading SHA characters shown in diagnostics.
pub const SHORT_SHA_LEN: usize = 7;

impl CommitSha {
    /// Returns the abbreviated form used in log output: the first
    /// [`SHORT_SHA_LEN`] characters, or the whole SHA if it is shorter.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(SHORT_SHA_LEN) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Repository coordinate
// ---------------------------------------------------------------------------

/// Identifies a GitHub repository by owner and name.
///
/// Parsed from the `"owner/repo"` form used by `GITHUB_REPOSITORY`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryCoordinate {
    owner: String,
    repo: String,
}

impl RepositoryCoordinate {
    /// Creates a coordinate, returning `None` if either part is empty.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Option<Self> {
        let owner = owner.into();
        let repo = repo.into();
        if owner.is_empty() || repo.is_empty() {
            None
        } else {
            Some(Self { owner, repo })
        }
    }

    /// Parses `"owner/repo"`. Exactly one `/` is accepted.
    pub fn parse(value: &str) -> Option<Self> {
        let (owner, repo) = value.split_once('/')?;
        if repo.contains('/') {
            return None;
        }
        Self::new(owner, repo)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl std::fmt::Display for RepositoryCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
