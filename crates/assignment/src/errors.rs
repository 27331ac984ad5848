//! Error types for the assignment domain.
//!
//! [`GitHubError`] is the failure of a single call through one of the port
//! traits. [`SyncError`] says which phase of a synchronization run failed and
//! carries the underlying [`GitHubError`] as its source.
//!
//! Neither type carries retry information: a failed run is reported and the
//! CI workflow decides whether to re-run it.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Platform errors
// ---------------------------------------------------------------------------

/// Failure of one call to the hosting platform.
///
/// Produced by implementations of [`crate::PullRequestReader`] and
/// [`crate::AssigneeWriter`]. Every variant carries the platform's own message
/// so that it can be surfaced verbatim in the CI log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GitHubError {
    /// The credentials were missing, expired, or rejected.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The credentials are valid but lack the permission the call requires.
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    /// The primary or secondary rate limit has been exhausted.
    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    /// The repository or pull request does not exist or is not visible.
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The platform rejected the request payload (e.g. an unassignable login).
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Any other non-success HTTP status.
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never produced an HTTP response (DNS, TLS, timeout, ...).
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The response body could not be decoded.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },
}

// ---------------------------------------------------------------------------
// Synchronizer errors
// ---------------------------------------------------------------------------

/// Failure of a synchronization run.
///
/// The read phase has no side effects, so [`SyncError::ReadPullRequest`] leaves
/// the pull request untouched. [`SyncError::AddAssignees`] leaves it in whatever
/// state the platform reached; no compensating call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Listing commits or reading the pull request failed.
    #[error("Failed to read pull request: {0}")]
    ReadPullRequest(#[source] GitHubError),

    /// The single add-assignees call failed.
    #[error("Failed to add assignees: {0}")]
    AddAssignees(#[source] GitHubError),
}

impl SyncError {
    /// The underlying platform error.
    pub fn platform_error(&self) -> &GitHubError {
        match self {
            Self::ReadPullRequest(e) | Self::AddAssignees(e) => e,
        }
    }

    /// The underlying platform error's message, as shown in diagnostics.
    pub fn message(&self) -> String {
        self.platform_error().to_string()
    }
}
