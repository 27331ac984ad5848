//! Core domain for auto-assign.
//!
//! auto-assign assigns a pull request to every human who authored one of its
//! commits. This crate holds the domain types, the diagnostics a run reports,
//! the port traits used to reach the hosting platform, and the synchronizer
//! that ties them together. Infrastructure crates implement the ports; they
//! never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate performs no I/O of its
//! own. It defines *what* is needed; the `github` crate defines *how*.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`Login`, `CommitSha`, `RepositoryCoordinate`, etc.) |
//! | [`types`] | Commits, assignees, the `AuthorSet`, and run outcomes |
//! | [`errors`] | `GitHubError` and `SyncError` |
//! | [`diagnostics`] | Operator-facing diagnostics and their sinks |
//! | [`ports`] | `PullRequestReader` and `AssigneeWriter` |
//! | [`sync`] | The assignment synchronizer |
//! | [`testing`] | In-memory port implementations |

pub mod diagnostics;
pub mod errors;
pub mod identifiers;
pub mod ports;
pub mod sync;
pub mod testing;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use diagnostics::{Diagnostic, DiagnosticSink, RecordingSink, Severity, TracingSink};
pub use errors::{GitHubError, SyncError};
pub use identifiers::{
    CommitSha, Login, PullRequestNumber, RepositoryCoordinate, SyncRunId, SHORT_SHA_LEN,
};
pub use ports::{AssigneeWriter, PullRequestReader};
pub use sync::{add_assignees, extract_commit_authors, new_assignees, synchronize};
pub use types::{
    AccountType, Assignee, AuthorSet, Commit, CommitAuthor, InvocationContext,
    PullRequestDetails, SyncOutcome,
};
