//! auto-assign GitHub infrastructure adapter.
//!
//! Implements the [`assignment::PullRequestReader`] and
//! [`assignment::AssigneeWriter`] ports against the GitHub REST API using
//! [`reqwest`].
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. All GitHub API
//! details (authentication headers, URL layout, wire payloads, mapping of HTTP
//! statuses onto [`assignment::GitHubError`]) are handled here; the
//! [`assignment`] crate never sees them.
//!
//! ## Endpoints
//!
//! | Port method | Request |
//! |-------------|---------|
//! | `list_commits` | `GET /repos/{owner}/{repo}/pulls/{n}/commits?per_page=100` |
//! | `get_pull_request` | `GET /repos/{owner}/{repo}/pulls/{n}` |
//! | `add_assignees` | `POST /repos/{owner}/{repo}/issues/{n}/assignees` |
//!
//! Only the first page of commits is read.

mod client;
mod errors;
mod wire;

pub use client::{GitHubClient, GitHubClientConfig, API_VERSION, DEFAULT_API_URL};
pub use errors::ClientBuildError;
