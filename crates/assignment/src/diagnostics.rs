//! Operator-facing diagnostics emitted during a synchronization run.
//!
//! Every line a run prints is a [`Diagnostic`] handed to an injected
//! [`DiagnosticSink`]. Production wiring uses [`TracingSink`]; tests use
//! [`RecordingSink`] to assert on exactly what was reported.
//!
//! Rendered diagnostics start with a fixed emoji marker so operators can scan
//! CI logs quickly:
//!
//! | Marker | Severity |
//! |--------|----------|
//! | `ℹ️` / `✅` | [`Severity::Info`] |
//! | `⚠️` | [`Severity::Warning`] |
//! | `❌` | [`Severity::Error`] |

use std::sync::Mutex;

use crate::{CommitSha, Login};

/// How urgently an operator should look at a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Something worth reporting about a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A commit authored by a bot account was left out of the author set.
    SkippedBotCommit { sha: CommitSha },

    /// A commit whose author email matches no GitHub account was left out.
    SkippedUnlinkedCommit { sha: CommitSha },

    /// Every human author is already assigned.
    NoNewAssignees,

    /// The add-assignees call is about to be issued for these logins.
    AddingAssignees { logins: Vec<Login> },

    /// The add-assignees call failed.
    AddAssigneesFailed { message: String },

    /// The run as a whole failed and the error is being returned.
    ProcessingFailed { message: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Self::SkippedBotCommit { .. } | Self::SkippedUnlinkedCommit { .. } => {
                Severity::Warning
            }
            Self::NoNewAssignees | Self::AddingAssignees { .. } => Severity::Info,
            Self::AddAssigneesFailed { .. } | Self::ProcessingFailed { .. } => Severity::Error,
        }
    }

    /// Stable snake_case name, recorded as a structured field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SkippedBotCommit { .. } => "skipped_bot_commit",
            Self::SkippedUnlinkedCommit { .. } => "skipped_unlinked_commit",
            Self::NoNewAssignees => "no_new_assignees",
            Self::AddingAssignees { .. } => "adding_assignees",
            Self::AddAssigneesFailed { .. } => "add_assignees_failed",
            Self::ProcessingFailed { .. } => "processing_failed",
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SkippedBotCommit { sha } => {
                write!(f, "⚠️ Skipping bot commit {}", sha.short())
            }
            Self::SkippedUnlinkedCommit { sha } => {
                write!(f, "⚠️ Skipping commit {} (No linked GitHub user)", sha.short())
            }
            Self::NoNewAssignees => write!(f, "ℹ️ No new assignees to add"),
            Self::AddingAssignees { logins } => {
                let joined: Vec<&str> = logins.iter().map(Login::as_str).collect();
                write!(f, "✅ Adding assignees: {}", joined.join(", "))
            }
            Self::AddAssigneesFailed { message } => {
                write!(f, "❌ Failed to add assignees: {message}")
            }
            Self::ProcessingFailed { message } => {
                write!(f, "❌ Failed to process PR assignees: {message}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Destination for the diagnostics of a run.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Forwards diagnostics to `tracing` at the level matching their severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        let kind = diagnostic.kind();
        match diagnostic.severity() {
            Severity::Info => tracing::info!(kind, "{diagnostic}"),
            Severity::Warning => tracing::warn!(kind, "{diagnostic}"),
            Severity::Error => tracing::error!(kind, "{diagnostic}"),
        }
    }
}

/// Keeps every emitted diagnostic in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    recorded: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything emitted so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.recorded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Rendered lines of the diagnostics at `severity`.
    pub fn lines_at(&self, severity: Severity) -> Vec<String> {
        self.diagnostics()
            .iter()
            .filter(|d| d.severity() == severity)
            .map(ToString::to_string)
            .collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.recorded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sha(value: &str) -> CommitSha {
        CommitSha::new(value).unwrap()
    }

    #[test]
    fn skipped_commits_render_short_sha() {
        let bot = Diagnostic::SkippedBotCommit {
            sha: sha("bot1111deadbeef"),
        };
        assert_eq!(bot.to_string(), "⚠️ Skipping bot commit bot1111");

        let unlinked = Diagnostic::SkippedUnlinkedCommit { sha: sha("noauth01") };
        assert_eq!(
            unlinked.to_string(),
            "⚠️ Skipping commit noauth0 (No linked GitHub user)"
        );
    }

    #[test]
    fn adding_assignees_joins_logins() {
        let d = Diagnostic::AddingAssignees {
            logins: vec![Login::new("alice").unwrap(), Login::new("bob").unwrap()],
        };
        assert_eq!(d.to_string(), "✅ Adding assignees: alice, bob");
    }

    #[test]
    fn failures_render_message() {
        let d = Diagnostic::ProcessingFailed {
            message: "boom".to_string(),
        };
        assert_eq!(d.to_string(), "❌ Failed to process PR assignees: boom");
        assert_eq!(d.severity(), Severity::Error);
    }

    #[test]
    fn severities_match_markers() {
        assert_eq!(Diagnostic::NoNewAssignees.severity(), Severity::Info);
        assert_eq!(
            Diagnostic::SkippedUnlinkedCommit { sha: sha("abc") }.severity(),
            Severity::Warning
        );
        assert_eq!(
            Diagnostic::AddAssigneesFailed {
                message: String::new()
            }
            .severity(),
            Severity::Error
        );
    }

    #[test]
    fn recording_sink_keeps_emission_order() {
        let sink = RecordingSink::new();
        sink.emit(&Diagnostic::NoNewAssignees);
        sink.emit(&Diagnostic::SkippedBotCommit { sha: sha("1234567") });

        assert_eq!(
            sink.diagnostics(),
            vec![
                Diagnostic::NoNewAssignees,
                Diagnostic::SkippedBotCommit { sha: sha("1234567") },
            ]
        );
        assert_eq!(sink.lines_at(Severity::Info), vec!["ℹ️ No new assignees to add"]);
    }

    #[test]
    fn tracing_sink_accepts_every_severity() {
        let sink = TracingSink;
        sink.emit(&Diagnostic::NoNewAssignees);
        sink.emit(&Diagnostic::SkippedUnlinkedCommit { sha: sha("abc") });
        sink.emit(&Diagnostic::ProcessingFailed {
            message: "x".to_string(),
        });
    }
}
