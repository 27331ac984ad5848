//! The assignment synchronizer.
//!
//! Assigns a pull request to every human who authored one of its commits and
//! is not already assigned:
//!
//! 1. list the commits and read the pull request, concurrently;
//! 2. collect the human commit authors ([`extract_commit_authors`]);
//! 3. subtract the current assignees ([`new_assignees`]);
//! 4. if anyone is left, add them in a single call ([`add_assignees`]).
//!
//! A run makes zero or one write call. Failures are reported to the
//! [`DiagnosticSink`] and returned unchanged; nothing is retried.

use tracing::Instrument;

use crate::{
    AssigneeWriter, AuthorSet, Commit, CommitAuthor, Diagnostic, DiagnosticSink,
    InvocationContext, Login, PullRequestDetails, PullRequestReader, SyncError, SyncOutcome,
    SyncRunId,
};

/// Collects the unique logins of the human authors of `commits`.
///
/// Commits by bot accounts and commits with no linked account are skipped,
/// each with its own warning.
pub fn extract_commit_authors(commits: &[Commit], sink: &dyn DiagnosticSink) -> AuthorSet {
    let mut authors = AuthorSet::new();

    for commit in commits {
        match &commit.author {
            CommitAuthor::Linked { account_type, .. } if account_type.is_bot() => {
                sink.emit(&Diagnostic::SkippedBotCommit {
                    sha: commit.sha.clone(),
                })
            }
            CommitAuthor::Linked {
                login: Some(login),
                ..
            } => {
                authors.insert(login.clone());
            }
            CommitAuthor::Linked { login: None, .. } | CommitAuthor::Unlinked => {
                sink.emit(&Diagnostic::SkippedUnlinkedCommit {
                    sha: commit.sha.clone(),
                })
            }
        }
    }

    authors
}

/// Members of `authors` that are not assigned yet, in author-set order.
pub fn new_assignees(authors: &AuthorSet, details: &PullRequestDetails) -> Vec<Login> {
    let existing = details.assignee_logins();
    authors
        .iter()
        .filter(|login| !existing.contains(login))
        .cloned()
        .collect()
}

/// Issues the single add-assignees call for `logins`.
pub async fn add_assignees(
    writer: &dyn AssigneeWriter,
    ctx: &InvocationContext,
    logins: &[Login],
    sink: &dyn DiagnosticSink,
) -> Result<(), SyncError> {
    sink.emit(&Diagnostic::AddingAssignees {
        logins: logins.to_vec(),
    });

    writer
        .add_assignees(&ctx.repository, ctx.pull_request, logins)
        .await
        .map_err(|e| {
            sink.emit(&Diagnostic::AddAssigneesFailed {
                message: e.to_string(),
            });
            SyncError::AddAssignees(e)
        })
}

/// Runs one synchronization for the pull request named by `ctx`.
pub async fn synchronize(
    ctx: &InvocationContext,
    reader: &dyn PullRequestReader,
    writer: &dyn AssigneeWriter,
    sink: &dyn DiagnosticSink,
) -> Result<SyncOutcome, SyncError> {
    let run_id = SyncRunId::new_random();
    let span = tracing::info_span!(
        "synchronize",
        %run_id,
        repository = %ctx.repository,
        pull_request = ctx.pull_request.as_u64()
    );

    async {
        let result = run(ctx, reader, writer, sink).await;
        if let Err(e) = &result {
            sink.emit(&Diagnostic::ProcessingFailed {
                message: e.message(),
            });
        }
        result
    }
    .instrument(span)
    .await
}

async fn run(
    ctx: &InvocationContext,
    reader: &dyn PullRequestReader,
    writer: &dyn AssigneeWriter,
    sink: &dyn DiagnosticSink,
) -> Result<SyncOutcome, SyncError> {
    let (commits, details) = tokio::try_join!(
        reader.list_commits(&ctx.repository, ctx.pull_request),
        reader.get_pull_request(&ctx.repository, ctx.pull_request),
    )
    .map_err(SyncError::ReadPullRequest)?;

    tracing::debug!(
        commits = commits.len(),
        assignees = details.assignees.len(),
        "Read pull request"
    );

    let authors = extract_commit_authors(&commits, sink);
    let missing = new_assignees(&authors, &details);

    if missing.is_empty() {
        sink.emit(&Diagnostic::NoNewAssignees);
        return Ok(SyncOutcome::NothingToAdd);
    }

    add_assignees(writer, ctx, &missing, sink).await?;
    Ok(SyncOutcome::Assigned(missing))
}
