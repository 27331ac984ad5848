//! auto-assign CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration** — flags first, then the GitHub Actions
//!    environment (see [`config`]).
//! 2. **Wire observability** — configure `tracing-subscriber` with an
//!    `EnvFilter` (`RUST_LOG`, default `info`) and either a text or a JSON
//!    layer. Diagnostics from the synchronizer reach the console through
//!    [`assignment::TracingSink`].
//! 3. **Construct infrastructure** — build the [`github::GitHubClient`] and
//!    inject it as both the reader and the writer.
//! 4. **Run once** — synchronize the pull request's assignees and exit
//!    non-zero if anything failed, which marks the CI step as failed.

mod config;

use anyhow::Context;
use assignment::{synchronize, SyncOutcome, TracingSink};
use clap::Parser;
use github::GitHubClient;
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, Config, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config =
        Config::resolve(&cli, |name| std::env::var(name).ok()).context("invalid configuration")?;
    let client = GitHubClient::new(config.client).context("failed to build GitHub client")?;

    let ctx = config.context;
    tracing::debug!(
        api_url = %client.base_url(),
        repository = %ctx.repository,
        pull_request = ctx.pull_request.as_u64(),
        "Starting assignee synchronization"
    );

    let outcome = synchronize(&ctx, &client, &client, &TracingSink)
        .await
        .with_context(|| {
            format!(
                "failed to synchronize assignees for {}{}",
                ctx.repository, ctx.pull_request
            )
        })?;

    match outcome {
        SyncOutcome::NothingToAdd => tracing::debug!("Assignees already up to date"),
        SyncOutcome::Assigned(logins) => {
            tracing::debug!(count = logins.len(), "Assignees added")
        }
    }

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
    }
}
