//! Command-line and environment configuration.
//!
//! Every setting can be passed as a flag. When a flag is absent the value is
//! taken from the environment GitHub Actions provides to every step, so the
//! binary normally runs with no arguments at all:
//!
//! | Setting | Flag | Environment fallback |
//! |---------|------|----------------------|
//! | token | `--token` | `GITHUB_TOKEN`, `INPUT_GITHUB-TOKEN`, `INPUT_GITHUB_TOKEN` |
//! | repository | `--repository` | `GITHUB_REPOSITORY` |
//! | pull request | `--pull-request` | event payload at `GITHUB_EVENT_PATH` |
//! | API URL | `--api-url` | `GITHUB_API_URL`, then the public API |

use std::path::{Path, PathBuf};
use std::time::Duration;

use assignment::{InvocationContext, PullRequestNumber, RepositoryCoordinate};
use clap::{Parser, ValueEnum};
use github::{GitHubClientConfig, DEFAULT_API_URL};
use thiserror::Error;

const TOKEN_VARS: &[&str] = &["GITHUB_TOKEN", "INPUT_GITHUB-TOKEN", "INPUT_GITHUB_TOKEN"];
const REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";
const EVENT_PATH_VAR: &str = "GITHUB_EVENT_PATH";
const API_URL_VAR: &str = "GITHUB_API_URL";

/// Output format of the console log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// Assign a pull request to the humans who authored its commits.
#[derive(Debug, Parser)]
#[command(name = "auto-assign", version, about)]
pub struct Cli {
    /// GitHub token with permission to modify assignees.
    #[arg(long)]
    pub token: Option<String>,

    /// Repository in `owner/repo` form.
    #[arg(long)]
    pub repository: Option<String>,

    /// Pull request number.
    #[arg(long)]
    pub pull_request: Option<u64>,

    /// Base URL of the GitHub REST API.
    #[arg(long)]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Console log format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Errors raised while resolving configuration. No API call is made when
/// configuration fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing {setting}: pass {flag} or set {env}")]
    Missing {
        setting: &'static str,
        flag: &'static str,
        env: &'static str,
    },

    #[error("Invalid repository '{value}': expected 'owner/repo'")]
    InvalidRepository { value: String },

    #[error("Timeout must be at least one second")]
    InvalidTimeout,

    #[error("Failed to read event payload '{path}': {message}")]
    EventPayload { path: PathBuf, message: String },

    #[error("Event payload '{path}' does not reference a pull request")]
    NoPullRequestInEvent { path: PathBuf },
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub context: InvocationContext,
    pub client: GitHubClientConfig,
}

impl Config {
    /// Resolves settings from `cli`, falling back to `env` for anything not
    /// given on the command line.
    pub fn resolve(
        cli: &Cli,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let lookup = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        let token = cli
            .token
            .clone()
            .or_else(|| TOKEN_VARS.iter().find_map(|name| lookup(*name)))
            .ok_or(ConfigError::Missing {
                setting: "GitHub token",
                flag: "--token",
                env: "GITHUB_TOKEN",
            })?;

        let raw_repository = cli
            .repository
            .clone()
            .or_else(|| lookup(REPOSITORY_VAR))
            .ok_or(ConfigError::Missing {
                setting: "repository",
                flag: "--repository",
                env: REPOSITORY_VAR,
            })?;
        let repository = RepositoryCoordinate::parse(raw_repository.trim()).ok_or(
            ConfigError::InvalidRepository {
                value: raw_repository,
            },
        )?;

        let pull_request = match cli.pull_request {
            Some(number) => PullRequestNumber::new(number),
            None => {
                let path = lookup(EVENT_PATH_VAR).ok_or(ConfigError::Missing {
                    setting: "pull request number",
                    flag: "--pull-request",
                    env: EVENT_PATH_VAR,
                })?;
                pull_request_from_event(Path::new(&path))?
            }
        };

        if cli.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        let api_url = cli
            .api_url
            .clone()
            .or_else(|| lookup(API_URL_VAR))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            context: InvocationContext {
                repository,
                pull_request,
            },
            client: GitHubClientConfig {
                api_url,
                token,
                timeout: Duration::from_secs(cli.timeout_secs),
            },
        })
    }
}

/// Reads the pull request number from a webhook event payload.
///
/// `pull_request` and `pull_request_target` events carry `pull_request.number`;
/// issue and comment events carry `issue.number`; some carry a top-level
/// `number`.
pub fn pull_request_from_event(path: &Path) -> Result<PullRequestNumber, ConfigError> {
    let payload_error = |message: String| ConfigError::EventPayload {
        path: path.to_path_buf(),
        message,
    };

    let raw = std::fs::read_to_string(path).map_err(|e| payload_error(e.to_string()))?;
    let event: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| payload_error(e.to_string()))?;

    let number = [
        event.pointer("/pull_request/number"),
        event.pointer("/issue/number"),
        event.get("number"),
    ]
    .into_iter()
    .flatten()
    .find_map(serde_json::Value::as_u64);

    number
        .map(PullRequestNumber::new)
        .ok_or_else(|| ConfigError::NoPullRequestInEvent {
            path: path.to_path_buf(),
        })
}
