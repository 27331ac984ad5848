//! `reqwest`-backed implementation of the assignment ports.

use std::time::Duration;

use assignment::{
    AssigneeWriter, Commit, GitHubError, Login, PullRequestDetails, PullRequestNumber,
    PullRequestReader, RepositoryCoordinate,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::errors::{classify_status, transport, ClientBuildError};
use crate::wire::{AddAssigneesRequest, CommitDto, PullRequestDto};

/// Public GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// REST API version requested on every call.
pub const API_VERSION: &str = "2022-11-28";

/// Largest page GitHub serves for pull request commits.
const COMMITS_PER_PAGE: &str = "100";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for a [`GitHubClient`].
#[derive(Clone)]
pub struct GitHubClientConfig {
    /// Base URL of the REST API (GitHub Enterprise Server uses `https://host/api/v3`).
    pub api_url: String,
    /// Token sent as `Authorization: Bearer <token>`.
    pub token: String,
    /// Per-request timeout, covering connect through body.
    pub timeout: Duration,
}

impl GitHubClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl std::fmt::Debug for GitHubClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClientConfig")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// GitHub REST client implementing [`PullRequestReader`] and [`AssigneeWriter`].
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base: Url,
}

impl GitHubClient {
    pub fn new(config: GitHubClientConfig) -> Result<Self, ClientBuildError> {
        let base = parse_base_url(&config.api_url)?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| ClientBuildError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .user_agent(concat!("auto-assign/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, base })
    }

    /// The API base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Builds `{base}/repos/{owner}/{repo}/{segments...}`.
    pub(crate) fn repo_url(&self, repository: &RepositoryCoordinate, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .push("repos")
                .push(repository.owner())
                .push(repository.repo())
                .extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, GitHubError> {
        let response = send(request).await?;
        let body = response.text().await.map_err(|e| transport(&e))?;
        serde_json::from_str(&body).map_err(|e| GitHubError::InvalidResponse {
            message: e.to_string(),
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientBuildError> {
    let invalid = || ClientBuildError::InvalidBaseUrl {
        url: raw.to_string(),
    };
    let url = Url::parse(raw).map_err(|_| invalid())?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    Ok(url)
}

/// Sends `request` and turns any non-success status into a [`GitHubError`].
async fn send(request: RequestBuilder) -> Result<Response, GitHubError> {
    let response = request.send().await.map_err(|e| transport(&e))?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let remaining = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = response.text().await.unwrap_or_default();
    let error = classify_status(status, remaining.as_deref(), &body);
    tracing::debug!(status = status.as_u16(), %error, "GitHub request failed");
    Err(error)
}

#[async_trait]
impl PullRequestReader for GitHubClient {
    async fn list_commits(
        &self,
        repository: &RepositoryCoordinate,
        pull_request: PullRequestNumber,
    ) -> Result<Vec<Commit>, GitHubError> {
        let number = pull_request.as_u64().to_string();
        let url = self.repo_url(repository, &["pulls", &number, "commits"]);
        tracing::debug!(%url, "Listing pull request commits");

        let commits: Vec<CommitDto> = self
            .get_json(self.http.get(url).query(&[("per_page", COMMITS_PER_PAGE)]))
            .await?;
        commits.into_iter().map(CommitDto::into_domain).collect()
    }

    async fn get_pull_request(
        &self,
        repository: &RepositoryCoordinate,
        pull_request: PullRequestNumber,
    ) -> Result<PullRequestDetails, GitHubError> {
        let number = pull_request.as_u64().to_string();
        let url = self.repo_url(repository, &["pulls", &number]);
        tracing::debug!(%url, "Reading pull request");

        let pr: PullRequestDto = self.get_json(self.http.get(url)).await?;
        Ok(pr.into_domain())
    }
}

#[async_trait]
impl AssigneeWriter for GitHubClient {
    async fn add_assignees(
        &self,
        repository: &RepositoryCoordinate,
        issue: PullRequestNumber,
        logins: &[Login],
    ) -> Result<(), GitHubError> {
        let number = issue.as_u64().to_string();
        let url = self.repo_url(repository, &["issues", &number, "assignees"]);
        tracing::debug!(%url, count = logins.len(), "Adding assignees");

        send(self.http.post(url).json(&AddAssigneesRequest::new(logins))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_url: &str) -> GitHubClient {
        let mut config = GitHubClientConfig::new("ghs_test");
        config.api_url = api_url.to_string();
        GitHubClient::new(config).unwrap()
    }

    fn repo() -> RepositoryCoordinate {
        RepositoryCoordinate::parse("octo-org/hello-world").unwrap()
    }

    #[test]
    fn repo_url_builds_commits_endpoint() {
        let url = client(DEFAULT_API_URL).repo_url(&repo(), &["pulls", "7", "commits"]);
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/octo-org/hello-world/pulls/7/commits"
        );
    }

    #[test]
    fn repo_url_keeps_enterprise_path_prefix() {
        let url = client("https://ghe.example.com/api/v3/")
            .repo_url(&repo(), &["issues", "7", "assignees"]);
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/octo-org/hello-world/issues/7/assignees"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        for bad in ["not a url", "mailto:someone@example.com", "ftp://example.com"] {
            let mut config = GitHubClientConfig::new("ghs_test");
            config.api_url = bad.to_string();
            assert!(
                matches!(
                    GitHubClient::new(config),
                    Err(ClientBuildError::InvalidBaseUrl { .. })
                ),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let config = GitHubClientConfig::new("abc\ndef");
        assert!(matches!(
            GitHubClient::new(config),
            Err(ClientBuildError::InvalidToken)
        ));
    }

    #[test]
    fn default_config_targets_public_api() {
        let config = GitHubClientConfig::new("t");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn debug_output_hides_token() {
        let rendered = format!("{:?}", GitHubClientConfig::new("ghs_secret"));
        assert!(!rendered.contains("ghs_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
