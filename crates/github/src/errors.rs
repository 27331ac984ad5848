//! Mapping of HTTP failures onto [`GitHubError`].

use assignment::GitHubError;
use reqwest::StatusCode;

use crate::wire::ErrorBody;

/// Errors raised while constructing a [`crate::GitHubClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("GitHub token contains characters not allowed in an HTTP header")]
    InvalidToken,

    #[error("Invalid API base URL '{url}'")]
    InvalidBaseUrl { url: String },

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Classifies a non-success response.
///
/// `rate_limit_remaining` is the value of the `x-ratelimit-remaining` header,
/// if present. GitHub reports an exhausted primary rate limit as `403` with
/// that header at `0`, and secondary limits as `403` or `429`.
pub(crate) fn classify_status(
    status: StatusCode,
    rate_limit_remaining: Option<&str>,
    body: &str,
) -> GitHubError {
    let message = error_message(status, body);
    let exhausted = rate_limit_remaining.map(str::trim) == Some("0");

    match status.as_u16() {
        401 => GitHubError::Unauthorized { message },
        429 => GitHubError::RateLimited { message },
        403 if exhausted || message.to_ascii_lowercase().contains("rate limit") => {
            GitHubError::RateLimited { message }
        }
        403 => GitHubError::PermissionDenied { message },
        404 => GitHubError::NotFound { message },
        422 => GitHubError::Validation { message },
        code => GitHubError::Api {
            status: code,
            message,
        },
    }
}

/// Maps a `reqwest` failure that produced no usable response.
pub(crate) fn transport(error: &reqwest::Error) -> GitHubError {
    let message = if error.is_timeout() {
        format!("request timed out: {error}")
    } else {
        error.to_string()
    };
    GitHubError::Transport { message }
}

/// GitHub's `message` field if the body is a standard error document,
/// otherwise the trimmed body, otherwise the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.message;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> StatusCode {
        StatusCode::from_u16(code).unwrap()
    }

    #[test]
    fn forbidden_without_rate_limit_is_permission_denied() {
        let err = classify_status(
            status(403),
            Some("4999"),
            r#"{"message":"Resource not accessible by integration","documentation_url":"https://docs.github.com"}"#,
        );
        assert_eq!(
            err,
            GitHubError::PermissionDenied {
                message: "Resource not accessible by integration".to_string()
            }
        );
    }

    #[test]
    fn forbidden_with_exhausted_limit_is_rate_limited() {
        let err = classify_status(status(403), Some("0"), r#"{"message":"Forbidden"}"#);
        assert!(matches!(err, GitHubError::RateLimited { .. }));
    }

    #[test]
    fn secondary_rate_limit_message_is_rate_limited() {
        let err = classify_status(
            status(403),
            None,
            r#"{"message":"You have exceeded a secondary rate limit."}"#,
        );
        assert!(matches!(err, GitHubError::RateLimited { .. }));

        let err = classify_status(status(429), None, "");
        assert_eq!(
            err,
            GitHubError::RateLimited {
                message: "Too Many Requests".to_string()
            }
        );
    }

    #[test]
    fn common_statuses_map_to_their_variants() {
        assert!(matches!(
            classify_status(status(401), None, r#"{"message":"Bad credentials"}"#),
            GitHubError::Unauthorized { .. }
        ));
        assert!(matches!(
            classify_status(status(404), None, r#"{"message":"Not Found"}"#),
            GitHubError::NotFound { .. }
        ));
        assert!(matches!(
            classify_status(status(422), None, r#"{"message":"Validation Failed"}"#),
            GitHubError::Validation { .. }
        ));
    }

    #[test]
    fn other_statuses_keep_code_and_raw_body() {
        let err = classify_status(status(502), None, "  upstream unavailable \n");
        assert_eq!(
            err,
            GitHubError::Api {
                status: 502,
                message: "upstream unavailable".to_string()
            }
        );
    }

    #[test]
    fn empty_body_falls_back_to_reason() {
        let err = classify_status(status(500), None, "");
        assert_eq!(
            err,
            GitHubError::Api {
                status: 500,
                message: "Internal Server Error".to_string()
            }
        );
    }
}
