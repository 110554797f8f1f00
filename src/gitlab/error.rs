//! GitLab API error types.

use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the GitLab API.
#[derive(Debug, Error)]
pub enum GitLabError {
    #[error("Invalid GitLab URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Resets at {reset_at}")]
    RateLimited { reset_at: DateTime<Utc> },

    #[error("GitLab API error: {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("HTTP request error: {0}")]
    Http(String),

    #[error("JSON deserialization error: {0}")]
    Deserialize(String),
}

impl GitLabError {
    /// Classify an unsuccessful response into a typed error.
    pub fn from_status(status: StatusCode, headers: &HeaderMap, body: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Self::Auth(format!("{}: {}", status, body))
            }
            StatusCode::NOT_FOUND => Self::NotFound(body.to_string()),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited {
                reset_at: reset_time(headers),
            },
            _ => Self::Api {
                status,
                body: body.to_string(),
            },
        }
    }

    /// Check if this error is a rate limit rejection.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

impl From<reqwest::Error> for GitLabError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Deserialize(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

/// Work out when a rate limit resets.
///
/// GitLab sends `RateLimit-Reset` as a unix timestamp and `Retry-After` in
/// seconds. Without either, assume one minute.
fn reset_time(headers: &HeaderMap) -> DateTime<Utc> {
    let header_u64 = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
    };

    if let Some(ts) = header_u64("RateLimit-Reset") {
        if let Some(at) = Utc.timestamp_opt(ts as i64, 0).single() {
            return at;
        }
    }
    if let Some(secs) = header_u64("Retry-After") {
        return Utc::now() + chrono::Duration::seconds(secs as i64);
    }
    Utc::now() + chrono::Duration::minutes(1)
}
