use std::time::Duration;

use thiserror::Error;

use crate::transport::TransportError;

/// Failures surfaced by GitHub API calls after the executor has applied its retry policy.
#[derive(Debug, Error)]
pub enum GithubApiError {
    #[error("invalid github request: {0}")]
    InvalidRequest(String),
    #[error("github api {operation} request failed: {source}")]
    Transport {
        operation: String,
        #[source]
        source: TransportError,
    },
    #[error("github api {operation} failed with status {status}: {body}")]
    Status {
        operation: String,
        status: u16,
        body: String,
    },
    #[error(
        "github api {operation} rate limit exceeded after {attempts} attempt(s); retry after {}s",
        .retry_after.as_secs()
    )]
    RateLimited {
        operation: String,
        status: u16,
        attempts: u32,
        retry_after: Duration,
    },
    #[error("github api {operation} blocked by abuse detection (status {status})")]
    AbuseDetected { operation: String, status: u16 },
    #[error("failed to decode github {operation}: {source}")]
    Decode {
        operation: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GithubApiError {
    /// Status code carried by the error, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. }
            | Self::RateLimited { status, .. }
            | Self::AbuseDetected { status, .. } => Some(*status),
            Self::InvalidRequest(_) | Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}
