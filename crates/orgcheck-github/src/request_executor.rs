//! Rate-limit aware execution of GitHub requests.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::GithubApiError;
use crate::github_transport_helpers::current_unix_timestamp_secs;
use crate::retry_policy::RetryPolicy;
use crate::throttle::{detect_throttle_signal, ThrottleSignal};
use crate::transport::{GithubRequest, GithubResponse, GithubTransport};

/// Final response of one executed call plus the throttling state it ended in.
#[derive(Debug, Clone)]
pub struct ExecutedResponse {
    pub response: GithubResponse,
    /// Set when the final response was still throttled (retry budget exhausted or abuse detection).
    pub throttle: Option<ThrottleSignal>,
    pub retries: u32,
}

#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn GithubTransport>,
    retry_policy: Arc<dyn RetryPolicy>,
}

impl RequestExecutor {
    pub fn new(transport: Arc<dyn GithubTransport>, retry_policy: Arc<dyn RetryPolicy>) -> Self {
        Self {
            transport,
            retry_policy,
        }
    }

    /// Sends `request`, resubmitting it after the signalled delay while the
    /// retry policy allows. Abuse detection is logged and returned as-is.
    pub async fn execute(
        &self,
        request: &GithubRequest,
    ) -> Result<ExecutedResponse, GithubApiError> {
        let mut attempt = 0_u32;
        loop {
            let response = self
                .transport
                .send(request)
                .await
                .map_err(|source| GithubApiError::Transport {
                    operation: request.operation.clone(),
                    source,
                })?;
            let signal = detect_throttle_signal(
                response.status,
                &response.headers,
                &response.body,
                current_unix_timestamp_secs(),
            );

            match signal {
                Some(rate_limited @ ThrottleSignal::RateLimited { retry_after }) => {
                    warn!(
                        method = %request.method,
                        url = %request.url,
                        status = response.status,
                        signal = rate_limited.label(),
                        attempt,
                        "request quota exhausted for request {request}"
                    );
                    if self.retry_policy.should_retry(attempt, &rate_limited) {
                        info!(
                            method = %request.method,
                            url = %request.url,
                            retry_after_secs = retry_after.as_secs(),
                            "retrying after {} seconds",
                            retry_after.as_secs()
                        );
                        tokio::time::sleep(retry_after).await;
                        attempt = attempt.saturating_add(1);
                        continue;
                    }
                }
                Some(abuse @ ThrottleSignal::AbuseDetected { .. }) => {
                    warn!(
                        method = %request.method,
                        url = %request.url,
                        status = response.status,
                        signal = abuse.label(),
                        "abuse detected for request {request}"
                    );
                }
                None => {}
            }

            return Ok(ExecutedResponse {
                response,
                throttle: signal,
                retries: attempt,
            });
        }
    }
}
