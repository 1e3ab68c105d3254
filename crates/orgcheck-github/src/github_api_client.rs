use std::sync::Arc;

use reqwest::{Method, Url};
use serde::Deserialize;
use serde_json::json;

use crate::error::GithubApiError;
use crate::github_transport_helpers::truncate_for_error;
use crate::request_executor::{ExecutedResponse, RequestExecutor};
use crate::retry_policy::RateLimitRetryPolicy;
use crate::throttle::ThrottleSignal;
use crate::transport::{GithubRequest, GithubResponse, ReqwestTransport};

pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
const ERROR_BODY_MAX_CHARS: usize = 800;

#[derive(Debug, Clone, Deserialize)]
pub struct GithubCommentCreateResponse {
    pub id: u64,
    pub html_url: Option<String>,
}

/// Connection settings for [`GithubApiClient::new`].
#[derive(Clone)]
pub struct GithubApiClientConfig {
    pub api_base: String,
    pub token: String,
    pub request_timeout_ms: u64,
    pub rate_limit_max_retries: u32,
}

#[derive(Clone)]
pub struct GithubApiClient {
    executor: RequestExecutor,
    api_base: Url,
}

impl GithubApiClient {
    pub fn new(config: &GithubApiClientConfig) -> Result<Self, GithubApiError> {
        let transport = ReqwestTransport::new(&config.token, config.request_timeout_ms)?;
        let executor = RequestExecutor::new(
            Arc::new(transport),
            Arc::new(RateLimitRetryPolicy::new(config.rate_limit_max_retries)),
        );
        Self::with_executor(&config.api_base, executor)
    }

    pub fn with_executor(
        api_base: &str,
        executor: RequestExecutor,
    ) -> Result<Self, GithubApiError> {
        let api_base = Url::parse(api_base.trim()).map_err(|error| {
            GithubApiError::InvalidRequest(format!("invalid github api base '{api_base}': {error}"))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(GithubApiError::InvalidRequest(format!(
                "invalid github api base '{api_base}'"
            )));
        }
        Ok(Self { executor, api_base })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, GithubApiError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                GithubApiError::InvalidRequest(format!(
                    "invalid github api base '{}'",
                    self.api_base
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Returns the raw status of `GET /orgs/{org}/members/{username}`.
    ///
    /// Redirects are not followed, so `302` reaches the caller. Server errors
    /// and responses still throttled after the retry policy are errors.
    pub async fn check_membership(
        &self,
        org: &str,
        username: &str,
    ) -> Result<u16, GithubApiError> {
        let request = GithubRequest::new(
            "check membership",
            Method::GET,
            self.endpoint(&["orgs", org, "members", username])?,
        );
        let executed = self.executor.execute(&request).await?;
        let response = ensure_not_throttled(&request, executed)?;
        if response.status >= 500 {
            return Err(status_error(&request, &response));
        }
        Ok(response.status)
    }

    pub async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<GithubCommentCreateResponse, GithubApiError> {
        let issue_number = issue_number.to_string();
        let request = GithubRequest::new(
            "create issue comment",
            Method::POST,
            self.endpoint(&["repos", owner, repo, "issues", &issue_number, "comments"])?,
        )
        .with_json(json!({ "body": body }));
        let executed = self.executor.execute(&request).await?;
        let response = ensure_not_throttled(&request, executed)?;
        if !response.is_success() {
            return Err(status_error(&request, &response));
        }
        serde_json::from_str::<GithubCommentCreateResponse>(&response.body).map_err(|source| {
            GithubApiError::Decode {
                operation: request.operation.clone(),
                source,
            }
        })
    }
}

fn ensure_not_throttled(
    request: &GithubRequest,
    executed: ExecutedResponse,
) -> Result<GithubResponse, GithubApiError> {
    match executed.throttle {
        None => Ok(executed.response),
        Some(ThrottleSignal::RateLimited { retry_after }) => Err(GithubApiError::RateLimited {
            operation: request.operation.clone(),
            status: executed.response.status,
            attempts: executed.retries.saturating_add(1),
            retry_after,
        }),
        Some(ThrottleSignal::AbuseDetected { .. }) => Err(GithubApiError::AbuseDetected {
            operation: request.operation.clone(),
            status: executed.response.status,
        }),
    }
}

fn status_error(request: &GithubRequest, response: &GithubResponse) -> GithubApiError {
    GithubApiError::Status {
        operation: request.operation.clone(),
        status: response.status,
        body: truncate_for_error(&response.body, ERROR_BODY_MAX_CHARS),
    }
}
