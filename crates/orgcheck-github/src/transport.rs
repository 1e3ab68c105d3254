//! Transport seam between the request executor and the HTTP client.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, Url};
use serde_json::Value;

use crate::error::GithubApiError;

pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

const USER_AGENT: &str = "orgcheck-membership-action";

/// A fully described outbound call. The executor may send it more than once.
#[derive(Debug, Clone)]
pub struct GithubRequest {
    pub operation: String,
    pub method: Method,
    pub url: Url,
    pub body: Option<Value>,
}

impl GithubRequest {
    pub fn new(operation: impl Into<String>, method: Method, url: Url) -> Self {
        Self {
            operation: operation.into(),
            method,
            url,
            body: None,
        }
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl fmt::Display for GithubRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

#[derive(Debug, Clone)]
pub struct GithubResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl GithubResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
/// Trait contract for sending one request and returning the raw response.
pub trait GithubTransport: Send + Sync {
    async fn send(&self, request: &GithubRequest) -> Result<GithubResponse, TransportError>;
}

/// Production transport backed by a preconfigured `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(token: &str, request_timeout_ms: u64) -> Result<Self, GithubApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(USER_AGENT),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            reqwest::header::HeaderValue::from_static("2022-11-28"),
        );
        let auth_header = format!("Bearer {}", token.trim());
        let mut auth_value = reqwest::header::HeaderValue::from_str(&auth_header).map_err(|_| {
            GithubApiError::InvalidRequest("invalid github authorization header".to_string())
        })?;
        auth_value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth_value);

        // Membership lookups answer 302 when the requester cannot see the
        // organization; following it would hide that status.
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .map_err(|error| {
                GithubApiError::InvalidRequest(format!("failed to create github api client: {error}"))
            })?;
        Ok(Self { http })
    }
}

#[async_trait]
impl GithubTransport for ReqwestTransport {
    async fn send(&self, request: &GithubRequest) -> Result<GithubResponse, TransportError> {
        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(GithubResponse {
            status,
            headers,
            body,
        })
    }
}
