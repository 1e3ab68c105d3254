//! GitHub REST plumbing for the organization membership check.
//! This crate provides the transport seam, throttle-signal detection, the
//! rate-limit aware request executor, and the typed API client built on it.

pub mod error;
pub mod github_api_client;
pub mod github_transport_helpers;
pub mod request_executor;
pub mod retry_policy;
pub mod throttle;
pub mod transport;

pub use error::GithubApiError;
pub use github_api_client::{GithubApiClient, GithubApiClientConfig, GithubCommentCreateResponse};
pub use request_executor::RequestExecutor;
pub use retry_policy::{RateLimitRetryPolicy, RetryPolicy};
pub use throttle::ThrottleSignal;
pub use transport::{GithubRequest, GithubResponse, GithubTransport, ReqwestTransport};
