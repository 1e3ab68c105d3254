use crate::throttle::ThrottleSignal;

/// Retry budget used when no explicit policy is configured.
pub const DEFAULT_RATE_LIMIT_MAX_RETRIES: u32 = 1;

/// Trait contract for deciding whether a throttled request is resubmitted.
///
/// `attempt` counts the retries already performed for the current call and
/// starts at zero.
pub trait RetryPolicy: Send + Sync {
    fn should_retry(&self, attempt: u32, signal: &ThrottleSignal) -> bool;
}

/// Retries primary rate-limit signals a bounded number of times and never
/// retries abuse detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRetryPolicy {
    max_retries: u32,
}

impl RateLimitRetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

impl Default for RateLimitRetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RATE_LIMIT_MAX_RETRIES)
    }
}

impl RetryPolicy for RateLimitRetryPolicy {
    fn should_retry(&self, attempt: u32, signal: &ThrottleSignal) -> bool {
        match signal {
            ThrottleSignal::RateLimited { .. } => attempt < self.max_retries,
            ThrottleSignal::AbuseDetected { .. } => false,
        }
    }
}
