//! Classification of GitHub throttling responses.
//!
//! GitHub reports two distinct kinds of throttling. The primary rate limit
//! (quota exhausted) answers `429`, or `403` with `x-ratelimit-remaining: 0`,
//! and tells the caller how long to wait. The secondary rate limit (abuse
//! detection) answers `403` with a message naming it; those requests are not
//! retried.

use std::time::Duration;

use reqwest::header::HeaderMap;

use crate::github_transport_helpers::{
    parse_rate_limit_remaining, parse_rate_limit_reset, parse_retry_after,
};

/// Delay used when a rate-limited response carries no usable timing header.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(60);

const ABUSE_BODY_MARKERS: [&str; 2] = ["secondary rate limit", "abuse"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleSignal {
    RateLimited { retry_after: Duration },
    AbuseDetected { retry_after: Option<Duration> },
}

impl ThrottleSignal {
    pub fn label(&self) -> &'static str {
        match self {
            Self::RateLimited { .. } => "rate_limited",
            Self::AbuseDetected { .. } => "abuse_detected",
        }
    }
}

fn body_mentions_abuse(body: &str) -> bool {
    let normalized = body.to_ascii_lowercase();
    ABUSE_BODY_MARKERS
        .iter()
        .any(|marker| normalized.contains(marker))
}

fn signalled_delay(headers: &HeaderMap, now_unix_secs: u64) -> Option<Duration> {
    parse_retry_after(headers).or_else(|| parse_rate_limit_reset(headers, now_unix_secs))
}

/// Inspect a response and report whether GitHub is throttling the caller.
pub fn detect_throttle_signal(
    status: u16,
    headers: &HeaderMap,
    body: &str,
    now_unix_secs: u64,
) -> Option<ThrottleSignal> {
    match status {
        429 => Some(ThrottleSignal::RateLimited {
            retry_after: signalled_delay(headers, now_unix_secs).unwrap_or(DEFAULT_RETRY_AFTER),
        }),
        403 if body_mentions_abuse(body) => Some(ThrottleSignal::AbuseDetected {
            retry_after: parse_retry_after(headers),
        }),
        403 if parse_rate_limit_remaining(headers) == Some(0) => {
            Some(ThrottleSignal::RateLimited {
                retry_after: signalled_delay(headers, now_unix_secs)
                    .unwrap_or(DEFAULT_RETRY_AFTER),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{detect_throttle_signal, ThrottleSignal, DEFAULT_RETRY_AFTER};
    use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
    use std::time::Duration;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.insert(*name, HeaderValue::from_static(*value));
        }
        headers
    }

    #[test]
    fn unit_too_many_requests_is_rate_limited_with_retry_after() {
        let mut map = HeaderMap::new();
        map.insert(RETRY_AFTER, HeaderValue::from_static("7"));
        assert_eq!(
            detect_throttle_signal(429, &map, "", 0),
            Some(ThrottleSignal::RateLimited {
                retry_after: Duration::from_secs(7)
            })
        );
    }

    #[test]
    fn functional_forbidden_with_exhausted_quota_uses_reset_header() {
        let map = headers(&[("x-ratelimit-remaining", "0"), ("x-ratelimit-reset", "1030")]);
        assert_eq!(
            detect_throttle_signal(403, &map, "API rate limit exceeded", 1_000),
            Some(ThrottleSignal::RateLimited {
                retry_after: Duration::from_secs(30)
            })
        );
    }

    #[test]
    fn functional_secondary_rate_limit_message_is_abuse_detection() {
        let map = headers(&[("retry-after", "5")]);
        let body = r#"{"message":"You have exceeded a secondary rate limit."}"#;
        assert_eq!(
            detect_throttle_signal(403, &map, body, 0),
            Some(ThrottleSignal::AbuseDetected {
                retry_after: Some(Duration::from_secs(5))
            })
        );
        assert_eq!(
            detect_throttle_signal(403, &HeaderMap::new(), "abuse detection mechanism", 0),
            Some(ThrottleSignal::AbuseDetected { retry_after: None })
        );
    }

    #[test]
    fn regression_rate_limit_without_timing_headers_falls_back_to_default_delay() {
        assert_eq!(
            detect_throttle_signal(429, &HeaderMap::new(), "", 0),
            Some(ThrottleSignal::RateLimited {
                retry_after: DEFAULT_RETRY_AFTER
            })
        );
    }

    #[test]
    fn regression_plain_forbidden_and_other_statuses_are_not_throttled() {
        let map = headers(&[("x-ratelimit-remaining", "41")]);
        assert_eq!(detect_throttle_signal(403, &map, "Forbidden", 0), None);
        assert_eq!(detect_throttle_signal(404, &HeaderMap::new(), "", 0), None);
        assert_eq!(detect_throttle_signal(204, &HeaderMap::new(), "", 0), None);
    }
}
