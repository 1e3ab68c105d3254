use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::header::HeaderMap;

pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    let raw = headers.get(name)?.to_str().ok()?;
    raw.trim().parse::<u64>().ok()
}

pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    header_u64(headers, "retry-after").map(Duration::from_secs)
}

/// Remaining primary quota reported by GitHub, if the header is present and numeric.
pub fn parse_rate_limit_remaining(headers: &HeaderMap) -> Option<u64> {
    header_u64(headers, RATE_LIMIT_REMAINING_HEADER)
}

/// Time until the primary quota window resets, floored at zero.
pub fn parse_rate_limit_reset(headers: &HeaderMap, now_unix_secs: u64) -> Option<Duration> {
    let reset_at = header_u64(headers, RATE_LIMIT_RESET_HEADER)?;
    Some(Duration::from_secs(reset_at.saturating_sub(now_unix_secs)))
}

pub fn current_unix_timestamp_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

pub fn truncate_for_error(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated = text.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}
