#![no_main]

use libfuzzer_sys::fuzz_target;
use orgcheck_github::throttle::{detect_throttle_signal, ThrottleSignal};
use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let status = u16::from_be_bytes([data[0], data[1]]);
    let raw = String::from_utf8_lossy(&data[2..]);
    let (header_part, body) = raw.split_once('\n').unwrap_or((raw.as_ref(), ""));

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(header_part) {
        headers.insert(RETRY_AFTER, value.clone());
        headers.insert("x-ratelimit-reset", value);
    }

    match detect_throttle_signal(status, &headers, body, 1_700_000_000) {
        Some(ThrottleSignal::RateLimited { .. }) => assert!(status == 429 || status == 403),
        Some(ThrottleSignal::AbuseDetected { .. }) => assert_eq!(status, 403),
        None => assert_ne!(status, 429),
    }
});
