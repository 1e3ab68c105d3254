#![no_main]

use libfuzzer_sys::fuzz_target;
use orgcheck_membership::{classify_status, extract_target_username, last_token};

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let username = extract_target_username(&raw);

    match last_token(&raw) {
        Some(token) => {
            assert!(!token.chars().any(char::is_whitespace));
            assert!(token.ends_with(username.as_str()));
            assert!(token.len() - username.len() <= 1);
        }
        None => assert!(username.is_empty()),
    }

    let status = data
        .get(..2)
        .map(|bytes| u16::from_be_bytes([bytes[0], bytes[1]]))
        .unwrap_or(0);
    let comment = classify_status(status).render_comment(&username, "fuzz-org");
    assert!(!comment.trim().is_empty());
});
