/// Leading marker GitHub uses for user mentions.
pub const MENTION_MARKER: char = '@';

/// Returns the last whitespace-delimited token of `text`.
///
/// Empty or whitespace-only input yields `None`; single-token input yields
/// that token.
pub fn last_token(text: &str) -> Option<&str> {
    text.split_whitespace().next_back()
}

/// Derive the user being asked about from a comment body.
///
/// Takes the last token and strips one leading mention marker. The result is
/// not validated; an empty body produces an empty username.
pub fn extract_target_username(body: &str) -> String {
    let token = last_token(body).unwrap_or_default();
    token
        .strip_prefix(MENTION_MARKER)
        .unwrap_or(token)
        .to_string()
}
