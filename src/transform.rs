//! Text transforms behind the three protected endpoints.
//!
//! These are pure functions; the HTTP layer in [`crate::server::handlers`]
//! takes care of parsing, logging and error translation.

/// Prefix prepended to every chat reply.
pub const REPLY_PREFIX: &str = "You said: ";

/// Maximum number of characters kept by [`summarize`].
pub const SUMMARY_MAX_CHARS: usize = 50;

/// Marker appended to truncated summaries.
pub const SUMMARY_ELLIPSIS: &str = "...";

/// Tokens must be strictly longer than this many characters to count as keywords.
pub const KEYWORD_MIN_EXCLUSIVE: usize = 5;

/// Echo a chat message back.
pub fn reply(message: &str) -> String {
    format!("{}{}", REPLY_PREFIX, message)
}

/// Truncate text longer than [`SUMMARY_MAX_CHARS`] characters.
///
/// Lengths are counted in characters, so multi-byte text is never split
/// inside a code point.
pub fn summarize(text: &str) -> String {
    match text.char_indices().nth(SUMMARY_MAX_CHARS) {
        Some((cut, _)) => {
            let mut summary = String::with_capacity(cut + SUMMARY_ELLIPSIS.len());
            summary.push_str(&text[..cut]);
            summary.push_str(SUMMARY_ELLIPSIS);
            summary
        }
        None => text.to_string(),
    }
}

/// Whether `c` separates keyword tokens: Unicode whitespace plus the ASCII
/// information separators `U+001C..=U+001F`.
pub fn is_token_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Split on whitespace and keep tokens longer than [`KEYWORD_MIN_EXCLUSIVE`]
/// characters, preserving their order.
pub fn extract_keywords(text: &str) -> Vec<String> {
    text.split(is_token_separator)
        .filter(|token| token.chars().count() > KEYWORD_MIN_EXCLUSIVE)
        .map(str::to_string)
        .collect()
}
