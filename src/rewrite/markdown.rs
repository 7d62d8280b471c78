//! Platform-safe markdown escaping (Telegram MarkdownV2 dialect).
//!
//! Escaping doubles every reserved character, so it is always applied
//! *after* length trimming and the escaped length is what the orchestrator
//! checks against the budget.

/// Characters reserved by the MarkdownV2 dialect.
pub const RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Whether `c` must be escaped.
pub fn is_reserved(c: char) -> bool {
    RESERVED.contains(&c)
}

/// Backslash-escape every reserved character, scanning left to right.
///
/// Text already free of reserved characters comes back unchanged.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        if is_reserved(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Character length of `escape(text)` without allocating.
pub fn escaped_len(text: &str) -> usize {
    text.chars().map(|c| if is_reserved(c) { 2 } else { 1 }).sum()
}
