//! String utilities for the domain layer.

/// Truncate a string to at most `max_chars` characters, replacing the tail
/// with `...` when it is longer.
///
/// Counts characters rather than bytes, so multi-byte text is never split
/// inside a code point and the result is at most `max_chars` long.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let head: String = s.chars().take(keep).collect();
    format!("{}...", head)
}

/// Strip any run of `"` and `'` characters from both ends.
pub fn strip_quotes(s: &str) -> &str {
    s.trim_matches(|c| c == '"' || c == '\'')
}
