pub mod http;

/// Get current timestamp in ISO format.
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Truncate a string to max length, adding suffix if truncated.
pub fn truncate_string(s: &str, max_len: usize, suffix: &str) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(suffix.len());
    // Ensure we don't split a multi-byte UTF-8 character
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{}", &s[..end], suffix)
}
