/// Truncate `text` to at most `max_len` characters.
///
/// Over-length text keeps its first `max_len - 5` characters followed by a
/// single "…", so the result is always shorter than the limit.
pub fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_len.saturating_sub(5)).collect();
    truncated.push('…');
    truncated
}

/// Thai baht with two decimals, e.g. `฿120.50`
pub fn format_baht(amount: f64) -> String {
    format!("฿{:.2}", amount)
}
