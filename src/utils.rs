//! Shared text helpers.

/// Truncates `text` to at most `budget` characters, appending `...` when
/// anything was cut.
///
/// Counts Unicode scalar values, so multi-byte text is never split inside a
/// character.
///
/// # Examples
///
/// ```
/// use smartcampus::utils::truncate_chars;
///
/// assert_eq!(truncate_chars("shuttle", 10), "shuttle");
/// assert_eq!(truncate_chars("shuttle schedule", 7), "shuttle...");
/// ```
pub fn truncate_chars(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_chars("6am", 1000), "6am");
        assert_eq!(truncate_chars("exact", 5), "exact");
    }

    #[test]
    fn truncate_respects_multibyte_boundaries() {
        assert_eq!(truncate_chars("café crème", 4), "café...");
        assert_eq!(truncate_chars("🏫🏫🏫", 2), "🏫🏫...");
    }

    #[test]
    fn zero_budget_keeps_only_ellipsis() {
        assert_eq!(truncate_chars("shuttle", 0), "...");
        assert_eq!(truncate_chars("", 0), "");
    }
}
