//! String helpers for log lines and console previews.

/// Shorten `s` to at most `max_len` bytes, appending `...` when cut.
///
/// The cut always lands on a UTF-8 character boundary.
pub fn preview(s: &str, max_len: usize) -> String {
    let single_line = s.replace('\n', " ");
    if single_line.len() <= max_len {
        return single_line;
    }
    let mut end = max_len.saturating_sub(3);
    while end > 0 && !single_line.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &single_line[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_is_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
    }

    #[test]
    fn test_preview_cuts_with_ellipsis() {
        assert_eq!(preview("hello world", 8), "hello...");
    }

    #[test]
    fn test_preview_flattens_newlines() {
        assert_eq!(preview("a\nb", 10), "a b");
    }

    #[test]
    fn test_preview_respects_char_boundary() {
        // each 'é' is 2 bytes
        assert_eq!(preview("éééééé", 8), "éé...");
    }
}
