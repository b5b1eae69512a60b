//! Shared text utilities for presenting node labels
//!
//! Widths are measured in terminal display columns, not bytes or chars.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of `text` in terminal columns
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Shorten `label` to at most `max_width` columns, marking the cut with `…`
///
/// # Example
/// ```
/// use mindgraph::core::truncate_label;
///
/// assert_eq!(truncate_label("Quarterly planning", 10), "Quarterly…");
/// assert_eq!(truncate_label("Short", 10), "Short");
/// ```
pub fn truncate_label(label: &str, max_width: usize) -> String {
    if display_width(label) <= max_width {
        return label.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut width = 0;
    for c in label.chars() {
        let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
        // Reserve one column for the ellipsis
        if width + char_width > max_width - 1 {
            break;
        }
        result.push(c);
        width += char_width;
    }
    result.push('…');
    result
}

/// Right-pad `text` with spaces to `width` columns
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current = display_width(text);
    if current >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - current))
    }
}

/// Collapse a possibly multi-line label into one line
pub fn single_line(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_label() {
        assert_eq!(truncate_label("Root", 10), "Root");
        assert_eq!(truncate_label("", 3), "");
    }

    #[test]
    fn test_truncate_long_label() {
        let out = truncate_label("A very long idea", 8);
        assert_eq!(out, "A very …");
        assert!(display_width(&out) <= 8);
    }

    #[test]
    fn test_truncate_wide_chars() {
        // CJK characters take two columns each
        let out = truncate_label("思维导图工具", 5);
        assert!(display_width(&out) <= 5);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn test_truncate_zero_width() {
        assert_eq!(truncate_label("anything", 0), "");
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("abcdef", 4), "abcdef");
        assert_eq!(display_width(&pad_to_width("图", 4)), 4);
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("first\n  second\tthird"), "first second third");
    }
}
