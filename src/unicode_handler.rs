//! Unicode-aware text editing and measuring
//!
//! Input is edited by grapheme cluster and measured by display width, so
//! emoji and CJK text behave in the input box.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Calculate the display width of a string
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Remove the last grapheme cluster, returning it
pub fn pop_grapheme(s: &mut String) -> Option<String> {
    let (idx, last) = s.grapheme_indices(true).next_back()?;
    let removed = last.to_string();
    s.truncate(idx);
    Some(removed)
}

/// Truncate a string to fit within a maximum display width
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for grapheme in s.graphemes(true) {
        let grapheme_width = grapheme.width();
        if current_width + grapheme_width > max_width {
            break;
        }
        result.push_str(grapheme);
        current_width += grapheme_width;
    }

    result
}

/// Keep the end of a string that fits `max_width`, so the cursor end stays visible
pub fn tail_to_width(s: &str, max_width: usize) -> &str {
    let mut current_width = 0;
    let mut start = s.len();

    for (idx, grapheme) in s.grapheme_indices(true).rev() {
        let grapheme_width = grapheme.width();
        if current_width + grapheme_width > max_width {
            break;
        }
        current_width += grapheme_width;
        start = idx;
    }

    &s[start..]
}

/// Shorten with an ellipsis when wider than `max_width`
pub fn ellipsize(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    format!("{}…", truncate_to_width(s, max_width - 1))
}

/// Count grapheme clusters in a string
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_grapheme_handles_clusters() {
        let mut s = String::from("ae\u{301}");
        assert_eq!(pop_grapheme(&mut s).as_deref(), Some("e\u{301}"));
        assert_eq!(s, "a");

        let mut flag = String::from("hi🇯🇵");
        pop_grapheme(&mut flag);
        assert_eq!(flag, "hi");

        let mut empty = String::new();
        assert_eq!(pop_grapheme(&mut empty), None);
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("Hello"), 5);
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn test_tail_to_width() {
        assert_eq!(tail_to_width("https://github.com", 10), "github.com");
        assert_eq!(tail_to_width("日本語", 4), "本語");
        assert_eq!(tail_to_width("abc", 10), "abc");
    }

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("short", 10), "short");
        assert_eq!(ellipsize("a longer line", 6), "a lon…");
    }

    #[test]
    fn test_grapheme_count() {
        assert_eq!(grapheme_count("e\u{301}x"), 2);
    }
}
