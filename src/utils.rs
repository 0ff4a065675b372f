use unicode_width::UnicodeWidthChar;

pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Horizontal scrolling for a single-line input field.
///
/// `cursor` counts characters. Returns the slice of `text` that fits in
/// `width` columns with the cursor visible, and the cursor's column inside
/// that slice.
pub fn input_window(text: &str, cursor: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    let char_width = |c: &char| c.width().unwrap_or(1);

    // Walk back from the cursor until the window is full; one column is kept
    // free for the cursor itself.
    let mut start = cursor;
    let mut used = 1;
    while start > 0 {
        let w = char_width(&chars[start - 1]);
        if used + w > width {
            break;
        }
        used += w;
        start -= 1;
    }

    let cursor_col: usize = chars[start..cursor].iter().map(char_width).sum();

    let mut visible = String::new();
    let mut cols = 0;
    for c in &chars[start..] {
        let w = char_width(c);
        if cols + w > width {
            break;
        }
        visible.push(*c);
        cols += w;
    }

    (visible, cursor_col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_no_truncation() {
        let s = "Short string";
        let result = truncate_string(s, 20);
        assert_eq!(result, "Short string");
    }

    #[test]
    fn test_truncate_string_with_truncation() {
        let s = "This is a very long string that should be truncated";
        let result = truncate_string(s, 20);
        assert_eq!(result, "This is a very lo...");
        assert!(result.len() <= 20);
    }

    #[test]
    fn test_truncate_string_multibyte() {
        let result = truncate_string("pequeño corazón", 10);
        assert_eq!(result, "pequeño...");
    }

    #[test]
    fn test_truncate_string_empty() {
        assert_eq!(truncate_string("", 20), "");
    }

    #[test]
    fn test_input_window_fits() {
        let (visible, col) = input_window("gato, perro", 4, 20);
        assert_eq!(visible, "gato, perro");
        assert_eq!(col, 4);
    }

    #[test]
    fn test_input_window_scrolls_to_cursor() {
        let text = "uno, dos, tres, cuatro";
        let (visible, col) = input_window(text, text.chars().count(), 10);
        assert_eq!(visible, "s, cuatro");
        assert_eq!(col, 9);
    }

    #[test]
    fn test_input_window_cursor_at_start_of_long_text() {
        let (visible, col) = input_window("abcdefghijkl", 0, 5);
        assert_eq!(visible, "abcde");
        assert_eq!(col, 0);
    }

    #[test]
    fn test_input_window_zero_width() {
        assert_eq!(input_window("abc", 1, 0), (String::new(), 0));
    }

    #[test]
    fn test_input_window_cursor_beyond_text() {
        let (visible, col) = input_window("Hi", 10, 10);
        assert_eq!(visible, "Hi");
        assert_eq!(col, 2);
    }
}
