//! Horizontal scrolling of single-line input fields.

use unicode_width::UnicodeWidthChar;

/// Prompt symbol shown before the input text.
pub const PROMPT_SYMBOL: &str = "> ";

/// Slice of `text` that fits in `width` columns with the cursor kept in view,
/// paired with the cursor column inside that slice.
///
/// `cursor` is a character index; columns account for wide characters.
pub fn visible_window(text: &str, cursor: usize, width: usize) -> (String, usize) {
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    let width = width.max(1);

    let mut start = 0;
    let mut cursor_column: usize = chars[..cursor].iter().map(|ch| column_width(*ch)).sum();
    // The cursor cell itself needs a free column.
    while cursor_column >= width && start < cursor {
        cursor_column -= column_width(chars[start]);
        start += 1;
    }

    let mut visible = String::new();
    let mut used = 0;
    for ch in &chars[start..] {
        let ch_width = column_width(*ch);
        if used + ch_width > width {
            break;
        }
        used += ch_width;
        visible.push(*ch);
    }

    (visible, cursor_column)
}

fn column_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_shown_whole() {
        assert_eq!(visible_window("hello", 5, 20), ("hello".to_owned(), 5));
        assert_eq!(visible_window("hello", 2, 20), ("hello".to_owned(), 2));
    }

    #[test]
    fn wide_characters_take_two_columns() {
        assert_eq!(visible_window("日本語", 2, 20), ("日本語".to_owned(), 4));
    }

    #[test]
    fn long_text_scrolls_to_keep_cursor_visible() {
        let (visible, column) = visible_window("abcdefghij", 10, 5);

        assert_eq!(visible, "ghij");
        assert_eq!(column, 4);
    }

    #[test]
    fn cursor_at_start_shows_the_head_of_long_text() {
        let (visible, column) = visible_window("abcdefghij", 0, 5);

        assert_eq!(visible, "abcde");
        assert_eq!(column, 0);
    }
}
