//! Column-width aware string helpers

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `s` to at most `max_width` columns (no ellipsis)
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

/// Pad with spaces on the right to `width` columns, truncating when longer
pub fn pad_right(s: &str, width: usize) -> String {
    let mut result = truncate(s, width);
    let fill = width.saturating_sub(result.width());
    result.extend(std::iter::repeat(' ').take(fill));
    result
}

/// Center `s` in `width` columns. Text wider than `width` is returned as is.
pub fn center(s: &str, width: usize) -> String {
    let len = s.width();
    if len >= width {
        return s.to_string();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}
