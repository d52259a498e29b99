//! Shared rendering utilities.
//!
//! Components draw into a `String` frame that the renderer prints in one go.
//! Text measurements and highlight ranges use character indices, never bytes.

use crate::ui::theme::Theme;
use std::fmt::Write as _;

/// Appends a cursor move to `row`/`col` (both 1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Display width of `text` in characters.
#[must_use]
pub fn char_width(text: &str) -> usize {
    text.chars().count()
}

/// Pads `text` with spaces, or cuts it, to exactly `width` characters.
///
/// ```rust
/// use mylibrary::ui::helpers::fit;
///
/// assert_eq!(fit("pdf", 5), "pdf  ");
/// assert_eq!(fit("spreadsheet", 6), "spr...");
/// ```
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let len = char_width(text);
    if len <= width {
        return format!("{text}{}", " ".repeat(width - len));
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{kept}...")
}

/// Appends `text` with the given character ranges highlighted.
///
/// Highlighting is skipped on the cursor row so the selection colors stay
/// intact.
pub fn render_highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}
