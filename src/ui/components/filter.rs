//! Live filter box.

use crate::ui::helpers::{char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;

/// Horizontal margin around the box.
const FILTER_BOX_MARGIN: usize = 5;

/// Renders the three-line filter box and returns the row below it.
///
/// ```text
/// [margin] ┌──────────────────────────┐ [margin]
/// [margin] │ / Search your library    │ [margin]
/// [margin] └──────────────────────────┘ [margin]
/// ```
///
/// The placeholder is drawn dimmed; a focused box shows a block cursor
/// after the text.
pub fn render_filter_bar(out: &mut String, row: usize, filter: &FilterBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(FILTER_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(FILTER_BOX_MARGIN);
    let border_fg = if filter.is_focused {
        Theme::fg(&theme.colors.filter_border)
    } else {
        Theme::fg(&theme.colors.border)
    };

    position_cursor(out, row, 1);
    out.push_str(&margin);
    out.push_str(&border_fg);
    out.push('┌');
    out.push_str(&"─".repeat(inner_width));
    out.push('┐');
    out.push_str(Theme::reset());

    let cursor = if filter.is_focused { "█" } else { "" };
    let text = format!(" / {}{cursor}", filter.text);
    let padding = inner_width.saturating_sub(char_width(&text));

    position_cursor(out, row + 1, 1);
    out.push_str(&margin);
    out.push_str(&border_fg);
    out.push('│');
    if filter.is_placeholder {
        out.push_str(Theme::italic());
        out.push_str(&Theme::fg(&theme.colors.text_dim));
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
    }
    out.push_str(&text);
    out.push_str(Theme::reset());
    out.push_str(&" ".repeat(padding));
    out.push_str(&border_fg);
    out.push('│');
    out.push_str(Theme::reset());

    position_cursor(out, row + 2, 1);
    out.push_str(&margin);
    out.push_str(&border_fg);
    out.push('└');
    out.push_str(&"─".repeat(inner_width));
    out.push('┘');
    out.push_str(Theme::reset());

    row + 3
}
