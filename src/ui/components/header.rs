//! Title bar with the personalized library name.

use crate::ui::helpers::{char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

const WORKING_MARKER: &str = " …";

/// Renders the centered title, followed by a marker while a filter query runs.
///
/// Returns the next free row.
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let marker = if header.working { WORKING_MARKER } else { "" };
    let title_len = char_width(&header.title) + char_width(marker);
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }

    out.push_str(&" ".repeat(padding));
    out.push_str(&header.title);
    if header.working {
        out.push_str(&Theme::fg(&theme.colors.working_fg));
        out.push_str(marker);
    }
    out.push_str(&" ".repeat(cols.saturating_sub(padding + title_len)));

    out.push_str(Theme::reset());
    row + 1
}
