//! Empty-state panel.

use crate::ui::helpers::{char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

fn centered(out: &mut String, row: usize, text: &str, cols: usize) {
    let len = char_width(text);
    let padding = cols.saturating_sub(len) / 2;
    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(padding));
    out.push_str(text);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + len)));
}

/// Renders the personalized message and, for the owner, the add-content hint.
pub fn render_empty_state(out: &mut String, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    centered(out, row + 1, &empty.message, cols);
    out.push_str(Theme::reset());

    let Some(subtitle) = &empty.subtitle else {
        return row + 2;
    };
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    centered(out, row + 2, subtitle, cols);
    out.push_str(Theme::reset());
    row + 3
}
