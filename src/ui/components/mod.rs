//! Composable component renderers.
//!
//! Every component appends to a frame buffer and returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Personalized title with the working marker
//! - [`filter`]: Live filter box
//! - [`toolbar`]: Bulk actions and sort choice
//! - [`table`]: Column titles and item rows
//! - [`pager`]: Page indicator
//! - [`empty`]: Empty-state panel
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank]
//! [Header]
//! [Border]
//! [Filter box, 3 lines]        only while shown
//! [Toolbar]
//! [Column titles]
//! [Rows] or [Empty state]
//! [Pager]                      only with more than one page
//! [Border]
//! [Footer]
//! ```

mod empty;
mod filter;
mod footer;
mod header;
mod pager;
mod table;
mod toolbar;

pub use pager::pager_label;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use filter::render_filter_bar;
use footer::render_footer;
use header::render_header;
use pager::render_pager;
use table::{render_table_headers, render_table_rows};
use toolbar::render_toolbar;

/// Renders a horizontal rule and returns the next row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Draws a full frame for `vm` into `out`.
pub fn render_frame(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    if let Some(filter) = &vm.filter_bar {
        current_row = render_filter_bar(out, current_row, filter, theme, cols);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(out, current_row, empty, theme, cols);
    } else {
        current_row = render_toolbar(out, current_row, vm.admin_bar.as_ref(), vm.sort_area.as_ref(), theme, cols);
        if vm.show_column_titles {
            current_row = render_table_headers(out, current_row, theme, cols);
        }
        current_row = render_table_rows(out, current_row, &vm.display_items, theme, cols);
        if let Some(pager) = &vm.pager {
            render_pager(out, current_row, pager, theme, cols);
        }
    }

    let footer_start = rows.saturating_sub(1).max(1);
    let border_row = footer_start.saturating_sub(1).max(1);

    render_border(out, border_row, &theme.colors.border, cols);
    render_footer(out, footer_start, &vm.footer, theme, cols);
}
