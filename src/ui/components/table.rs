//! Library list: column titles and one line per item.
//!
//! ```text
//! [x] quarterly-report.pdf · finance   PDF document    You           about 3 hours ago     2
//! ```

use crate::ui::helpers::{self, char_width, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const CHECK_WIDTH: usize = 4;
const TYPE_WIDTH: usize = 16;
const OWNER_WIDTH: usize = 14;
const UPDATED_WIDTH: usize = 22;
const COMMENTS_WIDTH: usize = 5;
const MIN_NAME_WIDTH: usize = 12;

fn name_width(cols: usize) -> usize {
    cols.saturating_sub(CHECK_WIDTH + TYPE_WIDTH + OWNER_WIDTH + UPDATED_WIDTH + COMMENTS_WIDTH)
        .max(MIN_NAME_WIDTH)
}

pub fn render_table_headers(out: &mut String, row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&" ".repeat(CHECK_WIDTH));
    out.push_str(&fit("NAME", name_width(cols)));
    out.push_str(&fit("TYPE", TYPE_WIDTH));
    out.push_str(&fit("OWNER", OWNER_WIDTH));
    out.push_str(&fit("UPDATED", UPDATED_WIDTH));
    out.push_str(&fit("CMT", COMMENTS_WIDTH));
    out.push_str(Theme::reset());
    row + 1
}

pub fn render_table_rows(out: &mut String, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    items
        .iter()
        .fold(row, |current_row, item| render_table_row(out, current_row, item, theme, cols))
}

fn render_table_row(out: &mut String, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let base_fg = if item.is_selected {
        Theme::fg(&theme.colors.selection_fg)
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    position_cursor(out, row, 1);
    if item.is_selected {
        out.push_str(&Theme::bg(&theme.colors.selection_bg));
    }

    if item.is_owner {
        let check = if item.is_checked { "[x] " } else { "[ ] " };
        if !item.is_selected {
            out.push_str(&Theme::fg(&theme.colors.checkbox_fg));
        }
        out.push_str(check);
    } else {
        out.push_str(&" ".repeat(CHECK_WIDTH));
    }
    out.push_str(&base_fg);

    let width = name_width(cols);
    helpers::render_highlighted_text(out, &item.name, &item.highlight_ranges, theme, item.is_selected);
    let mut used = char_width(&item.name);

    let tag_room = width.saturating_sub(used + 4);
    if !item.tags.is_empty() && tag_room > 3 {
        let tags = fit(&format!(" · {}", item.tags), tag_room.min(char_width(&item.tags) + 3));
        if !item.is_selected {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
        }
        out.push_str(&tags);
        out.push_str(&base_fg);
        used += char_width(&tags);
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));

    out.push_str(&fit(&item.type_label, TYPE_WIDTH));
    out.push_str(&fit(&item.owner_label, OWNER_WIDTH));
    out.push_str(&fit(&item.last_updated, UPDATED_WIDTH));
    let comments = if item.num_comments > 0 { item.num_comments.to_string() } else { String::new() };
    out.push_str(&fit(&comments, COMMENTS_WIDTH));

    let line_len = CHECK_WIDTH + width + TYPE_WIDTH + OWNER_WIDTH + UPDATED_WIDTH + COMMENTS_WIDTH;
    out.push_str(&" ".repeat(cols.saturating_sub(line_len)));
    out.push_str(Theme::reset());
    row + 1
}
