//! Sort and bulk-action line shown above the list.

use crate::ui::helpers::{char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{AdminBarInfo, SortAreaInfo};

/// Renders the bulk-action controls on the left and the sort choice on the
/// right. Either part may be absent; the row is always consumed.
pub fn render_toolbar(
    out: &mut String,
    row: usize,
    admin: Option<&AdminBarInfo>,
    sort: Option<&SortAreaInfo>,
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(out, row, 1);
    let mut used = 0;

    if let Some(admin) = admin {
        let check = if admin.select_all_checked { "[x]" } else { "[ ]" };
        let select_all = format!(" {check} {}", admin.select_all_label);
        out.push_str(&Theme::fg(&theme.colors.checkbox_fg));
        out.push_str(&select_all);
        used += char_width(&select_all);

        let remove = if admin.selected_count > 0 {
            format!("   {} ({})", admin.remove_label, admin.selected_count)
        } else {
            format!("   {}", admin.remove_label)
        };
        if admin.remove_enabled {
            out.push_str(&Theme::fg(&theme.colors.text_normal));
        } else {
            out.push_str(&Theme::fg(&theme.colors.action_disabled_fg));
        }
        out.push_str(&remove);
        used += char_width(&remove);
        out.push_str(Theme::reset());
    }

    if let Some(sort) = sort {
        let label = format!("Sort: {} ", sort.label);
        let gap = cols.saturating_sub(used + char_width(&label));
        out.push_str(&" ".repeat(gap));
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&label);
        out.push_str(Theme::reset());
    }

    row + 1
}
