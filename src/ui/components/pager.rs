//! Page indicator below the list.

use crate::ui::helpers::{char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PagerInfo;

/// Page numbers as drawn, the current one in brackets.
///
/// ```rust
/// use mylibrary::ui::components::pager_label;
/// use mylibrary::ui::viewmodel::PagerInfo;
///
/// assert_eq!(pager_label(&PagerInfo { page: 2, page_count: 3 }), "‹ 1 [2] 3 ›");
/// ```
#[must_use]
pub fn pager_label(pager: &PagerInfo) -> String {
    let pages: Vec<String> = (1..=pager.page_count)
        .map(|n| if n == pager.page { format!("[{n}]") } else { n.to_string() })
        .collect();
    format!("‹ {} ›", pages.join(" "))
}

pub fn render_pager(out: &mut String, row: usize, pager: &PagerInfo, theme: &Theme, cols: usize) -> usize {
    let label = pager_label(pager);
    let padding = cols.saturating_sub(char_width(&label)) / 2;

    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&" ".repeat(padding));
    out.push_str(&label);
    out.push_str(Theme::reset());
    row + 1
}
