//! View model types representing renderable widget state.
//!
//! View models are computed by [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. They carry display-ready strings and flags
//! only; which panels exist is decided when the view model is built, so the
//! components never consult application state.
//!
//! # Example
//!
//! ```rust
//! use mylibrary::ui::viewmodel::{FooterInfo, HeaderInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: "My Library".to_string(), working: false },
//!     filter_bar: None,
//!     sort_area: None,
//!     admin_bar: None,
//!     show_column_titles: false,
//!     display_items: vec![],
//!     selected_index: 0,
//!     pager: None,
//!     empty_state: None,
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//! };
//! assert!(vm.display_items.is_empty());
//! ```

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// `None` while the filter box is hidden.
    pub filter_bar: Option<FilterBarInfo>,

    /// `None` while the sort area is hidden.
    pub sort_area: Option<SortAreaInfo>,

    /// `None` unless the owning viewer is looking at a populated list.
    pub admin_bar: Option<AdminBarInfo>,

    /// Whether the column title bar is shown above the rows.
    pub show_column_titles: bool,

    /// Rows inside the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Cursor position relative to `display_items`.
    pub selected_index: usize,

    /// `None` when the list fits on one page.
    pub pager: Option<PagerInfo>,

    pub empty_state: Option<EmptyState>,

    pub footer: FooterInfo,
}

/// One rendered row.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    pub name: String,
    pub type_label: String,
    pub owner_label: String,
    pub last_updated: String,
    /// Tag names joined for display, empty when untagged.
    pub tags: String,
    pub num_comments: usize,
    /// The cursor is on this row.
    pub is_selected: bool,
    /// The row's checkbox is ticked.
    pub is_checked: bool,
    /// The viewer manages the item and is on their own library page.
    pub is_owner: bool,
    /// The viewer created the item.
    pub is_manager: bool,
    /// `(start, end)` character ranges of `name` matching the filter.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    /// A filter query is in flight.
    pub working: bool,
}

#[derive(Debug, Clone)]
pub struct FilterBarInfo {
    /// The typed filter, or the personalized placeholder.
    pub text: String,
    pub is_placeholder: bool,
    pub is_focused: bool,
}

#[derive(Debug, Clone)]
pub struct SortAreaInfo {
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct AdminBarInfo {
    pub select_all_checked: bool,
    pub remove_enabled: bool,
    pub selected_count: usize,
    pub select_all_label: String,
    pub remove_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerInfo {
    pub page: usize,
    pub page_count: usize,
}

#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    /// Add-content hint, only offered to the owner.
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}
