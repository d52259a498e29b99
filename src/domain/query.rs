//! Paging, sorting and filtering state for one widget instance.
//!
//! [`ListQueryState`] is created when the widget loads, lives as long as the
//! widget, and drives every listing request. Only the list state controller
//! in [`AppState`](crate::app::AppState) mutates it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field the listing endpoint sorts on by default.
pub const DEFAULT_SORT_FIELD: &str = "_lastModified";

/// Number of rows shown per page unless configured otherwise.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 8;

/// Sort direction accepted by the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The sort choices offered by the sort area.
///
/// Unknown keys resolve to [`SortSelection::NewestFirst`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortSelection {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl SortSelection {
    /// Resolves a sort-select option value.
    ///
    /// ```
    /// use mylibrary::domain::{SortOrder, SortSelection};
    ///
    /// assert_eq!(SortSelection::from_key("lastModified_asc").order(), SortOrder::Asc);
    /// assert_eq!(SortSelection::from_key("bogus").order(), SortOrder::Desc);
    /// ```
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "lastModified_asc" => Self::OldestFirst,
            _ => Self::NewestFirst,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::NewestFirst => "lastModified_desc",
            Self::OldestFirst => "lastModified_asc",
        }
    }

    #[must_use]
    pub const fn field(self) -> &'static str {
        DEFAULT_SORT_FIELD
    }

    #[must_use]
    pub const fn order(self) -> SortOrder {
        match self {
            Self::NewestFirst => SortOrder::Desc,
            Self::OldestFirst => SortOrder::Asc,
        }
    }

    /// The other choice, used by the sort toggle key.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::NewestFirst => Self::OldestFirst,
            Self::OldestFirst => Self::NewestFirst,
        }
    }
}

/// Mutable query state of the library list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQueryState {
    /// Current page, 1-indexed.
    pub page: usize,
    pub items_per_page: usize,
    pub sort_field: String,
    pub sort_order: SortOrder,
    /// Active live-filter text, `None` when unfiltered.
    pub filter_text: Option<String>,
    /// Total matching items reported by the last successful fetch.
    pub total_items: usize,
    /// Whether the viewer owns the library being shown. Fixed at init.
    pub is_owner_viewing: bool,
}

impl ListQueryState {
    /// Creates the initial state: page 1, newest first, unfiltered.
    ///
    /// A zero page size falls back to [`DEFAULT_ITEMS_PER_PAGE`].
    #[must_use]
    pub fn new(items_per_page: usize, is_owner_viewing: bool) -> Self {
        let selection = SortSelection::default();
        Self {
            page: 1,
            items_per_page: if items_per_page == 0 { DEFAULT_ITEMS_PER_PAGE } else { items_per_page },
            sort_field: selection.field().to_string(),
            sort_order: selection.order(),
            filter_text: None,
            total_items: 0,
            is_owner_viewing,
        }
    }

    /// Applies a sort choice.
    pub fn apply_sort(&mut self, selection: SortSelection) {
        self.sort_field = selection.field().to_string();
        self.sort_order = selection.order();
    }

    /// The sort choice matching the current field and order.
    #[must_use]
    pub fn sort_selection(&self) -> SortSelection {
        if self.sort_field == DEFAULT_SORT_FIELD && self.sort_order == SortOrder::Asc {
            SortSelection::OldestFirst
        } else {
            SortSelection::NewestFirst
        }
    }

    /// Number of pages needed for `total_items`.
    ///
    /// ```
    /// use mylibrary::domain::ListQueryState;
    ///
    /// let mut state = ListQueryState::new(8, true);
    /// state.total_items = 8;
    /// assert_eq!(state.page_count(), 1);
    /// state.total_items = 9;
    /// assert_eq!(state.page_count(), 2);
    /// ```
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.total_items.div_ceil(self.items_per_page)
    }

    /// The pager is only shown when there is more than one page.
    #[must_use]
    pub const fn pager_visible(&self) -> bool {
        self.page_count() > 1
    }

    /// Query string sent to the endpoint: the filter text or the `*` wildcard.
    #[must_use]
    pub fn query_string(&self) -> &str {
        self.filter_text.as_deref().unwrap_or("*")
    }

    /// Zero-indexed page number sent to the endpoint.
    #[must_use]
    pub const fn request_page(&self) -> usize {
        self.page.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_defaults() {
        let state = ListQueryState::new(0, false);
        assert_eq!(state.page, 1);
        assert_eq!(state.items_per_page, DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(state.sort_field, "_lastModified");
        assert_eq!(state.sort_order, SortOrder::Desc);
        assert_eq!(state.query_string(), "*");
        assert_eq!(state.request_page(), 0);
    }

    #[test]
    fn pager_boundary() {
        let mut state = ListQueryState::new(8, true);
        state.total_items = 0;
        assert_eq!(state.page_count(), 0);
        assert!(!state.pager_visible());

        state.total_items = 8;
        assert_eq!(state.page_count(), 1);
        assert!(!state.pager_visible());

        state.total_items = 9;
        assert_eq!(state.page_count(), 2);
        assert!(state.pager_visible());
    }

    #[test]
    fn sort_selection_round_trips_through_state() {
        let mut state = ListQueryState::new(8, true);
        state.apply_sort(SortSelection::from_key("lastModified_asc"));
        assert_eq!(state.sort_order, SortOrder::Asc);
        assert_eq!(state.sort_selection(), SortSelection::OldestFirst);

        state.apply_sort(SortSelection::from_key("name_asc"));
        assert_eq!(state.sort_field, "_lastModified");
        assert_eq!(state.sort_order, SortOrder::Desc);
        assert_eq!(state.sort_selection().toggled(), SortSelection::OldestFirst);
    }
}
