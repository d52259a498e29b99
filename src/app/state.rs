//! Widget state, the list state controller and the render/selection controller.
//!
//! [`AppState`] is the single owner of everything one widget instance knows:
//! the query state that drives fetches, the rows of the last rendered page,
//! checkbox selection, and which pieces of list chrome are visible. The
//! plugin shim never mutates it directly; it goes through
//! [`handle_event`](crate::app::handle_event), which calls the controller
//! methods defined here.
//!
//! # Controllers
//!
//! - **List state**: [`AppState::reset`], [`AppState::change_page`],
//!   [`AppState::change_sort`], [`AppState::apply_filter`],
//!   [`AppState::delete_selected`] with [`AppState::on_delete_complete`], and
//!   [`AppState::on_external_refresh`]. Every one of them ends in a reset,
//!   which returns the [`Action::FetchLibrary`] to run.
//! - **Render/selection**: [`AppState::apply_listing`] feeds a transport
//!   completion through the fetcher and into [`AppState::render`];
//!   [`AppState::toggle_current_row`] and [`AppState::toggle_select_all`]
//!   maintain the checkbox selection.
//!
//! # Example
//!
//! ```rust
//! use mylibrary::app::{Action, AppState, LibraryProfile};
//! use mylibrary::i18n::MessageBundle;
//! use mylibrary::ui::theme::Theme;
//!
//! let profile = LibraryProfile {
//!     owner_id: Some("ada".to_string()),
//!     owner_first_name: "Ada".to_string(),
//!     viewer_id: "ada".to_string(),
//! };
//! let mut state = AppState::new(profile, 8, MessageBundle::builtin(), Theme::default());
//! let actions = state.start();
//! assert!(matches!(actions.as_slice(), [Action::FetchLibrary(_)]));
//! ```

use super::modes::{FilterKey, InputMode};
use crate::app::Action;
use crate::domain::{LibraryItem, ListQueryState, SelectionState, SortSelection};
use crate::i18n::MessageBundle;
use crate::library::{FetchOutcome, LibraryFetcher, MapContext, MimeTypeRegistry};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    AdminBarInfo, DisplayItem, EmptyState, FilterBarInfo, FooterInfo, HeaderInfo, PagerInfo,
    SortAreaInfo, UIViewModel,
};
use chrono::{DateTime, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Identities the widget was loaded with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryProfile {
    /// User whose library is listed. Without one nothing is fetched.
    pub owner_id: Option<String>,
    /// Used for the personalized strings when someone else is viewing.
    pub owner_first_name: String,
    /// Signed-in user.
    pub viewer_id: String,
}

impl LibraryProfile {
    /// Whether the signed-in user is looking at their own library.
    #[must_use]
    pub fn is_owner_viewing(&self) -> bool {
        self.owner_id.as_deref() == Some(self.viewer_id.as_str())
    }
}

/// Visibility of the list chrome, as set by the last render.
///
/// Everything starts hidden until the first fetch completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListChrome {
    pub filter_box: bool,
    pub sort_area: bool,
    pub title_bar: bool,
    pub admin_actions: bool,
    pub empty_panel: bool,
    pub add_content: bool,
}

/// Central state container for one widget instance.
#[derive(Debug, Clone)]
pub struct AppState {
    pub profile: LibraryProfile,

    /// Paging, sort and filter state driving every fetch.
    pub query: ListQueryState,

    /// Rows of the last populated render. Cleared on every reset.
    pub items: Vec<LibraryItem>,

    /// Checked rows. Cleared on every reset.
    pub selection: SelectionState,

    pub chrome: ListChrome,

    /// Cursor position within `items`.
    pub selected_index: usize,

    pub input_mode: InputMode,

    /// Raw text typed into the filter box.
    pub filter_input: String,

    /// A filter-triggered fetch has not rendered a populated list yet.
    pub filter_working: bool,

    /// A fetch is outstanding.
    pub loading: bool,

    pub fetcher: LibraryFetcher,
    pub bundle: MessageBundle,
    pub mimetypes: MimeTypeRegistry,
    pub theme: Theme,
}

impl AppState {
    #[must_use]
    pub fn new(profile: LibraryProfile, items_per_page: usize, bundle: MessageBundle, theme: Theme) -> Self {
        let query = ListQueryState::new(items_per_page, profile.is_owner_viewing());
        Self {
            profile,
            query,
            items: Vec::new(),
            selection: SelectionState::new(),
            chrome: ListChrome::default(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            filter_input: String::new(),
            filter_working: false,
            loading: false,
            fetcher: LibraryFetcher::new(),
            bundle,
            mimetypes: MimeTypeRegistry::default(),
            theme,
        }
    }

    /// Issues the first fetch.
    ///
    /// Without an owning user this only logs a warning.
    pub fn start(&mut self) -> Vec<Action> {
        if self.profile.owner_id.is_none() {
            tracing::warn!("no library owner available, widget will stay empty");
            return vec![];
        }
        tracing::info!(
            owner = ?self.profile.owner_id,
            is_owner_viewing = self.query.is_owner_viewing,
            "library widget starting"
        );
        self.reset()
    }

    // ---- list state controller ----

    /// Clears the rendered list and selection, then fetches with the current state.
    pub fn reset(&mut self) -> Vec<Action> {
        let _span = tracing::debug_span!("reset", page = self.query.page).entered();
        self.items.clear();
        self.selection.clear();
        self.selected_index = 0;

        let Some(owner) = self.profile.owner_id.as_deref() else {
            tracing::warn!("reset without a library owner, skipping fetch");
            return vec![];
        };
        let request = self.fetcher.begin(owner, &self.query);
        self.loading = true;
        vec![Action::FetchLibrary(request)]
    }

    /// Moves to page `page` keeping filter and sort.
    ///
    /// Page numbers outside `1..=page_count` are ignored.
    pub fn change_page(&mut self, page: usize) -> Vec<Action> {
        let page_count = self.query.page_count().max(1);
        if page == 0 || page > page_count {
            tracing::debug!(page, page_count, "ignoring out of range page");
            return vec![];
        }
        self.query.page = page;
        self.reset()
    }

    pub fn next_page(&mut self) -> Vec<Action> {
        if self.query.page >= self.query.page_count() {
            return vec![];
        }
        self.change_page(self.query.page + 1)
    }

    pub fn prev_page(&mut self) -> Vec<Action> {
        if self.query.page <= 1 {
            return vec![];
        }
        self.change_page(self.query.page - 1)
    }

    /// Applies a sort choice and refetches from page 1.
    pub fn change_sort(&mut self, selection: SortSelection) -> Vec<Action> {
        tracing::debug!(sort = selection.key(), "sort changed");
        self.query.apply_sort(selection);
        self.query.page = 1;
        self.reset()
    }

    /// Runs the typed filter text as the listing query, from page 1.
    ///
    /// Blank text clears the filter so the wildcard query is sent.
    pub fn apply_filter(&mut self) -> Vec<Action> {
        let text = self.filter_input.trim();
        self.query.filter_text = if text.is_empty() { None } else { Some(text.to_string()) };
        self.filter_working = self.query.filter_text.is_some();
        self.query.page = 1;
        self.reset()
    }

    /// Edits the filter text. Every edit except a bare Shift refetches.
    pub fn filter_key(&mut self, key: FilterKey) -> Vec<Action> {
        match key {
            FilterKey::Shift => return vec![],
            FilterKey::Char(c) => self.filter_input.push(c),
            FilterKey::Backspace => {
                self.filter_input.pop();
            }
        }
        tracing::trace!(filter = %self.filter_input, "filter text updated");
        self.apply_filter()
    }

    /// Leaves filter mode, dropping the filter. Refetches only if one was active.
    pub fn clear_filter(&mut self) -> Vec<Action> {
        self.input_mode = InputMode::Normal;
        self.filter_input.clear();
        if self.query.filter_text.is_none() {
            return vec![];
        }
        self.apply_filter()
    }

    /// Requests deletion of every checked row.
    ///
    /// Only the owning viewer can delete, and only with at least one row checked.
    pub fn delete_selected(&self) -> Vec<Action> {
        if !self.chrome.admin_actions || !self.selection.bulk_delete_enabled() {
            return vec![];
        }
        let paths: Vec<String> = self.selection.ids().map(|id| format!("/p/{id}")).collect();
        tracing::info!(count = paths.len(), "removing selected items");
        vec![Action::DeleteContent { paths }]
    }

    /// Handles the aggregated deletion result.
    ///
    /// Success refetches from page 1. Failure leaves the list as it is.
    pub fn on_delete_complete(&mut self, success: bool) -> Vec<Action> {
        if !success {
            tracing::warn!("content removal failed, keeping current list");
            return vec![];
        }
        self.query.page = 1;
        self.reset()
    }

    /// Refetches from page 1 after a sibling widget changed the library.
    pub fn on_external_refresh(&mut self) -> Vec<Action> {
        self.query.page = 1;
        self.reset()
    }

    // ---- render/selection controller ----

    /// Feeds a transport completion through the fetcher and renders it.
    ///
    /// Returns `false` when the completion was stale and nothing changed.
    pub fn apply_listing(&mut self, generation: u64, status: u16, body: &[u8], now: DateTime<Utc>) -> bool {
        let owner = self.profile.owner_id.as_deref().unwrap_or_default();
        let ctx = MapContext {
            viewer_id: &self.profile.viewer_id,
            bundle: &self.bundle,
            mimetypes: &self.mimetypes,
            now,
        };
        let Some(outcome) = self.fetcher.complete(owner, generation, status, body, &mut self.query, &ctx) else {
            return false;
        };
        self.render(outcome);
        true
    }

    /// Shows either the populated list or the empty-state panel.
    ///
    /// A failed fetch renders like an empty one.
    pub fn render(&mut self, outcome: FetchOutcome) {
        let _span = tracing::debug_span!("render", success = outcome.success()).entered();
        self.loading = false;
        let is_owner_viewing = self.query.is_owner_viewing;

        let items = match outcome {
            FetchOutcome::Loaded(items) if !items.is_empty() => items,
            _ => {
                self.items.clear();
                self.selected_index = 0;
                self.chrome = ListChrome {
                    filter_box: false,
                    sort_area: false,
                    title_bar: false,
                    admin_actions: false,
                    empty_panel: true,
                    add_content: is_owner_viewing,
                };
                return;
            }
        };

        self.chrome = ListChrome {
            filter_box: true,
            sort_area: true,
            title_bar: true,
            admin_actions: is_owner_viewing,
            empty_panel: false,
            add_content: self.chrome.add_content,
        };
        self.filter_working = false;
        self.items = items;
        self.selected_index = self.selected_index.min(self.items.len() - 1);
        tracing::debug!(rows = self.items.len(), total = self.query.total_items, "list rendered");
    }

    /// The viewer created the item.
    #[must_use]
    pub fn is_manager(&self, item: &LibraryItem) -> bool {
        item.owner_id == self.profile.viewer_id
    }

    /// The viewer created the item and is on their own library page.
    #[must_use]
    pub fn is_owner(&self, item: &LibraryItem) -> bool {
        self.is_manager(item) && self.query.is_owner_viewing
    }

    pub fn move_selection_down(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.items.len();
    }

    pub fn move_selection_up(&mut self) {
        if self.items.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.items.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&LibraryItem> {
        self.items.get(self.selected_index)
    }

    /// Flips the checkbox of the row under the cursor.
    ///
    /// Returns whether anything changed. Rows only carry a checkbox when
    /// the bulk-action bar is shown and the viewer owns the row.
    pub fn toggle_current_row(&mut self) -> bool {
        if !self.chrome.admin_actions {
            return false;
        }
        let Some(item) = self.selected_item() else {
            return false;
        };
        if !self.is_owner(item) {
            return false;
        }
        let id = item.id.clone();
        let checked = self.selection.toggle(&id);
        tracing::trace!(id = %id, checked, "row checkbox toggled");
        true
    }

    /// Checks or unchecks every row via the select-all control.
    pub fn toggle_select_all(&mut self) -> bool {
        if !self.chrome.admin_actions {
            return false;
        }
        let checked = !self.selection.select_all_checked();
        let ids: Vec<&str> = self
            .items
            .iter()
            .filter(|item| self.is_owner(item))
            .map(|item| item.id.as_str())
            .collect();
        self.selection.set_all(ids, checked);
        true
    }

    // ---- view model ----

    /// Computes the view model for a pane of `rows` x `cols` cells.
    ///
    /// The row window is centered on the cursor when the page holds more
    /// rows than fit.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let filter_bar = self.compute_filter_bar();
        let available_rows = self.calculate_available_rows(rows, filter_bar.is_some()).max(1);

        let mut visible_start = self
            .selected_index
            .saturating_sub(available_rows / 2)
            .min(self.items.len());
        let visible_end = (visible_start + available_rows).min(self.items.len());
        if visible_end - visible_start < available_rows && self.items.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = self.query.filter_text.as_ref().map(|_| SkimMatcherV2::default());

        let display_items = self.items[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, item)| self.compute_display_item(item, visible_start + offset, cols, matcher.as_ref()))
            .collect();

        UIViewModel {
            header: self.compute_header(),
            filter_bar,
            sort_area: self.compute_sort_area(),
            admin_bar: self.compute_admin_bar(),
            show_column_titles: self.chrome.title_bar && !self.items.is_empty(),
            display_items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            pager: self.compute_pager(),
            empty_state: self.compute_empty_state(),
            footer: self.compute_footer(),
        }
    }

    fn compute_display_item(
        &self,
        item: &LibraryItem,
        absolute_idx: usize,
        cols: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        // checkbox, type, owner, updated and comment columns
        const FIXED_COLUMNS_WIDTH: usize = 4 + 16 + 14 + 22 + 5;

        let max_name_width = cols.saturating_sub(FIXED_COLUMNS_WIDTH).max(12);
        let name = truncate_chars(&item.filename, max_name_width);
        let highlight_ranges = matcher.map_or_else(Vec::new, |m| self.compute_highlight_ranges(&name, m));

        let tags = item
            .tags
            .as_ref()
            .map(|tags| tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>().join(", "))
            .unwrap_or_default();

        DisplayItem {
            name,
            type_label: item.type_label.clone(),
            owner_label: item.owner_label.clone(),
            last_updated: item.last_updated.clone(),
            tags,
            num_comments: item.num_comments,
            is_selected: absolute_idx == self.selected_index,
            is_checked: self.selection.is_selected(&item.id),
            is_owner: self.is_owner(item),
            is_manager: self.is_manager(item),
            highlight_ranges,
        }
    }

    /// Coalesces fuzzy match indices into `(start, end)` ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some(filter) = self.query.filter_text.as_deref() else {
            return vec![];
        };
        let Some((_score, indices)) = matcher.fuzzy_indices(text, filter) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = if self.query.is_owner_viewing {
            self.bundle.widget("MY_LIBRARY")
        } else {
            self.bundle
                .personalized("USERS_LIBRARY", false, &self.profile.owner_first_name)
        };
        HeaderInfo {
            title: format!(" {title} "),
            working: self.filter_working,
        }
    }

    /// The filter bar stays up while a filter is being edited or is active,
    /// even when it matched nothing.
    fn compute_filter_bar(&self) -> Option<FilterBarInfo> {
        let is_focused = self.input_mode == InputMode::Filter;
        if !(self.chrome.filter_box || is_focused || self.query.filter_text.is_some()) {
            return None;
        }

        if self.filter_input.is_empty() && !is_focused {
            return Some(FilterBarInfo {
                text: self.bundle.personalized(
                    "SEARCH_YOUR_LIBRARY",
                    self.query.is_owner_viewing,
                    &self.profile.owner_first_name,
                ),
                is_placeholder: true,
                is_focused,
            });
        }

        Some(FilterBarInfo {
            text: self.filter_input.clone(),
            is_placeholder: false,
            is_focused,
        })
    }

    fn compute_sort_area(&self) -> Option<SortAreaInfo> {
        if !self.chrome.sort_area {
            return None;
        }
        let key = match self.query.sort_selection() {
            SortSelection::NewestFirst => "SORT_NEWEST",
            SortSelection::OldestFirst => "SORT_OLDEST",
        };
        Some(SortAreaInfo {
            label: self.bundle.widget(key),
        })
    }

    fn compute_admin_bar(&self) -> Option<AdminBarInfo> {
        if !self.chrome.admin_actions {
            return None;
        }
        Some(AdminBarInfo {
            select_all_checked: self.selection.select_all_checked(),
            remove_enabled: self.selection.bulk_delete_enabled(),
            selected_count: self.selection.len(),
            select_all_label: self.bundle.widget("SELECT_ALL"),
            remove_label: self.bundle.widget("REMOVE_SELECTED"),
        })
    }

    fn compute_pager(&self) -> Option<PagerInfo> {
        if self.chrome.empty_panel || !self.query.pager_visible() {
            return None;
        }
        Some(PagerInfo {
            page: self.query.page,
            page_count: self.query.page_count(),
        })
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.chrome.empty_panel {
            return None;
        }
        let message = self.bundle.personalized(
            "NO_ITEMS_IN_YOUR_LIBRARY",
            self.query.is_owner_viewing,
            &self.profile.owner_first_name,
        );
        let subtitle = self
            .chrome
            .add_content
            .then(|| self.bundle.widget("ADD_CONTENT_HINT"));
        Some(EmptyState { message, subtitle })
    }

    fn compute_footer(&self) -> FooterInfo {
        if self.input_mode == InputMode::Filter {
            return FooterInfo {
                keybindings: "Type to filter  Enter: done  ESC: clear filter".to_string(),
            };
        }

        let mut hints: Vec<&str> = Vec::new();
        if !self.items.is_empty() {
            hints.push("j/k: navigate");
        }
        if self.chrome.admin_actions {
            hints.extend(["space: check", "a: check all", "d: remove"]);
        }
        if self.chrome.sort_area {
            hints.push("s: sort");
        }
        if self.query.pager_visible() {
            hints.push("[/]: page");
        }
        hints.push("/: filter");
        if self.chrome.add_content || self.query.is_owner_viewing {
            hints.push("u: add content");
        }
        hints.push("q: quit");

        FooterInfo {
            keybindings: hints.join("  "),
        }
    }

    /// Rows left for the list after header, filter bar, sort/admin line,
    /// column titles, pager and footer.
    const fn calculate_available_rows(&self, total_rows: usize, filter_bar: bool) -> usize {
        let chrome = 8;
        let filter = if filter_bar { 3 } else { 0 };
        total_rows.saturating_sub(chrome + filter)
    }
}

/// Shortens `text` to at most `max` characters, ending in `...` when cut.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SortOrder;
    use crate::library::ListingRequest;

    fn profile(viewer: &str) -> LibraryProfile {
        LibraryProfile {
            owner_id: Some("ada".to_string()),
            owner_first_name: "Ada".to_string(),
            viewer_id: viewer.to_string(),
        }
    }

    fn state_for(viewer: &str) -> AppState {
        AppState::new(profile(viewer), 8, MessageBundle::builtin(), Theme::default())
    }

    fn fetch_request(actions: &[Action]) -> &ListingRequest {
        match actions {
            [Action::FetchLibrary(request)] => request,
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    fn listing(total: usize, owners: &[&str]) -> Vec<u8> {
        let results: Vec<serde_json::Value> = owners
            .iter()
            .enumerate()
            .map(|(i, owner)| {
                serde_json::json!({
                    "jcr:path": format!("item{i}"),
                    "sakai:pooled-content-file-name": format!("report-{i}.pdf"),
                    "sakai:pool-content-created-for": owner,
                    "_mimeType": "application/pdf",
                })
            })
            .collect();
        serde_json::to_vec(&serde_json::json!({ "total": total, "results": results })).unwrap()
    }

    fn load(state: &mut AppState, total: usize, owners: &[&str]) {
        let generation = state.fetcher.current_generation();
        assert!(state.apply_listing(generation, 200, &listing(total, owners), Utc::now()));
    }

    #[test]
    fn missing_owner_skips_fetch() {
        let mut state = AppState::new(LibraryProfile::default(), 8, MessageBundle::builtin(), Theme::default());
        assert!(state.start().is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn owner_with_no_items_sees_add_content() {
        let mut state = state_for("ada");
        state.start();
        load(&mut state, 0, &[]);

        assert!(state.chrome.empty_panel);
        assert!(state.chrome.add_content);
        assert!(!state.chrome.admin_actions);
        assert!(!state.chrome.filter_box);

        let vm = state.compute_viewmodel(24, 100);
        let empty = vm.empty_state.unwrap();
        assert_eq!(empty.message, "There are no items in your library.");
        assert!(empty.subtitle.is_some());
        assert!(vm.admin_bar.is_none());
    }

    #[test]
    fn visitor_with_no_items_gets_no_add_content() {
        let mut state = state_for("bob");
        state.start();
        load(&mut state, 0, &[]);

        assert!(state.chrome.empty_panel);
        assert!(!state.chrome.add_content);

        let vm = state.compute_viewmodel(24, 100);
        assert_eq!(vm.header.title.trim(), "Ada's Library");
        let empty = vm.empty_state.unwrap();
        assert_eq!(empty.message, "There are no items in Ada's library.");
        assert!(empty.subtitle.is_none());
    }

    #[test]
    fn failed_fetch_renders_empty_state() {
        let mut state = state_for("ada");
        state.start();
        let generation = state.fetcher.current_generation();
        assert!(state.apply_listing(generation, 503, b"", Utc::now()));
        assert!(state.chrome.empty_panel);
        assert!(state.items.is_empty());
    }

    #[test]
    fn populated_render_shows_chrome_and_row_flags() {
        let mut state = state_for("ada");
        state.start();
        load(&mut state, 3, &["ada", "bob", "ada"]);

        assert_eq!(
            state.chrome,
            ListChrome {
                filter_box: true,
                sort_area: true,
                title_bar: true,
                admin_actions: true,
                empty_panel: false,
                add_content: false,
            }
        );

        let vm = state.compute_viewmodel(40, 120);
        assert_eq!(vm.display_items.len(), 3);
        assert!(vm.display_items[0].is_owner && vm.display_items[0].is_manager);
        assert!(!vm.display_items[1].is_manager);
        assert_eq!(vm.display_items[0].owner_label, "You");
        assert!(vm.pager.is_none());
    }

    #[test]
    fn visitor_rows_are_managed_but_not_owned() {
        let mut state = state_for("bob");
        state.start();
        load(&mut state, 2, &["bob", "ada"]);

        assert!(!state.chrome.admin_actions);
        let item = &state.items[0];
        assert!(state.is_manager(item));
        assert!(!state.is_owner(item));
        assert!(!state.toggle_current_row());
    }

    #[test]
    fn selecting_rows_toggles_bulk_delete() {
        let mut state = state_for("ada");
        state.start();
        load(&mut state, 5, &["ada"; 5]);

        state.toggle_current_row();
        state.move_selection_down();
        state.toggle_current_row();
        assert_eq!(state.selection.len(), 2);
        assert!(state.selection.bulk_delete_enabled());
        assert!(state.compute_viewmodel(40, 120).admin_bar.unwrap().remove_enabled);

        state.toggle_current_row();
        state.move_selection_up();
        state.toggle_current_row();
        assert!(!state.selection.bulk_delete_enabled());
        assert!(state.delete_selected().is_empty());
    }

    #[test]
    fn select_all_checks_every_row() {
        let mut state = state_for("ada");
        state.start();
        load(&mut state, 4, &["ada"; 4]);

        assert!(state.toggle_select_all());
        assert_eq!(state.selection.len(), 4);
        assert!(state.selection.select_all_checked());

        assert!(state.toggle_select_all());
        assert!(state.selection.is_empty());
    }

    #[test]
    fn reset_clears_selection() {
        let mut state = state_for("ada");
        state.start();
        load(&mut state, 2, &["ada", "ada"]);
        state.toggle_select_all();

        let actions = state.reset();
        fetch_request(&actions);
        assert!(state.items.is_empty());
        assert!(state.selection.is_empty());
        assert!(!state.selection.select_all_checked());
    }

    #[test]
    fn reset_twice_yields_same_rows() {
        let mut state = state_for("ada");
        state.start();
        load(&mut state, 2, &["ada", "bob"]);
        let first: Vec<String> = state.items.iter().map(|i| i.id.clone()).collect();

        state.reset();
        state.reset();
        load(&mut state, 2, &["ada", "bob"]);
        let second: Vec<String> = state.items.iter().map(|i| i.id.clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn sort_change_resets_page_and_sets_order() {
        let mut state = state_for("ada");
        state.start();
        load(&mut state, 20, &["ada"; 8]);
        fetch_request(&state.change_page(2));

        let actions = state.change_sort(SortSelection::from_key("lastModified_asc"));
        let request = fetch_request(&actions);
        assert_eq!(request.page, 0);
        assert_eq!(request.sort_on, "_lastModified");
        assert_eq!(request.sort_order, SortOrder::Asc);

        let actions = state.change_sort(SortSelection::from_key("anything"));
        assert_eq!(fetch_request(&actions).sort_order, SortOrder::Desc);
    }

    #[test]
    fn page_change_keeps_filter_and_sort() {
        let mut state = state_for("ada");
        state.start();
        state.filter_input = "notes".to_string();
        state.apply_filter();
        state.change_sort(SortSelection::OldestFirst);
        load(&mut state, 17, &["ada"; 8]);

        let actions = state.change_page(3);
        let request = fetch_request(&actions);
        assert_eq!(request.page, 2);
        assert_eq!(request.q, "notes");
        assert_eq!(request.sort_order, SortOrder::Asc);

        assert!(state.change_page(4).is_empty());
        assert!(state.change_page(0).is_empty());
    }

    #[test]
    fn pager_shows_only_with_more_than_one_page() {
        let mut state = state_for("ada");
        state.start();
        load(&mut state, 8, &["ada"; 8]);
        assert!(state.compute_viewmodel(40, 120).pager.is_none());

        state.reset();
        load(&mut state, 9, &["ada"; 8]);
        assert_eq!(
            state.compute_viewmodel(40, 120).pager,
            Some(PagerInfo { page: 1, page_count: 2 })
        );
    }

    #[test]
    fn filter_keys_requery_except_shift() {
        let mut state = state_for("ada");
        state.start();
        state.input_mode = InputMode::Filter;

        assert!(state.filter_key(FilterKey::Shift).is_empty());

        let actions = state.filter_key(FilterKey::Char('x'));
        assert_eq!(fetch_request(&actions).q, "x");
        assert!(state.filter_working);

        let actions = state.filter_key(FilterKey::Backspace);
        assert_eq!(fetch_request(&actions).q, "*");
        assert!(!state.filter_working);
    }

    #[test]
    fn populated_render_clears_working_indicator() {
        let mut state = state_for("ada");
        state.start();
        state.filter_key(FilterKey::Char('r'));
        assert!(state.compute_viewmodel(24, 100).header.working);

        load(&mut state, 1, &["ada"]);
        assert!(!state.filter_working);
        let vm = state.compute_viewmodel(24, 100);
        assert!(!vm.header.working);
        assert!(!vm.display_items[0].highlight_ranges.is_empty());
    }

    #[test]
    fn clearing_filter_requeries_wildcard() {
        let mut state = state_for("ada");
        state.start();
        state.input_mode = InputMode::Filter;
        state.filter_key(FilterKey::Char('q'));

        let actions = state.clear_filter();
        assert_eq!(fetch_request(&actions).q, "*");
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.clear_filter().is_empty());
    }

    #[test]
    fn stale_listing_is_ignored() {
        let mut state = state_for("ada");
        state.start();
        let stale = state.fetcher.current_generation();
        state.reset();

        assert!(!state.apply_listing(stale, 200, &listing(1, &["ada"]), Utc::now()));
        assert!(state.items.is_empty());
        load(&mut state, 2, &["ada", "ada"]);
        assert_eq!(state.items.len(), 2);
    }

    #[test]
    fn delete_success_refetches_first_page() {
        let mut state = state_for("ada");
        state.start();
        load(&mut state, 12, &["ada"; 8]);
        state.change_page(2);
        load(&mut state, 12, &["ada"; 4]);
        state.toggle_current_row();

        let actions = state.delete_selected();
        assert_eq!(actions, vec![Action::DeleteContent { paths: vec!["/p/item0".to_string()] }]);

        let actions = state.on_delete_complete(true);
        assert_eq!(fetch_request(&actions).page, 0);
    }

    #[test]
    fn delete_failure_leaves_list_untouched() {
        let mut state = state_for("ada");
        state.start();
        load(&mut state, 3, &["ada"; 3]);
        state.toggle_current_row();

        assert!(state.on_delete_complete(false).is_empty());
        assert_eq!(state.items.len(), 3);
        assert_eq!(state.selection.len(), 1);
    }

    #[test]
    fn external_refresh_returns_to_first_page() {
        let mut state = state_for("ada");
        state.start();
        load(&mut state, 30, &["ada"; 8]);
        state.change_page(3);

        let actions = state.on_external_refresh();
        assert_eq!(fetch_request(&actions).page, 0);
        assert_eq!(state.query.page, 1);
    }

    #[test]
    fn placeholder_shows_when_filter_empty_and_unfocused() {
        let mut state = state_for("bob");
        state.start();
        load(&mut state, 1, &["ada"]);

        let bar = state.compute_viewmodel(24, 100).filter_bar.unwrap();
        assert!(bar.is_placeholder);
        assert_eq!(bar.text, "Search Ada's library");

        state.input_mode = InputMode::Filter;
        let bar = state.compute_viewmodel(24, 100).filter_bar.unwrap();
        assert!(!bar.is_placeholder);
        assert!(bar.text.is_empty());
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(truncate_chars("short.pdf", 20), "short.pdf");
        assert_eq!(truncate_chars("a-very-long-document-name.pdf", 12), "a-very-lo...");
    }
}
