//! Event handling and state transitions.
//!
//! The plugin shim translates host events (keys, web request results, pipe
//! messages) into [`Event`]s and hands them to [`handle_event`], which calls
//! the controllers on [`AppState`] and returns whether to re-render plus the
//! [`Action`]s to execute.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`
//! - **Selection**: `ToggleRow`, `ToggleSelectAll`, `RemoveSelected`
//! - **Query**: `ChangeSort`, `CycleSort`, `ChangePage`, `NextPage`, `PrevPage`
//! - **Filter**: `FilterMode`, `FilterKey`, `ExitFilter`, `ClearFilter`
//! - **Transport**: `ListingReceived`, `DeleteCompleted`, `UploadCompleted`
//!
//! # Example
//!
//! ```rust
//! use mylibrary::app::{handle_event, AppState, Event, LibraryProfile};
//! use mylibrary::i18n::MessageBundle;
//! use mylibrary::ui::theme::Theme;
//!
//! let mut state = AppState::new(LibraryProfile::default(), 8, MessageBundle::builtin(), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), mylibrary::domain::LibraryError>(())
//! ```

use super::modes::{FilterKey, InputMode};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::SortSelection;
use chrono::Utc;

/// Events triggered by user input or host callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Issues the first listing fetch.
    Start,
    /// Moves the cursor down one row (wraps to top).
    KeyDown,
    /// Moves the cursor up one row (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,

    /// Flips the checkbox of the row under the cursor.
    ToggleRow,
    /// Flips the select-all control.
    ToggleSelectAll,
    /// Removes every checked row.
    RemoveSelected,

    /// Selects a sort option by key (`lastModified_asc`, `lastModified_desc`).
    ChangeSort(String),
    /// Switches to the other sort option.
    CycleSort,
    /// Jumps to a 1-indexed page.
    ChangePage(usize),
    NextPage,
    PrevPage,

    /// Focuses the filter box.
    FilterMode,
    /// Edits the filter text.
    FilterKey(FilterKey),
    /// Leaves the filter box keeping the filter.
    ExitFilter,
    /// Leaves the filter box dropping the filter.
    ClearFilter,

    /// Opens the add-content widget.
    AddContent,

    /// A listing response arrived.
    ListingReceived {
        /// Generation of the request that produced it.
        generation: u64,
        /// HTTP status, 0 when the transport itself failed.
        status: u16,
        body: Vec<u8>,
    },

    /// All deletions of one removal have answered.
    DeleteCompleted {
        /// Every path was deleted.
        success: bool,
    },

    /// A sibling upload widget finished an upload.
    UploadCompleted,
}

/// Processes an event, mutates state, and returns `(should_render, actions)`.
///
/// # Errors
///
/// Currently every event is handled without error; the `Result` keeps the
/// signature stable for handlers that touch the host.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Start => {
            let actions = state.start();
            Ok((true, actions))
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::ToggleRow => Ok((state.toggle_current_row(), vec![])),
        Event::ToggleSelectAll => Ok((state.toggle_select_all(), vec![])),
        Event::RemoveSelected => Ok((false, state.delete_selected())),
        Event::ChangeSort(key) => {
            let actions = state.change_sort(SortSelection::from_key(key));
            Ok((true, actions))
        }
        Event::CycleSort => {
            let next = state.query.sort_selection().toggled();
            Ok((true, state.change_sort(next)))
        }
        Event::ChangePage(page) => {
            let actions = state.change_page(*page);
            Ok((!actions.is_empty(), actions))
        }
        Event::NextPage => {
            let actions = state.next_page();
            Ok((!actions.is_empty(), actions))
        }
        Event::PrevPage => {
            let actions = state.prev_page();
            Ok((!actions.is_empty(), actions))
        }
        Event::FilterMode => {
            tracing::debug!("entering filter mode");
            state.input_mode = InputMode::Filter;
            Ok((true, vec![]))
        }
        Event::FilterKey(key) => {
            if state.input_mode != InputMode::Filter {
                return Ok((false, vec![]));
            }
            let actions = state.filter_key(*key);
            Ok((!actions.is_empty(), actions))
        }
        Event::ExitFilter => {
            tracing::debug!(filter = ?state.query.filter_text, "leaving filter mode");
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::ClearFilter => {
            let actions = state.clear_filter();
            Ok((true, actions))
        }
        Event::AddContent => {
            if !state.query.is_owner_viewing {
                return Ok((false, vec![]));
            }
            Ok((false, vec![Action::OpenAddContent]))
        }
        Event::ListingReceived { generation, status, body } => {
            Ok((state.apply_listing(*generation, *status, body, Utc::now()), vec![]))
        }
        Event::DeleteCompleted { success } => {
            let actions = state.on_delete_complete(*success);
            Ok((!actions.is_empty(), actions))
        }
        Event::UploadCompleted => {
            tracing::debug!("upload completed, refreshing library");
            let actions = state.on_external_refresh();
            Ok((true, actions))
        }
    }
}

/// Short event label for spans, leaving response bodies out of the trace.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Start => "start",
        Event::KeyDown => "key_down",
        Event::KeyUp => "key_up",
        Event::CloseFocus => "close_focus",
        Event::ToggleRow => "toggle_row",
        Event::ToggleSelectAll => "toggle_select_all",
        Event::RemoveSelected => "remove_selected",
        Event::ChangeSort(_) => "change_sort",
        Event::CycleSort => "cycle_sort",
        Event::ChangePage(_) => "change_page",
        Event::NextPage => "next_page",
        Event::PrevPage => "prev_page",
        Event::FilterMode => "filter_mode",
        Event::FilterKey(_) => "filter_key",
        Event::ExitFilter => "exit_filter",
        Event::ClearFilter => "clear_filter",
        Event::AddContent => "add_content",
        Event::ListingReceived { .. } => "listing_received",
        Event::DeleteCompleted { .. } => "delete_completed",
        Event::UploadCompleted => "upload_completed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::LibraryProfile;
    use crate::i18n::MessageBundle;
    use crate::ui::theme::Theme;

    fn owner_state() -> AppState {
        let profile = LibraryProfile {
            owner_id: Some("ada".to_string()),
            owner_first_name: "Ada".to_string(),
            viewer_id: "ada".to_string(),
        };
        AppState::new(profile, 8, MessageBundle::builtin(), Theme::default())
    }

    fn receive(state: &mut AppState, body: &str) -> bool {
        let event = Event::ListingReceived {
            generation: state.fetcher.current_generation(),
            status: 200,
            body: body.as_bytes().to_vec(),
        };
        handle_event(state, &event).unwrap().0
    }

    #[test]
    fn start_fetches_first_page() {
        let mut state = owner_state();
        let (_, actions) = handle_event(&mut state, &Event::Start).unwrap();
        match actions.as_slice() {
            [Action::FetchLibrary(request)] => {
                assert_eq!(request.user_id, "ada");
                assert_eq!(request.page, 0);
                assert_eq!(request.q, "*");
            }
            other => panic!("unexpected actions {other:?}"),
        }
    }

    #[test]
    fn filter_keys_need_filter_mode() {
        let mut state = owner_state();
        handle_event(&mut state, &Event::Start).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::FilterKey(FilterKey::Char('a'))).unwrap();
        assert!(!render);
        assert!(actions.is_empty());

        handle_event(&mut state, &Event::FilterMode).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::FilterKey(FilterKey::Char('a'))).unwrap();
        assert_eq!(actions.len(), 1);

        let (render, actions) = handle_event(&mut state, &Event::FilterKey(FilterKey::Shift)).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn exit_filter_keeps_query() {
        let mut state = owner_state();
        handle_event(&mut state, &Event::Start).unwrap();
        handle_event(&mut state, &Event::FilterMode).unwrap();
        handle_event(&mut state, &Event::FilterKey(FilterKey::Char('z'))).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::ExitFilter).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.query.filter_text.as_deref(), Some("z"));
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn cycle_sort_alternates_order() {
        let mut state = owner_state();
        handle_event(&mut state, &Event::CycleSort).unwrap();
        assert_eq!(state.query.sort_selection(), SortSelection::OldestFirst);
        handle_event(&mut state, &Event::CycleSort).unwrap();
        assert_eq!(state.query.sort_selection(), SortSelection::NewestFirst);
    }

    #[test]
    fn upload_completion_refreshes() {
        let mut state = owner_state();
        handle_event(&mut state, &Event::Start).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::UploadCompleted).unwrap();
        assert!(matches!(actions.as_slice(), [Action::FetchLibrary(_)]));
    }

    #[test]
    fn add_content_only_for_owner() {
        let mut state = owner_state();
        let (_, actions) = handle_event(&mut state, &Event::AddContent).unwrap();
        assert_eq!(actions, vec![Action::OpenAddContent]);

        state.query.is_owner_viewing = false;
        let (_, actions) = handle_event(&mut state, &Event::AddContent).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn listing_then_remove_flow() {
        let mut state = owner_state();
        handle_event(&mut state, &Event::Start).unwrap();
        let body = r#"{"total": 2, "results": [
            {"jcr:path": "a1", "sakai:pool-content-created-for": "ada"},
            {"jcr:path": "b2", "sakai:pool-content-created-for": "ada"}
        ]}"#;
        assert!(receive(&mut state, body));

        handle_event(&mut state, &Event::ToggleSelectAll).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::RemoveSelected).unwrap();
        assert_eq!(
            actions,
            vec![Action::DeleteContent { paths: vec!["/p/a1".to_string(), "/p/b2".to_string()] }]
        );

        let (render, actions) = handle_event(&mut state, &Event::DeleteCompleted { success: false }).unwrap();
        assert!(!render);
        assert!(actions.is_empty());

        let (_, actions) = handle_event(&mut state, &Event::DeleteCompleted { success: true }).unwrap();
        assert!(matches!(actions.as_slice(), [Action::FetchLibrary(_)]));
    }

    #[test]
    fn page_keys_respect_bounds() {
        let mut state = owner_state();
        handle_event(&mut state, &Event::Start).unwrap();
        let results: Vec<String> = (0..8).map(|i| format!(r#"{{"jcr:path": "i{i}"}}"#)).collect();
        let body = format!(r#"{{"total": 20, "results": [{}]}}"#, results.join(","));
        receive(&mut state, &body);

        let (_, actions) = handle_event(&mut state, &Event::PrevPage).unwrap();
        assert!(actions.is_empty());

        let (render, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(render);
        assert_eq!(state.query.page, 2);
        assert_eq!(actions.len(), 1);

        let (_, actions) = handle_event(&mut state, &Event::ChangePage(3)).unwrap();
        assert_eq!(actions.len(), 1);
        let (_, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(actions.is_empty());
    }
}
