//! Top-level rendering entry point.
//!
//! Rendering is two steps: [`AppState::compute_viewmodel`] turns state into a
//! [`UIViewModel`], then the components draw it into a frame that is printed
//! to the plugin pane in one write.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the widget to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    print!("{}", render_to_string(&viewmodel, &state.theme, rows, cols));
}

/// Draws a view model into an ANSI frame without printing it.
#[must_use]
pub fn render_to_string(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let _span = tracing::trace_span!("render_frame", rows, cols, items = vm.display_items.len()).entered();
    let mut frame = String::with_capacity(rows * cols * 4);
    components::render_frame(&mut frame, vm, theme, cols, rows);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppState, LibraryProfile};
    use crate::i18n::MessageBundle;
    use chrono::Utc;

    fn state(viewer: &str) -> AppState {
        let profile = LibraryProfile {
            owner_id: Some("ada".to_string()),
            owner_first_name: "Ada".to_string(),
            viewer_id: viewer.to_string(),
        };
        AppState::new(profile, 8, MessageBundle::builtin(), Theme::default())
    }

    fn load(state: &mut AppState, body: &str) {
        state.start();
        let generation = state.fetcher.current_generation();
        state.apply_listing(generation, 200, body.as_bytes(), Utc::now());
    }

    #[test]
    fn owner_empty_frame_offers_add_content() {
        let mut state = state("ada");
        load(&mut state, r#"{"total": 0, "results": []}"#);

        let frame = render_to_string(&state.compute_viewmodel(24, 100), &state.theme, 24, 100);
        assert!(frame.contains("There are no items in your library."));
        assert!(frame.contains("Press 'u' to add content"));
        assert!(!frame.contains("NAME"));
    }

    #[test]
    fn populated_frame_lists_rows_and_pager() {
        let mut state = state("ada");
        let body = r#"{"total": 9, "results": [
            {"jcr:path": "x1", "sakai:pooled-content-file-name": "budget.xlsx", "sakai:pool-content-created-for": "ada"}
        ]}"#;
        load(&mut state, body);

        let frame = render_to_string(&state.compute_viewmodel(30, 120), &state.theme, 30, 120);
        assert!(frame.contains("My Library"));
        assert!(frame.contains("budget.xlsx"));
        assert!(frame.contains("[ ] "));
        assert!(frame.contains("‹ [1] 2 ›"));
    }

    #[test]
    fn visitor_frame_has_no_checkboxes() {
        let mut state = state("bob");
        let body = r#"{"total": 1, "results": [
            {"jcr:path": "x1", "sakai:pooled-content-file-name": "slides.ppt", "sakai:pool-content-created-for": "ada"}
        ]}"#;
        load(&mut state, body);

        let frame = render_to_string(&state.compute_viewmodel(30, 120), &state.theme, 30, 120);
        assert!(frame.contains("Ada's Library"));
        assert!(!frame.contains("[ ]"));
        assert!(!frame.contains("Select all"));
    }
}
