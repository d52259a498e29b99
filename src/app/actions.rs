//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! plugin shim executes them against the host: web requests for listing and
//! deletion, pipe messages to sibling plugins, and pane control.
//!
//! # Example
//!
//! ```rust
//! use mylibrary::app::Action;
//!
//! let actions = vec![Action::DeleteContent { paths: vec!["/p/abc".to_string()] }];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::library::ListingRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends a listing request. The response must be reported back as
    /// [`Event::ListingReceived`](crate::app::Event::ListingReceived) carrying
    /// the request's generation.
    FetchLibrary(ListingRequest),

    /// Deletes the given content paths (`/p/<id>`).
    ///
    /// The runtime reports one aggregated
    /// [`Event::DeleteCompleted`](crate::app::Event::DeleteCompleted).
    DeleteContent {
        /// Content paths to delete.
        paths: Vec<String>,
    },

    /// Asks the add-content widget to open.
    OpenAddContent,
}
