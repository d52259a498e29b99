//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (`main.rs`) and the domain/library layers.
//!
//! ```text
//! Key / pipe / web result → Event → handle_event → AppState controllers → Actions
//!                                                                           ↓
//!        ListingReceived / DeleteCompleted ←──── host web requests ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transition coordinator
//! - [`modes`]: Input mode and filter key types
//! - [`state`]: Widget state, list state and render/selection controllers

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{FilterKey, InputMode};
pub use state::{AppState, LibraryProfile, ListChrome};
