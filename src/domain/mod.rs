//! Domain layer for the library widget.
//!
//! Core types of the widget, independent of Zellij APIs and rendering:
//!
//! - [`error`]: Error types and result aliases
//! - [`record`]: Raw listing-endpoint records and responses
//! - [`item`]: Display-ready library items
//! - [`query`]: Paging, sort and filter state
//! - [`selection`]: Checkbox selection bookkeeping
//! - [`timeago`]: Relative time labels
//!
//! # Examples
//!
//! ```
//! use mylibrary::domain::{ListQueryState, Result};
//!
//! fn first_page() -> Result<ListQueryState> {
//!     Ok(ListQueryState::new(8, true))
//! }
//! ```

pub mod error;
pub mod item;
pub mod query;
pub mod record;
pub mod selection;
pub mod timeago;

pub use error::{LibraryError, Result};
pub use item::{ItemTag, LibraryItem};
pub use query::{ListQueryState, SortOrder, SortSelection};
pub use record::{ListingResponse, RawResultRecord};
pub use selection::SelectionState;
