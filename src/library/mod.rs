//! Library data pipeline: requests, fetch completion, and item mapping.
//!
//! ```text
//! ListQueryState → LibraryFetcher::begin → ListingRequest → host transport
//!                                                              │
//! FetchOutcome ← mapper::map ← LibraryFetcher::complete ←──────┘
//! ```
//!
//! # Modules
//!
//! - [`request`]: Listing request parameters and URL encoding
//! - [`fetcher`]: Fetch cycle with the request-generation guard
//! - [`mapper`]: Raw record → library item mapping
//! - [`mimetype`]: Mimetype label/icon descriptors
//! - [`deletion`]: Per-path deletion result aggregation

pub mod deletion;
pub mod fetcher;
pub mod mapper;
pub mod mimetype;
pub mod request;

pub use deletion::DeletionBatch;
pub use fetcher::{FetchOutcome, LibraryFetcher};
pub use mapper::{map, MapContext};
pub use mimetype::{MimeTypeDescriptor, MimeTypeRegistry};
pub use request::{ListingRequest, DELETE_OPERATION_BODY, LISTING_ENDPOINT};
