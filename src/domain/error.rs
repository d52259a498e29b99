//! Error types for the library widget.
//!
//! This module defines the centralized error type [`LibraryError`] and a type alias
//! [`Result`] used throughout the crate. Errors are implemented with `thiserror`.
//!
//! Fetch-path errors never escape the [`LibraryFetcher`](crate::library::LibraryFetcher):
//! they are logged and folded into a failed fetch outcome so the widget degrades to its
//! empty state instead of propagating a failure into the host.

use thiserror::Error;

/// The main error type for library widget operations.
///
/// # Examples
///
/// ```
/// use mylibrary::domain::LibraryError;
///
/// fn check_status(status: u16) -> Result<(), LibraryError> {
///     if (200..300).contains(&status) {
///         Ok(())
///     } else {
///         Err(LibraryError::Transport { status })
///     }
/// }
///
/// assert!(check_status(500).is_err());
/// ```
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The listing or deletion endpoint answered with a non-success status.
    #[error("Transport error: endpoint returned HTTP {status}")]
    Transport {
        /// HTTP status code returned by the host.
        status: u16,
    },

    /// The response decoded as JSON but lacks a required field.
    ///
    /// The listing endpoint must always return a `results` array.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The response body is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A message bundle could not be read or parsed.
    #[error("Bundle error: {0}")]
    Bundle(String),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    ///
    /// Raised when the plugin is loaded without an owning user context.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for library widget operations.
pub type Result<T> = std::result::Result<T, LibraryError>;
