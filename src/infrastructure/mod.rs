//! Infrastructure layer for sandbox paths and endpoint URLs.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, join_url};
