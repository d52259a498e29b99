//! Path and URL helpers for the Zellij sandbox.
//!
//! In the plugin sandbox the host filesystem is mounted under `/host`, so
//! user-supplied file paths (theme, bundle) need tilde expansion before they
//! can be opened, and trace output goes below the sandbox data directory.

use std::path::PathBuf;

/// Returns the data directory for the widget's trace output.
///
/// Resolves to `~/.local/share/zellij/mylibrary` on the host when Zellij was
/// started from the home directory.
///
/// # Examples
///
/// ```
/// use mylibrary::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/mylibrary"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("mylibrary")
}

/// Maps `~` paths onto the sandbox `/host` mount.
///
/// # Examples
///
/// ```
/// use mylibrary::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/bundles/fr.toml"), "/host/bundles/fr.toml");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Joins a base URL and an absolute endpoint path with exactly one slash.
///
/// # Examples
///
/// ```
/// use mylibrary::infrastructure::join_url;
///
/// assert_eq!(join_url("http://oae.local/", "/p/abc"), "http://oae.local/p/abc");
/// assert_eq!(join_url("http://oae.local", "p/abc"), "http://oae.local/p/abc");
/// ```
#[must_use]
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
