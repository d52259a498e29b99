//! My Library: a Zellij plugin that lists a user's content library.
//!
//! The widget is a view over a remote pool search endpoint. It provides:
//! - Paging, newest/oldest sorting and a live filter that re-queries per keystroke
//! - Checkbox selection with bulk removal for the library's owner
//! - A personalized empty state with an add-content affordance
//! - Refresh when a sibling upload widget reports a finished upload
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, pipes, web requests
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - List state controller                            │
//! │  - Render/selection controller                      │
//! │  - Event → Action dispatch                          │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI (ui/)      │   │ Library       │   │ i18n (i18n/)  │
//! │ - View model  │   │ (library/)    │   │ - Bundles     │
//! │ - Components  │   │ - Fetcher     │   │ - ${firstname}│
//! │ - Theming     │   │ - Mapper      │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Records, items, query and selection state        │
//! │  - Error types, sandbox paths, URL joining          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/mylibrary.wasm" {
//!         base_url "http://localhost:8080"
//!         home_path "~ada"
//!         viewer "ada"
//!         owner_first_name "Ada"
//!         items_per_page "8"
//!         theme "catppuccin-mocha"
//!         bundle_file "~/.config/mylibrary/fr.toml"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use mylibrary::{handle_event, initialize, Action, Config, Event};
//! use std::collections::BTreeMap;
//!
//! let mut options = BTreeMap::new();
//! options.insert("home_path".to_string(), "~ada".to_string());
//! options.insert("viewer".to_string(), "ada".to_string());
//!
//! let mut state = initialize(&Config::from_zellij(&options));
//! let (_, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(matches!(actions.as_slice(), [Action::FetchLibrary(_)]));
//! # Ok::<(), mylibrary::LibraryError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod i18n;
pub mod infrastructure;
pub mod library;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, LibraryProfile};
pub use domain::{LibraryError, Result};
pub use ui::Theme;

use crate::domain::query::DEFAULT_ITEMS_PER_PAGE;
use crate::i18n::MessageBundle;
use crate::infrastructure::expand_tilde;
use std::collections::BTreeMap;

/// Server the listing and content endpoints live on unless configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Plugin configuration parsed from the Zellij layout.
#[derive(Debug, Clone)]
pub struct Config {
    /// Portal base URL.
    pub base_url: String,

    /// Owner of the library, taken from the `~<userid>` home path.
    pub owner_id: Option<String>,

    /// Signed-in user.
    pub viewer_id: String,

    /// Owner's first name for personalized strings. Defaults to the owner id.
    pub owner_first_name: String,

    pub items_per_page: usize,

    /// Built-in theme name.
    pub theme_name: Option<String>,

    /// Custom theme TOML, takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// Message bundle TOML overlaid on the built-in English strings.
    pub bundle_file: Option<String>,

    /// `EnvFilter` directive for tracing.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            owner_id: None,
            viewer_id: String::new(),
            owner_first_name: String::new(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            theme_name: None,
            theme_file: None,
            bundle_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the plugin's configuration map.
    ///
    /// Missing or unparsable values fall back to their defaults; a missing
    /// home path leaves the owner unset, which disables fetching.
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let owner_id = config.get("home_path").map(String::as_str).and_then(owner_from_home_path);

        let owner_first_name = non_empty("owner_first_name")
            .or_else(|| owner_id.clone())
            .unwrap_or_default();

        let items_per_page = config
            .get("items_per_page")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_ITEMS_PER_PAGE);

        Self {
            base_url: non_empty("base_url").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            owner_id,
            viewer_id: non_empty("viewer").unwrap_or_default(),
            owner_first_name,
            items_per_page,
            theme_name: non_empty("theme"),
            theme_file: non_empty("theme_file"),
            bundle_file: non_empty("bundle_file"),
            trace_level: non_empty("trace_level"),
        }
    }

    #[must_use]
    pub fn profile(&self) -> LibraryProfile {
        LibraryProfile {
            owner_id: self.owner_id.clone(),
            owner_first_name: self.owner_first_name.clone(),
            viewer_id: self.viewer_id.clone(),
        }
    }
}

/// User id from a profile home path such as `~ada`.
///
/// ```rust
/// use mylibrary::owner_from_home_path;
///
/// assert_eq!(owner_from_home_path("~ada").as_deref(), Some("ada"));
/// assert_eq!(owner_from_home_path("/~ada").as_deref(), Some("ada"));
/// assert_eq!(owner_from_home_path("~"), None);
/// assert_eq!(owner_from_home_path("ada"), None);
/// ```
#[must_use]
pub fn owner_from_home_path(home_path: &str) -> Option<String> {
    let (_, user) = home_path.trim().split_once('~')?;
    let user = user.trim_end_matches('/');
    (!user.is_empty()).then(|| user.to_string())
}

/// Builds the widget state: theme, message bundle and identities.
///
/// Theme and bundle files that fail to load are logged and replaced by the
/// built-in defaults.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(base_url = %config.base_url, "initializing library widget");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file, using default");
                Theme::default()
            })
        },
    );

    let bundle = config.bundle_file.as_ref().map_or_else(MessageBundle::builtin, |bundle_file| {
        MessageBundle::from_file(expand_tilde(bundle_file)).unwrap_or_else(|e| {
            tracing::warn!(bundle_file = %bundle_file, error = %e, "failed to load message bundle, using built-in");
            MessageBundle::builtin()
        })
    });

    AppState::new(config.profile(), config.items_per_page, bundle, theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn options(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn defaults_when_unconfigured() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.owner_id, None);
        assert_eq!(config.items_per_page, 8);
        assert!(!config.profile().is_owner_viewing());
    }

    #[test]
    fn parses_identities_and_paging() {
        let config = Config::from_zellij(&options(&[
            ("base_url", "https://oae.example.org/"),
            ("home_path", "~ada"),
            ("viewer", "bob"),
            ("owner_first_name", "Ada"),
            ("items_per_page", "12"),
        ]));

        assert_eq!(config.base_url, "https://oae.example.org/");
        assert_eq!(config.owner_id.as_deref(), Some("ada"));
        assert_eq!(config.viewer_id, "bob");
        assert_eq!(config.owner_first_name, "Ada");
        assert_eq!(config.items_per_page, 12);
    }

    #[test]
    fn bad_page_size_falls_back() {
        for value in ["0", "-3", "many"] {
            let config = Config::from_zellij(&options(&[("items_per_page", value)]));
            assert_eq!(config.items_per_page, 8, "value {value}");
        }
    }

    #[test]
    fn first_name_defaults_to_owner_id() {
        let config = Config::from_zellij(&options(&[("home_path", "~grace")]));
        assert_eq!(config.owner_first_name, "grace");
    }

    #[test]
    fn initialize_owner_viewing() {
        let config = Config::from_zellij(&options(&[("home_path", "~ada"), ("viewer", "ada")]));
        let state = initialize(&config);
        assert!(state.query.is_owner_viewing);
        assert_eq!(state.query.items_per_page, 8);
    }

    #[test]
    fn initialize_falls_back_on_broken_files() {
        let config = Config {
            theme_file: Some("/no/such/theme.toml".to_string()),
            bundle_file: Some("/no/such/bundle.toml".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-mocha");
        assert_eq!(state.bundle.widget("MY_LIBRARY"), "My Library");
    }

    #[test]
    fn initialize_loads_bundle_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[widget]\nMY_LIBRARY = \"Ma bibliotheque\"\n").unwrap();

        let config = Config {
            bundle_file: Some(file.path().to_string_lossy().into_owned()),
            theme_name: Some("catppuccin-frappe".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.bundle.widget("MY_LIBRARY"), "Ma bibliotheque");
        assert_eq!(state.bundle.widget("SELECT_ALL"), "Select all");
        assert_eq!(state.theme.name, "catppuccin-frappe");
    }
}
