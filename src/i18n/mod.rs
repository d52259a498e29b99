//! Localized message lookup.
//!
//! Messages come from a TOML bundle with two tables: `[general]` for
//! portal-wide keys (`YOU`, `YOUR`, mimetype descriptions) and `[widget]` for
//! keys owned by the library widget. A built-in English bundle is always
//! loaded; a user-supplied bundle file overrides individual keys.
//!
//! # TOML Format
//!
//! ```toml
//! [general]
//! YOU = "Vous"
//!
//! [widget]
//! NO_ITEMS_IN_YOUR_LIBRARY = "Aucun élément dans la bibliothèque de ${firstname}."
//! ```

use crate::domain::error::{LibraryError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Placeholder replaced by [`MessageBundle::personalized`].
const FIRSTNAME_PLACEHOLDER: &str = "${firstname}";

/// General and widget message tables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageBundle {
    #[serde(default)]
    general: HashMap<String, String>,
    #[serde(default)]
    widget: HashMap<String, String>,
}

impl MessageBundle {
    /// Parses a bundle from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Bundle`] if the text is not a valid bundle.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| LibraryError::Bundle(format!("Failed to parse bundle TOML: {e}")))
    }

    /// The built-in English bundle.
    ///
    /// # Panics
    ///
    /// Panics if the embedded bundle fails to parse (should never occur).
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_toml_str(include_str!("../../i18n/default.toml"))
            .expect("Built-in message bundle should always parse")
    }

    /// Loads the built-in bundle and overlays the keys from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let overrides = Self::from_toml_str(&contents)?;
        let mut bundle = Self::builtin();
        bundle.general.extend(overrides.general);
        bundle.widget.extend(overrides.widget);
        Ok(bundle)
    }

    /// Looks up a portal-wide key, falling back to the key itself.
    #[must_use]
    pub fn general(&self, key: &str) -> String {
        self.general.get(key).cloned().unwrap_or_else(|| key.to_string())
    }

    /// Looks up a widget key, falling back to the key itself.
    #[must_use]
    pub fn widget(&self, key: &str) -> String {
        self.widget.get(key).cloned().unwrap_or_else(|| key.to_string())
    }

    /// Resolves a widget key and fills in its `${firstname}` placeholder.
    ///
    /// The owning viewer reads "your"; anyone else reads the owner's first
    /// name in possessive form.
    ///
    /// ```
    /// use mylibrary::i18n::MessageBundle;
    ///
    /// let bundle = MessageBundle::builtin();
    /// assert_eq!(bundle.personalized("SEARCH_YOUR_LIBRARY", true, "Ada"), "Search your library");
    /// assert_eq!(bundle.personalized("SEARCH_YOUR_LIBRARY", false, "Ada"), "Search Ada's library");
    /// ```
    #[must_use]
    pub fn personalized(&self, key: &str, is_owner_viewing: bool, owner_first_name: &str) -> String {
        let replacement = if is_owner_viewing {
            self.general("YOUR").to_lowercase()
        } else {
            format!("{owner_first_name}'s")
        };
        replace_ignore_ascii_case(&self.widget(key), FIRSTNAME_PLACEHOLDER, &replacement)
    }
}

/// Replaces every occurrence of an ASCII `pattern`, ignoring case.
fn replace_ignore_ascii_case(text: &str, pattern: &str, replacement: &str) -> String {
    let haystack = text.to_ascii_lowercase();
    let needle = pattern.to_ascii_lowercase();

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (start, _) in haystack.match_indices(&needle) {
        out.push_str(&text[last..start]);
        out.push_str(replacement);
        last = start + needle.len();
    }
    out.push_str(&text[last..]);
    out
}
