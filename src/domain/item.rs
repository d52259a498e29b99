//! Display-ready library item model.
//!
//! A [`LibraryItem`] is built once per raw record by the
//! [mapper](crate::library::mapper) and never mutated afterwards. Items are
//! serializable so they can be handed to a template context as JSON.

use crate::domain::record::RawResultRecord;
use serde::Serialize;

/// A tag attached to a library item, with the link that searches by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemTag {
    pub name: String,
    pub link: String,
}

/// One row of the library list.
///
/// # Fields
///
/// - `id`: content path identifier (`jcr:path`)
/// - `link`: content profile link for the item
/// - `last_updated`: relative time label ("3 hours ago")
/// - `type_label`/`type_icon_url`: resolved mimetype descriptor
/// - `owner_label`: localized "You" for the viewer's own items, else the raw owner id
/// - `tags`: `None` when the record has no tags, never an empty vector
/// - `num_people_using`/`num_groups_using`: always 0, no usage feed exists yet
/// - `raw_record`: the untouched server record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryItem {
    pub id: String,
    pub filename: String,
    pub link: String,
    pub last_updated: String,
    pub type_label: String,
    pub type_icon_url: String,
    pub owner_id: String,
    pub owner_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<ItemTag>>,
    pub num_people_using: u32,
    pub num_groups_using: u32,
    pub num_comments: usize,
    pub mime_type: Option<String>,
    pub raw_record: RawResultRecord,
}

impl LibraryItem {
    /// Deletion path for this item (`/p/<id>`).
    #[must_use]
    pub fn content_path(&self) -> String {
        format!("/p/{}", self.id)
    }
}
