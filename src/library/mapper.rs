//! Raw record → [`LibraryItem`] mapping.
//!
//! [`map`] is pure: the output depends only on the records and the
//! [`MapContext`] (viewer identity, bundle, mimetype table, reference time).
//! One item is produced per record, in server order.

use crate::domain::item::{ItemTag, LibraryItem};
use crate::domain::record::RawResultRecord;
use crate::domain::timeago::time_ago_millis;
use crate::i18n::MessageBundle;
use crate::library::mimetype::MimeTypeRegistry;
use chrono::{DateTime, Utc};

/// Everything the mapper needs besides the records themselves.
#[derive(Debug, Clone, Copy)]
pub struct MapContext<'a> {
    /// User id of the signed-in viewer.
    pub viewer_id: &'a str,
    pub bundle: &'a MessageBundle,
    pub mimetypes: &'a MimeTypeRegistry,
    /// Reference time for "last updated" labels.
    pub now: DateTime<Utc>,
}

/// Maps server records into display-ready items, preserving order.
#[must_use]
pub fn map(records: &[RawResultRecord], ctx: &MapContext<'_>) -> Vec<LibraryItem> {
    let _span = tracing::debug_span!("map_results", record_count = records.len()).entered();
    records.iter().map(|record| map_record(record, ctx)).collect()
}

fn map_record(record: &RawResultRecord, ctx: &MapContext<'_>) -> LibraryItem {
    let id = record.path().to_string();
    let mime_type = record.mime_type();
    let descriptor = ctx.mimetypes.lookup(mime_type);
    let owner_id = record.owner_id().unwrap_or_default().to_string();

    LibraryItem {
        link: format!("/content#content_path=/p/{id}"),
        filename: record.filename().unwrap_or_default().to_string(),
        last_updated: time_ago_millis(record.last_modified_millis(), ctx.now),
        type_label: ctx.bundle.general(&descriptor.description),
        type_icon_url: descriptor.icon_url.clone(),
        owner_label: owner_label(&owner_id, ctx),
        owner_id,
        tags: format_tags(record.tags()),
        num_people_using: num_people_using(record),
        num_groups_using: num_groups_using(record),
        num_comments: count_comments(record),
        mime_type: mime_type.map(str::to_string),
        raw_record: record.clone(),
        id,
    }
}

/// Turns tag names into tag links. No tags stays `None`.
#[must_use]
pub fn format_tags(tags: Option<Vec<&str>>) -> Option<Vec<ItemTag>> {
    tags.map(|names| {
        names
            .into_iter()
            .map(|name| ItemTag {
                name: name.to_string(),
                link: format!("/search#tag=/tags/{name}"),
            })
            .collect()
    })
}

/// Counts entries of the record's `<path>/comments` map that are comments.
#[must_use]
pub fn count_comments(record: &RawResultRecord) -> usize {
    record
        .comments()
        .map_or(0, |comments| comments.keys().filter(|key| key.contains("/comments/")).count())
}

/// Localized "You" when the viewer owns the item.
///
/// Other owners are shown by raw user id; profile names are not resolved.
fn owner_label(owner_id: &str, ctx: &MapContext<'_>) -> String {
    if owner_id == ctx.viewer_id {
        ctx.bundle.general("YOU")
    } else {
        owner_id.to_string()
    }
}

// Usage counts need a server feed that does not exist yet. The fields are kept
// so templates that read them keep working.
const fn num_people_using(_record: &RawResultRecord) -> u32 {
    0
}

const fn num_groups_using(_record: &RawResultRecord) -> u32 {
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    fn record(value: Value) -> RawResultRecord {
        match value {
            Value::Object(map) => RawResultRecord(map),
            _ => panic!("test record must be an object"),
        }
    }

    fn with_context<R>(viewer: &str, f: impl FnOnce(&MapContext<'_>) -> R) -> R {
        let bundle = MessageBundle::builtin();
        let mimetypes = MimeTypeRegistry::default();
        let ctx = MapContext {
            viewer_id: viewer,
            bundle: &bundle,
            mimetypes: &mimetypes,
            now: Utc.with_ymd_and_hms(2011, 6, 1, 12, 0, 0).unwrap(),
        };
        f(&ctx)
    }

    #[test]
    fn maps_every_field() {
        let modified = Utc.with_ymd_and_hms(2011, 6, 1, 9, 0, 0).unwrap().timestamp_millis();
        let raw = record(json!({
            "jcr:path": "abc123",
            "sakai:pooled-content-file-name": "notes.pdf",
            "_lastModified": modified,
            "_mimeType": "application/pdf",
            "sakai:pool-content-created-for": "ada",
            "sakai:tags": ["math", "engines"],
        }));

        let items = with_context("ada", |ctx| map(std::slice::from_ref(&raw), ctx));
        let item = &items[0];

        assert_eq!(item.id, "abc123");
        assert_eq!(item.filename, "notes.pdf");
        assert_eq!(item.link, "/content#content_path=/p/abc123");
        assert_eq!(item.last_updated, "about 3 hours ago");
        assert_eq!(item.type_label, "PDF document");
        assert_eq!(item.type_icon_url, "/dev/images/mimetypes/pdf.png");
        assert_eq!(item.owner_label, "You");
        assert_eq!(item.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(item.num_people_using, 0);
        assert_eq!(item.num_groups_using, 0);
        assert_eq!(item.raw_record, raw);

        let tags = item.tags.as_ref().unwrap();
        assert_eq!(tags[1], ItemTag { name: "engines".into(), link: "/search#tag=/tags/engines".into() });
    }

    #[test]
    fn absent_tags_stay_absent() {
        let items = with_context("ada", |ctx| map(&[record(json!({ "jcr:path": "x" }))], ctx));
        assert!(items[0].tags.is_none());

        let json = serde_json::to_value(&items[0]).unwrap();
        assert!(json.get("tags").is_none());
    }

    #[test]
    fn other_owners_keep_raw_id() {
        let raw = record(json!({ "jcr:path": "x", "sakai:pool-content-created-for": "charles" }));
        let items = with_context("ada", |ctx| map(&[raw], ctx));
        assert_eq!(items[0].owner_label, "charles");
        assert_eq!(items[0].owner_id, "charles");
    }

    #[test]
    fn custom_mimetype_is_used_when_detected_is_missing() {
        let raw = record(json!({ "jcr:path": "x", "sakai:custom-mimetype": "x-sakai/link" }));
        let items = with_context("ada", |ctx| map(&[raw], ctx));
        assert_eq!(items[0].type_label, "Link");
        assert_eq!(items[0].mime_type.as_deref(), Some("x-sakai/link"));
    }

    #[test]
    fn counts_only_comment_entries() {
        let raw = record(json!({
            "jcr:path": "doc1",
            "doc1/comments": {
                "doc1/comments/c1": {},
                "doc1/comments/c2": {},
                "doc1/comments/c3": {},
                "sling:resourceType": "sakai/comments",
            }
        }));
        assert_eq!(count_comments(&raw), 3);
        assert_eq!(count_comments(&record(json!({ "jcr:path": "doc1" }))), 0);
    }

    #[test]
    fn preserves_server_order() {
        let records: Vec<_> = ["c", "a", "b"]
            .iter()
            .map(|p| record(json!({ "jcr:path": p })))
            .collect();
        let items = with_context("ada", |ctx| map(&records, ctx));
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
