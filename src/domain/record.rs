//! Raw listing-endpoint records.
//!
//! The pool search endpoint returns loosely-typed JSON objects whose keys are
//! repository property names (`jcr:path`, `sakai:tags`, ...). [`RawResultRecord`]
//! keeps the object intact and exposes typed accessors for the properties the
//! mapper needs, so unknown properties survive into the item's raw record.

use crate::domain::error::{LibraryError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property holding the content path identifier.
pub const PATH_KEY: &str = "jcr:path";
/// Property holding the original file name.
pub const FILENAME_KEY: &str = "sakai:pooled-content-file-name";
/// Property holding the last-modified timestamp in epoch milliseconds.
pub const LAST_MODIFIED_KEY: &str = "_lastModified";
/// Property holding the detected mimetype.
pub const MIMETYPE_KEY: &str = "_mimeType";
/// Property holding an explicitly assigned mimetype (links, documents).
pub const CUSTOM_MIMETYPE_KEY: &str = "sakai:custom-mimetype";
/// Property holding the user the content was created for.
pub const OWNER_KEY: &str = "sakai:pool-content-created-for";
/// Property holding the tag names.
pub const TAGS_KEY: &str = "sakai:tags";

/// One result object returned by the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawResultRecord(pub Map<String, Value>);

impl RawResultRecord {
    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Content path identifier, empty if the record has none.
    #[must_use]
    pub fn path(&self) -> &str {
        self.str_field(PATH_KEY).unwrap_or_default()
    }

    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.str_field(FILENAME_KEY)
    }

    /// Last-modified time in epoch milliseconds.
    ///
    /// Accepts both numeric and numeric-string encodings.
    #[must_use]
    pub fn last_modified_millis(&self) -> Option<i64> {
        match self.0.get(LAST_MODIFIED_KEY)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Resolved mimetype: the detected type wins, the custom type is the fallback.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.str_field(MIMETYPE_KEY)
            .filter(|m| !m.is_empty())
            .or_else(|| self.str_field(CUSTOM_MIMETYPE_KEY).filter(|m| !m.is_empty()))
    }

    #[must_use]
    pub fn owner_id(&self) -> Option<&str> {
        self.str_field(OWNER_KEY)
    }

    /// Tag names, `None` when the record carries no tags at all.
    ///
    /// A single string value is treated as a one-element list, and an empty
    /// list is reported as `None`.
    #[must_use]
    pub fn tags(&self) -> Option<Vec<&str>> {
        let tags: Vec<&str> = match self.0.get(TAGS_KEY)? {
            Value::Array(values) => values.iter().filter_map(Value::as_str).collect(),
            Value::String(s) => vec![s.as_str()],
            _ => return None,
        };
        if tags.is_empty() {
            None
        } else {
            Some(tags)
        }
    }

    /// The comment sub-map stored under `<path>/comments`, if present.
    #[must_use]
    pub fn comments(&self) -> Option<&Map<String, Value>> {
        let key = format!("{}/comments", self.path());
        self.0.get(&key).and_then(Value::as_object)
    }
}

/// Decoded body of a listing-endpoint response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingResponse {
    /// Total number of items matching the query across all pages.
    pub total: usize,
    /// Records of the requested page, in server sort order.
    pub results: Vec<RawResultRecord>,
}

impl ListingResponse {
    /// Decodes a response body.
    ///
    /// A missing `total` falls back to the number of returned results.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Json`] for undecodable bodies and
    /// [`LibraryError::MalformedResponse`] when `results` is missing or not an
    /// array of objects.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        let object = value
            .as_object()
            .ok_or_else(|| LibraryError::MalformedResponse("response is not an object".to_string()))?;

        let results = object
            .get("results")
            .and_then(Value::as_array)
            .ok_or_else(|| LibraryError::MalformedResponse("missing results field".to_string()))?
            .iter()
            .map(|result| {
                result
                    .as_object()
                    .cloned()
                    .map(RawResultRecord)
                    .ok_or_else(|| LibraryError::MalformedResponse("result is not an object".to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let total = match object.get("total") {
            Some(Value::Number(n)) => n.as_u64().map_or(results.len(), |t| t as usize),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(results.len()),
            _ => results.len(),
        };

        Ok(Self { total, results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawResultRecord {
        match value {
            Value::Object(map) => RawResultRecord(map),
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn detected_mimetype_takes_precedence() {
        let r = record(json!({ "_mimeType": "application/pdf", "sakai:custom-mimetype": "x-sakai/link" }));
        assert_eq!(r.mime_type(), Some("application/pdf"));

        let r = record(json!({ "sakai:custom-mimetype": "x-sakai/link" }));
        assert_eq!(r.mime_type(), Some("x-sakai/link"));

        assert_eq!(record(json!({})).mime_type(), None);
    }

    #[test]
    fn tags_absent_or_empty_are_none() {
        assert!(record(json!({})).tags().is_none());
        assert!(record(json!({ "sakai:tags": [] })).tags().is_none());
        assert_eq!(record(json!({ "sakai:tags": "solo" })).tags(), Some(vec!["solo"]));
    }

    #[test]
    fn last_modified_accepts_strings() {
        let r = record(json!({ "_lastModified": "1300000000000" }));
        assert_eq!(r.last_modified_millis(), Some(1_300_000_000_000));
    }

    #[test]
    fn response_requires_results() {
        let err = ListingResponse::from_slice(br#"{"total": 3}"#).unwrap_err();
        assert!(matches!(err, LibraryError::MalformedResponse(_)));

        let err = ListingResponse::from_slice(b"not json").unwrap_err();
        assert!(matches!(err, LibraryError::Json(_)));
    }

    #[test]
    fn response_total_defaults_to_result_count() {
        let response = ListingResponse::from_slice(br#"{"results": [{"jcr:path": "a"}, {"jcr:path": "b"}]}"#).unwrap();
        assert_eq!(response.total, 2);
        assert_eq!(response.results[1].path(), "b");
    }
}
