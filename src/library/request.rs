//! Listing and deletion request shapes.
//!
//! A [`ListingRequest`] carries the endpoint parameters for one page fetch plus
//! the generation that identifies it. The host transport turns it into a GET
//! against [`LISTING_ENDPOINT`].

use crate::domain::query::{ListQueryState, SortOrder};

/// Pool search endpoint listing the content a user manages or views.
pub const LISTING_ENDPOINT: &str = "/var/search/pool/manager-viewer.json";

/// Form body that asks the content endpoint to delete the addressed node.
pub const DELETE_OPERATION_BODY: &str = ":operation=delete";

/// Parameters of one listing fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    /// Owner of the library being listed.
    pub user_id: String,
    /// Zero-indexed page.
    pub page: usize,
    /// Page size.
    pub items: usize,
    pub sort_on: String,
    pub sort_order: SortOrder,
    /// Filter text or the `*` wildcard.
    pub q: String,
    /// Fetch generation, echoed back with the response.
    pub generation: u64,
}

impl ListingRequest {
    /// Captures the endpoint parameters for the current query state.
    #[must_use]
    pub fn from_state(user_id: &str, state: &ListQueryState, generation: u64) -> Self {
        Self {
            user_id: user_id.to_string(),
            page: state.request_page(),
            items: state.items_per_page,
            sort_on: state.sort_field.clone(),
            sort_order: state.sort_order,
            q: state.query_string().to_string(),
            generation,
        }
    }

    /// Query parameters in endpoint order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("userid", self.user_id.clone()),
            ("page", self.page.to_string()),
            ("items", self.items.to_string()),
            ("sortOn", self.sort_on.clone()),
            ("sortOrder", self.sort_order.to_string()),
            ("q", self.q.clone()),
        ]
    }

    /// Full request URL below `base_url`.
    ///
    /// ```
    /// use mylibrary::domain::ListQueryState;
    /// use mylibrary::library::ListingRequest;
    ///
    /// let request = ListingRequest::from_state("ada", &ListQueryState::new(8, true), 1);
    /// assert_eq!(
    ///     request.url("http://localhost:8080/"),
    ///     "http://localhost:8080/var/search/pool/manager-viewer.json?userid=ada&page=0&items=8&sortOn=_lastModified&sortOrder=desc&q=*"
    /// );
    /// ```
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        let mut url = crate::infrastructure::join_url(base_url, LISTING_ENDPOINT);
        for (i, (key, value)) in self.query_pairs().iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url_encode_into(&mut url, value);
        }
        url
    }
}

/// Percent-encodes `s` onto `out` for a query string.
///
/// Unreserved characters and `*` pass through, spaces become `+`.
pub fn url_encode_into(out: &mut String, s: &str) {
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'*' => {
                out.push(char::from(b));
            }
            b' ' => out.push('+'),
            _ => {
                const HEX: &[u8; 16] = b"0123456789ABCDEF";
                out.push('%');
                out.push(char::from(HEX[usize::from(b >> 4)]));
                out.push(char::from(HEX[usize::from(b & 0x0F)]));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SortSelection;

    #[test]
    fn request_reflects_state() {
        let mut state = ListQueryState::new(8, true);
        state.page = 3;
        state.apply_sort(SortSelection::OldestFirst);
        state.filter_text = Some("lab notes".to_string());

        let request = ListingRequest::from_state("ada", &state, 7);
        assert_eq!(request.page, 2);
        assert_eq!(request.items, 8);
        assert_eq!(request.sort_on, "_lastModified");
        assert_eq!(request.sort_order, SortOrder::Asc);
        assert_eq!(request.q, "lab notes");
        assert_eq!(request.generation, 7);
    }

    #[test]
    fn query_values_are_encoded() {
        let mut state = ListQueryState::new(8, true);
        state.filter_text = Some("a&b c/é".to_string());
        let url = ListingRequest::from_state("ada", &state, 1).url("http://h");
        assert!(url.ends_with("&q=a%26b+c%2F%C3%A9"), "{url}");
    }
}
