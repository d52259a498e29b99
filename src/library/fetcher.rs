//! Library fetch cycle with a request-generation guard.
//!
//! A fetch is split at the asynchronous boundary: [`LibraryFetcher::begin`]
//! stamps a new generation and returns the request for the host transport,
//! and [`LibraryFetcher::complete`] handles whatever the transport delivers.
//! Completions from superseded generations are dropped, so a slow earlier
//! response can never overwrite a newer list.
//!
//! Every failure (bad status, undecodable body, missing `results`) is logged
//! and turned into [`FetchOutcome::Failed`]; nothing is raised past this
//! boundary.

use crate::domain::error::{LibraryError, Result};
use crate::domain::item::LibraryItem;
use crate::domain::query::ListQueryState;
use crate::domain::record::ListingResponse;
use crate::library::mapper::{self, MapContext};
use crate::library::request::ListingRequest;

/// Result of one completed fetch, as handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The fetch succeeded; the vector is empty when nothing matched.
    Loaded(Vec<LibraryItem>),
    /// The fetch failed.
    Failed,
}

impl FetchOutcome {
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    #[must_use]
    pub fn items(&self) -> Option<&[LibraryItem]> {
        match self {
            Self::Loaded(items) => Some(items),
            Self::Failed => None,
        }
    }

    /// Consumes the outcome into the `(success, items)` pair.
    #[must_use]
    pub fn into_parts(self) -> (bool, Option<Vec<LibraryItem>>) {
        match self {
            Self::Loaded(items) => (true, Some(items)),
            Self::Failed => (false, None),
        }
    }
}

/// Issues listing requests and processes their completions.
#[derive(Debug, Clone, Default)]
pub struct LibraryFetcher {
    generation: u64,
}

impl LibraryFetcher {
    #[must_use]
    pub const fn new() -> Self {
        Self { generation: 0 }
    }

    /// Generation of the most recently issued request.
    #[must_use]
    pub const fn current_generation(&self) -> u64 {
        self.generation
    }

    /// Starts a fetch for `user_id` with the current query state.
    ///
    /// Any request issued earlier becomes stale.
    pub fn begin(&mut self, user_id: &str, state: &ListQueryState) -> ListingRequest {
        self.generation += 1;
        let request = ListingRequest::from_state(user_id, state, self.generation);
        tracing::debug!(
            generation = request.generation,
            page = request.page,
            sort_on = %request.sort_on,
            sort_order = %request.sort_order,
            q = %request.q,
            "library fetch issued"
        );
        request
    }

    /// Handles a transport completion.
    ///
    /// Returns `None` when `generation` is not the latest one. Otherwise the
    /// response total is recorded on `state` and the results are mapped.
    /// A zero total short-circuits to an empty list without mapping.
    pub fn complete(
        &self,
        user_id: &str,
        generation: u64,
        status: u16,
        body: &[u8],
        state: &mut ListQueryState,
        ctx: &MapContext<'_>,
    ) -> Option<FetchOutcome> {
        let _span = tracing::debug_span!("fetch_complete", generation, status).entered();

        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "discarding response from superseded fetch"
            );
            return None;
        }

        let outcome = match Self::decode(status, body) {
            Ok(response) => {
                state.total_items = response.total;
                if response.total == 0 {
                    FetchOutcome::Loaded(Vec::new())
                } else {
                    FetchOutcome::Loaded(mapper::map(&response.results, ctx))
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Fetching library items for userid: {} failed", user_id);
                FetchOutcome::Failed
            }
        };

        Some(outcome)
    }

    fn decode(status: u16, body: &[u8]) -> Result<ListingResponse> {
        if !(200..300).contains(&status) {
            return Err(LibraryError::Transport { status });
        }
        ListingResponse::from_slice(body)
    }
}
