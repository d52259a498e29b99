//! Aggregation of per-path deletion results.
//!
//! The content endpoint deletes one node per request, while the list
//! controller wants a single success flag for the whole selection. A
//! [`DeletionBatch`] collects the individual completions and reports once
//! every path has answered.

use std::collections::BTreeSet;

/// One bulk removal in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionBatch {
    id: u64,
    pending: BTreeSet<String>,
    failed: bool,
}

impl DeletionBatch {
    /// Starts a batch over `paths`. Duplicate paths are collapsed.
    #[must_use]
    pub fn new(id: u64, paths: &[String]) -> Self {
        Self {
            id,
            pending: paths.iter().cloned().collect(),
            failed: false,
        }
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Records the outcome for one path.
    ///
    /// Returns `Some(success)` once no path is pending, where `success` is
    /// true only if every deletion succeeded. Unknown paths are ignored.
    pub fn record(&mut self, path: &str, success: bool) -> Option<bool> {
        if !self.pending.remove(path) {
            tracing::debug!(batch = self.id, path = %path, "ignoring result for path outside batch");
            return None;
        }
        if !success {
            tracing::warn!(batch = self.id, path = %path, "content deletion failed");
            self.failed = true;
        }
        self.is_finished().then_some(!self.failed)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn reports_once_all_paths_answer() {
        let mut batch = DeletionBatch::new(1, &paths(&["/p/a", "/p/b"]));
        assert_eq!(batch.record("/p/a", true), None);
        assert_eq!(batch.record("/p/b", true), Some(true));
        assert!(batch.is_finished());
    }

    #[test]
    fn any_failure_fails_the_batch() {
        let mut batch = DeletionBatch::new(2, &paths(&["/p/a", "/p/b", "/p/c"]));
        assert_eq!(batch.record("/p/b", false), None);
        assert_eq!(batch.record("/p/a", true), None);
        assert_eq!(batch.record("/p/c", true), Some(false));
    }

    #[test]
    fn unknown_and_repeated_paths_are_ignored() {
        let mut batch = DeletionBatch::new(3, &paths(&["/p/a", "/p/a"]));
        assert_eq!(batch.record("/p/zzz", true), None);
        assert_eq!(batch.record("/p/a", true), Some(true));
        assert_eq!(batch.record("/p/a", true), None);
    }
}
