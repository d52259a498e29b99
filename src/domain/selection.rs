//! Checkbox selection bookkeeping.
//!
//! [`SelectionState`] replaces scanning rendered markup for checked boxes: rows
//! are added and removed explicitly and the controller queries the set. It is
//! cleared on every list reset.

use std::collections::BTreeSet;

/// Set of checked row ids plus the state of the select-all control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: BTreeSet<String>,
    select_all: bool,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks or unchecks a single row.
    pub fn set(&mut self, id: &str, checked: bool) {
        if checked {
            self.selected.insert(id.to_string());
        } else {
            self.selected.remove(id);
        }
    }

    /// Flips a single row and returns its new checked state.
    pub fn toggle(&mut self, id: &str) -> bool {
        let checked = !self.selected.contains(id);
        self.set(id, checked);
        checked
    }

    /// Applies the select-all control to every given row.
    pub fn set_all<'a, I>(&mut self, ids: I, checked: bool)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.select_all = checked;
        if checked {
            self.selected.extend(ids.into_iter().map(str::to_string));
        } else {
            self.selected.clear();
        }
    }

    /// Unchecks everything, including the select-all control.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.select_all = false;
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    #[must_use]
    pub const fn select_all_checked(&self) -> bool {
        self.select_all
    }

    /// Bulk removal is enabled while at least one row is checked.
    #[must_use]
    pub fn bulk_delete_enabled(&self) -> bool {
        !self.selected.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Checked ids in stable order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_delete_follows_row_checks() {
        let mut selection = SelectionState::new();
        assert!(!selection.bulk_delete_enabled());

        selection.set("b", true);
        selection.set("d", true);
        assert!(selection.bulk_delete_enabled());
        assert_eq!(selection.len(), 2);

        selection.set("b", false);
        assert!(selection.bulk_delete_enabled());
        selection.set("d", false);
        assert!(!selection.bulk_delete_enabled());
    }

    #[test]
    fn select_all_checks_and_clears_every_row() {
        let mut selection = SelectionState::new();
        selection.set_all(["a", "b", "c"], true);
        assert!(selection.select_all_checked());
        assert_eq!(selection.ids().collect::<Vec<_>>(), vec!["a", "b", "c"]);

        selection.set_all(["a", "b", "c"], false);
        assert!(!selection.select_all_checked());
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_reports_new_state() {
        let mut selection = SelectionState::new();
        assert!(selection.toggle("x"));
        assert!(!selection.toggle("x"));
        assert!(!selection.is_selected("x"));
    }
}
