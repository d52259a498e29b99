//! Input mode of the widget.
//!
//! The widget is either navigating rows or typing into the live filter. The
//! mode decides how keys are interpreted and which footer hints are shown.

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Row navigation, selection, paging and sorting keys are active.
    #[default]
    Normal,

    /// The live filter has focus; printable keys edit the filter text and
    /// every edit re-queries the listing.
    Filter,
}

/// Keys delivered to the live filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    /// A printable character appended to the filter text.
    Char(char),
    /// Removes the last character.
    Backspace,
    /// A bare Shift press. Never triggers a fetch.
    Shift,
}
