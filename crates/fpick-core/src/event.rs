//! Commands a host sends to the picker and what came of them.
//!
//! The UI translates user input into [`Command`]s and hands them to
//! [`PickerController::execute`](crate::controller::PickerController::execute),
//! which answers with an [`Outcome`]. Listener callbacks fire as well; the
//! outcome is for hosts that prefer a return value.

use crate::fs::entry::Entry;
use crate::nav::lister::SelectionMode;

/// An action the UI requests the picker to perform.
///
/// Commands flow **UI → Core**. Indices refer to the listing or breadcrumb
/// trail of the most recent [`PickerView`](crate::controller::PickerView).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Activate the entry at this index of the current listing: descend into
    /// a directory or select a file.
    Activate(usize),
    /// Jump to the breadcrumb at this index.
    Breadcrumb(usize),
    /// Show the storage root list.
    Roots,
    /// Go back one step in the navigation stack.
    Back,
    /// Show or hide hidden entries.
    SetShowHidden(bool),
    /// Flip the hidden-entry flag.
    ToggleHidden,
    /// Change what the picker selects. Applies from the next navigation.
    SetSelectionMode(SelectionMode),
}

/// What a [`Command`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A directory (or the root list) is now displayed.
    Navigated,
    /// A newer navigation started before this one finished; nothing changed.
    Superseded,
    /// A file was selected. The session is over from the host's view.
    FileSelected(Entry),
    /// Settings changed; the listing may have been refreshed in place.
    Updated,
    /// Back was requested with nothing left to go back to.
    Exit,
    /// The index did not refer to anything.
    Ignored,
}
