//! Change notifications published by the model.

use crate::domain::{Bookmark, ReminderId, Url};

/// One completed mutation of the model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    BookmarkAdded(Bookmark),
    BookmarkRemoved(Bookmark),
    BookmarkReplaced { old: Bookmark, new: Bookmark },
    FilterChanged,
    ReminderAdded(ReminderId),
    ReminderRemoved(ReminderId),
    CurrentUrlChanged(Option<Url>),
    /// Everything was replaced at once.
    Reset,
}

impl ModelEvent {
    /// Returns true if the displayed bookmark list may have changed.
    pub fn affects_bookmark_list(&self) -> bool {
        matches!(
            self,
            Self::BookmarkAdded(_)
                | Self::BookmarkRemoved(_)
                | Self::BookmarkReplaced { .. }
                | Self::FilterChanged
                | Self::Reset
        )
    }
}
