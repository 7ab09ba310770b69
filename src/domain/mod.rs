//! Core types: Bookmark, Name, Url, Tag, Reminder, ReminderId

mod bookmark;
mod error;
mod reminder;
mod reminder_id;
mod tag;
mod url;

pub use bookmark::{Bookmark, BookmarkBuilder, Name};
pub use error::ValidationError;
pub use reminder::{DEFAULT_NOTE, Reminder};
pub use reminder_id::ReminderId;
pub use tag::{ParseTagError, Tag};
pub use url::Url;
