//! Time-anchored reminder to revisit a bookmarked url.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ReminderId, Url};

/// Note text shown when a reminder was created without one.
pub const DEFAULT_NOTE: &str = "Open:";

/// A request to be reminded about `url` at `remind_time`.
///
/// Reminders are never edited in place: changing one means removing it and
/// adding a new one, which also gives it a new id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    id: ReminderId,
    url: Url,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    note: String,
    remind_time: DateTime<Utc>,
}

impl Reminder {
    /// Creates a reminder with a freshly generated id.
    pub fn new(url: Url, note: impl Into<String>, remind_time: DateTime<Utc>) -> Self {
        Self::with_id(ReminderId::new(), url, note, remind_time)
    }

    /// Creates a reminder with a known id, as when loading saved data.
    pub fn with_id(
        id: ReminderId,
        url: Url,
        note: impl Into<String>,
        remind_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            url,
            note: note.into().trim().to_string(),
            remind_time,
        }
    }

    pub fn id(&self) -> ReminderId {
        self.id
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the note as entered, possibly empty.
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Returns the note to display, falling back to [`DEFAULT_NOTE`].
    pub fn display_note(&self) -> &str {
        if self.note.is_empty() {
            DEFAULT_NOTE
        } else {
            &self.note
        }
    }

    pub fn remind_time(&self) -> DateTime<Utc> {
        self.remind_time
    }
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} at {}",
            self.display_note(),
            self.url,
            self.remind_time.format("%Y-%m-%d %H:%M UTC")
        )
    }
}
