//! In-memory owner of the bookmark and reminder collections.
//!
//! All mutations go through [`Model`] on the command thread. Every mutation
//! publishes a [`ModelEvent`] to subscribers before returning. The reminder
//! collection sits behind a lock so the scheduler thread can take consistent
//! snapshots through a [`ReminderFeed`] without ever mutating it.

mod event;
mod filter;

use log::trace;
use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

use crate::domain::{Bookmark, Reminder, ReminderId, Url, ValidationError};
use crate::storage::MarkData;

pub use event::ModelEvent;
pub use filter::BookmarkFilter;

/// A lookup against the model found nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("bookmark not found: {0}")]
    BookmarkNotFound(String),

    #[error("reminder not found: {0}")]
    ReminderNotFound(ReminderId),
}

type SharedReminders = Arc<RwLock<Vec<Reminder>>>;

/// Read-only handle to the reminder collection for other threads.
#[derive(Debug, Clone)]
pub struct ReminderFeed {
    reminders: SharedReminders,
}

impl ReminderFeed {
    /// Returns a point-in-time copy of every reminder.
    ///
    /// The copy is taken under the read lock, so it never observes a
    /// half-applied mutation from the command thread.
    pub fn snapshot(&self) -> Vec<Reminder> {
        self.reminders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Canonical bookmark and reminder state.
///
/// Bookmarks are unique by `(name, url)` and reminders are unique by url.
/// Callers check [`Model::has_bookmark`] / [`Model::has_reminder_for`] before
/// adding.
#[derive(Debug, Default)]
pub struct Model {
    bookmarks: Vec<Bookmark>,
    filter: BookmarkFilter,
    reminders: SharedReminders,
    current_url: Option<Url>,
    subscribers: Vec<Sender<ModelEvent>>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a model from persisted data.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::DuplicateInData` if the data holds two equal
    /// bookmarks, two reminders for one url, or a repeated reminder id.
    pub fn from_data(data: MarkData) -> Result<Self, ValidationError> {
        check_unique(&data)?;
        Ok(Self {
            bookmarks: data.bookmarks,
            reminders: Arc::new(RwLock::new(data.reminders)),
            ..Self::default()
        })
    }

    /// Copies the current state into a persistable document.
    pub fn to_data(&self) -> MarkData {
        MarkData {
            bookmarks: self.bookmarks.clone(),
            reminders: self.reminders(),
        }
    }

    /// Registers an observer. Events are queued synchronously on every
    /// mutation; dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<ModelEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn publish(&mut self, event: ModelEvent) {
        trace!("model event: {:?}", event);
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    // ===========================================
    // Bookmarks
    // ===========================================

    /// Returns true if an equal bookmark (same name and url) exists.
    pub fn has_bookmark(&self, bookmark: &Bookmark) -> bool {
        self.bookmarks.contains(bookmark)
    }

    /// Returns true if any bookmark points at `url`.
    pub fn has_bookmark_url(&self, url: &Url) -> bool {
        self.bookmarks.iter().any(|b| b.url() == url)
    }

    /// Appends a bookmark. The caller must have checked `has_bookmark`.
    pub fn add_bookmark(&mut self, bookmark: Bookmark) {
        debug_assert!(!self.has_bookmark(&bookmark));
        self.bookmarks.push(bookmark.clone());
        self.publish(ModelEvent::BookmarkAdded(bookmark));
    }

    /// Inserts a bookmark at `position`, clamped to the end of the list.
    pub fn insert_bookmark(&mut self, position: usize, bookmark: Bookmark) {
        debug_assert!(!self.has_bookmark(&bookmark));
        let position = position.min(self.bookmarks.len());
        self.bookmarks.insert(position, bookmark.clone());
        self.publish(ModelEvent::BookmarkAdded(bookmark));
    }

    /// Removes a bookmark and returns the position it held.
    pub fn remove_bookmark(&mut self, bookmark: &Bookmark) -> Result<usize, ModelError> {
        let position = self.position_of(bookmark)?;
        let removed = self.bookmarks.remove(position);
        self.publish(ModelEvent::BookmarkRemoved(removed));
        Ok(position)
    }

    /// Replaces `target` with `edited` in place.
    pub fn set_bookmark(&mut self, target: &Bookmark, edited: Bookmark) -> Result<(), ModelError> {
        let position = self.position_of(target)?;
        let old = std::mem::replace(&mut self.bookmarks[position], edited.clone());
        self.publish(ModelEvent::BookmarkReplaced { old, new: edited });
        Ok(())
    }

    fn position_of(&self, bookmark: &Bookmark) -> Result<usize, ModelError> {
        self.bookmarks
            .iter()
            .position(|b| b == bookmark)
            .ok_or_else(|| ModelError::BookmarkNotFound(bookmark.to_string()))
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    /// Returns the bookmarks that pass the current filter, in order.
    pub fn displayed_bookmarks(&self) -> Vec<&Bookmark> {
        self.bookmarks
            .iter()
            .filter(|b| self.filter.matches(b))
            .collect()
    }

    /// Looks up a displayed bookmark by its 1-based position.
    pub fn displayed_bookmark(&self, index: usize) -> Option<&Bookmark> {
        index
            .checked_sub(1)
            .and_then(|i| self.displayed_bookmarks().get(i).copied())
    }

    pub fn filter(&self) -> &BookmarkFilter {
        &self.filter
    }

    pub fn update_filter(&mut self, filter: BookmarkFilter) {
        self.filter = filter;
        self.publish(ModelEvent::FilterChanged);
    }

    /// Replaces all bookmarks and reminders, returning what was there.
    ///
    /// `data` is trusted; it must come from [`Model::to_data`] or an earlier
    /// `replace_data` call.
    pub fn replace_data(&mut self, data: MarkData) -> MarkData {
        let previous = self.to_data();
        self.bookmarks = data.bookmarks;
        *self.write_reminders() = data.reminders;
        self.publish(ModelEvent::Reset);
        previous
    }

    // ===========================================
    // Reminders
    // ===========================================

    fn read_reminders(&self) -> RwLockReadGuard<'_, Vec<Reminder>> {
        self.reminders.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_reminders(&self) -> RwLockWriteGuard<'_, Vec<Reminder>> {
        self.reminders.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns every reminder, soonest first.
    pub fn reminders(&self) -> Vec<Reminder> {
        let mut reminders = self.read_reminders().clone();
        reminders.sort_by_key(|r| (r.remind_time(), r.id()));
        reminders
    }

    /// Looks up a reminder by its 1-based position in [`Model::reminders`].
    pub fn reminder_at(&self, index: usize) -> Option<Reminder> {
        index
            .checked_sub(1)
            .and_then(|i| self.reminders().into_iter().nth(i))
    }

    pub fn has_reminder_for(&self, url: &Url) -> bool {
        self.read_reminders().iter().any(|r| r.url() == url)
    }

    /// Removes and returns the reminder for `url`, if there is one.
    pub fn take_reminder_for(&mut self, url: &Url) -> Option<Reminder> {
        let id = self
            .read_reminders()
            .iter()
            .find(|r| r.url() == url)
            .map(Reminder::id)?;
        self.remove_reminder(id).ok()
    }

    /// Adds a reminder. The caller must have checked `has_reminder_for`.
    pub fn add_reminder(&mut self, reminder: Reminder) {
        debug_assert!(!self.has_reminder_for(reminder.url()));
        let id = reminder.id();
        self.write_reminders().push(reminder);
        self.publish(ModelEvent::ReminderAdded(id));
    }

    pub fn remove_reminder(&mut self, id: ReminderId) -> Result<Reminder, ModelError> {
        let removed = {
            let mut reminders = self.write_reminders();
            let position = reminders
                .iter()
                .position(|r| r.id() == id)
                .ok_or(ModelError::ReminderNotFound(id))?;
            reminders.remove(position)
        };
        self.publish(ModelEvent::ReminderRemoved(id));
        Ok(removed)
    }

    /// Returns a handle the scheduler thread can snapshot reminders through.
    pub fn reminder_feed(&self) -> ReminderFeed {
        ReminderFeed {
            reminders: Arc::clone(&self.reminders),
        }
    }

    // ===========================================
    // Browsing
    // ===========================================

    /// The url shown in the online view, if any.
    pub fn current_url(&self) -> Option<&Url> {
        self.current_url.as_ref()
    }

    pub fn set_current_url(&mut self, url: Option<Url>) {
        self.current_url = url.clone();
        self.publish(ModelEvent::CurrentUrlChanged(url));
    }
}

fn check_unique(data: &MarkData) -> Result<(), ValidationError> {
    let mut bookmarks = HashSet::new();
    for bookmark in &data.bookmarks {
        if !bookmarks.insert(bookmark) {
            return Err(ValidationError::DuplicateInData {
                entity: "bookmark",
                detail: bookmark.to_string(),
            });
        }
    }

    let mut urls = HashSet::new();
    let mut ids = HashSet::new();
    for reminder in &data.reminders {
        if !urls.insert(reminder.url()) || !ids.insert(reminder.id()) {
            return Err(ValidationError::DuplicateInData {
                entity: "reminder",
                detail: reminder.to_string(),
            });
        }
    }
    Ok(())
}
