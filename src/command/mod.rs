//! Command engine: applies parsed commands to the model and storage.
//!
//! A command either returns a [`CommandResult`] or fails with a
//! [`CommandError`]. Mutating commands save through the [`Storage`] gateway
//! after changing the model; if the save fails the change is undone before
//! the error is returned, so a failed command never leaves the model half
//! updated.

mod bookmark;
mod error;
mod reminder;
mod result;


use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::num::NonZeroU32;

use crate::domain::{Bookmark, Name, Tag, Url, ValidationError};
use crate::model::Model;
use crate::storage::Storage;

pub use error::CommandError;
pub use result::{CommandResult, Tab};

pub const HELP_FEEDBACK: &str = "Opened help window.";
pub const EXIT_FEEDBACK: &str = "Exiting Mark as requested ...";

/// Fields to change on an existing bookmark. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkChanges {
    pub name: Option<Name>,
    pub url: Option<Url>,
    /// `Some("")` clears the remark.
    pub remark: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

impl BookmarkChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.url.is_none() && self.remark.is_none() && self.tags.is_none()
    }

    /// Returns `bookmark` with these changes applied.
    pub fn apply_to(&self, bookmark: &Bookmark) -> Bookmark {
        let mut builder = bookmark.to_builder();
        if let Some(name) = &self.name {
            builder = builder.name(name.clone());
        }
        if let Some(url) = &self.url {
            builder = builder.url(url.clone());
        }
        if let Some(remark) = &self.remark {
            builder = builder.remark(Some(remark.as_str()));
        }
        if let Some(tags) = &self.tags {
            builder = builder.tags(tags.clone());
        }
        builder.build()
    }
}

/// One user operation, fully parsed and validated.
///
/// Indexes are 1-based positions in the list the user is looking at: the
/// displayed bookmark list, or the reminder list sorted by time.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(Bookmark),
    Delete(usize),
    Edit {
        index: usize,
        changes: BookmarkChanges,
    },
    Find(Vec<String>),
    List,
    Clear,
    Goto(usize),
    AddReminder {
        index: usize,
        note: String,
        remind_time: DateTime<Utc>,
    },
    DeleteReminder(usize),
    ListReminders,
    Help,
    Exit,
    SwitchTab(Tab),
    ExpandFolder(NonZeroU32),
}

impl Command {
    /// Builds a `Find`, rejecting an empty keyword list.
    pub fn find(keywords: Vec<String>) -> Result<Self, ValidationError> {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return Err(ValidationError::NoKeywords);
        }
        Ok(Self::Find(keywords))
    }

    /// Builds an `Edit`, rejecting changes that touch nothing.
    pub fn edit(index: usize, changes: BookmarkChanges) -> Result<Self, ValidationError> {
        if changes.is_empty() {
            return Err(ValidationError::NothingToEdit);
        }
        Ok(Self::Edit { index, changes })
    }

    /// Builds an `ExpandFolder`, rejecting zero levels.
    pub fn expand_folder(levels: u32) -> Result<Self, ValidationError> {
        NonZeroU32::new(levels)
            .map(Self::ExpandFolder)
            .ok_or(ValidationError::ZeroExpandLevels)
    }

    /// Short name used in logs.
    pub fn word(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Delete(_) => "delete",
            Self::Edit { .. } => "edit",
            Self::Find(_) => "find",
            Self::List => "list",
            Self::Clear => "clear",
            Self::Goto(_) => "goto",
            Self::AddReminder { .. } => "remind",
            Self::DeleteReminder(_) => "unremind",
            Self::ListReminders => "reminders",
            Self::Help => "help",
            Self::Exit => "exit",
            Self::SwitchTab(_) => "tab",
            Self::ExpandFolder(_) => "expand",
        }
    }

    /// Applies this command.
    ///
    /// # Errors
    ///
    /// - `DuplicateEntity` when adding or editing into an existing bookmark,
    ///   or adding a second reminder for a url
    /// - `NotFound` for an index with nothing at it
    /// - `Validation` for an edit with no changes
    /// - `Storage` when saving fails; the model change is rolled back first
    pub fn execute(
        &self,
        model: &mut Model,
        storage: &dyn Storage,
    ) -> Result<CommandResult, CommandError> {
        debug!("executing {} command", self.word());
        match self {
            Self::Add(candidate) => bookmark::add(candidate, model, storage),
            Self::Delete(index) => bookmark::delete(*index, model, storage),
            Self::Edit { index, changes } => bookmark::edit(*index, changes, model, storage),
            Self::Find(keywords) => Ok(bookmark::find(keywords, model)),
            Self::List => Ok(bookmark::list(model)),
            Self::Clear => bookmark::clear(model, storage),
            Self::Goto(index) => bookmark::goto(*index, model),
            Self::AddReminder {
                index,
                note,
                remind_time,
            } => reminder::add(*index, note, *remind_time, model, storage),
            Self::DeleteReminder(index) => reminder::delete(*index, model, storage),
            Self::ListReminders => Ok(reminder::list(model)),
            Self::Help => Ok(CommandResult::new(HELP_FEEDBACK).with_help()),
            Self::Exit => Ok(CommandResult::new(EXIT_FEEDBACK).with_exit()),
            Self::SwitchTab(tab) => {
                Ok(CommandResult::new(format!("Switched to {tab} tab")).with_tab(*tab))
            }
            Self::ExpandFolder(levels) => Ok(CommandResult::new(format!(
                "Expanded folders by {levels} level(s)"
            ))
            .with_levels_to_expand(levels.get())),
        }
    }
}

/// Saves the model, undoing the caller's change with `rollback` if the save
/// fails.
fn save_or_rollback(
    model: &mut Model,
    storage: &dyn Storage,
    rollback: impl FnOnce(&mut Model),
) -> Result<(), CommandError> {
    if let Err(err) = storage.save(&model.to_data()) {
        warn!("save failed, rolling back: {err}");
        rollback(model);
        return Err(err.into());
    }
    Ok(())
}
