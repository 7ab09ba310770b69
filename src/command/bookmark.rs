//! Bookmark commands.

use log::info;

use super::{BookmarkChanges, CommandError, CommandResult, Tab, save_or_rollback};
use crate::domain::{Bookmark, Reminder, ReminderId, Url};
use crate::model::{BookmarkFilter, Model};
use crate::storage::Storage;

pub(super) fn add(
    candidate: &Bookmark,
    model: &mut Model,
    storage: &dyn Storage,
) -> Result<CommandResult, CommandError> {
    if model.has_bookmark(candidate) {
        return Err(CommandError::duplicate("bookmark", candidate));
    }

    model.add_bookmark(candidate.clone());
    save_or_rollback(model, storage, |model| {
        let _ = model.remove_bookmark(candidate);
    })?;

    Ok(CommandResult::new(format!("New bookmark added: {candidate}")))
}

pub(super) fn delete(
    index: usize,
    model: &mut Model,
    storage: &dyn Storage,
) -> Result<CommandResult, CommandError> {
    let target = model
        .displayed_bookmark(index)
        .cloned()
        .ok_or_else(|| CommandError::bookmark_index(index))?;

    let position = model.remove_bookmark(&target)?;
    let orphan = if model.has_bookmark_url(target.url()) {
        None
    } else {
        model.take_reminder_for(target.url())
    };
    save_or_rollback(model, storage, |model| {
        model.insert_bookmark(position, target.clone());
        if let Some(reminder) = orphan.clone() {
            model.add_reminder(reminder);
        }
    })?;

    if let Some(reminder) = &orphan {
        info!("dropped reminder {} with its bookmark", reminder.id());
    }

    Ok(CommandResult::new(format!("Deleted bookmark: {target}")))
}

pub(super) fn edit(
    index: usize,
    changes: &BookmarkChanges,
    model: &mut Model,
    storage: &dyn Storage,
) -> Result<CommandResult, CommandError> {
    let target = model
        .displayed_bookmark(index)
        .cloned()
        .ok_or_else(|| CommandError::bookmark_index(index))?;
    let edited = changes.apply_to(&target);

    if edited != target && model.has_bookmark(&edited) {
        return Err(CommandError::duplicate("bookmark", &edited));
    }

    model.set_bookmark(&target, edited.clone())?;
    let moved = follow_url_change(model, target.url(), edited.url());
    save_or_rollback(model, storage, |model| {
        let _ = model.set_bookmark(&edited, target.clone());
        if let Some((original, replacement)) = moved {
            if let Some(id) = replacement {
                let _ = model.remove_reminder(id);
            }
            model.add_reminder(original);
        }
    })?;

    Ok(CommandResult::new(format!("Edited bookmark: {edited}")))
}

/// Moves the reminder on `from` to `to` once no bookmark points at `from`.
///
/// The moved reminder gets a new id. If `to` already has a reminder the old
/// one is dropped. Returns the original reminder and its replacement's id.
fn follow_url_change(
    model: &mut Model,
    from: &Url,
    to: &Url,
) -> Option<(Reminder, Option<ReminderId>)> {
    if from == to || model.has_bookmark_url(from) {
        return None;
    }
    let original = model.take_reminder_for(from)?;
    if model.has_reminder_for(to) {
        info!("dropped reminder {}: {to} already has one", original.id());
        return Some((original, None));
    }

    let replacement = Reminder::new(to.clone(), original.note(), original.remind_time());
    let id = replacement.id();
    model.add_reminder(replacement);
    Some((original, Some(id)))
}

pub(super) fn find(keywords: &[String], model: &mut Model) -> CommandResult {
    model.update_filter(BookmarkFilter::keywords(keywords.to_vec()));
    let count = model.displayed_bookmarks().len();
    CommandResult::new(format!("{count} bookmarks listed!"))
}

pub(super) fn list(model: &mut Model) -> CommandResult {
    model.update_filter(BookmarkFilter::All);
    CommandResult::new("Listed all bookmarks")
}

pub(super) fn clear(model: &mut Model, storage: &dyn Storage) -> Result<CommandResult, CommandError> {
    let previous = model.replace_data(Default::default());
    save_or_rollback(model, storage, |model| {
        model.replace_data(previous);
    })?;

    Ok(CommandResult::new("Mark has been cleared!"))
}

pub(super) fn goto(index: usize, model: &mut Model) -> Result<CommandResult, CommandError> {
    let url = model
        .displayed_bookmark(index)
        .map(|b| b.url().clone())
        .ok_or_else(|| CommandError::bookmark_index(index))?;

    let feedback = format!("Opening {url}");
    model.set_current_url(Some(url));
    Ok(CommandResult::new(feedback).with_tab(Tab::Online))
}
