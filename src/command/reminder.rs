//! Reminder commands.

use chrono::{DateTime, Utc};

use super::{CommandError, CommandResult, save_or_rollback};
use crate::domain::Reminder;
use crate::model::Model;
use crate::storage::Storage;

pub(super) fn add(
    index: usize,
    note: &str,
    remind_time: DateTime<Utc>,
    model: &mut Model,
    storage: &dyn Storage,
) -> Result<CommandResult, CommandError> {
    let url = model
        .displayed_bookmark(index)
        .map(|b| b.url().clone())
        .ok_or_else(|| CommandError::bookmark_index(index))?;

    if model.has_reminder_for(&url) {
        return Err(CommandError::duplicate("reminder", &url));
    }

    let reminder = Reminder::new(url, note, remind_time);
    let id = reminder.id();
    let feedback = format!("New reminder added: {reminder}");

    model.add_reminder(reminder);
    save_or_rollback(model, storage, |model| {
        let _ = model.remove_reminder(id);
    })?;

    Ok(CommandResult::new(feedback))
}

pub(super) fn delete(
    index: usize,
    model: &mut Model,
    storage: &dyn Storage,
) -> Result<CommandResult, CommandError> {
    let target = model
        .reminder_at(index)
        .ok_or_else(|| CommandError::reminder_index(index))?;

    let removed = model.remove_reminder(target.id())?;
    let feedback = format!("Deleted reminder: {removed}");
    save_or_rollback(model, storage, |model| {
        model.add_reminder(removed);
    })?;

    Ok(CommandResult::new(feedback))
}

pub(super) fn list(model: &Model) -> CommandResult {
    let count = model.reminders().len();
    CommandResult::new(format!("{count} reminders listed!"))
}
