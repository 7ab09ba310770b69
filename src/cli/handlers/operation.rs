//! One-shot operation handler: `mark add`, `mark ls`, `mark remind`, ...

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::io::{self, Write};

use super::load_model;
use crate::cli::Operation;
use crate::cli::output::{OutputFormat, write_bookmarks, write_reminders};
use crate::command::Command;
use crate::storage::Storage;

pub fn handle_operation(operation: Operation, storage: &dyn Storage) -> Result<()> {
    let stdout = io::stdout();
    handle_operation_impl(operation, storage, Utc::now(), &mut stdout.lock())
}

/// Internal implementation with an injectable clock and writer.
pub(crate) fn handle_operation_impl<W: Write>(
    operation: Operation,
    storage: &dyn Storage,
    now: DateTime<Utc>,
    out: &mut W,
) -> Result<()> {
    let format = listing_format(&operation);
    let command = operation.into_command(now)?;
    let mut model = load_model(storage)?;

    let result = command.execute(&mut model, storage)?;

    match command {
        Command::List | Command::Find(_) => {
            if format == OutputFormat::Human {
                writeln!(out, "{}", result.feedback())?;
            }
            write_bookmarks(out, &model.displayed_bookmarks(), format)?;
        }
        Command::ListReminders => write_reminders(out, &model.reminders(), format)?,
        _ => writeln!(out, "{}", result.feedback())?,
    }
    Ok(())
}

fn listing_format(operation: &Operation) -> OutputFormat {
    match operation {
        Operation::Find(args) => args.format,
        Operation::List(args) | Operation::Reminders(args) => args.format,
        _ => OutputFormat::Human,
    }
}
