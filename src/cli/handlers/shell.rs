//! Interactive shell handler.

use anyhow::{Context, Result};
use chrono::Utc;
use log::debug;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use super::load_model;
use crate::cli::{Presenter, parse_line};
use crate::command::Command;
use crate::reminder::{ChannelSink, Notification, ReminderScheduler, SchedulerConfig};
use crate::storage::Storage;

pub fn handle_shell(storage: &dyn Storage, config: SchedulerConfig) -> Result<()> {
    let stdout = io::stdout();
    run_shell(storage, config, BufReader::new(io::stdin()), stdout.lock())
}

/// Reads commands from `input` until `exit` or end of input.
///
/// Input is read on its own thread so reminder notifications raised by the
/// scheduler are printed while the shell waits for the next line.
pub(crate) fn run_shell<R, W>(
    storage: &dyn Storage,
    config: SchedulerConfig,
    input: R,
    output: W,
) -> Result<()>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    let mut model = load_model(storage)?;
    let mut presenter = Presenter::new(output, model.subscribe());

    let (sink, notifications) = ChannelSink::new();
    let mut scheduler = ReminderScheduler::new(model.reminder_feed(), Arc::new(sink), config);
    scheduler
        .start()
        .context("failed to start reminder scheduler")?;

    let lines = spawn_reader(input).context("failed to start input reader")?;
    loop {
        show_notifications(&mut presenter, &notifications)?;
        presenter.prompt()?;

        let Some(line) = next_line(&lines, &notifications, &mut presenter, config.poll_interval)?
        else {
            debug!("end of input");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_line(&line, Utc::now()) {
            Ok(command) => command,
            Err(err) => {
                presenter.error(&err)?;
                continue;
            }
        };

        match command.execute(&mut model, storage) {
            Ok(result) => {
                presenter.present(&result, &model)?;
                if command == Command::ListReminders {
                    presenter.reminders(&model)?;
                }
                if result.is_exit() {
                    break;
                }
            }
            Err(err) => presenter.error(&err)?,
        }
    }

    scheduler.stop();
    Ok(())
}

/// Forwards input lines over a channel until end of input or until the
/// shell stops listening. The thread is left detached; it may still be
/// blocked on a read when the shell exits.
fn spawn_reader<R: BufRead + Send + 'static>(input: R) -> io::Result<Receiver<io::Result<String>>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("shell-input".to_string())
        .spawn(move || {
            for line in input.lines() {
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}

/// Waits for the next line, printing notifications that arrive meanwhile.
///
/// Returns `None` at end of input.
fn next_line<W: Write>(
    lines: &Receiver<io::Result<String>>,
    notifications: &Receiver<Notification>,
    presenter: &mut Presenter<W>,
    wait: Duration,
) -> Result<Option<String>> {
    loop {
        match lines.recv_timeout(wait) {
            Ok(line) => return Ok(Some(line?)),
            Err(RecvTimeoutError::Disconnected) => return Ok(None),
            Err(RecvTimeoutError::Timeout) => {
                if show_notifications(presenter, notifications)? {
                    presenter.prompt()?;
                }
            }
        }
    }
}

/// Prints queued notifications. Returns true if any line was printed.
fn show_notifications<W: Write>(
    presenter: &mut Presenter<W>,
    notifications: &Receiver<Notification>,
) -> io::Result<bool> {
    let mut printed = false;
    for notification in notifications.try_iter() {
        printed |= matches!(notification, Notification::Show { .. });
        presenter.notification(&notification)?;
    }
    Ok(printed)
}
