//! Output format types for CLI commands.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};

use crate::domain::{Bookmark, Reminder};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single bookmark in listing output.
#[derive(Debug, Serialize)]
pub struct BookmarkListing {
    pub index: usize,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl BookmarkListing {
    pub fn new(index: usize, bookmark: &Bookmark) -> Self {
        Self {
            index,
            name: bookmark.name().to_string(),
            url: bookmark.url().to_string(),
            remark: bookmark.remark().map(str::to_string),
            tags: bookmark.tags().iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// A single reminder in listing output.
#[derive(Debug, Serialize)]
pub struct ReminderListing {
    pub index: usize,
    pub id: String,
    pub url: String,
    pub note: String,
    pub remind_time: DateTime<Utc>,
}

impl ReminderListing {
    pub fn new(index: usize, reminder: &Reminder) -> Self {
        Self {
            index,
            id: reminder.id().to_string(),
            url: reminder.url().to_string(),
            note: reminder.display_note().to_string(),
            remind_time: reminder.remind_time(),
        }
    }
}

pub fn write_bookmarks<W: Write>(
    out: &mut W,
    bookmarks: &[&Bookmark],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Human => {
            if bookmarks.is_empty() {
                return writeln!(out, "No bookmarks found.");
            }
            for (i, bookmark) in bookmarks.iter().enumerate() {
                writeln!(out, "{:>3}. {}", i + 1, bookmark)?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            let listings: Vec<BookmarkListing> = bookmarks
                .iter()
                .enumerate()
                .map(|(i, b)| BookmarkListing::new(i + 1, b))
                .collect();
            write_json(out, &Output::new(listings))
        }
    }
}

pub fn write_reminders<W: Write>(
    out: &mut W,
    reminders: &[Reminder],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Human => {
            if reminders.is_empty() {
                return writeln!(out, "No reminders set.");
            }
            for (i, reminder) in reminders.iter().enumerate() {
                writeln!(out, "{:>3}. {}", i + 1, reminder)?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            let listings: Vec<ReminderListing> = reminders
                .iter()
                .enumerate()
                .map(|(i, r)| ReminderListing::new(i + 1, r))
                .collect();
            write_json(out, &Output::new(listings))
        }
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
