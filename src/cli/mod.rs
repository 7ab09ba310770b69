//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;
mod parse;
mod presenter;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::command::Tab;
use output::OutputFormat;

pub use parse::{parse_line, parse_remind_time, split_line};
pub use presenter::Presenter;

/// mark - bookmarks with due-time reminders
#[derive(Parser, Debug)]
#[command(name = "mark", version, about, long_about = None)]
pub struct Cli {
    /// Bookmark data file (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub data: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    #[command(flatten)]
    Op(Operation),

    /// Watch reminders and print each one as it becomes due soon
    Watch(WatchArgs),

    /// Start an interactive session
    Shell,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Operations available both as subcommands and inside the shell.
#[derive(Subcommand, Debug, Clone)]
pub enum Operation {
    /// Add a bookmark
    Add(AddArgs),

    /// Delete the bookmark at INDEX
    Delete(IndexArgs),

    /// Change fields of the bookmark at INDEX
    Edit(EditArgs),

    /// Show bookmarks whose name contains any keyword
    Find(FindArgs),

    /// List all bookmarks
    #[command(name = "ls")]
    List(ListArgs),

    /// Remove every bookmark and reminder
    Clear,

    /// Open the bookmark at INDEX
    Goto(IndexArgs),

    /// Set a reminder for the bookmark at INDEX
    Remind(RemindArgs),

    /// Delete the reminder at INDEX
    Unremind(IndexArgs),

    /// List reminders, soonest first
    Reminders(ListArgs),
}

/// Arguments for the `add` command
#[derive(Parser, Debug, Clone)]
pub struct AddArgs {
    /// Bookmark name
    pub name: String,

    /// Bookmark url (http or https)
    pub url: String,

    /// Free-form remark
    #[arg(short, long)]
    pub remark: Option<String>,

    /// Tag for the bookmark (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,
}

/// A 1-based position in a listing
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    pub index: usize,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug, Clone)]
pub struct EditArgs {
    pub index: usize,

    /// New name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New url
    #[arg(short, long)]
    pub url: Option<String>,

    /// New remark (empty string clears it)
    #[arg(short, long)]
    pub remark: Option<String>,

    /// Replace tags (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Remove all tags
    #[arg(long, conflicts_with = "tags")]
    pub clear_tags: bool,
}

/// Arguments for the `find` command
#[derive(Parser, Debug, Clone)]
pub struct FindArgs {
    /// Keywords matched against whole words of bookmark names
    #[arg(required = true)]
    pub keywords: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for listing commands
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `remind` command
#[derive(Parser, Debug, Clone)]
pub struct RemindArgs {
    pub index: usize,

    /// When to remind: "YYYY-MM-DD HH:MM" local time, RFC 3339, or an offset like 30m, 3h, 2d
    #[arg(short, long)]
    pub at: String,

    /// Text shown with the notification
    #[arg(short, long, default_value = "")]
    pub note: String,
}

/// Arguments for the `watch` command
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Stop after this many polls instead of running until interrupted
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub ticks: Option<u32>,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// One line typed into the interactive shell.
#[derive(Parser, Debug)]
#[command(
    name = "mark",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    #[command(flatten)]
    Op(Operation),

    /// Show available commands
    Help,

    /// Leave the shell
    Exit,

    /// Switch to another tab
    Tab {
        #[arg(value_enum)]
        tab: Tab,
    },

    /// Expand the folder view by LEVELS
    Expand { levels: u32 },
}
