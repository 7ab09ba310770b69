//! Text rendering of command results for the interactive shell.

use clap::CommandFactory;
use std::io::{self, Write};
use std::sync::mpsc::Receiver;

use super::ShellLine;
use super::output::{OutputFormat, write_bookmarks, write_reminders};
use crate::command::{CommandError, CommandResult, Tab};
use crate::model::{Model, ModelEvent};
use crate::reminder::Notification;

/// Applies `CommandResult` directives and redraws the views that model
/// events say have changed.
pub struct Presenter<W: Write> {
    out: W,
    events: Receiver<ModelEvent>,
    tab: Tab,
    tab_switches: usize,
    expanded_levels: u32,
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W, events: Receiver<ModelEvent>) -> Self {
        Self {
            out,
            events,
            tab: Tab::Dashboard,
            tab_switches: 0,
            expanded_levels: 0,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Number of tab-switch directives received so far.
    pub fn tab_switches(&self) -> usize {
        self.tab_switches
    }

    pub fn expanded_levels(&self) -> u32 {
        self.expanded_levels
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "mark [{}]> ", self.tab)?;
        self.out.flush()
    }

    pub fn present(&mut self, result: &CommandResult, model: &Model) -> io::Result<()> {
        writeln!(self.out, "{}", result.feedback())?;
        self.redraw(model)?;

        if result.show_help() {
            let help = ShellLine::command().render_help();
            writeln!(self.out, "{help}")?;
        }
        if let Some(tab) = result.tab() {
            self.tab = tab;
            self.tab_switches += 1;
        }
        self.expanded_levels += result.levels_to_expand();
        Ok(())
    }

    pub fn reminders(&mut self, model: &Model) -> io::Result<()> {
        write_reminders(&mut self.out, &model.reminders(), OutputFormat::Human)
    }

    pub fn error(&mut self, err: &CommandError) -> io::Result<()> {
        writeln!(self.out, "error: {err}")
    }

    pub fn notification(&mut self, notification: &Notification) -> io::Result<()> {
        match notification {
            Notification::Show { url, note, .. } => writeln!(self.out, "Reminder: {note} {url}"),
            Notification::Hide(_) => Ok(()),
        }
    }

    /// Drains pending model events and redraws affected views once.
    fn redraw(&mut self, model: &Model) -> io::Result<()> {
        let mut list_changed = false;
        for event in self.events.try_iter() {
            list_changed |= event.affects_bookmark_list();
            if let ModelEvent::CurrentUrlChanged(Some(url)) = event {
                writeln!(self.out, "Browsing {url}")?;
            }
        }

        if list_changed {
            write_bookmarks(&mut self.out, &model.displayed_bookmarks(), OutputFormat::Human)?;
        }
        Ok(())
    }
}
