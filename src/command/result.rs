//! Success output of a command, with directives for the presentation layer.

use clap::ValueEnum;
use std::fmt;

/// Main view of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tab {
    Dashboard,
    Online,
    Offline,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tab::Dashboard => "dashboard",
            Tab::Online => "online",
            Tab::Offline => "offline",
        };
        write!(f, "{}", name)
    }
}

/// Feedback text plus what the presentation layer should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    feedback: String,
    show_help: bool,
    is_exit: bool,
    tab: Option<Tab>,
    levels_to_expand: u32,
}

impl CommandResult {
    /// A result that only carries feedback.
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            show_help: false,
            is_exit: false,
            tab: None,
            levels_to_expand: 0,
        }
    }

    pub fn with_help(mut self) -> Self {
        self.show_help = true;
        self
    }

    pub fn with_exit(mut self) -> Self {
        self.is_exit = true;
        self
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.tab = Some(tab);
        self
    }

    pub fn with_levels_to_expand(mut self, levels: u32) -> Self {
        self.levels_to_expand = levels;
        self
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn is_exit(&self) -> bool {
        self.is_exit
    }

    pub fn tab(&self) -> Option<Tab> {
        self.tab
    }

    /// Folder levels to expand; 0 means leave the folder view alone.
    pub fn levels_to_expand(&self) -> u32 {
        self.levels_to_expand
    }
}
