//! Command handlers for the CLI.

mod completions;
mod operation;
mod shell;
mod watch;


use anyhow::{Context, Result};

use crate::model::Model;
use crate::storage::Storage;

// Re-export public items
pub use completions::handle_completions;
pub use operation::handle_operation;
pub use shell::handle_shell;
pub use watch::handle_watch;

// Re-export for tests
#[cfg(test)]
pub(crate) use operation::handle_operation_impl;
#[cfg(test)]
pub(crate) use shell::run_shell;
#[cfg(test)]
pub(crate) use watch::{WatchClock, watch_impl};

// ===========================================
// Shared Utilities
// ===========================================

/// Loads saved bookmarks and reminders into a fresh model.
pub(crate) fn load_model(storage: &dyn Storage) -> Result<Model> {
    let data = storage.load().context("failed to load bookmark data")?;
    Model::from_data(data).context("bookmark data is inconsistent")
}
