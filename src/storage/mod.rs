//! Persistence gateway for bookmark and reminder data.

mod json;

use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{Bookmark, Reminder};

pub use json::JsonStorage;

/// The persisted document: every bookmark and reminder, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkData {
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

/// Errors while loading or saving data.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse data file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize data: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Load/save contract used by the command engine.
///
/// Both calls are synchronous and may fail; callers treat a failed `save` as
/// a reason to undo the in-memory change that prompted it.
pub trait Storage {
    fn load(&self) -> Result<MarkData, StorageError>;
    fn save(&self, data: &MarkData) -> Result<(), StorageError>;
}
