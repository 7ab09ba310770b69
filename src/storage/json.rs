//! JSON file storage with atomic writes.

use log::debug;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::{MarkData, Storage, StorageError};

/// Stores all data in a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Storage for JsonStorage {
    /// Reads the data file. A missing file yields empty data.
    fn load(&self) -> Result<MarkData, StorageError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no data file at {}, starting empty", self.path.display());
                return Ok(MarkData::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_slice(&bytes).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes the data file through a temp file in the same directory and an
    /// atomic rename, creating the parent directory if needed.
    fn save(&self, data: &MarkData) -> Result<(), StorageError> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;

        let content = serde_json::to_vec_pretty(data).map_err(StorageError::Serialize)?;
        let mut temp = NamedTempFile::new_in(parent).map_err(|e| self.io_error(e))?;
        temp.write_all(&content).map_err(|e| self.io_error(e))?;

        temp.persist(&self.path)
            .map_err(|e| StorageError::AtomicWrite {
                path: self.path.clone(),
                source: e.error,
            })?;

        debug!(
            "saved {} bookmarks and {} reminders to {}",
            data.bookmarks.len(),
            data.reminders.len(),
            self.path.display()
        );
        Ok(())
    }
}
