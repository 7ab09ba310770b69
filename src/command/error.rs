//! Failure reasons for commands.

use thiserror::Error;

use crate::domain::ValidationError;
use crate::model::ModelError;
use crate::storage::StorageError;

/// Why a command failed. The model is unchanged whenever one of these is
/// returned.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("this {entity} already exists in Mark: {detail}")]
    DuplicateEntity { entity: &'static str, detail: String },

    #[error("{entity} not found: {detail}")]
    NotFound { entity: &'static str, detail: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid command: {0}")]
    Parse(String),

    #[error("failed to save: {0}")]
    Storage(#[from] StorageError),
}

impl CommandError {
    pub(crate) fn duplicate(entity: &'static str, detail: impl ToString) -> Self {
        Self::DuplicateEntity {
            entity,
            detail: detail.to_string(),
        }
    }

    pub(crate) fn bookmark_index(index: usize) -> Self {
        Self::NotFound {
            entity: "bookmark",
            detail: format!("no bookmark at index {index}"),
        }
    }

    pub(crate) fn reminder_index(index: usize) -> Self {
        Self::NotFound {
            entity: "reminder",
            detail: format!("no reminder at index {index}"),
        }
    }
}

impl From<ModelError> for CommandError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::BookmarkNotFound(detail) => Self::NotFound {
                entity: "bookmark",
                detail,
            },
            ModelError::ReminderNotFound(id) => Self::NotFound {
                entity: "reminder",
                detail: id.to_string(),
            },
        }
    }
}
