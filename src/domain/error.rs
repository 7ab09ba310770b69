//! Validation errors raised while constructing domain values.

use thiserror::Error;

use super::ParseTagError;

/// A domain value could not be constructed from the given input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("bookmark name cannot be empty")]
    EmptyName,

    #[error("invalid url '{value}': {reason}")]
    InvalidUrl { value: String, reason: &'static str },

    #[error(transparent)]
    InvalidTag(#[from] ParseTagError),

    #[error(
        "invalid reminder time '{0}': expected YYYY-MM-DD HH:MM or an offset like 30m, 3h, 2d"
    )]
    InvalidRemindTime(String),

    #[error("invalid reminder id '{value}': {reason}")]
    InvalidReminderId { value: String, reason: String },

    #[error("find needs at least one keyword")]
    NoKeywords,

    #[error("at least one field to edit must be provided")]
    NothingToEdit,

    #[error("folder levels to expand must be at least 1")]
    ZeroExpandLevels,

    #[error("duplicate {entity} in saved data: {detail}")]
    DuplicateInData { entity: &'static str, detail: String },
}
