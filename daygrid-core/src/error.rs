//! Error types for daygrid.

use thiserror::Error;

use crate::date_key::DateKey;

/// Errors that can occur in daygrid operations.
#[derive(Error, Debug)]
pub enum DayGridError {
    #[error("Invalid event: {0}")]
    Validation(String),

    #[error("Event overlaps with existing event #{index} \"{title}\"")]
    Overlap { index: usize, title: String },

    #[error("No event #{index} on {key} ({len} events on that day)")]
    Index { key: DateKey, index: usize, len: usize },

    #[error("Invalid date key '{0}'. Expected <year>-<zero based month>-<day>")]
    InvalidDateKey(String),

    #[error("No day selected")]
    NoDaySelected,

    #[error("No event is being edited")]
    EditorClosed,

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for daygrid operations.
pub type DayGridResult<T> = Result<T, DayGridError>;
