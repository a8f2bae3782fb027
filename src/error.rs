use std::fmt;

use serde::Serialize;
use ts_rs::TS;

use crate::model::FieldKey;

/// Structured error type for the editor. Every variant is recoverable:
/// edit-path errors are turned into no-ops by the caller, file errors are
/// reported and the previous state is kept.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "code", content = "detail")]
#[ts(export)]
pub enum EditorError {
    /// The field is not shown for the current document, so it may not change.
    FieldNotApplicable { field: FieldKey },
    /// The payload cannot be stored in this field.
    InvalidValue { field: FieldKey, message: String },
    /// The UI event has none of the accepted shapes.
    InvalidEvent { message: String },
    ValidationError { message: String },
    IoError { message: String },
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::FieldNotApplicable { field } => {
                write!(f, "Field '{}' is not applicable to this query", field.label())
            }
            EditorError::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{}': {message}", field.label())
            }
            EditorError::InvalidEvent { message } => write!(f, "Invalid change event: {message}"),
            EditorError::ValidationError { message } => write!(f, "{message}"),
            EditorError::IoError { message } => write!(f, "I/O error: {message}"),
        }
    }
}

impl std::error::Error for EditorError {}

impl From<std::io::Error> for EditorError {
    fn from(e: std::io::Error) -> Self {
        EditorError::IoError {
            message: e.to_string(),
        }
    }
}

impl From<crate::storage::StorageError> for EditorError {
    fn from(e: crate::storage::StorageError) -> Self {
        match e {
            crate::storage::StorageError::Io(io_err) => EditorError::IoError {
                message: io_err.to_string(),
            },
            crate::storage::StorageError::Json(json_err) => EditorError::ValidationError {
                message: json_err.to_string(),
            },
        }
    }
}
