//! Error types for the sales cleaning pipeline.

use std::path::PathBuf;
use thiserror::Error;

use crate::transform::Transform;

/// Main error type for pipeline operations.
#[derive(Debug, Error)]
pub enum CleanError {
    /// Error reading, writing or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited input.
    #[error("Parse error in '{path}' at line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// A column the stage depends on is absent.
    #[error("Schema error during {stage}: required column '{column}' not found")]
    MissingColumn { stage: Transform, column: String },

    /// Two source columns normalize to the same name.
    #[error("Schema error: columns {sources:?} all normalize to '{name}'")]
    ColumnCollision { name: String, sources: Vec<String> },

    /// A value that must be numeric is not.
    #[error("Type error during {stage}: column '{column}' row {row} holds non-numeric value '{value}'")]
    NonNumeric {
        stage: Transform,
        column: String,
        row: usize,
        value: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Broad classification of a [`CleanError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    Schema,
    Type,
    Serialization,
}

impl CleanError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CleanError::Io { .. } => ErrorKind::Io,
            CleanError::Parse { .. } => ErrorKind::Parse,
            CleanError::MissingColumn { .. } | CleanError::ColumnCollision { .. } => {
                ErrorKind::Schema
            }
            CleanError::NonNumeric { .. } => ErrorKind::Type,
            CleanError::Csv(e) if e.is_io_error() => ErrorKind::Io,
            CleanError::Csv(_) => ErrorKind::Parse,
            CleanError::Json(_) => ErrorKind::Serialization,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CleanError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, CleanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = CleanError::MissingColumn {
            stage: Transform::DropMissing,
            column: "qty".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert!(err.to_string().contains("'qty'"));
        assert!(err.to_string().contains("drop_missing"));

        let err = CleanError::io(
            "nowhere.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("nowhere.csv"));
    }
}
