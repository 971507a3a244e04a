//! Errors raised by persistence ports.

use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Errors that can occur while loading or saving assessments.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Underlying file could not be read or written.
    #[error("IO error: {message}")]
    Io { message: String },

    /// A CSV record could not be parsed or written.
    #[error("CSV error: {message}")]
    Csv { message: String },

    /// A structure contained no row without a parent.
    #[error("No root node found in structure")]
    MissingRoot,

    /// A row was readable but its content is not acceptable.
    #[error("Invalid row {line}: {reason}")]
    InvalidRow { line: u64, reason: String },

    /// The imported data violated a tree rule.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl StoreError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn csv(message: impl Into<String>) -> Self {
        Self::Csv {
            message: message.into(),
        }
    }

    pub fn invalid_row(line: u64, reason: impl Into<String>) -> Self {
        Self::InvalidRow {
            line,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}
