//! Error types for shotfile operations.

use thiserror::Error;

/// Errors that can occur while reading or writing a shotfile.
///
/// Every parse variant carries the 1-indexed line number that
/// triggered it; a parse error is fatal to the whole load.
#[derive(Error, Debug)]
pub enum ShotfileError {
    /// I/O error reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line or field value.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// Line number (1-indexed).
        line: usize,
        /// Error message.
        message: String,
    },

    /// A record's payload had the wrong number of fields.
    #[error("line {line}: {keyword} record has {actual} fields, expected {expected}")]
    FieldCount {
        /// Line number (1-indexed).
        line: usize,
        /// Record keyword.
        keyword: String,
        /// Field count the version-1 layout requires.
        expected: usize,
        /// Field count found on the line.
        actual: usize,
    },

    /// Unknown record keyword.
    #[error("line {line}: unknown record type `{keyword}`")]
    UnknownRecord {
        /// Line number (1-indexed).
        line: usize,
        /// The unrecognized keyword.
        keyword: String,
    },

    /// A record carried a version this crate does not support.
    #[error("line {line}: {keyword} record version {version} is not supported")]
    UnsupportedVersion {
        /// Line number (1-indexed).
        line: usize,
        /// Record keyword.
        keyword: String,
        /// The unsupported version.
        version: u32,
    },

    /// A segment record appeared before any `RAY` record.
    #[error("line {line}: {keyword} record with no preceding RAY")]
    OrphanRecord {
        /// Line number (1-indexed).
        line: usize,
        /// Record keyword.
        keyword: String,
    },
}

impl ShotfileError {
    /// Create a parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type for shotfile operations.
pub type Result<T> = std::result::Result<T, ShotfileError>;
