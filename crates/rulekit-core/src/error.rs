//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout rulekit. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Data-shape problems are never errors in the `Result` sense: validators
//!   accumulate them into a `ValidationReport` and return normally.
//! - `Result`-level errors are reserved for path rejection, template
//!   rendering failures, and genuine I/O failures that the caller must
//!   convert into an exit code.

use thiserror::Error;

/// Top-level error type for rulekit operations.
#[derive(Error, Debug)]
pub enum RulekitError {
    /// A user-supplied path was rejected or unusable.
    #[error("path error: {0}")]
    Path(#[from] PathError),

    /// A role or domain name failed sanitization.
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// Template rendering failed (missing data in strict mode).
    #[error("template error: {0}")]
    Template(String),

    /// A generated file already exists and --force was not given.
    #[error("refusing to overwrite existing file: {path}")]
    WouldOverwrite {
        /// The file that already exists.
        path: String,
    },

    /// JSON decode error for a document the caller treats as fatal.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejection raised by the path sanitization gate.
#[derive(Error, Debug)]
pub enum PathError {
    /// The raw input matched the deny-list.
    #[error("potentially dangerous file path: {input} (contains {pattern:?})")]
    Rejected {
        /// The raw path string as supplied.
        input: String,
        /// The deny-list pattern that matched.
        pattern: &'static str,
    },

    /// The path resolved but the target does not exist.
    #[error("file does not exist: {input}")]
    NotFound {
        /// The raw path string as supplied.
        input: String,
    },

    /// OS-level resolution failure (embedded NUL, broken link chain, ...).
    #[error("invalid file path: {input}")]
    Invalid {
        /// The raw path string as supplied.
        input: String,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },
}
