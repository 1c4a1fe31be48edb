//! Error types for the bayes library.
//!
//! All errors are represented by the [`BayesError`] enum. Snapshot failures are
//! split by cause so callers can tell a corrupted file from a truncated one.
//!
//! # Examples
//!
//! ```
//! use bayes::error::{BayesError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(BayesError::invalid_options("expected an object"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for bayes operations.
#[derive(Error, Debug)]
pub enum BayesError {
    /// Options were supplied but are not a usable configuration.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// The snapshot text is not well-formed structured data.
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// A required snapshot field is absent or null.
    #[error("Incomplete snapshot: missing field `{0}`")]
    IncompleteSnapshot(String),

    /// The snapshot parses but its counters contradict each other.
    #[error("Inconsistent snapshot: {0}")]
    InconsistentSnapshot(String),

    /// Analysis-related errors (tokenizer construction, tokenization)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// I/O errors (model files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with BayesError.
pub type Result<T> = std::result::Result<T, BayesError>;

impl BayesError {
    /// Create a new invalid options error.
    pub fn invalid_options<S: Into<String>>(msg: S) -> Self {
        BayesError::InvalidOptions(msg.into())
    }

    /// Create a new malformed snapshot error.
    pub fn malformed_snapshot<S: Into<String>>(msg: S) -> Self {
        BayesError::MalformedSnapshot(msg.into())
    }

    /// Create a new incomplete snapshot error naming the missing field.
    pub fn incomplete_snapshot<S: Into<String>>(field: S) -> Self {
        BayesError::IncompleteSnapshot(field.into())
    }

    /// Create a new inconsistent snapshot error.
    pub fn inconsistent_snapshot<S: Into<String>>(msg: S) -> Self {
        BayesError::InconsistentSnapshot(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        BayesError::Analysis(msg.into())
    }

    /// Whether this error was raised while decoding a snapshot.
    pub fn is_snapshot_error(&self) -> bool {
        matches!(
            self,
            BayesError::MalformedSnapshot(_)
                | BayesError::IncompleteSnapshot(_)
                | BayesError::InconsistentSnapshot(_)
        )
    }
}
