//! Error types for the cosmap library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`CosmapError`] enum.
//!
//! # Examples
//!
//! ```
//! use cosmap::error::{CosmapError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(CosmapError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for cosmap operations.
#[derive(Error, Debug)]
pub enum CosmapError {
    /// A caller-supplied argument violated a precondition (e.g. vector length).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration values failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with CosmapError.
pub type Result<T> = std::result::Result<T, CosmapError>;

impl CosmapError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        CosmapError::InvalidArgument(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        CosmapError::InvalidConfig(msg.into())
    }

    /// Shorthand for the length check every projection performs.
    pub(crate) fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        CosmapError::invalid_argument(format!(
            "Vector dimension mismatch: expected {expected}, got {actual}"
        ))
    }
}
