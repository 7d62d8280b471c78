//! Error types for the Falx library.
//!
//! All fallible operations in Falx return [`Result`], whose error type is the
//! [`FalxError`] enum. Per-item rewrite shortfalls (length, originality) are
//! deliberately *not* errors — they travel as warnings inside
//! [`RewriteResult`](crate::rewrite::pipeline::RewriteResult) so batch callers
//! can continue past weak rewrites. The only hard failure before a rewrite
//! runs is an invalid configuration.
//!
//! # Examples
//!
//! ```
//! use falx::error::{FalxError, Result};
//!
//! fn check(max_jaccard: f64) -> Result<()> {
//!     if !(0.0..=1.0).contains(&max_jaccard) {
//!         return Err(FalxError::config("max_jaccard must be in [0, 1]"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(1.5).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Falx operations.
#[derive(Error, Debug)]
pub enum FalxError {
    /// I/O errors (reading input files, rule tables, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration (thresholds outside their valid ranges).
    ///
    /// This is the only condition that aborts a rewrite call instead of
    /// returning a best-effort result.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Text analysis errors (tokenization, normalization).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Rule table errors (malformed synonym or pattern definitions).
    #[error("Rule error: {0}")]
    Rules(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`FalxError`].
pub type Result<T> = std::result::Result<T, FalxError>;

impl FalxError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        FalxError::Config(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        FalxError::Analysis(msg.into())
    }

    /// Create a new rule table error.
    pub fn rules<S: Into<String>>(msg: S) -> Self {
        FalxError::Rules(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        FalxError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FalxError::config("max_jaccard out of range");
        assert_eq!(
            err.to_string(),
            "Configuration error: max_jaccard out of range"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: FalxError = io_err.into();
        assert!(matches!(err, FalxError::Io(_)));
    }
}
