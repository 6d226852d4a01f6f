//! Error types for gear optimization.
//!
//! All errors that can occur while filtering, partitioning, or solving
//! are represented by the `SolveError` enum. An empty catalogue is not
//! an error: it produces a (possibly incomplete) `SolveResult`.

use thiserror::Error;

/// Errors that can occur during a solve.
///
/// # Examples
///
/// ```rust
/// use gearsolve::SolveError;
///
/// let err = SolveError::InvalidConfiguration("window width must be non-negative".into());
/// assert!(err.to_string().contains("window width"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolveError {
    /// Malformed input the engine can detect locally.
    ///
    /// Negative window widths, negative or non-finite profile weights,
    /// a zero candidate cap, or an empty required-slot set.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Cooperative cancellation was observed mid-search.
    #[error("Solve cancelled")]
    Cancelled,

    /// Configuration JSON could not be parsed.
    #[error("Malformed configuration: {0}")]
    Config(String),
}

impl SolveError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SolveError::InvalidConfiguration(reason.into())
    }
}

impl From<serde_json::Error> for SolveError {
    fn from(err: serde_json::Error) -> Self {
        SolveError::Config(err.to_string())
    }
}
