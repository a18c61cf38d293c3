//! Error types for decision-surface operations.
//!
//! Every failure is fail-fast: invalid data or parameters are rejected
//! before any grid point is evaluated, and nothing is silently corrected.

use thiserror::Error;

/// Main error type for aprender-surface operations.
///
/// # Examples
///
/// ```
/// use aprender_surface::error::SurfaceError;
///
/// let err = SurfaceError::invalid_k(0, 4);
/// assert!(err.to_string().contains("Invalid parameter"));
/// assert!(err.to_string().contains("k = 0"));
/// ```
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// Training data or grid cannot produce a decision surface
    /// (empty input, a single class).
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What is wrong with the input
        message: String,
    },

    /// A parameter lies outside its admissible range.
    #[error("Invalid parameter: {param} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A training row is missing a field or carries a bad coordinate.
    #[error("Malformed record at line {line}, field '{field}': {message}")]
    MalformedRecord {
        /// 1-based line number in the source file (header is line 1)
        line: u64,
        /// Column the problem was found in
        field: String,
        /// Error description
        message: String,
    },

    /// Evaluation was superseded through a cancellation token.
    #[error("Evaluation cancelled after {evaluated} of {total} grid points")]
    Cancelled {
        /// Grid points evaluated before cancellation was observed
        evaluated: usize,
        /// Grid size
        total: usize,
    },

    /// I/O error (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV syntax error (bad quoting, invalid UTF-8, unknown column).
    #[error("CSV error: {0}")]
    Csv(String),

    /// Configuration document could not be parsed or validated.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<csv::Error> for SurfaceError {
    fn from(err: csv::Error) -> Self {
        // Preserve I/O errors as I/O so callers can match on them.
        if err.is_io_error() {
            if let csv::ErrorKind::Io(io) = err.into_kind() {
                return SurfaceError::Io(io);
            }
            return SurfaceError::Csv("unreadable input".to_string());
        }
        SurfaceError::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for SurfaceError {
    fn from(err: serde_json::Error) -> Self {
        SurfaceError::Config(err.to_string())
    }
}

impl SurfaceError {
    /// Create an invalid input error
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an out-of-range `k` error for a training set of `n` records
    #[must_use]
    pub fn invalid_k(k: usize, n: usize) -> Self {
        Self::InvalidParameter {
            param: "k".to_string(),
            value: k.to_string(),
            constraint: format!("1 <= k <= {n}"),
        }
    }

    /// Create a generic invalid parameter error
    #[must_use]
    pub fn invalid_parameter(
        param: &str,
        value: impl ToString,
        constraint: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }

    /// Create a malformed record error
    #[must_use]
    pub fn malformed(line: u64, field: &str, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Whether the error was caused by caller input rather than the environment.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::InvalidParameter { .. } | Self::MalformedRecord { .. }
        )
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, SurfaceError>;
