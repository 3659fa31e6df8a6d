// File: crates/timechart-core/src/error.rs
// Summary: Error types for series construction, chart mutation and source decoding.

use thiserror::Error;

/// An observation that does not satisfy the accessor contract of its series.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationError {
    #[error("series `{series}`: observation {index} has non-integer value {value}")]
    NonInteger { series: String, index: usize, value: f64 },
    #[error("series `{series}`: observation {index} has no time under field `{field}`")]
    MissingTime { series: String, index: usize, field: String },
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Untyped input that should have described a series but does not.
    #[error("type mismatch: expected {expected}")]
    TypeMismatch { expected: &'static str },

    #[error("series `{0}` has no observations")]
    EmptySeries(String),

    #[error("series `{0}` is already on the chart")]
    DuplicateSeries(String),

    #[error("timestamp {0} ms is out of range")]
    InvalidTimestamp(i64),

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("chart has been torn down")]
    Detached,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
