//! Error types for the grid engine and the simulation driver.
//!
//! Every fallible core operation returns [`Error`] through the [`Result`]
//! alias. Out-of-range input is always rejected, never clamped.

/// Errors raised by grid construction and driver operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Rows or columns below 1.
    #[error("invalid grid dimensions {rows}x{cols}: both must be at least 1")]
    InvalidDimension {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },

    /// Live probability outside `[0.0, 1.0]` (or NaN).
    #[error("live probability {0} is outside [0.0, 1.0]")]
    InvalidProbability(f64),

    /// A driver argument that makes no sense, e.g. advancing by zero steps.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong.
        reason: String,
    },

    /// Pattern rows of different lengths.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },

    /// The step counter would exceed `u64::MAX`.
    #[error("step counter overflow")]
    StepOverflow,

    /// No pattern with that name in the catalogue.
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
