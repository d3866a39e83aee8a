//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The requested range is empty or inverted (`min >= max`).
    #[error("maximum must be greater than minimum (got {min} - {max})")]
    InvalidRange {
        /// Requested lower bound.
        min: i64,
        /// Requested upper bound.
        max: i64,
    },

    /// A range bound lies outside the supported input limits.
    #[error("range {min} - {max} exceeds the supported limits of -{limit} - {limit}")]
    RangeOutOfBounds {
        /// Requested lower bound.
        min: i64,
        /// Requested upper bound.
        max: i64,
        /// Absolute limit for either bound.
        limit: i64,
    },

    /// A single-number generation is already in flight.
    #[error("a generation is already in progress")]
    GenerationInProgress,

    /// A destructive operation was requested without confirmation.
    #[error("clearing history requires explicit confirmation")]
    ConfirmationRequired,

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
