//! Species and element lookup errors.

use thiserror::Error;

/// Result type for species operations.
pub type SpeciesResult<T> = Result<T, SpeciesError>;

/// Errors that can occur while identifying species or building partition tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpeciesError {
    /// Atomic number outside the supported 1..=95 range.
    #[error("Atomic number {z} outside supported range 1..={max}")]
    UnknownElement { z: u32, max: u8 },

    /// A species code string or number could not be interpreted.
    #[error("Invalid species code '{code}': {reason}")]
    InvalidCode { code: String, reason: &'static str },

    /// Non-physical values handed to a partition-function backend.
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Backend error from a partition-function service.
    #[error("Partition function backend error: {message}")]
    Backend { message: String },
}
