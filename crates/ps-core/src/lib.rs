//! ps-core: stable foundation for photosphere.
//!
//! Contains:
//! - units (uom quantity types + CGS constructors)
//! - constants (CGS physical constants used by the model pipeline)
//! - numeric (Real + float helpers)
//! - error (shared error types)

pub mod constants;
pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PsError, PsResult};
pub use numeric::*;
pub use units::*;
