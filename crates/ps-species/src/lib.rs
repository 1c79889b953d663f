//! ps-species: element data and species identity for photosphere.
//!
//! Provides:
//! - Periodic data (symbols, atomic masses, solar abundances, ionization potentials)
//! - Species codes for atoms and molecules (`26.1`, `607.0`, ...)
//! - The two built-in candidate species lists selected by `molset`
//! - The eight species tracked for continuum opacity
//! - PartitionFunctionService trait for partition-function backends
//!
//! # Example
//!
//! ```
//! use ps_species::{MolSet, SpeciesCode};
//!
//! let cn: SpeciesCode = "607.0".parse().unwrap();
//! assert_eq!(cn.label(), "CN");
//! assert!(MolSet::Default.species().contains(&cn));
//! ```

pub mod element;
pub mod error;
pub mod partition;
pub mod sets;
pub mod species;

// Re-exports for ergonomics
pub use element::{Element, MAX_ATOMIC_NUMBER};
pub use error::{SpeciesError, SpeciesResult};
pub use partition::{
    GroundStatePartitionFunctions, PartitionFunctionService, PartitionSet, PartitionTable,
};
pub use sets::{MolSet, TrackedSpecies};
pub use species::{Ionization, SpeciesCode};
