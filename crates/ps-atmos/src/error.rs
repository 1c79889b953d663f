//! Model-loading errors.
//!
//! Every variant is fatal for the load that raised it: the pipeline has no
//! local recovery path and publishes no partial state.

use ps_core::PsError;
use ps_species::SpeciesError;
use thiserror::Error;

/// Result type for model-atmosphere operations.
pub type AtmosResult<T> = Result<T, AtmosError>;

#[derive(Error, Debug)]
pub enum AtmosError {
    #[error("Too many depth points: {ntau} (maximum {max})")]
    TooManyDepthPoints { ntau: usize, max: usize },

    #[error("Model has no depth points")]
    EmptyModel,

    #[error("Unsupported model type '{tag}'; recognized types: {}", .recognized.join(", "))]
    UnsupportedModelType {
        tag: String,
        recognized: Vec<&'static str>,
    },

    #[error("Invalid molset {molset}: must be 0 or 1")]
    InvalidMolSet { molset: i64 },

    #[error("Hydrogen density solve undefined at layer {layer}: discriminant {discriminant}")]
    UndefinedHydrogenSolve { layer: usize, discriminant: f64 },

    #[error("Malformed layer row {row}: expected {expected} columns, found {found}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Non-physical {what} at layer {layer}: {value}")]
    NonPhysical {
        what: &'static str,
        layer: usize,
        value: f64,
    },

    #[error("Equilibrium solution is missing {species}")]
    MissingSpecies { species: String },

    #[error("{name} failed: {message}")]
    Collaborator { name: String, message: String },

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Species(#[from] SpeciesError),

    #[error(transparent)]
    Core(#[from] PsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AtmosError {
    pub(crate) fn collaborator(name: &str, message: impl Into<String>) -> Self {
        AtmosError::Collaborator {
            name: name.to_string(),
            message: message.into(),
        }
    }
}
