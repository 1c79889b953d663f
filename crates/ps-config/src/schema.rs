//! Run configuration schema.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Species list switch: 0 = default (21), 1 = extended (57)
    #[serde(default)]
    pub molset: i64,
    /// Metallicity offset; replaces the model file's value when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abscale: Option<f64>,
    /// Applied after the model file's own overrides
    #[serde(default)]
    pub overrides: Vec<OverrideDef>,
    /// Reference wavelength [Å]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_wavelength: Option<f64>,
    #[serde(default)]
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            molset: 0,
            abscale: None,
            overrides: Vec::new(),
            reference_wavelength: None,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverrideDef {
    pub atomic_number: u32,
    pub log_epsilon: f64,
}
