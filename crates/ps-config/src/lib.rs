//! ps-config: run configuration files and their validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_config};

use ps_atmos::{AbundanceOverride, LoadSettings, MoogModel};
use ps_species::{Element, SpeciesError};
use std::path::Path;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Species(#[from] SpeciesError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn check(config: &RunConfig) -> ConfigResult<()> {
    validate_config(config).map_err(ConfigError::Validation)
}

pub fn load_yaml(path: &Path) -> ConfigResult<RunConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: RunConfig = serde_yaml::from_str(&content)?;
    check(&config)?;
    Ok(config)
}

pub fn save_yaml(path: &Path, config: &RunConfig) -> ConfigResult<()> {
    check(config)?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ConfigResult<RunConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: RunConfig = serde_json::from_str(&content)?;
    check(&config)?;
    Ok(config)
}

/// Pick the loader by file extension; anything but `.json` is YAML.
pub fn load(path: &Path) -> ConfigResult<RunConfig> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}

impl RunConfig {
    fn abundance_overrides(&self) -> ConfigResult<Vec<AbundanceOverride>> {
        self.overrides
            .iter()
            .map(|o| -> ConfigResult<AbundanceOverride> {
                Ok(AbundanceOverride::new(Element::new(o.atomic_number)?, o.log_epsilon))
            })
            .collect()
    }

    /// Load settings from this configuration alone.
    pub fn settings(&self) -> ConfigResult<LoadSettings> {
        Ok(LoadSettings {
            molset: self.molset,
            abscale: self.abscale.unwrap_or(0.0),
            overrides: self.abundance_overrides()?,
            species: Vec::new(),
            reference_wavelength: self.reference_wavelength,
            verbose: self.verbose,
        })
    }

    /// Load settings for a MOOG file: the file's own abundances and species
    /// first, then this configuration on top.
    pub fn settings_for(&self, model: &MoogModel) -> ConfigResult<LoadSettings> {
        let mut settings = model.settings();
        settings.molset = self.molset;
        settings.verbose = self.verbose;
        if let Some(abscale) = self.abscale {
            settings.abscale = abscale;
        }
        settings.overrides.extend(self.abundance_overrides()?);
        if self.reference_wavelength.is_some() {
            settings.reference_wavelength = self.reference_wavelength;
        }
        Ok(settings)
    }
}
