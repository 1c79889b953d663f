//! Run configuration validation.

use crate::schema::RunConfig;
use ps_species::MAX_ATOMIC_NUMBER;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Check every field; all problems are reported, not just the first.
pub fn validate_config(config: &RunConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !(0..=1).contains(&config.molset) {
        errors.push(invalid("molset", config.molset, "must be 0 or 1"));
    }
    if let Some(abscale) = config.abscale
        && !abscale.is_finite()
    {
        errors.push(invalid("abscale", abscale, "must be finite"));
    }
    for (i, o) in config.overrides.iter().enumerate() {
        if o.atomic_number == 0 || o.atomic_number > u32::from(MAX_ATOMIC_NUMBER) {
            errors.push(invalid(
                format!("overrides[{i}].atomic_number"),
                o.atomic_number,
                "must be between 1 and 95",
            ));
        }
        if !o.log_epsilon.is_finite() {
            errors.push(invalid(
                format!("overrides[{i}].log_epsilon"),
                o.log_epsilon,
                "must be finite",
            ));
        }
    }
    if let Some(wavelength) = config.reference_wavelength
        && (!wavelength.is_finite() || wavelength <= 0.0)
    {
        errors.push(invalid("reference_wavelength", wavelength, "must be positive"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
