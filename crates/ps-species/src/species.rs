//! Species identity: atoms with an ionization stage, and molecules.
//!
//! Codes follow the numeric convention used by model-atmosphere and
//! line-list files: an atom is `Z.s` where `s` is the ionization stage
//! (`26.0` = Fe I, `26.1` = Fe II), a molecule is its constituents'
//! atomic numbers concatenated as two-digit groups (`607.0` = CN,
//! `10108.0` = H₂O).

use crate::element::{Element, MAX_ATOMIC_NUMBER};
use crate::error::{SpeciesError, SpeciesResult};
use std::fmt;

/// Ionization stage tracked by the equilibrium tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ionization {
    /// Neutral atom (stage I)
    Neutral,
    /// Singly ionized atom (stage II)
    Single,
}

impl Ionization {
    pub const ALL: [Ionization; 2] = [Ionization::Neutral, Ionization::Single];

    /// Decimal digit used in species codes.
    pub fn digit(self) -> u8 {
        match self {
            Ionization::Neutral => 0,
            Ionization::Single => 1,
        }
    }

    /// Spectroscopic roman numeral.
    pub fn roman(self) -> &'static str {
        match self {
            Ionization::Neutral => "I",
            Ionization::Single => "II",
        }
    }
}

/// One entry of a candidate species list handed to the equilibrium solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpeciesCode {
    /// An element; `ion` is the highest stage requested.
    Atom { element: Element, ion: Ionization },
    /// A molecule in concatenated two-digit form.
    Molecule { code: u32 },
}

impl SpeciesCode {
    pub(crate) const fn ionized(z: u8) -> Self {
        SpeciesCode::Atom {
            element: Element::from_z(z),
            ion: Ionization::Single,
        }
    }

    pub(crate) const fn molecule(code: u32) -> Self {
        SpeciesCode::Molecule { code }
    }

    /// Interpret a numeric species code such as `26.1` or `10108.0`.
    pub fn from_f64(value: f64) -> SpeciesResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(SpeciesError::InvalidCode {
                code: value.to_string(),
                reason: "code must be positive and finite",
            });
        }
        let whole = value.trunc();
        let stage = ((value - whole) * 10.0).round() as u32;

        if whole <= f64::from(MAX_ATOMIC_NUMBER) {
            let element = Element::new(whole as u32)?;
            let ion = match stage {
                0 => Ionization::Neutral,
                1 => Ionization::Single,
                _ => {
                    return Err(SpeciesError::InvalidCode {
                        code: value.to_string(),
                        reason: "only neutral and singly ionized stages are tracked",
                    });
                }
            };
            return Ok(SpeciesCode::Atom { element, ion });
        }

        if whole < 101.0 || whole > f64::from(u32::MAX) {
            return Err(SpeciesError::InvalidCode {
                code: value.to_string(),
                reason: "not an element or molecule code",
            });
        }
        let code = SpeciesCode::Molecule { code: whole as u32 };
        code.constituents().map_err(|_| SpeciesError::InvalidCode {
            code: value.to_string(),
            reason: "molecule contains an unknown element",
        })?;
        Ok(code)
    }

    /// Numeric form of the code.
    pub fn as_f64(self) -> f64 {
        match self {
            SpeciesCode::Atom { element, ion } => {
                f64::from(element.z()) + f64::from(ion.digit()) / 10.0
            }
            SpeciesCode::Molecule { code } => f64::from(code),
        }
    }

    /// Constituent elements in the order they appear in the code.
    pub fn constituents(self) -> SpeciesResult<Vec<Element>> {
        match self {
            SpeciesCode::Atom { element, .. } => Ok(vec![element]),
            SpeciesCode::Molecule { code } => {
                let mut rest = code;
                let mut parts = Vec::new();
                while rest > 0 {
                    parts.push(Element::new(rest % 100)?);
                    rest /= 100;
                }
                parts.reverse();
                Ok(parts)
            }
        }
    }

    pub fn is_molecule(self) -> bool {
        matches!(self, SpeciesCode::Molecule { .. })
    }

    /// Human-readable label: `Fe II`, `CN`, `H2O`.
    pub fn label(self) -> String {
        match self {
            SpeciesCode::Atom { element, ion } => format!("{} {}", element.symbol(), ion.roman()),
            SpeciesCode::Molecule { .. } => {
                let parts = self.constituents().unwrap_or_default();
                let mut label = String::new();
                let mut i = 0;
                while i < parts.len() {
                    let run = parts[i..].iter().take_while(|e| **e == parts[i]).count();
                    label.push_str(parts[i].symbol());
                    if run > 1 {
                        label.push_str(&run.to_string());
                    }
                    i += run;
                }
                label
            }
        }
    }
}

impl fmt::Display for SpeciesCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeciesCode::Atom { element, ion } => write!(f, "{}.{}", element.z(), ion.digit()),
            SpeciesCode::Molecule { code } => write!(f, "{code}.0"),
        }
    }
}

impl std::str::FromStr for SpeciesCode {
    type Err = SpeciesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: f64 = trimmed.parse().map_err(|_| SpeciesError::InvalidCode {
            code: trimmed.to_string(),
            reason: "not a number",
        })?;
        SpeciesCode::from_f64(value)
    }
}
