//! Periodic data for elements 1..=95.

use crate::error::{SpeciesError, SpeciesResult};
use std::fmt;

/// Highest atomic number carried by the abundance and partition tables.
pub const MAX_ATOMIC_NUMBER: u8 = 95;

const SYMBOLS: [&str; 95] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am",
];

/// Standard atomic weights [u].
const ATOMIC_MASSES: [f64; 95] = [
    1.008, 4.003, 6.941, 9.012, 10.811, 12.011, 14.007, 15.999, 18.998, 20.180, // 1-10
    22.990, 24.305, 26.982, 28.086, 30.974, 32.065, 35.453, 39.948, 39.098, 40.078, // 11-20
    44.956, 47.867, 50.942, 51.996, 54.938, 55.845, 58.933, 58.693, 63.546, 65.380, // 21-30
    69.723, 72.630, 74.922, 78.971, 79.904, 83.798, 85.468, 87.620, 88.906, 91.224, // 31-40
    92.906, 95.950, 98.000, 101.070, 102.906, 106.420, 107.868, 112.414, 114.818, 118.710, // 41-50
    121.760, 127.600, 126.904, 131.293, 132.905, 137.327, 138.905, 140.116, 140.908, 144.242, // 51-60
    145.000, 150.360, 151.964, 157.250, 158.925, 162.500, 164.930, 167.259, 168.934, 173.045, // 61-70
    174.967, 178.490, 180.948, 183.840, 186.207, 190.230, 192.217, 195.084, 196.967, 200.592, // 71-80
    204.383, 207.200, 208.980, 209.000, 210.000, 222.000, 223.000, 226.000, 227.000, 232.038, // 81-90
    231.036, 238.029, 237.000, 244.000, 243.000, // 91-95
];

/// Solar photospheric abundances, log ε (H = 12). Elements with no
/// measurement carry -5.0 so they contribute nothing.
const SOLAR_LOG_EPS: [f64; 95] = [
    12.00, 10.93, 1.05, 1.38, 2.70, 8.43, 7.83, 8.69, 4.56, 7.93, // 1-10
    6.24, 7.60, 6.45, 7.51, 5.41, 7.12, 5.50, 6.40, 5.03, 6.34, // 11-20
    3.15, 4.95, 3.93, 5.64, 5.43, 7.50, 4.99, 6.22, 4.19, 4.56, // 21-30
    3.04, 3.65, 2.30, 3.34, 2.54, 3.25, 2.52, 2.87, 2.21, 2.58, // 31-40
    1.46, 1.88, -5.00, 1.75, 0.91, 1.57, 0.94, 1.71, 0.80, 2.04, // 41-50
    1.01, 2.18, 1.55, 2.24, 1.08, 2.18, 1.10, 1.58, 0.72, 1.42, // 51-60
    -5.00, 0.96, 0.52, 1.07, 0.30, 1.10, 0.48, 0.92, 0.10, 0.84, // 61-70
    0.10, 0.85, -0.12, 0.85, 0.26, 1.40, 1.38, 1.62, 0.92, 1.17, // 71-80
    0.90, 1.75, 0.65, -5.00, -5.00, -5.00, -5.00, -5.00, -5.00, 0.02, // 81-90
    -5.00, -0.54, -5.00, -5.00, -5.00, // 91-95
];

/// First ionization potentials [eV] for Z = 1..=30.
const IONIZATION_POTENTIALS: [f64; 30] = [
    13.598, 24.587, 5.392, 9.323, 8.298, 11.260, 14.534, 13.618, 17.423, 21.565, // 1-10
    5.139, 7.646, 5.986, 8.152, 10.487, 10.360, 12.968, 15.760, 4.341, 6.113, // 11-20
    6.561, 6.828, 6.746, 6.767, 7.434, 7.902, 7.881, 7.640, 7.726, 9.394, // 21-30
];

/// A chemical element identified by atomic number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Element(u8);

impl Element {
    pub const H: Element = Element(1);
    pub const HE: Element = Element(2);
    pub const C: Element = Element(6);
    pub const MG: Element = Element(12);
    pub const AL: Element = Element(13);
    pub const SI: Element = Element(14);
    pub const FE: Element = Element(26);

    /// Look up an element by atomic number.
    pub fn new(z: u32) -> SpeciesResult<Self> {
        if z == 0 || z > u32::from(MAX_ATOMIC_NUMBER) {
            return Err(SpeciesError::UnknownElement {
                z,
                max: MAX_ATOMIC_NUMBER,
            });
        }
        Ok(Self(z as u8))
    }

    /// Construct without range checking; callers pass literal atomic numbers.
    pub(crate) const fn from_z(z: u8) -> Self {
        Self(z)
    }

    /// All supported elements in atomic-number order.
    pub fn all() -> impl Iterator<Item = Element> {
        (1..=MAX_ATOMIC_NUMBER).map(Element)
    }

    pub fn z(self) -> u8 {
        self.0
    }

    /// Zero-based position in per-element tables.
    pub fn index(self) -> usize {
        usize::from(self.0) - 1
    }

    pub fn symbol(self) -> &'static str {
        SYMBOLS[self.index()]
    }

    /// Standard atomic weight [u].
    pub fn atomic_mass(self) -> f64 {
        ATOMIC_MASSES[self.index()]
    }

    /// Solar log ε abundance on the H = 12 scale.
    pub fn solar_log_eps(self) -> f64 {
        SOLAR_LOG_EPS[self.index()]
    }

    /// First ionization potential [eV], where tabulated.
    pub fn ionization_potential(self) -> Option<f64> {
        IONIZATION_POTENTIALS.get(self.index()).copied()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::str::FromStr for Element {
    type Err = SpeciesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(z) = trimmed.parse::<u32>() {
            return Element::new(z);
        }
        SYMBOLS
            .iter()
            .position(|sym| sym.eq_ignore_ascii_case(trimmed))
            .map(|i| Element(i as u8 + 1))
            .ok_or_else(|| SpeciesError::InvalidCode {
                code: trimmed.to_string(),
                reason: "unknown element symbol",
            })
    }
}

/// Solar log ε table indexed by `Z - 1`.
pub fn solar_log_eps_table() -> &'static [f64; 95] {
    &SOLAR_LOG_EPS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_number() {
        let fe = Element::new(26).unwrap();
        assert_eq!(fe, Element::FE);
        assert_eq!(fe.symbol(), "Fe");
        assert_eq!(fe.solar_log_eps(), 7.50);
        assert!((fe.atomic_mass() - 55.845).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_rejected() {
        assert!(Element::new(0).is_err());
        assert!(Element::new(96).is_err());
        assert!(Element::new(95).is_ok());
    }

    #[test]
    fn parse_symbol_or_number() {
        assert_eq!("mg".parse::<Element>().unwrap(), Element::MG);
        assert_eq!(" 13 ".parse::<Element>().unwrap(), Element::AL);
        assert!("Xx".parse::<Element>().is_err());
    }

    #[test]
    fn tables_cover_every_element() {
        assert_eq!(Element::all().count(), 95);
        assert_eq!(Element::all().last().unwrap().symbol(), "Am");
        assert_eq!(solar_log_eps_table()[0], 12.0);
        assert!(Element::all().all(|e| e.atomic_mass() > 0.0));
    }

    #[test]
    fn ionization_potentials_only_for_light_elements() {
        assert_eq!(Element::H.ionization_potential(), Some(13.598));
        assert!(Element::new(56).unwrap().ionization_potential().is_none());
    }
}
