//! Candidate species lists and the tracked species of interest.

use crate::element::Element;
use crate::species::{Ionization, SpeciesCode};
use std::fmt;

const fn ion(z: u8) -> SpeciesCode {
    SpeciesCode::ionized(z)
}

const fn mol(code: u32) -> SpeciesCode {
    SpeciesCode::molecule(code)
}

/// Compact list: the light atoms plus the common hydrides, oxides and CN.
const DEFAULT_SPECIES: [SpeciesCode; 21] = [
    ion(1), ion(2), ion(6), ion(7), ion(8), ion(12), ion(13), ion(14), ion(26),
    mol(101), mol(106), mol(107), mol(108), mol(606), mol(607), mol(608),
    mol(707), mol(708), mol(808), mol(10108), mol(60808),
];

/// Extended list for cool atmospheres where metal hydrides and oxides matter.
const EXTENDED_SPECIES: [SpeciesCode; 57] = [
    ion(1), ion(2), ion(6), ion(7), ion(8), ion(11), ion(12), ion(13), ion(14), ion(15),
    ion(16), ion(17), ion(19), ion(20), ion(22), ion(23), ion(24), ion(26), ion(28),
    mol(101), mol(106), mol(107), mol(108), mol(111), mol(112), mol(113), mol(114),
    mol(116), mol(117), mol(119), mol(120), mol(124), mol(126), mol(606), mol(607),
    mol(608), mol(614), mol(616), mol(707), mol(708), mol(714), mol(716), mol(808),
    mol(812), mol(813), mol(814), mol(816), mol(820), mol(822), mol(823), mol(826),
    mol(1414), mol(1616), mol(10106), mol(10107), mol(10108), mol(60808),
];

/// Which built-in candidate list feeds the equilibrium solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MolSet {
    /// `molset = 0`
    Default,
    /// `molset = 1`
    Extended,
}

impl MolSet {
    /// Map the configuration switch to a list; `None` for anything but 0 or 1.
    pub fn from_switch(molset: i64) -> Option<Self> {
        match molset {
            0 => Some(MolSet::Default),
            1 => Some(MolSet::Extended),
            _ => None,
        }
    }

    pub fn species(self) -> &'static [SpeciesCode] {
        match self {
            MolSet::Default => &DEFAULT_SPECIES,
            MolSet::Extended => &EXTENDED_SPECIES,
        }
    }
}

/// The species whose number densities downstream continuum opacity needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrackedSpecies {
    H,
    He,
    C,
    Mg,
    Al,
    Si,
    Fe,
    /// Molecular hydrogen
    H2,
}

impl TrackedSpecies {
    pub const ALL: [TrackedSpecies; 8] = [
        TrackedSpecies::H,
        TrackedSpecies::He,
        TrackedSpecies::C,
        TrackedSpecies::Mg,
        TrackedSpecies::Al,
        TrackedSpecies::Si,
        TrackedSpecies::Fe,
        TrackedSpecies::H2,
    ];

    /// The element for atomic entries, `None` for H₂.
    pub fn element(self) -> Option<Element> {
        match self {
            TrackedSpecies::H => Some(Element::H),
            TrackedSpecies::He => Some(Element::HE),
            TrackedSpecies::C => Some(Element::C),
            TrackedSpecies::Mg => Some(Element::MG),
            TrackedSpecies::Al => Some(Element::AL),
            TrackedSpecies::Si => Some(Element::SI),
            TrackedSpecies::Fe => Some(Element::FE),
            TrackedSpecies::H2 => None,
        }
    }

    /// Stages retained in the species table.
    pub fn stages(self) -> &'static [Ionization] {
        match self {
            TrackedSpecies::H2 => &[Ionization::Neutral],
            _ => &Ionization::ALL,
        }
    }

    /// Candidate-list entry that makes the solver produce this species.
    pub fn candidate(self) -> SpeciesCode {
        match self.element() {
            Some(element) => SpeciesCode::Atom {
                element,
                ion: Ionization::Single,
            },
            None => SpeciesCode::Molecule { code: 101 },
        }
    }
}

impl fmt::Display for TrackedSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.element() {
            Some(element) => f.write_str(element.symbol()),
            None => f.write_str("H2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn list_lengths() {
        assert_eq!(MolSet::Default.species().len(), 21);
        assert_eq!(MolSet::Extended.species().len(), 57);
    }

    #[test]
    fn switch_mapping() {
        assert_eq!(MolSet::from_switch(0), Some(MolSet::Default));
        assert_eq!(MolSet::from_switch(1), Some(MolSet::Extended));
        assert_eq!(MolSet::from_switch(2), None);
        assert_eq!(MolSet::from_switch(-1), None);
    }

    #[test]
    fn lists_have_no_duplicates_and_valid_molecules() {
        for set in [MolSet::Default, MolSet::Extended] {
            let unique: HashSet<_> = set.species().iter().collect();
            assert_eq!(unique.len(), set.species().len());
            for code in set.species() {
                assert!(code.constituents().is_ok(), "{code}");
            }
        }
    }

    #[test]
    fn both_lists_cover_tracked_species() {
        for set in [MolSet::Default, MolSet::Extended] {
            for tracked in TrackedSpecies::ALL {
                assert!(set.species().contains(&tracked.candidate()), "{tracked}");
            }
        }
    }

    #[test]
    fn h2_has_a_single_stage() {
        assert_eq!(TrackedSpecies::H2.stages(), &[Ionization::Neutral]);
        assert_eq!(TrackedSpecies::Fe.stages().len(), 2);
        assert_eq!(TrackedSpecies::H2.to_string(), "H2");
    }
}
