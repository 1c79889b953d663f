//! Molecular/ionic equilibrium orchestration.
//!
//! The chemistry itself lives behind [`EquilibriumSolver`]. This module picks
//! the candidate species list, runs the solver, and keeps only the species
//! continuum opacity needs.

use crate::abundance::AbundanceTable;
use crate::error::{AtmosError, AtmosResult};
use crate::grid::DepthGrid;
use ps_core::PsError;
use ps_species::{Ionization, MolSet, PartitionSet, SpeciesCode, TrackedSpecies};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

/// Everything a solver may read.
#[derive(Debug, Clone, Copy)]
pub struct EquilibriumInput<'a> {
    pub grid: &'a DepthGrid,
    pub abundances: &'a AbundanceTable,
    pub partitions: &'a PartitionSet,
}

/// Number densities [cm⁻³] per solved species, one entry per layer.
///
/// Atoms are keyed by their actual stage (`26.0` = Fe I, `26.1` = Fe II);
/// molecules by their code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquilibriumSolution {
    densities: HashMap<SpeciesCode, Vec<f64>>,
}

impl EquilibriumSolution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, species: SpeciesCode, densities: Vec<f64>) {
        self.densities.insert(species, densities);
    }

    pub fn get(&self, species: SpeciesCode) -> Option<&[f64]> {
        self.densities.get(&species).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.densities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.densities.is_empty()
    }
}

/// Trait for molecular/ionic equilibrium backends.
pub trait EquilibriumSolver: Send + Sync {
    /// Backend name (for debugging/logging).
    fn name(&self) -> &str;

    /// Solve for every candidate at every layer.
    ///
    /// Atomic candidates must be answered in the neutral stage and, when the
    /// candidate asks for it, the singly ionized stage.
    fn solve(
        &self,
        input: &EquilibriumInput<'_>,
        candidates: &[SpeciesCode],
    ) -> AtmosResult<EquilibriumSolution>;
}

/// Number densities of the tracked species, per stage and layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesNumberDensityTable {
    entries: BTreeMap<(TrackedSpecies, Ionization), Vec<f64>>,
}

impl SpeciesNumberDensityTable {
    pub fn column(&self, species: TrackedSpecies, stage: Ionization) -> Option<&[f64]> {
        self.entries.get(&(species, stage)).map(Vec::as_slice)
    }

    pub fn get(&self, species: TrackedSpecies, stage: Ionization, layer: usize) -> Option<f64> {
        self.column(species, stage)?.get(layer).copied()
    }

    /// Number of (species, stage) columns held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Solution key for a tracked species in a given stage.
fn solution_key(species: TrackedSpecies, stage: Ionization) -> SpeciesCode {
    match species.element() {
        Some(element) => SpeciesCode::Atom {
            element,
            ion: stage,
        },
        None => species.candidate(),
    }
}

/// Resolve the candidate list.
///
/// `molset` is validated even when an explicit list is supplied. An explicit
/// list replaces the built-in one, extended with any tracked species it
/// lacks.
pub fn select_species(molset: i64, explicit: &[SpeciesCode]) -> AtmosResult<Vec<SpeciesCode>> {
    let set = MolSet::from_switch(molset).ok_or(AtmosError::InvalidMolSet { molset })?;
    if explicit.is_empty() {
        debug!(molset, count = set.species().len(), "using built-in species list");
        return Ok(set.species().to_vec());
    }

    let mut candidates = explicit.to_vec();
    for tracked in TrackedSpecies::ALL {
        let needed = tracked.candidate();
        if !candidates.contains(&needed) {
            // A neutral-only entry for the element is upgraded, not duplicated.
            candidates.retain(|c| match c {
                SpeciesCode::Atom { element, .. } => Some(*element) != tracked.element(),
                SpeciesCode::Molecule { .. } => true,
            });
            candidates.push(needed);
        }
    }
    debug!(count = candidates.len(), "using explicit species list");
    Ok(candidates)
}

/// Run the solver and keep the tracked species.
#[instrument(skip_all, fields(solver = solver.name(), candidates = candidates.len()))]
pub fn solve_species(
    solver: &dyn EquilibriumSolver,
    input: &EquilibriumInput<'_>,
    candidates: &[SpeciesCode],
) -> AtmosResult<SpeciesNumberDensityTable> {
    let solution = solver.solve(input, candidates)?;
    let ntau = input.grid.len();

    let mut entries = BTreeMap::new();
    for tracked in TrackedSpecies::ALL {
        for &stage in tracked.stages() {
            let key = solution_key(tracked, stage);
            let column = solution.get(key).ok_or_else(|| AtmosError::MissingSpecies {
                species: key.label(),
            })?;
            if column.len() != ntau {
                return Err(PsError::LengthMismatch {
                    what: "species number densities",
                    expected: ntau,
                    found: column.len(),
                }
                .into());
            }
            entries.insert((tracked, stage), column.to_vec());
        }
    }
    debug!(
        solved = solution.len(),
        kept = entries.len(),
        "extracted tracked species"
    );
    Ok(SpeciesNumberDensityTable { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Layer;
    use ps_species::{Element, GroundStatePartitionFunctions};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns `layer + 1` for every requested stage; counts calls.
    struct CountingSolver {
        calls: AtomicUsize,
    }

    impl EquilibriumSolver for CountingSolver {
        fn name(&self) -> &str {
            "counting"
        }

        fn solve(
            &self,
            input: &EquilibriumInput<'_>,
            candidates: &[SpeciesCode],
        ) -> AtmosResult<EquilibriumSolution> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let column: Vec<f64> = (0..input.grid.len()).map(|i| i as f64 + 1.0).collect();
            let mut solution = EquilibriumSolution::new();
            for &c in candidates {
                match c {
                    SpeciesCode::Atom { element, ion } => {
                        solution.insert(
                            SpeciesCode::Atom {
                                element,
                                ion: Ionization::Neutral,
                            },
                            column.clone(),
                        );
                        if ion == Ionization::Single {
                            solution.insert(c, column.iter().map(|v| v * 10.0).collect());
                        }
                    }
                    SpeciesCode::Molecule { .. } => solution.insert(c, column.clone()),
                }
            }
            Ok(solution)
        }
    }

    fn fixture() -> (DepthGrid, AbundanceTable, PartitionSet) {
        let layers = vec![
            Layer {
                t: 5000.0,
                ..Layer::default()
            };
            3
        ];
        let grid = DepthGrid::new(layers).unwrap();
        let partitions =
            PartitionSet::compute(&GroundStatePartitionFunctions, &grid.temperatures()).unwrap();
        (grid, AbundanceTable::build(0.0, &[]), partitions)
    }

    #[test]
    fn molset_selects_list_length() {
        assert_eq!(select_species(0, &[]).unwrap().len(), 21);
        assert_eq!(select_species(1, &[]).unwrap().len(), 57);
    }

    #[test]
    fn invalid_molset_rejected_even_with_explicit_list() {
        assert!(matches!(
            select_species(2, &[]),
            Err(AtmosError::InvalidMolSet { molset: 2 })
        ));
        let explicit = ["26.1".parse().unwrap()];
        assert!(matches!(
            select_species(-1, &explicit),
            Err(AtmosError::InvalidMolSet { molset: -1 })
        ));
    }

    #[test]
    fn explicit_list_gains_tracked_species() {
        let explicit: Vec<SpeciesCode> = ["607.0", "26.0"].iter().map(|s| s.parse().unwrap()).collect();
        let candidates = select_species(0, &explicit).unwrap();
        assert!(candidates.contains(&"607.0".parse().unwrap()));
        for tracked in TrackedSpecies::ALL {
            assert!(candidates.contains(&tracked.candidate()), "{tracked}");
        }
        // Fe I was upgraded to Fe II, not duplicated.
        assert!(!candidates.contains(&"26.0".parse().unwrap()));
        assert_eq!(candidates.len(), 1 + TrackedSpecies::ALL.len());
    }

    #[test]
    fn keeps_only_tracked_species() {
        let (grid, abundances, partitions) = fixture();
        let input = EquilibriumInput {
            grid: &grid,
            abundances: &abundances,
            partitions: &partitions,
        };
        let solver = CountingSolver {
            calls: AtomicUsize::new(0),
        };
        let candidates = select_species(1, &[]).unwrap();
        let table = solve_species(&solver, &input, &candidates).unwrap();

        assert_eq!(solver.calls.load(Ordering::SeqCst), 1);
        // 7 atoms in two stages + H2
        assert_eq!(table.len(), 15);
        assert_eq!(table.get(TrackedSpecies::Fe, Ionization::Neutral, 2), Some(3.0));
        assert_eq!(table.get(TrackedSpecies::Fe, Ionization::Single, 0), Some(10.0));
        assert_eq!(table.get(TrackedSpecies::H2, Ionization::Neutral, 1), Some(2.0));
        assert_eq!(table.column(TrackedSpecies::H2, Ionization::Single), None);
    }

    #[test]
    fn missing_species_reported() {
        let (grid, abundances, partitions) = fixture();
        let input = EquilibriumInput {
            grid: &grid,
            abundances: &abundances,
            partitions: &partitions,
        };
        let solver = CountingSolver {
            calls: AtomicUsize::new(0),
        };
        let candidates = vec![SpeciesCode::Atom {
            element: Element::H,
            ion: Ionization::Single,
        }];
        match solve_species(&solver, &input, &candidates) {
            Err(AtmosError::MissingSpecies { species }) => assert_eq!(species, "He I"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
