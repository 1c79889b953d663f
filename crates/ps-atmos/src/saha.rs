//! Built-in equilibrium backend: Saha ionization plus H₂ dissociation.
//!
//! Atoms are split between the neutral and singly ionized stages with the
//! Saha equation at the loaded electron density. Hydrogen nuclei are first
//! shared between atoms and H₂ with the same dissociation fit the hydrogen
//! solve uses. Other molecules are not formed and come back with zero
//! density.

use crate::equilibrium::{EquilibriumInput, EquilibriumSolution, EquilibriumSolver};
use crate::error::{AtmosError, AtmosResult};
use crate::hydrogen::h2_equilibrium_constant;
use ps_core::constants::{K_BOLTZMANN, SAHA_CONSTANT};
use ps_species::{Element, Ionization, SpeciesCode};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct SahaEquilibrium;

impl SahaEquilibrium {
    pub fn new() -> Self {
        Self
    }
}

/// Atomic hydrogen density given total nuclei and `K = ah2·k·T`.
///
/// Solves `n_H + 2K·n_H² = nhtot` for the positive root.
fn atomic_hydrogen(nhtot: f64, k_h2: f64) -> f64 {
    if k_h2 <= 0.0 {
        return nhtot;
    }
    2.0 * nhtot / (1.0 + (1.0 + 8.0 * k_h2 * nhtot).sqrt())
}

/// `N(II)/N(I)` from the Saha equation.
fn saha_ratio(t: f64, tkev: f64, ne: f64, chi: f64, u0: f64, u1: f64) -> f64 {
    SAHA_CONSTANT * t.powf(1.5) * (u1 / u0) * (-chi / tkev).exp() / ne
}

impl EquilibriumSolver for SahaEquilibrium {
    fn name(&self) -> &str {
        "saha"
    }

    fn solve(
        &self,
        input: &EquilibriumInput<'_>,
        candidates: &[SpeciesCode],
    ) -> AtmosResult<EquilibriumSolution> {
        let layers = input.grid.layers();
        for (i, layer) in layers.iter().enumerate() {
            if layer.ne.is_nan() || layer.ne <= 0.0 {
                return Err(AtmosError::NonPhysical {
                    what: "electron density",
                    layer: i,
                    value: layer.ne,
                });
            }
        }

        let atomic_h: Vec<f64> = layers
            .iter()
            .map(|l| atomic_hydrogen(l.nhtot, h2_equilibrium_constant(l.theta) * K_BOLTZMANN * l.t))
            .collect();

        let mut solution = EquilibriumSolution::new();
        for &candidate in candidates {
            match candidate {
                SpeciesCode::Atom { element, ion } => {
                    let table = input.partitions.get(element).ok_or_else(|| {
                        AtmosError::collaborator(self.name(), format!("no partition table for {element}"))
                    })?;
                    let mut neutral = Vec::with_capacity(layers.len());
                    let mut ionized = Vec::with_capacity(layers.len());
                    for (i, layer) in layers.iter().enumerate() {
                        let nuclei = if element == Element::H {
                            atomic_h[i]
                        } else {
                            input.abundances.get(element) * layer.nhtot
                        };
                        let ratio = match element.ionization_potential() {
                            Some(chi) => saha_ratio(
                                layer.t,
                                layer.tkev,
                                layer.ne,
                                chi,
                                table.neutral[i],
                                table.ionized[i],
                            ),
                            None => 0.0,
                        };
                        if ratio.is_infinite() {
                            neutral.push(0.0);
                            ionized.push(nuclei);
                        } else {
                            neutral.push(nuclei / (1.0 + ratio));
                            ionized.push(nuclei * ratio / (1.0 + ratio));
                        }
                    }
                    solution.insert(
                        SpeciesCode::Atom {
                            element,
                            ion: Ionization::Neutral,
                        },
                        neutral,
                    );
                    if ion == Ionization::Single {
                        solution.insert(candidate, ionized);
                    }
                }
                SpeciesCode::Molecule { code: 101 } => {
                    let h2 = layers
                        .iter()
                        .zip(&atomic_h)
                        .map(|(l, n_h)| 0.5 * (l.nhtot - n_h))
                        .collect();
                    solution.insert(candidate, h2);
                }
                SpeciesCode::Molecule { .. } => {
                    solution.insert(candidate, vec![0.0; layers.len()]);
                }
            }
        }
        debug!(species = solution.len(), "saha equilibrium solved");
        Ok(solution)
    }
}
