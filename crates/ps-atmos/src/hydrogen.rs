//! Total hydrogen number density per layer.
//!
//! Hydrogen is split between atoms and H₂ in dissociation equilibrium. With
//! `ph` the partial pressure of atomic hydrogen, the gas pressure satisfies
//! `a1·ph² + b1·ph − Pgas = 0`, and the total number of hydrogen nuclei
//! follows from the atomic and molecular reservoirs.

use crate::abundance::AbundanceTable;
use crate::error::{AtmosError, AtmosResult};
use crate::grid::DepthGrid;
use ps_core::constants::K_BOLTZMANN;
use ps_core::numeric::exp10;
use ps_species::Element;
use tracing::{instrument, trace};

/// H₂ formation constant `p(H₂)/p(H)²` [cm²/dyn] from an empirical fit in θ.
pub fn h2_equilibrium_constant(theta: f64) -> f64 {
    exp10(-(12.7422 + (-5.1137 + (0.1145 - 0.0091 * theta) * theta) * theta))
}

/// Quadratic coefficients and root for one layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydrogenSolution {
    pub a1: f64,
    pub b1: f64,
    pub c1: f64,
    /// H₂ formation constant used for the layer
    pub ah2: f64,
    /// Atomic hydrogen partial pressure [dyn/cm²]
    pub ph: f64,
    /// Total hydrogen number density [cm⁻³]
    pub nhtot: f64,
}

/// Solve one layer. On failure returns the offending discriminant.
pub fn solve_layer(pgas: f64, t: f64, theta: f64, x_he: f64) -> Result<HydrogenSolution, f64> {
    let ah2 = h2_equilibrium_constant(theta);
    let a1 = (1.0 + 2.0 * x_he) * ah2;
    let b1 = 1.0 + x_he;
    let c1 = -pgas;

    let discriminant = b1 * b1 / (4.0 * a1 * a1) - c1 / a1;
    if !discriminant.is_finite() || discriminant < 0.0 {
        return Err(discriminant);
    }

    // Positive root -b1/(2a1) + sqrt(disc), rearranged to avoid cancellation
    // when a1 is tiny (hot layers).
    let ph = -2.0 * c1 / (b1 + 2.0 * a1 * discriminant.sqrt());
    let nhtot = (ph + 2.0 * ph * ph * ah2) / (K_BOLTZMANN * t);
    // Very cold layers overflow ah2; the root is then 0·inf.
    if !ph.is_finite() || !nhtot.is_finite() {
        return Err(discriminant);
    }
    Ok(HydrogenSolution {
        a1,
        b1,
        c1,
        ah2,
        ph,
        nhtot,
    })
}

/// Fill `nhtot` for every layer.
#[instrument(skip_all, fields(ntau = grid.len()))]
pub fn solve_hydrogen_density(grid: &mut DepthGrid, abundances: &AbundanceTable) -> AtmosResult<()> {
    let x_he = abundances.get(Element::HE);
    for (i, layer) in grid.layers_mut().iter_mut().enumerate() {
        let solution = solve_layer(layer.pgas, layer.t, layer.theta, x_he).map_err(
            |discriminant| AtmosError::UndefinedHydrogenSolve {
                layer: i,
                discriminant,
            },
        )?;
        trace!(layer = i, ph = solution.ph, nhtot = solution.nhtot, "hydrogen solve");
        layer.nhtot = solution.nhtot;
    }
    Ok(())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn root_satisfies_quadratic(
            t in 3000.0_f64..12000.0,
            log_p in 0.0_f64..7.0,
            x_he in 0.05_f64..0.15,
        ) {
            let pgas = 10f64.powf(log_p);
            let s = solve_layer(pgas, t, 5040.0 / t, x_he).unwrap();
            let value = s.a1 * s.ph * s.ph + s.b1 * s.ph + s.c1;
            prop_assert!(s.ph > 0.0);
            prop_assert!((value / pgas).abs() < 1e-6, "relative residual {}", value / pgas);
        }
    }
}
