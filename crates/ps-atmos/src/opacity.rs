//! Continuum opacity at the reference wavelength.

use crate::abundance::AbundanceTable;
use crate::equilibrium::SpeciesNumberDensityTable;
use crate::error::AtmosResult;
use crate::grid::DepthGrid;
use ps_core::constants::SIGMA_THOMSON;

/// Everything an opacity backend may read. The grid is already normalized.
#[derive(Debug, Clone, Copy)]
pub struct OpacityInput<'a> {
    pub grid: &'a DepthGrid,
    pub abundances: &'a AbundanceTable,
    pub species: &'a SpeciesNumberDensityTable,
}

/// Trait for continuum-opacity backends.
pub trait OpacityCalculator: Send + Sync {
    /// Backend name (for debugging/logging).
    fn name(&self) -> &str;

    /// Linear opacity `kapref` [cm⁻¹] per layer at `wavelength` [Å].
    fn reference_opacity(&self, input: &OpacityInput<'_>, wavelength: f64) -> AtmosResult<Vec<f64>>;
}

/// Electron scattering only: `κ = σ_T·Ne`, independent of wavelength.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThomsonScattering;

impl ThomsonScattering {
    pub fn new() -> Self {
        Self
    }
}

impl OpacityCalculator for ThomsonScattering {
    fn name(&self) -> &str {
        "thomson"
    }

    fn reference_opacity(&self, input: &OpacityInput<'_>, _wavelength: f64) -> AtmosResult<Vec<f64>> {
        Ok(input.grid.column(|l| SIGMA_THOMSON * l.ne))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Layer;

    #[test]
    fn thomson_scales_with_electron_density() {
        let grid = DepthGrid::new(vec![
            Layer {
                ne: 1e12,
                ..Layer::default()
            },
            Layer {
                ne: 1e15,
                ..Layer::default()
            },
        ])
        .unwrap();
        let abundances = AbundanceTable::build(0.0, &[]);
        let species = SpeciesNumberDensityTable::default();
        let input = OpacityInput {
            grid: &grid,
            abundances: &abundances,
            species: &species,
        };
        let kapref = ThomsonScattering.reference_opacity(&input, 5000.0).unwrap();
        assert!((kapref[0] - 6.6524e-13).abs() < 1e-25);
        assert!((kapref[1] / kapref[0] - 1e3).abs() < 1e-9);
    }
}
