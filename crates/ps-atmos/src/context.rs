//! The canonical model state produced by one load.

use crate::abundance::AbundanceTable;
use crate::equilibrium::SpeciesNumberDensityTable;
use crate::format::FormatSpec;
use crate::grid::DepthGrid;
use crate::normalize::UnitConversions;
use crate::optical_depth::TauScale;
use ps_species::{PartitionSet, SpeciesCode};

/// Everything downstream radiative transfer reads from a loaded model.
///
/// Built only by [`ModelLoader::load`](crate::loader::ModelLoader::load),
/// after every stage has succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAtmosphere {
    pub format: FormatSpec,
    pub grid: DepthGrid,
    pub abundances: AbundanceTable,
    /// Mean molecular weight broadcast to the grid [u]
    pub wtmol: f64,
    pub partitions: PartitionSet,
    /// Candidate list the equilibrium solve was run with
    pub candidates: Vec<SpeciesCode>,
    pub species: SpeciesNumberDensityTable,
    pub conversions: UnitConversions,
    pub tau_scale: TauScale,
    /// Wavelength `kapref` refers to [Å]; `None` when it came from the file
    pub reference_wavelength: Option<f64>,
}

impl ModelAtmosphere {
    pub fn ntau(&self) -> usize {
        self.grid.len()
    }
}
