//! Mass density from the ideal-gas law.

use crate::format::FormatSpec;
use crate::grid::DepthGrid;
use ps_core::constants::{AMU, K_BOLTZMANN};
use tracing::debug;

/// `rho = Pgas·molweight·m_u / (k·T)` for every layer, unless the format
/// carries density directly.
pub fn reconstruct_density(grid: &mut DepthGrid, spec: &FormatSpec) {
    if spec.supplies_density {
        debug!(format = %spec.format, "format supplies density; keeping loaded values");
        return;
    }
    for layer in grid.layers_mut() {
        layer.rho = layer.pgas * layer.molweight * AMU / (K_BOLTZMANN * layer.t);
    }
}
