//! Reference optical depth and opacity.

use crate::error::{AtmosError, AtmosResult};
use crate::format::{FormatSpec, OpticalDepthStrategy};
use crate::grid::DepthGrid;
use crate::integrate::ColumnIntegrator;
use crate::opacity::{OpacityCalculator, OpacityInput};
use ps_core::PsError;
use ps_core::numeric::{cumulative_sum, exp10};
use tracing::{debug, instrument};

/// Scale the loaded `tauref` column turned out to be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TauScale {
    /// Loaded as log10; exponentiated.
    Logarithmic,
    /// Loaded linearly; log10 taken for `xref`.
    Linear,
}

/// Rebuild `tauref` from `∫ kaprefmass d(rhox)` and set `kapref = kaprefmass·rho`.
pub fn integrate_mass_opacity(grid: &mut DepthGrid, integrator: &dyn ColumnIntegrator) -> AtmosResult<()> {
    let rhox = grid.column(|l| l.rhox);
    let kappa = grid.column(|l| l.kaprefmass);
    let first = rhox[0] * kappa[0];
    let increments = integrator.increments(&rhox, &kappa, first)?;
    if increments.len() != grid.len() {
        return Err(PsError::LengthMismatch {
            what: "integrator increments",
            expected: grid.len(),
            found: increments.len(),
        }
        .into());
    }
    let tau = cumulative_sum(&increments);
    for (layer, tau) in grid.layers_mut().iter_mut().zip(tau) {
        layer.tauref = tau;
        layer.kapref = layer.kaprefmass * layer.rho;
    }
    debug!(integrator = integrator.name(), "integrated reference optical depth");
    Ok(())
}

/// Fill `kapref` from the opacity backend at `wavelength` [Å].
pub fn evaluate_reference_opacity(
    grid: &mut DepthGrid,
    calculator: &dyn OpacityCalculator,
    input: OpacityInputParts<'_>,
    wavelength: f64,
) -> AtmosResult<()> {
    let kapref = {
        let opacity_input = OpacityInput {
            grid,
            abundances: input.abundances,
            species: input.species,
        };
        calculator.reference_opacity(&opacity_input, wavelength)?
    };
    if kapref.len() != grid.len() {
        return Err(AtmosError::collaborator(
            calculator.name(),
            format!("returned {} opacities for {} layers", kapref.len(), grid.len()),
        ));
    }
    for (layer, k) in grid.layers_mut().iter_mut().zip(kapref) {
        layer.kapref = k;
    }
    debug!(calculator = calculator.name(), wavelength, "evaluated reference opacity");
    Ok(())
}

/// The parts of [`OpacityInput`] that do not borrow the grid.
#[derive(Debug, Clone, Copy)]
pub struct OpacityInputParts<'a> {
    pub abundances: &'a crate::abundance::AbundanceTable,
    pub species: &'a crate::equilibrium::SpeciesNumberDensityTable,
}

/// Decide the optical-depth scale and fill `xref`/`tauref` consistently.
///
/// A negative first entry can only be a logarithm.
pub fn canonicalize_tau_scale(grid: &mut DepthGrid) -> TauScale {
    if grid.first().tauref < 0.0 {
        for layer in grid.layers_mut() {
            layer.xref = layer.tauref;
            layer.tauref = exp10(layer.xref);
        }
        debug!("reference optical depth tabulated as log10");
        TauScale::Logarithmic
    } else {
        for layer in grid.layers_mut() {
            layer.xref = layer.tauref.log10();
        }
        TauScale::Linear
    }
}

/// Format-specific reconstruction followed by scale canonicalization.
#[instrument(skip_all, fields(format = %spec.format))]
pub fn reconstruct_optical_depth(
    grid: &mut DepthGrid,
    spec: &FormatSpec,
    integrator: &dyn ColumnIntegrator,
    calculator: &dyn OpacityCalculator,
    parts: OpacityInputParts<'_>,
    wavelength: Option<f64>,
) -> AtmosResult<TauScale> {
    match spec.optical_depth {
        OpticalDepthStrategy::IntegrateMassOpacity => integrate_mass_opacity(grid, integrator)?,
        OpticalDepthStrategy::ReferenceOpacity => {
            let wavelength = wavelength.or(spec.reference_wavelength).ok_or(
                PsError::InvalidArg {
                    what: "format needs a reference wavelength",
                },
            )?;
            evaluate_reference_opacity(grid, calculator, parts, wavelength)?;
        }
    }
    Ok(canonicalize_tau_scale(grid))
}
