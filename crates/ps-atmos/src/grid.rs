//! The per-depth state shared by every pipeline stage.

use crate::error::{AtmosError, AtmosResult};
use ps_core::constants::{K_BOLTZMANN_EV, THETA_SCALE};
use ps_core::units::{Density, Pressure, Temperature, Velocity, cm_s, dyn_cm2, g_cm3, k};

/// Hard cap on the number of depth layers in one model.
pub const MAX_DEPTH_POINTS: usize = 100;

/// One depth layer. All quantities are CGS.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    /// Reference optical depth (linear once the load completes)
    pub tauref: f64,
    /// log10 of `tauref`
    pub xref: f64,
    /// Mass column density [g/cm²]
    pub rhox: f64,
    /// Temperature [K]
    pub t: f64,
    /// Electron number density [cm⁻³]
    pub ne: f64,
    /// Gas pressure [dyn/cm²]
    pub pgas: f64,
    /// Mass opacity at the reference wavelength [cm²/g]
    pub kaprefmass: f64,
    /// Linear opacity at the reference wavelength [cm⁻¹]
    pub kapref: f64,
    /// Mass density [g/cm³]
    pub rho: f64,
    /// Mean molecular weight [u]
    pub molweight: f64,
    /// Microturbulent velocity [cm/s]
    pub vturb: f64,
    /// 5040/T
    pub theta: f64,
    /// kT [eV]
    pub tkev: f64,
    /// ln T
    pub tlog: f64,
    /// Total hydrogen number density [cm⁻³]
    pub nhtot: f64,
}

impl Layer {
    /// Recompute `theta`, `tkev` and `tlog` from `t`.
    pub fn derive_thermal(&mut self) {
        self.theta = THETA_SCALE / self.t;
        self.tkev = K_BOLTZMANN_EV * self.t;
        self.tlog = self.t.ln();
    }

    pub fn temperature(&self) -> Temperature {
        k(self.t)
    }

    pub fn gas_pressure(&self) -> Pressure {
        dyn_cm2(self.pgas)
    }

    pub fn density(&self) -> Density {
        g_cm3(self.rho)
    }

    pub fn microturbulence(&self) -> Velocity {
        cm_s(self.vturb)
    }
}

/// Ordered depth layers, outermost first.
///
/// Holds between 1 and [`MAX_DEPTH_POINTS`] layers; the length is fixed once
/// built.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthGrid {
    layers: Vec<Layer>,
}

impl DepthGrid {
    pub fn new(layers: Vec<Layer>) -> AtmosResult<Self> {
        check_depth_count(layers.len())?;
        Ok(Self { layers })
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Outermost layer.
    pub fn first(&self) -> &Layer {
        &self.layers[0]
    }

    /// Innermost layer.
    pub fn last(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    /// Extract one quantity across all layers.
    pub fn column(&self, field: impl Fn(&Layer) -> f64) -> Vec<f64> {
        self.layers.iter().map(field).collect()
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.column(|l| l.t)
    }
}

/// Enforce `1 <= ntau <= MAX_DEPTH_POINTS`.
pub fn check_depth_count(ntau: usize) -> AtmosResult<()> {
    if ntau > MAX_DEPTH_POINTS {
        return Err(AtmosError::TooManyDepthPoints {
            ntau,
            max: MAX_DEPTH_POINTS,
        });
    }
    if ntau == 0 {
        return Err(AtmosError::EmptyModel);
    }
    Ok(())
}
