//! Linear/logarithmic disambiguation of pressure and electron density.
//!
//! Model files disagree on whether `Pgas` and `Ne` are tabulated linearly or
//! as log10, and on whether the electron column is a number density or a
//! pressure. The checks below recognize those conventions from the shape of
//! the columns and must run in this order; the electron-pressure check reads
//! `Ne` after the log check may already have exponentiated it.

use crate::grid::DepthGrid;
use ps_core::constants::K_BOLTZMANN;
use ps_core::numeric::{exp10, tail_head_ratio};
use tracing::{debug, instrument, warn};

/// `Pgas[last]/Pgas[first]` below this means log10-encoded pressure.
pub const PGAS_LOG_RATIO: f64 = 10.0;
/// `Ne[last]/Ne[first]` below this means log10-encoded electron density.
pub const NE_LOG_RATIO: f64 = 20.0;
/// `Ne[last]` below this means the column holds electron pressure.
pub const NE_PRESSURE_CEILING: f64 = 1.0e7;

/// Which conversions fired during normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitConversions {
    pub pgas_from_log: bool,
    pub ne_from_log: bool,
    pub ne_from_pressure: bool,
}

/// Apply the three heuristics in order.
#[instrument(skip_all, fields(ntau = grid.len()))]
pub fn normalize_units(grid: &mut DepthGrid) -> UnitConversions {
    let mut applied = UnitConversions::default();

    let pgas = grid.column(|l| l.pgas);
    if tail_head_ratio(&pgas).is_some_and(|r| r < PGAS_LOG_RATIO) {
        for layer in grid.layers_mut() {
            layer.pgas = exp10(layer.pgas);
        }
        applied.pgas_from_log = true;
        debug!("gas pressure tabulated as log10; exponentiated");
    }

    let ne = grid.column(|l| l.ne);
    if tail_head_ratio(&ne).is_some_and(|r| r < NE_LOG_RATIO) {
        for layer in grid.layers_mut() {
            layer.ne = exp10(layer.ne);
        }
        applied.ne_from_log = true;
        debug!("electron density tabulated as log10; exponentiated");
    }

    if grid.last().ne < NE_PRESSURE_CEILING {
        for layer in grid.layers_mut() {
            layer.ne /= K_BOLTZMANN * layer.t;
        }
        applied.ne_from_pressure = true;
        debug!("electron column holds pressure; converted to number density");
    }

    if applied.pgas_from_log && grid.layers().iter().any(|l| !l.pgas.is_finite()) {
        warn!("gas pressure overflowed while exponentiating");
    }
    if applied.ne_from_log && grid.layers().iter().any(|l| !l.ne.is_finite()) {
        warn!("electron density overflowed while exponentiating");
    }

    applied
}
