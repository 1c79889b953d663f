//! The raw per-layer matrix handed to the loader.

use crate::error::{AtmosError, AtmosResult};
use crate::format::ColumnLayout;
use crate::grid::Layer;

/// Numeric rows as they came out of a model file, before any interpretation.
///
/// Column meaning depends on the format tag the model is loaded under.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawModel {
    /// One row per depth layer, outermost first.
    pub rows: Vec<Vec<f64>>,
    /// Microturbulence [cm/s], the same at every depth.
    pub vturb: f64,
}

impl RawModel {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows, vturb: 0.0 }
    }

    pub fn with_vturb(mut self, vturb: f64) -> Self {
        self.vturb = vturb;
        self
    }

    /// Number of depth layers.
    pub fn ntau(&self) -> usize {
        self.rows.len()
    }
}

impl ColumnLayout {
    /// Map one row onto a layer. Extra trailing columns are ignored.
    pub fn map_row(self, index: usize, row: &[f64]) -> AtmosResult<Layer> {
        let expected = self.width();
        if row.len() < expected {
            return Err(AtmosError::MalformedRow {
                row: index,
                expected,
                found: row.len(),
            });
        }
        let layer = match self {
            ColumnLayout::TauTempNePgas => Layer {
                tauref: row[0],
                t: row[1],
                ne: row[2],
                pgas: row[3],
                rhox: 0.0,
                ..Layer::default()
            },
            ColumnLayout::RhoxTempPgasNeKappa => Layer {
                rhox: row[0],
                t: row[1],
                pgas: row[2],
                ne: row[3],
                kaprefmass: row[4],
                ..Layer::default()
            },
        };
        Ok(layer)
    }
}

/// Map every row, broadcast microturbulence and derive the thermal scalars.
pub fn map_rows(raw: &RawModel, layout: ColumnLayout) -> AtmosResult<Vec<Layer>> {
    raw.rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut layer = layout.map_row(i, row)?;
            layer.vturb = raw.vturb;
            layer.derive_thermal();
            Ok(layer)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webmarcs_columns() {
        let layer = ColumnLayout::TauTempNePgas
            .map_row(0, &[0.01, 5000.0, 1e14, 1e5])
            .unwrap();
        assert_eq!(layer.tauref, 0.01);
        assert_eq!(layer.t, 5000.0);
        assert_eq!(layer.ne, 1e14);
        assert_eq!(layer.pgas, 1e5);
        assert_eq!(layer.rhox, 0.0);
    }

    #[test]
    fn kurucz_columns_ignore_extras() {
        let layer = ColumnLayout::RhoxTempPgasNeKappa
            .map_row(3, &[1e-3, 4500.0, 1e3, 1e12, 2e-3, 9.9, 9.9])
            .unwrap();
        assert_eq!(layer.rhox, 1e-3);
        assert_eq!(layer.pgas, 1e3);
        assert_eq!(layer.ne, 1e12);
        assert_eq!(layer.kaprefmass, 2e-3);
    }

    #[test]
    fn short_row_rejected() {
        let err = ColumnLayout::RhoxTempPgasNeKappa
            .map_row(7, &[1.0, 2.0, 3.0])
            .unwrap_err();
        assert!(matches!(
            err,
            AtmosError::MalformedRow {
                row: 7,
                expected: 5,
                found: 3
            }
        ));
    }

    #[test]
    fn rows_carry_vturb_and_thermal() {
        let raw = RawModel::new(vec![vec![0.1, 5040.0, 1e14, 1e5]]).with_vturb(2e5);
        let layers = map_rows(&raw, ColumnLayout::TauTempNePgas).unwrap();
        assert_eq!(layers[0].vturb, 2e5);
        assert!((layers[0].theta - 1.0).abs() < 1e-15);
    }
}
