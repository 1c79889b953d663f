//! Mean molecular weight of the gas, ignoring molecule formation.

use crate::abundance::AbundanceTable;
use crate::format::FormatSpec;
use crate::grid::DepthGrid;
use ps_species::Element;
use tracing::debug;

/// `Σ xabund·A / (A_H · Σ xabund)` over all elements.
pub fn mean_molecular_weight(abundances: &AbundanceTable) -> f64 {
    let (mass, count) = abundances
        .iter()
        .fold((0.0, 0.0), |(mass, count), (element, x)| {
            (mass + x * element.atomic_mass(), count + x)
        });
    mass / (Element::H.atomic_mass() * count)
}

/// Write `wtmol` into every layer unless the format carries its own.
pub fn broadcast_molecular_weight(grid: &mut DepthGrid, spec: &FormatSpec, wtmol: f64) {
    if spec.supplies_molweight {
        debug!(format = %spec.format, "format supplies molecular weight; keeping loaded values");
        return;
    }
    for layer in grid.layers_mut() {
        layer.molweight = wtmol;
    }
    debug!(wtmol, "broadcast mean molecular weight");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abundance::AbundanceOverride;
    use crate::format::ModelFormat;
    use crate::grid::Layer;

    #[test]
    fn solar_mix_is_about_1_26() {
        let wtmol = mean_molecular_weight(&AbundanceTable::build(0.0, &[]));
        assert!(wtmol > 1.2 && wtmol < 1.35, "wtmol = {wtmol}");
    }

    #[test]
    fn pure_hydrogen_is_unity() {
        let overrides: Vec<_> = Element::all()
            .filter(|e| *e != Element::H)
            .map(|e| AbundanceOverride::new(e, -300.0))
            .collect();
        let table = AbundanceTable::build(0.0, &overrides);
        assert!((mean_molecular_weight(&table) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn metal_poor_gas_is_lighter() {
        let solar = mean_molecular_weight(&AbundanceTable::build(0.0, &[]));
        let poor = mean_molecular_weight(&AbundanceTable::build(-2.0, &[]));
        assert!(poor < solar);
    }

    #[test]
    fn broadcast_fills_every_layer() {
        let spec = ModelFormat::Kurucz.spec().unwrap();
        let mut grid = DepthGrid::new(vec![Layer::default(); 3]).unwrap();
        broadcast_molecular_weight(&mut grid, &spec, 1.27);
        assert!(grid.layers().iter().all(|l| l.molweight == 1.27));
    }

    #[test]
    fn exempt_format_keeps_loaded_weights() {
        let spec = FormatSpec {
            supplies_molweight: true,
            ..ModelFormat::WebMarcs.spec().unwrap()
        };
        let mut grid = DepthGrid::new(vec![
            Layer {
                molweight: 2.0,
                ..Layer::default()
            };
            2
        ])
        .unwrap();
        broadcast_molecular_weight(&mut grid, &spec, 1.27);
        assert!(grid.layers().iter().all(|l| l.molweight == 2.0));
    }
}
