//! Partition-function service seam.
//!
//! The model pipeline asks the service for one table per element before
//! abundances are used. Table lookup or computation lives behind
//! [`PartitionFunctionService`]; [`GroundStatePartitionFunctions`] is a
//! temperature-independent fallback built from ground-term statistical
//! weights.

use crate::element::Element;
use crate::error::{SpeciesError, SpeciesResult};
use crate::species::Ionization;
use tracing::debug;

/// Partition functions for one element at every depth layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionTable {
    pub element: Element,
    /// U(T) of the neutral atom, one entry per layer
    pub neutral: Vec<f64>,
    /// U(T) of the singly ionized atom, one entry per layer
    pub ionized: Vec<f64>,
}

impl PartitionTable {
    pub fn value(&self, stage: Ionization, layer: usize) -> Option<f64> {
        match stage {
            Ionization::Neutral => self.neutral.get(layer).copied(),
            Ionization::Single => self.ionized.get(layer).copied(),
        }
    }
}

/// Trait for partition-function backends.
///
/// Implementations must be thread-safe (Send + Sync) so a single backend can
/// serve several pipelines.
pub trait PartitionFunctionService: Send + Sync {
    /// Backend name (for debugging/logging).
    fn name(&self) -> &str;

    /// Compute the table for `element` at the given layer temperatures [K].
    fn partition_table(&self, element: Element, temperatures: &[f64])
    -> SpeciesResult<PartitionTable>;
}

/// Partition tables for every element, indexed by atomic number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionSet {
    tables: Vec<PartitionTable>,
}

impl PartitionSet {
    /// Ask `service` for every element 1..=95.
    pub fn compute(
        service: &dyn PartitionFunctionService,
        temperatures: &[f64],
    ) -> SpeciesResult<Self> {
        validate_temperatures(temperatures)?;
        let tables = Element::all()
            .map(|element| {
                let table = service.partition_table(element, temperatures)?;
                check_table(&table, element, temperatures.len())?;
                Ok(table)
            })
            .collect::<SpeciesResult<Vec<_>>>()?;
        debug!(
            backend = service.name(),
            elements = tables.len(),
            layers = temperatures.len(),
            "computed partition tables"
        );
        Ok(Self { tables })
    }

    pub fn get(&self, element: Element) -> Option<&PartitionTable> {
        self.tables.get(element.index())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

fn check_table(table: &PartitionTable, element: Element, layers: usize) -> SpeciesResult<()> {
    if table.element != element {
        return Err(SpeciesError::Backend {
            message: format!("asked for {element}, got a table for {}", table.element),
        });
    }
    if table.neutral.len() != layers || table.ionized.len() != layers {
        return Err(SpeciesError::Backend {
            message: format!(
                "{element}: expected {layers} values per stage, got {}/{}",
                table.neutral.len(),
                table.ionized.len()
            ),
        });
    }
    Ok(())
}

fn validate_temperatures(temperatures: &[f64]) -> SpeciesResult<()> {
    if temperatures.iter().any(|t| !t.is_finite() || *t <= 0.0) {
        return Err(SpeciesError::NonPhysical {
            what: "temperature must be positive and finite",
        });
    }
    Ok(())
}

/// Ground-term statistical weights (neutral, singly ionized) for Z = 1..=30.
const GROUND_WEIGHTS: [(f64, f64); 30] = [
    (2.0, 1.0),   // H
    (1.0, 2.0),   // He
    (2.0, 1.0),   // Li
    (1.0, 2.0),   // Be
    (6.0, 1.0),   // B
    (9.0, 6.0),   // C
    (4.0, 9.0),   // N
    (9.0, 4.0),   // O
    (6.0, 9.0),   // F
    (1.0, 6.0),   // Ne
    (2.0, 1.0),   // Na
    (1.0, 2.0),   // Mg
    (6.0, 1.0),   // Al
    (9.0, 6.0),   // Si
    (4.0, 9.0),   // P
    (9.0, 4.0),   // S
    (6.0, 9.0),   // Cl
    (1.0, 6.0),   // Ar
    (2.0, 1.0),   // K
    (1.0, 2.0),   // Ca
    (10.0, 15.0), // Sc
    (21.0, 28.0), // Ti
    (28.0, 25.0), // V
    (7.0, 6.0),   // Cr
    (6.0, 7.0),   // Mn
    (25.0, 30.0), // Fe
    (28.0, 21.0), // Co
    (21.0, 10.0), // Ni
    (2.0, 1.0),   // Cu
    (1.0, 2.0),   // Zn
];

/// Temperature-independent partition functions from ground-term weights.
///
/// Elements without tabulated weights get U = 1 in both stages.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroundStatePartitionFunctions;

impl GroundStatePartitionFunctions {
    pub fn new() -> Self {
        Self
    }
}

impl PartitionFunctionService for GroundStatePartitionFunctions {
    fn name(&self) -> &str {
        "ground-state"
    }

    fn partition_table(
        &self,
        element: Element,
        temperatures: &[f64],
    ) -> SpeciesResult<PartitionTable> {
        validate_temperatures(temperatures)?;
        let (u0, u1) = GROUND_WEIGHTS
            .get(element.index())
            .copied()
            .unwrap_or((1.0, 1.0));
        Ok(PartitionTable {
            element,
            neutral: vec![u0; temperatures.len()],
            ionized: vec![u1; temperatures.len()],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::MAX_ATOMIC_NUMBER;

    #[test]
    fn computes_every_element() {
        let set = PartitionSet::compute(&GroundStatePartitionFunctions, &[5000.0, 6000.0]).unwrap();
        assert_eq!(set.len(), usize::from(MAX_ATOMIC_NUMBER));
        let fe = set.get(Element::FE).unwrap();
        assert_eq!(fe.neutral, vec![25.0, 25.0]);
        assert_eq!(fe.value(Ionization::Single, 1), Some(30.0));
        assert_eq!(fe.value(Ionization::Single, 2), None);
    }

    #[test]
    fn untabulated_elements_default_to_unity() {
        let table = GroundStatePartitionFunctions
            .partition_table(Element::new(56).unwrap(), &[4500.0])
            .unwrap();
        assert_eq!(table.neutral, vec![1.0]);
        assert_eq!(table.ionized, vec![1.0]);
    }

    #[test]
    fn rejects_non_positive_temperature() {
        let err = PartitionSet::compute(&GroundStatePartitionFunctions, &[5000.0, 0.0]);
        assert!(matches!(err, Err(SpeciesError::NonPhysical { .. })));
    }
}
