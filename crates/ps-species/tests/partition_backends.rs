use ps_species::{
    Element, Ionization, PartitionFunctionService, PartitionSet, PartitionTable, SpeciesError,
    SpeciesResult,
};

/// `U = 1 + T/10000` in both stages.
struct Linear;

impl PartitionFunctionService for Linear {
    fn name(&self) -> &str {
        "linear"
    }

    fn partition_table(&self, element: Element, temperatures: &[f64]) -> SpeciesResult<PartitionTable> {
        let u: Vec<f64> = temperatures.iter().map(|t| 1.0 + t / 1e4).collect();
        Ok(PartitionTable {
            element,
            neutral: u.clone(),
            ionized: u,
        })
    }
}

/// Drops the last layer.
struct Truncating;

impl PartitionFunctionService for Truncating {
    fn name(&self) -> &str {
        "truncating"
    }

    fn partition_table(&self, element: Element, temperatures: &[f64]) -> SpeciesResult<PartitionTable> {
        let n = temperatures.len().saturating_sub(1);
        Ok(PartitionTable {
            element,
            neutral: vec![1.0; n],
            ionized: vec![1.0; n],
        })
    }
}

#[test]
fn custom_backend_values_are_kept_per_layer() {
    let set = PartitionSet::compute(&Linear, &[4000.0, 8000.0]).unwrap();
    let h = set.get(Element::H).unwrap();
    assert!((h.value(Ionization::Neutral, 0).unwrap() - 1.4).abs() < 1e-12);
    assert!((h.value(Ionization::Single, 1).unwrap() - 1.8).abs() < 1e-12);
    assert_eq!(h.value(Ionization::Single, 2), None);
    assert_eq!(set.len(), 95);
}

#[test]
fn short_tables_are_rejected() {
    let err = PartitionSet::compute(&Truncating, &[4000.0, 8000.0]).unwrap_err();
    match err {
        SpeciesError::Backend { message } => assert!(message.contains("expected 2")),
        other => panic!("unexpected error {other:?}"),
    }
}
