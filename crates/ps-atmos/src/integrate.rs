//! Quadrature used to rebuild optical depth from mass column density.

use crate::error::AtmosResult;
use ps_core::PsError;

/// Trait for depth integrators.
pub trait ColumnIntegrator: Send + Sync {
    /// Integrator name (for debugging/logging).
    fn name(&self) -> &str;

    /// Per-interval contributions of `∫ y dx`.
    ///
    /// The result has one entry per point: entry 0 is `first` (the part above
    /// the first point), entry `i` covers `x[i-1]..x[i]`.
    fn increments(&self, x: &[f64], y: &[f64], first: f64) -> AtmosResult<Vec<f64>>;
}

/// Trapezoid rule on the tabulated points.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrapezoidIntegrator;

impl TrapezoidIntegrator {
    pub fn new() -> Self {
        Self
    }
}

impl ColumnIntegrator for TrapezoidIntegrator {
    fn name(&self) -> &str {
        "trapezoid"
    }

    fn increments(&self, x: &[f64], y: &[f64], first: f64) -> AtmosResult<Vec<f64>> {
        if x.len() != y.len() {
            return Err(PsError::LengthMismatch {
                what: "integrand",
                expected: x.len(),
                found: y.len(),
            }
            .into());
        }
        if x.is_empty() {
            return Ok(Vec::new());
        }
        let mut out = Vec::with_capacity(x.len());
        out.push(first);
        out.extend(
            x.windows(2)
                .zip(y.windows(2))
                .map(|(xs, ys)| 0.5 * (ys[0] + ys[1]) * (xs[1] - xs[0])),
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_integrand_is_exact() {
        let x = [0.0, 1.0, 3.0];
        let y = [1.0, 3.0, 7.0]; // y = 2x + 1
        let inc = TrapezoidIntegrator.increments(&x, &y, 0.5).unwrap();
        assert_eq!(inc, vec![0.5, 2.0, 10.0]);
    }

    #[test]
    fn mismatched_lengths_rejected() {
        assert!(TrapezoidIntegrator.increments(&[0.0, 1.0], &[1.0], 0.0).is_err());
    }

    #[test]
    fn empty_input() {
        assert!(TrapezoidIntegrator.increments(&[], &[], 0.0).unwrap().is_empty());
    }
}
