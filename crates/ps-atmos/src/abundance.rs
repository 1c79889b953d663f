//! Per-element number abundances relative to hydrogen.

use ps_core::numeric::exp10;
use ps_species::element::solar_log_eps_table;
use ps_species::{Element, MAX_ATOMIC_NUMBER};
use tracing::{debug, warn};

/// Explicit abundance for one element, log ε on the H = 12 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbundanceOverride {
    pub element: Element,
    pub log_eps: f64,
}

impl AbundanceOverride {
    pub fn new(element: Element, log_eps: f64) -> Self {
        Self { element, log_eps }
    }
}

/// `xabund[Z]`: number abundance of element Z relative to hydrogen.
#[derive(Debug, Clone, PartialEq)]
pub struct AbundanceTable {
    xabund: Vec<f64>,
    xhyd: f64,
    abscale: f64,
}

impl AbundanceTable {
    /// Build from the solar reference, a metallicity offset, and overrides.
    pub fn build(abscale: f64, overrides: &[AbundanceOverride]) -> Self {
        Self::from_reference(solar_log_eps_table(), abscale, overrides)
    }

    /// Build from an arbitrary log ε reference indexed by `Z - 1`.
    ///
    /// Helium is not scaled by `abscale`. Overrides are applied last, in
    /// order, and replace whatever value the element had.
    pub fn from_reference(
        reference: &[f64; MAX_ATOMIC_NUMBER as usize],
        abscale: f64,
        overrides: &[AbundanceOverride],
    ) -> Self {
        let xhyd = exp10(reference[0]);
        let mut xabund = Vec::with_capacity(reference.len());
        xabund.push(1.0);
        xabund.push(exp10(reference[1]) / xhyd);
        xabund.extend(reference[2..].iter().map(|log_eps| exp10(log_eps + abscale) / xhyd));

        for o in overrides {
            if o.element == Element::H && o.log_eps != reference[0] {
                warn!(
                    log_eps = o.log_eps,
                    "hydrogen override moves xabund[H] away from 1"
                );
            }
            xabund[o.element.index()] = exp10(o.log_eps) / xhyd;
        }
        debug!(abscale, overrides = overrides.len(), "built abundance table");

        Self {
            xabund,
            xhyd,
            abscale,
        }
    }

    pub fn get(&self, element: Element) -> f64 {
        self.xabund[element.index()]
    }

    /// Absolute hydrogen reference `10^log ε(H)`.
    pub fn xhyd(&self) -> f64 {
        self.xhyd
    }

    pub fn abscale(&self) -> f64 {
        self.abscale
    }

    /// Abundances in atomic-number order, starting at hydrogen.
    pub fn as_slice(&self) -> &[f64] {
        &self.xabund
    }

    /// `(element, xabund)` pairs in atomic-number order.
    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        Element::all().zip(self.xabund.iter().copied())
    }
}
