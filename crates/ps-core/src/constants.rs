//! CGS physical constants.
//!
//! Values match the ones baked into existing model-atmosphere tooling so
//! derived quantities reproduce reference outputs digit for digit.

/// Boltzmann constant [erg/K].
pub const K_BOLTZMANN: f64 = 1.38054e-16;

/// Atomic mass unit [g].
pub const AMU: f64 = 1.6606e-24;

/// Boltzmann constant in eV/K, used for `tkev = k·T`.
pub const K_BOLTZMANN_EV: f64 = 8.6171e-5;

/// Numerator of the reciprocal temperature `theta = 5040/T`.
pub const THETA_SCALE: f64 = 5040.0;

/// Thomson cross section [cm²].
pub const SIGMA_THOMSON: f64 = 6.6524e-25;

/// Saha constant `2·(2π m_e k / h²)^{3/2}` [cm⁻³ K^{-3/2}].
pub const SAHA_CONSTANT: f64 = 4.8296e15;

/// Kilometres per second to centimetres per second.
pub const KM_S_TO_CM_S: f64 = 1.0e5;
