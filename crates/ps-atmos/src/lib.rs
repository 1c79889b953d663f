//! ps-atmos: model-atmosphere loading for photosphere.
//!
//! Turns a format-tagged raw layer matrix into one canonical depth grid and
//! derives everything downstream spectrum synthesis needs from it:
//! - Unit normalization of gas pressure and electron density
//! - Abundances, mean molecular weight and mass density
//! - Total hydrogen number density (H/H₂ quadratic)
//! - Species number densities from an equilibrium backend
//! - Reference optical depth and opacity
//!
//! External work (partition functions, chemistry, continuum opacity,
//! quadrature) sits behind traits with simple built-in implementations.
//!
//! # Example
//!
//! ```
//! use ps_atmos::{LoadSettings, ModelLoader, RawModel};
//!
//! let raw = RawModel::new(vec![
//!     vec![0.01, 5000.0, 1e12, 1e4],
//!     vec![1.0, 6000.0, 1e15, 1e6],
//! ]);
//! let model = ModelLoader::with_builtin()
//!     .load("WEBMARCS", &raw, &LoadSettings::default())
//!     .unwrap();
//! assert_eq!(model.ntau(), 2);
//! assert!(model.grid.layers().iter().all(|l| l.rho > 0.0));
//! ```

pub mod abundance;
pub mod context;
pub mod density;
pub mod equilibrium;
pub mod error;
pub mod format;
pub mod grid;
pub mod hydrogen;
pub mod integrate;
pub mod loader;
pub mod molweight;
pub mod moog;
pub mod normalize;
pub mod opacity;
pub mod optical_depth;
pub mod raw;
pub mod saha;
pub mod session;

pub use abundance::{AbundanceOverride, AbundanceTable};
pub use context::ModelAtmosphere;
pub use equilibrium::{
    EquilibriumInput, EquilibriumSolution, EquilibriumSolver, SpeciesNumberDensityTable,
};
pub use error::{AtmosError, AtmosResult};
pub use format::{ColumnLayout, FormatSpec, ModelFormat, OpticalDepthStrategy};
pub use grid::{DepthGrid, Layer, MAX_DEPTH_POINTS};
pub use integrate::{ColumnIntegrator, TrapezoidIntegrator};
pub use loader::{LoadSettings, ModelLoader};
pub use moog::MoogModel;
pub use normalize::UnitConversions;
pub use opacity::{OpacityCalculator, OpacityInput, ThomsonScattering};
pub use optical_depth::TauScale;
pub use raw::RawModel;
pub use saha::SahaEquilibrium;
pub use session::AtmosphereSession;
