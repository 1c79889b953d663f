//! Top-level model loading.

use crate::abundance::{AbundanceOverride, AbundanceTable};
use crate::context::ModelAtmosphere;
use crate::density::reconstruct_density;
use crate::equilibrium::{EquilibriumInput, EquilibriumSolver, select_species, solve_species};
use crate::error::{AtmosError, AtmosResult};
use crate::format::{ModelFormat, OpticalDepthStrategy};
use crate::grid::{DepthGrid, check_depth_count};
use crate::hydrogen::solve_hydrogen_density;
use crate::integrate::{ColumnIntegrator, TrapezoidIntegrator};
use crate::molweight::{broadcast_molecular_weight, mean_molecular_weight};
use crate::normalize::normalize_units;
use crate::opacity::{OpacityCalculator, ThomsonScattering};
use crate::optical_depth::{OpacityInputParts, reconstruct_optical_depth};
use crate::raw::{RawModel, map_rows};
use crate::saha::SahaEquilibrium;
use ps_core::numeric::ensure_finite;
use ps_species::{GroundStatePartitionFunctions, PartitionFunctionService, PartitionSet, SpeciesCode};
use tracing::{debug, info, instrument};

/// Per-load configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSettings {
    /// 0 = default species list, 1 = extended
    pub molset: i64,
    /// Metallicity offset applied to Z >= 3
    pub abscale: f64,
    /// Applied in order after the defaults; later entries win
    pub overrides: Vec<AbundanceOverride>,
    /// Explicit candidate species; empty means use `molset`'s list
    pub species: Vec<SpeciesCode>,
    /// Overrides the format's reference wavelength [Å]
    pub reference_wavelength: Option<f64>,
    /// Dump the canonical grid at info level after loading
    pub verbose: bool,
}

impl Default for LoadSettings {
    fn default() -> Self {
        Self {
            molset: 0,
            abscale: 0.0,
            overrides: Vec::new(),
            species: Vec::new(),
            reference_wavelength: None,
            verbose: false,
        }
    }
}

/// Drives the pipeline stages over one raw model.
///
/// Holds the external collaborators; the model state itself lives only in
/// the [`ModelAtmosphere`] a successful load returns.
pub struct ModelLoader {
    partitions: Box<dyn PartitionFunctionService>,
    equilibrium: Box<dyn EquilibriumSolver>,
    opacity: Box<dyn OpacityCalculator>,
    integrator: Box<dyn ColumnIntegrator>,
}

impl ModelLoader {
    pub fn new(
        partitions: Box<dyn PartitionFunctionService>,
        equilibrium: Box<dyn EquilibriumSolver>,
        opacity: Box<dyn OpacityCalculator>,
        integrator: Box<dyn ColumnIntegrator>,
    ) -> Self {
        Self {
            partitions,
            equilibrium,
            opacity,
            integrator,
        }
    }

    /// Loader wired to the built-in collaborators.
    pub fn with_builtin() -> Self {
        Self::new(
            Box::new(GroundStatePartitionFunctions::new()),
            Box::new(SahaEquilibrium::new()),
            Box::new(ThomsonScattering::new()),
            Box::new(TrapezoidIntegrator::new()),
        )
    }

    pub fn with_partitions(mut self, partitions: Box<dyn PartitionFunctionService>) -> Self {
        self.partitions = partitions;
        self
    }

    pub fn with_equilibrium(mut self, equilibrium: Box<dyn EquilibriumSolver>) -> Self {
        self.equilibrium = equilibrium;
        self
    }

    pub fn with_opacity(mut self, opacity: Box<dyn OpacityCalculator>) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_integrator(mut self, integrator: Box<dyn ColumnIntegrator>) -> Self {
        self.integrator = integrator;
        self
    }

    /// Load `raw` under format `tag`.
    ///
    /// Runs every stage in order. Any failure aborts the whole load and no
    /// model is returned.
    #[instrument(skip_all, fields(tag = tag.trim(), ntau = raw.ntau()))]
    pub fn load(
        &self,
        tag: &str,
        raw: &RawModel,
        settings: &LoadSettings,
    ) -> AtmosResult<ModelAtmosphere> {
        check_depth_count(raw.ntau())?;
        let format = ModelFormat::resolve(tag)?;
        let candidates = select_species(settings.molset, &settings.species)?;
        ensure_finite(settings.abscale, "abscale")?;
        for o in &settings.overrides {
            ensure_finite(o.log_eps, "abundance override")?;
        }

        let mut grid = DepthGrid::new(map_rows(raw, format.layout)?)?;
        for (i, layer) in grid.layers().iter().enumerate() {
            if !layer.t.is_finite() || layer.t <= 0.0 {
                return Err(AtmosError::NonPhysical {
                    what: "temperature",
                    layer: i,
                    value: layer.t,
                });
            }
        }

        let conversions = normalize_units(&mut grid);
        for (i, layer) in grid.layers().iter().enumerate() {
            if layer.pgas.is_nan() || layer.pgas <= 0.0 {
                return Err(AtmosError::NonPhysical {
                    what: "gas pressure",
                    layer: i,
                    value: layer.pgas,
                });
            }
        }

        let partitions = PartitionSet::compute(self.partitions.as_ref(), &grid.temperatures())?;

        let abundances = AbundanceTable::build(settings.abscale, &settings.overrides);
        let wtmol = mean_molecular_weight(&abundances);
        broadcast_molecular_weight(&mut grid, &format, wtmol);
        reconstruct_density(&mut grid, &format);
        solve_hydrogen_density(&mut grid, &abundances)?;

        let species = {
            let input = EquilibriumInput {
                grid: &grid,
                abundances: &abundances,
                partitions: &partitions,
            };
            solve_species(self.equilibrium.as_ref(), &input, &candidates)?
        };

        let reference_wavelength = match format.optical_depth {
            OpticalDepthStrategy::ReferenceOpacity => settings
                .reference_wavelength
                .or(format.reference_wavelength),
            OpticalDepthStrategy::IntegrateMassOpacity => None,
        };
        let tau_scale = reconstruct_optical_depth(
            &mut grid,
            &format,
            self.integrator.as_ref(),
            self.opacity.as_ref(),
            OpacityInputParts {
                abundances: &abundances,
                species: &species,
            },
            reference_wavelength,
        )?;

        debug!(
            format = %format.format,
            wtmol,
            ?tau_scale,
            "model loaded"
        );
        let model = ModelAtmosphere {
            format,
            grid,
            abundances,
            wtmol,
            partitions,
            candidates,
            species,
            conversions,
            tau_scale,
            reference_wavelength,
        };
        if settings.verbose {
            dump_grid(&model);
        }
        Ok(model)
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl std::fmt::Debug for ModelLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelLoader")
            .field("partitions", &self.partitions.name())
            .field("equilibrium", &self.equilibrium.name())
            .field("opacity", &self.opacity.name())
            .field("integrator", &self.integrator.name())
            .finish()
    }
}

fn dump_grid(model: &ModelAtmosphere) {
    info!(
        format = %model.format.format,
        ntau = model.ntau(),
        wtmol = model.wtmol,
        xhyd = model.abundances.xhyd(),
        "canonical model"
    );
    for (i, l) in model.grid.layers().iter().enumerate() {
        info!(
            layer = i,
            tauref = l.tauref,
            xref = l.xref,
            rhox = l.rhox,
            t = l.t,
            ne = l.ne,
            pgas = l.pgas,
            rho = l.rho,
            nhtot = l.nhtot,
            kapref = l.kapref,
            vturb = l.vturb,
            "layer"
        );
    }
}
