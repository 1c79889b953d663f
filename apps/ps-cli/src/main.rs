mod error;
mod logging;

use clap::{Parser, Subcommand};
use error::Result;
use ps_atmos::moog::{read_model_file, write_model_file};
use ps_atmos::{AtmosphereSession, ModelAtmosphere, ModelLoader};
use ps_config::RunConfig;
use ps_species::{MolSet, TrackedSpecies};
use std::path::{Path, PathBuf};
use tracing::info;
use uom::si::mass_density::kilogram_per_cubic_meter;
use uom::si::pressure::pascal;
use uom::si::thermodynamic_temperature::kelvin;
use uom::si::velocity::kilometer_per_second;

#[derive(Parser)]
#[command(name = "ps-cli")]
#[command(about = "Photosphere CLI - model atmosphere loading and inspection", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Disable logging
    #[arg(short, long, global = true)]
    quiet: bool,
    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a MOOG model and print the canonical depth grid
    Load {
        /// Path to the MOOG model file
        model_path: PathBuf,
        /// Run configuration (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the configured species list switch
        #[arg(long)]
        molset: Option<i64>,
        /// Print SI units instead of CGS
        #[arg(long)]
        si: bool,
    },
    /// Validate a run configuration file
    Validate {
        /// Path to the configuration file
        config_path: PathBuf,
    },
    /// List the candidate species for a species list switch
    Species {
        #[arg(long, default_value_t = 0)]
        molset: i64,
    },
    /// Rewrite a MOOG model in canonical column layout
    Convert {
        input: PathBuf,
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file)?;

    match cli.command {
        Commands::Load {
            model_path,
            config,
            molset,
            si,
        } => cmd_load(&model_path, config.as_deref(), molset, si),
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Species { molset } => cmd_species(molset),
        Commands::Convert { input, output } => cmd_convert(&input, &output),
    }
}

fn cmd_load(model_path: &Path, config: Option<&Path>, molset: Option<i64>, si: bool) -> Result<()> {
    let moog = read_model_file(model_path)?;
    let mut config = match config {
        Some(path) => ps_config::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(molset) = molset {
        config.molset = molset;
    }
    let settings = config.settings_for(&moog)?;

    let mut session = AtmosphereSession::new(ModelLoader::with_builtin());
    let model = session.load(moog.format.tag(), &moog.raw, &settings)?;
    info!(path = %model_path.display(), "loaded {}", moog.description);

    print_summary(model);
    if si {
        print_grid_si(model);
    } else {
        print_grid_cgs(model);
    }
    Ok(())
}

fn print_summary(model: &ModelAtmosphere) {
    println!("Format: {}", model.format.format);
    println!("  Depth points: {}", model.ntau());
    println!("  Mean molecular weight: {:.4}", model.wtmol);
    println!("  Candidate species: {}", model.candidates.len());
    println!("  Optical depth scale: {:?}", model.tau_scale);
    if let Some(wavelength) = model.reference_wavelength {
        println!("  Reference wavelength: {wavelength:.1} Å");
    }
    let c = model.conversions;
    println!(
        "  Conversions: pgas_from_log={} ne_from_log={} ne_from_pressure={}",
        c.pgas_from_log, c.ne_from_log, c.ne_from_pressure
    );
}

fn print_grid_cgs(model: &ModelAtmosphere) {
    println!(
        "{:>4} {:>11} {:>9} {:>11} {:>11} {:>11} {:>11} {:>11}",
        "i", "tauref", "T[K]", "Pgas", "Ne", "rho", "nhtot", "kapref"
    );
    for (i, l) in model.grid.layers().iter().enumerate() {
        println!(
            "{:>4} {:>11.4e} {:>9.1} {:>11.4e} {:>11.4e} {:>11.4e} {:>11.4e} {:>11.4e}",
            i, l.tauref, l.t, l.pgas, l.ne, l.rho, l.nhtot, l.kapref
        );
    }
}

fn print_grid_si(model: &ModelAtmosphere) {
    println!(
        "{:>4} {:>11} {:>9} {:>11} {:>11} {:>8}",
        "i", "tauref", "T[K]", "Pgas[Pa]", "rho[kg/m3]", "vt[km/s]"
    );
    for (i, l) in model.grid.layers().iter().enumerate() {
        println!(
            "{:>4} {:>11.4e} {:>9.1} {:>11.4e} {:>11.4e} {:>8.3}",
            i,
            l.tauref,
            l.temperature().get::<kelvin>(),
            l.gas_pressure().get::<pascal>(),
            l.density().get::<kilogram_per_cubic_meter>(),
            l.microturbulence().get::<kilometer_per_second>(),
        );
    }
}

fn cmd_validate(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {}", config_path.display());
    ps_config::load(config_path)?;
    println!("✓ Configuration is valid");
    Ok(())
}

fn cmd_species(molset: i64) -> Result<()> {
    let candidates = ps_atmos::equilibrium::select_species(molset, &[])?;
    let set = MolSet::from_switch(molset).map_or("?", |s| match s {
        MolSet::Default => "default",
        MolSet::Extended => "extended",
    });
    println!("Species list {molset} ({set}, {} entries):", candidates.len());
    for code in &candidates {
        let tracked = TrackedSpecies::ALL.iter().any(|t| t.candidate() == *code);
        let marker = if tracked { "*" } else { " " };
        println!(" {marker} {:>9}  {}", code.to_string(), code.label());
    }
    println!("(* tracked for continuum opacity)");
    Ok(())
}

fn cmd_convert(input: &Path, output: &Path) -> Result<()> {
    let model = read_model_file(input)?;
    write_model_file(&model, output)?;
    println!(
        "✓ Wrote {} ({} layers, {})",
        output.display(),
        model.raw.ntau(),
        model.format
    );
    Ok(())
}
