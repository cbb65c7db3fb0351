//! TAPESCOPE - viewer entry point.
//!
//! Interactive viewer for sparse-tape machine simulations.

use clap::Parser;
use std::path::PathBuf;

use tapescope::gui::run_gui;
use tapescope::{Config, Program, TapeModel, TurmiteModel};

#[derive(Parser)]
#[command(name = "tapescope")]
#[command(version)]
#[command(about = "Interactive viewer and control surface for sparse-tape machine simulations")]
struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, default_value = "tapescope.yaml")]
    config: PathBuf,

    /// Symbol image directory (overrides the config file)
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Machine program file; may be given several times.
    /// Without any, a built-in demo pair is loaded.
    #[arg(short, long)]
    machine: Vec<PathBuf>,

    /// Target tick rate at startup (overrides the config file)
    #[arg(long)]
    rate: Option<f64>,

    /// Start with the clock paused
    #[arg(long)]
    paused: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Load config or use default
    let mut config = if cli.config.exists() {
        log::info!("Loading config from: {:?}", cli.config);
        Config::from_file(&cli.config)?
    } else {
        log::info!("Using default configuration");
        Config::default()
    };

    if let Some(assets) = cli.assets {
        config.assets.symbol_dir = assets;
    }
    if let Some(rate) = cli.rate {
        config.clock.start_rate = rate;
    }
    if cli.paused {
        config.clock.start_paused = true;
    }
    config.validate()?;

    let model = build_model(&cli.machine)?;

    log::info!("Starting TAPESCOPE");
    log::info!("Machines: {}", model.machines().len());
    log::info!("Symbol directory: {:?}", config.assets.symbol_dir);

    run_gui(config, Box::new(model))?;
    Ok(())
}

/// Load the given machine programs, or the built-in demo when none are given.
/// Machines start on a diagonal so they do not overlap immediately.
fn build_model(programs: &[PathBuf]) -> Result<TurmiteModel, Box<dyn std::error::Error>> {
    if programs.is_empty() {
        let model = TurmiteModel::demo();
        log::info!("No machine programs given, loading demo machines");
        return Ok(model);
    }

    let mut model = TurmiteModel::new();
    for (i, path) in programs.iter().enumerate() {
        let program = Program::from_file(path)
            .map_err(|e| format!("machine program {:?}: {}", path, e))?;
        log::info!("Loaded machine program '{}'", program.name());
        model.add_machine(program, (i as i64 * 12, i as i64 * 6));
    }
    Ok(model)
}
