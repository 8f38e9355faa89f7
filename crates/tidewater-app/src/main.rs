//! tidewater: generate a partitioned island and export debug views.
//!
//! Run with: `cargo run -p tidewater-app -- --seed 42 --ascii`

mod output;
mod platform;
mod report;

use std::process::ExitCode;

use clap::Parser;
use tidewater_config::{CliArgs, Config, ConfigError};
use tidewater_worldgen::debug_viz::ExportError;
use tidewater_worldgen::{GenerationError, ParamsError, WorldGenerator, seed};
use tracing::{info, warn};

use crate::platform::{PlatformDirs, PlatformError};

/// Anything that stops a run.
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid world parameters: {0}")]
    Params(#[from] ParamsError),
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    let dirs = match &args.config {
        Some(dir) => PlatformDirs::with_config_dir(dir),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);

    if let Err(err) = tidewater_log::init_logging(
        Some(&dirs.log_dir),
        cfg!(debug_assertions),
        Some(&config),
    ) {
        eprintln!("warning: logging disabled: {err}");
    }

    let seed = match config.generation.seed {
        Some(seed) => seed,
        None => {
            let seed = seed::random_seed();
            info!(seed, "No seed configured, drew a fresh one");
            seed
        }
    };

    let generator = WorldGenerator::new(config.world.clone(), config.generation.options())?;
    let world = generator.generate(seed)?;

    print!("{}", report::summary(&world));
    if config.output.ascii {
        print!("{}", world.map.render_ascii());
    }

    let unplaced = world.markers.iter().filter(|m| m.chunk.is_none()).count();
    if unplaced > 0 {
        warn!(unplaced, "Some ring markers found no eligible chunk");
    }

    for path in output::write_images(&world, &config.output)? {
        println!("wrote {}", path.display());
    }
    Ok(())
}
