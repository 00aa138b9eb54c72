//! Beast Arena battle simulator entry point.

use std::process::ExitCode;

use beastarena_core::clock::SystemClock;
use beastarena_core::rng::SeededRng;
use beastarena_sim::config::SimConfig;
use beastarena_sim::error::AppError;
use beastarena_sim::simulation::run_simulation;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "simulation failed");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run() -> Result<(), AppError> {
    let config = SimConfig::from_env()?;
    tracing::info!(
        catalog = %config.catalog_path.display(),
        roster = %config.roster_path.display(),
        seed = ?config.seed,
        "Starting Beast Arena simulation"
    );

    let mut rng = config
        .seed
        .map_or_else(SeededRng::from_entropy, SeededRng::from_seed);
    let report = run_simulation(&config, &SystemClock, &mut rng)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
