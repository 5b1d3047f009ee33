//! # lpa CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lpa_cli::application::{run_application, ApplicationArgs};
use lpa_cli::config::load_witness_config;
use lpa_cli::journey::{run_journey, JourneyArgs};
use lpa_cli::witness::{run_witness, WitnessArgs};
use lpa_cli::DEFAULT_STATE_DIR;

/// Keep an LPA application's task list, change hashes and navigation
/// consistent as the donor edits it.
#[derive(Parser, Debug)]
#[command(name = "lpa", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML witness code configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding application JSON files.
    #[arg(long, global = true, default_value = DEFAULT_STATE_DIR)]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create, import, reconcile and inspect applications.
    Application(ApplicationArgs),

    /// Check whether pages and URLs are open to the donor.
    Journey(JourneyArgs),

    /// Issue and verify witness codes.
    Witness(WitnessArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!(state_dir = %cli.state_dir.display(), "lpa CLI starting");

    let result = match cli.command {
        Commands::Application(args) => run_application(&args, &cli.state_dir),
        Commands::Journey(args) => run_journey(&args, &cli.state_dir),
        Commands::Witness(args) => load_witness_config(cli.config.as_deref())
            .and_then(|config| run_witness(&args, &cli.state_dir, &config)),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
