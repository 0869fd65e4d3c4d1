//! LEM bridge exporter
//!
//! Loads the persisted drive state from a state directory and prints the
//! bridge export, or the full state report as JSON. Read-only: the state
//! record is never written.

use anyhow::{bail, Context, Result};
use clap::Parser;
use lem_core::{config, init_logging, LemConfig, LemEngine, LoadOutcome};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the persisted state (defaults to LEM_STATE_DIR)
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// File name of the state record
    #[arg(long, default_value = config::DEFAULT_STATE_FILE)]
    state_file: String,

    /// Print the state report as JSON instead of the text export
    #[arg(long)]
    json: bool,

    /// Load environment variables from this file instead of ./.env
    #[arg(long)]
    env_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.env_file {
        Some(path) => config::load_env_from_path(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => config::load_env()?,
    }
    init_logging();

    let state_dir = match cli.state_dir {
        Some(dir) => dir,
        None => PathBuf::from(config::get_required_env("LEM_STATE_DIR")?),
    };
    if !state_dir.is_dir() {
        bail!("state directory {} does not exist", state_dir.display());
    }

    let config = LemConfig::new(&state_dir).with_state_file(cli.state_file);
    let engine = LemEngine::new(config).context("failed to open LEM state")?;

    match engine.load_outcome() {
        LoadOutcome::Fresh => eprintln!("note: no saved state found, showing defaults"),
        LoadOutcome::Discarded { reason } => {
            eprintln!("note: saved state was discarded ({}), showing defaults", reason)
        }
        LoadOutcome::Restored { interaction_count } => {
            tracing::debug!(interaction_count, "lem-bridge: loaded state");
        }
    }

    if cli.json {
        let report = serde_json::to_string_pretty(&engine.current_state())?;
        println!("{}", report);
    } else {
        println!("{}", engine.bridge_export());
    }

    Ok(())
}
