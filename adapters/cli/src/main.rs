#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Deadhold session from the terminal.

mod config;
mod input;
mod save_file;
mod simulation;

use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use deadhold_core::WELCOME_BANNER;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    config::AppConfig,
    input::Action,
    save_file::SaveFileError,
    simulation::{Simulation, TickInput},
};

const HELP: &str = "w/a/s/d move, f attack, e interact, b build, c cycle, u unlock, \
p pause, save, load, run N, q quit; an empty line waits one tick";

/// Survive the zombie horde one tick at a time.
#[derive(Debug, Parser)]
#[command(name = "deadhold", version)]
struct Cli {
    /// TOML file with optional `[world]` and `[waves]` tables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save file written by `save` and read by `load`.
    #[arg(long, default_value = "savegame.json")]
    save: PathBuf,

    /// Overrides the map and wave seeds.
    #[arg(long)]
    seed: Option<u64>,

    /// Restores the save file before the first tick.
    #[arg(long)]
    load: bool,
}

/// Entry point for the Deadhold command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.reseed(seed);
    }

    let mut simulation = Simulation::new(&config);
    if cli.load {
        load(&mut simulation, &cli.save);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{WELCOME_BANNER}")?;
    writeln!(out, "{HELP}")?;
    writeln!(out, "{}", simulation.status())?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let action = match input::parse(&line) {
            Ok(action) => action,
            Err(error) => {
                writeln!(out, "{error}. {HELP}")?;
                continue;
            }
        };

        match action {
            Action::Quit => break,
            Action::Tick(intent) => {
                advance(&mut simulation, intent, 1);
            }
            Action::Run(count) => {
                advance(&mut simulation, TickInput::default(), count);
            }
            Action::TogglePause => {
                let paused = simulation.toggle_pause();
                info!(paused, "pause toggled");
            }
            Action::Save => {
                if simulation.is_over() {
                    writeln!(out, "the dead cannot save")?;
                } else {
                    save_file::store(&cli.save, &simulation.snapshot())?;
                    info!(path = %cli.save.display(), "game saved");
                }
            }
            Action::Load => load(&mut simulation, &cli.save),
        }

        writeln!(out, "{}", simulation.status())?;
        if simulation.is_over() {
            writeln!(out, "game over. `load` to try again, `q` to quit")?;
        }
    }

    Ok(())
}

/// `RUST_LOG` when set and valid, `info` otherwise.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn advance(simulation: &mut Simulation, input: TickInput, ticks: u32) {
    if simulation.is_paused() {
        info!("paused, press p to resume");
        return;
    }
    for _ in 0..ticks {
        if simulation.is_over() {
            break;
        }
        let _ = simulation.step(input);
    }
}

fn load(simulation: &mut Simulation, path: &Path) {
    let snapshot = match save_file::load(path) {
        Ok(snapshot) => snapshot,
        Err(SaveFileError::NoValidSave(path)) => {
            warn!(path = %path.display(), "no valid save to load");
            return;
        }
        Err(error) => {
            warn!("save could not be read: {:#}", anyhow::Error::new(error));
            return;
        }
    };

    match simulation.restore(&snapshot) {
        Ok(()) => info!(path = %path.display(), "game loaded"),
        Err(error) => warn!(%error, "save rejected"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_level_is_not_overridden() {
        std::env::set_var(EnvFilter::DEFAULT_ENV, "debug");
        assert_eq!(log_filter().to_string(), "debug");

        std::env::remove_var(EnvFilter::DEFAULT_ENV);
        assert_eq!(log_filter().to_string(), "info");
    }
}
