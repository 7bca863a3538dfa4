#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tilecycle::{Config, EngineBuilder};
use tracing_subscriber::EnvFilter;

/// Full-window grid of color-cycling tiles. Scroll, drag or middle-drag to
/// change the redraw interval.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// RON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting redraw interval in milliseconds (10-1000)
    #[arg(long)]
    interval: Option<u32>,

    /// Show the current interval in the window title
    #[arg(long)]
    readout: bool,

    /// Seed for tile color selection
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(interval) = args.interval {
        config.animation.interval_ms = interval;
    }
    if args.readout {
        config.animation.readout = true;
    }
    if let Some(seed) = args.seed {
        config.animation.seed = Some(seed);
    }

    let mut engine = EngineBuilder::from_config(&config)
        .build()
        .context("opening window")?;
    engine.run();

    Ok(())
}
