//! Gradient Puzzle Training
//!
//! Trains a small generator so that the image it produces matches a reference
//! pattern under the configured losses.
//!
//! ## Usage
//!
//! ```bash
//! # Train with default configuration
//! cargo run --bin puzzle
//!
//! # Match only the value distribution of a checkerboard, with the histogram loss
//! cargo run --bin puzzle -- --pattern checkerboard --strategy histogram
//!
//! # Train with WGPU backend
//! cargo run --bin puzzle --features wgpu --no-default-features
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gradient_puzzle_demos::{
    cli::{ArchitectureArg, PatternArg, RangeArg, StrategyArg},
    create_device, get_backend_name, init_tracing, run, PuzzleConfig, TrainingBackend,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the run summary as JSON to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Override the reference pattern
    #[arg(long, value_enum)]
    pattern: Option<PatternArg>,

    /// Override the distribution loss strategy
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Override the pixel value range of both generator and losses
    #[arg(long, value_enum)]
    range: Option<RangeArg>,

    /// Override the generator architecture
    #[arg(long, value_enum)]
    architecture: Option<ArchitectureArg>,

    /// Hidden layer width used with --architecture
    #[arg(long, default_value_t = 64)]
    hidden: usize,

    /// Override the number of training steps
    #[arg(long)]
    steps: Option<usize>,

    /// Override learning rate
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Override the smoothness weight
    #[arg(long)]
    smoothness: Option<f32>,

    /// Override the direction weight
    #[arg(long)]
    direction: Option<f32>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing("info")?;

    // Load configuration
    let mut config = if let Some(config_path) = &args.config {
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        PuzzleConfig::from_json(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?
    } else {
        PuzzleConfig::new()
    };

    // Apply command line overrides
    if let Some(pattern) = args.pattern {
        config.pattern = pattern.into();
    }
    if let Some(strategy) = args.strategy {
        config.loss.distribution.strategy = strategy.into();
    }
    if let Some(range) = args.range {
        config.loss.range = range.into();
        config.generator.range = range.into();
    }
    if let Some(architecture) = args.architecture {
        config.generator.architecture = architecture.resolve(args.hidden);
    }
    if let Some(steps) = args.steps {
        config.steps = steps;
    }
    if let Some(learning_rate) = args.learning_rate {
        config.learning_rate = learning_rate;
    }
    if let Some(smoothness) = args.smoothness {
        config.weights.smoothness = smoothness;
    }
    if let Some(direction) = args.direction {
        config.weights.direction = direction;
    }

    config.validate().context("Invalid puzzle configuration")?;

    let device = create_device();
    tracing::info!(backend = get_backend_name(), "device ready");

    let summary = run::<TrainingBackend>(&config, &device)?;

    if let Some(summary_path) = &args.summary {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(summary_path, json).with_context(|| {
            format!("Failed to write summary file: {}", summary_path.display())
        })?;
        tracing::info!(path = %summary_path.display(), "summary written");
    }

    Ok(())
}
