//! Gradient Puzzle Demos
//!
//! This crate drives the gradient puzzle losses from the command line.
//!
//! ## Available Demos
//!
//! - `puzzle`: Train a generator until its image matches a reference pattern
//! - `compare`: Evaluate every loss between two reference patterns
//!
//! ## Usage
//!
//! ```bash
//! # Distribution matching against a ramp with a little smoothing
//! cargo run --bin puzzle -- --pattern ramp --smoothness 0.1
//!
//! # Run from a configuration file and write a JSON summary
//! cargo run --bin puzzle -- --config puzzle.json --summary summary.json
//!
//! # A scrambled ramp has the ramp's distribution but not its layout
//! cargo run --bin compare -- --reference ramp --candidate scrambled
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod logging;
pub mod runner;

// Re-export commonly used items
pub use backend::{
    create_device, get_backend_name, SelectedBackend, SelectedDevice, TrainingBackend,
};
pub use config::PuzzleConfig;
pub use logging::init_tracing;
pub use runner::{run, RunSummary};
