//! Differentiable losses for gradient puzzles.
//!
//! A gradient puzzle trains a small generator network until the image it
//! produces matches a reference image. What "matches" means is chosen by the
//! loss: the pointwise error wants every pixel in place, while the distribution
//! error only asks for the same set of values, wherever they are. Smoothness and
//! directional penalties shape the arrangement on top of that.
//!
//! ```rust,ignore
//! use gradient_puzzle::{LossSuiteConfig, LossWeights};
//!
//! let suite = LossSuiteConfig::new().init()?;
//! let weights = LossWeights::new().with_smoothness(0.1);
//! let loss = suite.combined_loss(reference, candidate, &weights)?;
//! ```

mod config;
mod error;
mod losses;
mod model;
mod patterns;
pub mod training;


pub use config::*;
pub use error::{LossError, LossResult};
pub use losses::*;
pub use model::{Generator, GeneratorConfig, GeneratorRecord};
pub use patterns::Pattern;
