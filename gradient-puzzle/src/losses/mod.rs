//! Loss functions for gradient puzzle training.
//!
//! Every loss takes images in the `[1, H, W, 1]` layout and returns a
//! single-element tensor that stays differentiable on autodiff backends.
//!
//! - [`PointwiseErrorLoss`]: pixel-by-pixel mean squared error.
//! - [`DistributionErrorLoss`]: compares value distributions and ignores where
//!   values sit in the image.
//! - [`SmoothnessPenalty`]: total-variation style regularizer.
//! - [`DirectionalPenalty`]: pulls the candidate towards a linear ramp.
//! - [`LossSuite`]: all of the above plus their weighted combination.

mod directional;
mod distribution;
mod pointwise;
mod smoothness;
mod suite;
mod validation;

pub use directional::{DirectionalPenalty, DirectionalPenaltyConfig};
pub use distribution::{DistributionErrorLoss, DistributionErrorLossConfig};
pub use pointwise::PointwiseErrorLoss;
pub use smoothness::SmoothnessPenalty;
pub use suite::{LossBreakdown, LossSuite, LossSuiteConfig, LossWeights};
pub use validation::{checked_scalar, validate_image, validate_pair};
