//! The full loss suite and its weighted combination.
//!
//! `combined = distribution + smoothness_weight * smoothness + direction_weight * direction`
//!
//! Terms with a zero weight are never evaluated, so the default weights reduce
//! the combination to the plain distribution error. Terms are not normalized
//! against each other; weights are expected to be tuned to compatible scales.

use burn::{prelude::*, tensor::Tensor};

use super::{
    directional::{DirectionalPenalty, DirectionalPenaltyConfig},
    distribution::{DistributionErrorLoss, DistributionErrorLossConfig},
    pointwise::PointwiseErrorLoss,
    smoothness::SmoothnessPenalty,
    validation::checked_scalar,
};
use crate::{
    config::ValueRange,
    error::{LossError, LossResult},
};

/// Relative weights of the regularizers in [`LossSuite::combined_loss`].
///
/// Weights may change between any two training steps; they are read once per call.
#[derive(Config, Debug, PartialEq)]
pub struct LossWeights {
    #[config(default = 0.0)]
    pub smoothness: f32,
    #[config(default = 0.0)]
    pub direction: f32,
}

impl LossWeights {
    /// Checks that both weights are finite and non-negative.
    pub fn validate(&self) -> LossResult<()> {
        for (name, weight) in [("smoothness", self.smoothness), ("direction", self.direction)] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(LossError::InvalidConfiguration {
                    reason: format!("{name} weight must be finite and non-negative, got {weight}"),
                });
            }
        }
        Ok(())
    }
}

/// Host-side values of every term of a combined loss.
///
/// Weighted terms are `None` when their weight was zero and they were skipped.
/// Regularizer values are unweighted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LossBreakdown {
    pub total: f64,
    pub distribution: f64,
    pub smoothness: Option<f64>,
    pub direction: Option<f64>,
}

/// Configuration for the [`LossSuite`].
#[derive(Config, Debug)]
pub struct LossSuiteConfig {
    /// Value range of the compared images.
    #[config(default = "ValueRange::Unit")]
    pub range: ValueRange,
    #[config(default = "DistributionErrorLossConfig::new()")]
    pub distribution: DistributionErrorLossConfig,
    #[config(default = "DirectionalPenaltyConfig::new()")]
    pub directional: DirectionalPenaltyConfig,
}

impl LossSuiteConfig {
    /// Initialize a new loss suite with the given configuration.
    pub fn init(&self) -> LossResult<LossSuite> {
        Ok(LossSuite {
            pointwise: PointwiseErrorLoss::new(),
            distribution: self.distribution.init(&self.range)?,
            smoothness: SmoothnessPenalty::new(),
            directional: self.directional.init(&self.range),
        })
    }
}

/// Every gradient puzzle loss behind one stateless interface.
///
/// All operations are pure functions of their inputs. Image arguments must be
/// `[1, H, W, 1]` tensors with `H, W >= 2`; paired images must share a shape.
#[derive(Clone, Debug)]
pub struct LossSuite {
    pointwise: PointwiseErrorLoss,
    distribution: DistributionErrorLoss,
    smoothness: SmoothnessPenalty,
    directional: DirectionalPenalty,
}

impl LossSuite {
    /// Pixel-by-pixel mean squared error.
    pub fn pointwise_error<B: Backend>(
        &self,
        reference: Tensor<B, 4>,
        candidate: Tensor<B, 4>,
    ) -> LossResult<Tensor<B, 1>> {
        self.pointwise.forward(reference, candidate)
    }

    /// Distribution matching error, zero for any rearrangement of the reference.
    pub fn distribution_error<B: Backend>(
        &self,
        reference: Tensor<B, 4>,
        candidate: Tensor<B, 4>,
    ) -> LossResult<Tensor<B, 1>> {
        self.distribution.forward(reference, candidate)
    }

    /// Neighbor-difference penalty of `candidate`.
    pub fn smoothness_penalty<B: Backend>(
        &self,
        candidate: Tensor<B, 4>,
    ) -> LossResult<Tensor<B, 1>> {
        self.smoothness.forward(candidate)
    }

    /// Distance of `candidate` from the configured ideal ramp.
    pub fn directional_penalty<B: Backend>(
        &self,
        candidate: Tensor<B, 4>,
    ) -> LossResult<Tensor<B, 1>> {
        self.directional.forward(candidate)
    }

    /// Weighted sum of the distribution error and the regularizers.
    pub fn combined_loss<B: Backend>(
        &self,
        reference: Tensor<B, 4>,
        candidate: Tensor<B, 4>,
        weights: &LossWeights,
    ) -> LossResult<Tensor<B, 1>> {
        self.combined_loss_with_breakdown(reference, candidate, weights)
            .map(|(loss, _)| loss)
    }

    /// Same as [`combined_loss`](Self::combined_loss), also returning every term's value.
    pub fn combined_loss_with_breakdown<B: Backend>(
        &self,
        reference: Tensor<B, 4>,
        candidate: Tensor<B, 4>,
        weights: &LossWeights,
    ) -> LossResult<(Tensor<B, 1>, LossBreakdown)> {
        weights.validate()?;

        let mut loss = self
            .distribution
            .forward_unchecked(reference, candidate.clone())?;
        let mut breakdown = LossBreakdown {
            distribution: checked_scalar("distribution", &loss)?,
            ..LossBreakdown::default()
        };

        if weights.smoothness > 0.0 {
            let term = self.smoothness.forward_unchecked(candidate.clone())?;
            breakdown.smoothness = Some(checked_scalar("smoothness", &term)?);
            loss = loss + term.mul_scalar(weights.smoothness);
        }

        if weights.direction > 0.0 {
            let term = self.directional.forward_unchecked(candidate)?;
            breakdown.direction = Some(checked_scalar("directional", &term)?);
            loss = loss + term.mul_scalar(weights.direction);
        }

        breakdown.total = checked_scalar("combined", &loss)?;
        tracing::trace!(
            total = breakdown.total,
            distribution = breakdown.distribution,
            "combined loss evaluated"
        );

        Ok((loss, breakdown))
    }
}
