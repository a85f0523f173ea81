//! Penalty pulling an image towards a linear ramp.

use burn::{prelude::*, tensor::Tensor};
use burn_extra_ops::linear_ramp;

use super::validation::{checked_scalar, validate_image};
use crate::{
    config::{RampAxis, ValueRange},
    error::LossResult,
};

/// Configuration for the [`DirectionalPenalty`].
#[derive(Config, Debug)]
pub struct DirectionalPenaltyConfig {
    /// Axis the ideal ramp rises along.
    #[config(default = "RampAxis::Horizontal")]
    pub axis: RampAxis,
}

impl DirectionalPenaltyConfig {
    /// Initialize a new directional penalty whose ramp spans `range`.
    pub fn init(&self, range: &ValueRange) -> DirectionalPenalty {
        DirectionalPenalty {
            axis: self.axis.clone(),
            low: range.low(),
            high: range.high(),
        }
    }
}

/// Mean squared difference between an image and the ideal linear ramp.
///
/// The ramp runs from the low end of the value range on one edge to the high
/// end on the opposite edge, so the penalty rewards one global gradient
/// orientation regardless of any reference.
#[derive(Clone, Debug)]
pub struct DirectionalPenalty {
    axis: RampAxis,
    low: f64,
    high: f64,
}

impl DirectionalPenalty {
    /// The ideal ramp for an image of the given size.
    pub fn ideal<B: Backend>(
        &self,
        height: usize,
        width: usize,
        device: &B::Device,
    ) -> Tensor<B, 4> {
        linear_ramp(&self.axis, self.low, self.high, height, width, device)
    }

    /// Calculate the directional penalty of `candidate`.
    ///
    /// # Shapes
    /// - candidate: `[1, H, W, 1]` with `H, W >= 2`
    /// - output: `[1]`
    pub fn forward<B: Backend>(&self, candidate: Tensor<B, 4>) -> LossResult<Tensor<B, 1>> {
        let loss = self.forward_unchecked(candidate)?;
        checked_scalar("directional", &loss)?;
        Ok(loss)
    }

    pub(crate) fn forward_unchecked<B: Backend>(
        &self,
        candidate: Tensor<B, 4>,
    ) -> LossResult<Tensor<B, 1>> {
        let (height, width) = validate_image(&candidate)?;
        let ideal = self.ideal(height, width, &candidate.device());

        Ok((candidate - ideal).powf_scalar(2.0).mean())
    }
}
