//! Total-variation style smoothness penalty.

use burn::{prelude::*, tensor::Tensor};
use burn_extra_ops::ImageTensorOps;

use super::validation::{checked_scalar, validate_image};
use crate::error::LossResult;

/// Penalizes squared differences between neighboring pixels.
///
/// The penalty is `(mean(dx^2) + mean(dy^2)) / 2`, where `dx` is the difference
/// to the right neighbor and `dy` the difference to the bottom neighbor. It is
/// zero for any constant image and does not look at a reference.
#[derive(Clone, Debug, Default)]
pub struct SmoothnessPenalty;

impl SmoothnessPenalty {
    /// Create a new smoothness penalty.
    pub const fn new() -> Self {
        Self
    }

    /// Calculate the smoothness penalty of `candidate`.
    ///
    /// # Shapes
    /// - candidate: `[1, H, W, 1]` with `H, W >= 2`
    /// - output: `[1]`
    pub fn forward<B: Backend>(&self, candidate: Tensor<B, 4>) -> LossResult<Tensor<B, 1>> {
        let loss = self.forward_unchecked(candidate)?;
        checked_scalar("smoothness", &loss)?;
        Ok(loss)
    }

    pub(crate) fn forward_unchecked<B: Backend>(
        &self,
        candidate: Tensor<B, 4>,
    ) -> LossResult<Tensor<B, 1>> {
        validate_image(&candidate)?;

        let dx = candidate
            .clone()
            .horizontal_differences()
            .powf_scalar(2.0)
            .mean();
        let dy = candidate.vertical_differences().powf_scalar(2.0).mean();

        Ok((dx + dy).div_scalar(2.0))
    }
}
