//! Mean Squared Error between corresponding pixels.

use burn::{prelude::*, tensor::Tensor};

use super::validation::{checked_scalar, validate_pair};
use crate::error::LossResult;

/// Pixel-by-pixel mean squared error.
///
/// Any positional mismatch is penalized, even when both images hold the same
/// multiset of values.
#[derive(Clone, Debug, Default)]
pub struct PointwiseErrorLoss;

impl PointwiseErrorLoss {
    /// Create a new pointwise error loss.
    pub const fn new() -> Self {
        Self
    }

    /// Calculate the pointwise error.
    ///
    /// # Shapes
    /// - reference: `[1, H, W, 1]`
    /// - candidate: `[1, H, W, 1]`
    /// - output: `[1]`
    pub fn forward<B: Backend>(
        &self,
        reference: Tensor<B, 4>,
        candidate: Tensor<B, 4>,
    ) -> LossResult<Tensor<B, 1>> {
        let loss = self.forward_unchecked(reference, candidate)?;
        checked_scalar("pointwise", &loss)?;
        Ok(loss)
    }

    /// Calculate the pointwise error without reading the result back for a finiteness check.
    pub(crate) fn forward_unchecked<B: Backend>(
        &self,
        reference: Tensor<B, 4>,
        candidate: Tensor<B, 4>,
    ) -> LossResult<Tensor<B, 1>> {
        validate_pair(&reference, &candidate)?;
        Ok((candidate - reference).powf_scalar(2.0).mean())
    }
}
