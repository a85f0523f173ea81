//! Distribution (quantile) matching loss.
//!
//! Two strategies implement the same contract: the loss is zero whenever both
//! images hold the same multiset of pixel values, wherever those values sit.
//!
//! - [`DistributionStrategy::Sorted`] sorts both images and takes the mean
//!   squared difference of the sorted sequences. Gradients reach each pixel
//!   through the rank it was sorted into.
//! - [`DistributionStrategy::SoftHistogram`] bins both images with a
//!   sigmoid-smoothed histogram and measures `sum(p * ln((p + eps) / (q + eps)))`
//!   between the reference occupancy `p` and the candidate occupancy `q`.

use burn::{prelude::*, tensor::Tensor};
use burn_extra_ops::{ImageTensorOps, SoftHistogram, SoftHistogramConfig};

use super::validation::{checked_scalar, validate_pair};
use crate::{
    config::{DistributionStrategy, ValueRange},
    error::{LossError, LossResult},
};

/// Configuration for the [`DistributionErrorLoss`].
#[derive(Config, Debug)]
pub struct DistributionErrorLossConfig {
    #[config(default = "DistributionStrategy::Sorted")]
    pub strategy: DistributionStrategy,
    /// Histogram bins, used by the soft histogram strategy.
    #[config(default = 32)]
    pub bins: usize,
    /// Sigmoid transition width at bin edges, in value units.
    #[config(default = 0.01)]
    pub bandwidth: f64,
    /// Added to both occupancies before the log ratio.
    #[config(default = 1e-8)]
    pub epsilon: f64,
}

impl DistributionErrorLossConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> LossResult<()> {
        if self.bins == 0 {
            return Err(LossError::InvalidConfiguration {
                reason: "distribution histogram needs at least one bin".to_string(),
            });
        }
        if !(self.bandwidth.is_finite() && self.bandwidth > 0.0) {
            return Err(LossError::InvalidConfiguration {
                reason: format!(
                    "histogram bandwidth must be positive, got {}",
                    self.bandwidth
                ),
            });
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(LossError::InvalidConfiguration {
                reason: format!("histogram epsilon must be positive, got {}", self.epsilon),
            });
        }
        Ok(())
    }

    /// Initialize a new distribution error loss for images in `range`.
    pub fn init(&self, range: &ValueRange) -> LossResult<DistributionErrorLoss> {
        self.validate()?;

        Ok(DistributionErrorLoss {
            strategy: self.strategy.clone(),
            epsilon: self.epsilon,
            histogram: SoftHistogramConfig::new(range.low(), range.high())
                .with_bins(self.bins)
                .with_bandwidth(self.bandwidth)
                .init(),
        })
    }
}

/// Distribution matching loss, invariant to spatial permutations.
#[derive(Clone, Debug)]
pub struct DistributionErrorLoss {
    strategy: DistributionStrategy,
    epsilon: f64,
    histogram: SoftHistogram,
}

impl DistributionErrorLoss {
    /// The strategy this loss was configured with.
    pub const fn strategy(&self) -> &DistributionStrategy {
        &self.strategy
    }

    /// Calculate the distribution error.
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
        checked_scalar("distribution", &loss)?;
        Ok(loss)
    }

    pub(crate) fn forward_unchecked<B: Backend>(
        &self,
        reference: Tensor<B, 4>,
        candidate: Tensor<B, 4>,
    ) -> LossResult<Tensor<B, 1>> {
        validate_pair(&reference, &candidate)?;

        Ok(match self.strategy {
            DistributionStrategy::Sorted => Self::sorted(reference, candidate),
            DistributionStrategy::SoftHistogram => self.soft_histogram(reference, candidate),
        })
    }

    fn sorted<B: Backend>(reference: Tensor<B, 4>, candidate: Tensor<B, 4>) -> Tensor<B, 1> {
        (candidate.sort_pixels() - reference.sort_pixels())
            .powf_scalar(2.0)
            .mean()
    }

    fn soft_histogram<B: Backend>(
        &self,
        reference: Tensor<B, 4>,
        candidate: Tensor<B, 4>,
    ) -> Tensor<B, 1> {
        let p = self
            .histogram
            .distribution(reference.flatten_pixels(), self.epsilon);
        let q = self
            .histogram
            .distribution(candidate.flatten_pixels(), self.epsilon);

        let ratio = p.clone().add_scalar(self.epsilon) / q.add_scalar(self.epsilon);
        (p * ratio.log()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{ndarray::NdArray, Autodiff};

    type TestBackend = NdArray<f32>;
    type TestAutodiffBackend = Autodiff<NdArray<f32>>;

    fn ramp_4x4<B: Backend>(reversed: bool) -> Tensor<B, 4> {
        let mut values: Vec<f32> = (0..16).map(|i| i as f32 / 15.0).collect();
        if reversed {
            values.reverse();
        }
        Tensor::<B, 1>::from_floats(values.as_slice(), &Default::default()).reshape([1, 4, 4, 1])
    }

    fn loss(strategy: DistributionStrategy) -> DistributionErrorLoss {
        DistributionErrorLossConfig::new()
            .with_strategy(strategy)
            .init(&ValueRange::Unit)
            .unwrap()
    }

    #[test]
    fn test_distribution_config() {
        let config = DistributionErrorLossConfig::new()
            .with_strategy(DistributionStrategy::SoftHistogram)
            .with_bins(64)
            .with_bandwidth(0.005);
        assert_eq!(config.strategy, DistributionStrategy::SoftHistogram);
        assert_eq!(config.bins, 64);
        assert_eq!(config.bandwidth, 0.005);
        assert_eq!(config.epsilon, 1e-8);
    }

    #[test]
    fn test_distribution_config_rejects_zero_bins() {
        let result = DistributionErrorLossConfig::new()
            .with_bins(0)
            .init(&ValueRange::Unit);

        match result {
            Err(LossError::InvalidConfiguration { reason }) => {
                assert!(reason.contains("at least one bin"));
            }
            other => panic!("Expected InvalidConfiguration error, got {other:?}"),
        }
    }

    #[test]
    fn test_sorted_identical_is_zero() {
        let image = Tensor::<TestBackend, 4>::random(
            [1, 6, 5, 1],
            burn::tensor::Distribution::Uniform(0.0, 1.0),
            &Default::default(),
        );

        let value = loss(DistributionStrategy::Sorted)
            .forward(image.clone(), image)
            .unwrap()
            .into_scalar();
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_sorted_ignores_arrangement() {
        let reference = ramp_4x4::<TestBackend>(false);
        let candidate = ramp_4x4::<TestBackend>(true);

        let value = loss(DistributionStrategy::Sorted)
            .forward(reference, candidate)
            .unwrap()
            .into_scalar();
        assert!(value.abs() < 1e-6);
    }

    #[test]
    fn test_sorted_known_value() {
        let device = Default::default();
        let reference = Tensor::<TestBackend, 1>::from_floats([0.0, 0.2, 0.4, 0.6], &device)
            .reshape([1, 2, 2, 1]);
        // Same ranks, every value shifted by 0.1.
        let candidate = Tensor::<TestBackend, 1>::from_floats([0.7, 0.5, 0.3, 0.1], &device)
            .reshape([1, 2, 2, 1]);

        let value = loss(DistributionStrategy::Sorted)
            .forward(reference, candidate)
            .unwrap()
            .into_scalar();
        assert!((value - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_soft_histogram_identical_is_zero() {
        let image = Tensor::<TestBackend, 4>::random(
            [1, 4, 4, 1],
            burn::tensor::Distribution::Uniform(0.0, 1.0),
            &Default::default(),
        );

        let value = loss(DistributionStrategy::SoftHistogram)
            .forward(image.clone(), image)
            .unwrap()
            .into_scalar();
        assert!(value.abs() < 1e-6);
    }

    #[test]
    fn test_soft_histogram_ignores_arrangement() {
        let value = loss(DistributionStrategy::SoftHistogram)
            .forward(ramp_4x4::<TestBackend>(false), ramp_4x4::<TestBackend>(true))
            .unwrap()
            .into_scalar();
        assert!(value.abs() < 1e-5);
    }

    #[test]
    fn test_soft_histogram_detects_different_distribution() {
        let device = Default::default();
        let dark = Tensor::<TestBackend, 4>::full([1, 4, 4, 1], 0.1, &device);
        let bright = Tensor::<TestBackend, 4>::full([1, 4, 4, 1], 0.9, &device);

        let value = loss(DistributionStrategy::SoftHistogram)
            .forward(dark, bright)
            .unwrap()
            .into_scalar();
        assert!(value > 1.0, "expected a large divergence, got {value}");
    }

    #[test]
    fn test_sorted_gradient_reaches_candidate() {
        let device = Default::default();
        let reference = ramp_4x4::<TestAutodiffBackend>(false);
        let candidate =
            Tensor::<TestAutodiffBackend, 4>::full([1, 4, 4, 1], 0.5, &device).require_grad();

        let value = loss(DistributionStrategy::Sorted)
            .forward(reference, candidate.clone())
            .unwrap();
        let grads = value.backward();
        let grad = candidate.grad(&grads).unwrap();

        let magnitude = grad.abs().sum().into_scalar();
        assert!(magnitude > 0.0);
    }
}
