//! # Soft Histogram
//!
//! A histogram whose bin counts are differentiable with respect to the binned
//! values. Hard bin membership is a box function `step(x - left) - step(x - right)`;
//! here each step is replaced by a sigmoid whose steepness is set by `bandwidth`.
//!
//! Counts only depend on the multiset of values, never on their order.

use burn::{prelude::*, tensor::activation};

/// Configuration for the [`SoftHistogram`].
#[derive(Config, Debug)]
pub struct SoftHistogramConfig {
    /// Lower edge of the first bin.
    pub low: f64,
    /// Upper edge of the last bin.
    pub high: f64,
    /// Number of equally wide bins.
    #[config(default = 32)]
    pub bins: usize,
    /// Width of the sigmoid transition at each bin edge.
    #[config(default = 0.01)]
    pub bandwidth: f64,
}

impl SoftHistogramConfig {
    /// Initializes a new [`SoftHistogram`].
    ///
    /// # Panics
    /// When `bins` is zero, `high <= low` or `bandwidth <= 0`. Callers taking
    /// these values from user input should validate them first.
    pub fn init(&self) -> SoftHistogram {
        self.assertions();
        SoftHistogram {
            low: self.low,
            high: self.high,
            bins: self.bins,
            bandwidth: self.bandwidth,
        }
    }

    fn assertions(&self) {
        assert!(self.bins > 0, "SoftHistogram needs at least one bin");
        assert!(
            self.high > self.low,
            "SoftHistogram range is empty: [{}, {}]",
            self.low,
            self.high
        );
        assert!(
            self.bandwidth > 0.0,
            "SoftHistogram bandwidth must be positive, got {}",
            self.bandwidth
        );
    }
}

/// Differentiable histogram over a fixed value range.
#[derive(Clone, Debug)]
pub struct SoftHistogram {
    low: f64,
    high: f64,
    bins: usize,
    bandwidth: f64,
}

impl SoftHistogram {
    /// Number of bins.
    pub const fn bins(&self) -> usize {
        self.bins
    }

    /// Width of one bin.
    pub fn bin_width(&self) -> f64 {
        (self.high - self.low) / self.bins as f64
    }

    /// Soft membership of every value in every bin.
    ///
    /// # Shapes
    /// - values: `[1, N]`
    /// - output: `[N, bins]`
    pub fn membership<B: Backend>(&self, values: Tensor<B, 2>) -> Tensor<B, 2> {
        let [_, n] = values.dims();
        let device = values.device();
        let width = self.bin_width();

        let edges: Vec<f32> = (0..self.bins)
            .map(|i| (self.low + i as f64 * width) as f32)
            .collect();
        let left = Tensor::<B, 1>::from_floats(edges.as_slice(), &device)
            .reshape([1, self.bins])
            .expand([n, self.bins]);
        let right = left.clone().add_scalar(width);

        let x = values.reshape([n, 1]).expand([n, self.bins]);
        let rise = activation::sigmoid((x.clone() - left).div_scalar(self.bandwidth));
        let fall = activation::sigmoid((x - right).div_scalar(self.bandwidth));

        rise - fall
    }

    /// Soft bin occupancy, `[bins]`.
    pub fn counts<B: Backend>(&self, values: Tensor<B, 2>) -> Tensor<B, 1> {
        self.membership(values)
            .sum_dim(0)
            .reshape([self.bins])
    }

    /// Bin occupancy normalized to sum to one, `[bins]`.
    ///
    /// `epsilon` guards the division when every value falls outside the range.
    pub fn distribution<B: Backend>(&self, values: Tensor<B, 2>, epsilon: f64) -> Tensor<B, 1> {
        let counts = self.counts(values);
        let total = counts.clone().sum().add_scalar(epsilon).expand([self.bins]);

        counts / total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::{backend::ndarray::NdArray, tensor::Tensor};

    type TestBackend = NdArray<f32>;

    fn values(raw: &[f32]) -> Tensor<TestBackend, 2> {
        Tensor::<TestBackend, 1>::from_floats(raw, &Default::default()).reshape([1, raw.len()])
    }

    #[test]
    fn test_soft_histogram_config() {
        let config = SoftHistogramConfig::new(-1.0, 1.0)
            .with_bins(16)
            .with_bandwidth(0.05);
        assert_eq!(config.bins, 16);
        assert_eq!(config.bandwidth, 0.05);

        let histogram = config.init();
        assert_eq!(histogram.bins(), 16);
        assert!((histogram.bin_width() - 0.125).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "at least one bin")]
    fn test_soft_histogram_rejects_zero_bins() {
        let _ = SoftHistogramConfig::new(0.0, 1.0).with_bins(0).init();
    }

    #[test]
    #[should_panic(expected = "bandwidth must be positive")]
    fn test_soft_histogram_rejects_zero_bandwidth() {
        let _ = SoftHistogramConfig::new(0.0, 1.0).with_bandwidth(0.0).init();
    }

    #[test]
    #[should_panic(expected = "range is empty")]
    fn test_soft_histogram_rejects_empty_range() {
        let _ = SoftHistogramConfig::new(1.0, 1.0).init();
    }

    #[test]
    fn test_counts_concentrate_in_value_bin() {
        let histogram = SoftHistogramConfig::new(0.0, 1.0)
            .with_bins(4)
            .with_bandwidth(0.001)
            .init();

        // Bin centers: 0.125, 0.375, 0.625, 0.875
        let counts = histogram
            .counts(values(&[0.125, 0.125, 0.875]))
            .into_data()
            .to_vec::<f32>()
            .unwrap();

        assert!((counts[0] - 2.0).abs() < 1e-3, "counts: {counts:?}");
        assert!(counts[1].abs() < 1e-3, "counts: {counts:?}");
        assert!(counts[2].abs() < 1e-3, "counts: {counts:?}");
        assert!((counts[3] - 1.0).abs() < 1e-3, "counts: {counts:?}");
    }

    #[test]
    fn test_distribution_is_permutation_invariant() {
        let histogram = SoftHistogramConfig::new(0.0, 1.0).init();

        let a = histogram
            .distribution(values(&[0.1, 0.4, 0.4, 0.9, 0.6]), 1e-8)
            .into_data()
            .to_vec::<f32>()
            .unwrap();
        let b = histogram
            .distribution(values(&[0.9, 0.4, 0.6, 0.1, 0.4]), 1e-8)
            .into_data()
            .to_vec::<f32>()
            .unwrap();

        let total: f32 = a.iter().sum();
        assert!((total - 1.0).abs() < 1e-4);
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-5);
        }
    }
}
