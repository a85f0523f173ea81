//! Additional image operations for the Burn deep learning framework
//!
//! This crate provides the tensor building blocks the gradient puzzle losses are
//! made of and that the core Burn framework does not ship as single calls:
//! pixel flattening, a sort that keeps gradients, neighbor differences, a
//! sigmoid-smoothed histogram and linear ramp images.
//!
//! All image operations expect the `[batch, height, width, channels]` layout.

use burn::prelude::*;

mod difference;
mod histogram;
mod ramp;
mod sort;

// Convenient re-exports
pub use difference::{horizontal_differences, vertical_differences};
pub use histogram::{SoftHistogram, SoftHistogramConfig};
pub use ramp::{linear_ramp, ramp_values, RampAxis};
pub use sort::{flatten_pixels, sort_pixels};

/// Image operations for `[batch, height, width, channels]` tensors
pub trait ImageTensorOps<B: Backend> {
    /// Flatten every pixel into a single `[1, N]` row
    fn flatten_pixels(self) -> Tensor<B, 2>;

    /// Flatten and sort pixels ascending, keeping the gradient path to every pixel
    fn sort_pixels(self) -> Tensor<B, 2>;

    /// Difference between each pixel and its right neighbor, `[b, h, w - 1, c]`
    fn horizontal_differences(self) -> Tensor<B, 4>;

    /// Difference between each pixel and its bottom neighbor, `[b, h - 1, w, c]`
    fn vertical_differences(self) -> Tensor<B, 4>;
}

impl<B: Backend> ImageTensorOps<B> for Tensor<B, 4> {
    fn flatten_pixels(self) -> Tensor<B, 2> {
        flatten_pixels(self)
    }

    fn sort_pixels(self) -> Tensor<B, 2> {
        sort_pixels(self)
    }

    fn horizontal_differences(self) -> Tensor<B, 4> {
        horizontal_differences(self)
    }

    fn vertical_differences(self) -> Tensor<B, 4> {
        vertical_differences(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::{
        backend::{ndarray::NdArray, Autodiff},
        tensor::Tensor,
    };

    type TestBackend = Autodiff<NdArray<f32>>;

    #[test]
    fn test_image_tensor_ops() {
        let device = Default::default();
        let tensor = Tensor::<TestBackend, 4>::random(
            [1, 4, 5, 1],
            burn::tensor::Distribution::Uniform(0.0, 1.0),
            &device,
        );

        assert_eq!(tensor.clone().flatten_pixels().dims(), [1, 20]);
        assert_eq!(tensor.clone().sort_pixels().dims(), [1, 20]);
        assert_eq!(tensor.clone().horizontal_differences().dims(), [1, 4, 4, 1]);
        assert_eq!(tensor.vertical_differences().dims(), [1, 3, 5, 1]);
    }
}
