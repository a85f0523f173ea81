//! # Pixel Sorting
//!
//! Sorting is not differentiable on its own, but the permutation it produces
//! is. The sort order is computed on a detached copy and the live tensor is
//! gathered with it, so each sorted position carries the gradient of the pixel
//! that landed there.

use burn::prelude::*;

/// Flattens an image into a `[1, N]` row of pixels in row-major order.
pub fn flatten_pixels<B: Backend>(image: Tensor<B, 4>) -> Tensor<B, 2> {
    let [batch, height, width, channels] = image.dims();
    image.reshape([1, batch * height * width * channels])
}

/// Flattens an image and sorts its pixels ascending.
///
/// # Shapes
/// - input: `[batch, height, width, channels]`
/// - output: `[1, batch * height * width * channels]`
pub fn sort_pixels<B: Backend>(image: Tensor<B, 4>) -> Tensor<B, 2> {
    let pixels = flatten_pixels(image);
    let (_, indices) = pixels.clone().detach().sort_with_indices(1);
    pixels.gather(1, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::{
        backend::{ndarray::NdArray, Autodiff},
        tensor::Tensor,
    };

    type TestBackend = NdArray<f32>;
    type TestAutodiffBackend = Autodiff<NdArray<f32>>;

    fn assert_close(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-6, "expected {expected:?}, got {actual:?}");
        }
    }

    #[test]
    fn test_flatten_is_row_major() {
        let device = Default::default();
        let image = Tensor::<TestBackend, 1>::from_floats([1.0, 2.0, 3.0, 4.0], &device)
            .reshape([1, 2, 2, 1]);

        let flat = flatten_pixels(image);
        assert_eq!(flat.dims(), [1, 4]);
        assert_close(
            &flat.into_data().to_vec::<f32>().unwrap(),
            &[1.0, 2.0, 3.0, 4.0],
        );
    }

    #[test]
    fn test_sort_pixels_ascending() {
        let device = Default::default();
        let image = Tensor::<TestBackend, 1>::from_floats([0.9, 0.1, 0.5, 0.3], &device)
            .reshape([1, 2, 2, 1]);

        let sorted = sort_pixels(image).into_data().to_vec::<f32>().unwrap();
        assert_close(&sorted, &[0.1, 0.3, 0.5, 0.9]);
    }

    #[test]
    fn test_sort_pixels_propagates_gradient() {
        let device = Default::default();
        let image = Tensor::<TestAutodiffBackend, 1>::from_floats([0.9, 0.1, 0.5, 0.3], &device)
            .reshape([1, 2, 2, 1])
            .require_grad();

        // Weight each rank differently so the gradient reveals where each pixel went.
        let ranks = Tensor::<TestAutodiffBackend, 1>::from_floats([1.0, 2.0, 3.0, 4.0], &device)
            .reshape([1, 4]);
        let grads = (sort_pixels(image.clone()) * ranks).sum().backward();
        let grad = image.grad(&grads).unwrap();

        assert_close(
            &grad.into_data().to_vec::<f32>().unwrap(),
            &[4.0, 1.0, 3.0, 2.0],
        );
    }
}
