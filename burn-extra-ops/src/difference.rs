//! Neighbor differences along the spatial axes of an image.

use burn::prelude::*;

/// Difference between every pixel and its right neighbor.
///
/// # Shapes
/// - input: `[batch, height, width, channels]`
/// - output: `[batch, height, width - 1, channels]`
///
/// Panics when the width is smaller than 2.
pub fn horizontal_differences<B: Backend>(image: Tensor<B, 4>) -> Tensor<B, 4> {
    let [batch, height, width, channels] = image.dims();

    image
        .clone()
        .slice([0..batch, 0..height, 1..width, 0..channels])
        - image.slice([0..batch, 0..height, 0..width - 1, 0..channels])
}

/// Difference between every pixel and its bottom neighbor.
///
/// # Shapes
/// - input: `[batch, height, width, channels]`
/// - output: `[batch, height - 1, width, channels]`
///
/// Panics when the height is smaller than 2.
pub fn vertical_differences<B: Backend>(image: Tensor<B, 4>) -> Tensor<B, 4> {
    let [batch, height, width, channels] = image.dims();

    image
        .clone()
        .slice([0..batch, 1..height, 0..width, 0..channels])
        - image.slice([0..batch, 0..height - 1, 0..width, 0..channels])
}
