//! Linear ramp images.

use burn::prelude::*;

/// Spatial direction a ramp increases along.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum RampAxis {
    /// Left edge holds the low value, right edge the high value.
    Horizontal,
    /// Top edge holds the low value, bottom edge the high value.
    Vertical,
}

/// Builds a `[1, height, width, 1]` image rising linearly from `low` to `high`.
///
/// The first and last column (or row) hold exactly `low` and `high`. A ramp
/// axis of length 1 holds `low` everywhere.
pub fn linear_ramp<B: Backend>(
    axis: &RampAxis,
    low: f64,
    high: f64,
    height: usize,
    width: usize,
    device: &B::Device,
) -> Tensor<B, 4> {
    let values = ramp_values(axis, low, high, height, width);
    Tensor::<B, 1>::from_floats(values.as_slice(), device).reshape([1, height, width, 1])
}

/// Row-major pixel values of the ramp built by [`linear_ramp`].
pub fn ramp_values(axis: &RampAxis, low: f64, high: f64, height: usize, width: usize) -> Vec<f32> {
    let steps = match axis {
        RampAxis::Horizontal => width,
        RampAxis::Vertical => height,
    };
    let denominator = steps.saturating_sub(1).max(1) as f64;

    let mut values = Vec::with_capacity(height * width);
    for row in 0..height {
        for col in 0..width {
            let position = match axis {
                RampAxis::Horizontal => col,
                RampAxis::Vertical => row,
            };
            values.push((low + (high - low) * position as f64 / denominator) as f32);
        }
    }
    values
}
