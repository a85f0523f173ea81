//! Reference images for gradient puzzles.

use std::f64::consts::PI;

use burn::prelude::*;
use burn_extra_ops::{linear_ramp, ramp_values};

use crate::{
    config::{RampAxis, ValueRange},
    error::{LossError, LossResult},
};

/// Reference image generators.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// Linear ramp across the value range.
    Ramp(RampAxis),
    /// Alternating extremes of the value range.
    Checkerboard,
    /// Concentric rings around the image center.
    Rings,
    /// The horizontal ramp with its pixels rearranged by a fixed permutation.
    ///
    /// Holds exactly the same values as `Ramp(Horizontal)`, in different places.
    Scrambled,
}

impl Pattern {
    /// Renders the pattern as a `[1, height, width, 1]` image in `range`.
    pub fn render<B: Backend>(
        &self,
        range: &ValueRange,
        height: usize,
        width: usize,
        device: &B::Device,
    ) -> LossResult<Tensor<B, 4>> {
        if height < 2 || width < 2 {
            return Err(LossError::DegenerateInput { height, width });
        }

        let (low, high) = (range.low(), range.high());
        let values: Vec<f32> = match self {
            Self::Ramp(axis) => return Ok(linear_ramp(axis, low, high, height, width, device)),
            Self::Checkerboard => (0..height * width)
                .map(|i| {
                    if (i / width + i % width) % 2 == 0 {
                        low as f32
                    } else {
                        high as f32
                    }
                })
                .collect(),
            Self::Rings => rings(height, width)
                .into_iter()
                .map(|t| (low + (high - low) * t) as f32)
                .collect(),
            Self::Scrambled => scramble(&ramp_values(
                &RampAxis::Horizontal,
                low,
                high,
                height,
                width,
            )),
        };

        Ok(Tensor::<B, 1>::from_floats(values.as_slice(), device).reshape([1, height, width, 1]))
    }
}

/// Ring intensity in `[0, 1]` for every pixel, row-major.
fn rings(height: usize, width: usize) -> Vec<f64> {
    let center_y = (height - 1) as f64 / 2.0;
    let center_x = (width - 1) as f64 / 2.0;
    let radius = center_y.max(center_x).max(1.0);

    (0..height * width)
        .map(|i| {
            let dy = (i / width) as f64 - center_y;
            let dx = (i % width) as f64 - center_x;
            let distance = (dy * dy + dx * dx).sqrt() / radius;
            0.5 + 0.5 * (2.0 * PI * distance).cos()
        })
        .collect()
}

/// Moves value `i` to position `i * stride mod n`, with `stride` coprime to `n`.
fn scramble(values: &[f32]) -> Vec<f32> {
    let n = values.len();
    let mut stride = (n as f64 * 0.618).ceil() as usize;
    while gcd(stride, n) != 1 {
        stride += 1;
    }

    let mut scrambled = vec![0.0; n];
    for (i, value) in values.iter().enumerate() {
        scrambled[(i * stride) % n] = *value;
    }
    scrambled
}

const fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
