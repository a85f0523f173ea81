//! Enumeration types for gradient puzzle configuration.

use burn::prelude::*;

/// Interval the pixel values of every image live in.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum ValueRange {
    /// Values in `[0, 1]`.
    Unit,
    /// Values in `[-1, 1]`.
    Symmetric,
}

impl ValueRange {
    /// Lower bound of the interval.
    #[must_use]
    pub const fn low(&self) -> f64 {
        match self {
            Self::Unit => 0.0,
            Self::Symmetric => -1.0,
        }
    }

    /// Upper bound of the interval.
    #[must_use]
    pub const fn high(&self) -> f64 {
        1.0
    }

    /// Length of the interval.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.high() - self.low()
    }
}

/// How the distribution error compares two sets of pixel values.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum DistributionStrategy {
    /// Mean squared difference of the ascending sorted pixels.
    Sorted,
    /// KL divergence between sigmoid-smoothed histograms.
    SoftHistogram,
}

/// Generator network shape.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum Architecture {
    /// A single linear layer from latent code to pixels.
    Dense,
    /// One hidden layer of the given width.
    Mlp(usize),
    /// Three hidden layers of the given width.
    Deep(usize),
}

impl Architecture {
    /// Widths of the hidden layers, in order.
    #[must_use]
    pub fn hidden_widths(&self) -> Vec<usize> {
        match self {
            Self::Dense => Vec::new(),
            Self::Mlp(width) => vec![*width],
            Self::Deep(width) => vec![*width; 3],
        }
    }
}
