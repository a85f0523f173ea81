//! Command line value types shared by the demo binaries.

use clap::ValueEnum;
use gradient_puzzle::{Architecture, DistributionStrategy, Pattern, RampAxis, ValueRange};

/// Reference pattern names accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PatternArg {
    /// Left-to-right ramp
    Ramp,
    /// Top-to-bottom ramp
    VerticalRamp,
    Checkerboard,
    Rings,
    /// Ramp values in scrambled positions
    Scrambled,
}

impl From<PatternArg> for Pattern {
    fn from(arg: PatternArg) -> Self {
        match arg {
            PatternArg::Ramp => Self::Ramp(RampAxis::Horizontal),
            PatternArg::VerticalRamp => Self::Ramp(RampAxis::Vertical),
            PatternArg::Checkerboard => Self::Checkerboard,
            PatternArg::Rings => Self::Rings,
            PatternArg::Scrambled => Self::Scrambled,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Sorted,
    Histogram,
}

impl From<StrategyArg> for DistributionStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Sorted => Self::Sorted,
            StrategyArg::Histogram => Self::SoftHistogram,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RangeArg {
    /// Pixels in [0, 1]
    Unit,
    /// Pixels in [-1, 1]
    Symmetric,
}

impl From<RangeArg> for ValueRange {
    fn from(arg: RangeArg) -> Self {
        match arg {
            RangeArg::Unit => Self::Unit,
            RangeArg::Symmetric => Self::Symmetric,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ArchitectureArg {
    Dense,
    Mlp,
    Deep,
}

impl ArchitectureArg {
    /// Resolves the architecture with the given hidden width.
    pub const fn resolve(self, hidden: usize) -> Architecture {
        match self {
            Self::Dense => Architecture::Dense,
            Self::Mlp => Architecture::Mlp(hidden),
            Self::Deep => Architecture::Deep(hidden),
        }
    }
}
