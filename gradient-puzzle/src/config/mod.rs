//! Configuration enums shared by the losses, the reference patterns and the generator.
//!
//! Every choice that used to be a free-form string in an interactive demo is a
//! closed enum here, resolved when the configuration is built.

mod enums;

pub use burn_extra_ops::RampAxis;
pub use enums::{Architecture, DistributionStrategy, ValueRange};
