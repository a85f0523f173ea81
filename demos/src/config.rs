//! Configuration for a gradient puzzle run.

use burn::prelude::*;
use gradient_puzzle::{
    GeneratorConfig, LossError, LossResult, LossSuiteConfig, LossWeights, Pattern, RampAxis,
};
use serde_json::Value;

/// Everything a puzzle run is built from.
///
/// Loaded from JSON with [`PuzzleConfig::from_json`]; every field, nested ones
/// included, falls back to its default when missing.
#[derive(Config, Debug)]
pub struct PuzzleConfig {
    #[config(default = "GeneratorConfig::new()")]
    pub generator: GeneratorConfig,
    #[config(default = "LossSuiteConfig::new()")]
    pub loss: LossSuiteConfig,
    #[config(default = "LossWeights::new()")]
    pub weights: LossWeights,
    /// Reference image the generator has to match.
    #[config(default = "Pattern::Ramp(RampAxis::Horizontal)")]
    pub pattern: Pattern,
    #[config(default = 300)]
    pub steps: usize,
    #[config(default = 1e-2)]
    pub learning_rate: f64,
    /// Log every n-th step.
    #[config(default = 25)]
    pub log_every: usize,
    /// Loss recorded for a step whose loss was not finite.
    #[config(default = 1e6)]
    pub unstable_loss: f64,
}

impl PuzzleConfig {
    /// Parses a JSON configuration on top of the defaults.
    ///
    /// Objects whose keys all exist in the defaults are merged field by field.
    /// Any other value, such as a different enum variant, replaces the default.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut merged = serde_json::to_value(Self::new())?;
        merge_json(&mut merged, serde_json::from_str(json)?);
        serde_json::from_value(merged)
    }

    /// Validates the run configuration.
    pub fn validate(&self) -> LossResult<()> {
        self.generator.validate()?;
        self.weights.validate()?;

        if self.generator.range != self.loss.range {
            return Err(LossError::InvalidConfiguration {
                reason: format!(
                    "generator range {:?} differs from loss range {:?}",
                    self.generator.range, self.loss.range
                ),
            });
        }
        if self.steps == 0 {
            return Err(LossError::InvalidConfiguration {
                reason: "steps must be greater than 0".to_string(),
            });
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(LossError::InvalidConfiguration {
                reason: format!("learning rate must be positive, got {}", self.learning_rate),
            });
        }
        if self.log_every == 0 {
            return Err(LossError::InvalidConfiguration {
                reason: "log_every must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides))
            if overrides.keys().all(|key| base.contains_key(key)) =>
        {
            for (key, value) in overrides {
                if let Some(slot) = base.get_mut(&key) {
                    merge_json(slot, value);
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
