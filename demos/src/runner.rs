//! The training loop that drives a gradient puzzle.
//!
//! This is the only place that owns state across steps: the generator, the
//! optimizer, the fixed latent code and the step counter. Steps run strictly
//! one after another.

use burn::{
    optim::AdamConfig,
    prelude::*,
    tensor::{backend::AutodiffBackend, Distribution, ElementConversion},
};
use gradient_puzzle::{
    training::{evaluate, train_step, StepInput},
    Generator, LossBreakdown, LossError, LossSuite,
};
use serde::Serialize;

use crate::config::PuzzleConfig;

/// Outcome of a finished run, written as JSON by the `puzzle` binary.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub steps: usize,
    /// Steps whose loss was not finite and whose update was skipped.
    pub skipped_steps: usize,
    pub initial_loss: f64,
    pub final_loss: f64,
    pub final_distribution: f64,
    pub final_smoothness: Option<f64>,
    pub final_direction: Option<f64>,
    /// Pixel-by-pixel error against the reference, for comparison only.
    pub final_pointwise: f64,
    /// Combined loss after every step.
    pub history: Vec<f64>,
}

/// Trains a generator against the configured reference pattern.
pub fn run<B: AutodiffBackend>(
    config: &PuzzleConfig,
    device: &B::Device,
) -> anyhow::Result<RunSummary> {
    config.validate()?;

    let suite = config.loss.init()?;
    let reference = config.pattern.render::<B>(
        &config.loss.range,
        config.generator.height,
        config.generator.width,
        device,
    )?;
    let latent = Tensor::<B, 2>::random(
        [1, config.generator.latent_dim],
        Distribution::Normal(0.0, 1.0),
        device,
    );
    let mut model = config.generator.init::<B>(device)?;
    let mut optimizer = AdamConfig::new().init::<B, Generator<B>>();

    let initial = evaluate_or_unstable(
        &model,
        latent.clone(),
        reference.clone(),
        &suite,
        config,
        "initial",
    )?;
    tracing::info!(
        pattern = ?config.pattern,
        architecture = ?config.generator.architecture,
        strategy = ?config.loss.distribution.strategy,
        loss = initial.total,
        "starting puzzle"
    );

    let mut history = Vec::with_capacity(config.steps);
    let mut skipped_steps = 0;

    for step in 1..=config.steps {
        let input = StepInput {
            latent: latent.clone(),
            reference: reference.clone(),
            suite: &suite,
            weights: &config.weights,
            learning_rate: config.learning_rate,
        };

        match train_step(&model, &mut optimizer, input) {
            Ok(report) => {
                model = report.model;
                history.push(report.breakdown.total);
                if step % config.log_every == 0 {
                    tracing::info!(
                        step,
                        loss = report.breakdown.total,
                        distribution = report.breakdown.distribution,
                        "progress"
                    );
                }
            }
            Err(LossError::NumericInstability { term, value }) => {
                tracing::warn!(step, term, value, "non-finite loss, update skipped");
                skipped_steps += 1;
                history.push(config.unstable_loss);
            }
            Err(error) => return Err(error.into()),
        }
    }

    let last = evaluate_or_unstable(
        &model,
        latent.clone(),
        reference.clone(),
        &suite,
        config,
        "final",
    )?;
    let final_pointwise = match suite.pointwise_error(reference, model.forward(latent)) {
        Ok(loss) => loss.into_scalar().elem::<f64>(),
        Err(LossError::NumericInstability { term, value }) => {
            tracing::warn!(term, value, "non-finite pointwise error");
            config.unstable_loss
        }
        Err(error) => return Err(error.into()),
    };

    tracing::info!(
        loss = last.total,
        pointwise = final_pointwise,
        skipped_steps,
        "puzzle finished"
    );

    Ok(RunSummary {
        steps: config.steps,
        skipped_steps,
        initial_loss: initial.total,
        final_loss: last.total,
        final_distribution: last.distribution,
        final_smoothness: last.smoothness,
        final_direction: last.direction,
        final_pointwise,
        history,
    })
}

/// Evaluates the model, reporting `unstable_loss` for every active term when
/// the loss is not finite.
fn evaluate_or_unstable<B: AutodiffBackend>(
    model: &Generator<B>,
    latent: Tensor<B, 2>,
    reference: Tensor<B, 4>,
    suite: &LossSuite,
    config: &PuzzleConfig,
    stage: &str,
) -> anyhow::Result<LossBreakdown> {
    match evaluate(model, latent, reference, suite, &config.weights) {
        Ok(breakdown) => Ok(breakdown),
        Err(LossError::NumericInstability { term, value }) => {
            tracing::warn!(stage, term, value, "non-finite loss during evaluation");
            let unstable = config.unstable_loss;
            Ok(LossBreakdown {
                total: unstable,
                distribution: unstable,
                smoothness: (config.weights.smoothness > 0.0).then_some(unstable),
                direction: (config.weights.direction > 0.0).then_some(unstable),
            })
        }
        Err(error) => Err(error.into()),
    }
}
