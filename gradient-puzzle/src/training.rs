//! A single, stateless training step.
//!
//! The caller owns everything that persists between steps: the model, the
//! optimizer state, the latent code, the step counter and any timer that
//! triggers the next step. A step never overlaps another because it borrows
//! nothing mutably except the optimizer.

use burn::{
    optim::{GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::{
    error::LossResult,
    losses::{LossBreakdown, LossSuite, LossWeights},
    model::Generator,
};

/// Everything a training step needs apart from the model and optimizer.
pub struct StepInput<'a, B: Backend> {
    /// Latent code fed to the generator.
    pub latent: Tensor<B, 2>,
    /// Image the generator should match.
    pub reference: Tensor<B, 4>,
    pub suite: &'a LossSuite,
    pub weights: &'a LossWeights,
    pub learning_rate: f64,
}

/// Result of one applied training step.
#[derive(Debug)]
pub struct StepReport<B: Backend> {
    /// The generator after the optimizer update.
    pub model: Generator<B>,
    /// Loss values measured before the update.
    pub breakdown: LossBreakdown,
}

/// Runs forward pass, combined loss, backward pass and one optimizer update.
///
/// On error no update is applied and `model` is left untouched, so the caller
/// can keep its current model and carry on.
pub fn train_step<B, O>(
    model: &Generator<B>,
    optimizer: &mut O,
    input: StepInput<'_, B>,
) -> LossResult<StepReport<B>>
where
    B: AutodiffBackend,
    O: Optimizer<Generator<B>, B>,
{
    let candidate = model.forward(input.latent);
    let (loss, breakdown) =
        input
            .suite
            .combined_loss_with_breakdown(input.reference, candidate, input.weights)?;

    let grads = GradientsParams::from_grads(loss.backward(), model);
    let model = optimizer.step(input.learning_rate, model.clone(), grads);

    tracing::debug!(
        loss = breakdown.total,
        distribution = breakdown.distribution,
        smoothness = ?breakdown.smoothness,
        direction = ?breakdown.direction,
        "training step applied"
    );

    Ok(StepReport { model, breakdown })
}

/// Evaluates the current generator without touching gradients.
pub fn evaluate<B: Backend>(
    model: &Generator<B>,
    latent: Tensor<B, 2>,
    reference: Tensor<B, 4>,
    suite: &LossSuite,
    weights: &LossWeights,
) -> LossResult<LossBreakdown> {
    let candidate = model.forward(latent);
    suite
        .combined_loss_with_breakdown(reference, candidate, weights)
        .map(|(_, breakdown)| breakdown)
}
