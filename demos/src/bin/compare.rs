//! Evaluates every gradient puzzle loss between two reference patterns.
//!
//! Useful to see which losses care about where pixels are and which only care
//! about what values appear.

use anyhow::Result;
use burn::tensor::ElementConversion;
use clap::Parser;
use gradient_puzzle::{
    DistributionErrorLossConfig, DistributionStrategy, LossSuiteConfig, LossWeights, Pattern,
    ValueRange,
};
use gradient_puzzle_demos::{
    cli::{PatternArg, RangeArg},
    create_device, init_tracing, SelectedBackend,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Reference pattern
    #[arg(long, value_enum, default_value = "ramp")]
    reference: PatternArg,

    /// Candidate pattern
    #[arg(long, value_enum, default_value = "scrambled")]
    candidate: PatternArg,

    /// Pixel value range
    #[arg(long, value_enum, default_value = "unit")]
    range: RangeArg,

    /// Image height
    #[arg(long, default_value_t = 16)]
    height: usize,

    /// Image width
    #[arg(long, default_value_t = 16)]
    width: usize,

    /// Smoothness weight of the combined loss
    #[arg(long, default_value_t = 0.0)]
    smoothness: f32,

    /// Direction weight of the combined loss
    #[arg(long, default_value_t = 0.0)]
    direction: f32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing("info")?;

    let device = create_device();
    let range = ValueRange::from(args.range);
    let reference = Pattern::from(args.reference)
        .render::<SelectedBackend>(&range, args.height, args.width, &device)?;
    let candidate = Pattern::from(args.candidate)
        .render::<SelectedBackend>(&range, args.height, args.width, &device)?;
    let weights = LossWeights::new()
        .with_smoothness(args.smoothness)
        .with_direction(args.direction);

    for strategy in [
        DistributionStrategy::Sorted,
        DistributionStrategy::SoftHistogram,
    ] {
        let suite = LossSuiteConfig::new()
            .with_range(range.clone())
            .with_distribution(DistributionErrorLossConfig::new().with_strategy(strategy.clone()))
            .init()?;

        let pointwise = suite
            .pointwise_error(reference.clone(), candidate.clone())?
            .into_scalar()
            .elem::<f64>();
        let smoothness = suite
            .smoothness_penalty(candidate.clone())?
            .into_scalar()
            .elem::<f64>();
        let direction = suite
            .directional_penalty(candidate.clone())?
            .into_scalar()
            .elem::<f64>();
        let (_, breakdown) =
            suite.combined_loss_with_breakdown(reference.clone(), candidate.clone(), &weights)?;

        tracing::info!(
            strategy = ?strategy,
            pointwise,
            distribution = breakdown.distribution,
            smoothness,
            direction,
            combined = breakdown.total,
            "losses"
        );
    }

    Ok(())
}
