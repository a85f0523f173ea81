//! Generator network producing candidate images from a latent code.

use burn::{
    nn::{Linear, LinearConfig, Relu},
    prelude::*,
    tensor::activation,
};

use crate::{
    config::{Architecture, ValueRange},
    error::{LossError, LossResult},
};

/// Configuration for the [`Generator`].
#[derive(Config, Debug)]
pub struct GeneratorConfig {
    #[config(default = "Architecture::Mlp(64)")]
    pub architecture: Architecture,
    /// Width of the latent input code.
    #[config(default = 8)]
    pub latent_dim: usize,
    #[config(default = 16)]
    pub height: usize,
    #[config(default = 16)]
    pub width: usize,
    /// Interval the generated pixels are squashed into.
    #[config(default = "ValueRange::Unit")]
    pub range: ValueRange,
}

impl GeneratorConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> LossResult<()> {
        if self.height < 2 || self.width < 2 {
            return Err(LossError::DegenerateInput {
                height: self.height,
                width: self.width,
            });
        }
        if self.latent_dim == 0 {
            return Err(LossError::InvalidConfiguration {
                reason: "latent_dim must be positive".to_string(),
            });
        }
        if self.architecture.hidden_widths().contains(&0) {
            return Err(LossError::InvalidConfiguration {
                reason: format!(
                    "hidden layers must have a positive width: {:?}",
                    self.architecture
                ),
            });
        }
        Ok(())
    }

    /// Initialize a new generator on `device`.
    pub fn init<B: Backend>(&self, device: &B::Device) -> LossResult<Generator<B>> {
        self.validate()?;

        let mut widths = vec![self.latent_dim];
        widths.extend(self.architecture.hidden_widths());
        widths.push(self.height * self.width);

        let layers = widths
            .windows(2)
            .map(|pair| LinearConfig::new(pair[0], pair[1]).init(device))
            .collect();

        Ok(Generator {
            layers,
            activation: Relu::new(),
            low: self.range.low(),
            high: self.range.high(),
            height: self.height,
            width: self.width,
        })
    }
}

/// Fully connected generator.
///
/// Hidden layers use ReLU. The output layer is squashed with a sigmoid and
/// mapped affinely onto the configured value range, then reshaped into an image.
#[derive(Module, Debug)]
pub struct Generator<B: Backend> {
    layers: Vec<Linear<B>>,
    activation: Relu,
    low: f64,
    high: f64,
    height: usize,
    width: usize,
}

impl<B: Backend> Generator<B> {
    /// Output image size as `(height, width)`.
    pub const fn image_size(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Number of linear layers.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Generates an image.
    ///
    /// # Shapes
    /// - latent: `[1, latent_dim]`
    /// - output: `[1, height, width, 1]`
    pub fn forward(&self, latent: Tensor<B, 2>) -> Tensor<B, 4> {
        let last = self.layers.len() - 1;
        let mut x = latent;
        for (i, layer) in self.layers.iter().enumerate() {
            x = layer.forward(x);
            if i < last {
                x = self.activation.forward(x);
            }
        }

        activation::sigmoid(x)
            .mul_scalar(self.high - self.low)
            .add_scalar(self.low)
            .reshape([1, self.height, self.width, 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    fn latent(dim: usize) -> Tensor<TestBackend, 2> {
        Tensor::random(
            [1, dim],
            burn::tensor::Distribution::Normal(0.0, 1.0),
            &Default::default(),
        )
    }

    #[test]
    fn test_generator_config() {
        let config = GeneratorConfig::new()
            .with_architecture(Architecture::Deep(32))
            .with_height(8)
            .with_width(6);
        assert_eq!(config.architecture, Architecture::Deep(32));
        assert_eq!(config.latent_dim, 8);
        assert_eq!((config.height, config.width), (8, 6));
    }

    #[test]
    fn test_generator_depth_follows_architecture() {
        let device = Default::default();
        for (architecture, depth) in [
            (Architecture::Dense, 1),
            (Architecture::Mlp(16), 2),
            (Architecture::Deep(16), 4),
        ] {
            let generator = GeneratorConfig::new()
                .with_architecture(architecture)
                .init::<TestBackend>(&device)
                .unwrap();
            assert_eq!(generator.depth(), depth);
        }
    }

    #[test]
    fn test_generator_output_shape_and_range() {
        let generator = GeneratorConfig::new()
            .with_height(5)
            .with_width(7)
            .with_range(ValueRange::Symmetric)
            .init::<TestBackend>(&Default::default())
            .unwrap();
        assert_eq!(generator.image_size(), (5, 7));

        let image = generator.forward(latent(8));
        assert_eq!(image.dims(), [1, 5, 7, 1]);

        let values = image.into_data().to_vec::<f32>().unwrap();
        assert!(values.iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn test_generator_rejects_zero_hidden_width() {
        let result = GeneratorConfig::new()
            .with_architecture(Architecture::Mlp(0))
            .init::<TestBackend>(&Default::default());

        assert!(matches!(
            result,
            Err(LossError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_generator_rejects_degenerate_image() {
        let result = GeneratorConfig::new()
            .with_height(1)
            .init::<TestBackend>(&Default::default());

        assert!(matches!(result, Err(LossError::DegenerateInput { .. })));
    }
}
