use thiserror::Error;

/// The error type for gradient puzzle loss and training operations.
///
/// Every loss operation reports failures synchronously through this type; the
/// caller decides whether to stop, retry with other inputs, or substitute a
/// large finite loss.
#[derive(Error, Debug)]
pub enum LossError {
    /// Reference and candidate images have different shapes.
    #[error("Shape mismatch: reference is {expected:?}, candidate is {actual:?}")]
    ShapeMismatch {
        /// Shape of the reference image.
        expected: [usize; 4],
        /// Shape of the candidate image.
        actual: [usize; 4],
    },

    /// The tensor is not a single-image, single-channel `[1, H, W, 1]` tensor.
    #[error("Invalid image layout: expected [1, H, W, 1], got {dims:?}")]
    InvalidImageLayout {
        /// The offending tensor shape.
        dims: [usize; 4],
    },

    /// The image is too small for neighbor differencing.
    #[error("Degenerate input: {height}x{width} image, at least 2x2 is required")]
    DegenerateInput {
        /// Image height in pixels.
        height: usize,
        /// Image width in pixels.
        width: usize,
    },

    /// A loss term evaluated to NaN or infinity.
    #[error("Numeric instability: {term} loss is {value}")]
    NumericInstability {
        /// Name of the loss term.
        term: &'static str,
        /// The non-finite value.
        value: f64,
    },

    /// Configuration values are out of their valid domain.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// The reason why the configuration is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for gradient puzzle operations.
pub type LossResult<T> = Result<T, LossError>;
