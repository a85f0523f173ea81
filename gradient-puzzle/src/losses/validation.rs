//! Shape and finiteness checks shared by every loss.

use burn::{prelude::*, tensor::ElementConversion};

use crate::error::{LossError, LossResult};

/// Checks that `image` is a `[1, H, W, 1]` tensor with `H, W >= 2`.
///
/// Returns `(height, width)`.
pub fn validate_image<B: Backend>(image: &Tensor<B, 4>) -> LossResult<(usize, usize)> {
    let dims = image.dims();
    let [batch, height, width, channels] = dims;

    if batch != 1 || channels != 1 {
        return Err(LossError::InvalidImageLayout { dims });
    }
    if height < 2 || width < 2 {
        return Err(LossError::DegenerateInput { height, width });
    }

    Ok((height, width))
}

/// Checks both images and that their shapes are identical.
pub fn validate_pair<B: Backend>(
    reference: &Tensor<B, 4>,
    candidate: &Tensor<B, 4>,
) -> LossResult<(usize, usize)> {
    let expected = reference.dims();
    let actual = candidate.dims();
    if expected != actual {
        return Err(LossError::ShapeMismatch { expected, actual });
    }

    validate_image(reference)
}

/// Reads a single-element loss back to the host, failing on NaN or infinity.
pub fn checked_scalar<B: Backend>(term: &'static str, loss: &Tensor<B, 1>) -> LossResult<f64> {
    let value = loss.clone().into_scalar().elem::<f64>();
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LossError::NumericInstability { term, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_validate_image_accepts_2x2() {
        let image = Tensor::<TestBackend, 4>::zeros([1, 2, 2, 1], &Default::default());
        assert_eq!(validate_image(&image).unwrap(), (2, 2));
    }

    #[test]
    fn test_validate_image_rejects_single_row() {
        let image = Tensor::<TestBackend, 4>::zeros([1, 1, 5, 1], &Default::default());

        match validate_image(&image) {
            Err(LossError::DegenerateInput { height, width }) => {
                assert_eq!((height, width), (1, 5));
            }
            other => panic!("Expected DegenerateInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_image_rejects_multi_channel() {
        let image = Tensor::<TestBackend, 4>::zeros([1, 4, 4, 3], &Default::default());

        assert!(matches!(
            validate_image(&image),
            Err(LossError::InvalidImageLayout { dims: [1, 4, 4, 3] })
        ));
    }

    #[test]
    fn test_validate_pair_rejects_mismatch() {
        let device = Default::default();
        let reference = Tensor::<TestBackend, 4>::zeros([1, 4, 4, 1], &device);
        let candidate = Tensor::<TestBackend, 4>::zeros([1, 4, 5, 1], &device);

        match validate_pair(&reference, &candidate) {
            Err(LossError::ShapeMismatch { expected, actual }) => {
                assert_eq!(expected, [1, 4, 4, 1]);
                assert_eq!(actual, [1, 4, 5, 1]);
            }
            other => panic!("Expected ShapeMismatch error, got {other:?}"),
        }
    }

    #[test]
    fn test_checked_scalar_rejects_nan() {
        let loss = Tensor::<TestBackend, 1>::from_floats([f32::NAN], &Default::default());

        assert!(matches!(
            checked_scalar("test", &loss),
            Err(LossError::NumericInstability { term: "test", .. })
        ));
    }
}
