//! Evaluation and organ overlay masks.

use burn::tensor::Tensor;
use burn::tensor::backend::Backend;
use sirk_core::image::{binarise, discretise, is_single_label, max_value};

/// Pixels that are valid in the slice and inside the body.
///
/// `(slice_mask ≠ 0) ∧ (body_resampled > 0)` as 1.0 / 0.0.
pub fn evaluation_mask<B: Backend>(slice_mask: &Tensor<B, 2>, body_resampled: &Tensor<B, 2>) -> Tensor<B, 2> {
    let slice_valid = slice_mask.clone().not_equal_elem(0.0).float();
    let body = binarise(body_resampled.clone(), 0.0);
    slice_valid * body
}

/// Zero every pixel outside `mask`.
pub fn apply_mask<B: Backend>(pixels: &Tensor<B, 2>, mask: &Tensor<B, 2>) -> Tensor<B, 2> {
    pixels.clone() * mask.clone()
}

/// Overlay mask of the resampled organ label.
///
/// A single organ (maximum flooring to 1) was sampled linearly and is
/// thresholded; multiple organs keep their integer labels.
pub fn organ_mask<B: Backend>(organ_resampled: &Tensor<B, 2>, threshold: f64) -> Tensor<B, 2> {
    if is_single_label(max_value(organ_resampled.clone())) {
        binarise(organ_resampled.clone(), threshold)
    } else {
        discretise(organ_resampled.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    fn values(t: Tensor<TestBackend, 2>) -> Vec<f32> {
        t.into_data().to_vec::<f32>().unwrap()
    }

    #[test]
    fn test_evaluation_mask_is_conjunction() {
        let device = Default::default();
        let slice_mask = Tensor::<TestBackend, 2>::from_floats([[1.0, 0.0], [255.0, 1.0]], &device);
        let body = Tensor::<TestBackend, 2>::from_floats([[10.0, 10.0], [3.0, 0.0]], &device);
        assert_eq!(values(evaluation_mask(&slice_mask, &body)), vec![1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_single_organ_thresholded() {
        let device = Default::default();
        let organ = Tensor::<TestBackend, 2>::from_floats([[0.2, 0.5], [0.8, 1.0]], &device);
        assert_eq!(values(organ_mask(&organ, 0.5)), vec![0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_multi_organ_keeps_labels() {
        let device = Default::default();
        let organ = Tensor::<TestBackend, 2>::from_floats([[0.0, 2.0], [3.0, 5.0]], &device);
        assert_eq!(values(organ_mask(&organ, 0.5)), vec![0.0, 2.0, 3.0, 5.0]);
    }

    #[test]
    fn test_apply_mask() {
        let device = Default::default();
        let pixels = Tensor::<TestBackend, 2>::from_floats([[4.0, 5.0]], &device);
        let mask = Tensor::<TestBackend, 2>::from_floats([[0.0, 1.0]], &device);
        assert_eq!(values(apply_mask(&pixels, &mask)), vec![0.0, 5.0]);
    }
}
