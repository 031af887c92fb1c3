//! Pixel-wise utilities for deriving masks and label maps.

use burn::tensor::{ElementConversion, Tensor};
use burn::tensor::backend::Backend;

/// Truncate every value toward zero.
pub fn discretise<B: Backend, const D: usize>(tensor: Tensor<B, D>) -> Tensor<B, D> {
    tensor.int().float()
}

/// 1.0 where `value > threshold`, 0.0 elsewhere.
pub fn binarise<B: Backend, const D: usize>(tensor: Tensor<B, D>, threshold: f64) -> Tensor<B, D> {
    tensor.greater_elem(threshold).float()
}

/// Largest value of the tensor.
pub fn max_value<B: Backend, const D: usize>(tensor: Tensor<B, D>) -> f64 {
    tensor.max().into_scalar().elem::<f64>()
}

/// A label map whose maximum floors to 1 holds a single organ.
pub fn is_single_label(max: f64) -> bool {
    max.floor() == 1.0
}
