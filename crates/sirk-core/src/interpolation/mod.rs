//! Interpolation types and operations.
//!
//! This module provides interpolation traits and implementations
//! for sampling values at continuous coordinates.

pub mod trait_;
pub mod linear;
pub mod nearest;

pub use trait_::Interpolator;
pub use linear::LinearInterpolator;
pub use nearest::NearestNeighborInterpolator;

use burn::tensor::Tensor;
use burn::tensor::backend::Backend;

/// 1.0 where every coordinate lies in `[0, dim - 1]`, 0.0 elsewhere.
///
/// `coords[c]` holds the continuous index along array axis `c`; at least one
/// axis is required.
pub(crate) fn validity_mask<B: Backend>(coords: &[Tensor<B, 1>], dims: &[usize]) -> Tensor<B, 1> {
    let mut mask = coords[0].ones_like();
    for (coord, &dim) in coords.iter().zip(dims.iter()) {
        let lower = coord.clone().greater_equal_elem(0.0).float();
        let upper = coord.clone().lower_equal_elem((dim - 1) as f64).float();
        mask = mask * lower * upper;
    }
    mask
}
