//! Nearest neighbor interpolation implementation.
//!
//! Used for multi-label organ volumes, where blending labels would invent
//! classes that do not exist.

use burn::tensor::Tensor;
use burn::tensor::backend::Backend;
use serde::{Serialize, Deserialize};
use super::trait_::Interpolator;
use super::validity_mask;

/// Nearest Neighbor Interpolator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearestNeighborInterpolator;

impl NearestNeighborInterpolator {
    /// Create a new nearest neighbor interpolator.
    pub fn new() -> Self {
        Self
    }
}

impl<B: Backend> Interpolator<B> for NearestNeighborInterpolator {
    fn interpolate<const D: usize>(&self, data: &Tensor<B, D>, indices: Tensor<B, 2>) -> Tensor<B, 1> {
        match D {
            3 => self.interpolate_3d(data, indices),
            2 => self.interpolate_2d(data, indices),
            _ => panic!("NearestNeighborInterpolator only supports 2D and 3D tensors"),
        }
    }
}

impl NearestNeighborInterpolator {
    fn interpolate_3d<B: Backend, const D: usize>(&self, data: &Tensor<B, D>, indices: Tensor<B, 2>) -> Tensor<B, 1> {
        let shape = data.shape();
        let d0 = shape.dims[0];
        let d1 = shape.dims[1];
        let d2 = shape.dims[2];

        let i = indices.clone().narrow(1, 0, 1).squeeze::<1>(1);
        let j = indices.clone().narrow(1, 1, 1).squeeze::<1>(1);
        let k = indices.narrow(1, 2, 1).squeeze::<1>(1);

        let valid = validity_mask(&[i.clone(), j.clone(), k.clone()], &[d0, d1, d2]);

        let i_i = i.round().clamp(0.0, (d0 - 1) as f64).int();
        let j_i = j.round().clamp(0.0, (d1 - 1) as f64).int();
        let k_i = k.round().clamp(0.0, (d2 - 1) as f64).int();

        let idx = i_i * (d1 * d2) as i32 + j_i * d2 as i32 + k_i;
        let flat_data = data.clone().reshape([d0 * d1 * d2]);
        flat_data.gather(0, idx) * valid
    }

    fn interpolate_2d<B: Backend, const D: usize>(&self, data: &Tensor<B, D>, indices: Tensor<B, 2>) -> Tensor<B, 1> {
        let shape = data.shape();
        let d0 = shape.dims[0];
        let d1 = shape.dims[1];

        let i = indices.clone().narrow(1, 0, 1).squeeze::<1>(1);
        let j = indices.narrow(1, 1, 1).squeeze::<1>(1);

        let valid = validity_mask(&[i.clone(), j.clone()], &[d0, d1]);

        let i_i = i.round().clamp(0.0, (d0 - 1) as f64).int();
        let j_i = j.round().clamp(0.0, (d1 - 1) as f64).int();

        let idx = i_i * d1 as i32 + j_i;
        let flat_data = data.clone().reshape([d0 * d1]);
        flat_data.gather(0, idx) * valid
    }
}
