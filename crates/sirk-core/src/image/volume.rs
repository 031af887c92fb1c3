//! 3D reference volume with its voxel-to-physical affine.

use burn::tensor::Tensor;
use burn::tensor::backend::Backend;
use crate::spatial::Affine;
use super::pixel::max_value;

/// 3D pixel grid in array order `[I, J, K]` placed in physical space by `affine`.
///
/// # Type Parameters
/// * `B` - The backend for tensor operations
#[derive(Debug, Clone)]
pub struct Volume<B: Backend> {
    data: Tensor<B, 3>,
    affine: Affine,
}

impl<B: Backend> Volume<B> {
    /// Create a volume from already loaded pixel data.
    ///
    /// # Arguments
    /// * `data` - Pixel data `[I, J, K]`
    /// * `affine` - Maps `(i, j, k, 1)` to physical coordinates
    pub fn new(data: Tensor<B, 3>, affine: Affine) -> Self {
        Self { data, affine }
    }

    pub fn data(&self) -> &Tensor<B, 3> {
        &self.data
    }

    pub fn affine(&self) -> &Affine {
        &self.affine
    }

    pub fn shape(&self) -> [usize; 3] {
        self.data.dims()
    }

    pub fn device(&self) -> B::Device {
        self.data.device()
    }

    /// Largest pixel value in the volume.
    pub fn max_value(&self) -> f64 {
        max_value(self.data.clone())
    }
}
