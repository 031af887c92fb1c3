//! Plane resample filter.
//!
//! This module provides PlaneResampler which samples a 3D reference volume
//! on the 2D plane described by a slice affine.

use burn::tensor::{Tensor, TensorData, Shape};
use burn::tensor::backend::Backend;
use serde::{Serialize, Deserialize};
use crate::error::Result;
use crate::image::{plane_index_grid, Volume};
use crate::interpolation::{Interpolator, LinearInterpolator, NearestNeighborInterpolator};
use crate::spatial::{invert_affine, Affine};

/// Interpolation method used by a plane resampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    Linear,
    Nearest,
}

impl Interpolation {
    /// Intensity volumes are always sampled linearly.
    pub fn for_body() -> Self {
        Interpolation::Linear
    }

    /// Linear for a single-organ label (maximum exactly 1), nearest for
    /// multi-organ labels.
    pub fn for_organ<B: Backend>(grid: &Volume<B>) -> Self {
        if grid.max_value() == 1.0 {
            Interpolation::Linear
        } else {
            Interpolation::Nearest
        }
    }

    fn interpolate<B: Backend>(&self, data: &Tensor<B, 3>, indices: Tensor<B, 2>) -> Tensor<B, 1> {
        match self {
            Interpolation::Linear => LinearInterpolator::new().interpolate(data, indices),
            Interpolation::Nearest => NearestNeighborInterpolator::new().interpolate(data, indices),
        }
    }
}

/// Resamples a fixed 3D grid onto 2D planes of a fixed size.
///
/// Construction precomputes the inverse grid affine and the homogeneous
/// plane index tensor so that each `resample` call is a single matrix
/// product followed by interpolation.
///
/// # Type Parameters
/// * `B` - The Burn backend
#[derive(Debug, Clone)]
pub struct PlaneResampler<B: Backend> {
    plane_size: [usize; 2],
    grid_data: Tensor<B, 3>,
    grid_inverse: Affine,
    plane_index: Tensor<B, 2>,
    interpolation: Interpolation,
}

impl<B: Backend> PlaneResampler<B> {
    /// Create a new plane resampler.
    ///
    /// # Arguments
    /// * `plane_size` - Output plane size `[w, h]`
    /// * `grid` - Volume to sample from
    /// * `interpolation` - Interpolation method
    ///
    /// # Errors
    /// `SingularAffine` when the grid affine cannot be inverted.
    pub fn new(plane_size: [usize; 2], grid: &Volume<B>, interpolation: Interpolation) -> Result<Self> {
        let grid_inverse = invert_affine(grid.affine())?;
        let device = grid.device();
        let plane_index = plane_index_grid::<B>(plane_size, &device);

        Ok(Self {
            plane_size,
            grid_data: grid.data().clone(),
            grid_inverse,
            plane_index,
            interpolation,
        })
    }

    pub fn plane_size(&self) -> [usize; 2] {
        self.plane_size
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Sample the grid on the plane placed by `plane_affine`.
    ///
    /// Samples that fall outside the grid are 0.
    ///
    /// # Errors
    /// `SingularAffine` when `plane_affine` is not invertible.
    pub fn resample(&self, plane_affine: &Affine) -> Result<Tensor<B, 2>> {
        invert_affine(plane_affine)?;

        let device = self.grid_data.device();
        let mapping = self.grid_inverse * plane_affine;
        let mapping = affine_to_tensor::<B>(&mapping, &device);

        // [4, 4] x [4, N] -> [4, N]; drop the homogeneous row -> [N, 3]
        let grid_index = mapping.matmul(self.plane_index.clone());
        let points = grid_index.narrow(0, 0, 3).transpose();

        let values = self.interpolation.interpolate(&self.grid_data, points);
        Ok(values.reshape(self.plane_size))
    }
}

/// Row-major copy of an affine as a `[4, 4]` tensor.
fn affine_to_tensor<B: Backend>(affine: &Affine, device: &B::Device) -> Tensor<B, 2> {
    let mut values = Vec::with_capacity(16);
    for row in 0..4 {
        for col in 0..4 {
            values.push(affine[(row, col)] as f32);
        }
    }
    Tensor::<B, 1>::from_data(TensorData::new(values, Shape::new([16])), device).reshape([4, 4])
}
