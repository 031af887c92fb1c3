//! 2D slice plane: pixels, validity mask and original affine.

use burn::tensor::Tensor;
use burn::tensor::backend::Backend;
use crate::error::{CoreError, Result};
use crate::spatial::Affine;

/// A 2D slice image acquired somewhere in the reference volume.
///
/// `affine` is the pose the slice was loaded with; the pixel indices are
/// `(i, j, 0)` in that frame.
#[derive(Debug, Clone)]
pub struct SlicePlane<B: Backend> {
    pixels: Tensor<B, 2>,
    mask: Tensor<B, 2>,
    affine: Affine,
}

impl<B: Backend> SlicePlane<B> {
    /// Create a slice plane.
    ///
    /// # Errors
    /// `ShapeMismatch` when `mask` does not have the shape of `pixels`.
    pub fn new(pixels: Tensor<B, 2>, mask: Tensor<B, 2>, affine: Affine) -> Result<Self> {
        let expected = pixels.dims();
        let actual = mask.dims();
        if expected != actual {
            return Err(CoreError::shape_mismatch(&expected, &actual));
        }
        Ok(Self { pixels, mask, affine })
    }

    /// Create a slice plane whose mask covers every pixel.
    pub fn unmasked(pixels: Tensor<B, 2>, affine: Affine) -> Self {
        let mask = pixels.ones_like();
        Self { pixels, mask, affine }
    }

    pub fn pixels(&self) -> &Tensor<B, 2> {
        &self.pixels
    }

    pub fn mask(&self) -> &Tensor<B, 2> {
        &self.mask
    }

    pub fn affine(&self) -> &Affine {
        &self.affine
    }

    pub fn shape(&self) -> [usize; 2] {
        self.pixels.dims()
    }
}
