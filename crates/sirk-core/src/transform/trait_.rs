//! Transformation algorithm trait.
//!
//! Interactive steps (translate along an axis, rotate about an axis through a
//! centre) are expressed as new delta transformations relative to a slice's
//! original pose. The session holds an algorithm by composition so that the
//! way steps are turned into matrices can be swapped.

use crate::error::Result;
use crate::spatial::{Affine, Point3, Vector3};
use super::rigid::RigidTransformation;

/// Produces new delta transformations from interactive steps.
pub trait TransformationAlgorithm: Send + Sync {
    /// Human readable name, used in logs.
    fn name(&self) -> &'static str;

    /// Shift `delta` by `step` along `axis`.
    ///
    /// # Arguments
    /// * `delta` - Current delta transformation of the slice
    /// * `axis` - Direction of travel in physical space
    /// * `step` - Signed distance in millimetres
    fn translate(
        &self,
        delta: &RigidTransformation,
        axis: &Vector3,
        step: f64,
    ) -> Result<RigidTransformation>;

    /// Rotate the current pose about `axis` through `centre`.
    ///
    /// # Arguments
    /// * `current` - Current plane affine (`delta · original`)
    /// * `original` - Plane affine the slice was loaded with
    /// * `centre` - Point on the rotation axis
    /// * `axis` - Rotation axis direction
    /// * `angle` - Angle in radians
    ///
    /// # Returns
    /// The new delta, i.e. the rotated pose expressed relative to `original`.
    fn rotate(
        &self,
        current: &Affine,
        original: &Affine,
        centre: &Point3,
        axis: &Vector3,
        angle: f64,
    ) -> Result<RigidTransformation>;
}
