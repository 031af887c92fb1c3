//! Rigid translate and rotate steps.

use crate::error::{CoreError, Result};
use crate::spatial::{affine_block, affine_origin, compose_affine, Affine, Point3, Vector3};
use super::rigid::RigidTransformation;
use super::rodrigues::rodrigues;
use super::trait_::TransformationAlgorithm;

/// Axes shorter than this cannot be normalised.
const AXIS_TOLERANCE: f64 = 1e-12;

/// Add `step · axis` to the translation column of `matrix`.
pub fn translate(matrix: &Affine, axis: &Vector3, step: f64) -> Affine {
    let mut translated = *matrix;
    let offset = axis * step;
    translated[(0, 3)] += offset.x;
    translated[(1, 3)] += offset.y;
    translated[(2, 3)] += offset.z;
    translated
}

/// Rotate `current` by `angle` about `axis` through `centre` and express the
/// result relative to `original`.
///
/// # Errors
/// `InvalidTransform` for a zero or non-finite axis, a non-finite angle, or a
/// singular `original`.
pub fn rotate(
    current: &Affine,
    original: &Affine,
    centre: &Point3,
    axis: &Vector3,
    angle: f64,
) -> Result<Affine> {
    if !angle.is_finite() {
        return Err(CoreError::invalid_transform(format!("non-finite angle {}", angle)));
    }
    let norm = axis.norm();
    if !norm.is_finite() || norm < AXIS_TOLERANCE {
        return Err(CoreError::invalid_transform(format!(
            "rotation axis {:?} cannot be normalised",
            axis.as_slice()
        )));
    }
    let r = rodrigues(&(axis / norm), angle);

    let block = r * affine_block(current);
    let origin = affine_origin(current);
    let rotated_origin = *centre + r * (origin - *centre);
    let rotated = compose_affine(&block, &rotated_origin);

    let original_inverse = original.try_inverse().ok_or_else(|| {
        CoreError::invalid_transform("original plane affine is not invertible")
    })?;
    Ok(rotated * original_inverse)
}

/// Default rigid algorithm: translation column offsets and Rodrigues rotations.
#[derive(Debug, Clone, Copy, Default)]
pub struct RigidAlgorithm;

impl TransformationAlgorithm for RigidAlgorithm {
    fn name(&self) -> &'static str {
        "rigid"
    }

    fn translate(
        &self,
        delta: &RigidTransformation,
        axis: &Vector3,
        step: f64,
    ) -> Result<RigidTransformation> {
        RigidTransformation::from_matrix(translate(delta.matrix(), axis, step))
    }

    fn rotate(
        &self,
        current: &Affine,
        original: &Affine,
        centre: &Point3,
        axis: &Vector3,
        angle: f64,
    ) -> Result<RigidTransformation> {
        RigidTransformation::from_matrix(rotate(current, original, centre, axis, angle)?)
    }
}
