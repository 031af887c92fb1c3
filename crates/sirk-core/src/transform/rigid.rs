//! Rigid transformation value type.
//!
//! A rigid transformation is a 4×4 homogeneous matrix `M = T · R` where `T`
//! translates by `(tx, ty, tz)` and `R` rotates about the fixed scanner axes
//! `(-1, 0, 0)`, `(0, -1, 0)` and `(0, 0, -1)`, composed in x, y, z order:
//!
//! `R = Rod(-x, rx) · Rod(-y, ry) · Rod(-z, rz)`
//!
//! Values are immutable; every operation returns a new transformation.

use serde::{Serialize, Deserialize};
use crate::error::{CoreError, Result};
use crate::spatial::{affine_direction, Affine, Vector3};
use super::rodrigues::rodrigues;

/// `|cos ry|` at or below this value is treated as gimbal lock.
pub const GIMBAL_TOLERANCE: f64 = 1e-6;

/// Homogeneous row entries may deviate from `[0, 0, 0, 1]` by this much.
const HOMOGENEOUS_TOLERANCE: f64 = 1e-9;

/// Determinant magnitude below which a matrix is rejected.
const DETERMINANT_TOLERANCE: f64 = 1e-12;

/// Translation (millimetres) and rotation (radians) of a rigid transformation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RigidParameters {
    pub translation: [f64; 3],
    pub rotation: [f64; 3],
}

impl RigidParameters {
    pub fn new(translation: [f64; 3], rotation: [f64; 3]) -> Self {
        Self { translation, rotation }
    }

    /// Parse `(tx, ty, tz, rx, ry, rz)`.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        if values.len() != 6 {
            return Err(CoreError::invalid_transform(format!(
                "expected 6 parameters, got {}",
                values.len()
            )));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(CoreError::invalid_transform(format!(
                "non-finite parameter {}",
                bad
            )));
        }
        Ok(Self {
            translation: [values[0], values[1], values[2]],
            rotation: [values[3], values[4], values[5]],
        })
    }

    /// Flatten to `(tx, ty, tz, rx, ry, rz)`.
    pub fn to_array(&self) -> [f64; 6] {
        let [tx, ty, tz] = self.translation;
        let [rx, ry, rz] = self.rotation;
        [tx, ty, tz, rx, ry, rz]
    }
}

/// Input accepted when building a transformation.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformationData {
    Identity,
    Parameters(Vec<f64>),
    Matrix(Affine),
}

impl From<RigidParameters> for TransformationData {
    fn from(parameters: RigidParameters) -> Self {
        Self::Parameters(parameters.to_array().to_vec())
    }
}

impl From<Affine> for TransformationData {
    fn from(matrix: Affine) -> Self {
        Self::Matrix(matrix)
    }
}

/// Result of decomposing a matrix into parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposition {
    pub parameters: RigidParameters,
    /// `ry` is at ±π/2; `rz` was fixed to zero and folded into `rx`.
    pub gimbal_locked: bool,
}

/// Rigid transformation stored as a homogeneous matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidTransformation {
    matrix: Affine,
}

impl Default for RigidTransformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidTransformation {
    pub fn identity() -> Self {
        Self { matrix: Affine::identity() }
    }

    /// Build from `(tx, ty, tz, rx, ry, rz)`.
    ///
    /// # Errors
    /// `InvalidTransform` when the slice does not hold exactly six finite values.
    pub fn from_parameters(values: &[f64]) -> Result<Self> {
        let parameters = RigidParameters::from_slice(values)?;
        Ok(Self::from_rigid_parameters(&parameters))
    }

    /// Build from already validated parameters.
    pub fn from_rigid_parameters(parameters: &RigidParameters) -> Self {
        let [tx, ty, tz] = parameters.translation;
        let [rx, ry, rz] = parameters.rotation;

        let rotation = rodrigues(&Vector3::new(-1.0, 0.0, 0.0), rx)
            * rodrigues(&Vector3::new(0.0, -1.0, 0.0), ry)
            * rodrigues(&Vector3::new(0.0, 0.0, -1.0), rz);

        let mut matrix = Affine::identity();
        matrix.fixed_view_mut::<3, 3>(0, 0).copy_from(&rotation);
        matrix[(0, 3)] = tx;
        matrix[(1, 3)] = ty;
        matrix[(2, 3)] = tz;
        Self { matrix }
    }

    /// Wrap an existing homogeneous matrix.
    ///
    /// # Errors
    /// `InvalidTransform` for non-finite entries, a bottom row other than
    /// `[0, 0, 0, 1]`, or a non-invertible matrix.
    pub fn from_matrix(matrix: Affine) -> Result<Self> {
        if matrix.iter().any(|v| !v.is_finite()) {
            return Err(CoreError::invalid_transform("matrix contains non-finite entries"));
        }
        let expected_row = [0.0, 0.0, 0.0, 1.0];
        for (col, expected) in expected_row.iter().enumerate() {
            if (matrix[(3, col)] - expected).abs() > HOMOGENEOUS_TOLERANCE {
                return Err(CoreError::invalid_transform(format!(
                    "bottom row must be [0, 0, 0, 1], found {:?}",
                    [matrix[(3, 0)], matrix[(3, 1)], matrix[(3, 2)], matrix[(3, 3)]]
                )));
            }
        }
        let determinant = matrix.determinant();
        if determinant.abs() < DETERMINANT_TOLERANCE {
            return Err(CoreError::invalid_transform(format!(
                "matrix is not invertible (determinant {:e})",
                determinant
            )));
        }
        Ok(Self { matrix })
    }

    /// Build from any accepted input form.
    pub fn from_data(data: TransformationData) -> Result<Self> {
        match data {
            TransformationData::Identity => Ok(Self::identity()),
            TransformationData::Parameters(values) => Self::from_parameters(&values),
            TransformationData::Matrix(matrix) => Self::from_matrix(matrix),
        }
    }

    pub fn matrix(&self) -> &Affine {
        &self.matrix
    }

    pub fn into_matrix(self) -> Affine {
        self.matrix
    }

    /// Translation and rotation parameters of this transformation.
    pub fn parameters(&self) -> RigidParameters {
        self.decompose().parameters
    }

    /// Decompose into parameters, reporting gimbal lock.
    pub fn decompose(&self) -> Decomposition {
        let m = &self.matrix;
        let translation = [m[(0, 3)], m[(1, 3)], m[(2, 3)]];

        let mut r = affine_direction(m);
        let triple = r.column(0).dot(&r.column(1).cross(&r.column(2)));
        if triple < 0.0 {
            r = -r;
        }

        let sin_ry = (-r[(0, 2)]).clamp(-1.0, 1.0);
        let ry = sin_ry.asin();
        let gimbal_locked = ry.cos().abs() <= GIMBAL_TOLERANCE;

        let (rx, rz) = if gimbal_locked {
            let sign = if sin_ry < 0.0 { -1.0 } else { 1.0 };
            tracing::warn!(
                ry = ry,
                "rotation decomposition hit gimbal lock; rz fixed to zero"
            );
            ((sign * r[(1, 0)]).atan2(r[(1, 1)]), 0.0)
        } else {
            (r[(1, 2)].atan2(r[(2, 2)]), r[(0, 1)].atan2(r[(0, 0)]))
        };

        Decomposition {
            parameters: RigidParameters::new(translation, [rx, ry, rz]),
            gimbal_locked,
        }
    }

    /// Composition `self · other`.
    pub fn compose(&self, other: &Affine) -> Affine {
        self.matrix * other
    }
}
