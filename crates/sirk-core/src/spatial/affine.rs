//! Decomposition helpers for voxel-to-physical affines.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::error::{CoreError, Result};
use super::{Affine, Block3, Point3, Vector3};

/// Determinants below this magnitude are treated as singular.
pub const SINGULAR_TOLERANCE: f64 = 1e-12;

/// Scanner coordinate directions (NIfTI convention, x flipped).
/// Columns are the x, y and z axes.
const SCANNER_DIRECTION: [[f64; 3]; 3] = [
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Name of one of the three axes of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisName {
    X,
    Y,
    Z,
}

impl AxisName {
    /// All axes in x, y, z order.
    pub const ALL: [AxisName; 3] = [AxisName::X, AxisName::Y, AxisName::Z];

    /// Column index of this axis in an affine.
    pub fn index(self) -> usize {
        match self {
            AxisName::X => 0,
            AxisName::Y => 1,
            AxisName::Z => 2,
        }
    }
}

impl fmt::Display for AxisName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AxisName::X => "x",
            AxisName::Y => "y",
            AxisName::Z => "z",
        };
        f.write_str(name)
    }
}

impl FromStr for AxisName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "x" | "X" => Ok(AxisName::X),
            "y" | "Y" => Ok(AxisName::Y),
            "z" | "Z" => Ok(AxisName::Z),
            other => Err(CoreError::invalid_transform(format!("unknown axis '{}'", other))),
        }
    }
}

/// Upper-left 3×3 block (orientation scaled by spacing).
pub fn affine_block(affine: &Affine) -> Block3 {
    affine.fixed_view::<3, 3>(0, 0).into_owned()
}

/// Physical position of index `(0, 0, 0)`.
pub fn affine_origin(affine: &Affine) -> Point3 {
    Point3::new(affine[(0, 3)], affine[(1, 3)], affine[(2, 3)])
}

/// Column norms of the 3×3 block.
pub fn affine_spacing(affine: &Affine) -> Vector3 {
    let block = affine_block(affine);
    Vector3::new(block.column(0).norm(), block.column(1).norm(), block.column(2).norm())
}

/// The 3×3 block with unit-length columns.
///
/// Columns with zero length are left untouched.
pub fn affine_direction(affine: &Affine) -> Block3 {
    let mut block = affine_block(affine);
    for mut column in block.column_iter_mut() {
        let norm = column.norm();
        if norm > 0.0 {
            column /= norm;
        }
    }
    block
}

/// Unit direction of a named axis of the frame described by `affine`.
pub fn affine_axis(affine: &Affine, axis: AxisName) -> Vector3 {
    affine_direction(affine).column(axis.index()).into_owned()
}

/// Unit direction of a named scanner axis.
pub fn scanner_axis(axis: AxisName) -> Vector3 {
    let column = SCANNER_DIRECTION[axis.index()];
    Vector3::new(column[0], column[1], column[2])
}

/// Assemble an affine from a 3×3 block and an origin.
pub fn compose_affine(block: &Block3, origin: &Point3) -> Affine {
    let mut affine = Affine::identity();
    affine.fixed_view_mut::<3, 3>(0, 0).copy_from(block);
    affine[(0, 3)] = origin.x;
    affine[(1, 3)] = origin.y;
    affine[(2, 3)] = origin.z;
    affine
}

/// Invert an affine, failing on non-finite or singular input.
pub fn invert_affine(affine: &Affine) -> Result<Affine> {
    if affine.iter().any(|v| !v.is_finite()) {
        return Err(CoreError::singular_affine("affine contains non-finite entries"));
    }
    let determinant = affine.determinant();
    if determinant.abs() < SINGULAR_TOLERANCE {
        return Err(CoreError::singular_affine(format!(
            "determinant {:e} is below tolerance",
            determinant
        )));
    }
    affine
        .try_inverse()
        .ok_or_else(|| CoreError::singular_affine("affine could not be inverted"))
}

/// Physical centre of a 2D plane of `shape` pixels placed by `affine`.
pub fn plane_centroid(shape: [usize; 2], affine: &Affine) -> Point3 {
    let index = nalgebra::Vector4::new(shape[0] as f64 / 2.0, shape[1] as f64 / 2.0, 0.0, 1.0);
    let centre = affine * index;
    Point3::new(centre.x, centre.y, centre.z)
}

/// Arithmetic mean of a set of points. `None` when the set is empty.
pub fn mean_point<'a, I>(points: I) -> Option<Point3>
where
    I: IntoIterator<Item = &'a Point3>,
{
    let mut sum = Vector3::zeros();
    let mut count = 0usize;
    for point in points {
        sum += point.coords;
        count += 1;
    }
    (count > 0).then(|| Point3::from(sum / count as f64))
}

/// Mean direction of a set of axes, re-normalised to unit length.
///
/// `None` when the set is empty or the axes cancel out.
pub fn mean_axis<'a, I>(axes: I) -> Option<Vector3>
where
    I: IntoIterator<Item = &'a Vector3>,
{
    let sum: Vector3 = axes.into_iter().fold(Vector3::zeros(), |acc, axis| acc + axis);
    let norm = sum.norm();
    (norm > SINGULAR_TOLERANCE).then(|| sum / norm)
}
