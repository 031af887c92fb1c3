//! Spatial types for representing points, vectors and affine matrices.
//!
//! All types are nalgebra aliases in double precision. Pixel data lives in
//! burn tensors; geometry stays on the CPU in `f64`.

pub mod affine;

use nalgebra::{Matrix3, Matrix4, Point3 as NaPoint3, Vector3 as NaVector3};

/// Homogeneous 4×4 matrix mapping array indices (or points) to physical space.
pub type Affine = Matrix4<f64>;
/// Upper-left 3×3 block of an affine.
pub type Block3 = Matrix3<f64>;
pub type Point3 = NaPoint3<f64>;
pub type Vector3 = NaVector3<f64>;

pub use affine::{
    AxisName, affine_block, affine_origin, affine_spacing, affine_direction, affine_axis,
    compose_affine, invert_affine, scanner_axis, plane_centroid, mean_point, mean_axis,
};
