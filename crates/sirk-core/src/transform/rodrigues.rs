//! Rodrigues' rotation formula.

use crate::spatial::{Block3, Vector3};

/// Rotation matrix for a right-handed rotation of `angle` radians about `axis`.
///
/// `R = I + sin θ · K + (1 − cos θ) · K²` where `K` is the cross-product
/// matrix of `axis`. The axis is expected to be unit length.
pub fn rodrigues(axis: &Vector3, angle: f64) -> Block3 {
    let k = Block3::new(
        0.0, -axis.z, axis.y,
        axis.z, 0.0, -axis.x,
        -axis.y, axis.x, 0.0,
    );
    Block3::identity() + k * angle.sin() + (k * k) * (1.0 - angle.cos())
}
