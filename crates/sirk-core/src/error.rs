//! Error types for core geometry and resampling operations.
//!
//! Every failure in this crate is a deterministic arithmetic failure:
//! a malformed transformation, a singular affine, or mismatched shapes.

use thiserror::Error;

/// Main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Malformed transformation parameters or matrix.
    #[error("Invalid transform: {0}")]
    InvalidTransform(String),

    /// Non-invertible affine supplied to a resampler or a rotation.
    #[error("Singular affine: {0}")]
    SingularAffine(String),

    /// Shape mismatch between two pixel arrays.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create an invalid transform error.
    pub fn invalid_transform(msg: impl Into<String>) -> Self {
        Self::InvalidTransform(msg.into())
    }

    /// Create a singular affine error.
    pub fn singular_affine(msg: impl Into<String>) -> Self {
        Self::SingularAffine(msg.into())
    }

    /// Create a shape mismatch error.
    pub fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }
}
