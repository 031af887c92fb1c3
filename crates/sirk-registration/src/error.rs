//! Error types for registration operations.
//!
//! Boundary errors are expected at the ends of a transformation history and
//! are swallowed by the session; every other variant aborts the operation
//! that raised it.

use thiserror::Error;
use sirk_core::CoreError;

/// Main error type for registration operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistrationError {
    /// Malformed transformation parameters or matrix.
    #[error("Invalid transform: {0}")]
    InvalidTransform(String),

    /// Non-invertible affine supplied to a resampler.
    #[error("Singular affine: {0}")]
    SingularAffine(String),

    /// Undo below the first entry or redo past the last one.
    #[error("History boundary: {0}")]
    Boundary(String),

    /// Metric name or kind that is not available.
    #[error("Unsupported metric: {0}")]
    UnsupportedMetric(String),

    /// Shape mismatch between two pixel arrays.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Slice identifier not present in the case.
    #[error("Unknown slice: {0}")]
    UnknownSlice(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for registration operations.
pub type Result<T> = std::result::Result<T, RegistrationError>;

impl RegistrationError {
    /// Create an invalid transform error.
    pub fn invalid_transform(msg: impl Into<String>) -> Self {
        Self::InvalidTransform(msg.into())
    }

    /// Create a history boundary error.
    pub fn boundary(msg: impl Into<String>) -> Self {
        Self::Boundary(msg.into())
    }

    /// Create an unsupported metric error.
    pub fn unsupported_metric(msg: impl Into<String>) -> Self {
        Self::UnsupportedMetric(msg.into())
    }

    /// Create a shape mismatch error.
    pub fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Create an unknown slice error.
    pub fn unknown_slice(slice_id: impl Into<String>) -> Self {
        Self::UnknownSlice(slice_id.into())
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Expected steady-state condition rather than a failure.
    pub fn is_boundary(&self) -> bool {
        matches!(self, Self::Boundary(_))
    }
}

impl From<CoreError> for RegistrationError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidTransform(msg) => Self::InvalidTransform(msg),
            CoreError::SingularAffine(msg) => Self::SingularAffine(msg),
            CoreError::ShapeMismatch { expected, actual } => Self::ShapeMismatch { expected, actual },
        }
    }
}
