//! Metric trait for image similarity measurement.
//!
//! This module defines the core Metric trait that all similarity metrics
//! must implement, together with the direction in which a metric improves.

use burn::tensor::Tensor;
use burn::tensor::backend::Backend;
use serde::{Serialize, Deserialize};
use crate::error::{RegistrationError, Result};

/// Whether larger or smaller scores are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Maximise,
    Minimise,
}

impl Direction {
    /// Running best before any score has been seen.
    pub fn initial(self) -> f64 {
        match self {
            Direction::Maximise => f64::NEG_INFINITY,
            Direction::Minimise => f64::INFINITY,
        }
    }

    /// Strict comparison: equal scores never improve. NaN never improves.
    pub fn improves(self, candidate: f64, best: f64) -> bool {
        match self {
            Direction::Maximise => candidate > best,
            Direction::Minimise => candidate < best,
        }
    }
}

/// Metric trait for measuring similarity between a candidate and a reference.
///
/// # Type Parameters
/// * `B` - The tensor backend
pub trait Metric<B: Backend> {
    /// Score `candidate` against `reference`.
    ///
    /// # Arguments
    /// * `candidate` - Resampled plane
    /// * `reference` - Slice pixels, same shape as `candidate`
    ///
    /// # Errors
    /// `ShapeMismatch` when the two arrays differ in shape.
    fn score(&self, candidate: &Tensor<B, 2>, reference: &Tensor<B, 2>) -> Result<f64>;

    /// Get the name of this metric.
    fn name(&self) -> &'static str;

    /// Direction in which the score improves.
    fn direction(&self) -> Direction;
}

/// Ensure two planes have the same shape.
pub fn validate_plane_shapes<B: Backend>(candidate: &Tensor<B, 2>, reference: &Tensor<B, 2>) -> Result<()> {
    let expected = reference.dims();
    let actual = candidate.dims();
    if expected != actual {
        return Err(RegistrationError::shape_mismatch(&expected, &actual));
    }
    Ok(())
}
