//! Sum of Absolute Differences metric.

use burn::tensor::Tensor;
use burn::tensor::backend::Backend;
use super::trait_::{validate_plane_shapes, Direction, Metric};
use crate::error::Result;

/// `Σ |candidate − reference|` over all pixels. Lower is better.
#[derive(Clone, Copy, Debug, Default)]
pub struct SumOfAbsoluteDifferences;

impl<B: Backend> Metric<B> for SumOfAbsoluteDifferences {
    fn score(&self, candidate: &Tensor<B, 2>, reference: &Tensor<B, 2>) -> Result<f64> {
        validate_plane_shapes(candidate, reference)?;
        // Accumulate in f64; f32 sums drop integer precision past 2^24.
        let differences = (candidate.clone() - reference.clone()).abs().into_data();
        Ok(differences.iter::<f64>().sum())
    }

    fn name(&self) -> &'static str {
        "SAD"
    }

    fn direction(&self) -> Direction {
        Direction::Minimise
    }
}
