//! Normalized Mutual Information metric.
//!
//! NMI = 2 · (H1 + H2 − H12) / (H1 + H2), computed from a hard-binned joint
//! histogram with entropies in bits. Two constant images carry no
//! information at all; their score is defined as 0.

use burn::tensor::Tensor;
use burn::tensor::backend::Backend;
use super::histogram::JointHistogram;
use super::trait_::{validate_plane_shapes, Direction, Metric};
use crate::error::Result;

/// Normalized Mutual Information Metric.
#[derive(Clone, Debug, Default)]
pub struct NormalizedMutualInformation {
    histogram: JointHistogram,
}

impl NormalizedMutualInformation {
    /// Create a new metric with `num_bins` bins per image.
    pub fn new(num_bins: usize) -> Self {
        Self { histogram: JointHistogram::new(num_bins) }
    }

    pub fn num_bins(&self) -> usize {
        self.histogram.num_bins
    }
}

impl<B: Backend> Metric<B> for NormalizedMutualInformation {
    fn score(&self, candidate: &Tensor<B, 2>, reference: &Tensor<B, 2>) -> Result<f64> {
        validate_plane_shapes(candidate, reference)?;
        let [w, h] = candidate.dims();
        let n = w * h;

        let joint = self.histogram.compute_joint_histogram(
            candidate.clone().reshape([n]),
            reference.clone().reshape([n]),
        );
        let joint = joint / n as f64;

        let marginal_reference = joint.clone().sum_dim(0);
        let marginal_candidate = joint.clone().sum_dim(1);

        let h12 = JointHistogram::entropy(joint);
        let h1 = JointHistogram::entropy(marginal_reference);
        let h2 = JointHistogram::entropy(marginal_candidate);

        let marginal = h1 + h2;
        if marginal == 0.0 {
            return Ok(0.0);
        }
        Ok(2.0 * (marginal - h12) / marginal)
    }

    fn name(&self) -> &'static str {
        "NMI"
    }

    fn direction(&self) -> Direction {
        Direction::Maximise
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;
    use burn::tensor::TensorData;

    type TestBackend = NdArray<f32>;

    fn plane(values: Vec<f32>, shape: [usize; 2]) -> Tensor<TestBackend, 2> {
        Tensor::from_data(TensorData::new(values, shape), &Default::default())
    }

    #[test]
    fn test_identical_images_score_one() {
        let values: Vec<f32> = (0..64).map(|v| (v % 5) as f32 * 10.0).collect();
        let a = plane(values.clone(), [8, 8]);
        let b = plane(values, [8, 8]);
        let score = NormalizedMutualInformation::default().score(&a, &b).unwrap();
        assert!((score - 1.0).abs() < 1e-5, "Expected 1.0, got {}", score);
    }

    #[test]
    fn test_independent_images_score_zero() {
        // a varies along rows, b along columns: statistically independent.
        let a: Vec<f32> = (0..16).map(|i| (i / 4) as f32).collect();
        let b: Vec<f32> = (0..16).map(|i| (i % 4) as f32).collect();
        let score = NormalizedMutualInformation::default()
            .score(&plane(a, [4, 4]), &plane(b, [4, 4]))
            .unwrap();
        assert!(score.abs() < 1e-5, "Expected 0.0, got {}", score);
    }

    #[test]
    fn test_invariant_to_intensity_scaling() {
        let a: Vec<f32> = (0..36).map(|i| ((i * 7) % 11) as f32).collect();
        let b: Vec<f32> = (0..36).map(|i| ((i * 5) % 6) as f32).collect();
        let scaled: Vec<f32> = a.iter().map(|v| v * 3.0 + 2.0).collect();

        let metric = NormalizedMutualInformation::default();
        let original = metric.score(&plane(a, [6, 6]), &plane(b.clone(), [6, 6])).unwrap();
        let rescaled = metric.score(&plane(scaled, [6, 6]), &plane(b, [6, 6])).unwrap();
        assert!((original - rescaled).abs() < 1e-5);
    }

    #[test]
    fn test_constant_images_score_zero() {
        let a = plane(vec![3.0; 9], [3, 3]);
        let b = plane(vec![0.0; 9], [3, 3]);
        let score = NormalizedMutualInformation::default().score(&a, &b).unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = plane(vec![0.0; 6], [2, 3]);
        let b = plane(vec![0.0; 6], [3, 2]);
        assert!(NormalizedMutualInformation::default().score(&a, &b).is_err());
    }
}
