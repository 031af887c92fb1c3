//! Joint histogram computation for mutual information metrics.
//!
//! Each image is binned over its own `[min, max]` range into `num_bins`
//! equal-width bins; the maximum falls in the last bin. A constant image
//! has its range widened by 0.5 on both sides. Counts are accumulated by
//! scattering ones into the flattened `bin1 · num_bins + bin2` cells.

use burn::tensor::{ElementConversion, Tensor};
use burn::tensor::backend::Backend;

/// Exact (hard-binned) joint histogram calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointHistogram {
    /// Number of histogram bins per axis
    pub num_bins: usize,
}

impl Default for JointHistogram {
    fn default() -> Self {
        Self::new(256)
    }
}

impl JointHistogram {
    pub fn new(num_bins: usize) -> Self {
        Self { num_bins }
    }

    /// Bin range of `values`: its own `[min, max]`, widened by ±0.5 when degenerate.
    pub fn range<B: Backend>(values: &Tensor<B, 1>) -> (f64, f64) {
        let min = values.clone().min().into_scalar().elem::<f64>();
        let max = values.clone().max().into_scalar().elem::<f64>();
        if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        }
    }

    /// Continuous bin coordinate of every value, floored and clamped to a bin index.
    pub fn bin_indices<B: Backend>(&self, values: Tensor<B, 1>) -> Tensor<B, 1> {
        let (low, high) = Self::range(&values);
        let scale = self.num_bins as f64 / (high - low);
        ((values - low) * scale)
            .floor()
            .clamp(0.0, (self.num_bins - 1) as f64)
    }

    /// Joint counts `[num_bins, num_bins]`; rows index `first`, columns `second`.
    pub fn compute_joint_histogram<B: Backend>(&self, first: Tensor<B, 1>, second: Tensor<B, 1>) -> Tensor<B, 2> {
        let device = first.device();
        let [n] = first.dims();
        let cells = self.num_bins * self.num_bins;

        let first_bins = self.bin_indices(first).int();
        let second_bins = self.bin_indices(second).int();
        let flat = first_bins.mul_scalar(self.num_bins as i64) + second_bins;

        Tensor::<B, 1>::zeros([cells], &device)
            .scatter(0, flat, Tensor::ones([n], &device))
            .reshape([self.num_bins, self.num_bins])
    }

    /// Shannon entropy in bits with `0 · log 0 = 0`.
    pub fn entropy<B: Backend, const D: usize>(p: Tensor<B, D>) -> f64 {
        let safe = p.clone() + p.clone().equal_elem(0.0).float();
        let sum = (p * safe.log()).sum().into_scalar().elem::<f64>();
        -sum / std::f64::consts::LN_2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;
    use burn::tensor::TensorData;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_bin_indices_span_range() {
        let device = Default::default();
        let values = Tensor::<TestBackend, 1>::from_floats([0.0, 1.0, 2.0, 4.0], &device);
        let indices = JointHistogram::new(4).bin_indices(values);
        let indices = indices.into_data().to_vec::<f32>().unwrap();
        // Width 1.0: 0 -> 0, 1 -> 1, 2 -> 2, max -> last bin
        assert_eq!(indices, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_constant_values_use_middle_bin() {
        let device = Default::default();
        let values = Tensor::<TestBackend, 1>::from_floats([5.0, 5.0, 5.0], &device);
        let indices = JointHistogram::new(4).bin_indices(values);
        let indices = indices.into_data().to_vec::<f32>().unwrap();
        assert_eq!(indices, vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_joint_histogram_counts() {
        let device = Default::default();
        let first = Tensor::<TestBackend, 1>::from_floats([0.0, 0.0, 1.0, 1.0], &device);
        let second = Tensor::<TestBackend, 1>::from_floats([0.0, 1.0, 1.0, 1.0], &device);
        let joint = JointHistogram::new(2).compute_joint_histogram(first, second);
        let counts = joint.into_data().to_vec::<f32>().unwrap();
        assert_eq!(counts, vec![1.0, 1.0, 0.0, 2.0]);
    }

    #[test]
    fn test_joint_histogram_chunked_matches_total() {
        let device = Default::default();
        let n = 40_100;
        let values: Vec<f32> = (0..n).map(|i| (i % 7) as f32).collect();
        let first = Tensor::<TestBackend, 1>::from_data(TensorData::new(values, [n]), &device);
        let joint = JointHistogram::new(8).compute_joint_histogram(first.clone(), first);
        let total = joint.sum().into_scalar().elem::<f64>();
        assert_eq!(total, n as f64);
    }

    #[test]
    fn test_joint_histogram_large_exact_counts() {
        let device = Default::default();
        let n = 40_000;
        let first: Vec<f32> = (0..n).map(|i| (i % 4) as f32).collect();
        let second: Vec<f32> = (0..n).map(|i| (i % 2) as f32).collect();
        let first = Tensor::<TestBackend, 1>::from_data(TensorData::new(first, [n]), &device);
        let second = Tensor::<TestBackend, 1>::from_data(TensorData::new(second, [n]), &device);

        let joint = JointHistogram::new(4).compute_joint_histogram(first, second);
        let counts = joint.into_data().to_vec::<f32>().unwrap();

        // first 0..=3 maps to bins 0..=3, second 0 and 1 to bins 0 and 3
        let mut expected = vec![0.0f32; 16];
        expected[0] = 10_000.0;
        expected[4 + 3] = 10_000.0;
        expected[2 * 4] = 10_000.0;
        expected[3 * 4 + 3] = 10_000.0;
        assert_eq!(counts, expected);
    }

    #[test]
    fn test_entropy_uniform() {
        let device = Default::default();
        let p = Tensor::<TestBackend, 1>::from_floats([0.25, 0.25, 0.25, 0.25, 0.0], &device);
        let h = JointHistogram::entropy(p);
        assert!((h - 2.0).abs() < 1e-6, "Expected 2 bits, got {}", h);
    }
}
