//! Linear interpolation implementation.
//!
//! This module provides linear interpolation for 2D and 3D data with zero
//! fill outside the grid.

use burn::tensor::{Tensor, Int};
use burn::tensor::backend::Backend;
use serde::{Serialize, Deserialize};
use super::trait_::Interpolator;
use super::validity_mask;

/// Linear Interpolator.
///
/// Performs linear interpolation (bilinear for 2D, trilinear for 3D).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearInterpolator;

impl LinearInterpolator {
    /// Create a new linear interpolator.
    pub fn new() -> Self {
        Self
    }
}

impl<B: Backend> Interpolator<B> for LinearInterpolator {
    fn interpolate<const D: usize>(&self, data: &Tensor<B, D>, indices: Tensor<B, 2>) -> Tensor<B, 1> {
        match D {
            3 => self.interpolate_3d(data, indices),
            2 => self.interpolate_2d(data, indices),
            _ => panic!("LinearInterpolator only supports 2D and 3D tensors"),
        }
    }
}

impl LinearInterpolator {
    fn interpolate_3d<B: Backend, const D: usize>(&self, data: &Tensor<B, D>, indices: Tensor<B, 2>) -> Tensor<B, 1> {
        let shape = data.shape();
        let d0 = shape.dims[0];
        let d1 = shape.dims[1];
        let d2 = shape.dims[2];

        // indices: [Batch, 3] -> (i, j, k)
        let i = indices.clone().narrow(1, 0, 1).squeeze::<1>(1);
        let j = indices.clone().narrow(1, 1, 1).squeeze::<1>(1);
        let k = indices.narrow(1, 2, 1).squeeze::<1>(1);

        let valid = validity_mask(&[i.clone(), j.clone(), k.clone()], &[d0, d1, d2]);

        let i0 = i.clone().floor();
        let j0 = j.clone().floor();
        let k0 = k.clone().floor();

        let wi = i - i0.clone();
        let wj = j - j0.clone();
        let wk = k - k0.clone();

        let i1 = i0.clone() + 1.0;
        let j1 = j0.clone() + 1.0;
        let k1 = k0.clone() + 1.0;

        // Clamped for gathering; out-of-bounds samples are zeroed by `valid`.
        let i0_i = i0.clamp(0.0, (d0 - 1) as f64).int();
        let j0_i = j0.clamp(0.0, (d1 - 1) as f64).int();
        let k0_i = k0.clamp(0.0, (d2 - 1) as f64).int();
        let i1_i = i1.clamp(0.0, (d0 - 1) as f64).int();
        let j1_i = j1.clamp(0.0, (d1 - 1) as f64).int();
        let k1_i = k1.clamp(0.0, (d2 - 1) as f64).int();

        let stride_i = (d1 * d2) as i32;
        let stride_j = d2 as i32;

        let flat_data = data.clone().reshape([d0 * d1 * d2]);

        let v000 = Self::gather_3d(&flat_data, &i0_i, &j0_i, &k0_i, stride_i, stride_j);
        let v001 = Self::gather_3d(&flat_data, &i0_i, &j0_i, &k1_i, stride_i, stride_j);
        let v010 = Self::gather_3d(&flat_data, &i0_i, &j1_i, &k0_i, stride_i, stride_j);
        let v011 = Self::gather_3d(&flat_data, &i0_i, &j1_i, &k1_i, stride_i, stride_j);
        let v100 = Self::gather_3d(&flat_data, &i1_i, &j0_i, &k0_i, stride_i, stride_j);
        let v101 = Self::gather_3d(&flat_data, &i1_i, &j0_i, &k1_i, stride_i, stride_j);
        let v110 = Self::gather_3d(&flat_data, &i1_i, &j1_i, &k0_i, stride_i, stride_j);
        let v111 = Self::gather_3d(&flat_data, &i1_i, &j1_i, &k1_i, stride_i, stride_j);

        let one_minus_wi = wi.ones_like() - wi.clone();
        let one_minus_wj = wj.ones_like() - wj.clone();
        let one_minus_wk = wk.ones_like() - wk.clone();

        // Along i
        let c00 = v000 * one_minus_wi.clone() + v100 * wi.clone();
        let c01 = v001 * one_minus_wi.clone() + v101 * wi.clone();
        let c10 = v010 * one_minus_wi.clone() + v110 * wi.clone();
        let c11 = v011 * one_minus_wi + v111 * wi;

        // Along j
        let c0 = c00 * one_minus_wj.clone() + c10 * wj.clone();
        let c1 = c01 * one_minus_wj + c11 * wj;

        // Along k
        (c0 * one_minus_wk + c1 * wk) * valid
    }

    #[inline]
    fn gather_3d<B: Backend>(
        flat_data: &Tensor<B, 1>,
        ii: &Tensor<B, 1, Int>,
        ji: &Tensor<B, 1, Int>,
        ki: &Tensor<B, 1, Int>,
        stride_i: i32,
        stride_j: i32,
    ) -> Tensor<B, 1> {
        let idx = ii.clone() * stride_i + ji.clone() * stride_j + ki.clone();
        flat_data.clone().gather(0, idx)
    }

    fn interpolate_2d<B: Backend, const D: usize>(&self, data: &Tensor<B, D>, indices: Tensor<B, 2>) -> Tensor<B, 1> {
        let shape = data.shape();
        let d0 = shape.dims[0];
        let d1 = shape.dims[1];

        let i = indices.clone().narrow(1, 0, 1).squeeze::<1>(1);
        let j = indices.narrow(1, 1, 1).squeeze::<1>(1);

        let valid = validity_mask(&[i.clone(), j.clone()], &[d0, d1]);

        let i0 = i.clone().floor();
        let j0 = j.clone().floor();

        let wi = i - i0.clone();
        let wj = j - j0.clone();

        let i1 = i0.clone() + 1.0;
        let j1 = j0.clone() + 1.0;

        let i0_i = i0.clamp(0.0, (d0 - 1) as f64).int();
        let j0_i = j0.clamp(0.0, (d1 - 1) as f64).int();
        let i1_i = i1.clamp(0.0, (d0 - 1) as f64).int();
        let j1_i = j1.clamp(0.0, (d1 - 1) as f64).int();

        let stride_i = d1 as i32;
        let flat_data = data.clone().reshape([d0 * d1]);

        let v00 = Self::gather_2d(&flat_data, &i0_i, &j0_i, stride_i);
        let v01 = Self::gather_2d(&flat_data, &i0_i, &j1_i, stride_i);
        let v10 = Self::gather_2d(&flat_data, &i1_i, &j0_i, stride_i);
        let v11 = Self::gather_2d(&flat_data, &i1_i, &j1_i, stride_i);

        let one_minus_wi = wi.ones_like() - wi.clone();
        let one_minus_wj = wj.ones_like() - wj.clone();

        let c0 = v00 * one_minus_wi.clone() + v10 * wi.clone();
        let c1 = v01 * one_minus_wi + v11 * wi;

        (c0 * one_minus_wj + c1 * wj) * valid
    }

    #[inline]
    fn gather_2d<B: Backend>(
        flat_data: &Tensor<B, 1>,
        ii: &Tensor<B, 1, Int>,
        ji: &Tensor<B, 1, Int>,
        stride_i: i32,
    ) -> Tensor<B, 1> {
        let idx = ii.clone() * stride_i + ji.clone();
        flat_data.clone().gather(0, idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;
    use burn::tensor::TensorData;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_linear_interpolator_2d() {
        let device = Default::default();
        // [[0, 1], [2, 3]]: value = 2 * i + j
        let data = Tensor::<TestBackend, 2>::from_data(
            TensorData::new(vec![0.0f32, 1.0, 2.0, 3.0], [2, 2]),
            &device,
        );
        let indices = Tensor::<TestBackend, 2>::from_floats(
            [[0.0, 0.0], [1.0, 1.0], [0.5, 0.5], [0.0, 0.5], [1.0, 0.0]],
            &device,
        );

        let result = LinearInterpolator::new().interpolate(&data, indices);
        let values = result.into_data().to_vec::<f32>().unwrap();
        let expected = [0.0, 3.0, 1.5, 0.5, 2.0];
        for (v, e) in values.iter().zip(expected.iter()) {
            assert!((v - e).abs() < 1e-6, "Expected {}, got {}", e, v);
        }
    }

    #[test]
    fn test_linear_interpolator_3d_is_exact_for_linear_field() {
        let device = Default::default();
        let dims = [3usize, 4, 5];
        let mut values = Vec::new();
        for i in 0..dims[0] {
            for j in 0..dims[1] {
                for k in 0..dims[2] {
                    values.push((100 * i + 10 * j + k) as f32);
                }
            }
        }
        let data = Tensor::<TestBackend, 3>::from_data(TensorData::new(values, dims), &device);
        let indices = Tensor::<TestBackend, 2>::from_floats(
            [[0.5, 1.25, 3.5], [2.0, 3.0, 4.0], [1.0, 0.0, 0.75]],
            &device,
        );

        let result = LinearInterpolator::new().interpolate(&data, indices);
        let values = result.into_data().to_vec::<f32>().unwrap();
        let expected = [50.0 + 12.5 + 3.5, 234.0, 100.75];
        for (v, e) in values.iter().zip(expected.iter()) {
            assert!((v - e).abs() < 1e-4, "Expected {}, got {}", e, v);
        }
    }

    #[test]
    fn test_linear_interpolator_zero_outside() {
        let device = Default::default();
        let data = Tensor::<TestBackend, 3>::ones([2, 2, 2], &device);
        let indices = Tensor::<TestBackend, 2>::from_floats(
            [[-0.1, 0.0, 0.0], [0.0, 1.01, 0.0], [0.0, 0.0, 5.0], [1.0, 1.0, 1.0]],
            &device,
        );

        let result = LinearInterpolator::new().interpolate(&data, indices);
        let values = result.into_data().to_vec::<f32>().unwrap();
        assert_eq!(values, vec![0.0, 0.0, 0.0, 1.0]);
    }
}
