use burn::tensor::{Tensor, TensorData};
use burn_ndarray::NdArray;
use proptest::prelude::*;
use sirk_core::filter::{Interpolation, PlaneResampler};
use sirk_core::image::Volume;
use sirk_core::spatial::Affine;
use sirk_core::transform::{RigidParameters, RigidTransformation};

type B = NdArray<f32>;

fn ramp_volume(dims: [usize; 3], affine: Affine) -> Volume<B> {
    let device = Default::default();
    let mut values = Vec::with_capacity(dims.iter().product());
    for i in 0..dims[0] {
        for j in 0..dims[1] {
            for k in 0..dims[2] {
                values.push((i + 2 * j + 3 * k) as f32);
            }
        }
    }
    Volume::new(Tensor::<B, 3>::from_data(TensorData::new(values, dims), &device), affine)
}

#[test]
fn test_constant_volume_inside_grid() {
    let device = Default::default();
    let grid = Volume::new(Tensor::<B, 3>::ones([8, 8, 8], &device) * 7.0, Affine::identity());
    let resampler = PlaneResampler::new([4, 4], &grid, Interpolation::Linear).unwrap();

    let mut plane = Affine::identity();
    plane[(0, 3)] = 1.5;
    plane[(1, 3)] = 2.25;
    plane[(2, 3)] = 3.75;

    let values = resampler.resample(&plane).unwrap().into_data().to_vec::<f32>().unwrap();
    assert!(values.iter().all(|v| (v - 7.0).abs() < 1e-5), "Expected constant 7, got {:?}", values);
}

/// Rotated 3×3 plane anchored at the centre of an 8³ grid. Every pixel lies
/// within 2√2 of the anchor, so all samples stay inside `[0, 7]`.
fn oblique_plane(rotation: [f64; 3]) -> Affine {
    let parameters = RigidParameters::new([3.5, 3.5, 3.5], rotation);
    RigidTransformation::from_rigid_parameters(&parameters).into_matrix()
}

#[test]
fn test_constant_volume_oblique_plane() {
    let device = Default::default();
    let grid = Volume::new(Tensor::<B, 3>::ones([8, 8, 8], &device) * 7.0, Affine::identity());
    let resampler = PlaneResampler::new([3, 3], &grid, Interpolation::Linear).unwrap();

    let plane = oblique_plane([0.4, -0.7, 1.1]);
    let values = resampler.resample(&plane).unwrap().into_data().to_vec::<f32>().unwrap();
    assert!(values.iter().all(|v| (v - 7.0).abs() < 1e-4), "Expected constant 7, got {:?}", values);
}

proptest! {
    #[test]
    fn test_constant_volume_any_in_bounds_plane(
        rx in -3.1f64..3.1, ry in -1.5f64..1.5, rz in -3.1f64..3.1,
        nearest in any::<bool>()
    ) {
        let device = Default::default();
        let grid = Volume::new(Tensor::<B, 3>::ones([8, 8, 8], &device) * 7.0, Affine::identity());
        let interpolation = if nearest { Interpolation::Nearest } else { Interpolation::Linear };
        let resampler = PlaneResampler::new([3, 3], &grid, interpolation).unwrap();

        let plane = oblique_plane([rx, ry, rz]);
        let values = resampler.resample(&plane).unwrap().into_data().to_vec::<f32>().unwrap();
        for v in values {
            prop_assert!((v - 7.0).abs() < 1e-4, "Expected constant 7, got {}", v);
        }
    }
}

#[test]
fn test_out_of_bounds_is_zero() {
    let device = Default::default();
    let grid = Volume::new(Tensor::<B, 3>::ones([4, 4, 4], &device), Affine::identity());
    let resampler = PlaneResampler::new([6, 2], &grid, Interpolation::Linear).unwrap();

    let values = resampler.resample(&Affine::identity()).unwrap().into_data().to_vec::<f32>().unwrap();
    // Rows x = 0..=3 are inside, x = 4 and 5 are outside.
    assert_eq!(values, vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0]);

    let mut far = Affine::identity();
    far[(2, 3)] = 10.0;
    let values = resampler.resample(&far).unwrap().into_data().to_vec::<f32>().unwrap();
    assert!(values.iter().all(|&v| v == 0.0));
}

#[test]
fn test_grid_affine_is_inverted() {
    // Voxel spacing 2 mm and an origin shift: physical p maps to index (p - o) / 2.
    let grid_affine = Affine::new(
        2.0, 0.0, 0.0, -4.0,
        0.0, 2.0, 0.0, -4.0,
        0.0, 0.0, 2.0, -4.0,
        0.0, 0.0, 0.0, 1.0,
    );
    let grid = ramp_volume([6, 6, 6], grid_affine);
    let resampler = PlaneResampler::new([2, 2], &grid, Interpolation::Linear).unwrap();

    // Plane pixel (x, y) sits at physical (x, y, 0): index ((x + 4) / 2, (y + 4) / 2, 2).
    let values = resampler.resample(&Affine::identity()).unwrap().into_data().to_vec::<f32>().unwrap();
    let expected = [
        2.0 + 4.0 + 6.0,
        2.0 + 2.0 * 2.5 + 6.0,
        2.5 + 4.0 + 6.0,
        2.5 + 2.0 * 2.5 + 6.0,
    ];
    for (v, e) in values.iter().zip(expected.iter()) {
        assert!((v - e).abs() < 1e-4, "Expected {}, got {}", e, v);
    }
}

#[test]
fn test_multi_label_nearest_keeps_labels() {
    let device = Default::default();
    let mut labels = vec![0.0f32; 27];
    for (n, v) in labels.iter_mut().enumerate() {
        *v = [0.0, 3.0, 5.0][n % 3];
    }
    let grid = Volume::new(
        Tensor::<B, 3>::from_data(TensorData::new(labels, [3, 3, 3]), &device),
        Affine::identity(),
    );
    let interpolation = Interpolation::for_organ(&grid);
    assert_eq!(interpolation, Interpolation::Nearest);

    let resampler = PlaneResampler::new([3, 3], &grid, interpolation).unwrap();
    let mut plane = Affine::identity();
    plane[(0, 3)] = 0.3;
    plane[(1, 3)] = 0.4;
    plane[(2, 3)] = 0.6;
    let values = resampler.resample(&plane).unwrap().into_data().to_vec::<f32>().unwrap();
    assert!(values.iter().all(|v| [0.0, 3.0, 5.0].contains(v)), "Invented label in {:?}", values);
}

#[test]
fn test_single_label_linear_blends() {
    let device = Default::default();
    let mut labels = vec![0.0f32; 8];
    labels[7] = 1.0;
    let grid = Volume::new(
        Tensor::<B, 3>::from_data(TensorData::new(labels, [2, 2, 2]), &device),
        Affine::identity(),
    );
    let interpolation = Interpolation::for_organ(&grid);
    assert_eq!(interpolation, Interpolation::Linear);

    let resampler = PlaneResampler::new([1, 1], &grid, interpolation).unwrap();
    let mut plane = Affine::identity();
    plane[(0, 3)] = 0.5;
    plane[(1, 3)] = 0.5;
    plane[(2, 3)] = 0.5;
    let values = resampler.resample(&plane).unwrap().into_data().to_vec::<f32>().unwrap();
    assert!((values[0] - 0.125).abs() < 1e-6);
}
