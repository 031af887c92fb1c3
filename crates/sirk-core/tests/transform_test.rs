use proptest::prelude::*;
use sirk_core::spatial::{Affine, AxisName, Point3, Vector3, scanner_axis, plane_centroid};
use sirk_core::transform::{
    RigidAlgorithm, RigidParameters, RigidTransformation, TransformationAlgorithm,
};
use std::f64::consts::FRAC_PI_2;

fn slice_affine() -> Affine {
    Affine::new(
        -0.7, 0.0, 0.0, 120.0,
        0.0, 0.7, 0.0, -80.0,
        0.0, 0.0, 5.0, 40.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

proptest! {
    #[test]
    fn test_parameter_roundtrip(
        tx in -200.0f64..200.0, ty in -200.0f64..200.0, tz in -200.0f64..200.0,
        rx in -3.1f64..3.1, ry in -1.5f64..1.5, rz in -3.1f64..3.1
    ) {
        let p = RigidParameters::new([tx, ty, tz], [rx, ry, rz]);
        let t = RigidTransformation::from_rigid_parameters(&p);
        let decomposition = t.decompose();

        prop_assert!(!decomposition.gimbal_locked);
        let expected = p.to_array();
        let actual = decomposition.parameters.to_array();
        for i in 0..6 {
            prop_assert!((expected[i] - actual[i]).abs() < 1e-6, "Parameter {} mismatch: {} vs {}", i, expected[i], actual[i]);
        }
    }

    #[test]
    fn test_translate_then_inverse_restores(
        step in -50.0f64..50.0,
        ax in -1.0f64..1.0, ay in -1.0f64..1.0, az in -1.0f64..1.0
    ) {
        let axis = Vector3::new(ax, ay, az);
        let algorithm = RigidAlgorithm;
        let start = RigidTransformation::from_parameters(&[1.0, 2.0, 3.0, 0.1, 0.2, 0.3]).unwrap();
        let moved = algorithm.translate(&start, &axis, step).unwrap();
        let back = algorithm.translate(&moved, &axis, -step).unwrap();
        prop_assert!((back.matrix() - start.matrix()).norm() < 1e-9);
    }
}

#[test]
fn test_gimbal_lock_is_flagged() {
    let t = RigidTransformation::from_parameters(&[0.0, 0.0, 0.0, 0.25, FRAC_PI_2, -0.4]).unwrap();
    let decomposition = t.decompose();
    assert!(decomposition.gimbal_locked);
    assert_eq!(decomposition.parameters.rotation[2], 0.0);

    let rebuilt = RigidTransformation::from_rigid_parameters(&decomposition.parameters);
    assert!((rebuilt.matrix() - t.matrix()).norm() < 1e-9);
}

#[test]
fn test_scanner_translation_moves_plane() {
    let algorithm = RigidAlgorithm;
    let original = slice_affine();
    let delta = algorithm
        .translate(&RigidTransformation::identity(), &scanner_axis(AxisName::X), 2.0)
        .unwrap();
    let current = delta.compose(&original);

    assert!((current[(0, 3)] - 118.0).abs() < 1e-12, "Scanner x points towards -x");
    assert_eq!(current[(1, 3)], -80.0);
    assert_eq!(current[(2, 3)], 40.0);
}

#[test]
fn test_rotation_about_centroid_keeps_centroid() {
    let algorithm = RigidAlgorithm;
    let original = slice_affine();
    let shape = [64, 48];
    let centre = plane_centroid(shape, &original);

    let delta = algorithm
        .rotate(&original, &original, &centre, &Vector3::new(0.3, -0.2, 0.9), 0.35)
        .unwrap();
    let current = delta.compose(&original);
    let moved = plane_centroid(shape, &current);

    assert!((moved - centre).norm() < 1e-9, "Centroid moved from {:?} to {:?}", centre, moved);
}

#[test]
fn test_successive_rotations_accumulate() {
    let algorithm = RigidAlgorithm;
    let original = slice_affine();
    let centre = Point3::new(100.0, -60.0, 40.0);
    let axis = Vector3::new(0.0, 0.0, 1.0);

    let first = algorithm.rotate(&original, &original, &centre, &axis, 0.2).unwrap();
    let current = first.compose(&original);
    let second = algorithm.rotate(&current, &original, &centre, &axis, 0.3).unwrap();
    let once = algorithm.rotate(&original, &original, &centre, &axis, 0.5).unwrap();

    assert!((second.matrix() - once.matrix()).norm() < 1e-9);
}
