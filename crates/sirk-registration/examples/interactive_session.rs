//! Interactive Session Example
//!
//! Builds a synthetic case with three parallel slices cut from a ramp volume,
//! nudges the stack off its true pose and walks it back with macro commands.
//!
//! Usage:
//!   RUST_LOG=debug cargo run --example interactive_session

use burn::tensor::{Tensor, TensorData};
use burn_ndarray::NdArray;
use sirk_core::image::{SlicePlane, Volume};
use sirk_core::spatial::{Affine, AxisName};
use sirk_registration::{CaseData, Frame, Granularity, MetricKind, RegistrationSession, SessionConfig};

type Backend = NdArray<f32>;

const DIMS: [usize; 3] = [32, 32, 16];
const PLANE: [usize; 2] = [16, 16];

fn intensity(x: usize, y: usize, z: usize) -> f32 {
    let (x, y, z) = (x as f32, y as f32, z as f32);
    1.0 + 100.0 * ((x - 16.0).powi(2) + (y - 16.0).powi(2) + 4.0 * (z - 8.0).powi(2)).sqrt().recip().min(1.0)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let device = Default::default();

    let mut body = Vec::with_capacity(DIMS.iter().product());
    let mut organ = Vec::with_capacity(DIMS.iter().product());
    for x in 0..DIMS[0] {
        for y in 0..DIMS[1] {
            for z in 0..DIMS[2] {
                body.push(intensity(x, y, z));
                organ.push(if (12..20).contains(&x) && (12..20).contains(&y) { 1.0f32 } else { 0.0 });
            }
        }
    }
    let body = Volume::<Backend>::new(Tensor::from_data(TensorData::new(body, DIMS), &device), Affine::identity());
    let organ = Volume::<Backend>::new(Tensor::from_data(TensorData::new(organ, DIMS), &device), Affine::identity());

    let mut case = CaseData::new("synthetic", body, organ);
    for z in [6usize, 8, 10] {
        let mut pixels = Vec::with_capacity(PLANE[0] * PLANE[1]);
        for i in 0..PLANE[0] {
            for j in 0..PLANE[1] {
                pixels.push(intensity(i + 8, j + 8, z).trunc());
            }
        }
        let mut affine = Affine::identity();
        affine[(0, 3)] = 8.0;
        affine[(1, 3)] = 8.0;
        affine[(2, 3)] = z as f64;
        let plane = SlicePlane::unmasked(Tensor::from_data(TensorData::new(pixels, PLANE), &device), affine);
        case = case.with_slice(format!("slice-{:02}", z), plane);
    }

    let config = SessionConfig::default().with_active_metric(MetricKind::SumOfAbsoluteDifferences);
    let step = config.translation_step;
    let angle = config.rotation_step();
    let mut session = RegistrationSession::new(config, case)?;
    let reference = session.slice_ids()[0].clone();

    println!("Registration session for case {}", session.case_id());
    report(&session)?;

    println!("\nPerturbing the stack");
    session.translate(&reference, Frame::Scanner, AxisName::X, 2.0 * step, Granularity::Macro)?;
    session.rotate(&reference, AxisName::Z, 3.0 * angle, Granularity::Macro)?;
    report(&session)?;

    println!("\nUndoing the rotation");
    session.undo(&reference, Granularity::Macro)?;
    report(&session)?;

    println!("\nReturning to the best poses");
    session.optimise(&reference, Granularity::Macro)?;
    report(&session)?;

    println!("\nSaved transformations");
    for row in session.export_table().rows() {
        println!(
            "  {} t=({:.2}, {:.2}, {:.2}) r=({:.4}, {:.4}, {:.4})",
            row.slice_id,
            row.translation_x,
            row.translation_y,
            row.translation_z,
            row.rotation_x,
            row.rotation_y,
            row.rotation_z,
        );
    }

    Ok(())
}

fn report(session: &RegistrationSession<Backend>) -> anyhow::Result<()> {
    for slice_id in session.slice_ids() {
        let position = session.history_position(&slice_id)?;
        let score = session.evaluation(&slice_id)?.map(|evaluation| evaluation.score);
        let nmi = session.evaluate(&slice_id, MetricKind::NormalizedMutualInformation)?;
        println!(
            "  {}: entry {}/{} optimal {:?} SAD {:?} NMI {:.4}",
            slice_id,
            position.current + 1,
            position.len,
            position.optimal,
            score,
            nmi,
        );
    }
    Ok(())
}
