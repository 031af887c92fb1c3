pub mod error;
pub mod spatial;
pub mod transform;
pub mod interpolation;
pub mod image;
pub mod filter;

pub use error::{CoreError, Result};
pub use image::{Volume, SlicePlane};
pub use spatial::{Affine, Point3, Vector3, AxisName};
pub use transform::{RigidTransformation, RigidParameters, TransformationData, TransformationAlgorithm, RigidAlgorithm};
pub use filter::{Interpolation, PlaneResampler};
