//! Transform types and operations.
//!
//! This module provides the rigid transformation value type and the
//! algorithms that turn interactive steps into new transformations.

pub mod rodrigues;
pub mod rigid;
pub mod trait_;
pub mod algorithm;

pub use rodrigues::rodrigues;
pub use rigid::{
    Decomposition, RigidParameters, RigidTransformation, TransformationData, GIMBAL_TOLERANCE,
};
pub use trait_::TransformationAlgorithm;
pub use algorithm::{RigidAlgorithm, translate, rotate};
