//! Image types and operations.
//!
//! This module provides the 3D reference volume and 2D slice plane types
//! together with the pixel utilities used to derive masks from them.

pub mod volume;
pub mod plane;
pub mod grid;
pub mod pixel;

pub use volume::Volume;
pub use plane::SlicePlane;
pub use grid::plane_index_grid;
pub use pixel::{binarise, discretise, max_value, is_single_label};
