pub mod resample;

pub use resample::{Interpolation, PlaneResampler};
