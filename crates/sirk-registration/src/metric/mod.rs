//! Metric implementations.
//!
//! This module contains the similarity metrics used to score a resampled
//! plane against its reference slice.

pub mod trait_;
pub mod kind;
pub mod histogram;
pub mod normalized_mutual_information;
pub mod sum_absolute_difference;

pub use trait_::{Direction, Metric};
pub use kind::MetricKind;
pub use histogram::JointHistogram;
pub use normalized_mutual_information::NormalizedMutualInformation;
pub use sum_absolute_difference::SumOfAbsoluteDifferences;
