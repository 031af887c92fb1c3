//! Closed set of available metrics.

use std::fmt;
use std::str::FromStr;
use burn::tensor::Tensor;
use burn::tensor::backend::Backend;
use serde::{Serialize, Deserialize};
use super::normalized_mutual_information::NormalizedMutualInformation;
use super::sum_absolute_difference::SumOfAbsoluteDifferences;
use super::trait_::{Direction, Metric};
use crate::error::{RegistrationError, Result};

/// Metric selectable for a session.
///
/// Each kind carries its scoring function and the direction in which its
/// score improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricKind {
    #[serde(rename = "NMI", alias = "normalised_mutual_information")]
    NormalizedMutualInformation,
    #[serde(rename = "SAD", alias = "sum_absolute_difference")]
    SumOfAbsoluteDifferences,
}

impl MetricKind {
    pub const ALL: [MetricKind; 2] = [
        MetricKind::NormalizedMutualInformation,
        MetricKind::SumOfAbsoluteDifferences,
    ];

    /// Short name, as accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            MetricKind::NormalizedMutualInformation => "NMI",
            MetricKind::SumOfAbsoluteDifferences => "SAD",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            MetricKind::NormalizedMutualInformation => Direction::Maximise,
            MetricKind::SumOfAbsoluteDifferences => Direction::Minimise,
        }
    }

    /// Score `candidate` against `reference` with this metric.
    pub fn score<B: Backend>(self, candidate: &Tensor<B, 2>, reference: &Tensor<B, 2>) -> Result<f64> {
        match self {
            MetricKind::NormalizedMutualInformation => {
                NormalizedMutualInformation::default().score(candidate, reference)
            }
            MetricKind::SumOfAbsoluteDifferences => SumOfAbsoluteDifferences.score(candidate, reference),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricKind {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "NMI" | "normalised_mutual_information" => Ok(MetricKind::NormalizedMutualInformation),
            "SAD" | "sum_absolute_difference" => Ok(MetricKind::SumOfAbsoluteDifferences),
            other => Err(RegistrationError::unsupported_metric(other)),
        }
    }
}
