//! Session configuration.

use serde::{Serialize, Deserialize};
use crate::error::{RegistrationError, Result};
use crate::metric::MetricKind;

/// Configuration of a registration session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Default translation step in millimetres.
    pub translation_step: f64,
    /// Default rotation step in degrees.
    pub rotation_step_degrees: f64,
    /// Metrics to build evaluators for.
    pub metrics: Vec<MetricKind>,
    /// Metric that decides the optimal pose.
    pub active_metric: MetricKind,
    /// Threshold applied to a single-organ label when building its overlay mask.
    pub organ_threshold: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            translation_step: 1.0,
            rotation_step_degrees: 1.0,
            metrics: MetricKind::ALL.to_vec(),
            active_metric: MetricKind::NormalizedMutualInformation,
            organ_threshold: 0.5,
        }
    }
}

impl SessionConfig {
    /// Create a new session config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the translation step.
    pub fn with_translation_step(mut self, step: f64) -> Self {
        self.translation_step = step;
        self
    }

    /// Set the rotation step in degrees.
    pub fn with_rotation_step_degrees(mut self, degrees: f64) -> Self {
        self.rotation_step_degrees = degrees;
        self
    }

    /// Set the configured metrics.
    pub fn with_metrics(mut self, metrics: impl IntoIterator<Item = MetricKind>) -> Self {
        self.metrics = metrics.into_iter().collect();
        self
    }

    /// Set the configured metrics by name.
    ///
    /// # Errors
    /// `UnsupportedMetric` for the first name that does not parse.
    pub fn with_metric_names<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.metrics = names
            .into_iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }

    /// Set the active metric.
    pub fn with_active_metric(mut self, metric: MetricKind) -> Self {
        self.active_metric = metric;
        self
    }

    /// Set the organ overlay threshold.
    pub fn with_organ_threshold(mut self, threshold: f64) -> Self {
        self.organ_threshold = threshold;
        self
    }

    /// Rotation step in radians.
    pub fn rotation_step(&self) -> f64 {
        self.rotation_step_degrees.to_radians()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// `InvalidConfiguration` for non-positive or non-finite steps, an empty
    /// metric list, or a non-finite threshold; `UnsupportedMetric` when the
    /// active metric is not among the configured ones.
    pub fn validate(&self) -> Result<()> {
        if !(self.translation_step.is_finite() && self.translation_step > 0.0) {
            return Err(RegistrationError::invalid_configuration(format!(
                "translation step must be positive, got {}",
                self.translation_step
            )));
        }
        if !(self.rotation_step_degrees.is_finite() && self.rotation_step_degrees > 0.0) {
            return Err(RegistrationError::invalid_configuration(format!(
                "rotation step must be positive, got {}",
                self.rotation_step_degrees
            )));
        }
        if self.metrics.is_empty() {
            return Err(RegistrationError::invalid_configuration("at least one metric is required"));
        }
        if !self.organ_threshold.is_finite() {
            return Err(RegistrationError::invalid_configuration(format!(
                "organ threshold must be finite, got {}",
                self.organ_threshold
            )));
        }
        if !self.metrics.contains(&self.active_metric) {
            return Err(RegistrationError::unsupported_metric(format!(
                "active metric {} is not configured",
                self.active_metric
            )));
        }
        Ok(())
    }
}
