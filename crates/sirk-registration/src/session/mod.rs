//! Interactive registration session.
//!
//! A session owns every slice of one case in an identifier-keyed arena.
//! Each command either targets one slice (micro) or every slice of the case
//! (macro). Commands are computed on copies of the affected slice states and
//! committed only when every target succeeded, so a failing command leaves
//! the session exactly as it was.

mod case;
mod state;

pub use case::CaseData;
pub use state::SliceState;

use std::collections::BTreeMap;
use burn::tensor::Tensor;
use burn::tensor::backend::Backend;
use serde::{Serialize, Deserialize};
use sirk_core::filter::{Interpolation, PlaneResampler};
use sirk_core::image::discretise;
use sirk_core::spatial::{
    affine_axis, mean_axis, mean_point, plane_centroid, scanner_axis, Affine, AxisName, Point3, Vector3,
};
use sirk_core::transform::{
    RigidAlgorithm, RigidParameters, RigidTransformation, TransformationAlgorithm, TransformationData,
};
use crate::config::SessionConfig;
use crate::error::{RegistrationError, Result};
use crate::evaluator::{Evaluation, Evaluator};
use crate::history::TransformationHistory;
use crate::masking::{apply_mask, evaluation_mask, organ_mask};
use crate::metric::MetricKind;
use crate::table::{TransformationRow, TransformationTable};
use crate::SliceId;

/// Coordinate frame a translation axis is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frame {
    /// Fixed patient axes.
    Scanner,
    /// Axes of the reference slice's current affine.
    Slice,
}

/// Whether a command targets one slice or the whole case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Micro,
    Macro,
}

/// Read-out of a slice's history pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPosition {
    pub current: usize,
    pub optimal: Option<usize>,
    pub len: usize,
}

type Staged<B> = Vec<(SliceId, SliceState<B>)>;

/// Registration session for one case.
///
/// # Type Parameters
/// * `B` - The backend for tensor operations
pub struct RegistrationSession<B: Backend> {
    config: SessionConfig,
    case_id: String,
    algorithm: Box<dyn TransformationAlgorithm>,
    body_resampler: PlaneResampler<B>,
    organ_resampler: PlaneResampler<B>,
    slices: BTreeMap<SliceId, SliceState<B>>,
    evaluators: BTreeMap<MetricKind, Evaluator>,
    active_metric: MetricKind,
}

impl<B: Backend> std::fmt::Debug for RegistrationSession<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationSession")
            .field("config", &self.config)
            .field("case_id", &self.case_id)
            .field("body_resampler", &self.body_resampler)
            .field("organ_resampler", &self.organ_resampler)
            .field("slices", &self.slices)
            .field("evaluators", &self.evaluators)
            .field("active_metric", &self.active_metric)
            .finish_non_exhaustive()
    }
}

impl<B: Backend> RegistrationSession<B> {
    /// Set up a session with the rigid algorithm.
    ///
    /// Slices are seeded from the case's table when it holds a row for them
    /// and start at the identity otherwise. Every slice is resampled and
    /// scored once, which sets the first running best.
    ///
    /// # Errors
    /// * `InvalidConfiguration` for an invalid config or a case without slices
    /// * `ShapeMismatch` when slices differ in shape
    /// * `SingularAffine` when a grid or slice affine cannot be inverted
    pub fn new(config: SessionConfig, case: CaseData<B>) -> Result<Self> {
        Self::with_algorithm(config, case, Box::new(RigidAlgorithm))
    }

    /// Set up a session with a custom transformation algorithm.
    pub fn with_algorithm(
        config: SessionConfig,
        case: CaseData<B>,
        algorithm: Box<dyn TransformationAlgorithm>,
    ) -> Result<Self> {
        config.validate()?;

        let CaseData { case_id, body, organ, slices, table } = case;
        let plane_size = slices
            .values()
            .next()
            .map(|plane| plane.shape())
            .ok_or_else(|| RegistrationError::invalid_configuration(format!("case {} has no slices", case_id)))?;
        if let Some(plane) = slices.values().find(|plane| plane.shape() != plane_size) {
            return Err(RegistrationError::shape_mismatch(&plane_size, &plane.shape()));
        }

        let organ_interpolation = Interpolation::for_organ(&organ);
        let body_resampler = PlaneResampler::new(plane_size, &body, Interpolation::for_body())?;
        let organ_resampler = PlaneResampler::new(plane_size, &organ, organ_interpolation)?;

        let evaluators = config
            .metrics
            .iter()
            .map(|&kind| (kind, Evaluator::new(kind, slices.keys().cloned())))
            .collect();

        let slices = slices
            .into_iter()
            .map(|(slice_id, plane)| {
                let seed = seed_transformation(table.as_ref(), &slice_id);
                let state = SliceState::new(plane, TransformationHistory::new(seed));
                (slice_id, state)
            })
            .collect();

        let mut session = Self {
            active_metric: config.active_metric,
            config,
            case_id,
            algorithm,
            body_resampler,
            organ_resampler,
            slices,
            evaluators,
        };

        let targets = session.slice_ids();
        let (staged, evaluator) = session.stage(&targets, |_, _| Ok(true))?;
        session.commit(staged, evaluator);

        tracing::info!(
            case = %session.case_id,
            slices = session.slices.len(),
            plane_size = ?plane_size,
            organ_interpolation = ?organ_interpolation,
            algorithm = session.algorithm.name(),
            metric = %session.active_metric,
            "Registration session ready"
        );

        Ok(session)
    }

    /// Translate by `step` millimetres along `axis`.
    ///
    /// In the slice frame the axis is taken from `slice_id`'s current affine
    /// and applied unchanged to every target.
    pub fn translate(
        &mut self,
        slice_id: &str,
        frame: Frame,
        axis: AxisName,
        step: f64,
        granularity: Granularity,
    ) -> Result<()> {
        if !step.is_finite() {
            return Err(RegistrationError::invalid_transform(format!("non-finite translation step {}", step)));
        }
        let direction = match frame {
            Frame::Scanner => scanner_axis(axis),
            Frame::Slice => affine_axis(&self.slice(slice_id)?.current_affine, axis),
        };
        let targets = self.targets(slice_id, granularity)?;

        let algorithm = self.algorithm.as_ref();
        let (staged, evaluator) = self.stage(&targets, |_, state| {
            let delta = algorithm.translate(state.history.current(), &direction, step)?;
            state.history.insert(TransformationData::Matrix(delta.into_matrix()))?;
            Ok(true)
        })?;
        self.commit(staged, evaluator);

        tracing::debug!(slice = slice_id, ?frame, %axis, step, ?granularity, "Translated");
        Ok(())
    }

    /// Rotate by `angle` radians about one of the slice-frame axes.
    ///
    /// A micro rotation turns about the slice's own axis through its own
    /// centroid. A macro rotation turns every slice about the normalised mean
    /// axis through the mean centroid, both taken before the command.
    pub fn rotate(&mut self, slice_id: &str, axis: AxisName, angle: f64, granularity: Granularity) -> Result<()> {
        if !angle.is_finite() {
            return Err(RegistrationError::invalid_transform(format!("non-finite rotation angle {}", angle)));
        }
        let targets = self.targets(slice_id, granularity)?;
        let shared = match granularity {
            Granularity::Micro => None,
            Granularity::Macro => Some(self.shared_pivot(axis)?),
        };

        let algorithm = self.algorithm.as_ref();
        let (staged, evaluator) = self.stage(&targets, |_, state| {
            let (centre, direction) = shared.unwrap_or_else(|| state.pivot(axis));
            let delta = algorithm.rotate(
                &state.current_affine,
                state.plane.affine(),
                &centre,
                &direction,
                angle,
            )?;
            state.history.insert(TransformationData::Matrix(delta.into_matrix()))?;
            Ok(true)
        })?;
        self.commit(staged, evaluator);

        tracing::debug!(slice = slice_id, %axis, angle, ?granularity, "Rotated");
        Ok(())
    }

    /// Step back one history entry.
    ///
    /// Slices already at their first entry are left alone.
    pub fn undo(&mut self, slice_id: &str, granularity: Granularity) -> Result<()> {
        self.step_history(slice_id, granularity, "undo", TransformationHistory::undo)
    }

    /// Step forward one history entry.
    ///
    /// Slices already at their last entry are left alone.
    pub fn redo(&mut self, slice_id: &str, granularity: Granularity) -> Result<()> {
        self.step_history(slice_id, granularity, "redo", TransformationHistory::redo)
    }

    /// Return to the best pose found so far, as a new history entry.
    pub fn optimise(&mut self, slice_id: &str, granularity: Granularity) -> Result<()> {
        let targets = self.targets(slice_id, granularity)?;
        let (staged, evaluator) = self.stage(&targets, |_, state| {
            state.history.optimise();
            Ok(true)
        })?;
        self.commit(staged, evaluator);
        tracing::debug!(slice = slice_id, ?granularity, "Returned to optimal pose");
        Ok(())
    }

    /// Return to the identity, as a new history entry.
    pub fn reset(&mut self, slice_id: &str, granularity: Granularity) -> Result<()> {
        let targets = self.targets(slice_id, granularity)?;
        let (staged, evaluator) = self.stage(&targets, |_, state| {
            state.history.reset();
            Ok(true)
        })?;
        self.commit(staged, evaluator);
        tracing::debug!(slice = slice_id, ?granularity, "Reset to identity");
        Ok(())
    }

    /// Make `kind` the metric that decides optimality and rescore every slice.
    ///
    /// # Errors
    /// `UnsupportedMetric` when `kind` is not configured.
    pub fn select_metric(&mut self, kind: MetricKind) -> Result<()> {
        if !self.evaluators.contains_key(&kind) {
            return Err(RegistrationError::unsupported_metric(format!("{} is not configured", kind)));
        }
        let previous = self.active_metric;
        self.active_metric = kind;

        let targets = self.slice_ids();
        match self.stage(&targets, |_, _| Ok(true)) {
            Ok((staged, evaluator)) => self.commit(staged, evaluator),
            Err(err) => {
                self.active_metric = previous;
                return Err(err);
            }
        }
        tracing::info!(case = %self.case_id, metric = %kind, "Selected metric");
        Ok(())
    }

    /// Score `slice_id`'s current pose with `kind` without touching any
    /// running best.
    pub fn evaluate(&self, slice_id: &str, kind: MetricKind) -> Result<f64> {
        let evaluator = self
            .evaluators
            .get(&kind)
            .ok_or_else(|| RegistrationError::unsupported_metric(format!("{} is not configured", kind)))?;
        let state = self.slice(slice_id)?;
        let (candidate, reference) = state.scoring_pair();
        evaluator.score(&candidate, &reference)
    }

    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn active_metric(&self) -> MetricKind {
        self.active_metric
    }

    pub fn algorithm(&self) -> &dyn TransformationAlgorithm {
        self.algorithm.as_ref()
    }

    /// Slice identifiers in order.
    pub fn slice_ids(&self) -> Vec<SliceId> {
        self.slices.keys().cloned().collect()
    }

    /// Parameters of the current delta transformation.
    pub fn parameters(&self, slice_id: &str) -> Result<RigidParameters> {
        Ok(self.slice(slice_id)?.history.current().parameters())
    }

    /// Current plane affine (`delta · original`).
    pub fn plane_affine(&self, slice_id: &str) -> Result<&Affine> {
        Ok(&self.slice(slice_id)?.current_affine)
    }

    pub fn body_resampled(&self, slice_id: &str) -> Result<&Tensor<B, 2>> {
        Ok(&self.slice(slice_id)?.body_resampled)
    }

    pub fn organ_resampled(&self, slice_id: &str) -> Result<&Tensor<B, 2>> {
        Ok(&self.slice(slice_id)?.organ_resampled)
    }

    pub fn organ_mask(&self, slice_id: &str) -> Result<&Tensor<B, 2>> {
        Ok(&self.slice(slice_id)?.organ_mask)
    }

    pub fn evaluation_mask(&self, slice_id: &str) -> Result<&Tensor<B, 2>> {
        Ok(&self.slice(slice_id)?.evaluation_mask)
    }

    /// Latest evaluation with the active metric.
    pub fn evaluation(&self, slice_id: &str) -> Result<Option<Evaluation>> {
        Ok(self.slice(slice_id)?.evaluation)
    }

    /// Running best of `kind` for `slice_id`; `±inf` until the metric has
    /// been the active one. `None` when `kind` is not configured.
    pub fn best_score(&self, slice_id: &str, kind: MetricKind) -> Result<Option<f64>> {
        self.slice(slice_id)?;
        Ok(self.evaluators.get(&kind).and_then(|evaluator| evaluator.optimiser().best(slice_id)))
    }

    pub fn history_position(&self, slice_id: &str) -> Result<HistoryPosition> {
        let history = &self.slice(slice_id)?.history;
        Ok(HistoryPosition {
            current: history.current_index(),
            optimal: history.optimal_index(),
            len: history.len(),
        })
    }

    pub fn state(&self, slice_id: &str) -> Result<&SliceState<B>> {
        self.slice(slice_id)
    }

    /// One row per slice with the current delta parameters.
    pub fn export_table(&self) -> TransformationTable {
        self.slices
            .iter()
            .map(|(slice_id, state)| {
                TransformationRow::new(self.case_id.clone(), slice_id.clone(), &state.history.current().parameters())
            })
            .collect()
    }

    fn slice(&self, slice_id: &str) -> Result<&SliceState<B>> {
        self.slices
            .get(slice_id)
            .ok_or_else(|| RegistrationError::unknown_slice(slice_id))
    }

    fn targets(&self, slice_id: &str, granularity: Granularity) -> Result<Vec<SliceId>> {
        self.slice(slice_id)?;
        Ok(match granularity {
            Granularity::Micro => vec![slice_id.to_string()],
            Granularity::Macro => self.slice_ids(),
        })
    }

    fn shared_pivot(&self, axis: AxisName) -> Result<(Point3, Vector3)> {
        let pivots: Vec<(Point3, Vector3)> = self.slices.values().map(|state| state.pivot(axis)).collect();
        let centre = mean_point(pivots.iter().map(|(centre, _)| centre))
            .ok_or_else(|| RegistrationError::invalid_transform("no slices to rotate"))?;
        let direction = mean_axis(pivots.iter().map(|(_, direction)| direction))
            .ok_or_else(|| RegistrationError::invalid_transform(format!("slice {} axes cancel out", axis)))?;
        Ok((centre, direction))
    }

    fn step_history(
        &mut self,
        slice_id: &str,
        granularity: Granularity,
        action: &'static str,
        step: fn(&mut TransformationHistory) -> Result<()>,
    ) -> Result<()> {
        let targets = self.targets(slice_id, granularity)?;
        let (staged, evaluator) = self.stage(&targets, |id, state| match step(&mut state.history) {
            Ok(()) => Ok(true),
            Err(err) if err.is_boundary() => {
                tracing::debug!(slice = id, action, "History boundary, nothing to do");
                Ok(false)
            }
            Err(err) => Err(err),
        })?;
        self.commit(staged, evaluator);
        Ok(())
    }

    /// Apply `edit` to copies of the target states, then resample and score
    /// every copy `edit` changed. Nothing in `self` is modified.
    fn stage<F>(&self, targets: &[SliceId], mut edit: F) -> Result<(Staged<B>, Evaluator)>
    where
        F: FnMut(&str, &mut SliceState<B>) -> Result<bool>,
    {
        let mut evaluator = self
            .evaluators
            .get(&self.active_metric)
            .cloned()
            .ok_or_else(|| RegistrationError::unsupported_metric(format!("{} is not configured", self.active_metric)))?;

        let mut staged = Vec::with_capacity(targets.len());
        for slice_id in targets {
            let mut state = self.slice(slice_id)?.clone();
            if edit(slice_id.as_str(), &mut state)? {
                self.refresh(slice_id, &mut state, &mut evaluator)?;
                staged.push((slice_id.clone(), state));
            }
        }
        Ok((staged, evaluator))
    }

    fn commit(&mut self, staged: Staged<B>, evaluator: Evaluator) {
        self.evaluators.insert(evaluator.kind(), evaluator);
        for (slice_id, state) in staged {
            self.slices.insert(slice_id, state);
        }
    }

    /// Recompute everything derived from the current history entry.
    fn refresh(&self, slice_id: &str, state: &mut SliceState<B>, evaluator: &mut Evaluator) -> Result<()> {
        let current_affine = state.history.current().compose(state.plane.affine());
        let body_resampled = discretise(self.body_resampler.resample(&current_affine)?);
        let organ_resampled = self.organ_resampler.resample(&current_affine)?;

        state.evaluation_mask = evaluation_mask(state.plane.mask(), &body_resampled);
        state.organ_mask = organ_mask(&organ_resampled, self.config.organ_threshold);
        state.current_affine = current_affine;
        state.body_resampled = body_resampled;
        state.organ_resampled = organ_resampled;

        let (candidate, reference) = state.scoring_pair();
        let evaluation = evaluator.evaluate(slice_id, &candidate, &reference)?;
        if evaluation.is_optimal {
            state.history.assign_optimal();
        }
        state.evaluation = Some(evaluation);
        Ok(())
    }
}

impl<B: Backend> SliceState<B> {
    /// Centroid and slice-frame axis of the current pose.
    fn pivot(&self, axis: AxisName) -> (Point3, Vector3) {
        (
            plane_centroid(self.plane.shape(), &self.current_affine),
            affine_axis(&self.current_affine, axis),
        )
    }

    /// Masked resampled body and masked slice pixels.
    fn scoring_pair(&self) -> (Tensor<B, 2>, Tensor<B, 2>) {
        (
            apply_mask(&self.body_resampled, &self.evaluation_mask),
            apply_mask(self.plane.pixels(), &self.evaluation_mask),
        )
    }
}

fn seed_transformation(table: Option<&TransformationTable>, slice_id: &str) -> RigidTransformation {
    let Some(table) = table else {
        return RigidTransformation::identity();
    };
    match table.parameters_for(slice_id) {
        Ok(Some(parameters)) => RigidTransformation::from_rigid_parameters(&parameters),
        Ok(None) => {
            tracing::debug!(slice = slice_id, "No saved transformation, starting at identity");
            RigidTransformation::identity()
        }
        Err(err) => {
            tracing::warn!(slice = slice_id, error = %err, "Malformed saved transformation, starting at identity");
            RigidTransformation::identity()
        }
    }
}
