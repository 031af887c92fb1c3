//! Per-slice state owned by a session.

use burn::tensor::Tensor;
use burn::tensor::backend::Backend;
use sirk_core::image::SlicePlane;
use sirk_core::spatial::Affine;
use crate::evaluator::Evaluation;
use crate::history::TransformationHistory;

/// One entry of the session arena.
///
/// Everything except `plane` and `history` is derived from the current
/// history entry and recomputed whenever it changes.
#[derive(Debug, Clone)]
pub struct SliceState<B: Backend> {
    pub(crate) plane: SlicePlane<B>,
    pub(crate) history: TransformationHistory,
    /// `delta · original`
    pub(crate) current_affine: Affine,
    /// Resampled body, truncated to integers.
    pub(crate) body_resampled: Tensor<B, 2>,
    pub(crate) organ_resampled: Tensor<B, 2>,
    pub(crate) organ_mask: Tensor<B, 2>,
    pub(crate) evaluation_mask: Tensor<B, 2>,
    pub(crate) evaluation: Option<Evaluation>,
}

impl<B: Backend> SliceState<B> {
    pub(crate) fn new(plane: SlicePlane<B>, history: TransformationHistory) -> Self {
        let current_affine = history.current().compose(plane.affine());
        let empty = plane.pixels().zeros_like();
        Self {
            plane,
            history,
            current_affine,
            body_resampled: empty.clone(),
            organ_resampled: empty.clone(),
            organ_mask: empty.clone(),
            evaluation_mask: empty,
            evaluation: None,
        }
    }

    pub fn plane(&self) -> &SlicePlane<B> {
        &self.plane
    }

    pub fn history(&self) -> &TransformationHistory {
        &self.history
    }
}
