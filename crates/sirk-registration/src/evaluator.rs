//! Evaluator: a metric paired with its running-best optimiser.

use burn::tensor::Tensor;
use burn::tensor::backend::Backend;
use serde::{Serialize, Deserialize};
use crate::error::Result;
use crate::metric::MetricKind;
use crate::optimizer::Optimiser;
use crate::SliceId;

/// Outcome of scoring a slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub metric: MetricKind,
    pub score: f64,
    /// The score improved on the running best for this slice.
    pub is_optimal: bool,
}

/// Scores candidates with one metric and tracks the best score per slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluator {
    kind: MetricKind,
    optimiser: Optimiser,
}

impl Evaluator {
    pub fn new<I, S>(kind: MetricKind, slice_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SliceId>,
    {
        Self {
            kind,
            optimiser: Optimiser::new(kind.direction(), slice_ids),
        }
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    pub fn optimiser(&self) -> &Optimiser {
        &self.optimiser
    }

    /// Score without touching the running best.
    pub fn score<B: Backend>(&self, candidate: &Tensor<B, 2>, reference: &Tensor<B, 2>) -> Result<f64> {
        self.kind.score(candidate, reference)
    }

    /// Score `candidate` against `reference` and update the running best.
    ///
    /// # Errors
    /// `ShapeMismatch` for planes of different shape, `UnknownSlice` for a
    /// slice the evaluator was not built with. Neither updates any state.
    pub fn evaluate<B: Backend>(
        &mut self,
        slice_id: &str,
        candidate: &Tensor<B, 2>,
        reference: &Tensor<B, 2>,
    ) -> Result<Evaluation> {
        let score = self.score(candidate, reference)?;
        let is_optimal = self.optimiser.is_optimal(slice_id, score)?;
        tracing::debug!(
            slice = slice_id,
            metric = %self.kind,
            score = score,
            is_optimal = is_optimal,
            "Evaluated slice"
        );
        Ok(Evaluation { metric: self.kind, score, is_optimal })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;
    use crate::error::RegistrationError;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_sad_evaluation_tracks_best() {
        let device = Default::default();
        let reference = Tensor::<TestBackend, 2>::zeros([2, 2], &device);
        let mut evaluator = Evaluator::new(MetricKind::SumOfAbsoluteDifferences, ["s1"]);

        let far = Tensor::<TestBackend, 2>::ones([2, 2], &device) * 3.0;
        let near = Tensor::<TestBackend, 2>::ones([2, 2], &device);

        let first = evaluator.evaluate("s1", &far, &reference).unwrap();
        assert_eq!(first.score, 12.0);
        assert!(first.is_optimal);

        let second = evaluator.evaluate("s1", &near, &reference).unwrap();
        assert_eq!(second.score, 4.0);
        assert!(second.is_optimal);

        let third = evaluator.evaluate("s1", &far, &reference).unwrap();
        assert!(!third.is_optimal);
        assert_eq!(evaluator.optimiser().best("s1"), Some(4.0));
    }

    #[test]
    fn test_shape_mismatch_leaves_best_untouched() {
        let device = Default::default();
        let mut evaluator = Evaluator::new(MetricKind::SumOfAbsoluteDifferences, ["s1"]);
        let a = Tensor::<TestBackend, 2>::zeros([2, 2], &device);
        let b = Tensor::<TestBackend, 2>::zeros([2, 3], &device);
        let err = evaluator.evaluate("s1", &a, &b).unwrap_err();
        assert!(matches!(err, RegistrationError::ShapeMismatch { .. }));
        assert_eq!(evaluator.optimiser().best("s1"), Some(f64::INFINITY));
    }
}
