use std::collections::BTreeMap;
use crate::error::{RegistrationError, Result};
use crate::metric::Direction;
use crate::SliceId;

/// Per-slice running best score for one metric.
///
/// Every slice starts at `-inf` (maximise) or `+inf` (minimise). A score is
/// optimal only when it strictly improves on the best seen so far, in which
/// case it becomes the new best. The best is never reset for the lifetime
/// of the optimiser.
#[derive(Debug, Clone, PartialEq)]
pub struct Optimiser {
    direction: Direction,
    best: BTreeMap<SliceId, f64>,
}

impl Optimiser {
    pub fn new<I, S>(direction: Direction, slice_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SliceId>,
    {
        let best = slice_ids
            .into_iter()
            .map(|id| (id.into(), direction.initial()))
            .collect();
        Self { direction, best }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Best score recorded for `slice_id`.
    pub fn best(&self, slice_id: &str) -> Option<f64> {
        self.best.get(slice_id).copied()
    }

    /// Record `score` if it beats the running best.
    ///
    /// # Errors
    /// `UnknownSlice` when `slice_id` was not registered at construction.
    pub fn is_optimal(&mut self, slice_id: &str, score: f64) -> Result<bool> {
        let best = self
            .best
            .get_mut(slice_id)
            .ok_or_else(|| RegistrationError::unknown_slice(slice_id))?;
        if self.direction.improves(score, *best) {
            *best = score;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
