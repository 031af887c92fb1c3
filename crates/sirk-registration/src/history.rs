//! Per-slice transformation history.
//!
//! The history is a sequence of delta transformations with a `current`
//! pointer and an `optimal` marker. Inserting after an undo discards every
//! entry past `current` before appending, like an editor undo stack.
//!
//! The optimal pose is kept as its own snapshot. When an insert discards
//! the entry it was marked on, the marker is cleared but the pose itself
//! survives so that `optimise` still returns to the best pose found.

use sirk_core::transform::{RigidTransformation, TransformationData};
use crate::error::{RegistrationError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct TransformationHistory {
    entries: Vec<RigidTransformation>,
    current: usize,
    optimal: Option<usize>,
    optimal_pose: RigidTransformation,
}

impl TransformationHistory {
    /// Start a history with a single entry, marked current and optimal.
    pub fn new(initial: RigidTransformation) -> Self {
        Self {
            entries: vec![initial.clone()],
            current: 0,
            optimal: Some(0),
            optimal_pose: initial,
        }
    }

    /// Build `data` and append it right after `current`, discarding any
    /// entries past `current`.
    ///
    /// # Errors
    /// `InvalidTransform` when `data` is malformed; the history is unchanged.
    pub fn insert(&mut self, data: TransformationData) -> Result<()> {
        let transformation = RigidTransformation::from_data(data)?;
        self.push(transformation);
        Ok(())
    }

    fn push(&mut self, transformation: RigidTransformation) {
        self.entries.truncate(self.current + 1);
        if self.optimal.is_some_and(|index| index > self.current) {
            self.optimal = None;
        }
        self.entries.push(transformation);
        self.current += 1;
    }

    /// Step back one entry.
    ///
    /// # Errors
    /// `Boundary` when already at the first entry.
    pub fn undo(&mut self) -> Result<()> {
        if self.current == 0 {
            return Err(RegistrationError::boundary("cannot undo past the first entry"));
        }
        self.current -= 1;
        Ok(())
    }

    /// Step forward one entry.
    ///
    /// # Errors
    /// `Boundary` when already at the last entry.
    pub fn redo(&mut self) -> Result<()> {
        if self.current + 1 >= self.entries.len() {
            return Err(RegistrationError::boundary("cannot redo past the last entry"));
        }
        self.current += 1;
        Ok(())
    }

    /// Re-insert the optimal pose as a new entry.
    pub fn optimise(&mut self) {
        let pose = self.optimal_pose.clone();
        self.push(pose);
    }

    /// Insert the identity as a new entry.
    pub fn reset(&mut self) {
        self.push(RigidTransformation::identity());
    }

    /// Mark the current entry as optimal.
    pub fn assign_optimal(&mut self) {
        self.optimal = Some(self.current);
        self.optimal_pose = self.entries[self.current].clone();
    }

    pub fn current(&self) -> &RigidTransformation {
        &self.entries[self.current]
    }

    pub fn optimal(&self) -> &RigidTransformation {
        &self.optimal_pose
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Index of the optimal entry, `None` once that entry has been discarded.
    pub fn optimal_index(&self) -> Option<usize> {
        self.optimal
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RigidTransformation] {
        &self.entries
    }
}

impl Default for TransformationHistory {
    fn default() -> Self {
        Self::new(RigidTransformation::identity())
    }
}
