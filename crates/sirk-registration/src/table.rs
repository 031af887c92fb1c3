//! Transformation table rows used to seed and save slice poses.
//!
//! Rows mirror the columns of the dataset spreadsheet: one row per slice
//! with its six rigid parameters. Reading and writing the file itself
//! belongs to the dataset layer.

use serde::{Serialize, Deserialize};
use sirk_core::transform::RigidParameters;
use crate::error::Result;

/// One slice pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformationRow {
    pub case_id: String,
    pub slice_id: String,
    pub translation_x: f64,
    pub translation_y: f64,
    pub translation_z: f64,
    pub rotation_x: f64,
    pub rotation_y: f64,
    pub rotation_z: f64,
}

impl TransformationRow {
    pub fn new(case_id: impl Into<String>, slice_id: impl Into<String>, parameters: &RigidParameters) -> Self {
        let [translation_x, translation_y, translation_z] = parameters.translation;
        let [rotation_x, rotation_y, rotation_z] = parameters.rotation;
        Self {
            case_id: case_id.into(),
            slice_id: slice_id.into(),
            translation_x,
            translation_y,
            translation_z,
            rotation_x,
            rotation_y,
            rotation_z,
        }
    }

    /// Validated parameters of this row.
    ///
    /// # Errors
    /// `InvalidTransform` when any value is not finite (for example an
    /// empty spreadsheet cell read as NaN).
    pub fn parameters(&self) -> Result<RigidParameters> {
        let values = [
            self.translation_x,
            self.translation_y,
            self.translation_z,
            self.rotation_x,
            self.rotation_y,
            self.rotation_z,
        ];
        Ok(RigidParameters::from_slice(&values)?)
    }
}

/// All saved poses of a case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformationTable {
    rows: Vec<TransformationRow>,
}

impl TransformationTable {
    pub fn new(rows: Vec<TransformationRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TransformationRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Saved parameters of `slice_id`. The first matching row wins.
    ///
    /// Returns `Ok(None)` when the slice has no row.
    ///
    /// # Errors
    /// `InvalidTransform` when the row exists but is malformed.
    pub fn parameters_for(&self, slice_id: &str) -> Result<Option<RigidParameters>> {
        self.rows
            .iter()
            .find(|row| row.slice_id == slice_id)
            .map(TransformationRow::parameters)
            .transpose()
    }
}

impl FromIterator<TransformationRow> for TransformationTable {
    fn from_iter<I: IntoIterator<Item = TransformationRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
