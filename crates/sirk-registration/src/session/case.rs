//! Inputs of a registration case.

use std::collections::BTreeMap;
use burn::tensor::backend::Backend;
use sirk_core::image::{SlicePlane, Volume};
use crate::table::TransformationTable;
use crate::SliceId;

/// Everything the dataset layer loads for one case.
///
/// # Type Parameters
/// * `B` - The backend for tensor operations
#[derive(Debug, Clone)]
pub struct CaseData<B: Backend> {
    pub case_id: String,
    /// Reference intensity volume.
    pub body: Volume<B>,
    /// Organ label volume on its own grid.
    pub organ: Volume<B>,
    /// Slices in identifier order.
    pub slices: BTreeMap<SliceId, SlicePlane<B>>,
    /// Previously saved poses, if any.
    pub table: Option<TransformationTable>,
}

impl<B: Backend> CaseData<B> {
    pub fn new(case_id: impl Into<String>, body: Volume<B>, organ: Volume<B>) -> Self {
        Self {
            case_id: case_id.into(),
            body,
            organ,
            slices: BTreeMap::new(),
            table: None,
        }
    }

    /// Add a slice.
    pub fn with_slice(mut self, slice_id: impl Into<SliceId>, plane: SlicePlane<B>) -> Self {
        self.slices.insert(slice_id.into(), plane);
        self
    }

    /// Seed slice poses from a saved table.
    pub fn with_table(mut self, table: TransformationTable) -> Self {
        self.table = Some(table);
        self
    }
}
