use super::Split;
use crate::common::*;

/// Dataset metadata reported alongside the loaded pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetInfo {
    /// The dataset identifier.
    pub name: String,
    /// The class names, in index order.
    pub classes: IndexSet<String>,
    /// The split the pipeline iterates over.
    pub split: Split,
    /// The number of records in the loaded split.
    pub num_records: usize,
    /// Record counts of every split file found in the dataset directory.
    pub split_sizes: IndexMap<Split, usize>,
}

impl DatasetInfo {
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }
}
