use super::FileRecord;
use crate::common::*;

/// Metadata shared by every dataset implementation.
pub trait GenericDataset
where
    Self: Debug + Send,
{
    /// Number of color channels per image.
    fn input_channels(&self) -> usize;

    /// Class names, in index order.
    fn classes(&self) -> &IndexSet<String>;
}

/// A dataset backed by annotated image files on disk.
pub trait FileDataset
where
    Self: GenericDataset,
{
    /// All file records of this dataset.
    fn records(&self) -> &[Arc<FileRecord>];
}
