use crate::{common::*, label::RatioLabel, unit::Pixel};
use bbox::Size;

/// The record with image path and boxes, but without image pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    /// The image size stated by the annotation.
    pub size: Pixel<Size<usize>>,
    /// Bounding boxes in ratio units.
    pub bboxes: Vec<RatioLabel>,
}

/// The record with image pixels and encoded boxes.
#[derive(Debug, TensorLike)]
pub struct DataRecord {
    /// The image in CHW layout with float values in `[0, 1]`.
    pub image: Tensor,
    /// The boxes with one `[coord0, coord1, coord2, coord3, class]` row per
    /// object.
    pub bboxes: Tensor,
}

/// A batch of records with ragged boxes.
#[derive(Debug, TensorLike)]
pub struct DataBatch {
    pub images: ImageBatch,
    /// One box tensor per batch member, each with its own number of rows.
    pub bboxes: Vec<Tensor>,
}

/// Batched images, stacked only when every member shares the same size.
#[derive(Debug, TensorLike)]
pub enum ImageBatch {
    /// Images of identical sizes stacked into one `[B, C, H, W]` tensor.
    Stacked(Tensor),
    /// Images of mixed sizes, one CHW tensor per batch member.
    List(Vec<Tensor>),
}

impl ImageBatch {
    pub fn from_images(images: Vec<Tensor>) -> Self {
        let uniform = {
            let mut sizes = images.iter().map(Tensor::size);
            match sizes.next() {
                Some(first) => sizes.all(|size| size == first),
                None => false,
            }
        };

        if uniform {
            Self::Stacked(Tensor::stack(&images, 0))
        } else {
            Self::List(images)
        }
    }

    pub fn batch_size(&self) -> usize {
        match self {
            Self::Stacked(images) => images.size()[0] as usize,
            Self::List(images) => images.len(),
        }
    }
}
