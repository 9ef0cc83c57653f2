use crate::{common::*, unit::Ratio};
use bbox::CornerRect;
use label::Label;

/// A bounding box tagged with a class index, in normalized image coordinates.
pub type RatioLabel = Ratio<Label<CornerRect<R64>, usize>>;
