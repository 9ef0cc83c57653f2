//! Axis-aligned box geometry shared by the dataset pipeline.

mod common;

pub use rect::*;
pub mod rect;

pub use corner::*;
pub mod corner;

pub use center::*;
pub mod center;

pub use size::*;
pub mod size;

pub use transform::*;
mod transform;
