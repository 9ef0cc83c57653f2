//! Dataset sources and record types.

mod dataset_;
mod info;
mod record;
mod utils;
mod voc;

pub use dataset_::*;
pub use info::*;
pub use record::*;
pub use utils::*;
pub use voc::*;
