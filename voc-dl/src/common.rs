pub use anyhow::{bail, ensure, format_err, Context as _, Error, Result};
pub use futures::stream::{self, Stream, StreamExt as _, TryStreamExt as _};
pub use indexmap::{IndexMap, IndexSet};
pub use itertools::Itertools as _;
pub use log::{info, warn};
pub use noisy_float::prelude::*;
pub use once_cell::sync::Lazy;
pub use par_stream::prelude::*;
pub use rand::{prelude::*, rngs::StdRng};
pub use serde::{Deserialize, Serialize};
pub use slice_of_array::SliceFlatExt as _;
pub use std::{
    collections::HashSet,
    fmt,
    fmt::Debug,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    pin::Pin,
    str::FromStr,
    sync::Arc,
};
pub use tch::{kind::FLOAT_CPU, vision, Device, Kind, Tensor};
pub use tch_tensor_like::TensorLike;

unzip_n::unzip_n!(pub 2);
