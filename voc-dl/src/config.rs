//! Data pipeline configuration format.

use crate::{common::*, dataset::Split, format::BoxFormat};

/// The main pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Build a configuration with the required fields set and everything
    /// else at its default.
    pub fn new(dataset_dir: impl Into<PathBuf>, split: Split, bbox_format: BoxFormat) -> Self {
        Self {
            dataset: DatasetConfig {
                dataset_dir: dataset_dir.into(),
                split,
                classes_file: None,
                class_whitelist: None,
            },
            pipeline: PipelineConfig {
                bbox_format,
                batch_size: None,
                shuffle_buffer: None,
                shuffle_files: default_shuffle_files(),
                image_size: None,
                seed: None,
                device: default_device(),
            },
        }
    }

    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = std::fs::read_to_string(path)?;
        let config = json5::from_str(&text)?;
        Ok(config)
    }
}

/// Dataset location options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// The directory containing `Annotations`, `ImageSets` and `JPEGImages`.
    pub dataset_dir: PathBuf,
    /// The dataset split to load.
    pub split: Split,
    /// Optional file with one class name per line. It overrides the built-in
    /// VOC2007 class list.
    pub classes_file: Option<PathBuf>,
    /// Optional list of whitelisted classes.
    pub class_whitelist: Option<HashSet<String>>,
}

/// Pipeline behavior options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// The target bounding box coordinate format.
    pub bbox_format: BoxFormat,
    /// If set, group records into batches of this size.
    pub batch_size: Option<NonZeroUsize>,
    /// If set, shuffle records within a buffer of this capacity.
    pub shuffle_buffer: Option<NonZeroUsize>,
    /// Whether to shuffle the file visiting order, once per iteration.
    #[serde(default = "default_shuffle_files")]
    pub shuffle_files: bool,
    /// If set, resize images to `[height, width]` pixels without preserving
    /// the aspect ratio.
    pub image_size: Option<[NonZeroUsize; 2]>,
    /// If set, record orderings are derived from this seed.
    pub seed: Option<u64>,
    /// The device output tensors are placed on.
    #[serde(default = "default_device", with = "tch_serde::serde_device")]
    pub device: Device,
}

fn default_shuffle_files() -> bool {
    true
}

fn default_device() -> Device {
    Device::Cpu
}
