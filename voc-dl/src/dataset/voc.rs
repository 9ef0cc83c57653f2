use super::{load_classes_file, DatasetInfo, FileDataset, FileRecord, GenericDataset};
use crate::{
    common::*,
    config::{Config, DatasetConfig},
    label::RatioLabel,
    unit::{Pixel, Ratio},
};
use bbox::{CornerRect, Size, Transform};
use label::Label;

const VOC_NAME: &str = "voc/2007";
const VOC_DEPTH: usize = 3;

/// The twenty VOC2007 object classes, in canonical order.
pub static VOC_CLASSES: Lazy<IndexSet<String>> = Lazy::new(|| {
    [
        "aeroplane",
        "bicycle",
        "bird",
        "boat",
        "bottle",
        "bus",
        "car",
        "cat",
        "chair",
        "cow",
        "diningtable",
        "dog",
        "horse",
        "motorbike",
        "person",
        "pottedplant",
        "sheep",
        "sofa",
        "train",
        "tvmonitor",
    ]
    .iter()
    .map(|&name| name.to_owned())
    .collect()
});

/// Subsets of the dataset, named after the split files under
/// `ImageSets/Main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    #[serde(alias = "validation")]
    Val,
    TrainVal,
    Test,
}

impl Split {
    pub const ALL: [Self; 4] = [Self::Train, Self::Val, Self::TrainVal, Self::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Val => "val",
            Self::TrainVal => "trainval",
            Self::Test => "test",
        }
    }
}

impl FromStr for Split {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        let split = match name {
            "train" => Self::Train,
            "val" | "validation" => Self::Val,
            "trainval" => Self::TrainVal,
            "test" => Self::Test,
            _ => bail!("unknown dataset split '{}'", name),
        };
        Ok(split)
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One annotation file together with the image path it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocSample {
    pub image_file: PathBuf,
    pub annotation_file: PathBuf,
    pub annotation: voc_dataset::Annotation,
}

/// The PASCAL VOC detection dataset loaded from a local directory.
#[derive(Debug, Clone)]
pub struct VocDataset {
    pub config: Arc<Config>,
    pub classes: IndexSet<String>,
    pub samples: Vec<VocSample>,
    pub records: Vec<Arc<FileRecord>>,
    pub split_sizes: IndexMap<Split, usize>,
}

impl GenericDataset for VocDataset {
    fn input_channels(&self) -> usize {
        VOC_DEPTH
    }

    fn classes(&self) -> &IndexSet<String> {
        &self.classes
    }
}

impl FileDataset for VocDataset {
    fn records(&self) -> &[Arc<FileRecord>] {
        &self.records
    }
}

impl VocDataset {
    pub async fn load(config: Arc<Config>) -> Result<VocDataset> {
        let DatasetConfig {
            ref dataset_dir,
            split,
            ref classes_file,
            ref class_whitelist,
        } = config.dataset;

        // load the class list
        let classes = match classes_file {
            Some(classes_file) => load_classes_file(classes_file).await?,
            None => VOC_CLASSES.clone(),
        };

        // read the record ids of the requested split
        let ids = read_split_ids(dataset_dir, split).await?;

        // parse annotation files
        let samples: Vec<VocSample> = {
            let dataset_dir = dataset_dir.clone();
            stream::iter(ids)
                .par_then(None, move |id| {
                    let annotation_file =
                        dataset_dir.join("Annotations").join(format!("{}.xml", id));
                    let image_file = dataset_dir.join("JPEGImages").join(format!("{}.jpg", id));

                    async move {
                        let xml_content = tokio::fs::read_to_string(&annotation_file)
                            .await
                            .with_context(|| {
                                format!(
                                    "failed to read annotation file {}",
                                    annotation_file.display()
                                )
                            })?;

                        let annotation: voc_dataset::Annotation = {
                            tokio::task::spawn_blocking(move || {
                                serde_xml_rs::from_str(&xml_content)
                            })
                            .await?
                            .with_context(|| {
                                format!(
                                    "failed to parse annotation file {}",
                                    annotation_file.display()
                                )
                            })?
                        };

                        ensure!(
                            annotation.size.depth == VOC_DEPTH,
                            "expect depth to be {}, but found {} in annotation file {}",
                            VOC_DEPTH,
                            annotation.size.depth,
                            annotation_file.display()
                        );

                        anyhow::Ok(VocSample {
                            image_file,
                            annotation_file,
                            annotation,
                        })
                    }
                })
                .try_collect()
                .await?
        };

        // turn annotations into file records
        let records: Vec<_> = samples
            .iter()
            .map(|sample| -> Result<_> {
                let VocSample {
                    image_file,
                    annotation_file,
                    annotation,
                } = sample;

                let voc_dataset::Size { width, height, .. } = annotation.size;
                ensure!(
                    width > 0 && height > 0,
                    "invalid image size {}x{} in annotation file {}",
                    width,
                    height,
                    annotation_file.display()
                );
                let size = Pixel(Size::new([height, width]));

                // VOC stores pixel corners; records keep boxes in ratio units
                let to_unit = Transform::stretch(
                    [r64(height as f64), r64(width as f64)],
                    [r64(1.0), r64(1.0)],
                );

                let bboxes: Vec<RatioLabel> = annotation
                    .object
                    .iter()
                    .filter_map(|obj| {
                        // objects outside the class list or the whitelist are dropped
                        let class_index = classes.get_index_of(&obj.name)?;
                        if let Some(whitelist) = class_whitelist {
                            whitelist.get(&obj.name)?;
                        }

                        let voc_dataset::BndBox {
                            xmin,
                            ymin,
                            xmax,
                            ymax,
                        } = obj.bndbox;
                        let rect = match CornerRect::try_new([ymin, xmin, ymax, xmax]) {
                            Ok(rect) => rect,
                            Err(_err) => {
                                warn!(
                                    "ignore invalid bbox {:?} in annotation file {}",
                                    [ymin, xmin, ymax, xmax],
                                    annotation_file.display()
                                );
                                return None;
                            }
                        };
                        Some(Ratio(Label {
                            rect: &to_unit * &rect,
                            class: class_index,
                        }))
                    })
                    .collect();

                Ok(Arc::new(FileRecord {
                    path: image_file.clone(),
                    size,
                    bboxes,
                }))
            })
            .try_collect()?;

        // count the records of every split file present
        let split_sizes = {
            let mut sizes = IndexMap::new();
            for split in Split::ALL {
                let path = split_file(dataset_dir, split);
                if tokio::fs::metadata(&path).await.is_err() {
                    continue;
                }
                let ids = read_split_ids(dataset_dir, split).await?;
                sizes.insert(split, ids.len());
            }
            sizes
        };

        info!(
            "loaded {} records of split '{}' from {}",
            records.len(),
            split,
            dataset_dir.display()
        );

        Ok(VocDataset {
            config,
            classes,
            samples,
            records,
            split_sizes,
        })
    }

    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            name: VOC_NAME.to_owned(),
            classes: self.classes.clone(),
            split: self.config.dataset.split,
            num_records: self.records.len(),
            split_sizes: self.split_sizes.clone(),
        }
    }
}

fn split_file(dataset_dir: &Path, split: Split) -> PathBuf {
    dataset_dir
        .join("ImageSets")
        .join("Main")
        .join(format!("{}.txt", split))
}

async fn read_split_ids(dataset_dir: &Path, split: Split) -> Result<Vec<String>> {
    let path = split_file(dataset_dir, split);
    let content = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read split file {}", path.display()))?;
    let ids: Vec<_> = content
        .lines()
        .filter_map(|line| {
            // per-image lines may carry extra flags after the id
            let id = line.split_whitespace().next()?;
            Some(id.to_owned())
        })
        .collect();
    Ok(ids)
}
