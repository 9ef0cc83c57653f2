//! Record and batch streams.

use crate::{
    common::*,
    config::{Config, PipelineConfig},
    dataset::{DataBatch, DataRecord, DatasetInfo, FileDataset, ImageBatch, VocDataset},
    processor::RecordLoader,
    shuffle,
};

/// Open the dataset named by the configuration and build its stream factory.
pub async fn load(config: Config) -> Result<(DataStream, DatasetInfo)> {
    let config = Arc::new(config);
    let dataset = VocDataset::load(config.clone()).await?;
    let info = dataset.info();
    let stream = DataStream::new(config, Arc::new(Box::new(dataset)));
    Ok((stream, info))
}

/// A factory of record and batch streams over one dataset.
#[derive(Debug, Clone)]
pub struct DataStream {
    config: Arc<Config>,
    dataset: Arc<Box<dyn FileDataset + Sync>>,
    loader: Arc<RecordLoader>,
}

impl DataStream {
    pub fn new(config: Arc<Config>, dataset: Arc<Box<dyn FileDataset + Sync>>) -> Self {
        let loader = Arc::new(RecordLoader::new(&config));
        Self {
            config,
            dataset,
            loader,
        }
    }

    /// Build a stream of loaded records.
    ///
    /// Every call starts a fresh pass over the dataset and draws new
    /// shuffling orders. With `shuffle_files` and `shuffle_buffer` both
    /// disabled, records arrive in dataset order.
    pub fn records(&self) -> Pin<Box<dyn Stream<Item = Result<DataRecord>> + Send>> {
        let PipelineConfig {
            shuffle_buffer,
            shuffle_files,
            seed,
            ..
        } = self.config.pipeline;
        let dataset = self.dataset.clone();
        let loader = self.loader.clone();

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indexes: Vec<_> = (0..dataset.records().len()).collect();
        if shuffle_files {
            indexes.shuffle(&mut rng);
        }

        let stream = stream::iter(indexes).par_then(None, move |index| {
            let dataset = dataset.clone();
            let loader = loader.clone();
            async move {
                let record = dataset.records()[index].clone();
                loader.load(&record).await
            }
        });

        match shuffle_buffer {
            Some(capacity) => Box::pin(shuffle::shuffle(Box::pin(stream), capacity, rng)),
            None => Box::pin(stream),
        }
    }

    /// Build a stream of batches of `batch_size` records.
    ///
    /// The tail batch may be smaller than the rest. The call fails when
    /// `batch_size` is not configured.
    pub fn batches(&self) -> Result<Pin<Box<dyn Stream<Item = Result<DataBatch>> + Send>>> {
        let batch_size = self
            .config
            .pipeline
            .batch_size
            .ok_or_else(|| format_err!("batch_size is not configured"))?
            .get();

        let stream = self
            .records()
            .chunks(batch_size)
            .par_then(None, |results| async move {
                let records: Vec<DataRecord> = results.into_iter().try_collect()?;
                anyhow::Ok(records)
            })
            .try_par_then(None, |records| async move {
                let (images, bboxes) = records
                    .into_iter()
                    .map(|DataRecord { image, bboxes }| (image, bboxes))
                    .unzip_n_vec();
                Ok(DataBatch {
                    images: ImageBatch::from_images(images),
                    bboxes,
                })
            });

        Ok(Box::pin(stream))
    }
}
