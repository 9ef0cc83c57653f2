use anyhow::Result;
use clap::Parser;
use futures::stream::StreamExt as _;
use prettytable::{cell, row, Table};
use std::{num::NonZeroUsize, path::PathBuf, sync::Arc};
use voc_dl::{
    config::Config,
    data_stream,
    dataset::{ImageBatch, Split, VocDataset},
    format::BoxFormat,
};

#[derive(Debug, Clone, Parser)]
enum Opts {
    /// Show dataset metadata.
    Info {
        /// dataset directory containing Annotations, ImageSets and JPEGImages
        dataset_dir: PathBuf,
        /// dataset split
        #[clap(long, default_value = "trainval")]
        split: Split,
    },
    /// Stream records and print their shapes.
    Preview {
        /// dataset directory containing Annotations, ImageSets and JPEGImages
        dataset_dir: PathBuf,
        /// dataset split
        #[clap(long, default_value = "trainval")]
        split: Split,
        /// target bounding box format
        #[clap(long, default_value = "rel_yxyx")]
        bbox_format: BoxFormat,
        /// group records into batches of this size
        #[clap(long)]
        batch_size: Option<NonZeroUsize>,
        /// resize images to this square size
        #[clap(long)]
        image_size: Option<NonZeroUsize>,
        /// number of records or batches to print
        #[clap(long, default_value = "8")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    match Opts::parse() {
        Opts::Info { dataset_dir, split } => {
            info(dataset_dir, split).await?;
        }
        Opts::Preview {
            dataset_dir,
            split,
            bbox_format,
            batch_size,
            image_size,
            limit,
        } => {
            preview(
                dataset_dir,
                split,
                bbox_format,
                batch_size,
                image_size,
                limit,
            )
            .await?;
        }
    }

    Ok(())
}

async fn info(dataset_dir: PathBuf, split: Split) -> Result<()> {
    let config = Arc::new(Config::new(dataset_dir, split, BoxFormat::RelYxyx));
    let dataset = VocDataset::load(config).await?;
    let info = dataset.info();

    println!("dataset: {}", info.name);
    println!("split: {}", info.split);
    println!("records: {}", info.num_records);

    // print class information
    {
        let mut table = Table::new();
        table.add_row(row!["index", "class"]);

        info.classes.iter().enumerate().for_each(|(index, name)| {
            table.add_row(row![index, name]);
        });

        table.printstd();
    }

    // print split information
    {
        let mut table = Table::new();
        table.add_row(row!["split", "size"]);

        info.split_sizes.iter().for_each(|(split, size)| {
            table.add_row(row![split, size]);
        });

        table.printstd();
    }

    Ok(())
}

async fn preview(
    dataset_dir: PathBuf,
    split: Split,
    bbox_format: BoxFormat,
    batch_size: Option<NonZeroUsize>,
    image_size: Option<NonZeroUsize>,
    limit: usize,
) -> Result<()> {
    let mut config = Config::new(dataset_dir, split, bbox_format);
    config.pipeline.batch_size = batch_size;
    config.pipeline.image_size = image_size.map(|size| [size, size]);

    let (stream, info) = data_stream::load(config).await?;
    println!(
        "previewing split '{}' of {} with {} records",
        info.split, info.name, info.num_records
    );

    if batch_size.is_some() {
        let mut batches = stream.batches()?.take(limit).enumerate();

        while let Some((index, batch)) = batches.next().await {
            let batch = batch?;
            let num_boxes: Vec<_> = batch
                .bboxes
                .iter()
                .map(|bboxes| bboxes.size()[0])
                .collect();

            match batch.images {
                ImageBatch::Stacked(images) => {
                    println!(
                        "batch {}: images {:?}, boxes {:?}",
                        index,
                        images.size(),
                        num_boxes
                    );
                }
                ImageBatch::List(images) => {
                    let sizes: Vec<_> = images.iter().map(|image| image.size()).collect();
                    println!("batch {}: images {:?}, boxes {:?}", index, sizes, num_boxes);
                }
            }
        }
    } else {
        let mut records = stream.records().take(limit).enumerate();

        while let Some((index, record)) = records.next().await {
            let record = record?;
            println!(
                "record {}: image {:?}, {} boxes",
                index,
                record.image.size(),
                record.bboxes.size()[0]
            );
        }
    }

    Ok(())
}
