use anyhow::Result;
use approx::assert_abs_diff_eq;
use futures::stream::TryStreamExt as _;
use std::{fs, num::NonZeroUsize, path::Path};
use tch::{vision, Device, Kind, Tensor};
use voc_dl::{
    config::Config,
    data_stream::{self, DataStream},
    dataset::{DataBatch, DataRecord, ImageBatch, Split},
    format::BoxFormat,
};

fn write_annotation(
    root: &Path,
    id: &str,
    width: usize,
    height: usize,
    objects: &[(&str, [usize; 4])],
) {
    let objects_xml: String = objects
        .iter()
        .map(|(name, [xmin, ymin, xmax, ymax])| {
            format!(
                "  <object>\n    <name>{}</name>\n    <pose>Unspecified</pose>\n    \
                 <truncated>0</truncated>\n    <difficult>0</difficult>\n    <bndbox>\n      \
                 <xmin>{}</xmin>\n      <ymin>{}</ymin>\n      <xmax>{}</xmax>\n      \
                 <ymax>{}</ymax>\n    </bndbox>\n  </object>\n",
                name, xmin, ymin, xmax, ymax
            )
        })
        .collect();
    let xml = format!(
        "<annotation>\n  <folder>VOC2007</folder>\n  <filename>{id}.jpg</filename>\n  \
         <source>\n    <database>The VOC2007 Database</database>\n    \
         <annotation>PASCAL VOC2007</annotation>\n    <image>flickr</image>\n  </source>\n  \
         <size>\n    <width>{width}</width>\n    <height>{height}</height>\n    \
         <depth>3</depth>\n  </size>\n  <segmented>0</segmented>\n{objects_xml}</annotation>\n",
    );
    fs::write(root.join("Annotations").join(format!("{}.xml", id)), xml).unwrap();
}

fn write_image(root: &Path, id: &str, height: i64, width: i64) {
    let image = Tensor::zeros(&[3, height, width], (Kind::Uint8, Device::Cpu));
    vision::image::save(&image, root.join("JPEGImages").join(format!("{}.jpg", id))).unwrap();
}

/// Three records over three splits.
///
/// - `000001`: 60x80 pixels, one `dog` box spanning the central half.
/// - `000002`: 64x64 pixels, one object of an unlisted class.
/// - `000003`: 48x32 pixels, five objects.
fn make_voc_dir(root: &Path) {
    fs::create_dir_all(root.join("Annotations")).unwrap();
    fs::create_dir_all(root.join("ImageSets").join("Main")).unwrap();
    fs::create_dir_all(root.join("JPEGImages")).unwrap();

    let split_dir = root.join("ImageSets").join("Main");
    fs::write(split_dir.join("train.txt"), "000001\n000002\n").unwrap();
    fs::write(split_dir.join("test.txt"), "000003\n").unwrap();
    fs::write(split_dir.join("trainval.txt"), "000001\n000002\n000003\n").unwrap();

    write_annotation(root, "000001", 60, 80, &[("dog", [15, 20, 45, 60])]);
    write_image(root, "000001", 80, 60);

    write_annotation(root, "000002", 64, 64, &[("robot", [1, 1, 10, 10])]);
    write_image(root, "000002", 64, 64);

    write_annotation(
        root,
        "000003",
        48,
        32,
        &[
            ("person", [12, 8, 36, 24]),
            ("car", [0, 0, 48, 32]),
            ("cat", [24, 16, 48, 32]),
            ("chair", [0, 16, 24, 32]),
            ("dog", [12, 0, 36, 16]),
        ],
    );
    write_image(root, "000003", 32, 48);
}

fn base_config(root: &Path, split: Split, format: BoxFormat) -> Config {
    let mut config = Config::new(root, split, format);
    config.pipeline.shuffle_files = false;
    config
}

async fn collect_records(stream: &DataStream) -> Result<Vec<DataRecord>> {
    let records = stream.records().try_collect().await?;
    Ok(records)
}

fn size_fingerprint(records: &[DataRecord]) -> Vec<(i64, i64, i64)> {
    records
        .iter()
        .map(|record| record.image.size3().unwrap())
        .collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn ordered_records_and_metadata() -> Result<()> {
    let dir = tempfile::tempdir()?;
    make_voc_dir(dir.path());

    let config = base_config(dir.path(), Split::Train, BoxFormat::RelYxyx);
    let (stream, info) = data_stream::load(config).await?;

    assert_eq!(info.name, "voc/2007");
    assert_eq!(info.split, Split::Train);
    assert_eq!(info.num_records, 2);
    assert_eq!(info.num_classes(), 20);
    assert_eq!(
        info.split_sizes.iter().map(|(&k, &v)| (k, v)).collect::<Vec<_>>(),
        vec![(Split::Train, 2), (Split::TrainVal, 3), (Split::Test, 1)]
    );

    let records = collect_records(&stream).await?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].image.size3()?, (3, 80, 60));
    assert_eq!(records[0].image.kind(), Kind::Float);
    assert_eq!(records[0].bboxes.size2()?, (1, 5));
    assert_eq!(records[1].image.size3()?, (3, 64, 64));
    assert_eq!(records[1].bboxes.size2()?, (0, 5));

    // rel_yxyx row of the dog box, class index appended
    let row = Vec::<f64>::from(&records[0].bboxes.get(0));
    assert_abs_diff_eq!(row[0], 0.25, epsilon = 1e-6);
    assert_abs_diff_eq!(row[1], 0.25, epsilon = 1e-6);
    assert_abs_diff_eq!(row[2], 0.75, epsilon = 1e-6);
    assert_abs_diff_eq!(row[3], 0.75, epsilon = 1e-6);
    assert_abs_diff_eq!(row[4], 11.0, epsilon = 1e-6);

    // a second pass yields the same order
    let again = collect_records(&stream).await?;
    assert_eq!(size_fingerprint(&records), size_fingerprint(&again));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn resized_batches_are_stacked() -> Result<()> {
    let dir = tempfile::tempdir()?;
    make_voc_dir(dir.path());

    let mut config = base_config(dir.path(), Split::TrainVal, BoxFormat::Xyxy);
    config.pipeline.image_size = Some([
        NonZeroUsize::new(32).unwrap(),
        NonZeroUsize::new(32).unwrap(),
    ]);
    config.pipeline.batch_size = NonZeroUsize::new(2);
    let (stream, _info) = data_stream::load(config).await?;

    let batches: Vec<DataBatch> = stream.batches()?.try_collect().await?;
    assert_eq!(batches.len(), 2);

    let first = &batches[0];
    assert_eq!(first.images.batch_size(), 2);
    match &first.images {
        ImageBatch::Stacked(images) => assert_eq!(images.size(), vec![2, 3, 32, 32]),
        ImageBatch::List(_) => panic!("expect stacked images"),
    }
    assert_eq!(first.bboxes[0].size2()?, (1, 5));
    assert_eq!(first.bboxes[1].size2()?, (0, 5));

    // pixel xyxy coordinates follow the resized image
    let row = Vec::<f64>::from(&first.bboxes[0].get(0));
    assert_abs_diff_eq!(row[0], 8.0, epsilon = 1e-4);
    assert_abs_diff_eq!(row[1], 8.0, epsilon = 1e-4);
    assert_abs_diff_eq!(row[2], 24.0, epsilon = 1e-4);
    assert_abs_diff_eq!(row[3], 24.0, epsilon = 1e-4);
    assert_abs_diff_eq!(row[4], 11.0, epsilon = 1e-4);

    // the tail batch keeps the remaining record
    let last = &batches[1];
    assert_eq!(last.images.batch_size(), 1);
    match &last.images {
        ImageBatch::Stacked(images) => assert_eq!(images.size(), vec![1, 3, 32, 32]),
        ImageBatch::List(_) => panic!("expect stacked images"),
    }
    assert_eq!(last.bboxes[0].size2()?, (5, 5));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn mixed_sizes_stay_listed() -> Result<()> {
    let dir = tempfile::tempdir()?;
    make_voc_dir(dir.path());

    let mut config = base_config(dir.path(), Split::TrainVal, BoxFormat::RelYxyx);
    config.pipeline.batch_size = NonZeroUsize::new(3);
    let (stream, _info) = data_stream::load(config).await?;

    let batches: Vec<DataBatch> = stream.batches()?.try_collect().await?;
    assert_eq!(batches.len(), 1);

    let batch = &batches[0];
    assert_eq!(batch.images.batch_size(), 3);
    match &batch.images {
        ImageBatch::List(images) => {
            let sizes: Vec<_> = images
                .iter()
                .map(|image| image.size3().unwrap())
                .collect();
            assert_eq!(sizes, vec![(3, 80, 60), (3, 64, 64), (3, 32, 48)]);
        }
        ImageBatch::Stacked(_) => panic!("expect listed images"),
    }

    let row_counts: Vec<_> = batch
        .bboxes
        .iter()
        .map(|bboxes| bboxes.size2().unwrap().0)
        .collect();
    assert_eq!(row_counts, vec![1, 0, 5]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn seeded_shuffle_is_reproducible() -> Result<()> {
    let dir = tempfile::tempdir()?;
    make_voc_dir(dir.path());

    let mut config = Config::new(dir.path(), Split::TrainVal, BoxFormat::RelYxyx);
    config.pipeline.shuffle_files = true;
    config.pipeline.shuffle_buffer = NonZeroUsize::new(2);
    config.pipeline.seed = Some(7);
    let (stream, _info) = data_stream::load(config).await?;

    let first = collect_records(&stream).await?;
    let second = collect_records(&stream).await?;
    assert_eq!(size_fingerprint(&first), size_fingerprint(&second));

    let mut sizes = size_fingerprint(&first);
    sizes.sort_unstable();
    assert_eq!(sizes, vec![(3, 32, 48), (3, 64, 64), (3, 80, 60)]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_batch_size_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    make_voc_dir(dir.path());

    let config = base_config(dir.path(), Split::Train, BoxFormat::RelYxyx);
    let (stream, _info) = data_stream::load(config).await?;

    let err = stream.batches().err().unwrap();
    assert_eq!(err.to_string(), "batch_size is not configured");
    Ok(())
}
