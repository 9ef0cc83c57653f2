//! On-demand record processing.

use crate::{
    common::*,
    config::Config,
    dataset::{DataRecord, FileRecord},
    format::BoxFormat,
    tensor::TensorExt as _,
    unit::{Pixel, Ratio},
};
use bbox::Size;

/// Loads record images from disk and encodes their labels into tensors.
#[derive(Debug, Clone)]
pub struct RecordLoader {
    format: BoxFormat,
    image_size: Option<Pixel<Size<i64>>>,
    device: Device,
}

impl RecordLoader {
    pub fn new(config: &Config) -> Self {
        let pipeline = &config.pipeline;
        let image_size = pipeline
            .image_size
            .map(|[height, width]| Pixel(Size::new([height.get() as i64, width.get() as i64])));

        Self {
            format: pipeline.bbox_format,
            image_size,
            device: pipeline.device,
        }
    }

    /// Load the image of a record and encode its bounding boxes.
    ///
    /// The image tensor has shape `[3, height, width]` with float values in
    /// `[0, 1]`. The bbox tensor has one `[4 + 1]` row per box, the class
    /// index appended after the coordinates.
    pub async fn load(&self, record: &FileRecord) -> Result<DataRecord> {
        let format = self.format;
        let image_size = self.image_size;
        let device = self.device;
        let path = record.path.clone();
        let record_size = record.size;

        let (image, out_size) = tokio::task::spawn_blocking(move || -> Result<_> {
            tch::no_grad(|| -> Result<_> {
                let image = vision::image::load(&path)
                    .with_context(|| format!("failed to load image file {}", path.display()))?;
                let (channels, height, width) = image.size3()?;
                ensure!(
                    channels == 3,
                    "expect 3 channels, but found {} in image file {}",
                    channels,
                    path.display()
                );
                ensure!(
                    height == record_size.height() as i64 && width == record_size.width() as i64,
                    "expect image size {}x{}, but found {}x{} in image file {}",
                    record_size.height(),
                    record_size.width(),
                    height,
                    width,
                    path.display()
                );

                let (image, out_size) = match image_size {
                    Some(size) => (image.resize2d_exact(size.height(), size.width())?, size),
                    None => (image, Pixel(Size::new([height, width]))),
                };

                let image = image
                    .to_device(device)
                    .to_kind(Kind::Float)
                    .g_div1(255.0)
                    .set_requires_grad(false);

                Ok((image, out_size))
            })
        })
        .await??;

        let bboxes = {
            let rows: Vec<[f32; 5]> = record
                .bboxes
                .iter()
                .map(|label| {
                    let [c0, c1, c2, c3] = format.encode(&Ratio(label.rect.clone()), &out_size);
                    [
                        c0.raw() as f32,
                        c1.raw() as f32,
                        c2.raw() as f32,
                        c3.raw() as f32,
                        label.class as f32,
                    ]
                })
                .collect();

            let bboxes = if rows.is_empty() {
                Tensor::zeros(&[0, 5], FLOAT_CPU)
            } else {
                Tensor::of_slice(rows.flat()).view([rows.len() as i64, 5])
            };
            bboxes.to_device(device)
        };

        Ok(DataRecord { image, bboxes })
    }
}
