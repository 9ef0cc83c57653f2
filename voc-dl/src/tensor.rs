//! Tensor extension methods.

use crate::common::*;

pub trait TensorExt {
    /// Resize a CHW image tensor to the exact size, without preserving the
    /// aspect ratio.
    fn resize2d_exact(&self, new_height: i64, new_width: i64) -> Result<Tensor>;
}

impl TensorExt for Tensor {
    fn resize2d_exact(&self, new_height: i64, new_width: i64) -> Result<Tensor> {
        let shape = self.size();
        ensure!(
            shape.len() == 3,
            "expect a CHW image tensor, but found shape {:?}",
            shape
        );

        tch::no_grad(|| match self.kind() {
            Kind::Uint8 => {
                let resized = vision::image::resize(self, new_width, new_height)?;
                Ok(resized)
            }
            // the backend only resizes byte images
            Kind::Float => {
                let bytes = (self * 255.0).to_kind(Kind::Uint8);
                let resized =
                    vision::image::resize(&bytes, new_width, new_height)?.to_kind(Kind::Float)
                        / 255.0;
                Ok(resized)
            }
            kind => bail!("unsupported tensor kind {:?}", kind),
        })
    }
}
