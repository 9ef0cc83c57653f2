//! Bounding box coordinate formats.

use crate::{
    common::*,
    unit::{Pixel, Ratio},
};
use bbox::{CenterRect, CornerRect, Rect as _, Size, Transform};

/// The coordinate layout boxes are encoded into.
///
/// Absolute formats are measured in pixels of the output image while `Rel*`
/// formats keep normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxFormat {
    /// `[xmin, ymin, xmax, ymax]` in pixels.
    Xyxy,
    /// `[ymin, xmin, ymax, xmax]` in pixels.
    Yxyx,
    /// `[xmin, ymin, xmax, ymax]` normalized.
    RelXyxy,
    /// `[ymin, xmin, ymax, xmax]` normalized.
    RelYxyx,
    /// `[xmin, ymin, width, height]` in pixels.
    Xywh,
    /// `[cx, cy, width, height]` in pixels.
    CenterXywh,
    /// `[cy, cx, height, width]` in pixels.
    #[serde(rename = "cycxhw")]
    CyCxHW,
}

impl BoxFormat {
    /// Encode a normalized corner box in this format.
    ///
    /// `size` is the pixel size of the image the box belongs to, after any
    /// resizing took place.
    pub fn encode(&self, rect: &Ratio<CornerRect<R64>>, size: &Pixel<Size<i64>>) -> [R64; 4] {
        let Ratio(rect) = rect;
        let to_pixel = Transform::stretch(
            [r64(1.0), r64(1.0)],
            [r64(size.height() as f64), r64(size.width() as f64)],
        );
        let pixel = &to_pixel * rect;

        match self {
            Self::Xyxy => [pixel.left(), pixel.top(), pixel.right(), pixel.bottom()],
            Self::Yxyx => pixel.corners(),
            Self::RelXyxy => [rect.left(), rect.top(), rect.right(), rect.bottom()],
            Self::RelYxyx => rect.corners(),
            Self::Xywh => [pixel.left(), pixel.top(), pixel.width(), pixel.height()],
            Self::CenterXywh => {
                let pixel = CenterRect::from(&pixel);
                [
                    pixel.center_x(),
                    pixel.center_y(),
                    pixel.width(),
                    pixel.height(),
                ]
            }
            Self::CyCxHW => CenterRect::from(&pixel).centered(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xyxy => "xyxy",
            Self::Yxyx => "yxyx",
            Self::RelXyxy => "rel_xyxy",
            Self::RelYxyx => "rel_yxyx",
            Self::Xywh => "xywh",
            Self::CenterXywh => "center_xywh",
            Self::CyCxHW => "cycxhw",
        }
    }
}

impl FromStr for BoxFormat {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        let format = match name {
            "xyxy" => Self::Xyxy,
            "yxyx" => Self::Yxyx,
            "rel_xyxy" => Self::RelXyxy,
            "rel_yxyx" => Self::RelYxyx,
            "xywh" => Self::Xywh,
            "center_xywh" => Self::CenterXywh,
            "cycxhw" => Self::CyCxHW,
            _ => bail!("unsupported bounding box format '{}'", name),
        };
        Ok(format)
    }
}

impl fmt::Display for BoxFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
