use crate::{common::*, CornerRect};

/// Per-axis scaling and shifting of box coordinates.
///
/// A transform is applied with the `*` operator and maps coordinates from a
/// source frame into a target frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transform<T> {
    pub(crate) scale_y: T,
    pub(crate) scale_x: T,
    pub(crate) shift_y: T,
    pub(crate) shift_x: T,
}

impl<T> Transform<T>
where
    T: Num + PartialOrd + Copy,
{
    /// The transform stretching a `[height, width]` source extent onto a
    /// target extent, each axis scaled independently and the origin kept in
    /// place.
    pub fn try_stretch(src: [T; 2], dst: [T; 2]) -> Result<Self> {
        let [src_h, src_w] = src;
        let [dst_h, dst_w] = dst;
        let zero = T::zero();
        ensure!(
            src_h > zero && src_w > zero,
            "source extents must be positive"
        );
        ensure!(
            dst_h >= zero && dst_w >= zero,
            "target extents must be non-negative"
        );
        Ok(Self {
            scale_y: dst_h / src_h,
            scale_x: dst_w / src_w,
            shift_y: zero,
            shift_x: zero,
        })
    }

    pub fn stretch(src: [T; 2], dst: [T; 2]) -> Self {
        Self::try_stretch(src, dst).unwrap()
    }
}

impl<T> Transform<T>
where
    T: Num + Neg<Output = T> + Copy,
{
    /// The inverse mapping, target frame back onto source frame.
    pub fn inverse(&self) -> Self {
        Self {
            scale_y: T::one() / self.scale_y,
            scale_x: T::one() / self.scale_x,
            shift_y: -self.shift_y / self.scale_y,
            shift_x: -self.shift_x / self.scale_x,
        }
    }
}

impl<T> Mul<&CornerRect<T>> for &Transform<T>
where
    T: Num + Copy,
{
    type Output = CornerRect<T>;

    fn mul(self, rect: &CornerRect<T>) -> Self::Output {
        CornerRect {
            top: rect.top * self.scale_y + self.shift_y,
            left: rect.left * self.scale_x + self.shift_x,
            bottom: rect.bottom * self.scale_y + self.shift_y,
            right: rect.right * self.scale_x + self.shift_x,
        }
    }
}

impl<T> Mul<&Transform<T>> for &Transform<T>
where
    T: Num + Copy,
{
    type Output = Transform<T>;

    // the product applies `rhs` first, then `self`
    fn mul(self, rhs: &Transform<T>) -> Self::Output {
        Transform {
            scale_y: self.scale_y * rhs.scale_y,
            scale_x: self.scale_x * rhs.scale_x,
            shift_y: rhs.shift_y * self.scale_y + self.shift_y,
            shift_x: rhs.shift_x * self.scale_x + self.shift_x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stretch_normalizes_pixel_corners() {
        let to_unit = Transform::stretch([64.0, 32.0], [1.0, 1.0]);
        let pixel = CornerRect::new([16.0, 8.0, 48.0, 24.0]);
        assert_eq!(&to_unit * &pixel, CornerRect::new([0.25, 0.25, 0.75, 0.75]));
    }

    #[test]
    fn inverse_round_trips() {
        let to_pixel = Transform::stretch([1.0, 1.0], [512.0, 256.0]);
        let unit = CornerRect::new([0.125, 0.125, 0.5, 0.5]);
        let pixel = &to_pixel * &unit;
        assert_eq!(pixel, CornerRect::new([64.0, 32.0, 256.0, 128.0]));
        assert_eq!(&to_pixel.inverse() * &pixel, unit);
    }

    #[test]
    fn product_applies_right_then_left() {
        let halve = Transform::stretch([2.0, 2.0], [1.0, 1.0]);
        let to_pixel = Transform::stretch([1.0, 1.0], [8.0, 4.0]);
        let both = &to_pixel * &halve;
        let rect = CornerRect::new([0.5, 0.5, 1.0, 1.0]);
        assert_eq!(&both * &rect, &to_pixel * &(&halve * &rect));
        assert_eq!(&both * &rect, CornerRect::new([2.0, 1.0, 4.0, 2.0]));
    }

    #[test]
    fn rejects_degenerate_source() {
        assert!(Transform::try_stretch([0.0, 1.0], [1.0, 1.0]).is_err());
        assert!(Transform::try_stretch([1.0, -1.0], [1.0, 1.0]).is_err());
    }
}
