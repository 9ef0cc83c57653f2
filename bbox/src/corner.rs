use crate::{common::*, Rect};

/// A box stored as its top-left and bottom-right corners.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CornerRect<T> {
    pub(crate) top: T,
    pub(crate) left: T,
    pub(crate) bottom: T,
    pub(crate) right: T,
}

impl<T> CornerRect<T>
where
    T: Num + PartialOrd,
{
    /// Build a box from `[top, left, bottom, right]` coordinates.
    pub fn try_new(corners: [T; 4]) -> Result<Self> {
        let [top, left, bottom, right] = corners;
        ensure!(
            bottom >= top && right >= left,
            "flipped corners: top must not exceed bottom nor left exceed right"
        );
        Ok(Self {
            top,
            left,
            bottom,
            right,
        })
    }

    pub fn new(corners: [T; 4]) -> Self {
        Self::try_new(corners).unwrap()
    }
}

impl<T> Rect for CornerRect<T>
where
    T: Copy,
{
    type Unit = T;

    fn top(&self) -> T {
        self.top
    }

    fn left(&self) -> T {
        self.left
    }

    fn bottom(&self) -> T {
        self.bottom
    }

    fn right(&self) -> T {
        self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn derived_accessors() {
        let rect = CornerRect::new([0.2, 0.1, 0.8, 0.5]);
        assert_abs_diff_eq!(rect.height(), 0.6);
        assert_abs_diff_eq!(rect.width(), 0.4);
        assert_abs_diff_eq!(rect.center_y(), 0.5);
        assert_abs_diff_eq!(rect.center_x(), 0.3);
        assert_eq!(rect.corners(), [0.2, 0.1, 0.8, 0.5]);
    }

    #[test]
    fn rejects_flipped_corners() {
        assert!(CornerRect::try_new([0.8, 0.1, 0.2, 0.5]).is_err());
        assert!(CornerRect::try_new([0.2, 0.5, 0.8, 0.1]).is_err());
    }
}
