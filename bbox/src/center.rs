use crate::{common::*, CornerRect, Rect};

/// A box stored as its center point and extent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CenterRect<T> {
    pub(crate) center_y: T,
    pub(crate) center_x: T,
    pub(crate) height: T,
    pub(crate) width: T,
}

impl<T> CenterRect<T>
where
    T: Num + PartialOrd,
{
    /// Build a box from `[center_y, center_x, height, width]` components.
    pub fn try_new(centered: [T; 4]) -> Result<Self> {
        let [center_y, center_x, height, width] = centered;
        let zero = T::zero();
        ensure!(
            height >= zero && width >= zero,
            "height and width must be non-negative"
        );
        Ok(Self {
            center_y,
            center_x,
            height,
            width,
        })
    }

    pub fn new(centered: [T; 4]) -> Self {
        Self::try_new(centered).unwrap()
    }
}

impl<T> Rect for CenterRect<T>
where
    T: Num + Copy,
{
    type Unit = T;

    fn top(&self) -> T {
        let two = T::one() + T::one();
        self.center_y - self.height / two
    }

    fn left(&self) -> T {
        let two = T::one() + T::one();
        self.center_x - self.width / two
    }

    fn bottom(&self) -> T {
        let two = T::one() + T::one();
        self.center_y + self.height / two
    }

    fn right(&self) -> T {
        let two = T::one() + T::one();
        self.center_x + self.width / two
    }

    // the corner-derived forms may round under floats
    fn height(&self) -> T {
        self.height
    }

    fn width(&self) -> T {
        self.width
    }

    fn center_y(&self) -> T {
        self.center_y
    }

    fn center_x(&self) -> T {
        self.center_x
    }
}

impl<T> From<CornerRect<T>> for CenterRect<T>
where
    T: Num + Copy,
{
    fn from(rect: CornerRect<T>) -> Self {
        Self::from(&rect)
    }
}

impl<T> From<&CornerRect<T>> for CenterRect<T>
where
    T: Num + Copy,
{
    fn from(rect: &CornerRect<T>) -> Self {
        let [center_y, center_x, height, width] = rect.centered();
        Self {
            center_y,
            center_x,
            height,
            width,
        }
    }
}
