use crate::common::*;

/// A validated height-width extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size<T> {
    pub(crate) height: T,
    pub(crate) width: T,
}

impl<T> Size<T>
where
    T: Num + PartialOrd + Copy,
{
    /// Build an extent from a `[height, width]` pair.
    pub fn try_new(extent: [T; 2]) -> Result<Self> {
        let [height, width] = extent;
        let zero = T::zero();
        ensure!(
            height >= zero && width >= zero,
            "height and width must be non-negative"
        );
        Ok(Self { height, width })
    }

    pub fn new(extent: [T; 2]) -> Self {
        Self::try_new(extent).unwrap()
    }

    pub fn height(&self) -> T {
        self.height
    }

    pub fn width(&self) -> T {
        self.width
    }

    pub fn area(&self) -> T {
        self.height * self.width
    }
}
