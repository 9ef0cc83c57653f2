use crate::common::*;
use num_traits::One;

/// Read access to an axis-aligned box, whatever its storage layout.
///
/// Implementors provide the four corner coordinates; the center point and
/// extent are derived unless the storage has them at hand.
pub trait Rect {
    type Unit;

    fn top(&self) -> Self::Unit;

    fn left(&self) -> Self::Unit;

    fn bottom(&self) -> Self::Unit;

    fn right(&self) -> Self::Unit;

    fn height(&self) -> Self::Unit
    where
        Self::Unit: Num,
    {
        self.bottom() - self.top()
    }

    fn width(&self) -> Self::Unit
    where
        Self::Unit: Num,
    {
        self.right() - self.left()
    }

    fn center_y(&self) -> Self::Unit
    where
        Self::Unit: Num,
    {
        let two = Self::Unit::one() + Self::Unit::one();
        self.top() + self.height() / two
    }

    fn center_x(&self) -> Self::Unit
    where
        Self::Unit: Num,
    {
        let two = Self::Unit::one() + Self::Unit::one();
        self.left() + self.width() / two
    }

    /// Corner coordinates in `[top, left, bottom, right]` order.
    fn corners(&self) -> [Self::Unit; 4] {
        [self.top(), self.left(), self.bottom(), self.right()]
    }

    /// Center point and extent in `[center_y, center_x, height, width]`
    /// order.
    fn centered(&self) -> [Self::Unit; 4]
    where
        Self::Unit: Num,
    {
        [self.center_y(), self.center_x(), self.height(), self.width()]
    }
}
