//! Class-tagged bounding boxes.

use bbox::{Rect, Transform};
use std::ops::Mul;

/// A rectangle annotated with a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label<R, C>
where
    R: Rect,
{
    pub rect: R,
    pub class: C,
}

impl<'a, R, C, T> Mul<&'a Label<R, C>> for &'a Transform<T>
where
    R: Rect,
    C: Copy,
    &'a Transform<T>: Mul<&'a R, Output = R>,
{
    type Output = Label<R, C>;

    fn mul(self, rhs: &'a Label<R, C>) -> Self::Output {
        Label {
            rect: <&'a Transform<T> as Mul<&'a R>>::mul(self, &rhs.rect),
            class: rhs.class,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bbox::CornerRect;

    #[test]
    fn label_transform_keeps_class() {
        let label: Label<CornerRect<f64>, usize> = Label {
            rect: CornerRect::new([16.0, 32.0, 48.0, 96.0]),
            class: 7usize,
        };
        let to_unit: Transform<f64> = Transform::stretch([128.0, 256.0], [1.0, 1.0]);
        let scaled = &to_unit * &label;
        assert_eq!(scaled.rect, CornerRect::new([0.125, 0.125, 0.375, 0.375]));
        assert_eq!(scaled.class, 7);
    }
}
