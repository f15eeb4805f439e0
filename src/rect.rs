//! Axis-aligned rectangles (§3: Rectangle).

use crate::point::Point;
use crate::scalar::{FloatScalar, Scalar};

/// An axis-aligned rectangle, always normalized so that
/// `left <= right` and `top <= bottom`.
///
/// Every constructor and setter re-establishes the invariant instead of
/// asserting it, so a `Rect` can never be observed in an unnormalized
/// state (§8 property 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T: Scalar = f64> {
    left: T,
    top: T,
    right: T,
    bottom: T,
}

impl<T: Scalar> Rect<T> {
    pub fn new(left: T, top: T, right: T, bottom: T) -> Self {
        let (left, right) = if left <= right { (left, right) } else { (right, left) };
        let (top, bottom) = if top <= bottom { (top, bottom) } else { (bottom, top) };
        Rect { left, top, right, bottom }
    }

    pub fn from_corners(top_left: Point<T>, bottom_right: Point<T>) -> Self {
        Rect::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
    }

    pub fn left(&self) -> T {
        self.left
    }
    pub fn top(&self) -> T {
        self.top
    }
    pub fn right(&self) -> T {
        self.right
    }
    pub fn bottom(&self) -> T {
        self.bottom
    }

    pub fn set_left(&mut self, left: T) {
        *self = Rect::new(left, self.top, self.right, self.bottom);
    }
    pub fn set_top(&mut self, top: T) {
        *self = Rect::new(self.left, top, self.right, self.bottom);
    }
    pub fn set_right(&mut self, right: T) {
        *self = Rect::new(self.left, self.top, right, self.bottom);
    }
    pub fn set_bottom(&mut self, bottom: T) {
        *self = Rect::new(self.left, self.top, self.right, bottom);
    }

    pub fn width(&self) -> T {
        self.right - self.left
    }
    pub fn height(&self) -> T {
        self.bottom - self.top
    }

    pub fn top_left(&self) -> Point<T> {
        Point::new(self.left, self.top)
    }
    pub fn top_right(&self) -> Point<T> {
        Point::new(self.right, self.top)
    }
    pub fn bottom_left(&self) -> Point<T> {
        Point::new(self.left, self.bottom)
    }
    pub fn bottom_right(&self) -> Point<T> {
        Point::new(self.right, self.bottom)
    }

    /// The rectangle's four corners in counter-clockwise order, suitable
    /// for use as a convex clip polygon.
    pub fn corners_ccw(&self) -> [Point<T>; 4] {
        [
            self.top_left(),
            self.bottom_left(),
            self.bottom_right(),
            self.top_right(),
        ]
    }

    pub fn center(&self) -> Point<T> {
        let two = T::one() + T::one();
        Point::new((self.left + self.right) / two, (self.top + self.bottom) / two)
    }

    pub fn inflate(&self, by: T) -> Rect<T> {
        Rect::new(self.left - by, self.top - by, self.right + by, self.bottom + by)
    }
}

impl<T: FloatScalar> Rect<T> {
    pub fn is_degenerate(&self) -> bool {
        crate::scalar::equal(self.left, self.right) || crate::scalar::equal(self.top, self.bottom)
    }

    pub fn contains_point(&self, pt: Point<T>) -> bool {
        crate::scalar::greater_equal(pt.x, self.left)
            && crate::scalar::less_equal(pt.x, self.right)
            && crate::scalar::greater_equal(pt.y, self.top)
            && crate::scalar::less_equal(pt.y, self.bottom)
    }

    /// The minimal rectangle enclosing `points`. `None` for an empty path.
    pub fn bounding(points: impl IntoIterator<Item = Point<T>>) -> Option<Rect<T>> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Rect::new(first.x, first.y, first.x, first.y);
        for p in iter {
            if p.x < bounds.left {
                bounds.left = p.x;
            }
            if p.y < bounds.top {
                bounds.top = p.y;
            }
            if p.x > bounds.right {
                bounds.right = p.x;
            }
            if p.y > bounds.bottom {
                bounds.bottom = p.y;
            }
        }
        Some(bounds)
    }
}

/// Rectangle intersection. Returns a degenerate (zero-area at best)
/// rectangle when `a` and `b` are disjoint (§8 scenario S7).
pub fn intersect<T: Scalar>(a: Rect<T>, b: Rect<T>) -> Option<Rect<T>> {
    if a.left > b.right || b.left > a.right || a.top > b.bottom || b.top > a.bottom {
        return None;
    }
    let max = |x: T, y: T| if x > y { x } else { y };
    let min = |x: T, y: T| if x < y { x } else { y };
    Some(Rect::new(
        max(a.left, b.left),
        max(a.top, b.top),
        min(a.right, b.right),
        min(a.bottom, b.bottom),
    ))
}

pub fn unite<T: Scalar>(a: Rect<T>, b: Rect<T>) -> Rect<T> {
    let max = |x: T, y: T| if x > y { x } else { y };
    let min = |x: T, y: T| if x < y { x } else { y };
    Rect::new(
        min(a.left, b.left),
        min(a.top, b.top),
        max(a.right, b.right),
        max(a.bottom, b.bottom),
    )
}

#[cfg(any(feature = "approx", test))]
impl<T: FloatScalar + approx::AbsDiffEq<Epsilon = T>> approx::AbsDiffEq for Rect<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::comparison_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        T::abs_diff_eq(&self.left, &other.left, epsilon)
            && T::abs_diff_eq(&self.top, &other.top, epsilon)
            && T::abs_diff_eq(&self.right, &other.right, epsilon)
            && T::abs_diff_eq(&self.bottom, &other.bottom, epsilon)
    }
}

#[cfg(any(feature = "approx", test))]
impl<T: FloatScalar + approx::RelativeEq<Epsilon = T>> approx::RelativeEq for Rect<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        T::relative_eq(&self.left, &other.left, epsilon, max_relative)
            && T::relative_eq(&self.top, &other.top, epsilon, max_relative)
            && T::relative_eq(&self.right, &other.right, epsilon, max_relative)
            && T::relative_eq(&self.bottom, &other.bottom, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_normalizes_swapped_corners() {
        let r = Rect::new(5.0, 5.0, 0.0, 0.0);
        assert_eq!(r.left(), 0.0);
        assert_eq!(r.top(), 0.0);
        assert_eq!(r.right(), 5.0);
        assert_eq!(r.bottom(), 5.0);
    }

    #[test]
    fn setters_keep_rectangle_normalized() {
        let mut r = Rect::new(0.0, 0.0, 5.0, 5.0);
        r.set_left(10.0);
        assert!(r.left() <= r.right());
    }

    #[test]
    fn disjoint_rectangles_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(2.0, 2.0, 3.0, 3.0);
        assert!(intersect(a, b).is_none());
    }

    #[test]
    fn center_is_midpoint_of_corners() {
        let r = Rect::new(0.0, 4.0, 3.0, 10.0);
        assert_eq!(r.width(), 3.0);
        assert_eq!(r.height(), 6.0);
        let c = r.center();
        assert_eq!((c.x, c.y), (1.5, 7.0));
    }
}
