//! 2D points (§3: Point).

use crate::scalar::{FloatScalar, Scalar};
use crate::vector::Vector;
use core::ops::{Add, Sub};

/// An immutable pair of coordinates.
///
/// `Point` derives structural `PartialEq`, matching the exact-comparison
/// convention this crate's closest relatives use for their coordinate
/// types; call [`Point::approx_eq`] wherever the epsilon-tolerant equality
/// the data model describes is actually required.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<T: Scalar = f64> {
    pub x: T,
    pub y: T,
}

impl<T: Scalar> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Point { x, y }
    }

    pub fn offset(self, dx: T, dy: T) -> Point<T> {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl<T: FloatScalar> Point<T> {
    /// Epsilon-tolerant equality, per-coordinate.
    pub fn approx_eq(self, other: Point<T>) -> bool {
        crate::scalar::equal(self.x, other.x) && crate::scalar::equal(self.y, other.y)
    }

    pub fn dist_squared(self, other: Point<T>) -> T {
        Vector::between(self, other).length_squared()
    }

    pub fn dist(self, other: Point<T>) -> T {
        self.dist_squared(other).sqrt()
    }
}

impl<T: Scalar> Add<Vector<T>> for Point<T> {
    type Output = Point<T>;
    fn add(self, rhs: Vector<T>) -> Point<T> {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Scalar> Sub for Point<T> {
    type Output = Vector<T>;
    fn sub(self, rhs: Point<T>) -> Vector<T> {
        Vector::between(rhs, self)
    }
}

#[cfg(any(feature = "approx", test))]
impl<T: FloatScalar + approx::AbsDiffEq<Epsilon = T>> approx::AbsDiffEq for Point<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::comparison_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        T::abs_diff_eq(&self.x, &other.x, epsilon) && T::abs_diff_eq(&self.y, &other.y, epsilon)
    }
}

#[cfg(any(feature = "approx", test))]
impl<T: FloatScalar + approx::RelativeEq<Epsilon = T>> approx::RelativeEq for Point<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        T::relative_eq(&self.x, &other.x, epsilon, max_relative)
            && T::relative_eq(&self.y, &other.y, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn subtraction_yields_displacement_vector() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert_relative_eq!(b - a, Vector::new(3.0, 4.0));
    }

    #[test]
    fn offset_translates_coordinates() {
        let p = Point::new(1.0, 2.0);
        assert_relative_eq!(p.offset(1.0, -1.0), Point::new(2.0, 1.0));
    }

    #[test]
    fn approx_eq_tolerates_tiny_drift() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(1.0 + 1e-9, 1.0);
        assert!(a.approx_eq(b));
    }
}
