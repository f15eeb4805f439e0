//! Circles (§3: Circle).

use crate::point::Point;
use crate::rect::Rect;
use crate::scalar::FloatScalar;

/// A circle given by its center and radius. Construction assumes
/// `radius >= 0`; nothing here enforces that beyond the caller's
/// responsibility, matching the convention used for `Polygon` convexity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle<T: FloatScalar = f64> {
    pub center: Point<T>,
    pub radius: T,
}

impl<T: FloatScalar> Circle<T> {
    pub fn new(center: Point<T>, radius: T) -> Self {
        Circle { center, radius }
    }

    pub fn is_point(&self) -> bool {
        crate::scalar::equal(self.radius, T::zero())
    }

    pub fn bounds(&self) -> Rect<T> {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    pub fn point_at_angle(&self, angle_radians: T) -> Point<T> {
        self.center
            .offset(self.radius * angle_radians.cos(), self.radius * angle_radians.sin())
    }
}

/// Closed-disk containment: `pt` lies inside or on the circle. This is
/// the test the Delaunay cavity computation uses (§4.6 step 2).
pub fn point_in_circle<T: FloatScalar>(circle: Circle<T>, pt: Point<T>) -> bool {
    crate::scalar::less_equal(circle.center.dist_squared(pt), circle.radius * circle.radius)
}

/// Boundary containment, epsilon-exact.
pub fn point_on_circle<T: FloatScalar>(circle: Circle<T>, pt: Point<T>) -> bool {
    crate::scalar::equal(circle.center.dist_squared(pt), circle.radius * circle.radius)
}

/// Open-disk containment: `pt` lies strictly inside the circle. This is
/// the test the Delaunay-condition verifier uses (§4.6 verification
/// predicate).
pub fn point_inside_circle<T: FloatScalar>(circle: Circle<T>, pt: Point<T>) -> bool {
    crate::scalar::less(circle.center.dist_squared(pt), circle.radius * circle.radius)
}

#[cfg(any(feature = "approx", test))]
impl<T: FloatScalar + approx::AbsDiffEq<Epsilon = T>> approx::AbsDiffEq for Circle<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::comparison_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        use approx::AbsDiffEq;
        self.center.abs_diff_eq(&other.center, epsilon) && T::abs_diff_eq(&self.radius, &other.radius, epsilon)
    }
}

#[cfg(any(feature = "approx", test))]
impl<T: FloatScalar + approx::RelativeEq<Epsilon = T>> approx::RelativeEq for Circle<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        use approx::RelativeEq;
        self.center.relative_eq(&other.center, epsilon, max_relative)
            && T::relative_eq(&self.radius, &other.radius, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_on_boundary_is_in_but_not_strictly_inside() {
        let c = Circle::new(Point::new(0.0, 0.0), 2.0);
        let pt = Point::new(2.0, 0.0);
        assert!(point_in_circle(c, pt));
        assert!(point_on_circle(c, pt));
        assert!(!point_inside_circle(c, pt));
    }

    #[test]
    fn point_at_angle_lies_on_circle() {
        let c = Circle::new(Point::new(1.0, 1.0), 3.0);
        let pt = c.point_at_angle(std::f64::consts::FRAC_PI_2);
        assert!(point_on_circle(c, pt));
    }

    #[test]
    fn zero_radius_circle_is_a_point() {
        let c = Circle::new(Point::new(5.0, 5.0), 0.0);
        assert!(c.is_point());
    }
}
