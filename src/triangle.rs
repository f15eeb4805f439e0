//! Triangles (§3, §4.5).

use crate::circle::Circle;
use crate::error::GeomError;
use crate::line::{self, Line};
use crate::point::Point;
use crate::scalar::FloatScalar;
use crate::vector::{perp_dot, Vector};

/// Three vertices, always stored counter-clockwise: the constructor
/// reorders a clockwise input instead of requiring the caller to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle<T: FloatScalar = f64> {
    vertices: [Point<T>; 3],
}

impl<T: FloatScalar> Triangle<T> {
    pub fn new(a: Point<T>, b: Point<T>, c: Point<T>) -> Self {
        let v01 = Vector::between(a, b);
        let v12 = Vector::between(b, c);
        let is_ccw = perp_dot(v01, v12) < T::zero();
        let vertices = if is_ccw { [a, b, c] } else { [a, c, b] };
        Triangle { vertices }
    }

    pub fn vertex(&self, idx: usize) -> Point<T> {
        self.vertices[idx]
    }

    pub fn vertices(&self) -> [Point<T>; 3] {
        self.vertices
    }

    pub fn has_vertex(&self, pt: Point<T>) -> bool {
        self.vertices.iter().any(|v| v.approx_eq(pt))
    }

    /// Shares any vertex, by epsilon-tolerant point equality, with `other`.
    pub fn shares_a_vertex_with(&self, other: &Triangle<T>) -> bool {
        self.vertices.iter().any(|v| other.has_vertex(*v))
    }

    pub fn edge(&self, idx: usize) -> Line<T> {
        Line::segment(self.vertices[idx], self.vertices[(idx + 1) % 3])
    }

    pub fn is_point(&self) -> bool {
        self.vertices[0].approx_eq(self.vertices[1]) && self.vertices[0].approx_eq(self.vertices[2])
    }

    pub fn is_line(&self) -> bool {
        if self.is_point() {
            return false;
        }
        let side01 = Line::segment(self.vertices[0], self.vertices[1]);
        self.vertices[0].approx_eq(self.vertices[1]) || side01.is_point_on_infinite_line(self.vertices[2])
    }

    pub fn is_degenerate(&self) -> bool {
        self.is_point() || self.is_line()
    }

    pub fn area(&self) -> T {
        if self.is_degenerate() {
            return T::zero();
        }
        let v = Vector::between(self.vertices[0], self.vertices[1]);
        let w = Vector::between(self.vertices[0], self.vertices[2]);
        (perp_dot(v, w)).abs() / (T::one() + T::one())
    }

    /// The intersection of the perpendicular bisectors of two sides.
    /// Always exists for a non-degenerate triangle.
    pub fn circumcenter(&self) -> Option<Point<T>> {
        let side01 = Line::segment(self.vertices[0], self.vertices[1]);
        let bisector01 = Line::infinite(side01.mid_point(), side01.direction().ccw_normal());

        let side12 = Line::segment(self.vertices[1], self.vertices[2]);
        let bisector12 = Line::infinite(side12.mid_point(), side12.direction().ccw_normal());

        line::intersect(&bisector01, &bisector12)?.as_point()
    }

    pub fn circumcircle(&self) -> Option<Circle<T>> {
        if self.is_point() {
            return Some(Circle::new(self.vertices[0], T::zero()));
        }
        if self.is_line() {
            return None;
        }
        let center = self.circumcenter()?;
        let radius = center.dist(self.vertices[0]);
        Some(Circle::new(center, radius))
    }

    /// As [`Triangle::circumcircle`], but through a checked entry point
    /// that reports a degenerate triangle instead of silently returning
    /// `None`.
    pub fn try_circumcircle(&self) -> Result<Circle<T>, GeomError> {
        self.circumcircle().ok_or(GeomError::DegenerateTriangle)
    }
}

#[cfg(any(feature = "approx", test))]
impl<T: FloatScalar + approx::AbsDiffEq<Epsilon = T>> approx::AbsDiffEq for Triangle<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::comparison_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        use approx::AbsDiffEq;
        (0..3).all(|i| self.vertices[i].abs_diff_eq(&other.vertices[i], epsilon))
    }
}

#[cfg(any(feature = "approx", test))]
impl<T: FloatScalar + approx::RelativeEq<Epsilon = T>> approx::RelativeEq for Triangle<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        use approx::RelativeEq;
        (0..3).all(|i| self.vertices[i].relative_eq(&other.vertices[i], epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn constructor_reorders_clockwise_input_to_counter_clockwise() {
        let cw = Triangle::new(Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(1.0, 0.0));
        let v01 = Vector::between(cw.vertex(0), cw.vertex(1));
        let v12 = Vector::between(cw.vertex(1), cw.vertex(2));
        assert!(perp_dot(v01, v12) < 0.0);
    }

    #[test]
    fn circumcircle_of_equilateral_triangle_at_origin() {
        // S1
        let t = Triangle::new(Point::new(2.0, 0.0), Point::new(-2.0, 0.0), Point::new(0.0, 2.0));
        let c = t.circumcircle().unwrap();
        assert_relative_eq!(c.center, Point::new(0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(c.radius, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn collinear_vertices_form_a_line_triangle_with_no_circumcircle() {
        let t = Triangle::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0));
        assert!(t.is_line());
        assert!(t.is_degenerate());
        assert!(t.circumcircle().is_none());
        assert_eq!(t.try_circumcircle(), Err(crate::error::GeomError::DegenerateTriangle));
    }

    #[test]
    fn coincident_vertices_form_a_point_triangle() {
        let p = Point::new(3.0, 4.0);
        let t = Triangle::new(p, p, p);
        assert!(t.is_point());
        let c = t.circumcircle().unwrap();
        assert!(c.is_point());
    }

    #[test]
    fn area_matches_half_the_parallelogram_spanned_by_two_edges() {
        let t = Triangle::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 3.0));
        assert_relative_eq!(t.area(), 6.0);
    }
}
