//! The line family: segments, rays, and infinite lines sharing one
//! anchor+direction representation (§3, §4.2, §9).
//!
//! The reference source represents these three shapes with parallel
//! compile-time and dynamic-polymorphism class hierarchies. Per the
//! redesign direction in the design notes, this crate collapses them
//! into a single tagged sum so the intersection engine can pattern-match
//! on the pair of variants instead of dispatching through a vtable or a
//! template parameter.

pub mod intersection;

use crate::point::Point;
use crate::scalar::FloatScalar;
use crate::vector::{perp_dot, Vector};

pub use intersection::{intersect, LineIntersection};

/// Which of the three shapes a [`Line`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Segment,
    Ray,
    Infinite,
}

/// A segment, ray, or infinite line, represented uniformly as an anchor
/// point plus a direction vector. For a segment, the anchor is the start
/// and `anchor + direction` is the end. For a ray, the anchor is the
/// start and `direction` is the forward direction. For an infinite line,
/// the anchor is just some point on the line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line<T: FloatScalar = f64> {
    anchor: Point<T>,
    direction: Vector<T>,
    kind: LineKind,
}

impl<T: FloatScalar> Line<T> {
    pub fn segment(start: Point<T>, end: Point<T>) -> Self {
        Line { anchor: start, direction: end - start, kind: LineKind::Segment }
    }

    pub fn ray(start: Point<T>, direction: Vector<T>) -> Self {
        Line { anchor: start, direction, kind: LineKind::Ray }
    }

    pub fn infinite(anchor: Point<T>, direction: Vector<T>) -> Self {
        Line { anchor, direction, kind: LineKind::Infinite }
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn anchor(&self) -> Point<T> {
        self.anchor
    }

    pub fn direction(&self) -> Vector<T> {
        self.direction
    }

    /// Whether this line has degenerated into a single point (zero-length
    /// direction). Only possible for a `Segment`.
    pub fn is_point(&self) -> bool {
        crate::scalar::equal(self.direction.length_squared(), T::zero())
    }

    pub fn start_point(&self) -> Option<Point<T>> {
        match self.kind {
            LineKind::Segment | LineKind::Ray => Some(self.anchor),
            LineKind::Infinite => None,
        }
    }

    pub fn end_point(&self) -> Option<Point<T>> {
        match self.kind {
            LineKind::Segment => Some(self.anchor + self.direction),
            LineKind::Ray | LineKind::Infinite => None,
        }
    }

    pub fn mid_point(&self) -> Point<T> {
        let half = T::one() / (T::one() + T::one());
        self.anchor + self.direction.scale(half)
    }

    /// The parameter `t` such that `anchor + t * direction == pt`, if `pt`
    /// lies on this line's infinite extension.
    pub fn lerp_factor(&self, pt: Point<T>) -> Option<T> {
        if self.is_point() {
            return if self.anchor.approx_eq(pt) { Some(T::zero()) } else { None };
        }

        let v = pt - self.anchor;
        if !crate::scalar::equal(perp_dot(v, self.direction), T::zero()) {
            return None;
        }

        let mut factor = v.length() / self.direction.length();
        if v.dot(self.direction) < T::zero() {
            factor = T::zero() - factor;
        }
        Some(factor)
    }

    /// `anchor + t * direction`, unconditionally.
    pub fn lerp(&self, t: T) -> Point<T> {
        self.anchor + self.direction.scale(t)
    }

    pub fn is_point_on_infinite_line(&self, pt: Point<T>) -> bool {
        self.lerp_factor(pt).is_some()
    }

    /// As [`Line::lerp_factor`], but additionally restricted to the
    /// variant's domain: any `t` for `Infinite`, `t >= 0` for `Ray`,
    /// `0 <= t <= 1` for `Segment`.
    pub fn is_point_on_line(&self, pt: Point<T>) -> Option<T> {
        let factor = self.lerp_factor(pt)?;
        self.is_factor_in_domain(factor).then_some(factor)
    }

    pub(crate) fn is_factor_in_domain(&self, factor: T) -> bool {
        match self.kind {
            LineKind::Infinite => true,
            LineKind::Ray => crate::scalar::greater_equal(factor, T::zero()),
            LineKind::Segment => {
                crate::scalar::greater_equal(factor, T::zero())
                    && crate::scalar::less_equal(factor, T::one())
            }
        }
    }
}

/// Directions have colinear normals: the perp-dot of the two directions
/// is epsilon-zero.
pub fn parallel<T: FloatScalar>(a: &Line<T>, b: &Line<T>) -> bool {
    crate::scalar::equal(perp_dot(a.direction, b.direction), T::zero())
}

/// Parallel, and `b`'s anchor lies on `a`'s infinite extension.
pub fn coincident<T: FloatScalar>(a: &Line<T>, b: &Line<T>) -> bool {
    parallel(a, b) && a.is_point_on_infinite_line(b.anchor)
}

/// Whether two directions point the same way (positive dot product).
pub(crate) fn same_direction<T: FloatScalar>(a: Vector<T>, b: Vector<T>) -> bool {
    a.dot(b) > T::zero()
}

#[cfg(any(feature = "approx", test))]
impl<T: FloatScalar + approx::AbsDiffEq<Epsilon = T>> approx::AbsDiffEq for Line<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::comparison_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        use approx::AbsDiffEq;
        self.kind == other.kind
            && self.anchor.abs_diff_eq(&other.anchor, epsilon)
            && self.direction.abs_diff_eq(&other.direction, epsilon)
    }
}

#[cfg(any(feature = "approx", test))]
impl<T: FloatScalar + approx::RelativeEq<Epsilon = T>> approx::RelativeEq for Line<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        use approx::RelativeEq;
        self.kind == other.kind
            && self.anchor.relative_eq(&other.anchor, epsilon, max_relative)
            && self.direction.relative_eq(&other.direction, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_and_lerp_factor_round_trip() {
        let seg = Line::segment(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
        for t in [0.0, 0.25, 0.5, 1.0] {
            let pt = seg.lerp(t);
            let factor = seg.lerp_factor(pt).unwrap();
            assert!(crate::scalar::equal(factor, t));
        }
    }

    #[test]
    fn segment_domain_excludes_points_beyond_its_ends() {
        let seg = Line::segment(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
        assert!(seg.is_point_on_line(Point::new(2.0, 0.0)).is_some());
        assert!(seg.is_point_on_line(Point::new(5.0, 0.0)).is_none());
        assert!(seg.is_point_on_line(Point::new(-1.0, 0.0)).is_none());
    }

    #[test]
    fn ray_domain_excludes_points_behind_its_start() {
        let ray = Line::ray(Point::new(0.0, 0.0), Vector::new(1.0, 0.0));
        assert!(ray.is_point_on_line(Point::new(10.0, 0.0)).is_some());
        assert!(ray.is_point_on_line(Point::new(-1.0, 0.0)).is_none());
    }

    #[test]
    fn infinite_line_has_no_start_or_end() {
        let inf = Line::infinite(Point::new(0.0, 0.0), Vector::new(1.0, 1.0));
        assert!(inf.start_point().is_none());
        assert!(inf.end_point().is_none());
        assert!(inf.is_point_on_line(Point::new(-5.0, -5.0)).is_some());
    }

    #[test]
    fn parallel_lines_with_different_anchors_are_not_coincident() {
        let a = Line::segment(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
        let b = Line::segment(Point::new(0.0, 1.0), Point::new(4.0, 1.0));
        assert!(parallel(&a, &b));
        assert!(!coincident(&a, &b));
    }

    #[test]
    fn lines_on_the_same_infinite_line_are_coincident() {
        let a = Line::segment(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
        let b = Line::segment(Point::new(2.0, 0.0), Point::new(6.0, 0.0));
        assert!(coincident(&a, &b));
    }

    #[test]
    fn degenerate_point_line_only_contains_its_anchor() {
        let p = Line::segment(Point::new(1.0, 1.0), Point::new(1.0, 1.0));
        assert!(p.is_point());
        assert_eq!(p.lerp_factor(Point::new(1.0, 1.0)), Some(0.0));
        assert!(p.lerp_factor(Point::new(2.0, 2.0)).is_none());
    }
}
