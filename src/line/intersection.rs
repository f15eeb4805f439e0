//! Classified line/line intersection (§4.3).
//!
//! Priority order: a degenerate (point) operand short-circuits first,
//! then coincident lines are resolved as an interval overlap along their
//! shared infinite line, then parallel-but-not-coincident lines have no
//! intersection, and only then do we fall through to the general skew
//! case. This mirrors the reference source's `intersect` dispatch almost
//! line for line, including the perp-dot formula for the skew case.

use super::{coincident, parallel, same_direction, Line};
use crate::interval::{Bound, Interval, IntervalEnd};
use crate::point::Point;
use crate::scalar::FloatScalar;
use crate::vector::perp_dot;

/// The shape in which two lines overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineIntersection<T: FloatScalar = f64> {
    Point(Point<T>),
    Segment(Line<T>),
    Ray(Line<T>),
    Infinite(Line<T>),
}

/// Intersects two lines of any variants. `None` means the lines do not
/// meet at all (parallel and not coincident, or out of each other's
/// domain).
pub fn intersect<T: FloatScalar>(a: &Line<T>, b: &Line<T>) -> Option<LineIntersection<T>> {
    if a.is_point() || b.is_point() {
        return intersect_degenerate(a, b);
    }

    if coincident(a, b) {
        intersect_coincident(a, b)
    } else if parallel(a, b) {
        None
    } else {
        intersect_skew(a, b)
    }
}

fn intersect_point_line<T: FloatScalar>(pt: Point<T>, line: &Line<T>) -> Option<LineIntersection<T>> {
    line.is_point_on_line(pt).map(|_| LineIntersection::Point(pt))
}

fn intersect_degenerate<T: FloatScalar>(a: &Line<T>, b: &Line<T>) -> Option<LineIntersection<T>> {
    if a.is_point() {
        intersect_point_line(a.anchor(), b)
    } else {
        intersect_point_line(b.anchor(), a)
    }
}

fn intersect_coincident<T: FloatScalar>(a: &Line<T>, b: &Line<T>) -> Option<LineIntersection<T>> {
    let a_start = if a.start_point().is_some() { Bound::Finite(T::zero()) } else { Bound::NegInfinity };
    let a_end = if a.end_point().is_some() { Bound::Finite(T::one()) } else { Bound::PosInfinity };
    let a_interval = Interval::new(a_start, a_end, IntervalEnd::Closed, IntervalEnd::Closed);

    let have_same_dir = same_direction(b.direction(), a.direction());

    let mut b_start = if have_same_dir { Bound::NegInfinity } else { Bound::PosInfinity };
    if let Some(start_pt) = b.start_point() {
        if let Some(factor) = a.lerp_factor(start_pt) {
            b_start = Bound::Finite(factor);
        }
    }

    let mut b_end = if have_same_dir { Bound::PosInfinity } else { Bound::NegInfinity };
    if let Some(end_pt) = b.end_point() {
        if let Some(factor) = a.lerp_factor(end_pt) {
            b_end = Bound::Finite(factor);
        }
    }

    let b_interval = Interval::new(b_start, b_end, IntervalEnd::Closed, IntervalEnd::Closed);
    let overlap = crate::interval::intersect(a_interval, b_interval);
    make_coincident_intersection(overlap, a)
}

fn make_coincident_intersection<T: FloatScalar>(
    overlap: Interval<T>,
    ref_line: &Line<T>,
) -> Option<LineIntersection<T>> {
    if overlap.is_empty() {
        return None;
    }

    match overlap.infinite_end_count() {
        0 => {
            let (Bound::Finite(s), Bound::Finite(e)) = (overlap.start(), overlap.end()) else {
                unreachable!("no infinite endpoints")
            };
            if crate::scalar::equal(s, e) {
                Some(LineIntersection::Point(ref_line.lerp(s)))
            } else {
                Some(LineIntersection::Segment(Line::segment(ref_line.lerp(s), ref_line.lerp(e))))
            }
        }
        1 => {
            if matches!(overlap.start(), Bound::NegInfinity) {
                let Bound::Finite(e) = overlap.end() else { unreachable!() };
                Some(LineIntersection::Ray(Line::ray(ref_line.lerp(e), -ref_line.direction())))
            } else {
                let Bound::Finite(s) = overlap.start() else { unreachable!() };
                Some(LineIntersection::Ray(Line::ray(ref_line.lerp(s), ref_line.direction())))
            }
        }
        2 => Some(LineIntersection::Infinite(Line::infinite(ref_line.anchor(), ref_line.direction()))),
        _ => unreachable!("an interval has at most two endpoints"),
    }
}

/// Source: http://geomalgorithms.com/a05-_intersect-1.html
fn intersect_skew<T: FloatScalar>(a: &Line<T>, b: &Line<T>) -> Option<LineIntersection<T>> {
    let u = a.direction();
    let v = b.direction();
    let w = a.anchor() - b.anchor();

    // Safe: parallelism (zero denominator) was ruled out by the caller.
    let factor_a = (v.y * w.x - v.x * w.y) / perp_dot(v, u);
    let factor_b = perp_dot(u, w) / perp_dot(u, v);

    if a.is_factor_in_domain(factor_a) && b.is_factor_in_domain(factor_b) {
        Some(LineIntersection::Point(a.lerp(factor_a)))
    } else {
        None
    }
}

impl<T: FloatScalar> LineIntersection<T> {
    /// Whether the intersection is a single point strictly interior to
    /// both operands' domains is left to the caller; this just exposes
    /// the resulting point, if the intersection collapsed to one.
    pub fn as_point(&self) -> Option<Point<T>> {
        match self {
            LineIntersection::Point(p) => Some(*p),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::LineKind;

    #[test]
    fn crossing_segments_intersect_at_a_point() {
        // S2
        let a = Line::segment(Point::new(0.0, 0.0), Point::new(4.0, 4.0));
        let b = Line::segment(Point::new(0.0, 4.0), Point::new(4.0, 0.0));
        let x = intersect(&a, &b).unwrap();
        assert_eq!(x, LineIntersection::Point(Point::new(2.0, 2.0)));
    }

    #[test]
    fn parallel_offset_segments_do_not_intersect() {
        // S3
        let a = Line::segment(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
        let b = Line::segment(Point::new(0.0, 1.0), Point::new(4.0, 1.0));
        assert!(intersect(&a, &b).is_none());
    }

    #[test]
    fn coincident_segments_overlap_in_a_shared_segment() {
        // S4
        let a = Line::segment(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
        let b = Line::segment(Point::new(2.0, 0.0), Point::new(6.0, 0.0));
        let x = intersect(&a, &b).unwrap();
        match x {
            LineIntersection::Segment(seg) => {
                assert_eq!(seg.kind(), LineKind::Segment);
                assert!(seg.start_point().unwrap().approx_eq(Point::new(2.0, 0.0)));
                assert!(seg.end_point().unwrap().approx_eq(Point::new(4.0, 0.0)));
            }
            other => panic!("expected a Segment, got {other:?}"),
        }
    }

    #[test]
    fn coincident_rays_pointing_apart_meet_in_a_single_point() {
        let a = Line::ray(Point::new(0.0, 0.0), crate::vector::Vector::new(-1.0, 0.0));
        let b = Line::ray(Point::new(0.0, 0.0), crate::vector::Vector::new(1.0, 0.0));
        let x = intersect(&a, &b).unwrap();
        assert_eq!(x, LineIntersection::Point(Point::new(0.0, 0.0)));
    }

    #[test]
    fn two_overlapping_infinite_lines_are_infinite() {
        let a = Line::infinite(Point::new(0.0, 0.0), crate::vector::Vector::new(1.0, 0.0));
        let b = Line::infinite(Point::new(5.0, 0.0), crate::vector::Vector::new(2.0, 0.0));
        let x = intersect(&a, &b).unwrap();
        assert!(matches!(x, LineIntersection::Infinite(_)));
    }

    #[test]
    fn degenerate_point_line_intersects_a_segment_that_contains_it() {
        let point_line = Line::segment(Point::new(2.0, 0.0), Point::new(2.0, 0.0));
        let seg = Line::segment(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
        assert_eq!(intersect(&point_line, &seg), Some(LineIntersection::Point(Point::new(2.0, 0.0))));

        let outside = Line::segment(Point::new(10.0, 10.0), Point::new(10.0, 10.0));
        assert_eq!(intersect(&outside, &seg), None);
    }

    #[test]
    fn skew_segments_beyond_each_others_domain_do_not_intersect() {
        let a = Line::segment(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let b = Line::segment(Point::new(3.0, 0.0), Point::new(3.0, -1.0));
        assert!(intersect(&a, &b).is_none());
    }

    #[test]
    fn intersection_is_symmetric_in_its_operands() {
        // Property 3.
        let a = Line::segment(Point::new(0.0, 0.0), Point::new(4.0, 4.0));
        let b = Line::segment(Point::new(0.0, 4.0), Point::new(4.0, 0.0));
        assert_eq!(intersect(&a, &b), intersect(&b, &a));
    }
}
