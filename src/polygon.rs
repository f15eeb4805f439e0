//! Convex polygons: intersection and line cutting (§3: Polygon, §4.4).
//!
//! The vertex list carries no enforced winding or convexity; operations
//! that need either normalize on entry. `intersect_convex` runs
//! O'Rourke's linear-time chase algorithm for two genuinely polygonal
//! (>= 3 vertices) operands, falling back to direct point/segment tests
//! for the degenerate 0-, 1-, and 2-vertex inputs the chase can't walk.

use crate::line::{self, Line, LineIntersection};
use crate::point::Point;
use crate::rect::Rect;
use crate::scalar::FloatScalar;
use crate::vector::{perp_dot, Vector};

/// An ordered list of vertices. No winding or convexity is enforced by
/// construction; see [`Polygon::is_convex`] and [`Polygon::make_ccw`].
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<T: FloatScalar = f64> {
    vertices: Vec<Point<T>>,
}

impl<T: FloatScalar> Polygon<T> {
    pub fn new(vertices: Vec<Point<T>>) -> Self {
        Polygon { vertices }
    }

    pub fn empty() -> Self {
        Polygon { vertices: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Point<T>] {
        &self.vertices
    }

    pub fn vertex(&self, idx: usize) -> Point<T> {
        self.vertices[idx]
    }

    /// The edge from vertex `idx` to vertex `idx + 1`, wrapping around.
    pub fn edge(&self, idx: usize) -> Line<T> {
        Line::segment(self.vertices[idx], self.vertices[(idx + 1) % self.vertices.len()])
    }

    pub fn push(&mut self, pt: Point<T>) {
        self.vertices.push(pt);
    }

    /// Appends `pt` unless it's an epsilon-duplicate of the last vertex
    /// already in the list, so a run of collinear intersection hits
    /// doesn't pile up repeated points.
    fn add_unique(&mut self, pt: Point<T>) {
        if let Some(last) = self.vertices.last() {
            if last.approx_eq(pt) {
                return;
            }
        }
        self.vertices.push(pt);
    }

    pub fn bounds(&self) -> Option<Rect<T>> {
        Rect::bounding(self.vertices.iter().copied())
    }

    fn signed_area_times_two(&self) -> T {
        let n = self.vertices.len();
        if n < 3 {
            return T::zero();
        }
        let mut sum = T::zero();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            sum = sum + perp_dot(Vector::new(a.x, a.y), Vector::new(b.x, b.y));
        }
        sum
    }

    /// Positive winding under the convention that a left turn
    /// (`perp_dot(edge_i, edge_{i+1}) > 0`) is counter-clockwise.
    pub fn is_ccw(&self) -> bool {
        crate::scalar::greater(self.signed_area_times_two(), T::zero())
    }

    pub fn reversed(&self) -> Polygon<T> {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Polygon { vertices }
    }

    /// `self` if already counter-clockwise (or too small to have a
    /// winding), otherwise its reversal.
    pub fn make_ccw(&self) -> Polygon<T> {
        if self.vertices.len() < 3 || self.is_ccw() {
            self.clone()
        } else {
            self.reversed()
        }
    }

    /// Whether consecutive edges always turn the same way (or not at
    /// all). Polygons under 3 vertices are not convex.
    pub fn is_convex(&self) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let mut saw_left = false;
        let mut saw_right = false;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let c = self.vertices[(i + 2) % n];
            let turn = perp_dot(Vector::between(a, b), Vector::between(b, c));
            if crate::scalar::greater(turn, T::zero()) {
                saw_left = true;
            } else if crate::scalar::less(turn, T::zero()) {
                saw_right = true;
            }
            if saw_left && saw_right {
                return false;
            }
        }
        true
    }

    /// Point-in-convex-polygon test. Assumes `self` is convex and
    /// counter-clockwise; callers that don't already know this should
    /// go through [`Polygon::make_ccw`] first.
    pub fn contains_point_convex(&self, pt: Point<T>) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        (0..n).all(|i| {
            let edge = self.edge(i);
            crate::scalar::greater_equal(perp_dot(edge.direction(), pt - edge.anchor()), T::zero())
        })
    }
}

/// Which side of a cutting line a vertex falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    On,
}

fn side_of_line<T: FloatScalar>(line: &Line<T>, pt: Point<T>) -> Side {
    let f = perp_dot(line.direction(), pt - line.anchor());
    if crate::scalar::equal(f, T::zero()) {
        Side::On
    } else if f > T::zero() {
        Side::Left
    } else {
        Side::Right
    }
}

fn was_line_crossed(prev: Side, now: Side) -> bool {
    matches!((prev, now), (Side::Left, Side::Right) | (Side::Right, Side::Left))
}

fn collect_intersection<T: FloatScalar>(
    cutter: &Line<T>,
    edge: Line<T>,
    left: &mut Polygon<T>,
    right: &mut Polygon<T>,
) {
    if let Some(LineIntersection::Point(ipt)) = line::intersect(&edge, cutter) {
        left.add_unique(ipt);
        right.add_unique(ipt);
    }
}

/// Splits a convex polygon by an infinite line, collapsing the result
/// per the usual output-size policy: both sides returned when the line
/// genuinely separates vertices onto each side, a single polygon
/// (the input, unsplit) when the line only touches it or misses it
/// entirely, and nothing for an empty input.
pub fn cut_convex_by_line<T: FloatScalar>(poly: &Polygon<T>, cutter: &Line<T>) -> Vec<Polygon<T>> {
    let n = poly.len();
    if n == 0 {
        return Vec::new();
    }

    let mut left = Polygon::empty();
    let mut right = Polygon::empty();
    let mut have_strictly_left = false;
    let mut have_strictly_right = false;
    let mut side = side_of_line(cutter, poly.vertex(0));
    let mut prev_side;

    for i in 0..n {
        let cur = poly.vertex(i);
        prev_side = side;
        side = side_of_line(cutter, cur);

        if i > 0 && was_line_crossed(prev_side, side) {
            collect_intersection(cutter, Line::segment(poly.vertex(i - 1), cur), &mut left, &mut right);
        }

        match side {
            Side::Left => {
                left.add_unique(cur);
                have_strictly_left = true;
            }
            Side::Right => {
                right.add_unique(cur);
                have_strictly_right = true;
            }
            Side::On => {
                left.add_unique(cur);
                right.add_unique(cur);
            }
        }
    }

    if n > 2 {
        let first = poly.vertex(0);
        let last = poly.vertex(n - 1);
        let first_side = side_of_line(cutter, first);
        if was_line_crossed(side, first_side) {
            collect_intersection(cutter, Line::segment(last, first), &mut left, &mut right);
        }
    }

    if left.is_empty() && right.is_empty() {
        vec![left]
    } else if !have_strictly_left && !have_strictly_right {
        vec![left]
    } else {
        let mut res = Vec::new();
        if !left.is_empty() && have_strictly_left {
            res.push(left);
        }
        if !right.is_empty() && have_strictly_right {
            res.push(right);
        }
        res
    }
}

fn intersect_point_with_polygon<T: FloatScalar>(pt: Point<T>, poly: &Polygon<T>) -> Polygon<T> {
    match poly.len() {
        0 => Polygon::empty(),
        1 => {
            if pt.approx_eq(poly.vertex(0)) {
                Polygon::new(vec![pt])
            } else {
                Polygon::empty()
            }
        }
        2 => {
            let seg = Line::segment(poly.vertex(0), poly.vertex(1));
            if seg.is_point_on_line(pt).is_some() {
                Polygon::new(vec![pt])
            } else {
                Polygon::empty()
            }
        }
        _ => {
            if poly.make_ccw().contains_point_convex(pt) {
                Polygon::new(vec![pt])
            } else {
                Polygon::empty()
            }
        }
    }
}

/// Clips the infinite-domain-free segment `seg` to the interior of a
/// convex polygon via sequential half-plane clipping (one pass per
/// polygon edge), in the manner of Cyrus-Beck line clipping.
fn clip_segment_to_convex<T: FloatScalar>(seg: Line<T>, poly: &Polygon<T>) -> Polygon<T> {
    if poly.len() < 2 {
        return Polygon::empty();
    }
    if poly.len() == 2 {
        let other = Line::segment(poly.vertex(0), poly.vertex(1));
        return match line::intersect(&seg, &other) {
            Some(LineIntersection::Point(pt)) => Polygon::new(vec![pt]),
            Some(LineIntersection::Segment(s)) => {
                Polygon::new(vec![s.start_point().unwrap(), s.end_point().unwrap()])
            }
            _ => Polygon::empty(),
        };
    }

    let ccw = poly.make_ccw();
    let p0 = seg.anchor();
    let d = seg.direction();
    let mut t0 = T::zero();
    let mut t1 = T::one();

    for i in 0..ccw.len() {
        let edge = ccw.edge(i);
        let f_p0 = perp_dot(edge.direction(), p0 - edge.anchor());
        let f_d = perp_dot(edge.direction(), d);

        if crate::scalar::equal(f_d, T::zero()) {
            if crate::scalar::less(f_p0, T::zero()) {
                return Polygon::empty();
            }
            continue;
        }

        let t_boundary = (T::zero() - f_p0) / f_d;
        if crate::scalar::greater(f_d, T::zero()) {
            if crate::scalar::greater(t_boundary, t0) {
                t0 = t_boundary;
            }
        } else if crate::scalar::less(t_boundary, t1) {
            t1 = t_boundary;
        }

        if crate::scalar::greater(t0, t1) {
            return Polygon::empty();
        }
    }

    let start = seg.lerp(t0);
    if crate::scalar::equal(t0, t1) {
        Polygon::new(vec![start])
    } else {
        Polygon::new(vec![start, seg.lerp(t1)])
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Owner {
    P,
    Q,
}

struct Traversal<'a, T: FloatScalar> {
    poly: &'a Polygon<T>,
    idx: usize,
    owner: Owner,
}

impl<'a, T: FloatScalar> Traversal<'a, T> {
    fn new(poly: &'a Polygon<T>, start: usize, owner: Owner) -> Self {
        Traversal { poly, idx: start % poly.len(), owner }
    }

    fn point(&self) -> Point<T> {
        self.poly.vertex(self.idx)
    }

    /// The edge ending at the current point.
    fn edge(&self) -> Line<T> {
        let n = self.poly.len();
        let prev = if self.idx == 0 { n - 1 } else { self.idx - 1 };
        self.poly.edge(prev)
    }

    fn advance(&mut self) {
        self.idx = (self.idx + 1) % self.poly.len();
    }

    fn is_point_on_inside(&self, pt: Point<T>) -> bool {
        let e = self.edge();
        crate::scalar::greater_equal(perp_dot(e.direction(), pt - e.anchor()), T::zero())
    }

    fn is_edge_ccw_or_collinear(&self, other: Line<T>) -> bool {
        crate::scalar::greater_equal(perp_dot(self.edge().direction(), other.direction()), T::zero())
    }

    fn collect_if_inside(&self, cur_inside: Option<Owner>, out: &mut Polygon<T>) {
        if cur_inside == Some(self.owner) {
            out.add_unique(self.point());
        }
    }
}

fn advance_traversal<T: FloatScalar>(
    p: &mut Traversal<T>,
    q: &mut Traversal<T>,
    cur_inside: Option<Owner>,
    out: &mut Polygon<T>,
) {
    let rear_is_p = if q.is_edge_ccw_or_collinear(p.edge()) {
        !q.is_point_on_inside(p.point())
    } else {
        p.is_point_on_inside(q.point())
    };

    if rear_is_p {
        p.collect_if_inside(cur_inside, out);
        p.advance();
    } else {
        q.collect_if_inside(cur_inside, out);
        q.advance();
    }
}

/// Intersects two convex polygons via O'Rourke's linear chase: two
/// cursors walk their polygons' edges in lockstep, advancing whichever
/// cursor's edge trails the other, and every crossing the cursors pass
/// is recorded along with whichever polygon's boundary currently runs
/// through the other's interior. Falls back to direct point/segment
/// tests when either operand has fewer than 3 vertices.
///
/// Non-convex operands are not rejected here (no `Result`); the walk
/// degrades to an unspecified partial result. Use
/// [`try_intersect_convex`] when convexity isn't already guaranteed.
pub fn intersect_convex<T: FloatScalar>(p_in: &Polygon<T>, q_in: &Polygon<T>) -> Polygon<T> {
    if p_in.is_empty() || q_in.is_empty() {
        return Polygon::empty();
    }
    if p_in.len() == 1 {
        return intersect_point_with_polygon(p_in.vertex(0), q_in);
    }
    if q_in.len() == 1 {
        return intersect_point_with_polygon(q_in.vertex(0), p_in);
    }
    if p_in.len() == 2 {
        return clip_segment_to_convex(Line::segment(p_in.vertex(0), p_in.vertex(1)), q_in);
    }
    if q_in.len() == 2 {
        return clip_segment_to_convex(Line::segment(q_in.vertex(0), q_in.vertex(1)), p_in);
    }

    let p = p_in.make_ccw();
    let q = q_in.make_ccw();
    let max_iter = 2 * (p.len() + q.len());

    let mut out = Polygon::empty();
    let mut p_trav = Traversal::new(&p, 1 % p.len(), Owner::P);
    let mut q_trav = Traversal::new(&q, 1 % q.len(), Owner::Q);
    let mut cur_inside: Option<Owner> = None;

    let mut first_isect_pt: Option<Point<T>> = None;
    let mut first_isect_iter = 0usize;
    let mut num_iter = 0usize;

    while num_iter <= max_iter {
        if let Some(LineIntersection::Point(isect_pt)) = line::intersect(&p_trav.edge(), &q_trav.edge()) {
            match first_isect_pt {
                None => {
                    first_isect_pt = Some(isect_pt);
                    first_isect_iter = num_iter;
                }
                Some(first) if isect_pt.approx_eq(first) && num_iter != first_isect_iter + 1 => {
                    return out;
                }
                _ => {}
            }

            out.add_unique(isect_pt);
            cur_inside = Some(if q_trav.is_point_on_inside(p_trav.point()) { Owner::P } else { Owner::Q });
        }

        advance_traversal(&mut p_trav, &mut q_trav, cur_inside, &mut out);
        num_iter += 1;
    }

    if q.contains_point_convex(p_trav.point()) {
        p
    } else if p.contains_point_convex(q_trav.point()) {
        q
    } else {
        Polygon::empty()
    }
}

/// As [`intersect_convex`], but first checks both operands for
/// convexity (3+ vertices only; points and segments are always
/// accepted as degenerate convex polygons).
pub fn try_intersect_convex<T: FloatScalar>(
    p: &Polygon<T>,
    q: &Polygon<T>,
) -> Result<Polygon<T>, crate::error::GeomError> {
    let convex_or_degenerate = |poly: &Polygon<T>| poly.len() < 3 || poly.is_convex();
    if !convex_or_degenerate(p) || !convex_or_degenerate(q) {
        return Err(crate::error::GeomError::NonConvexPolygon);
    }
    Ok(intersect_convex(p, q))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(half: f64) -> Polygon<f64> {
        Polygon::new(vec![
            Point::new(-half, -half),
            Point::new(half, -half),
            Point::new(half, half),
            Point::new(-half, half),
        ])
    }

    #[test]
    fn unit_squares_overlap_in_the_shared_quadrant() {
        let a = square(1.0);
        let b = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ]);
        let x = intersect_convex(&a, &b);
        assert!(x.len() >= 3);
        assert!(x.make_ccw().contains_point_convex(Point::new(0.5, 0.5)));
        assert!(!x.make_ccw().contains_point_convex(Point::new(1.5, 1.5)));
    }

    #[test]
    fn intersection_is_commutative_up_to_vertex_order() {
        // Property 9.
        let a = square(1.0);
        let b = Polygon::new(vec![
            Point::new(-0.5, -2.0),
            Point::new(0.5, -2.0),
            Point::new(0.5, 2.0),
            Point::new(-0.5, 2.0),
        ]);
        let ab = intersect_convex(&a, &b).make_ccw();
        let ba = intersect_convex(&b, &a).make_ccw();
        assert_eq!(ab.len(), ba.len());
        for p in ab.vertices() {
            assert!(ba.vertices().iter().any(|q| q.approx_eq(*p)));
        }
    }

    #[test]
    fn intersecting_a_polygon_with_itself_is_idempotent() {
        // Property 8.
        let a = square(1.0);
        let x = intersect_convex(&a, &a).make_ccw();
        assert!(x.contains_point_convex(Point::new(0.0, 0.0)));
        assert!(x.contains_point_convex(Point::new(0.9, 0.9)));
        assert!(!x.contains_point_convex(Point::new(1.1, 1.1)));
    }

    #[test]
    fn disjoint_squares_do_not_intersect() {
        let a = square(1.0);
        let b = Polygon::new(vec![
            Point::new(10.0, 10.0),
            Point::new(12.0, 10.0),
            Point::new(12.0, 12.0),
            Point::new(10.0, 12.0),
        ]);
        assert!(intersect_convex(&a, &b).is_empty());
    }

    #[test]
    fn a_single_point_intersects_a_containing_polygon() {
        let a = Polygon::new(vec![Point::new(0.0, 0.0)]);
        let b = square(5.0);
        let x = intersect_convex(&a, &b);
        assert_eq!(x.len(), 1);
    }

    #[test]
    fn cutting_a_square_down_the_middle_yields_two_halves() {
        // Property 10: every vertex of the source lands in one output
        // (or both, if exactly on the cut), and the cut sides are emitted
        // into both.
        let sq = square(1.0);
        let cutter = Line::infinite(Point::new(0.0, -2.0), Vector::new(0.0, 1.0));
        let pieces = cut_convex_by_line(&sq, &cutter);

        assert_eq!(pieces.len(), 2);
        let (left, right) = (&pieces[0], &pieces[1]);
        assert!(left.make_ccw().contains_point_convex(Point::new(-0.5, 0.0)));
        assert!(right.make_ccw().contains_point_convex(Point::new(0.5, 0.0)));
        assert!(left.vertices().iter().any(|p| p.approx_eq(Point::new(0.0, 1.0))));
        assert!(right.vertices().iter().any(|p| p.approx_eq(Point::new(0.0, 1.0))));
    }

    #[test]
    fn a_line_missing_the_polygon_entirely_returns_the_polygon_unsplit() {
        let sq = square(1.0);
        let cutter = Line::infinite(Point::new(0.0, -10.0), Vector::new(1.0, 0.0));
        let pieces = cut_convex_by_line(&sq, &cutter);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].len(), 4);
    }

    #[test]
    fn convexity_check_rejects_a_dart_shaped_quadrilateral() {
        let dart = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 1.0),
            Point::new(0.0, 2.0),
            Point::new(1.0, 1.0),
        ]);
        assert!(!dart.is_convex());
        assert!(try_intersect_convex(&dart, &square(1.0)).is_err());
    }
}
