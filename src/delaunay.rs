//! Delaunay triangulation via an incremental Bowyer-Watson sweep (§4.6).
//!
//! Source: <http://paulbourke.net/papers/triangulate/>. Points are
//! inserted one at a time; each insertion removes every active triangle
//! whose circumcircle contains the new point, retriangulates the
//! resulting cavity, and — because samples are processed in ascending-x
//! order — retires ("settles") any triangle whose circumcircle can no
//! longer reach a point further to the right.

use crate::error::GeomError;
use crate::line::Line;
use crate::point::Point;
use crate::rect::Rect;
use crate::scalar::FloatScalar;
use crate::triangle::Triangle;
use log::{debug, trace};

/// A triangle annotated with the circumcircle data the sweep needs on
/// every insertion, computed once instead of per lookup.
#[derive(Debug, Clone, Copy)]
struct DelaunayTriangle<T: FloatScalar> {
    triangle: Triangle<T>,
    circumcenter: Point<T>,
    radius: T,
    radius_squared: T,
}

impl<T: FloatScalar> DelaunayTriangle<T> {
    fn new(triangle: Triangle<T>) -> Option<Self> {
        let circumcircle = triangle.circumcircle()?;
        Some(DelaunayTriangle {
            triangle,
            circumcenter: circumcircle.center,
            radius: circumcircle.radius,
            radius_squared: circumcircle.radius * circumcircle.radius,
        })
    }

    fn vertex(&self, idx: usize) -> Point<T> {
        self.triangle.vertex(idx)
    }

    fn edge(&self, idx: usize) -> Line<T> {
        self.triangle.edge(idx)
    }

    fn is_point_in_circumcircle(&self, pt: Point<T>) -> bool {
        crate::scalar::less_equal(self.circumcenter.dist_squared(pt), self.radius_squared)
    }

    /// Whether `pt` — the next sample in ascending-x order — is already
    /// past the circumcircle's rightmost reach, meaning no future sample
    /// can ever fall inside it again.
    fn has_settled(&self, pt: Point<T>) -> bool {
        crate::scalar::greater(pt.x - self.circumcenter.x, self.radius)
    }
}

/// Buffer of the edges freed by removing triangles whose circumcircle
/// contains the current sample. Any edge shared by two removed triangles
/// is interior to the cavity and discarded; only the cavity's outline
/// survives to be retriangulated.
struct EdgeBuffer<T: FloatScalar> {
    edges: Vec<Line<T>>,
}

impl<T: FloatScalar> EdgeBuffer<T> {
    fn new() -> Self {
        EdgeBuffer { edges: Vec::new() }
    }

    fn clear(&mut self) {
        self.edges.clear();
    }

    fn add_edges(&mut self, t: &DelaunayTriangle<T>) {
        for i in 0..3 {
            self.edges.push(t.edge(i));
        }
    }

    fn is_duplicate(a: &Line<T>, b: &Line<T>) -> bool {
        let (Some(sa), Some(ea)) = (a.start_point(), a.end_point()) else { return false };
        let (Some(sb), Some(eb)) = (b.start_point(), b.end_point()) else { return false };
        (sa.approx_eq(sb) && ea.approx_eq(eb)) || (sa.approx_eq(eb) && ea.approx_eq(sb))
    }

    /// Removes both copies of any edge that appears twice.
    fn remove_duplicates(&mut self) {
        let n = self.edges.len();
        let mut is_duplicate = vec![false; n];
        for i in 0..n {
            for j in (i + 1)..n {
                if Self::is_duplicate(&self.edges[i], &self.edges[j]) {
                    is_duplicate[i] = true;
                    is_duplicate[j] = true;
                }
            }
        }
        let mut kept = Vec::with_capacity(n);
        for (edge, dup) in self.edges.drain(..).zip(is_duplicate) {
            if !dup {
                kept.push(edge);
            }
        }
        self.edges = kept;
    }
}

/// A triangle enclosing every point in `points`, with sides 20x the
/// larger of the point set's bounding width or height so that no input
/// point can ever lie exactly on it. `None` if the points don't span a
/// non-degenerate area.
fn bounding_triangle<T: FloatScalar>(points: &[Point<T>]) -> Option<Triangle<T>> {
    let bounds = Rect::bounding(points.iter().copied())?;
    if bounds.is_degenerate() {
        return None;
    }

    let dim_max = if bounds.width() > bounds.height() { bounds.width() } else { bounds.height() };
    let center = bounds.center();
    let scale = T::from(20).expect("20 is representable in any FloatScalar");

    let a = Point::new(center.x - scale * dim_max, center.y - dim_max);
    let b = Point::new(center.x, center.y + scale * dim_max);
    let c = Point::new(center.x + scale * dim_max, center.y - dim_max);
    Some(Triangle::new(a, b, c))
}

fn find_enclosing_polygon_edges<T: FloatScalar>(
    sample: Point<T>,
    active: &mut Vec<DelaunayTriangle<T>>,
    settled: &mut Vec<DelaunayTriangle<T>>,
    edges: &mut EdgeBuffer<T>,
) {
    let mut i = 0;
    while i < active.len() {
        let t = active[i];
        if t.has_settled(sample) {
            settled.push(active.remove(i));
            continue;
        }
        if t.is_point_in_circumcircle(sample) {
            edges.add_edges(&t);
            active.remove(i);
        } else {
            i += 1;
        }
    }
}

fn generate_new_triangles<T: FloatScalar>(
    sample: Point<T>,
    edges: &EdgeBuffer<T>,
    active: &mut Vec<DelaunayTriangle<T>>,
) {
    for edge in &edges.edges {
        let (Some(start), Some(end)) = (edge.start_point(), edge.end_point()) else { continue };
        let triangle = Triangle::new(sample, start, end);
        if triangle.is_degenerate() {
            continue;
        }
        if let Some(dt) = DelaunayTriangle::new(triangle) {
            active.push(dt);
        }
    }
}

/// Triangulates `points` so that no triangle's circumcircle contains any
/// other input point (the Delaunay condition). The caller is responsible
/// for `points` not containing duplicates; duplicates collapse into
/// degenerate triangles that are silently dropped, not rejected. Fewer
/// than 3 points, or points that are exactly collinear, yield an empty
/// triangulation.
pub fn triangulate<T: FloatScalar>(points: &[Point<T>]) -> Vec<Triangle<T>> {
    let Some(super_triangle) = bounding_triangle(points) else {
        return Vec::new();
    };

    let mut samples: Vec<Point<T>> = points.to_vec();
    samples.extend(super_triangle.vertices());
    samples.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

    let Some(super_dt) = DelaunayTriangle::new(super_triangle) else {
        return Vec::new();
    };

    let mut active = vec![super_dt];
    let mut settled: Vec<DelaunayTriangle<T>> = Vec::new();
    let mut edges = EdgeBuffer::new();

    for &sample in &samples {
        edges.clear();
        find_enclosing_polygon_edges(sample, &mut active, &mut settled, &mut edges);
        edges.remove_duplicates();
        generate_new_triangles(sample, &edges, &mut active);
    }

    settled.append(&mut active);
    trace!("sweep settled {} triangles before trimming the super-triangle", settled.len());

    settled.retain(|t| !(0..3).any(|i| super_triangle.has_vertex(t.vertex(i))));

    debug!("triangulated {} points into {} triangles", points.len(), settled.len());

    settled.into_iter().map(|dt| dt.triangle).collect()
}

/// As [`triangulate`], but rejects fewer than 3 input points instead of
/// quietly returning an empty triangulation.
pub fn try_triangulate<T: FloatScalar>(points: &[Point<T>]) -> Result<Vec<Triangle<T>>, GeomError> {
    if points.len() < 3 {
        return Err(GeomError::InsufficientPoints { needed: 3, got: points.len() });
    }
    Ok(triangulate(points))
}

/// Verifies the Delaunay condition directly: no triangle's circumcircle
/// strictly contains a vertex of any other triangle in the set. Used by
/// tests and available to callers who want to check a triangulation
/// produced (or modified) elsewhere.
pub fn satisfies_delaunay_condition<T: FloatScalar>(triangles: &[Triangle<T>]) -> bool {
    let mut vertices: Vec<Point<T>> = Vec::new();
    for t in triangles {
        for v in t.vertices() {
            if !vertices.iter().any(|existing| existing.approx_eq(v)) {
                vertices.push(v);
            }
        }
    }

    triangles.iter().all(|t| match t.circumcircle() {
        Some(cc) => vertices.iter().all(|&v| !crate::circle::point_inside_circle(cc, v)),
        None => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_square_triangulates_into_two_triangles_satisfying_delaunay() {
        // S5
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let tris = triangulate(&pts);
        assert_eq!(tris.len(), 2);
        assert!(satisfies_delaunay_condition(&tris));

        let total_area: f64 = tris.iter().map(Triangle::area).sum();
        assert!(crate::scalar::equal(total_area, 1.0));
    }

    #[test]
    fn fewer_than_three_points_produce_no_triangles() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        assert!(triangulate(&pts).is_empty());
        assert!(matches!(
            try_triangulate(&pts),
            Err(GeomError::InsufficientPoints { needed: 3, got: 2 })
        ));
    }

    #[test]
    fn collinear_points_produce_no_triangles() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)];
        assert!(triangulate(&pts).is_empty());
    }

    #[test]
    fn random_point_cloud_satisfies_the_delaunay_condition() {
        // Property 4, exercised over a seeded point cloud so a failure
        // is reproducible.
        let _ = pretty_env_logger::try_init();
        use rand::{rngs::StdRng, Rng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(0x2545_f491_4f6c_dd1d);
        let pts: Vec<Point<f64>> =
            (0..40).map(|_| Point::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0))).collect();

        let tris = triangulate(&pts);
        assert!(!tris.is_empty());
        assert!(satisfies_delaunay_condition(&tris));
    }

    #[test]
    fn no_triangle_in_the_result_includes_a_super_triangle_vertex() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(0.0, 5.0),
            Point::new(2.5, 2.5),
        ];
        let tris = triangulate(&pts);
        for t in &tris {
            for v in t.vertices() {
                assert!(pts.iter().any(|p| p.approx_eq(v)));
            }
        }
    }
}
