//! Voronoi tessellation, derived as the dual of a Delaunay triangulation
//! and clipped to a rectangular border (§4.7).
//!
//! General case: each Delaunay edge becomes a Voronoi edge — a segment
//! between the two adjacent triangles' circumcenters, or, for a hull
//! edge with only one adjacent triangle, a ray from that triangle's
//! circumcenter heading away from it. The edges touching each sample
//! point are walked into an ordered outline and clipped against the
//! border. Fewer than 3 samples are handled directly, without going
//! through a triangulation at all.

use crate::delaunay::triangulate;
use crate::error::GeomError;
use crate::line::{self, Line, LineIntersection};
use crate::point::Point;
use crate::polygon::{self, Polygon};
use crate::rect::Rect;
use crate::scalar::FloatScalar;
use crate::triangle::Triangle;
use crate::vector::perp_dot;
use log::{debug, trace, warn};

/// One Voronoi tile: a sample point and the polygon of all positions
/// closer to it than to any other sample.
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiTile<T: FloatScalar = f64> {
    pub seed: Point<T>,
    pub outline: Polygon<T>,
}

/// Border configuration for a tessellation. Either an explicit
/// rectangle, or an inflation offset applied to the samples' bounding
/// box (the default offset is zero — a border hugging the samples).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiParams<T: FloatScalar = f64> {
    border: Option<Rect<T>>,
    border_offset: T,
}

impl<T: FloatScalar> Default for VoronoiParams<T> {
    fn default() -> Self {
        VoronoiParams { border: None, border_offset: T::zero() }
    }
}

impl<T: FloatScalar> VoronoiParams<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clip to the samples' bounding box inflated by `offset` on every
    /// side. Overrides any previously set explicit border.
    pub fn with_border_offset(mut self, offset: T) -> Self {
        self.border_offset = offset;
        self.border = None;
        self
    }

    /// Clip to an explicit rectangle instead of one derived from the
    /// samples.
    pub fn with_border(mut self, border: Rect<T>) -> Self {
        self.border = Some(border);
        self
    }
}

fn calc_border<T: FloatScalar>(points: &[Point<T>], offset: T) -> Option<Rect<T>> {
    Rect::bounding(points.iter().copied()).map(|b| b.inflate(offset))
}

fn border_polygon<T: FloatScalar>(border: Rect<T>) -> Polygon<T> {
    Polygon::new(border.corners_ccw().to_vec())
}

/// An undirected equality check between two segment/ray edges, used to
/// find the second triangle sharing a Delaunay edge.
fn same_undirected_edge<T: FloatScalar>(a: &Line<T>, b: &Line<T>) -> bool {
    let (Some(sa), Some(ea)) = (a.start_point(), a.end_point()) else { return false };
    let (Some(sb), Some(eb)) = (b.start_point(), b.end_point()) else { return false };
    (sa.approx_eq(sb) && ea.approx_eq(eb)) || (sa.approx_eq(eb) && ea.approx_eq(sb))
}

/// A Delaunay edge plus the circumcenter(s) of the one or two triangles
/// it belongs to. `edge` keeps the direction it had in whichever
/// triangle registered it first, which is what the single-triangle case
/// needs to point its Voronoi ray outward.
struct DelaunayEdgeEntry<T: FloatScalar> {
    edge: Line<T>,
    first_circumcenter: Point<T>,
    second_circumcenter: Option<Point<T>>,
}

struct DelaunayEdgeCollection<T: FloatScalar> {
    entries: Vec<DelaunayEdgeEntry<T>>,
}

impl<T: FloatScalar> DelaunayEdgeCollection<T> {
    fn new() -> Self {
        DelaunayEdgeCollection { entries: Vec::new() }
    }

    fn add_edge(&mut self, edge: Line<T>, circumcenter: Point<T>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| same_undirected_edge(&e.edge, &edge)) {
            entry.second_circumcenter = Some(circumcenter);
        } else {
            self.entries.push(DelaunayEdgeEntry { edge, first_circumcenter: circumcenter, second_circumcenter: None });
        }
    }

    fn make_voronoi_edges(&self) -> Vec<Line<T>> {
        self.entries.iter().filter_map(make_voronoi_edge).collect()
    }
}

fn make_voronoi_edge<T: FloatScalar>(entry: &DelaunayEdgeEntry<T>) -> Option<Line<T>> {
    match entry.second_circumcenter {
        Some(cb) => {
            let ca = entry.first_circumcenter;
            if ca.approx_eq(cb) {
                None
            } else {
                Some(Line::segment(ca, cb))
            }
        }
        // Triangle::new winds its vertices so perp_dot(v01, v12) <= 0,
        // i.e. clockwise; for that winding the counter-clockwise normal
        // to any edge points away from its interior.
        None => Some(Line::ray(entry.first_circumcenter, entry.edge.direction().ccw_normal())),
    }
}

fn collect_delaunay_edges<T: FloatScalar>(
    triangles: &[Triangle<T>],
) -> Vec<(Point<T>, DelaunayEdgeCollection<T>)> {
    let mut map: Vec<(Point<T>, DelaunayEdgeCollection<T>)> = Vec::new();

    for t in triangles {
        let Some(circumcenter) = t.circumcenter() else { continue };
        for i in 0..3 {
            let v = t.vertex(i);
            let prev = t.vertex(if i == 0 { 2 } else { i - 1 });
            let next = t.vertex(if i == 2 { 0 } else { i + 1 });

            let idx = match map.iter().position(|(key, _)| key.approx_eq(v)) {
                Some(idx) => idx,
                None => {
                    map.push((v, DelaunayEdgeCollection::new()));
                    map.len() - 1
                }
            };
            map[idx].1.add_edge(Line::segment(prev, v), circumcenter);
            map[idx].1.add_edge(Line::segment(v, next), circumcenter);
        }
    }

    map
}

fn calc_distant_point<T: FloatScalar>(edge: &Line<T>) -> Point<T> {
    const FAR_DIST: f64 = 100_000.0;
    let far = T::from(FAR_DIST).expect("100000 is representable in any FloatScalar");
    let dir = edge.direction().normalized().unwrap_or(edge.direction());
    edge.anchor().offset(dir.x * far, dir.y * far)
}

/// Edges with no end point (the two outward rays of an open outline),
/// removed from `edges` and returned in discovery order. Stops after
/// finding two, since a convex-hull sample point has exactly that many.
fn take_end_edges<T: FloatScalar>(edges: &mut Vec<Line<T>>) -> Vec<Line<T>> {
    let mut found = Vec::new();
    for (i, e) in edges.iter().enumerate() {
        if e.end_point().is_none() {
            found.push(i);
        }
        if found.len() > 1 {
            break;
        }
    }

    let mut result = Vec::new();
    for &i in found.iter().rev() {
        result.push(edges.remove(i));
    }
    result.reverse();
    result
}

fn find_endpoint_index<T: FloatScalar>(edges: &[Line<T>], pt: Point<T>) -> Option<usize> {
    edges.iter().position(|e| {
        e.start_point().is_some_and(|s| s.approx_eq(pt)) || e.end_point().is_some_and(|p| p.approx_eq(pt))
    })
}

fn find_next_edge<T: FloatScalar>(edges: &mut Vec<Line<T>>, connector: Option<Point<T>>) -> Option<Line<T>> {
    let connector = connector?;
    let idx = find_endpoint_index(edges, connector)?;
    let e = edges.remove(idx);
    if e.start_point().is_some_and(|s| s.approx_eq(connector)) {
        Some(e)
    } else {
        Some(Line::segment(e.end_point().expect("non-end edges always have an end point"), e.start_point().unwrap()))
    }
}

/// Rewrites both distant end vertices to their actual crossing point
/// when a tile's two open-ended rays would otherwise cross each other
/// before reaching their extended endpoints — left uncorrected, the
/// outline would self-intersect and fail the convex clip against the
/// border.
fn fix_intersecting_end_edges<T: FloatScalar>(vertices: &mut [Point<T>]) {
    let n = vertices.len();
    if n < 4 {
        return;
    }
    let first = Line::segment(vertices[1], vertices[0]);
    let last = Line::segment(vertices[n - 2], vertices[n - 1]);
    if let Some(LineIntersection::Point(x)) = line::intersect(&first, &last) {
        if !x.approx_eq(vertices[1]) && !x.approx_eq(vertices[n - 2]) {
            vertices[0] = x;
            vertices[n - 1] = x;
        }
    }
}

fn order_edges<T: FloatScalar>(mut edges: Vec<Line<T>>, end_edges: Vec<Line<T>>) -> Vec<Point<T>> {
    let is_open_path = end_edges.len() == 2;
    let mut vertices = Vec::new();

    let mut next_edge = if is_open_path {
        let start_edge = end_edges[0];
        vertices.push(calc_distant_point(&start_edge));
        find_next_edge(&mut edges, Some(start_edge.anchor()))
    } else if edges.is_empty() {
        None
    } else {
        Some(edges.remove(0))
    };

    while let Some(e) = next_edge {
        vertices.push(e.start_point().expect("voronoi edges always have a start point"));
        let connector = e.end_point();
        next_edge = find_next_edge(&mut edges, connector);
    }

    if is_open_path {
        vertices.push(end_edges[1].anchor());
        vertices.push(calc_distant_point(&end_edges[1]));
        fix_intersecting_end_edges(&mut vertices);
    }

    vertices
}

fn create_vertex_sequence<T: FloatScalar>(mut edges: Vec<Line<T>>) -> Vec<Point<T>> {
    if edges.is_empty() {
        return Vec::new();
    }
    let end_edges = take_end_edges(&mut edges);
    order_edges(edges, end_edges)
}

fn build_tile_outline<T: FloatScalar>(edges: Vec<Line<T>>, clip: &Polygon<T>) -> Polygon<T> {
    let vertices = create_vertex_sequence(edges);
    if vertices.is_empty() {
        return Polygon::empty();
    }
    polygon::intersect_convex(&Polygon::new(vertices), clip)
}

fn is_left_of<T: FloatScalar>(pt: Point<T>, line: &Line<T>) -> bool {
    perp_dot(line.direction(), pt - line.anchor()) > T::zero()
}

/// Whether `pt` and every vertex of `poly` (ignoring vertices exactly on
/// `line`) fall on the same side of `line`.
fn are_on_same_side_of<T: FloatScalar>(pt: Point<T>, poly: &Polygon<T>, line: &Line<T>) -> bool {
    let pt_is_left = is_left_of(pt, line);
    poly.vertices().iter().all(|&v| line.is_point_on_infinite_line(v) || is_left_of(v, line) == pt_is_left)
}

fn tessellate_single<T: FloatScalar>(seed: Point<T>, border: Rect<T>) -> Vec<VoronoiTile<T>> {
    let outline = if border.is_degenerate() { Polygon::new(vec![seed]) } else { border_polygon(border) };
    vec![VoronoiTile { seed, outline }]
}

fn tessellate_pair<T: FloatScalar>(a: Point<T>, b: Point<T>, border: Rect<T>) -> Vec<VoronoiTile<T>> {
    let sample_edge = Line::segment(a, b);
    let bisector = Line::infinite(sample_edge.mid_point(), sample_edge.direction().ccw_normal());

    let pieces = polygon::cut_convex_by_line(&border_polygon(border), &bisector);
    let [side1, side2]: [Polygon<T>; 2] = match <[Polygon<T>; 2]>::try_from(pieces) {
        Ok(sides) if sides[0].len() >= 3 && sides[1].len() >= 3 => sides,
        _ => {
            warn!("two-point voronoi split produced a degenerate tile; abandoning tessellation");
            return Vec::new();
        }
    };

    let (poly_a, poly_b) =
        if are_on_same_side_of(a, &side1, &bisector) { (side1, side2) } else { (side2, side1) };

    vec![VoronoiTile { seed: a, outline: poly_a }, VoronoiTile { seed: b, outline: poly_b }]
}

fn convert_one_tile<T: FloatScalar>(
    seed: Point<T>,
    collection: DelaunayEdgeCollection<T>,
    clip: &Polygon<T>,
) -> Option<VoronoiTile<T>> {
    let voronoi_edges = collection.make_voronoi_edges();
    let outline = build_tile_outline(voronoi_edges, clip);
    if outline.is_empty() {
        trace!("seed ({:?}, {:?}) produced an empty tile outline", seed.x, seed.y);
        None
    } else {
        Some(VoronoiTile { seed, outline })
    }
}

#[cfg(feature = "multithreading")]
fn convert_tiles<T: FloatScalar>(
    edge_map: Vec<(Point<T>, DelaunayEdgeCollection<T>)>,
    clip: &Polygon<T>,
) -> Vec<VoronoiTile<T>> {
    use rayon::prelude::*;
    edge_map.into_par_iter().filter_map(|(seed, collection)| convert_one_tile(seed, collection, clip)).collect()
}

#[cfg(not(feature = "multithreading"))]
fn convert_tiles<T: FloatScalar>(
    edge_map: Vec<(Point<T>, DelaunayEdgeCollection<T>)>,
    clip: &Polygon<T>,
) -> Vec<VoronoiTile<T>> {
    edge_map.into_iter().filter_map(|(seed, collection)| convert_one_tile(seed, collection, clip)).collect()
}

fn tessellate_general<T: FloatScalar>(samples: &[Point<T>], border: Rect<T>) -> Vec<VoronoiTile<T>> {
    let triangles = triangulate(samples);
    trace!("voronoi triangulation produced {} triangles", triangles.len());

    let edge_map = collect_delaunay_edges(&triangles);
    let clip = border_polygon(border);

    let tiles = convert_tiles(edge_map, &clip);

    debug!("voronoi tessellation produced {} tiles for {} samples", tiles.len(), samples.len());
    tiles
}

/// Tessellates `samples` into Voronoi tiles clipped to `params`'s
/// border. The caller is responsible for `samples` not containing
/// duplicates (the underlying triangulation silently drops degenerate
/// triangles a duplicate would produce, rather than rejecting the
/// input).
pub fn voronoi_tessellate<T: FloatScalar>(samples: &[Point<T>], params: &VoronoiParams<T>) -> Vec<VoronoiTile<T>> {
    if samples.is_empty() {
        return Vec::new();
    }

    let border = match params.border {
        Some(b) => b,
        None => match calc_border(samples, params.border_offset) {
            Some(b) => b,
            None => return Vec::new(),
        },
    };

    match samples.len() {
        1 => tessellate_single(samples[0], border),
        2 => tessellate_pair(samples[0], samples[1], border),
        _ => tessellate_general(samples, border),
    }
}

fn first_duplicate<T: FloatScalar>(samples: &[Point<T>]) -> Option<(usize, usize)> {
    for i in 0..samples.len() {
        for j in (i + 1)..samples.len() {
            if samples[i].approx_eq(samples[j]) {
                return Some((i, j));
            }
        }
    }
    None
}

/// As [`voronoi_tessellate`], but through a checked entry point that
/// scans for (epsilon-tolerant) duplicate samples first and reports
/// them instead of silently letting the triangulation drop the
/// degenerate triangles they'd produce.
pub fn try_voronoi_tessellate<T: FloatScalar>(
    samples: &[Point<T>],
    params: &VoronoiParams<T>,
) -> Result<Vec<VoronoiTile<T>>, GeomError> {
    if first_duplicate(samples).is_some() {
        return Err(GeomError::DuplicatePoints);
    }
    Ok(voronoi_tessellate(samples, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_voronoi_tessellate_rejects_duplicate_samples() {
        let samples = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(0.0, 0.0)];
        let params = VoronoiParams::new().with_border(Rect::new(-5.0, -5.0, 5.0, 5.0));
        assert_eq!(try_voronoi_tessellate(&samples, &params), Err(GeomError::DuplicatePoints));
    }

    #[test]
    fn single_sample_tile_covers_the_whole_border() {
        let samples = vec![Point::new(0.0, 0.0)];
        let params = VoronoiParams::new().with_border(Rect::new(-5.0, -5.0, 5.0, 5.0));
        let tiles = voronoi_tessellate(&samples, &params);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].outline.len(), 4);
    }

    #[test]
    fn two_samples_split_the_border_along_their_bisector() {
        // S6
        let samples = vec![Point::new(-2.0, 0.0), Point::new(2.0, 0.0)];
        let params = VoronoiParams::new().with_border(Rect::new(-5.0, -5.0, 5.0, 5.0));
        let tiles = voronoi_tessellate(&samples, &params);
        assert_eq!(tiles.len(), 2);

        let tile_a = tiles.iter().find(|t| t.seed.approx_eq(Point::new(-2.0, 0.0))).unwrap();
        let tile_b = tiles.iter().find(|t| t.seed.approx_eq(Point::new(2.0, 0.0))).unwrap();

        assert!(tile_a.outline.make_ccw().contains_point_convex(Point::new(-4.0, 0.0)));
        assert!(!tile_a.outline.make_ccw().contains_point_convex(Point::new(4.0, 0.0)));
        assert!(tile_b.outline.make_ccw().contains_point_convex(Point::new(4.0, 0.0)));
    }

    #[test]
    fn empty_sample_set_produces_no_tiles() {
        let tiles: Vec<VoronoiTile<f64>> = voronoi_tessellate(&[], &VoronoiParams::new());
        assert!(tiles.is_empty());
    }

    #[test]
    fn general_case_produces_one_tile_per_sample_each_containing_its_seed() {
        let _ = pretty_env_logger::try_init();
        let samples = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
            Point::new(4.0, 4.0),
            Point::new(2.0, 2.0),
        ];
        let params = VoronoiParams::new().with_border_offset(2.0);
        let tiles = voronoi_tessellate(&samples, &params);

        assert_eq!(tiles.len(), samples.len());
        for tile in &tiles {
            assert!(tile.outline.make_ccw().contains_point_convex(tile.seed));
        }
    }

    #[test]
    fn every_tile_stays_within_the_configured_border() {
        let samples = vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 1.0),
            Point::new(1.0, 3.0),
            Point::new(4.0, 4.0),
        ];
        let border = Rect::new(-1.0, -1.0, 5.0, 5.0);
        let params = VoronoiParams::new().with_border(border);
        let tiles = voronoi_tessellate(&samples, &params);

        for tile in &tiles {
            for v in tile.outline.vertices() {
                assert!(border.inflate(1e-6).contains_point(*v));
            }
        }
    }
}
