#![warn(missing_debug_implementations)]
//! Delaunay triangulation, Voronoi tessellation, and classified
//! line/line intersection for 2D point sets.
//!
//! ## Modules
//!
//! - **[`point`]**, **[`vector`]**: the coordinate and displacement
//!   types everything else is built from.
//! - **[`rect`]**, **[`circle`]**, **[`interval`]**: supporting shapes
//!   and numeric ranges.
//! - **[`line`]**: segments, rays, and infinite lines, and their
//!   classified intersection.
//! - **[`triangle`]**, **[`polygon`]**: triangles (with circumcircle
//!   support) and convex polygons (intersection, line-cutting).
//! - **[`delaunay`]**: incremental Bowyer-Watson triangulation.
//! - **[`voronoi`]**: the Voronoi tessellation dual to a triangulation.
//!
//! By default every coordinate is `f64`; any type implementing
//! [`scalar::FloatScalar`] (`f32` and `f64`, out of the box) works
//! throughout.
//!
//! ## Errors
//!
//! Most operations return `Option`/`Vec` because an empty result ("no
//! intersection", "no tiles") is a defined outcome, not a failure.
//! [`error::GeomError`] is reserved for the few checked entry points
//! (`try_triangulate`, `try_intersect_convex`, `Triangle::try_circumcircle`,
//! `try_voronoi_tessellate`) that reject malformed input outright instead
//! of degrading to an empty or partial result.

pub mod circle;
pub mod delaunay;
pub mod error;
pub mod interval;
pub mod line;
pub mod point;
pub mod polygon;
pub mod rect;
pub mod scalar;
pub mod triangle;
pub mod vector;
pub mod voronoi;

pub use circle::Circle;
pub use delaunay::{satisfies_delaunay_condition, triangulate, try_triangulate};
pub use error::GeomError;
pub use interval::{Bound, Interval, IntervalEnd};
pub use line::{intersect, Line, LineIntersection, LineKind};
pub use point::Point;
pub use polygon::{cut_convex_by_line, intersect_convex, try_intersect_convex, Polygon};
pub use rect::Rect;
pub use scalar::{FloatScalar, Scalar};
pub use triangle::Triangle;
pub use vector::Vector;
pub use voronoi::{try_voronoi_tessellate, voronoi_tessellate, VoronoiParams, VoronoiTile};
