//! Error type for the checked public entry points.
//!
//! Most operations in this crate return `Option`/`Vec` because "no
//! intersection" or "empty polygon" are defined outcomes, not failures
//! (see the error-handling taxonomy in the crate's design notes).
//! `GeomError` is reserved for precondition violations: inputs a caller
//! must not pass, surfaced as a typed error instead of undefined
//! behavior or a panic.

use core::fmt;

/// Failure reported by a checked entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeomError {
    /// A non-degenerate triangle was required but a degenerate one (a
    /// point or a line) was supplied.
    DegenerateTriangle,
    /// A triangulation or tessellation call did not receive enough
    /// distinct points to produce a meaningful result.
    InsufficientPoints { needed: usize, got: usize },
    /// A convex-only operation was asked to operate on a polygon that
    /// failed the convexity check.
    NonConvexPolygon,
    /// The tessellator found duplicate sample points among its inputs.
    DuplicatePoints,
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeomError::DegenerateTriangle => {
                write!(f, "triangle is degenerate (a point or a line)")
            }
            GeomError::InsufficientPoints { needed, got } => write!(
                f,
                "need at least {needed} distinct point(s), got {got}"
            ),
            GeomError::NonConvexPolygon => write!(f, "polygon is not convex"),
            GeomError::DuplicatePoints => write!(f, "input points are not unique"),
        }
    }
}

impl std::error::Error for GeomError {}
