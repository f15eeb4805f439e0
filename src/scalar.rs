//! Generic numeric bounds and the epsilon-tolerant comparator.
//!
//! Every tolerance decision in this crate routes through the free functions
//! here instead of being scattered as literal constants across the
//! algorithms that need them.

use core::fmt::Debug;
use num_traits::{Float, Num, NumCast};

/// Coordinate types usable by the data model (§3): both integers and
/// binary floating point. Mirrors the `CoordNum` split used by this
/// crate's closest relatives, which separate "any numeric coordinate"
/// from "floating point only".
pub trait Scalar: Num + Copy + NumCast + PartialOrd + Debug {}
impl<T: Num + Copy + NumCast + PartialOrd + Debug> Scalar for T {}

/// Coordinate types for which triangulation, tessellation, and circle
/// math are defined. Carries a default comparison epsilon so the
/// tolerant comparator below needs no extra type parameter at call sites.
///
/// `Send + Sync` so the `multithreading` feature can hand per-seed tile
/// work to `rayon` without an extra bound at every call site.
pub trait FloatScalar: Scalar + Float + Send + Sync {
    /// Threshold below which two values of this type are considered equal.
    fn comparison_epsilon() -> Self;
}

impl FloatScalar for f32 {
    fn comparison_epsilon() -> Self {
        1e-7
    }
}

impl FloatScalar for f64 {
    fn comparison_epsilon() -> Self {
        1e-7
    }
}

/// `|a - b| <= eps`.
pub fn equal_eps<T: FloatScalar>(a: T, b: T, eps: T) -> bool {
    (a - b).abs() <= eps
}

/// `a - b < -eps`, i.e. `a` is smaller than `b` by at least `eps`.
pub fn less_eps<T: FloatScalar>(a: T, b: T, eps: T) -> bool {
    a - b < -eps
}

/// `a - b <= eps`.
pub fn less_equal_eps<T: FloatScalar>(a: T, b: T, eps: T) -> bool {
    a - b <= eps
}

/// `a - b > eps`.
pub fn greater_eps<T: FloatScalar>(a: T, b: T, eps: T) -> bool {
    a - b > eps
}

/// `a - b >= -eps`.
pub fn greater_equal_eps<T: FloatScalar>(a: T, b: T, eps: T) -> bool {
    a - b >= -eps
}

/// Equality within this type's default epsilon.
pub fn equal<T: FloatScalar>(a: T, b: T) -> bool {
    equal_eps(a, b, T::comparison_epsilon())
}

/// Strict less-than, within this type's default epsilon.
pub fn less<T: FloatScalar>(a: T, b: T) -> bool {
    less_eps(a, b, T::comparison_epsilon())
}

/// Less-than-or-equal, within this type's default epsilon.
pub fn less_equal<T: FloatScalar>(a: T, b: T) -> bool {
    less_equal_eps(a, b, T::comparison_epsilon())
}

/// Strict greater-than, within this type's default epsilon.
pub fn greater<T: FloatScalar>(a: T, b: T) -> bool {
    greater_eps(a, b, T::comparison_epsilon())
}

/// Greater-than-or-equal, within this type's default epsilon.
pub fn greater_equal<T: FloatScalar>(a: T, b: T) -> bool {
    greater_equal_eps(a, b, T::comparison_epsilon())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_within_epsilon() {
        assert!(equal(1.0_f64, 1.0 + 1e-9));
        assert!(!equal(1.0_f64, 1.0 + 1e-3));
    }

    #[test]
    fn less_requires_separation_beyond_epsilon() {
        assert!(!less(1.0_f64, 1.0 + 1e-9));
        assert!(less(1.0_f64, 1.0 + 1e-3));
    }

    #[test]
    fn greater_equal_accepts_near_ties() {
        assert!(greater_equal(1.0_f64, 1.0 - 1e-9));
        assert!(!greater_equal(1.0_f64, 1.0 + 1e-3));
    }

    #[test]
    fn explicit_epsilon_overrides_default() {
        assert!(equal_eps(1.0_f64, 1.05, 0.1));
        assert!(!equal_eps(1.0_f64, 1.05, 0.01));
    }
}
