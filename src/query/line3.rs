//! 3D point and line predicates, and the generic 2×2 linear solve they
//! are built on.

use crate::math::{distance3d, GeometryConfig, Point3, Real};

/// Tests whether two points of space coincide.
///
/// A componentwise pre-check against `eps2d` accepts the common
/// exactly-equal case cheaply; otherwise the Euclidean distance is compared
/// against `eps3d`.
#[inline]
pub fn point_point3d(a: &Point3<Real>, b: &Point3<Real>, config: &GeometryConfig) -> bool {
    let eps = config.eps2d;
    if (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps && (a.z - b.z).abs() < eps {
        return true;
    }
    distance3d(a, b) < config.eps3d
}

/// Tests whether the segment `(l0, l1)` is degenerate.
#[inline]
pub fn zero_line3d(l0: &Point3<Real>, l1: &Point3<Real>, config: &GeometryConfig) -> bool {
    distance3d(l0, l1) < config.eps3d
}

/// Tests whether `p` lies between the endpoints of `(l0, l1)`.
///
/// Only the axis-aligned bounding box is checked, not colinearity: this
/// predicate assumes `p` is already known to lie on the line's infinite
/// extension. A point coinciding with an endpoint, or a zero-length line,
/// reports `false`.
pub fn point_line3d(
    p: &Point3<Real>,
    l0: &Point3<Real>,
    l1: &Point3<Real>,
    config: &GeometryConfig,
) -> bool {
    if point_point3d(p, l0, config)
        || point_point3d(p, l1, config)
        || zero_line3d(l0, l1, config)
    {
        return false;
    }

    let eps = config.eps2d;
    for i in 0..3 {
        if p[i] < l0[i].min(l1[i]) - eps || p[i] > l0[i].max(l1[i]) + eps {
            return false;
        }
    }
    true
}

/// The point at parameter `ratio` along the segment `(l0, l1)`.
///
/// `ratio = 0` is `l0`, `ratio = 1` is `l1`; values outside `[0, 1]`
/// extrapolate along the supporting line.
#[inline]
pub fn point_line_ratio3d(l0: &Point3<Real>, l1: &Point3<Real>, ratio: Real) -> Point3<Real> {
    Point3::new(
        (l1.x - l0.x).mul_add(ratio, l0.x),
        (l1.y - l0.y).mul_add(ratio, l0.y),
        (l1.z - l0.z).mul_add(ratio, l0.z),
    )
}

/// Solves the 2×2 linear system `a11 x + a12 y = c1`, `a21 x + a22 y = c2`.
///
/// Returns `None` when the determinant is below `eps`.
#[inline]
pub fn solve2x2(
    a11: Real,
    a12: Real,
    a21: Real,
    a22: Real,
    c1: Real,
    c2: Real,
    eps: Real,
) -> Option<(Real, Real)> {
    let det = a11 * a22 - a12 * a21;
    if det.abs() < eps {
        return None;
    }
    Some(((c1 * a22 - a12 * c2) / det, (a11 * c2 - c1 * a21) / det))
}

/// Intersects the supporting lines of `(a0, a1)` and `(b0, b1)`.
///
/// Returns the parametric ratios of the intersection along each line and
/// whether any of the three axis-pair subsystems could be solved. The
/// overdetermined 3-equation system (one per axis) is split into its three
/// 2-equation subsystems (xy, yz, zx); each non-singular subsystem
/// contributes one candidate ratio pair, and the result is the average of
/// the contributions.
///
/// For skew lines this reports an averaged "best ratio" rather than the
/// true closest-point parameters; the averaging is part of this function's
/// contract and must not be replaced by a closest-point computation.
pub fn line_line3d(
    a0: &Point3<Real>,
    a1: &Point3<Real>,
    b0: &Point3<Real>,
    b1: &Point3<Real>,
    config: &GeometryConfig,
) -> (Real, Real, bool) {
    // Per axis i: da[i] * s - db[i] * t = b0[i] - a0[i].
    let da = a1 - a0;
    let db = b1 - b0;
    let c = b0 - a0;

    let mut ratio_a = 0.0;
    let mut ratio_b = 0.0;
    let mut solved = 0u32;

    for (i, j) in [(0, 1), (1, 2), (2, 0)] {
        if let Some((s, t)) = solve2x2(
            da[i],
            -db[i],
            da[j],
            -db[j],
            c[i],
            c[j],
            config.eps2d,
        ) {
            ratio_a += s;
            ratio_b += t;
            solved += 1;
        }
    }

    if solved > 0 {
        ratio_a /= solved as Real;
        ratio_b /= solved as Real;
    }
    (ratio_a, ratio_b, solved > 0)
}
