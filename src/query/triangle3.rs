//! 3D triangle predicates: point containment, line crossings and
//! triangle/triangle intersection candidates.

use smallvec::SmallVec;

use crate::math::{GeometryConfig, Point3, Real};
use crate::query::line3::{line_line3d, point_line_ratio3d, zero_line3d};
use crate::query::plane3::{point_on_plane3d, Plane};

/// Tests whether any edge of the triangle is degenerate.
pub fn zero_triangle3d(
    t0: &Point3<Real>,
    t1: &Point3<Real>,
    t2: &Point3<Real>,
    config: &GeometryConfig,
) -> bool {
    zero_line3d(t0, t1, config) || zero_line3d(t1, t2, config) || zero_line3d(t2, t0, config)
}

/// Tests whether `p` lies inside the triangle `(t0, t1, t2)`.
///
/// The point must lie on the triangle's plane. Containment is then decided
/// through the three cevian pairs: for each vertex, the line from that
/// vertex through `p` must cross the opposite edge within the edge's span,
/// at or beyond `p`. A point lying exactly on a triangle edge is not
/// guaranteed to report `true`.
pub fn point_triangle3d(
    p: &Point3<Real>,
    t0: &Point3<Real>,
    t1: &Point3<Real>,
    t2: &Point3<Real>,
    config: &GeometryConfig,
) -> bool {
    let plane = Plane::from_points(t0, t1, t2);
    if !point_on_plane3d(p, &plane, config) {
        return false;
    }

    let eps = config.eps2d;
    for (vertex, e0, e1) in [(t0, t1, t2), (t1, t2, t0), (t2, t0, t1)] {
        let (along_cevian, along_edge, ok) = line_line3d(vertex, p, e0, e1, config);
        if !ok
            || along_edge < -eps
            || along_edge > 1.0 + eps
            || along_cevian < 1.0 - eps
        {
            return false;
        }
    }
    true
}

/// Intersects the segment `(l0, l1)` with the triangle when the segment is
/// transversal to the triangle's plane.
///
/// Returns the crossing point if the segment crosses the plane within its
/// own span and the crossing lies inside the triangle. A segment lying in
/// the plane (both endpoints on it) is rejected here; that configuration
/// belongs to [`line_triangle_coplanar3d`].
pub fn line_triangle_transversal3d(
    l0: &Point3<Real>,
    l1: &Point3<Real>,
    t0: &Point3<Real>,
    t1: &Point3<Real>,
    t2: &Point3<Real>,
    config: &GeometryConfig,
) -> Option<Point3<Real>> {
    let plane = Plane::from_points(t0, t1, t2);
    let v0 = plane.eval(l0);
    let v1 = plane.eval(l1);
    if v0.abs() < config.eps3d && v1.abs() < config.eps3d {
        return None;
    }

    // v0 + ratio * (v1 - v0) = 0.
    let denom = v1 - v0;
    if denom.abs() < config.eps2d {
        return None;
    }
    let ratio = -v0 / denom;
    if ratio < 0.0 || ratio > 1.0 {
        return None;
    }

    let point = point_line_ratio3d(l0, l1, ratio);
    point_triangle3d(&point, t0, t1, t2, config).then_some(point)
}

/// Intersects the segment `(l0, l1)` with the triangle when the segment
/// lies in the triangle's plane.
///
/// Returns each segment endpoint inside the triangle, plus the crossing
/// with every triangle edge the segment meets within both spans. The result
/// is not deduplicated; between 0 and 5 points come back.
pub fn line_triangle_coplanar3d(
    l0: &Point3<Real>,
    l1: &Point3<Real>,
    t0: &Point3<Real>,
    t1: &Point3<Real>,
    t2: &Point3<Real>,
    config: &GeometryConfig,
) -> SmallVec<[Point3<Real>; 5]> {
    let mut out = SmallVec::new();

    if point_triangle3d(l0, t0, t1, t2, config) {
        out.push(*l0);
    }
    if point_triangle3d(l1, t0, t1, t2, config) {
        out.push(*l1);
    }

    for (e0, e1) in [(t0, t1), (t1, t2), (t2, t0)] {
        let (s, t, ok) = line_line3d(l0, l1, e0, e1, config);
        if ok && s >= 0.0 && s <= 1.0 && t >= 0.0 && t <= 1.0 {
            out.push(point_line_ratio3d(l0, l1, s));
        }
    }

    out
}

/// Computes the intersection points of two triangles.
///
/// Every edge of each triangle is run against the other triangle through
/// both the transversal and the coplanar crossing, and the collected
/// candidates are filtered to points inside both triangles. Points exactly
/// on a triangle edge boundary follow [`point_triangle3d`]'s edge
/// exclusion; duplicates are not removed.
pub fn triangle_triangle3d(
    a0: &Point3<Real>,
    a1: &Point3<Real>,
    a2: &Point3<Real>,
    b0: &Point3<Real>,
    b1: &Point3<Real>,
    b2: &Point3<Real>,
    config: &GeometryConfig,
) -> Vec<Point3<Real>> {
    let mut candidates = Vec::new();

    let mut collect = |active: [&Point3<Real>; 3], other: [&Point3<Real>; 3]| {
        for (e0, e1) in [
            (active[0], active[1]),
            (active[1], active[2]),
            (active[2], active[0]),
        ] {
            if let Some(p) =
                line_triangle_transversal3d(e0, e1, other[0], other[1], other[2], config)
            {
                candidates.push(p);
            }
            candidates
                .extend(line_triangle_coplanar3d(e0, e1, other[0], other[1], other[2], config));
        }
    };

    collect([a0, a1, a2], [b0, b1, b2]);
    collect([b0, b1, b2], [a0, a1, a2]);

    candidates
        .into_iter()
        .filter(|p| {
            point_triangle3d(p, a0, a1, a2, config) && point_triangle3d(p, b0, b1, b2, config)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn tri() -> [Point3<Real>; 3] {
        [
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
        ]
    }

    #[test]
    fn point_containment() {
        let cfg = GeometryConfig::default();
        let [t0, t1, t2] = tri();
        assert!(!point_triangle3d(&Point3::new(0.0, 0.0, 1.0), &t0, &t1, &t2, &cfg));
        assert!(point_triangle3d(&Point3::new(0.0, 0.0, 0.0), &t0, &t1, &t2, &cfg));
        assert!(!point_triangle3d(&Point3::new(0.0, -2.0, 0.0), &t0, &t1, &t2, &cfg));
        assert!(!point_triangle3d(&Point3::new(5.0, 0.0, 0.0), &t0, &t1, &t2, &cfg));
    }

    #[test]
    fn transversal_crossing() {
        let cfg = GeometryConfig::default();
        let [t0, t1, t2] = tri();
        let hit = line_triangle_transversal3d(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(0.0, 0.0, 1.0),
            &t0,
            &t1,
            &t2,
            &cfg,
        );
        assert!(hit.is_some());

        // The crossing ratio falls outside the segment.
        let miss = line_triangle_transversal3d(
            &Point3::new(0.0, 0.0, 0.1),
            &Point3::new(0.0, 0.0, 1.0),
            &t0,
            &t1,
            &t2,
            &cfg,
        );
        assert!(miss.is_none());
    }

    #[test]
    fn coplanar_crossing_collects_edge_hits() {
        let cfg = GeometryConfig::default();
        let [t0, t1, t2] = tri();
        // Crosses the triangle horizontally, both endpoints outside.
        let pts = line_triangle_coplanar3d(
            &Point3::new(-5.0, 0.0, 0.0),
            &Point3::new(5.0, 0.0, 0.0),
            &t0,
            &t1,
            &t2,
            &cfg,
        );
        assert_eq!(pts.len(), 2);
        for p in &pts {
            assert!(relative_eq!(p.y, 0.0, epsilon = 1.0e-9));
        }

        // Fully interior segment: both endpoints, no edge hits.
        let pts = line_triangle_coplanar3d(
            &Point3::new(-0.2, 0.0, 0.0),
            &Point3::new(0.2, 0.0, 0.0),
            &t0,
            &t1,
            &t2,
            &cfg,
        );
        assert_eq!(pts.len(), 2);
    }

    #[test]
    fn crossing_triangles() {
        let cfg = GeometryConfig::default();
        let [a0, a1, a2] = tri();
        // A triangle in the xz plane poking through the first one near the
        // origin.
        let b0 = Point3::new(-0.5, 0.0, -1.0);
        let b1 = Point3::new(0.5, 0.0, -1.0);
        let b2 = Point3::new(0.0, 0.0, 1.0);

        let pts = triangle_triangle3d(&a0, &a1, &a2, &b0, &b1, &b2, &cfg);
        assert!(!pts.is_empty());
        for p in &pts {
            assert!(relative_eq!(p.z, 0.0, epsilon = 1.0e-9));
            assert!(point_triangle3d(p, &a0, &a1, &a2, &cfg));
        }
    }

    #[test]
    fn degenerate_triangle_detected() {
        let cfg = GeometryConfig::default();
        let p = Point3::new(1.0, 1.0, 1.0);
        assert!(zero_triangle3d(&p, &p, &Point3::new(2.0, 0.0, 0.0), &cfg));
        assert!(!zero_triangle3d(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
            &cfg
        ));
    }
}
