//! The arc-analysis seam of the refiner, and its default implementor
//! backed by circular arcs through three points.

use core::f64::consts::TAU;

use smallvec::SmallVec;
use thiserror::Error;

use crate::math::{distance2d, GeometryConfig, Point2, Real, Vector2};
use crate::query::{solve2x2, SegmentFacts};

/// Failure of an arc analysis or an arc split.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArcError {
    /// The three defining points of an arc are collinear or coincident and
    /// carry no circle.
    #[error("the arc through {0}, {1}, {2} is degenerate")]
    DegenerateArc(Point2<Real>, Point2<Real>, Point2<Real>),
}

/// The outcome of an arc/line analysis: 0 to 2 contact points plus the
/// same [`SegmentFacts`] vocabulary as segment analysis, with the line
/// playing role `A` and the arc role `B`.
#[derive(Debug, Clone, Default)]
pub struct ArcLineIntersection {
    /// Contact points lying on both the segment and the arc (endpoints
    /// included), in no particular order.
    pub points: SmallVec<[Point2<Real>; 2]>,
    /// Facts about the configuration.
    pub facts: SegmentFacts,
}

/// The arc geometry the refiner delegates to.
///
/// [`crate::Model::refine`] does not interpret arcs itself; it asks an
/// implementor of this trait where a line meets an arc and how an arc is
/// re-partitioned at given points.
pub trait ArcAnalysis {
    /// Intersects the segment `(l0, l1)` with the arc through
    /// `[start, mid, end]`.
    fn arc_line(
        &self,
        l0: Point2<Real>,
        l1: Point2<Real>,
        arc: &[Point2<Real>; 3],
        config: &GeometryConfig,
    ) -> Result<ArcLineIntersection, ArcError>;

    /// Partitions the arc through `[start, mid, end]` at the given interior
    /// points, returning one defining triple per sub-arc, in traversal
    /// order from the original start.
    fn arc_split(
        &self,
        arc: &[Point2<Real>; 3],
        cuts: &[Point2<Real>],
        config: &GeometryConfig,
    ) -> Result<Vec<[Point2<Real>; 3]>, ArcError>;
}

/// The default [`ArcAnalysis`]: arcs are true circular arcs on the
/// circumcircle of their three defining points.
#[derive(Debug, Default, Copy, Clone)]
pub struct CircularArcs;

/// A circular arc resolved to its circumcircle: center, radius, start
/// angle and signed sweep (positive counter-clockwise).
struct ArcFrame {
    center: Point2<Real>,
    radius: Real,
    start_angle: Real,
    sweep: Real,
}

#[inline]
fn ccw_delta(from: Real, to: Real) -> Real {
    let mut d = (to - from) % TAU;
    if d < 0.0 {
        d += TAU;
    }
    d
}

impl ArcFrame {
    fn from_points(arc: &[Point2<Real>; 3], config: &GeometryConfig) -> Result<Self, ArcError> {
        let [p0, pm, p1] = *arc;

        // The center is equidistant from the three points: two
        // perpendicular-bisector equations in the center coordinates.
        let (a11, a12, c1) = (
            2.0 * (pm.x - p0.x),
            2.0 * (pm.y - p0.y),
            pm.coords.norm_squared() - p0.coords.norm_squared(),
        );
        let (a21, a22, c2) = (
            2.0 * (p1.x - p0.x),
            2.0 * (p1.y - p0.y),
            p1.coords.norm_squared() - p0.coords.norm_squared(),
        );
        let (cx, cy) = solve2x2(a11, a12, a21, a22, c1, c2, config.eps2d)
            .ok_or(ArcError::DegenerateArc(p0, pm, p1))?;

        let center = Point2::new(cx, cy);
        let radius = distance2d(&center, &p0);
        if radius < config.eps2d {
            return Err(ArcError::DegenerateArc(p0, pm, p1));
        }

        let angle = |p: &Point2<Real>| (p.y - center.y).atan2(p.x - center.x);
        let start_angle = angle(&p0);
        let to_mid = ccw_delta(start_angle, angle(&pm));
        let to_end = ccw_delta(start_angle, angle(&p1));

        // The arc runs from start to end on the side containing mid.
        let sweep = if to_mid <= to_end {
            to_end
        } else {
            to_end - TAU
        };

        Ok(ArcFrame {
            center,
            radius,
            start_angle,
            sweep,
        })
    }

    /// Traversal parameter of `p`'s angular position: 0 at the arc start,
    /// 1 at its end, beyond 1 on the rest of the circle.
    fn param_of(&self, p: &Point2<Real>) -> Real {
        let angle = (p.y - self.center.y).atan2(p.x - self.center.x);
        let offset = if self.sweep >= 0.0 {
            ccw_delta(self.start_angle, angle)
        } else {
            ccw_delta(angle, self.start_angle)
        };
        offset / self.sweep.abs()
    }

    fn point_at(&self, t: Real) -> Point2<Real> {
        let angle = self.start_angle + self.sweep * t;
        self.center + Vector2::new(angle.cos(), angle.sin()) * self.radius
    }

    /// Angular tolerance equivalent to a chord of `eps` at this radius.
    #[inline]
    fn param_eps(&self, eps: Real) -> Real {
        eps / (self.radius * self.sweep.abs()).max(eps)
    }
}

impl ArcAnalysis for CircularArcs {
    fn arc_line(
        &self,
        l0: Point2<Real>,
        l1: Point2<Real>,
        arc: &[Point2<Real>; 3],
        config: &GeometryConfig,
    ) -> Result<ArcLineIntersection, ArcError> {
        let eps = config.eps2d;
        let mut facts = SegmentFacts::empty();
        facts.set(SegmentFacts::VERTICAL_A, (l0.x - l1.x).abs() < eps);
        facts.set(SegmentFacts::ZERO_LENGTH_A, distance2d(&l0, &l1) < eps);
        facts.set(
            SegmentFacts::ZERO_LENGTH_B,
            distance2d(&arc[0], &arc[2]) < eps && distance2d(&arc[0], &arc[1]) < eps,
        );

        let mut result = ArcLineIntersection {
            points: SmallVec::new(),
            facts,
        };
        if facts.intersects(SegmentFacts::ZERO_LENGTH_A | SegmentFacts::ZERO_LENGTH_B) {
            return Ok(result);
        }

        let frame = ArcFrame::from_points(arc, config)?;

        // Quadratic in the line parameter: |l0 + t d - center|^2 = r^2.
        let d = l1 - l0;
        let f = l0 - frame.center;
        let qa = d.norm_squared();
        let qb = 2.0 * f.dot(&d);
        let qc = f.norm_squared() - frame.radius * frame.radius;
        let disc = qb * qb - 4.0 * qa * qc;
        if disc < -eps {
            return Ok(result);
        }

        let sqrt_disc = disc.max(0.0).sqrt();
        let mut roots: SmallVec<[Real; 2]> = SmallVec::new();
        roots.push((-qb - sqrt_disc) / (2.0 * qa));
        if sqrt_disc > eps {
            roots.push((-qb + sqrt_disc) / (2.0 * qa));
        }

        let len = distance2d(&l0, &l1);
        let t_eps = eps / len;
        let u_eps = frame.param_eps(eps);

        for t in roots {
            if t < -t_eps || t > 1.0 + t_eps {
                continue;
            }
            let point = l0 + d * t;
            let u = frame.param_of(&point);
            if u > 1.0 + u_eps {
                continue;
            }

            let interior_line =
                !(distance2d(&point, &l0) < eps || distance2d(&point, &l1) < eps);
            let interior_arc =
                !(distance2d(&point, &arc[0]) < eps || distance2d(&point, &arc[2]) < eps);
            if interior_line {
                result.facts |= SegmentFacts::ON_SEGMENT_A;
            }
            if interior_arc {
                result.facts |= SegmentFacts::ON_SEGMENT_B;
            }
            result.points.push(point);
        }

        Ok(result)
    }

    fn arc_split(
        &self,
        arc: &[Point2<Real>; 3],
        cuts: &[Point2<Real>],
        config: &GeometryConfig,
    ) -> Result<Vec<[Point2<Real>; 3]>, ArcError> {
        let frame = ArcFrame::from_points(arc, config)?;
        let u_eps = frame.param_eps(config.eps2d);

        let mut params: SmallVec<[(Real, Point2<Real>); 4]> = cuts
            .iter()
            .map(|p| (frame.param_of(p), *p))
            .filter(|(u, _)| *u > u_eps && *u < 1.0 - u_eps)
            .collect();
        params.sort_by(|a, b| a.0.total_cmp(&b.0));
        params.dedup_by(|a, b| (a.0 - b.0).abs() < u_eps);

        if params.is_empty() {
            return Ok(vec![*arc]);
        }

        let mut bounds: SmallVec<[(Real, Point2<Real>); 6]> = SmallVec::new();
        bounds.push((0.0, arc[0]));
        bounds.extend(params);
        bounds.push((1.0, arc[2]));

        let mut out = Vec::with_capacity(bounds.len() - 1);
        for pair in bounds.windows(2) {
            let (ta, pa) = pair[0];
            let (tb, pb) = pair[1];
            let mid = frame.point_at(0.5 * (ta + tb));
            out.push([pa, mid, pb]);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn upper_unit_arc() -> [Point2<Real>; 3] {
        [
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
        ]
    }

    #[test]
    fn collinear_arc_is_degenerate() {
        let cfg = GeometryConfig::default();
        let arc = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        assert!(ArcFrame::from_points(&arc, &cfg).is_err());
    }

    #[test]
    fn frame_of_upper_half_circle() {
        let cfg = GeometryConfig::default();
        let frame = ArcFrame::from_points(&upper_unit_arc(), &cfg).unwrap();
        assert!(relative_eq!(frame.center.x, 0.0, epsilon = 1.0e-9));
        assert!(relative_eq!(frame.center.y, 0.0, epsilon = 1.0e-9));
        assert!(relative_eq!(frame.radius, 1.0, epsilon = 1.0e-9));
        assert!(relative_eq!(frame.sweep, core::f64::consts::PI, epsilon = 1.0e-9));
    }

    #[test]
    fn secant_line_hits_arc_twice() {
        let cfg = GeometryConfig::default();
        let r = CircularArcs
            .arc_line(
                Point2::new(-2.0, 0.5),
                Point2::new(2.0, 0.5),
                &upper_unit_arc(),
                &cfg,
            )
            .unwrap();
        assert_eq!(r.points.len(), 2);
        assert!(r.facts.contains(SegmentFacts::ON_SEGMENT_A | SegmentFacts::ON_SEGMENT_B));
        for p in &r.points {
            assert!(relative_eq!(p.y, 0.5, epsilon = 1.0e-9));
            assert!(relative_eq!(p.x.abs(), (0.75 as Real).sqrt(), epsilon = 1.0e-9));
        }
    }

    #[test]
    fn line_below_the_arc_misses_it() {
        let cfg = GeometryConfig::default();
        // The chord would meet the full circle at y = -0.5, but the arc is
        // the upper half.
        let r = CircularArcs
            .arc_line(
                Point2::new(-2.0, -0.5),
                Point2::new(2.0, -0.5),
                &upper_unit_arc(),
                &cfg,
            )
            .unwrap();
        assert!(r.points.is_empty());
        assert!(!r.facts.intersects(SegmentFacts::ON_SEGMENT_A | SegmentFacts::ON_SEGMENT_B));
    }

    #[test]
    fn endpoint_touch_is_not_interior() {
        let cfg = GeometryConfig::default();
        // The segment ends exactly at the arc's interior top point.
        let r = CircularArcs
            .arc_line(
                Point2::new(0.0, 0.0),
                Point2::new(0.0, 1.0),
                &upper_unit_arc(),
                &cfg,
            )
            .unwrap();
        assert_eq!(r.points.len(), 1);
        assert!(!r.facts.contains(SegmentFacts::ON_SEGMENT_A));
        assert!(r.facts.contains(SegmentFacts::ON_SEGMENT_B));
    }

    #[test]
    fn split_at_top_gives_two_quarters() {
        let cfg = GeometryConfig::default();
        let arc = upper_unit_arc();
        let parts = CircularArcs
            .arc_split(&arc, &[Point2::new(0.0, 1.0)], &cfg)
            .unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0][0], arc[0]);
        assert_eq!(parts[1][2], arc[2]);
        assert_eq!(parts[0][2], Point2::new(0.0, 1.0));
        assert_eq!(parts[1][0], Point2::new(0.0, 1.0));
        // Quarter-arc midpoints stay on the unit circle.
        for part in &parts {
            assert!(relative_eq!(part[1].coords.norm(), 1.0, epsilon = 1.0e-9));
        }
    }

    #[test]
    fn split_with_no_interior_cut_returns_the_arc() {
        let cfg = GeometryConfig::default();
        let arc = upper_unit_arc();
        let parts = CircularArcs
            .arc_split(&arc, &[Point2::new(1.0, 0.0)], &cfg)
            .unwrap();
        assert_eq!(parts, vec![arc]);
    }
}
