//! The 2D beam (segment/ray) intersection classifier and its fact taxonomy.

use crate::math::{distance2d, Point2, Real};

/// Whether a [`Beam`] is bounded at both ends or only at its start.
///
/// The kind is metadata carried for callers: [`beams_intersection2d`]
/// reports every fact regardless of the declared kind, and callers combine
/// the facts with the kind to decide whether two beams "really" intersect.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BeamKind {
    /// Bounded at both endpoints.
    Segment,
    /// Bounded at the start endpoint only.
    Ray,
}

/// A 2D segment or ray referencing two point indices.
///
/// A beam never owns coordinates; it is a view into an external point
/// slice, and its indices must be valid into that slice at call time.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Beam {
    /// Index of the beam's first endpoint.
    pub start: u32,
    /// Index of the beam's second endpoint.
    pub end: u32,
    /// Segment or ray.
    pub kind: BeamKind,
}

impl Beam {
    /// A segment beam between the points at indices `start` and `end`.
    #[inline]
    pub fn segment(start: u32, end: u32) -> Self {
        Beam {
            start,
            end,
            kind: BeamKind::Segment,
        }
    }

    /// A ray beam from the point at `start` through the point at `end`.
    #[inline]
    pub fn ray(start: u32, end: u32) -> Self {
        Beam {
            start,
            end,
            kind: BeamKind::Ray,
        }
    }
}

bitflags::bitflags! {
    /// Independent boolean facts observed about a pair of beams.
    ///
    /// These are facts, not mutually exclusive states: several bits co-occur
    /// routinely (a degenerate beam is at once zero-length, vertical and
    /// horizontal). [`beams_intersection2d`] returns the union of every fact
    /// it evaluated.
    #[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct BeamFacts: u32 {
        /// The first beam is vertical (its endpoint x coordinates coincide).
        const VERTICAL_A = 1;
        /// The second beam is vertical.
        const VERTICAL_B = 1 << 1;
        /// The first beam is horizontal.
        const HORIZONTAL_A = 1 << 2;
        /// The second beam is horizontal.
        const HORIZONTAL_B = 1 << 3;
        /// The first beam is degenerate (vertical and horizontal at once).
        const ZERO_LENGTH_A = 1 << 4;
        /// The second beam is degenerate.
        const ZERO_LENGTH_B = 1 << 5;
        /// The supporting lines are parallel and distinct.
        const PARALLEL = 1 << 6;
        /// The supporting lines coincide.
        const COLLINEAR = 1 << 7;
        /// The first beam's start coincides with the second beam's start.
        const START_A_ON_START_B = 1 << 8;
        /// The first beam's start coincides with the second beam's end.
        const START_A_ON_END_B = 1 << 9;
        /// The first beam's end coincides with the second beam's start.
        const END_A_ON_START_B = 1 << 10;
        /// The first beam's end coincides with the second beam's end.
        const END_A_ON_END_B = 1 << 11;
        /// The intersection point coincides with the first beam's start.
        const AT_START_A = 1 << 12;
        /// The intersection point coincides with the first beam's end.
        const AT_END_A = 1 << 13;
        /// The intersection point coincides with the second beam's start.
        const AT_START_B = 1 << 14;
        /// The intersection point coincides with the second beam's end.
        const AT_END_B = 1 << 15;
        /// The intersection point lies inside the first beam's bounding box,
        /// away from both of its endpoints.
        const ON_BEAM_A = 1 << 16;
        /// The intersection point lies inside the second beam's bounding box,
        /// away from both of its endpoints.
        const ON_BEAM_B = 1 << 17;
        /// The intersection point lies on the first beam's supporting line,
        /// beyond its start endpoint.
        const BEYOND_START_A = 1 << 18;
        /// The intersection point lies on the first beam's supporting line,
        /// beyond its end endpoint.
        const BEYOND_END_A = 1 << 19;
        /// The intersection point lies on the second beam's supporting line,
        /// beyond its start endpoint.
        const BEYOND_START_B = 1 << 20;
        /// The intersection point lies on the second beam's supporting line,
        /// beyond its end endpoint.
        const BEYOND_END_B = 1 << 21;
    }
}

#[inline]
fn coincide(a: &Point2<Real>, b: &Point2<Real>, eps: Real) -> bool {
    (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps
}

#[inline]
fn within_bbox(p: &Point2<Real>, a: &Point2<Real>, b: &Point2<Real>, eps: Real) -> bool {
    p.x >= a.x.min(b.x) - eps
        && p.x <= a.x.max(b.x) + eps
        && p.y >= a.y.min(b.y) - eps
        && p.y <= a.y.max(b.y) + eps
}

/// Classifies the intersection of two beams resolved against `points`.
///
/// Returns the intersection point of the two supporting lines together with
/// the union of every observed [`BeamFacts`] bit. When the two endpoints of
/// the beams share a corner, the returned point is that corner rather than
/// the numerically solved one. When the supporting lines are degenerate
/// (parallel, collinear, or a beam is zero-length), no intersection point is
/// solved: the point defaults to the origin (or the shared corner, if any)
/// and only the single-beam, coincidence and parallel/collinear facts are
/// reported.
///
/// This function reports facts, not a verdict; it never fails, and the
/// beams' declared [`BeamKind`] is not consulted.
pub fn beams_intersection2d(
    a: &Beam,
    b: &Beam,
    points: &[Point2<Real>],
    eps: Real,
) -> (Point2<Real>, BeamFacts) {
    let p1 = points[a.start as usize];
    let p2 = points[a.end as usize];
    let p3 = points[b.start as usize];
    let p4 = points[b.end as usize];

    let mut facts = BeamFacts::empty();
    let mut point = Point2::origin();

    // Endpoint coincidences take priority over the generic solve.
    if coincide(&p1, &p3, eps) {
        facts |= BeamFacts::START_A_ON_START_B;
        point = p1;
    }
    if coincide(&p1, &p4, eps) {
        facts |= BeamFacts::START_A_ON_END_B;
        point = p1;
    }
    if coincide(&p2, &p3, eps) {
        facts |= BeamFacts::END_A_ON_START_B;
        point = p2;
    }
    if coincide(&p2, &p4, eps) {
        facts |= BeamFacts::END_A_ON_END_B;
        point = p2;
    }

    let vert_a = (p1.x - p2.x).abs() < eps;
    let horz_a = (p1.y - p2.y).abs() < eps;
    let vert_b = (p3.x - p4.x).abs() < eps;
    let horz_b = (p3.y - p4.y).abs() < eps;
    facts.set(BeamFacts::VERTICAL_A, vert_a);
    facts.set(BeamFacts::HORIZONTAL_A, horz_a);
    facts.set(BeamFacts::VERTICAL_B, vert_b);
    facts.set(BeamFacts::HORIZONTAL_B, horz_b);
    facts.set(BeamFacts::ZERO_LENGTH_A, vert_a && horz_a);
    facts.set(BeamFacts::ZERO_LENGTH_B, vert_b && horz_b);

    // Determinant of the two-line linear system.
    let det = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);

    if det.abs() < eps
        || facts.intersects(BeamFacts::ZERO_LENGTH_A | BeamFacts::ZERO_LENGTH_B)
    {
        // Degenerate: no intersection point is solved, and none of the
        // placement flags below apply.
        let cross = (p3.x - p1.x) * (p2.y - p1.y) - (p2.x - p1.x) * (p3.y - p1.y);
        if cross.abs() < eps {
            facts |= BeamFacts::COLLINEAR;
        } else {
            facts |= BeamFacts::PARALLEL;
        }
        return (point, facts);
    }

    if !facts.intersects(
        BeamFacts::START_A_ON_START_B
            | BeamFacts::START_A_ON_END_B
            | BeamFacts::END_A_ON_START_B
            | BeamFacts::END_A_ON_END_B,
    ) {
        // Cramer's rule on the homogeneous line-through-two-points forms.
        let a12 = p1.x * p2.y - p1.y * p2.x;
        let a34 = p3.x * p4.y - p3.y * p4.x;
        point.x = (a12 * (p3.x - p4.x) - (p1.x - p2.x) * a34) / det;
        point.y = (a12 * (p3.y - p4.y) - (p1.y - p2.y) * a34) / det;
    }

    let at_start_a = coincide(&point, &p1, eps);
    let at_end_a = coincide(&point, &p2, eps);
    let at_start_b = coincide(&point, &p3, eps);
    let at_end_b = coincide(&point, &p4, eps);
    facts.set(BeamFacts::AT_START_A, at_start_a);
    facts.set(BeamFacts::AT_END_A, at_end_a);
    facts.set(BeamFacts::AT_START_B, at_start_b);
    facts.set(BeamFacts::AT_END_B, at_end_b);

    // An endpoint coincidence suppresses the generic "on beam" fact.
    facts.set(
        BeamFacts::ON_BEAM_A,
        within_bbox(&point, &p1, &p2, eps) && !at_start_a && !at_end_a,
    );
    facts.set(
        BeamFacts::ON_BEAM_B,
        within_bbox(&point, &p3, &p4, eps) && !at_start_b && !at_end_b,
    );

    let len_a = distance2d(&p1, &p2);
    let d1 = distance2d(&p1, &point);
    let d2 = distance2d(&p2, &point);
    facts.set(BeamFacts::BEYOND_END_A, d1 > len_a + eps && d1 > d2);
    facts.set(BeamFacts::BEYOND_START_A, d2 > len_a + eps && d2 > d1);

    let len_b = distance2d(&p3, &p4);
    let d3 = distance2d(&p3, &point);
    let d4 = distance2d(&p4, &point);
    facts.set(BeamFacts::BEYOND_END_B, d3 > len_b + eps && d3 > d4);
    facts.set(BeamFacts::BEYOND_START_B, d4 > len_b + eps && d4 > d3);

    (point, facts)
}
