//! Segment-pair analysis: the fact vocabulary consumed by the model
//! refiner, distilled from the raw [`BeamFacts`] of the 2D classifier.

use smallvec::SmallVec;

use crate::math::{GeometryConfig, Point2, Real};
use crate::query::{beams_intersection2d, Beam, BeamFacts};

bitflags::bitflags! {
    /// Facts about a segment/segment (or segment/arc) configuration.
    ///
    /// `ON_SEGMENT_A` means the intersection lies strictly inside segment
    /// `A` while at least touching `B`: a genuinely interior hit that
    /// requires splitting `A`, as opposed to two segments merely sharing an
    /// endpoint.
    #[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct SegmentFacts: u8 {
        /// The intersection is interior to segment `A`.
        const ON_SEGMENT_A = 1;
        /// The intersection is interior to segment `B`.
        const ON_SEGMENT_B = 1 << 1;
        /// Segment `A` is degenerate.
        const ZERO_LENGTH_A = 1 << 2;
        /// Segment `B` is degenerate.
        const ZERO_LENGTH_B = 1 << 3;
        /// Segment `A` is vertical.
        const VERTICAL_A = 1 << 4;
        /// Segment `B` is vertical.
        const VERTICAL_B = 1 << 5;
    }
}

/// The outcome of [`segment_analysis`] (and of arc/line analysis, which
/// shares the vocabulary but may carry up to two points).
#[derive(Debug, Clone, Default)]
pub struct SegmentIntersection {
    /// The intersection points found, in no particular order.
    pub points: SmallVec<[Point2<Real>; 2]>,
    /// Facts about the configuration.
    pub facts: SegmentFacts,
}

/// Analyses the intersection of segment `(p0, p1)` with segment `(p2, p3)`.
///
/// Built directly on [`beams_intersection2d`]; pure and total.
pub fn segment_analysis(
    p0: Point2<Real>,
    p1: Point2<Real>,
    p2: Point2<Real>,
    p3: Point2<Real>,
    config: &GeometryConfig,
) -> SegmentIntersection {
    let points = [p0, p1, p2, p3];
    let (point, raw) = beams_intersection2d(
        &Beam::segment(0, 1),
        &Beam::segment(2, 3),
        &points,
        config.eps2d,
    );

    let mut facts = SegmentFacts::empty();
    facts.set(SegmentFacts::ZERO_LENGTH_A, raw.contains(BeamFacts::ZERO_LENGTH_A));
    facts.set(SegmentFacts::ZERO_LENGTH_B, raw.contains(BeamFacts::ZERO_LENGTH_B));
    facts.set(SegmentFacts::VERTICAL_A, raw.contains(BeamFacts::VERTICAL_A));
    facts.set(SegmentFacts::VERTICAL_B, raw.contains(BeamFacts::VERTICAL_B));

    // Interior to one segment, at least touching the other.
    let touches_b = raw.intersects(
        BeamFacts::ON_BEAM_B | BeamFacts::AT_START_B | BeamFacts::AT_END_B,
    );
    let touches_a = raw.intersects(
        BeamFacts::ON_BEAM_A | BeamFacts::AT_START_A | BeamFacts::AT_END_A,
    );
    facts.set(
        SegmentFacts::ON_SEGMENT_A,
        raw.contains(BeamFacts::ON_BEAM_A) && touches_b,
    );
    facts.set(
        SegmentFacts::ON_SEGMENT_B,
        raw.contains(BeamFacts::ON_BEAM_B) && touches_a,
    );

    let mut result = SegmentIntersection {
        points: SmallVec::new(),
        facts,
    };

    if facts.intersects(SegmentFacts::ON_SEGMENT_A | SegmentFacts::ON_SEGMENT_B) {
        result.points.push(point);
    }

    result
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn interior_crossing_hits_both() {
        let r = segment_analysis(
            Point2::new(1.0, 1.0),
            Point2::new(4.0, 4.0),
            Point2::new(0.0, 5.0),
            Point2::new(5.0, 0.0),
            &GeometryConfig::default(),
        );
        assert!(r.facts.contains(SegmentFacts::ON_SEGMENT_A | SegmentFacts::ON_SEGMENT_B));
        assert_eq!(r.points.len(), 1);
        assert!(relative_eq!(r.points[0].x, 2.5, epsilon = 1.0e-6));
    }

    #[test]
    fn shared_corner_is_not_interior() {
        let r = segment_analysis(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            &GeometryConfig::default(),
        );
        assert!(!r.facts.intersects(SegmentFacts::ON_SEGMENT_A | SegmentFacts::ON_SEGMENT_B));
        assert!(r.points.is_empty());
    }

    #[test]
    fn t_junction_splits_the_crossed_segment_only() {
        let r = segment_analysis(
            Point2::new(-1.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 3.0),
            &GeometryConfig::default(),
        );
        assert!(r.facts.contains(SegmentFacts::ON_SEGMENT_A));
        assert!(!r.facts.contains(SegmentFacts::ON_SEGMENT_B));
        assert_eq!(r.points.len(), 1);
    }

    #[test]
    fn zero_length_is_reported() {
        let p = Point2::new(2.0, 2.0);
        let r = segment_analysis(
            p,
            p,
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            &GeometryConfig::default(),
        );
        assert!(r.facts.contains(SegmentFacts::ZERO_LENGTH_A));
        assert!(!r.facts.contains(SegmentFacts::ZERO_LENGTH_B));
    }
}
