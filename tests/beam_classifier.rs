use geo_refine::na::{Point2, Vector2};
use geo_refine::{beams_intersection2d, Beam, BeamFacts, GeometryConfig, Real};
use rand::Rng;

/// The fixed beam configurations the classifier invariances are sampled
/// over: crossing, touching, parallel, collinear and degenerate cases.
fn configurations() -> Vec<[Point2<Real>; 4]> {
    vec![
        // Interior crossing.
        [
            Point2::new(1.0, 1.0),
            Point2::new(4.0, 4.0),
            Point2::new(0.0, 5.0),
            Point2::new(5.0, 0.0),
        ],
        // T-junction.
        [
            Point2::new(-1.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 3.0),
        ],
        // Shared corner.
        [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        ],
        // Parallel.
        [
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(4.0, 1.0),
        ],
        // Identical collinear verticals.
        [
            Point2::new(0.0, 2.0),
            Point2::new(0.0, 8.0),
            Point2::new(0.0, 2.0),
            Point2::new(0.0, 8.0),
        ],
        // Fully degenerate.
        [
            Point2::new(5.0, 5.0),
            Point2::new(5.0, 5.0),
            Point2::new(5.0, 5.0),
            Point2::new(5.0, 5.0),
        ],
        // Crossing beyond an endpoint.
        [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(4.0, 8.0),
            Point2::new(8.0, 4.0),
        ],
    ]
}

fn classify(pts: &[Point2<Real>; 4]) -> (Point2<Real>, BeamFacts) {
    let eps = GeometryConfig::default().eps2d;
    beams_intersection2d(&Beam::segment(0, 1), &Beam::segment(2, 3), pts, eps)
}

#[test]
fn translation_invariance() {
    let mut rng = rand::thread_rng();

    for pts in configurations() {
        let (point, facts) = classify(&pts);

        for _ in 0..20 {
            let t = Vector2::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
            let moved = [pts[0] + t, pts[1] + t, pts[2] + t, pts[3] + t];
            let (moved_point, moved_facts) = classify(&moved);

            assert_eq!(facts, moved_facts, "facts changed under translation {t:?}");
            if !facts.intersects(BeamFacts::PARALLEL | BeamFacts::COLLINEAR) {
                let expected = point + t;
                approx::assert_relative_eq!(moved_point.x, expected.x, epsilon = 1.0e-6);
                approx::assert_relative_eq!(moved_point.y, expected.y, epsilon = 1.0e-6);
            }
        }
    }
}

#[test]
fn point_reflection_invariance() {
    for pts in configurations() {
        let (point, facts) = classify(&pts);
        let negated = [-pts[0], -pts[1], -pts[2], -pts[3]];
        let (neg_point, neg_facts) = classify(&negated);

        assert_eq!(facts, neg_facts);
        if !facts.intersects(BeamFacts::PARALLEL | BeamFacts::COLLINEAR) {
            approx::assert_relative_eq!(neg_point.x, -point.x, epsilon = 1.0e-6);
            approx::assert_relative_eq!(neg_point.y, -point.y, epsilon = 1.0e-6);
        }
    }
}

#[test]
fn kind_is_metadata_only() {
    // The classifier reports the same facts whether beams are declared
    // segments or rays.
    let pts = [
        Point2::new(0.0, 0.0),
        Point2::new(2.0, 2.0),
        Point2::new(4.0, 8.0),
        Point2::new(8.0, 4.0),
    ];
    let eps = GeometryConfig::default().eps2d;
    let (p_seg, f_seg) = beams_intersection2d(&Beam::segment(0, 1), &Beam::segment(2, 3), &pts, eps);
    let (p_ray, f_ray) = beams_intersection2d(&Beam::ray(0, 1), &Beam::ray(2, 3), &pts, eps);

    assert_eq!(f_seg, f_ray);
    assert_eq!(p_seg, p_ray);
    assert!(f_ray.contains(BeamFacts::BEYOND_END_A));
}
