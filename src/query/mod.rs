//! Pure, epsilon-tolerant geometric queries.
//!
//! The 2D entry point is [`beams_intersection2d`], which classifies a pair
//! of beams into the [`BeamFacts`] taxonomy, and [`segment_analysis`]
//! built on top of it. The 3D entry points are the point/line/plane/triangle
//! predicates culminating in [`triangle_triangle3d`].

pub use self::beam::{beams_intersection2d, Beam, BeamFacts, BeamKind};
pub use self::line3::{
    line_line3d, point_line3d, point_line_ratio3d, point_point3d, solve2x2, zero_line3d,
};
pub use self::plane3::{point_on_plane3d, Plane};
pub use self::segment_analysis::{segment_analysis, SegmentFacts, SegmentIntersection};
pub use self::triangle3::{
    line_triangle_coplanar3d, line_triangle_transversal3d, point_triangle3d, triangle_triangle3d,
    zero_triangle3d,
};

mod beam;
mod line3;
mod plane3;
mod segment_analysis;
mod triangle3;
