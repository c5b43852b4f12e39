//! The mutable geometric model refined for meshing: deduplicated points,
//! straight lines and circular arcs referenced by stable point indices.

pub use self::arcs::{ArcAnalysis, ArcError, ArcLineIntersection, CircularArcs};
pub use self::refine::{RefineError, RefineStats};

mod arcs;
mod refine;

use crate::math::{GeometryConfig, Point2, Real};

/// A straight structural edge between two point indices.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Line {
    /// Index of the line's start point.
    pub start: u32,
    /// Index of the line's end point.
    pub end: u32,
    /// Opaque identifier carried to downstream consumers.
    pub tag: u32,
}

/// A circular arc through three point indices: start, an interior point,
/// end.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Arc {
    /// Index of the arc's start point.
    pub start: u32,
    /// Index of a point interior to the arc.
    pub mid: u32,
    /// Index of the arc's end point.
    pub end: u32,
    /// Opaque identifier carried to downstream consumers.
    pub tag: u32,
}

/// A 2D model of points, lines and arcs prepared for meshing.
///
/// Points are insertion-deduplicated and append-only, so a point index is a
/// stable handle for the whole life of the model. Line and arc indices are
/// not stable: [`Model::refine`] removes and re-adds them freely.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// The model's deduplicated point buffer.
    pub points: Vec<Point2<Real>>,
    /// The model's straight edges.
    pub lines: Vec<Line>,
    /// The model's circular arcs.
    pub arcs: Vec<Arc>,
    /// Tolerances and refinement limits.
    pub config: GeometryConfig,
}

impl Model {
    /// An empty model with the given tolerances.
    pub fn new(config: GeometryConfig) -> Self {
        Model {
            points: Vec::new(),
            lines: Vec::new(),
            arcs: Vec::new(),
            config,
        }
    }

    /// Inserts `p`, reusing the index of an existing point whose
    /// coordinates both match within `eps2d`.
    ///
    /// Points are never removed, so the returned index stays valid.
    pub fn add_point(&mut self, p: Point2<Real>) -> u32 {
        let eps = self.config.eps2d;
        for (i, q) in self.points.iter().enumerate() {
            if (p.x - q.x).abs() < eps && (p.y - q.y).abs() < eps {
                return i as u32;
            }
        }
        self.points.push(p);
        (self.points.len() - 1) as u32
    }

    /// Adds a line between `p0` and `p1`, inserting the points as needed.
    pub fn add_line(&mut self, p0: Point2<Real>, p1: Point2<Real>, tag: u32) {
        let start = self.add_point(p0);
        let end = self.add_point(p1);
        self.lines.push(Line { start, end, tag });
    }

    /// Adds an arc from `start` through `mid` to `end`, inserting the
    /// points as needed.
    pub fn add_arc(&mut self, start: Point2<Real>, mid: Point2<Real>, end: Point2<Real>, tag: u32) {
        let start = self.add_point(start);
        let mid = self.add_point(mid);
        let end = self.add_point(end);
        self.arcs.push(Arc {
            start,
            mid,
            end,
            tag,
        });
    }

    /// Adds a full circle as two half arcs meeting at the east and west
    /// cardinal points.
    pub fn add_circle(&mut self, center: Point2<Real>, radius: Real, tag: u32) {
        let east = Point2::new(center.x + radius, center.y);
        let north = Point2::new(center.x, center.y + radius);
        let west = Point2::new(center.x - radius, center.y);
        let south = Point2::new(center.x, center.y - radius);
        self.add_arc(east, north, west, tag);
        self.add_arc(west, south, east, tag);
    }

    #[inline]
    pub(crate) fn point(&self, i: u32) -> Point2<Real> {
        self.points[i as usize]
    }
}
