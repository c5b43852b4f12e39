//! The fixpoint refiner: repeatedly splits lines and arcs at discovered
//! intersection points until a pass produces no change.

use thiserror::Error;

use crate::math::{Point2, Real};
use crate::model::{Arc, ArcAnalysis, ArcError, Line, Model};
use crate::query::{segment_analysis, SegmentFacts};

/// The same per-coordinate box as [`Model::add_point`]: a cut for which this
/// holds against an endpoint would be merged onto that endpoint's index, so
/// it must not trigger a split.
#[inline]
fn merges_with(p: &Point2<Real>, q: &Point2<Real>, eps: Real) -> bool {
    (p.x - q.x).abs() < eps && (p.y - q.y).abs() < eps
}

/// Fatal failure of a refinement call.
///
/// Every variant aborts the whole refinement; no partial recovery is
/// attempted, and the model may be left mid-pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RefineError {
    /// A zero-length line or arc chord was encountered. Such an entity
    /// marks an invalid model that cannot be meaningfully refined.
    #[error("zero-length {entity} encountered during refinement")]
    InvalidGeometry {
        /// The kind of degenerate entity found.
        entity: &'static str,
    },
    /// The arc collaborator failed.
    #[error("arc analysis failed: {0}")]
    Collaborator(#[from] ArcError),
    /// The model did not reach a fixpoint within
    /// [`crate::GeometryConfig::max_passes`] passes.
    #[error("refinement did not converge within {passes} passes")]
    PassLimit {
        /// The number of passes run before giving up.
        passes: u32,
    },
}

/// What a refinement call did before converging.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct RefineStats {
    /// Number of passes run, the final (empty) one included.
    pub passes: u32,
    /// Number of lines split across all passes.
    pub line_splits: usize,
    /// Number of arcs split across all passes.
    pub arc_splits: usize,
}

impl Model {
    /// Refines the model to its intersection fixpoint.
    ///
    /// Each pass scans every line/line and line/arc pair, splits the
    /// entities whose interior is hit by an intersection point, and removes
    /// the originals in one batch; passes repeat until one of them changes
    /// nothing. Point indices stay stable throughout; line and arc indices
    /// do not survive a pass.
    ///
    /// Arc geometry is delegated to `arcs`, typically
    /// [`crate::CircularArcs`].
    pub fn refine(&mut self, arcs: &dyn ArcAnalysis) -> Result<RefineStats, RefineError> {
        let mut stats = RefineStats::default();

        loop {
            if stats.passes >= self.config.max_passes {
                return Err(RefineError::PassLimit {
                    passes: stats.passes,
                });
            }
            stats.passes += 1;

            let (line_splits, arc_splits) = self.refine_pass(arcs)?;
            stats.line_splits += line_splits;
            stats.arc_splits += arc_splits;

            log::debug!(
                "refinement pass {}: {} line splits, {} arc splits",
                stats.passes,
                line_splits,
                arc_splits
            );

            if line_splits == 0 && arc_splits == 0 {
                return Ok(stats);
            }
        }
    }

    /// Runs one full scan-and-split pass. Returns the number of lines and
    /// arcs split.
    fn refine_pass(
        &mut self,
        arcs: &dyn ArcAnalysis,
    ) -> Result<(usize, usize), RefineError> {
        let mut removed_lines = vec![false; self.lines.len()];
        let mut removed_arcs = vec![false; self.arcs.len()];
        let mut new_lines: Vec<Line> = Vec::new();
        let mut new_arcs: Vec<Arc> = Vec::new();

        // Line x line.
        for i in 0..self.lines.len() {
            for j in i + 1..self.lines.len() {
                if removed_lines[i] || removed_lines[j] {
                    continue;
                }
                let (a, b) = (self.lines[i], self.lines[j]);
                let result = segment_analysis(
                    self.point(a.start),
                    self.point(a.end),
                    self.point(b.start),
                    self.point(b.end),
                    &self.config,
                );

                if result
                    .facts
                    .intersects(SegmentFacts::ZERO_LENGTH_A | SegmentFacts::ZERO_LENGTH_B)
                {
                    log::error!("zero-length line in pair ({i}, {j}); aborting refinement");
                    return Err(RefineError::InvalidGeometry { entity: "line" });
                }

                if !result
                    .facts
                    .intersects(SegmentFacts::ON_SEGMENT_A | SegmentFacts::ON_SEGMENT_B)
                {
                    continue;
                }
                let cut = self.add_point(result.points[0]);

                if result.facts.contains(SegmentFacts::ON_SEGMENT_A) {
                    removed_lines[i] = true;
                    new_lines.push(Line { start: a.start, end: cut, tag: a.tag });
                    new_lines.push(Line { start: cut, end: a.end, tag: a.tag });
                }
                if result.facts.contains(SegmentFacts::ON_SEGMENT_B) {
                    removed_lines[j] = true;
                    new_lines.push(Line { start: b.start, end: cut, tag: b.tag });
                    new_lines.push(Line { start: cut, end: b.end, tag: b.tag });
                }
            }
        }

        // Line x arc.
        for i in 0..self.lines.len() {
            if removed_lines[i] {
                continue;
            }
            for j in 0..self.arcs.len() {
                if removed_arcs[j] {
                    continue;
                }
                let (line, arc) = (self.lines[i], self.arcs[j]);
                let (l0, l1) = (self.point(line.start), self.point(line.end));
                let arc_points = [
                    self.point(arc.start),
                    self.point(arc.mid),
                    self.point(arc.end),
                ];
                let result = arcs.arc_line(l0, l1, &arc_points, &self.config)?;

                if result
                    .facts
                    .intersects(SegmentFacts::ZERO_LENGTH_A | SegmentFacts::ZERO_LENGTH_B)
                {
                    log::error!("zero-length entity in line {i} x arc {j}; aborting refinement");
                    return Err(RefineError::InvalidGeometry {
                        entity: if result.facts.contains(SegmentFacts::ZERO_LENGTH_A) {
                            "line"
                        } else {
                            "arc chord"
                        },
                    });
                }

                let eps = self.config.eps2d;
                if result.facts.contains(SegmentFacts::ON_SEGMENT_A) {
                    let cuts: Vec<Point2<Real>> = result
                        .points
                        .iter()
                        .copied()
                        .filter(|p| !merges_with(p, &l0, eps) && !merges_with(p, &l1, eps))
                        .collect();
                    if self.split_line(
                        line,
                        &cuts,
                        result.facts.contains(SegmentFacts::VERTICAL_A),
                        &mut new_lines,
                    ) {
                        removed_lines[i] = true;
                    }
                }

                if result.facts.contains(SegmentFacts::ON_SEGMENT_B) {
                    let cuts: Vec<Point2<Real>> = result
                        .points
                        .iter()
                        .copied()
                        .filter(|p| {
                            !merges_with(p, &arc_points[0], eps)
                                && !merges_with(p, &arc_points[2], eps)
                        })
                        .collect();
                    if !cuts.is_empty() {
                        let parts = arcs.arc_split(&arc_points, &cuts, &self.config)?;
                        if parts.len() > 1 {
                            removed_arcs[j] = true;
                            for [start, mid, end] in parts {
                                let start = self.add_point(start);
                                let mid = self.add_point(mid);
                                let end = self.add_point(end);
                                new_arcs.push(Arc { start, mid, end, tag: arc.tag });
                            }
                        }
                    }
                }

                if removed_lines[i] {
                    break;
                }
            }
        }

        let line_splits = removed_lines.iter().filter(|r| **r).count();
        let arc_splits = removed_arcs.iter().filter(|r| **r).count();

        // Batched removal; line/arc indices are pass-local.
        let mut idx = 0;
        self.lines.retain(|_| {
            let keep = !removed_lines[idx];
            idx += 1;
            keep
        });
        self.lines.append(&mut new_lines);

        let mut idx = 0;
        self.arcs.retain(|_| {
            let keep = !removed_arcs[idx];
            idx += 1;
            keep
        });
        self.arcs.append(&mut new_arcs);

        Ok((line_splits, arc_splits))
    }

    /// Splits `line` at one or two interior cut points, appending the
    /// sub-lines in traversal order. Returns `false` when no cut remains
    /// after deduplication.
    fn split_line(
        &mut self,
        line: Line,
        cuts: &[Point2<Real>],
        vertical: bool,
        new_lines: &mut Vec<Line>,
    ) -> bool {
        let mut indices: Vec<u32> = match cuts {
            [] => return false,
            [p] => vec![self.add_point(*p)],
            more => {
                // Order along the dominant axis, consistent with the line's
                // own endpoint ordering.
                let axis = |p: &Point2<Real>| if vertical { p.y } else { p.x };
                let mut sorted = more.to_vec();
                sorted.sort_by(|a, b| axis(a).total_cmp(&axis(b)));
                if axis(&self.point(line.start)) > axis(&self.point(line.end)) {
                    sorted.reverse();
                }
                sorted.iter().map(|p| self.add_point(*p)).collect()
            }
        };
        indices.dedup();

        let mut prev = line.start;
        for &cut in &indices {
            new_lines.push(Line { start: prev, end: cut, tag: line.tag });
            prev = cut;
        }
        new_lines.push(Line { start: prev, end: line.end, tag: line.tag });
        true
    }
}
