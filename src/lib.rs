/*!
geo-refine
==========

**geo-refine** is a 2D/3D geometric intersection kernel used to prepare
polygonal and arc geometry for downstream meshing.

It provides three layers, leaves first:

* [`query`]: pure, epsilon-tolerant intersection predicates. This covers
  the 2D beam (segment/ray) classifier with its [`query::BeamFacts`] fact
  taxonomy, and the 3D point/line/plane/triangle predicate suite.
* [`model`]: the [`model::Model`] entity (points, lines, arcs referenced by
  stable point indices) and its fixpoint refiner [`model::Model::refine`],
  which repeatedly splits lines and arcs at discovered intersection points
  until no split remains.
* [`math`]: scalar and point aliases over `nalgebra`, plus the
  [`math::GeometryConfig`] tolerances threaded through every query.
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::manual_range_contains)] // Explicit comparisons read better next to the epsilon tolerances.

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[cfg_attr(test, macro_use)]
extern crate approx;

pub extern crate nalgebra as na;

pub mod math;
pub mod model;
pub mod query;

pub use crate::math::{distance2d, distance3d, GeometryConfig, Real};
pub use crate::model::{ArcAnalysis, ArcError, CircularArcs, Model, RefineError, RefineStats};
pub use crate::query::{beams_intersection2d, segment_analysis, Beam, BeamFacts, BeamKind};
