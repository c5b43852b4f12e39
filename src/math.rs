//! Scalar and point aliases, and the tolerance configuration threaded
//! through every query.

pub use na::{Point2, Point3, Vector2, Vector3};

/// The scalar type used throughout this crate.
pub use f64 as Real;

/// Tolerances and limits shared by the 2D classifier, the 3D predicate
/// suite, and the model refiner.
///
/// The epsilons are absolute, not adaptive: `eps2d` bounds coordinate
/// differences in the plane, `eps3d` bounds Euclidean distances in space.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeometryConfig {
    /// Absolute tolerance on 2D coordinate differences.
    pub eps2d: Real,
    /// Absolute tolerance on 3D distances.
    pub eps3d: Real,
    /// Maximum number of refinement passes before [`crate::RefineError::PassLimit`]
    /// is returned.
    ///
    /// A model whose intersection points keep regenerating within numerical
    /// noise never reaches a fixpoint; this valve turns that into an error
    /// instead of an endless loop.
    pub max_passes: u32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        GeometryConfig {
            eps2d: 1.0e-6,
            eps3d: 1.0e-5,
            max_passes: 256,
        }
    }
}

/// The Euclidean distance between two points of the plane.
#[inline]
pub fn distance2d(a: &Point2<Real>, b: &Point2<Real>) -> Real {
    na::distance(a, b)
}

/// The Euclidean distance between two points of space.
#[inline]
pub fn distance3d(a: &Point3<Real>, b: &Point3<Real>) -> Real {
    na::distance(a, b)
}
