//! Planes through three points and point/plane membership.

use crate::math::{GeometryConfig, Point3, Real};

/// The coefficients `(a, b, c, d)` of the plane `a x + b y + c z + d = 0`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane {
    /// The `x` coefficient of the plane equation.
    pub a: Real,
    /// The `y` coefficient of the plane equation.
    pub b: Real,
    /// The `z` coefficient of the plane equation.
    pub c: Real,
    /// The constant term of the plane equation.
    pub d: Real,
}

impl Plane {
    /// The plane through three points.
    ///
    /// The normal is the cross product of the edges `p2 - p1` and
    /// `p3 - p1`; each term is accumulated with a fused multiply-add. A
    /// degenerate triple yields a zero normal, which callers detect through
    /// [`crate::query::zero_triangle3d`].
    pub fn from_points(p1: &Point3<Real>, p2: &Point3<Real>, p3: &Point3<Real>) -> Self {
        let u = p2 - p1;
        let v = p3 - p1;

        let a = u.y.mul_add(v.z, -(u.z * v.y));
        let b = u.z.mul_add(v.x, -(u.x * v.z));
        let c = u.x.mul_add(v.y, -(u.y * v.x));
        let d = -a.mul_add(p1.x, b.mul_add(p1.y, c * p1.z));

        Plane { a, b, c, d }
    }

    /// Evaluates the plane equation at `p`.
    #[inline]
    pub fn eval(&self, p: &Point3<Real>) -> Real {
        self.a.mul_add(p.x, self.b.mul_add(p.y, self.c.mul_add(p.z, self.d)))
    }
}

/// Tests whether `p` lies on `plane` within the distance tolerance.
#[inline]
pub fn point_on_plane3d(p: &Point3<Real>, plane: &Plane, config: &GeometryConfig) -> bool {
    plane.eval(p).abs() < config.eps3d
}
