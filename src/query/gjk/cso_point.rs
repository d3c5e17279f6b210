use core::ops::Sub;

use na::Unit;

use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::SupportMap;

/// A vertex of the configuration space obstacle `g1 - g2`, together with the
/// points of `g1` and `g2` it was built from.
///
/// Keeping both origins lets GJK and EPA map a barycentric combination of
/// configuration space vertices back to a witness point on each shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CSOPoint {
    /// The vertex itself. Equal to `orig1 - orig2` unless it was translated.
    pub point: Point<Real>,
    /// The point of the first shape.
    pub orig1: Point<Real>,
    /// The point of the second shape.
    pub orig2: Point<Real>,
}

impl CSOPoint {
    /// The vertex `orig1 - orig2`.
    pub fn new(orig1: Point<Real>, orig2: Point<Real>) -> Self {
        Self {
            point: Point::from(orig1 - orig2),
            orig1,
            orig2,
        }
    }

    /// A vertex standing for itself, as if the second shape was the origin.
    pub fn single_point(point: Point<Real>) -> Self {
        Self::new(point, Point::origin())
    }

    /// The vertex at the origin.
    pub fn origin() -> Self {
        Self::single_point(Point::origin())
    }

    /// The support point of `g1 - pos12 * g2` along the unit direction `dir`.
    pub fn from_shapes_toward<G1, G2>(
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        dir: &Unit<Vector<Real>>,
    ) -> Self
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        Self::new(
            g1.local_support_point_toward(dir),
            g2.support_point_toward(pos12, &-*dir),
        )
    }

    /// The support point of `g1 - pos12 * g2` along `dir`, not necessarily normalized.
    pub fn from_shapes<G1, G2>(pos12: &Isometry<Real>, g1: &G1, g2: &G2, dir: &Vector<Real>) -> Self
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        Self::new(g1.local_support_point(dir), g2.support_point(pos12, &-*dir))
    }

    /// This vertex moved by `shift`. The shape points are left untouched.
    pub fn translate(&self, shift: &Vector<Real>) -> Self {
        let mut res = *self;
        res.translate_mut(shift);
        res
    }

    /// Moves this vertex by `shift`. The shape points are left untouched.
    pub fn translate_mut(&mut self, shift: &Vector<Real>) {
        self.point += shift;
    }
}

impl Sub<CSOPoint> for CSOPoint {
    type Output = Vector<Real>;

    #[inline]
    fn sub(self, rhs: CSOPoint) -> Vector<Real> {
        self.point - rhs.point
    }
}
