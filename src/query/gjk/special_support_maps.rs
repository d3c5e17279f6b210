use na::Unit;

use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::SupportMap;

/// The origin of the local frame, as a support-mapped shape.
///
/// Turns GJK queries between two shapes into point projections and ray
/// casts on a single shape.
pub struct ConstantOrigin;

impl SupportMap for ConstantOrigin {
    #[inline]
    fn local_support_point(&self, _: &Vector<Real>) -> Point<Real> {
        Point::origin()
    }

    #[inline]
    fn support_point(&self, m: &Isometry<Real>, _: &Vector<Real>) -> Point<Real> {
        Point::from(m.translation.vector)
    }
}

/// A shape inflated by a ball of radius `radius`.
///
/// Used to sweep rounded shapes (balls, capsules) with their core shape.
pub struct DilatedShape<'a, S: ?Sized + SupportMap> {
    /// The core shape.
    pub shape: &'a S,
    /// The inflation radius.
    pub radius: Real,
}

impl<S: ?Sized + SupportMap> SupportMap for DilatedShape<'_, S> {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        Unit::try_new(*dir, 0.0)
            .map(|dir| self.local_support_point_toward(&dir))
            .unwrap_or_else(|| self.shape.local_support_point(dir))
    }

    #[inline]
    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.shape.local_support_point_toward(dir) + dir.into_inner() * self.radius
    }

    #[inline]
    fn local_interior_point(&self) -> Point<Real> {
        self.shape.local_interior_point()
    }
}
