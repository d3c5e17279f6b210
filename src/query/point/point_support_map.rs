use na::Unit;

use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use crate::query::gjk::{self, CSOPoint, ConstantOrigin, GJKResult, VoronoiSimplex};
use crate::shape::SupportMap;

/// Projects a point located outside of a support-mapped shape on its boundary.
///
/// Returns `None` if the point is inside of the shape (or too close to its
/// boundary to separate it).
pub fn project_exterior_point_on_support_map<G: ?Sized + SupportMap>(
    shape: &G,
    point: &Point<Real>,
) -> Option<Point<Real>> {
    let pos12 = Isometry::translation(point.x, point.y, point.z);
    let dir = Unit::try_new(point - shape.local_interior_point(), DEFAULT_EPSILON)
        .unwrap_or(Vector::x_axis());
    let mut simplex = VoronoiSimplex::new();
    simplex.reset(CSOPoint::from_shapes_toward(
        &pos12,
        shape,
        &ConstantOrigin,
        &dir,
    ));

    match gjk::closest_points(&pos12, shape, &ConstantOrigin, &mut simplex) {
        GJKResult::ClosestPoints(p, _, _) => Some(p),
        _ => None,
    }
}
