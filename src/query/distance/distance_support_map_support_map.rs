use na::Unit;

use crate::math::{Isometry, Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::query::epa::EPA;
use crate::query::gjk::{self, CSOPoint, GJKResult, VoronoiSimplex};
use crate::query::{DistanceResult, PointQuery};
use crate::shape::SupportMap;

/// Offset applied to the GJK/EPA witness points before projecting them back on each shape.
const WITNESS_OFFSET: Real = 1.0e-4;

/// Signed distance between support-mapped shapes, with exact witness points.
///
/// `margin1` and `margin2` dilate each shape by a ball (e.g. a capsule is its
/// core segment with a margin equal to its radius). The closest points are
/// computed by GJK, or EPA if the shapes penetrate, then projected back on
/// each shape to retrieve their features.
pub fn distance_support_map_support_map<G1, G2>(
    pos1: &Isometry<Real>,
    g1: &G1,
    margin1: Real,
    pos2: &Isometry<Real>,
    g2: &G2,
    margin2: Real,
) -> DistanceResult
where
    G1: ?Sized + SupportMap + PointQuery,
    G2: ?Sized + SupportMap + PointQuery,
{
    let pos12 = pos1.inv_mul(pos2);
    let (p1, p2, normal1) = closest_points_support_map_support_map(&pos12, g1, g2);

    refine_witnesses(&pos12, g1, margin1, g2, margin2, &p1, &p2, &normal1).transform_by(pos1)
}

/// Projects approximate witness points back on each shape.
///
/// `p1`, `p2`, and `normal1` are expressed in the local frame of `g1`;
/// `normal1` points from `g1` toward `g2`. The returned result is expressed
/// in the local frame of `g1`.
pub fn refine_witnesses<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    margin1: Real,
    g2: &G2,
    margin2: Real,
    p1: &Point<Real>,
    p2: &Point<Real>,
    normal1: &UnitVector<Real>,
) -> DistanceResult
where
    G1: ?Sized + PointQuery,
    G2: ?Sized + PointQuery,
{
    let offset = normal1.into_inner() * WITNESS_OFFSET;
    let (proj1, feature1) = g1.project_local_point_and_get_feature(&(p1 + offset));
    let (proj2, feature2) =
        g2.project_local_point_and_get_feature(&pos12.inverse_transform_point(&(p2 - offset)));

    let core1 = proj1.point;
    let core2 = pos12 * proj2.point;
    let dist = normal1.dot(&(core2 - core1));

    DistanceResult::new(
        dist - margin1 - margin2,
        core1 + normal1.into_inner() * margin1,
        core2 - normal1.into_inner() * margin2,
        *normal1,
        feature1,
        feature2,
    )
}

/// Approximate closest points between two convex shapes, in the local frame of `g1`.
fn closest_points_support_map_support_map<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
) -> (Point<Real>, Point<Real>, UnitVector<Real>)
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let center_dir = Unit::try_new(
        pos12 * g2.local_interior_point() - g1.local_interior_point(),
        DEFAULT_EPSILON,
    )
    .unwrap_or_else(Vector::x_axis);

    let mut simplex = VoronoiSimplex::new();
    simplex.reset(CSOPoint::from_shapes_toward(pos12, g1, g2, &center_dir));

    match gjk::closest_points(pos12, g1, g2, &mut simplex) {
        GJKResult::ClosestPoints(p1, p2, dir) => {
            let normal1 = Unit::try_new(p2 - p1, DEFAULT_EPSILON).unwrap_or(dir);
            return (p1, p2, normal1);
        }
        GJKResult::Intersection => {
            if let Some(res) = EPA::new().closest_points(pos12, g1, g2, &simplex) {
                return res;
            }

            log::debug!("EPA failed to converge, falling back to the support planes");
        }
        res => log::debug!(
            "GJK failed to converge ({:?}), falling back to the support planes",
            res
        ),
    }

    // Conservative estimate: the support planes along the direction between
    // the shape centers.
    let p1 = g1.local_support_point_toward(&center_dir);
    let p2 = g2.support_point_toward(pos12, &-center_dir);
    (p1, p2, center_dir)
}
