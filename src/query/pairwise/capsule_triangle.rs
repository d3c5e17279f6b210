use na::Unit;

use crate::math::{Isometry, Real, Vector, DEFAULT_EPSILON};
use crate::query::closest_points::closest_points_segment_triangle;
use crate::query::distance::distance_support_map_support_map;
use crate::query::pairwise::{
    cast_with_time_of_impact, segment_feature, time_of_impact_support_maps, triangle_feature,
};
use crate::query::{CastError, CastOptions, CastResult, DistanceResult};
use crate::shape::{Capsule, Triangle};

/// Distance between a capsule and a triangle.
///
/// The core segment is moved into the triangle frame and solved in closed
/// form. When the segment pierces the triangle the penetration is left to
/// the support-mapping solver.
pub fn distance_capsule_triangle(
    pos1: &Isometry<Real>,
    capsule: &Capsule,
    pos2: &Isometry<Real>,
    triangle: &Triangle,
) -> DistanceResult {
    if !triangle.is_affinely_dependent() {
        let pos21 = pos2.inv_mul(pos1);
        let seg = capsule.segment.transformed(&pos21);
        let (p1, p2, seg_loc, tri_loc) = closest_points_segment_triangle(&seg, triangle);

        if let Some((normal1, dist)) = Unit::try_new_and_get(p2 - p1, DEFAULT_EPSILON) {
            return DistanceResult::new(
                dist - capsule.radius,
                p1 + *normal1 * capsule.radius,
                p2,
                normal1,
                segment_feature(&seg_loc),
                triangle_feature(&tri_loc),
            )
            .transform_by(pos2);
        }
    }

    distance_support_map_support_map(pos1, &capsule.segment, capsule.radius, pos2, triangle, 0.0)
}

/// Casts a capsule along `vel` against a triangle.
pub fn cast_capsule_triangle(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    capsule: &Capsule,
    pos2: &Isometry<Real>,
    triangle: &Triangle,
    options: &CastOptions,
) -> Result<Option<CastResult>, CastError> {
    cast_with_time_of_impact(
        pos1,
        vel,
        |pos1| distance_capsule_triangle(pos1, capsule, pos2, triangle),
        |dir, length| {
            time_of_impact_support_maps(pos1, capsule, pos2, triangle, dir, length, options)
        },
    )
}
