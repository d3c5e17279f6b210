use na::Unit;

use crate::math::{Isometry, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::query::closest_points::closest_points_segment_segment_with_locations;
use crate::query::gjk::{self, DilatedShape, VoronoiSimplex};
use crate::query::pairwise::{cast_with_time_of_impact, segment_feature};
use crate::query::{CastError, CastResult, DistanceResult};
use crate::shape::{Capsule, Segment};
use crate::utils;

/// Distance between two capsules.
///
/// Solved on the core segments, expressed in the local frame of `capsule1`.
pub fn distance_capsule_capsule(
    pos1: &Isometry<Real>,
    capsule1: &Capsule,
    pos2: &Isometry<Real>,
    capsule2: &Capsule,
) -> DistanceResult {
    let pos12 = pos1.inv_mul(pos2);
    let seg1 = capsule1.segment;
    let seg2 = capsule2.segment.transformed(&pos12);

    let (loc1, loc2) = closest_points_segment_segment_with_locations(&seg1, &seg2);
    let p1 = seg1.point_at(&loc1);
    let p2 = seg2.point_at(&loc2);

    let (normal1, dist) = match Unit::try_new_and_get(p2 - p1, DEFAULT_EPSILON) {
        Some(res) => res,
        None => (crossing_normal(&seg1, &seg2), 0.0),
    };

    DistanceResult::new(
        dist - capsule1.radius - capsule2.radius,
        p1 + *normal1 * capsule1.radius,
        p2 - *normal1 * capsule2.radius,
        normal1,
        segment_feature(&loc1),
        segment_feature(&loc2),
    )
    .transform_by(pos1)
}

/// Normal between two core segments that touch.
///
/// Orthogonal to both segments when possible and oriented from the center of
/// `seg1` toward the center of `seg2`.
fn crossing_normal(seg1: &Segment, seg2: &Segment) -> UnitVector<Real> {
    let dir1 = seg1.scaled_direction();
    let normal = Unit::try_new(dir1.cross(&seg2.scaled_direction()), DEFAULT_EPSILON)
        .or_else(|| Unit::try_new(dir1, DEFAULT_EPSILON).map(|d| utils::any_orthogonal_unit(&d)))
        .unwrap_or_else(Vector::x_axis);

    if normal.dot(&(seg2.center() - seg1.center())) < 0.0 {
        -normal
    } else {
        normal
    }
}

/// Casts `capsule1` along `vel` against `capsule2`.
///
/// The time of impact is a GJK ray cast of the first core segment, dilated
/// by both radii, against the second core segment.
pub fn cast_capsule_capsule(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    capsule1: &Capsule,
    pos2: &Isometry<Real>,
    capsule2: &Capsule,
) -> Result<Option<CastResult>, CastError> {
    cast_with_time_of_impact(
        pos1,
        vel,
        |pos1| distance_capsule_capsule(pos1, capsule1, pos2, capsule2),
        |dir, _| {
            let pos12 = pos1.inv_mul(pos2);
            let local_dir = pos1.inverse_transform_vector(&dir.into_inner());
            let dilated = DilatedShape {
                shape: &capsule1.segment,
                radius: capsule1.radius + capsule2.radius,
            };
            let mut simplex = VoronoiSimplex::new();

            Ok(gjk::directional_distance(
                &pos12,
                &dilated,
                &capsule2.segment,
                &local_dir,
                &mut simplex,
            )
            .map(|(toi, _)| toi))
        },
    )
}
