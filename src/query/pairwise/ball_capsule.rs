use na::Unit;

use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use crate::query::pairwise::{cast_with_time_of_impact, segment_feature};
use crate::query::ray::ray_toi_with_capsule;
use crate::query::{CastError, CastResult, DistanceResult, PointQueryWithLocation, Ray};
use crate::shape::{Ball, Capsule, FeatureId};
use crate::utils;

/// Distance between a ball and a capsule.
///
/// The ball center is projected on the capsule's core segment, which reduces
/// the query to a distance between two balls.
pub fn distance_ball_capsule(
    pos1: &Isometry<Real>,
    ball: &Ball,
    pos2: &Isometry<Real>,
    capsule: &Capsule,
) -> DistanceResult {
    let center = pos2.inverse_transform_point(&Point::from(pos1.translation.vector));
    let (proj, location) = capsule
        .segment
        .project_local_point_and_get_location(&center, true);
    let delta = proj.point - center;

    let (normal1, dist) = match Unit::try_new_and_get(delta, DEFAULT_EPSILON) {
        Some(res) => res,
        // The center is on the core segment: any direction orthogonal to it works.
        None => match capsule.segment.direction() {
            Some(axis) => (utils::any_orthogonal_unit(&axis), 0.0),
            None => (Vector::x_axis(), 0.0),
        },
    };

    DistanceResult::new(
        dist - ball.radius - capsule.radius,
        center + *normal1 * ball.radius,
        proj.point - *normal1 * capsule.radius,
        normal1,
        FeatureId::Face(0),
        segment_feature(&location),
    )
    .transform_by(pos2)
}

/// Casts a ball along `vel` against a capsule.
pub fn cast_ball_capsule(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    ball: &Ball,
    pos2: &Isometry<Real>,
    capsule: &Capsule,
) -> Result<Option<CastResult>, CastError> {
    cast_with_time_of_impact(
        pos1,
        vel,
        |pos1| distance_ball_capsule(pos1, ball, pos2, capsule),
        |dir, _| {
            let ray = Ray::new(Point::from(pos1.translation.vector), dir.into_inner())
                .inverse_transform_by(pos2);
            let inflated = Capsule {
                segment: capsule.segment,
                radius: capsule.radius + ball.radius,
            };
            Ok(ray_toi_with_capsule(&inflated, &ray))
        },
    )
}
