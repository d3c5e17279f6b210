use crate::math::{Isometry, Real, Vector};
use crate::query::distance::distance_ball_point_query;
use crate::query::pairwise::{cast_with_time_of_impact, time_of_impact_ball_support_map};
use crate::query::{CastError, CastResult, DistanceResult};
use crate::shape::{Ball, ConvexPolyhedron};

/// Distance between a ball and a convex polyhedron.
#[inline]
pub fn distance_ball_convex(
    pos1: &Isometry<Real>,
    ball: &Ball,
    pos2: &Isometry<Real>,
    convex: &ConvexPolyhedron,
) -> DistanceResult {
    distance_ball_point_query(pos1, ball, pos2, convex)
}

/// Casts a ball along `vel` against a convex polyhedron.
pub fn cast_ball_convex(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    ball: &Ball,
    pos2: &Isometry<Real>,
    convex: &ConvexPolyhedron,
) -> Result<Option<CastResult>, CastError> {
    cast_with_time_of_impact(
        pos1,
        vel,
        |pos1| distance_ball_convex(pos1, ball, pos2, convex),
        |dir, length| {
            Ok(time_of_impact_ball_support_map(
                pos1,
                ball.radius,
                pos2,
                convex,
                dir,
                length,
            ))
        },
    )
}
