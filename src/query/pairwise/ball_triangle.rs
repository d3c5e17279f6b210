use crate::math::{Isometry, Real, Vector};
use crate::query::distance::distance_ball_point_query;
use crate::query::pairwise::{cast_with_time_of_impact, time_of_impact_ball_support_map};
use crate::query::{CastError, CastResult, DistanceResult};
use crate::shape::{Ball, Triangle};

/// Distance between a ball and a triangle.
///
/// A ball center lying on the triangle plane yields the front face normal.
#[inline]
pub fn distance_ball_triangle(
    pos1: &Isometry<Real>,
    ball: &Ball,
    pos2: &Isometry<Real>,
    triangle: &Triangle,
) -> DistanceResult {
    distance_ball_point_query(pos1, ball, pos2, triangle)
}

/// Casts a ball along `vel` against a triangle.
pub fn cast_ball_triangle(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    ball: &Ball,
    pos2: &Isometry<Real>,
    triangle: &Triangle,
) -> Result<Option<CastResult>, CastError> {
    cast_with_time_of_impact(
        pos1,
        vel,
        |pos1| distance_ball_triangle(pos1, ball, pos2, triangle),
        |dir, length| {
            Ok(time_of_impact_ball_support_map(
                pos1,
                ball.radius,
                pos2,
                triangle,
                dir,
                length,
            ))
        },
    )
}
