use crate::math::{Isometry, Real, Vector};
use crate::query::distance::distance_ball_point_query;
use crate::query::pairwise::{cast_with_time_of_impact, time_of_impact_ball_support_map};
use crate::query::{CastError, CastResult, DistanceResult};
use crate::shape::{Ball, Cuboid};

/// Distance between a ball and a cuboid.
#[inline]
pub fn distance_ball_cuboid(
    pos1: &Isometry<Real>,
    ball: &Ball,
    pos2: &Isometry<Real>,
    cuboid: &Cuboid,
) -> DistanceResult {
    distance_ball_point_query(pos1, ball, pos2, cuboid)
}

/// Casts a ball along `vel` against a cuboid.
pub fn cast_ball_cuboid(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    ball: &Ball,
    pos2: &Isometry<Real>,
    cuboid: &Cuboid,
) -> Result<Option<CastResult>, CastError> {
    cast_with_time_of_impact(
        pos1,
        vel,
        |pos1| distance_ball_cuboid(pos1, ball, pos2, cuboid),
        |dir, length| {
            Ok(time_of_impact_ball_support_map(
                pos1,
                ball.radius,
                pos2,
                cuboid,
                dir,
                length,
            ))
        },
    )
}

#[cfg(test)]
mod test {
    use super::{cast_ball_cuboid, distance_ball_cuboid};
    use crate::math::{Isometry, Point, Real, Vector};
    use crate::shape::{Ball, Cuboid, FeatureId};

    #[test]
    fn ball_near_cuboid_corner() {
        let res = distance_ball_cuboid(
            &Isometry::translation(2.0, 2.0, 2.0),
            &Ball::new(0.5),
            &Isometry::identity(),
            &Cuboid::new(Vector::repeat(1.0)),
        );

        assert_relative_eq!(res.distance, (3.0 as Real).sqrt() - 0.5, epsilon = 1.0e-5);
        assert_relative_eq!(res.point2, Point::new(1.0, 1.0, 1.0), epsilon = 1.0e-6);
        assert_eq!(res.feature2, FeatureId::Vertex(7));
    }

    #[test]
    fn ball_cast_on_rotated_cuboid() {
        let pos2 = Isometry::new(Vector::zeros(), Vector::y() * 0.3);
        let hit = cast_ball_cuboid(
            &Isometry::translation(0.0, 5.0, 0.0),
            &Vector::new(0.0, -10.0, 0.0),
            &Ball::new(0.5),
            &pos2,
            &Cuboid::new(Vector::repeat(1.0)),
        )
        .unwrap()
        .unwrap();

        assert_relative_eq!(hit.distance, 3.5, epsilon = 1.0e-3);
        assert_relative_eq!(hit.normal2.into_inner(), Vector::y(), epsilon = 1.0e-3);
    }
}
