use na::{ComplexField, Unit};
use num::Zero;

use crate::math::{Isometry, Point, Real, Vector};
use crate::query::pairwise::cast_with_time_of_impact;
use crate::query::ray::ray_toi_with_ball;
use crate::query::{CastError, CastResult, DistanceResult, Ray};
use crate::shape::{Ball, FeatureId};

/// Distance between balls.
///
/// Coincident centers yield the `x` axis as normal.
#[inline]
pub fn distance_ball_ball(
    pos1: &Isometry<Real>,
    b1: &Ball,
    pos2: &Isometry<Real>,
    b2: &Ball,
) -> DistanceResult {
    let center1 = Point::from(pos1.translation.vector);
    let center2 = Point::from(pos2.translation.vector);
    let delta = center2 - center1;
    let distance_squared = delta.norm_squared();

    let normal1 = if !distance_squared.is_zero() {
        Unit::new_normalize(delta)
    } else {
        Vector::x_axis()
    };

    DistanceResult::new(
        ComplexField::sqrt(distance_squared) - b1.radius - b2.radius,
        center1 + *normal1 * b1.radius,
        center2 - *normal1 * b2.radius,
        normal1,
        FeatureId::Face(0),
        FeatureId::Face(0),
    )
}

/// Casts the ball `b1` along `vel` against the ball `b2`.
pub fn cast_ball_ball(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    b1: &Ball,
    pos2: &Isometry<Real>,
    b2: &Ball,
) -> Result<Option<CastResult>, CastError> {
    cast_with_time_of_impact(
        pos1,
        vel,
        |pos1| distance_ball_ball(pos1, b1, pos2, b2),
        |dir, _| {
            let ray = Ray::new(Point::from(pos1.translation.vector), dir.into_inner());
            let center2 = Point::from(pos2.translation.vector);
            Ok(ray_toi_with_ball(&center2, b1.radius + b2.radius, &ray))
        },
    )
}

#[cfg(test)]
mod test {
    use super::{cast_ball_ball, distance_ball_ball};
    use crate::math::{Isometry, Point, Vector};
    use crate::shape::Ball;

    #[test]
    fn separated_balls() {
        let b = Ball::new(1.0);
        let res = distance_ball_ball(
            &Isometry::identity(),
            &b,
            &Isometry::translation(3.0, 0.0, 0.0),
            &b,
        );

        assert_relative_eq!(res.distance, 1.0);
        assert_relative_eq!(res.point1, Point::new(1.0, 0.0, 0.0));
        assert_relative_eq!(res.point2, Point::new(2.0, 0.0, 0.0));
        assert_relative_eq!(res.normal1.into_inner(), Vector::x());
        assert_relative_eq!(res.normal2.into_inner(), -Vector::x());
    }

    #[test]
    fn coincident_balls() {
        let pos = Isometry::translation(1.0, 2.0, 3.0);
        let res = distance_ball_ball(&pos, &Ball::new(1.0), &pos, &Ball::new(0.5));

        assert_relative_eq!(res.distance, -1.5);
        assert_eq!(res.normal1, Vector::x_axis());
        assert_eq!(res, distance_ball_ball(&pos, &Ball::new(1.0), &pos, &Ball::new(0.5)));
    }

    #[test]
    fn ball_cast_hits_and_misses() {
        let b = Ball::new(0.5);
        let pos1 = Isometry::identity();
        let pos2 = Isometry::translation(4.0, 0.0, 0.0);

        let hit = cast_ball_ball(&pos1, &Vector::new(10.0, 0.0, 0.0), &b, &pos2, &b)
            .unwrap()
            .unwrap();
        assert_relative_eq!(hit.distance, 3.0, epsilon = 1.0e-5);
        assert_relative_eq!(hit.point, Point::new(3.5, 0.0, 0.0), epsilon = 1.0e-5);
        assert_relative_eq!(hit.normal1.into_inner(), Vector::x(), epsilon = 1.0e-5);

        let short = cast_ball_ball(&pos1, &Vector::new(2.0, 0.0, 0.0), &b, &pos2, &b).unwrap();
        assert!(short.is_none());

        let overlapping = Isometry::translation(3.5, 0.0, 0.0);
        let start = cast_ball_ball(&overlapping, &Vector::x(), &b, &pos2, &b).unwrap();
        assert!(start.is_none());
    }
}
