use na::Unit;

use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use crate::query::{DistanceResult, PointQuery};
use crate::shape::{Ball, FeatureId};

/// Distance between a ball and any shape supporting point projection.
///
/// The ball center is moved into the local frame of `shape` and projected
/// on its boundary. If the center lies exactly on the boundary, the normal is
/// deduced from the feature it lies on.
pub fn distance_ball_point_query<G: ?Sized + PointQuery>(
    pos_ball: &Isometry<Real>,
    ball: &Ball,
    pos_shape: &Isometry<Real>,
    shape: &G,
) -> DistanceResult {
    let center = pos_shape.inverse_transform_point(&Point::from(pos_ball.translation.vector));
    let (proj, feature2) = shape.project_local_point_and_get_feature(&center);
    let dpos = center - proj.point;

    let (normal1, dist) = match Unit::try_new_and_get(dpos, DEFAULT_EPSILON) {
        Some((dir, len)) if proj.is_inside => (dir, -len),
        Some((dir, len)) => (-dir, len),
        None => {
            let normal1 = shape
                .feature_normal(feature2)
                .map(|n| -n)
                .unwrap_or_else(Vector::x_axis);
            (normal1, 0.0)
        }
    };

    let point1 = center + *normal1 * ball.radius;

    DistanceResult::new(
        dist - ball.radius,
        point1,
        proj.point,
        normal1,
        FeatureId::Face(0),
        feature2,
    )
    .transform_by(pos_shape)
}

#[cfg(test)]
mod test {
    use super::distance_ball_point_query;
    use crate::math::{Isometry, Point, Vector};
    use crate::shape::{Ball, Cuboid, FeatureId};

    #[test]
    fn ball_outside_and_inside_cuboid() {
        let ball = Ball::new(0.5);
        let cuboid = Cuboid::new(Vector::repeat(1.0));
        let pos2 = Isometry::translation(0.0, 0.0, 1.0);

        let outside = Isometry::translation(3.0, 0.0, 1.0);
        let res = distance_ball_point_query(&outside, &ball, &pos2, &cuboid);
        assert_relative_eq!(res.distance, 1.5, epsilon = 1.0e-6);
        assert_relative_eq!(res.point1, Point::new(2.5, 0.0, 1.0), epsilon = 1.0e-6);
        assert_relative_eq!(res.point2, Point::new(1.0, 0.0, 1.0), epsilon = 1.0e-6);
        assert_relative_eq!(res.normal1.into_inner(), -Vector::x(), epsilon = 1.0e-6);
        assert_eq!(res.feature1, FeatureId::Face(0));

        let inside = Isometry::translation(0.75, 0.0, 1.0);
        let res = distance_ball_point_query(&inside, &ball, &pos2, &cuboid);
        assert_relative_eq!(res.distance, -0.75, epsilon = 1.0e-6);
        assert_relative_eq!(res.normal1.into_inner(), -Vector::x(), epsilon = 1.0e-6);
        assert_relative_eq!(res.normal2.into_inner(), Vector::x(), epsilon = 1.0e-6);
    }

    #[test]
    fn ball_center_on_boundary_uses_the_feature_normal() {
        let ball = Ball::new(0.5);
        let cuboid = Cuboid::new(Vector::repeat(1.0));
        let pos1 = Isometry::translation(0.0, 1.0, 0.0);
        let res = distance_ball_point_query(&pos1, &ball, &Isometry::identity(), &cuboid);

        assert_relative_eq!(res.distance, -0.5, epsilon = 1.0e-6);
        assert_relative_eq!(res.normal2.into_inner(), Vector::y(), epsilon = 1.0e-6);
    }
}
