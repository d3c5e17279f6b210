use crate::math::{Isometry, Real, Vector};
use crate::query::distance::distance_support_map_support_map;
use crate::query::pairwise::{cast_with_time_of_impact, time_of_impact_support_maps};
use crate::query::sat;
use crate::query::{CastError, CastOptions, CastResult, DistanceResult, PointQuery};
use crate::shape::{Cuboid, SupportMap};

/// Offset applied to the penetration witnesses before retrieving their features.
const FEATURE_OFFSET: Real = 1.0e-4;

/// Distance between two cuboids.
///
/// Penetrations are resolved with the separating axis theorem, on the 15
/// candidate axes of the pair. Separated cuboids go through the generic
/// support-mapping solver.
pub fn distance_cuboid_cuboid(
    pos1: &Isometry<Real>,
    cuboid1: &Cuboid,
    pos2: &Isometry<Real>,
    cuboid2: &Cuboid,
) -> DistanceResult {
    let pos12 = pos1.inv_mul(pos2);
    let (separation, normal1) =
        sat::cuboid_cuboid_find_best_separating_axis(cuboid1, cuboid2, &pos12);

    if separation > 0.0 {
        return distance_support_map_support_map(pos1, cuboid1, 0.0, pos2, cuboid2, 0.0);
    }

    // The deepest point of `cuboid2` along the axis, and its image on the
    // support plane of `cuboid1`.
    let p2 = pos12
        * cuboid2.local_support_point(&pos12.inverse_transform_vector(&-normal1.into_inner()));
    let p1 = p2 - *normal1 * separation;

    let offset = *normal1 * FEATURE_OFFSET;
    let (_, feature1) = cuboid1.project_local_point_and_get_feature(&(p1 + offset));
    let (_, feature2) =
        cuboid2.project_local_point_and_get_feature(&pos12.inverse_transform_point(&(p2 - offset)));

    DistanceResult::new(separation, p1, p2, normal1, feature1, feature2).transform_by(pos1)
}

/// Casts `cuboid1` along `vel` against `cuboid2`.
pub fn cast_cuboid_cuboid(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    cuboid1: &Cuboid,
    pos2: &Isometry<Real>,
    cuboid2: &Cuboid,
    options: &CastOptions,
) -> Result<Option<CastResult>, CastError> {
    cast_with_time_of_impact(
        pos1,
        vel,
        |pos1| distance_cuboid_cuboid(pos1, cuboid1, pos2, cuboid2),
        |dir, length| {
            time_of_impact_support_maps(pos1, cuboid1, pos2, cuboid2, dir, length, options)
        },
    )
}

#[cfg(test)]
mod test {
    use super::{cast_cuboid_cuboid, distance_cuboid_cuboid};
    use crate::math::{Isometry, Real, Vector};
    use crate::query::CastOptions;
    use crate::shape::{Cuboid, FeatureId};

    #[test]
    fn resting_cuboids_penetrate_along_the_face_normal() {
        let c1 = Cuboid::new(Vector::repeat(1.0));
        let c2 = Cuboid::new(Vector::repeat(0.5));
        let pos2 = Isometry::translation(0.2, 1.3, -0.1);

        let res = distance_cuboid_cuboid(&Isometry::identity(), &c1, &pos2, &c2);
        assert_relative_eq!(res.distance, -0.2, epsilon = 1.0e-5);
        assert_relative_eq!(res.normal1.into_inner(), Vector::y(), epsilon = 1.0e-5);
        assert_relative_eq!(res.normal2.into_inner(), -Vector::y(), epsilon = 1.0e-5);
        assert_relative_eq!(res.point1.y, 1.0, epsilon = 1.0e-5);
        assert_relative_eq!(res.point2.y, 0.8, epsilon = 1.0e-5);
        assert!(matches!(res.feature1, FeatureId::Face(_)));
    }

    #[test]
    fn world_space_penetration_with_rotation() {
        let c = Cuboid::new(Vector::repeat(1.0));
        let pos1 = Isometry::new(Vector::new(10.0, 0.0, 0.0), Vector::y() * 0.5);
        let pos2 = pos1 * Isometry::translation(0.0, 0.0, 1.9);

        let res = distance_cuboid_cuboid(&pos1, &c, &pos2, &c);
        assert_relative_eq!(res.distance, -0.1, epsilon = 1.0e-5);
        assert_relative_eq!(res.normal1.into_inner(), pos1 * Vector::z(), epsilon = 1.0e-5);
    }

    #[test]
    fn separated_cuboids() {
        let c = Cuboid::new(Vector::repeat(1.0));
        let res = distance_cuboid_cuboid(
            &Isometry::identity(),
            &c,
            &Isometry::new(Vector::new(0.0, 0.0, 4.0), Vector::x() * 0.1),
            &c,
        );

        let lowest = 4.0 - (0.1 as Real).cos() - (0.1 as Real).sin();
        assert_relative_eq!(res.distance, lowest - 1.0, epsilon = 1.0e-3);
        assert_relative_eq!(res.normal1.into_inner(), Vector::z(), epsilon = 1.0e-3);
    }

    #[test]
    fn cuboid_cast_head_on() {
        let c = Cuboid::new(Vector::repeat(1.0));
        let hit = cast_cuboid_cuboid(
            &Isometry::translation(-5.0, 0.0, 0.0),
            &Vector::new(5.0, 0.0, 0.0),
            &c,
            &Isometry::identity(),
            &c,
            &CastOptions::default(),
        )
        .unwrap()
        .unwrap();

        assert_relative_eq!(hit.distance, 3.0, epsilon = 1.0e-3);
        assert_relative_eq!(hit.point.x, -1.0, epsilon = 1.0e-3);
        assert_relative_eq!(hit.normal2.into_inner(), -Vector::x(), epsilon = 1.0e-3);
    }
}
