use crate::math::{Isometry, Real, Vector};
use crate::query::distance::distance_support_map_support_map;
use crate::query::pairwise::{cast_with_time_of_impact, time_of_impact_support_maps};
use crate::query::{CastError, CastOptions, CastResult, DistanceResult};
use crate::shape::{ConvexPolyhedron, Triangle};

/// Distance between a convex polyhedron and a triangle.
pub fn distance_convex_triangle(
    pos1: &Isometry<Real>,
    convex: &ConvexPolyhedron,
    pos2: &Isometry<Real>,
    triangle: &Triangle,
) -> DistanceResult {
    distance_support_map_support_map(pos1, convex, 0.0, pos2, triangle, 0.0)
}

/// Casts a convex polyhedron along `vel` against a triangle.
pub fn cast_convex_triangle(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    convex: &ConvexPolyhedron,
    pos2: &Isometry<Real>,
    triangle: &Triangle,
    options: &CastOptions,
) -> Result<Option<CastResult>, CastError> {
    cast_with_time_of_impact(
        pos1,
        vel,
        |pos1| distance_convex_triangle(pos1, convex, pos2, triangle),
        |dir, length| {
            time_of_impact_support_maps(pos1, convex, pos2, triangle, dir, length, options)
        },
    )
}

#[cfg(test)]
mod test {
    use super::{cast_convex_triangle, distance_convex_triangle};
    use crate::math::{Isometry, Point, Vector};
    use crate::query::CastOptions;
    use crate::shape::{unit_cube, Triangle};

    fn wall() -> Triangle {
        Triangle::new(
            Point::new(0.0, -3.0, -3.0),
            Point::new(0.0, 3.0, -3.0),
            Point::new(0.0, 0.0, 3.0),
        )
    }

    #[test]
    fn hull_in_front_of_wall() {
        let res = distance_convex_triangle(
            &Isometry::translation(-3.0, 0.0, 0.0),
            &unit_cube(),
            &Isometry::identity(),
            &wall(),
        );

        assert_relative_eq!(res.distance, 2.0, epsilon = 1.0e-3);
        assert_relative_eq!(res.normal1.into_inner(), Vector::x(), epsilon = 1.0e-3);
        assert_relative_eq!(res.point2.x, 0.0, epsilon = 1.0e-3);
    }

    #[test]
    fn hull_cast_through_wall() {
        let hit = cast_convex_triangle(
            &Isometry::translation(-3.0, 0.0, 0.0),
            &Vector::new(6.0, 0.0, 0.0),
            &unit_cube(),
            &Isometry::identity(),
            &wall(),
            &CastOptions::default(),
        )
        .unwrap()
        .unwrap();

        assert_relative_eq!(hit.distance, 2.0, epsilon = 1.0e-3);
        assert_relative_eq!(hit.point.x, 0.0, epsilon = 1.0e-3);
    }
}
