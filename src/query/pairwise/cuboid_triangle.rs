use crate::math::{Isometry, Real, Vector};
use crate::query::distance::distance_support_map_support_map;
use crate::query::pairwise::{cast_with_time_of_impact, time_of_impact_support_maps};
use crate::query::{CastError, CastOptions, CastResult, DistanceResult};
use crate::shape::{Cuboid, Triangle};

/// Distance between a cuboid and a triangle.
pub fn distance_cuboid_triangle(
    pos1: &Isometry<Real>,
    cuboid: &Cuboid,
    pos2: &Isometry<Real>,
    triangle: &Triangle,
) -> DistanceResult {
    distance_support_map_support_map(pos1, cuboid, 0.0, pos2, triangle, 0.0)
}

/// Casts a cuboid along `vel` against a triangle.
pub fn cast_cuboid_triangle(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    cuboid: &Cuboid,
    pos2: &Isometry<Real>,
    triangle: &Triangle,
    options: &CastOptions,
) -> Result<Option<CastResult>, CastError> {
    cast_with_time_of_impact(
        pos1,
        vel,
        |pos1| distance_cuboid_triangle(pos1, cuboid, pos2, triangle),
        |dir, length| {
            time_of_impact_support_maps(pos1, cuboid, pos2, triangle, dir, length, options)
        },
    )
}
