use crate::math::{Isometry, Real, Vector};
use crate::query::distance::distance_support_map_support_map;
use crate::query::pairwise::{cast_with_time_of_impact, time_of_impact_support_maps};
use crate::query::{CastError, CastOptions, CastResult, DistanceResult};
use crate::shape::Triangle;

/// Distance between two triangles.
pub fn distance_triangle_triangle(
    pos1: &Isometry<Real>,
    triangle1: &Triangle,
    pos2: &Isometry<Real>,
    triangle2: &Triangle,
) -> DistanceResult {
    distance_support_map_support_map(pos1, triangle1, 0.0, pos2, triangle2, 0.0)
}

/// Casts a triangle along `vel` against another one.
pub fn cast_triangle_triangle(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    triangle1: &Triangle,
    pos2: &Isometry<Real>,
    triangle2: &Triangle,
    options: &CastOptions,
) -> Result<Option<CastResult>, CastError> {
    cast_with_time_of_impact(
        pos1,
        vel,
        |pos1| distance_triangle_triangle(pos1, triangle1, pos2, triangle2),
        |dir, length| {
            time_of_impact_support_maps(pos1, triangle1, pos2, triangle2, dir, length, options)
        },
    )
}
