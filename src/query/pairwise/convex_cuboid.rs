use crate::math::{Isometry, Real, Vector};
use crate::query::distance::distance_support_map_support_map;
use crate::query::pairwise::{cast_with_time_of_impact, time_of_impact_support_maps};
use crate::query::{CastError, CastOptions, CastResult, DistanceResult};
use crate::shape::{ConvexPolyhedron, Cuboid};

/// Distance between a convex polyhedron and a cuboid.
pub fn distance_convex_cuboid(
    pos1: &Isometry<Real>,
    convex: &ConvexPolyhedron,
    pos2: &Isometry<Real>,
    cuboid: &Cuboid,
) -> DistanceResult {
    distance_support_map_support_map(pos1, convex, 0.0, pos2, cuboid, 0.0)
}

/// Casts a convex polyhedron along `vel` against a cuboid.
pub fn cast_convex_cuboid(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    convex: &ConvexPolyhedron,
    pos2: &Isometry<Real>,
    cuboid: &Cuboid,
    options: &CastOptions,
) -> Result<Option<CastResult>, CastError> {
    cast_with_time_of_impact(
        pos1,
        vel,
        |pos1| distance_convex_cuboid(pos1, convex, pos2, cuboid),
        |dir, length| time_of_impact_support_maps(pos1, convex, pos2, cuboid, dir, length, options),
    )
}
