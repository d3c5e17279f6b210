use crate::math::{Isometry, Real, Vector};
use crate::query::distance::distance_support_map_support_map;
use crate::query::pairwise::{cast_with_time_of_impact, time_of_impact_support_maps};
use crate::query::{CastError, CastOptions, CastResult, DistanceResult};
use crate::shape::ConvexPolyhedron;

/// Distance between two convex polyhedra.
pub fn distance_convex_convex(
    pos1: &Isometry<Real>,
    convex1: &ConvexPolyhedron,
    pos2: &Isometry<Real>,
    convex2: &ConvexPolyhedron,
) -> DistanceResult {
    distance_support_map_support_map(pos1, convex1, 0.0, pos2, convex2, 0.0)
}

/// Casts a convex polyhedron along `vel` against another one.
pub fn cast_convex_convex(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    convex1: &ConvexPolyhedron,
    pos2: &Isometry<Real>,
    convex2: &ConvexPolyhedron,
    options: &CastOptions,
) -> Result<Option<CastResult>, CastError> {
    cast_with_time_of_impact(
        pos1,
        vel,
        |pos1| distance_convex_convex(pos1, convex1, pos2, convex2),
        |dir, length| {
            time_of_impact_support_maps(pos1, convex1, pos2, convex2, dir, length, options)
        },
    )
}
