use crate::math::{Isometry, Real, Vector};
use crate::query::distance::distance_support_map_support_map;
use crate::query::pairwise::{cast_with_time_of_impact, time_of_impact_support_maps};
use crate::query::{CastError, CastOptions, CastResult, DistanceResult};
use crate::shape::{Capsule, ConvexPolyhedron};

/// Distance between a capsule and a convex polyhedron.
///
/// The capsule is handled as its core segment dilated by its radius.
pub fn distance_capsule_convex(
    pos1: &Isometry<Real>,
    capsule: &Capsule,
    pos2: &Isometry<Real>,
    convex: &ConvexPolyhedron,
) -> DistanceResult {
    distance_support_map_support_map(pos1, &capsule.segment, capsule.radius, pos2, convex, 0.0)
}

/// Casts a capsule along `vel` against a convex polyhedron.
pub fn cast_capsule_convex(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    capsule: &Capsule,
    pos2: &Isometry<Real>,
    convex: &ConvexPolyhedron,
    options: &CastOptions,
) -> Result<Option<CastResult>, CastError> {
    cast_with_time_of_impact(
        pos1,
        vel,
        |pos1| distance_capsule_convex(pos1, capsule, pos2, convex),
        |dir, length| {
            time_of_impact_support_maps(pos1, capsule, pos2, convex, dir, length, options)
        },
    )
}
