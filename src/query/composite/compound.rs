use crate::math::{Isometry, Real, Vector};
use crate::query::composite::Best;
use crate::query::dispatch;
use crate::query::{CastError, CastOptions, CastResult, DistanceResult};
use crate::shape::{Compound, Shape};

/// Distance between any shape and a compound.
///
/// Parts are visited in order and pruned with their AABB against the running
/// best. The result is tagged with the index of the closest part.
pub fn distance_shape_compound(
    pos1: &Isometry<Real>,
    g1: &Shape,
    pos2: &Isometry<Real>,
    compound: &Compound,
    max_dist: Real,
) -> DistanceResult {
    let aabb1 = g1.compute_aabb(&pos2.inv_mul(pos1));
    let mut best = Best::new();

    for (i, ((delta, part), part_aabb)) in
        compound.parts().iter().zip(compound.aabbs()).enumerate()
    {
        if part_aabb.distance_to_aabb(&aabb1) >= best.bound() {
            continue;
        }

        let part_pos = pos2 * delta;
        let mut res = dispatch::shape_distance(
            pos1,
            g1,
            &part_pos,
            part,
            max_dist.min(best.bound()),
        );
        res.sub_shape2 = i as u32;
        let _ = best.offer(res);
    }

    best.into_inner().unwrap_or_else(DistanceResult::infinite)
}

/// Casts any shape along `vel` against a compound.
///
/// The whole compound is first checked for an overlap at the start placement.
/// The earliest impact among the parts is tagged with the index of its part.
pub fn cast_shape_compound(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    g1: &Shape,
    pos2: &Isometry<Real>,
    compound: &Compound,
    options: &CastOptions,
) -> Result<Option<CastResult>, CastError> {
    if distance_shape_compound(pos1, g1, pos2, compound, 0.0).distance <= 0.0 {
        return Ok(None);
    }

    let swept_aabb1 = g1
        .compute_aabb(&pos2.inv_mul(pos1))
        .swept(&pos2.inverse_transform_vector(vel));
    let mut best = Best::new();

    for (i, ((delta, part), part_aabb)) in
        compound.parts().iter().zip(compound.aabbs()).enumerate()
    {
        if !part_aabb.intersects(&swept_aabb1) {
            continue;
        }

        if let Some(mut hit) = dispatch::shape_cast(
            pos1,
            vel,
            g1,
            &(pos2 * delta),
            part,
            options,
        )? {
            hit.sub_shape2 = i as u32;
            let _ = best.offer(hit);
        }
    }

    Ok(best.into_inner())
}

/// Calls `f` with the distance between each part of `compound` and `g2`, for
/// every part within `max_dist`, in ascending part order.
pub fn distance_all_compound_shape(
    pos1: &Isometry<Real>,
    compound: &Compound,
    pos2: &Isometry<Real>,
    g2: &Shape,
    max_dist: Real,
    f: &mut dyn FnMut(&DistanceResult),
) {
    for (i, (delta, part)) in compound.parts().iter().enumerate() {
        let mut res = dispatch::shape_distance(&(pos1 * delta), part, pos2, g2, max_dist);

        if dispatch::is_within(&res, max_dist) {
            res.sub_shape1 = i as u32;
            f(&res);
        }
    }
}
