//! Routing of queries between two arbitrary shapes.
//!
//! Pairs are always solved in the canonical order given by
//! [`ShapeType`](crate::shape::ShapeType): when the first shape has the
//! greater type, the query is solved with the shapes swapped and its result
//! flipped (distances) or reversed (casts).
//! Combinations without a solver fail closed: they never report a hit.

use na::Unit;

use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use crate::query::composite;
use crate::query::pairwise::*;
use crate::query::{CastError, CastOptions, CastResult, DistanceResult, FaultPolicy};
use crate::shape::Shape;

/// Computes the signed distance between two shapes.
///
/// Returns `true` as first element if the distance is smaller than or equal
/// to `max_dist`. The distance result is always the true distance, even when
/// it exceeds `max_dist`. Combinations without a solver (a triangle mesh or
/// heightfield against another one) return `false` with an infinite distance.
pub fn distance_between(
    pos1: &Isometry<Real>,
    g1: &Shape,
    pos2: &Isometry<Real>,
    g2: &Shape,
    max_dist: Real,
) -> (bool, DistanceResult) {
    let res = shape_distance(pos1, g1, pos2, g2, max_dist);
    (is_within(&res, max_dist), res)
}

/// Sweeps `g1` in a straight line from `pos1` until its origin reaches
/// `end_position`, and returns its first contact with `g2`.
///
/// Uses the default [`CastOptions`].
pub fn collider_cast(
    pos1: &Isometry<Real>,
    end_position: &Point<Real>,
    g1: &Shape,
    pos2: &Isometry<Real>,
    g2: &Shape,
) -> Result<Option<CastResult>, CastError> {
    collider_cast_with_options(pos1, end_position, g1, pos2, g2, &CastOptions::default())
}

/// Sweeps `g1` in a straight line from `pos1` until its origin reaches
/// `end_position`, and returns its first contact with `g2`.
///
/// Returns `Ok(None)` if the shapes never touch during the sweep, or if they
/// already touch at the start placement. A numerical fault of the sweep
/// solver is either returned or turned into `Ok(None)` depending on
/// `options.fault_policy`.
pub fn collider_cast_with_options(
    pos1: &Isometry<Real>,
    end_position: &Point<Real>,
    g1: &Shape,
    pos2: &Isometry<Real>,
    g2: &Shape,
    options: &CastOptions,
) -> Result<Option<CastResult>, CastError> {
    let vel = end_position - Point::from(pos1.translation.vector);

    match shape_cast(pos1, &vel, g1, pos2, g2, options) {
        Ok(hit) => Ok(hit),
        Err(err) => match options.fault_policy {
            FaultPolicy::Propagate => {
                log::error!(
                    "{:?} cast against {:?}: {}",
                    g1.shape_type(),
                    g2.shape_type(),
                    err
                );
                Err(err)
            }
            FaultPolicy::TreatAsMiss => {
                log::warn!(
                    "{:?} cast against {:?} treated as a miss: {}",
                    g1.shape_type(),
                    g2.shape_type(),
                    err
                );
                Ok(None)
            }
        },
    }
}

/// Calls `callback` once for each sub-shape of `g1` within `max_dist` of
/// `g2`, in ascending sub-shape order.
///
/// The sub-shape index is reported as `sub_shape1`. A primitive `g1` is its
/// own single sub-shape, with index 0.
pub fn distance_between_all(
    pos1: &Isometry<Real>,
    g1: &Shape,
    pos2: &Isometry<Real>,
    g2: &Shape,
    max_dist: Real,
    mut callback: impl FnMut(&DistanceResult),
) {
    match g1 {
        Shape::Compound(c) => {
            composite::distance_all_compound_shape(pos1, c, pos2, g2, max_dist, &mut callback)
        }
        Shape::TriMesh(t) => {
            composite::distance_all_triangle_set_shape(pos1, t, pos2, g2, max_dist, &mut callback)
        }
        Shape::HeightField(h) => {
            composite::distance_all_triangle_set_shape(pos1, h, pos2, g2, max_dist, &mut callback)
        }
        _ => {
            let res = shape_distance(pos1, g1, pos2, g2, max_dist);

            if is_within(&res, max_dist) {
                callback(&res);
            }
        }
    }
}

/// Whether `res` measured something within `max_dist`.
///
/// An infinite distance is never within reach, whatever `max_dist` is.
pub(crate) fn is_within(res: &DistanceResult, max_dist: Real) -> bool {
    res.distance < Real::MAX && res.distance <= max_dist
}

/// Distance between two shapes, in any order.
///
/// `max_dist` only helps composite shapes to narrow their search.
pub(crate) fn shape_distance(
    pos1: &Isometry<Real>,
    g1: &Shape,
    pos2: &Isometry<Real>,
    g2: &Shape,
    max_dist: Real,
) -> DistanceResult {
    if g1.shape_type() > g2.shape_type() {
        shape_distance_canonical(pos2, g2, pos1, g1, max_dist).flipped()
    } else {
        shape_distance_canonical(pos1, g1, pos2, g2, max_dist)
    }
}

fn shape_distance_canonical(
    pos1: &Isometry<Real>,
    g1: &Shape,
    pos2: &Isometry<Real>,
    g2: &Shape,
    max_dist: Real,
) -> DistanceResult {
    match (g1, g2) {
        (Shape::Ball(a), Shape::Ball(b)) => distance_ball_ball(pos1, a, pos2, b),
        (Shape::Ball(a), Shape::Capsule(b)) => distance_ball_capsule(pos1, a, pos2, b),
        (Shape::Ball(a), Shape::ConvexPolyhedron(b)) => distance_ball_convex(pos1, a, pos2, b),
        (Shape::Ball(a), Shape::Cuboid(b)) => distance_ball_cuboid(pos1, a, pos2, b),
        (Shape::Ball(a), Shape::Triangle(b)) => distance_ball_triangle(pos1, a, pos2, b),
        (Shape::Capsule(a), Shape::Capsule(b)) => distance_capsule_capsule(pos1, a, pos2, b),
        (Shape::Capsule(a), Shape::ConvexPolyhedron(b)) => {
            distance_capsule_convex(pos1, a, pos2, b)
        }
        (Shape::Capsule(a), Shape::Cuboid(b)) => distance_capsule_cuboid(pos1, a, pos2, b),
        (Shape::Capsule(a), Shape::Triangle(b)) => distance_capsule_triangle(pos1, a, pos2, b),
        (Shape::ConvexPolyhedron(a), Shape::ConvexPolyhedron(b)) => {
            distance_convex_convex(pos1, a, pos2, b)
        }
        (Shape::ConvexPolyhedron(a), Shape::Cuboid(b)) => distance_convex_cuboid(pos1, a, pos2, b),
        (Shape::ConvexPolyhedron(a), Shape::Triangle(b)) => {
            distance_convex_triangle(pos1, a, pos2, b)
        }
        (Shape::Cuboid(a), Shape::Cuboid(b)) => distance_cuboid_cuboid(pos1, a, pos2, b),
        (Shape::Cuboid(a), Shape::Triangle(b)) => distance_cuboid_triangle(pos1, a, pos2, b),
        (Shape::Triangle(a), Shape::Triangle(b)) => distance_triangle_triangle(pos1, a, pos2, b),
        // Compounds are expanded before triangle sets.
        (Shape::Compound(a), Shape::TriMesh(_) | Shape::HeightField(_)) => {
            composite::distance_shape_compound(pos2, g2, pos1, a, max_dist).flipped()
        }
        (_, Shape::Compound(b)) => composite::distance_shape_compound(pos1, g1, pos2, b, max_dist),
        (_, Shape::TriMesh(b)) if !g1.is_composite() => {
            composite::distance_shape_triangle_set(pos1, g1, pos2, b, max_dist)
        }
        (_, Shape::HeightField(b)) if !g1.is_composite() => {
            composite::distance_shape_triangle_set(pos1, g1, pos2, b, max_dist)
        }
        _ => {
            log::debug!(
                "no distance solver between {:?} and {:?}",
                g1.shape_type(),
                g2.shape_type()
            );
            DistanceResult::infinite()
        }
    }
}

/// Cast of `g1` along `vel` against `g2`, in any order.
pub(crate) fn shape_cast(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    g1: &Shape,
    pos2: &Isometry<Real>,
    g2: &Shape,
    options: &CastOptions,
) -> Result<Option<CastResult>, CastError> {
    if g1.shape_type() > g2.shape_type() {
        // `g1` moving along `vel` is `g2` moving along `-vel`, shifted by the traveled distance.
        let dir = match Unit::try_new(*vel, DEFAULT_EPSILON) {
            Some(dir) => dir,
            None => return Ok(None),
        };
        let hit = shape_cast_canonical(pos2, &-vel, g2, pos1, g1, options)?;
        Ok(hit.map(|hit| hit.reversed(&dir)))
    } else {
        shape_cast_canonical(pos1, vel, g1, pos2, g2, options)
    }
}

fn shape_cast_canonical(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    g1: &Shape,
    pos2: &Isometry<Real>,
    g2: &Shape,
    options: &CastOptions,
) -> Result<Option<CastResult>, CastError> {
    match (g1, g2) {
        (Shape::Ball(a), Shape::Ball(b)) => cast_ball_ball(pos1, vel, a, pos2, b),
        (Shape::Ball(a), Shape::Capsule(b)) => cast_ball_capsule(pos1, vel, a, pos2, b),
        (Shape::Ball(a), Shape::ConvexPolyhedron(b)) => cast_ball_convex(pos1, vel, a, pos2, b),
        (Shape::Ball(a), Shape::Cuboid(b)) => cast_ball_cuboid(pos1, vel, a, pos2, b),
        (Shape::Ball(a), Shape::Triangle(b)) => cast_ball_triangle(pos1, vel, a, pos2, b),
        (Shape::Capsule(a), Shape::Capsule(b)) => cast_capsule_capsule(pos1, vel, a, pos2, b),
        (Shape::Capsule(a), Shape::ConvexPolyhedron(b)) => {
            cast_capsule_convex(pos1, vel, a, pos2, b, options)
        }
        (Shape::Capsule(a), Shape::Cuboid(b)) => {
            cast_capsule_cuboid(pos1, vel, a, pos2, b, options)
        }
        (Shape::Capsule(a), Shape::Triangle(b)) => {
            cast_capsule_triangle(pos1, vel, a, pos2, b, options)
        }
        (Shape::ConvexPolyhedron(a), Shape::ConvexPolyhedron(b)) => {
            cast_convex_convex(pos1, vel, a, pos2, b, options)
        }
        (Shape::ConvexPolyhedron(a), Shape::Cuboid(b)) => {
            cast_convex_cuboid(pos1, vel, a, pos2, b, options)
        }
        (Shape::ConvexPolyhedron(a), Shape::Triangle(b)) => {
            cast_convex_triangle(pos1, vel, a, pos2, b, options)
        }
        (Shape::Cuboid(a), Shape::Cuboid(b)) => cast_cuboid_cuboid(pos1, vel, a, pos2, b, options),
        (Shape::Cuboid(a), Shape::Triangle(b)) => {
            cast_cuboid_triangle(pos1, vel, a, pos2, b, options)
        }
        (Shape::Triangle(a), Shape::Triangle(b)) => {
            cast_triangle_triangle(pos1, vel, a, pos2, b, options)
        }
        // Compounds are expanded before triangle sets.
        (Shape::Compound(a), Shape::TriMesh(_) | Shape::HeightField(_)) => {
            let dir = match Unit::try_new(*vel, DEFAULT_EPSILON) {
                Some(dir) => dir,
                None => return Ok(None),
            };
            let hit = composite::cast_shape_compound(pos2, &-vel, g2, pos1, a, options)?;
            Ok(hit.map(|hit| hit.reversed(&dir)))
        }
        (_, Shape::Compound(b)) => composite::cast_shape_compound(pos1, vel, g1, pos2, b, options),
        (_, Shape::TriMesh(b)) if !g1.is_composite() => {
            composite::cast_shape_triangle_set(pos1, vel, g1, pos2, b, options)
        }
        (_, Shape::HeightField(b)) if !g1.is_composite() => {
            composite::cast_shape_triangle_set(pos1, vel, g1, pos2, b, options)
        }
        _ => {
            log::debug!(
                "no cast solver between {:?} and {:?}",
                g1.shape_type(),
                g2.shape_type()
            );
            Ok(None)
        }
    }
}
