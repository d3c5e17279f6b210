//! Specialized distance and cast solvers, one module per canonical pair of shape types.
//!
//! Each module exposes `distance_<a>_<b>` and `cast_<a>_<b>` where `<a>`
//! precedes `<b>` in the [`ShapeType`](crate::shape::ShapeType) order. The
//! first shape of a cast is the one being swept.

pub use self::ball_ball::{cast_ball_ball, distance_ball_ball};
pub use self::ball_capsule::{cast_ball_capsule, distance_ball_capsule};
pub use self::ball_convex::{cast_ball_convex, distance_ball_convex};
pub use self::ball_cuboid::{cast_ball_cuboid, distance_ball_cuboid};
pub use self::ball_triangle::{cast_ball_triangle, distance_ball_triangle};
pub use self::capsule_capsule::{cast_capsule_capsule, distance_capsule_capsule};
pub use self::capsule_convex::{cast_capsule_convex, distance_capsule_convex};
pub use self::capsule_cuboid::{cast_capsule_cuboid, distance_capsule_cuboid};
pub use self::capsule_triangle::{cast_capsule_triangle, distance_capsule_triangle};
pub use self::convex_convex::{cast_convex_convex, distance_convex_convex};
pub use self::convex_cuboid::{cast_convex_cuboid, distance_convex_cuboid};
pub use self::convex_triangle::{cast_convex_triangle, distance_convex_triangle};
pub use self::cuboid_cuboid::{cast_cuboid_cuboid, distance_cuboid_cuboid};
pub use self::cuboid_triangle::{cast_cuboid_triangle, distance_cuboid_triangle};
pub use self::triangle_triangle::{cast_triangle_triangle, distance_triangle_triangle};

mod ball_ball;
mod ball_capsule;
mod ball_convex;
mod ball_cuboid;
mod ball_triangle;
mod capsule_capsule;
mod capsule_convex;
mod capsule_cuboid;
mod capsule_triangle;
mod convex_convex;
mod convex_cuboid;
mod convex_triangle;
mod cuboid_cuboid;
mod cuboid_triangle;
mod triangle_triangle;

use na::Unit;

use crate::math::{Isometry, Real, Translation, UnitVector, Vector, DEFAULT_EPSILON};
use crate::query::{mpr, CastError, CastOptions, CastResult, DistanceResult, PointQuery};
use crate::shape::{FeatureId, SegmentPointLocation, SupportMap, TrianglePointLocation};

/// Runs a cast given the distance query of the pair and a time of impact solver.
///
/// Rejects casts starting in contact, then calls `time_of_impact` with the
/// unit sweep direction and the sweep length. If it finds an impact within
/// the sweep, the contact is described by the distance query at the impact
/// placement.
pub(crate) fn cast_with_time_of_impact(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    distance: impl Fn(&Isometry<Real>) -> DistanceResult,
    time_of_impact: impl FnOnce(&UnitVector<Real>, Real) -> Result<Option<Real>, CastError>,
) -> Result<Option<CastResult>, CastError> {
    if distance(pos1).distance <= 0.0 {
        return Ok(None);
    }

    let (dir, length) = match Unit::try_new_and_get(*vel, DEFAULT_EPSILON) {
        Some(res) => res,
        None => return Ok(None),
    };

    let toi = match time_of_impact(&dir, length)? {
        Some(toi) if toi <= length => toi.max(0.0),
        _ => return Ok(None),
    };

    let impact_pos = Translation::from(dir.into_inner() * toi) * pos1;
    let res = distance(&impact_pos);

    Ok(Some(CastResult {
        distance: toi,
        point: na::center(&res.point1, &res.point2),
        normal1: res.normal1,
        normal2: res.normal2,
        sub_shape1: 0,
        sub_shape2: 0,
    }))
}

/// Time of impact between two support-mapped shapes, with the portal refinement sweep.
pub(crate) fn time_of_impact_support_maps<G1, G2>(
    pos1: &Isometry<Real>,
    g1: &G1,
    pos2: &Isometry<Real>,
    g2: &G2,
    dir: &UnitVector<Real>,
    length: Real,
    options: &CastOptions,
) -> Result<Option<Real>, CastError>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let vel = dir.into_inner() * length;
    Ok(mpr::cast_support_maps(pos1, &vel, g1, pos2, g2, options)?.map(|(toi, _)| toi))
}

pub(crate) fn segment_feature(location: &SegmentPointLocation) -> FeatureId {
    match location {
        SegmentPointLocation::OnVertex(i) => FeatureId::Vertex(*i),
        SegmentPointLocation::OnEdge(_) => FeatureId::Edge(0),
    }
}

pub(crate) fn triangle_feature(location: &TrianglePointLocation) -> FeatureId {
    match location {
        TrianglePointLocation::OnVertex(i) => FeatureId::Vertex(*i),
        TrianglePointLocation::OnEdge(i, _) => FeatureId::Edge(*i),
        TrianglePointLocation::OnFace(side, _) => FeatureId::Face(*side),
        TrianglePointLocation::OnSolid => FeatureId::Face(0),
    }
}

/// Time of impact of a ball swept against a support-mapped shape, by ray casting on the shape dilated by the ball.
///
/// The ray cast stops within the GJK tolerance of the dilated surface. The
/// estimate is then moved along the ray by the exact gap between the ball
/// and the shape until that gap vanishes.
pub(crate) fn time_of_impact_ball_support_map<G: ?Sized + SupportMap + PointQuery>(
    pos1: &Isometry<Real>,
    radius: Real,
    pos2: &Isometry<Real>,
    shape: &G,
    dir: &UnitVector<Real>,
    length: Real,
) -> Option<Real> {
    const MAX_REFINEMENTS: usize = 8;

    let ray = crate::query::Ray::new(pos1.translation.vector.into(), dir.into_inner())
        .inverse_transform_by(pos2);
    let dilated = crate::query::gjk::DilatedShape { shape, radius };
    let mut simplex = crate::query::gjk::VoronoiSimplex::new();
    let (mut toi, _) = crate::query::gjk::cast_local_ray(&dilated, &mut simplex, &ray, length)?;

    if toi == 0.0 {
        return Some(toi);
    }

    let tol = DEFAULT_EPSILON * radius.max(1.0);
    for _ in 0..MAX_REFINEMENTS {
        let gap = shape.distance_to_local_point(&(ray.origin + ray.dir * toi), false) - radius;
        toi = (toi + gap).clamp(0.0, length);

        if gap.abs() <= tol {
            break;
        }
    }

    Some(toi)
}
