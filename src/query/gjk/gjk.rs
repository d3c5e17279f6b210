//! Closest points and ray casts on configuration space obstacles with the
//! Gilbert-Johnson-Keerthi algorithm.

use na::{ComplexField, Unit};

use crate::math::{Isometry, Point, Real, UnitVector, Vector, DEFAULT_EPSILON, DIM};
use crate::query::gjk::{CSOPoint, ConstantOrigin, VoronoiSimplex};
use crate::query::ray::ray_toi_with_halfspace;
use crate::query::Ray;
use crate::shape::SupportMap;

/// The maximum number of support points evaluated by a single GJK run.
pub const MAX_ITERATIONS: usize = 100;

/// Outcome of a closest-points search.
#[derive(Clone, Debug, PartialEq)]
pub enum GJKResult {
    /// The configuration space contains the origin: the shapes intersect.
    Intersection,
    /// The closest points on each shape, in the local frame of the first one,
    /// and the unit direction from the first shape toward the second.
    ClosestPoints(Point<Real>, Point<Real>, UnitVector<Real>),
    /// The iteration limit was reached. Carries the last search direction.
    NoConvergence(UnitVector<Real>),
}

/// The absolute tolerance used by GJK.
pub fn eps_tol() -> Real {
    DEFAULT_EPSILON * 10.0
}

fn eps_rel() -> Real {
    ComplexField::sqrt(eps_tol())
}

/// Closest points between `g1` and `pos12 * g2`.
///
/// `simplex` must already contain at least one point of the configuration
/// space `g1 - pos12 * g2`, e.g., the support point along the direction
/// between the shape centers.
pub fn closest_points<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    simplex: &mut VoronoiSimplex,
) -> GJKResult
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let eps = eps_tol();
    let mut proj = simplex.project_origin_and_reduce();
    let mut prev_dir = match Unit::try_new(-proj.coords, 0.0) {
        Some(dir) => dir,
        None => return GJKResult::Intersection,
    };
    let mut upper_bound = Real::MAX;

    for _ in 0..MAX_ITERATIONS {
        let (dir, dist) = match Unit::try_new_and_get(-proj.coords, eps) {
            Some(res) => res,
            None => return GJKResult::Intersection,
        };

        if dist >= upper_bound {
            // No progress: the previous projection is the best one.
            return witnesses(simplex, true, prev_dir);
        }

        upper_bound = dist;

        let support = CSOPoint::from_shapes(pos12, g1, g2, &dir);
        let lower_bound = -dir.dot(&support.point.coords);

        if upper_bound - lower_bound <= eps_rel() * upper_bound || !simplex.add_point(support) {
            return witnesses(simplex, false, dir);
        }

        prev_dir = dir;
        proj = simplex.project_origin_and_reduce();

        if simplex.dimension() == DIM {
            // A full simplex only survives the reduction if it contains the origin.
            return if lower_bound >= eps {
                witnesses(simplex, true, prev_dir)
            } else {
                GJKResult::Intersection
            };
        }
    }

    GJKResult::NoConvergence(prev_dir)
}

/// The barycentric combination of the simplex vertices on each shape.
fn witnesses(simplex: &VoronoiSimplex, prev: bool, dir: UnitVector<Real>) -> GJKResult {
    let mut p1 = Point::origin();
    let mut p2 = Point::origin();

    if prev {
        for i in 0..=simplex.prev_dimension() {
            let (coord, pt) = (simplex.prev_proj_coord(i), simplex.prev_point(i));
            p1 += pt.orig1.coords * coord;
            p2 += pt.orig2.coords * coord;
        }
    } else {
        for i in 0..=simplex.dimension() {
            let (coord, pt) = (simplex.proj_coord(i), simplex.point(i));
            p1 += pt.orig1.coords * coord;
            p2 += pt.orig2.coords * coord;
        }
    }

    GJKResult::ClosestPoints(p1, p2, dir)
}

/// Casts a ray, expressed in the local frame of `shape`, against it.
///
/// Returns the time of impact, in multiples of `ray.dir`, and the normal of
/// the support plane the ray stopped on. A ray starting inside of the shape
/// hits it at time zero.
pub fn cast_local_ray<G: ?Sized + SupportMap>(
    shape: &G,
    simplex: &mut VoronoiSimplex,
    ray: &Ray,
    max_time_of_impact: Real,
) -> Option<(Real, Vector<Real>)> {
    minkowski_ray_cast(
        &Isometry::identity(),
        shape,
        &ConstantOrigin,
        ray,
        max_time_of_impact,
        simplex,
    )
}

/// Computes the distance `g1` can travel along `dir` before touching `g2`.
///
/// Everything is expressed in the local frame of `g1`, and `dir` must be a
/// unit vector. Returns the travelled distance together with the outward
/// normal of `g1` at the contact. Returns `Some` with a zero distance if the
/// shapes already intersect.
pub fn directional_distance<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    dir: &Vector<Real>,
    simplex: &mut VoronoiSimplex,
) -> Option<(Real, Vector<Real>)>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    // g1 moved by `t * dir` touches g2 iff `-t * dir` lies on `g1 - g2`.
    let ray = Ray::new(Point::origin(), -*dir);
    minkowski_ray_cast(pos12, g1, g2, &ray, Real::MAX, simplex)
}

/// Ray cast on the configuration space `g1 - pos12 * g2`.
///
/// The ray origin is advanced onto every support plane it crosses, and the
/// simplex is kept relative to that moving origin. The cast ends when the
/// moving origin enters the configuration space (hit) or is proven outside
/// of it while the ray leaves the last support plane (miss).
fn minkowski_ray_cast<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    ray: &Ray,
    max_time_of_impact: Real,
    simplex: &mut VoronoiSimplex,
) -> Option<(Real, Vector<Real>)>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let eps = eps_tol();
    let ray_length = ray.dir.norm();

    if ray_length <= DEFAULT_EPSILON {
        return None;
    }

    let ray_dir = ray.dir / ray_length;
    let mut origin = ray.origin;
    let mut travelled = 0.0;
    let mut normal = -ray_dir;

    simplex.reset(CSOPoint::from_shapes(pos12, g1, g2, &normal).translate(&-origin.coords));

    let mut proj = simplex.project_origin_and_reduce();
    let mut upper_bound = Real::MAX;
    let mut stalled = false;

    for _ in 0..MAX_ITERATIONS {
        let prev_upper_bound = upper_bound;
        let (dir, dist) = match Unit::try_new_and_get(-proj.coords, eps) {
            Some(res) => res,
            None => return Some((travelled / ray_length, normal)),
        };
        upper_bound = dist;

        let support = if upper_bound >= prev_upper_bound {
            // No progress: use the projection itself as the support point.
            stalled = true;
            CSOPoint::single_point(proj + origin.coords)
        } else {
            CSOPoint::from_shapes(pos12, g1, g2, &dir)
        };

        if stalled && travelled > 0.0 {
            return Some((travelled / ray_length, normal));
        }

        let toward_plane = dir.dot(&ray_dir);

        match ray_toi_with_halfspace(&support.point, &dir, &Ray::new(origin, ray_dir)) {
            Some(t) if t > 0.0 && toward_plane < 0.0 => {
                // The support plane is a new lower bound of the time of impact.
                travelled += t;
                normal = dir.into_inner();

                // Dividing avoids overflowing with an infinite `max_time_of_impact`.
                if travelled / ray_length > max_time_of_impact {
                    return None;
                }

                let shift = ray_dir * t;
                origin += shift;
                upper_bound = Real::MAX;
                simplex.modify_pnts(&|pt| pt.translate_mut(&-shift));
                stalled = false;
            }
            None if toward_plane > eps => return None,
            _ => {}
        }

        if stalled {
            return None;
        }

        let lower_bound = -dir.dot(&(support.point.coords - origin.coords));

        if upper_bound - lower_bound <= eps_rel() * upper_bound {
            return None;
        }

        let _ = simplex.add_point(support.translate(&-origin.coords));
        proj = simplex.project_origin_and_reduce();

        if simplex.dimension() == DIM {
            return (lower_bound < eps).then_some((travelled / ray_length, normal));
        }
    }

    None
}
