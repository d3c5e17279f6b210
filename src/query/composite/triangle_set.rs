use smallvec::SmallVec;

use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Real, Vector};
use crate::query::composite::Best;
use crate::query::dispatch;
use crate::query::{CastError, CastOptions, CastResult, DistanceResult};
use crate::shape::{Shape, Triangle, TriangleSet};

/// Candidate triangles with the lower bound of their distance to the query.
type Candidates = SmallVec<[(Real, u32, Triangle); 16]>;

/// Triangles of `set` whose AABB intersects `query`, sorted by their AABB
/// distance to `bounds`, then by identifier.
fn sorted_candidates<S: ?Sized + TriangleSet>(set: &S, query: &Aabb, bounds: &Aabb) -> Candidates {
    let mut candidates = Candidates::new();

    set.find_candidates(query, &mut |id| {
        if let Some(tri) = set.triangle(id) {
            candidates.push((tri.local_aabb().distance_to_aabb(bounds), id, tri));
        }
        true
    });

    candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    candidates
}

fn first_triangle<S: ?Sized + TriangleSet>(set: &S) -> Option<(u32, Triangle)> {
    let mut first = None;
    set.find_candidates(&set.local_aabb(), &mut |id| match set.triangle(id) {
        Some(tri) => {
            first = Some((id, tri));
            false
        }
        None => true,
    });
    first
}

fn offer_candidates(
    pos1: &Isometry<Real>,
    g1: &Shape,
    pos2: &Isometry<Real>,
    candidates: &Candidates,
    max_dist: Real,
    best: &mut Best<DistanceResult>,
) {
    for (lower_bound, id, tri) in candidates {
        // Candidates are sorted, none of the remaining ones can do better.
        if *lower_bound >= best.bound() {
            break;
        }

        let mut res = dispatch::shape_distance(pos1, g1, pos2, &Shape::Triangle(*tri), max_dist);
        res.sub_shape2 = *id;
        let _ = best.offer(res);
    }
}

/// Distance between a primitive shape and a triangle mesh or heightfield.
///
/// Candidates are searched in the AABB of `g1` loosened by `max_dist`. If the
/// closest triangle could lie outside of it, the search is run again with the
/// best distance found so far as margin, so the result is always the true
/// distance. Only an empty set gives an infinite distance.
pub fn distance_shape_triangle_set<S: ?Sized + TriangleSet>(
    pos1: &Isometry<Real>,
    g1: &Shape,
    pos2: &Isometry<Real>,
    set: &S,
    max_dist: Real,
) -> DistanceResult {
    let aabb1 = g1.compute_aabb(&pos2.inv_mul(pos1));
    let margin = max_dist.max(0.0);
    let mut best = Best::new();

    let candidates = sorted_candidates(set, &aabb1.loosened(margin), &aabb1);
    offer_candidates(pos1, g1, pos2, &candidates, max_dist, &mut best);

    if best.bound() > margin {
        let upper_bound = match best.get() {
            Some(res) => res.distance,
            None => match first_triangle(set) {
                Some((id, tri)) => {
                    let mut res = dispatch::shape_distance(
                        pos1,
                        g1,
                        pos2,
                        &Shape::Triangle(tri),
                        max_dist,
                    );
                    res.sub_shape2 = id;
                    let bound = res.distance;
                    let _ = best.offer(res);
                    bound
                }
                None => return DistanceResult::infinite(),
            },
        };

        let candidates = sorted_candidates(set, &aabb1.loosened(upper_bound.max(0.0)), &aabb1);
        offer_candidates(pos1, g1, pos2, &candidates, max_dist, &mut best);
    }

    best.into_inner().unwrap_or_else(DistanceResult::infinite)
}

/// Casts a primitive shape along `vel` against a triangle mesh or heightfield.
///
/// Any triangle overlapping `g1` at the start placement invalidates the whole
/// sweep.
pub fn cast_shape_triangle_set<S: ?Sized + TriangleSet>(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    g1: &Shape,
    pos2: &Isometry<Real>,
    set: &S,
    options: &CastOptions,
) -> Result<Option<CastResult>, CastError> {
    let aabb1 = g1.compute_aabb(&pos2.inv_mul(pos1));
    let swept_aabb1 = aabb1.swept(&pos2.inverse_transform_vector(vel));

    let mut candidates: SmallVec<[(u32, Triangle); 16]> = SmallVec::new();
    set.find_candidates(&swept_aabb1, &mut |id| {
        if let Some(tri) = set.triangle(id) {
            candidates.push((id, tri));
        }
        true
    });
    candidates.sort_by_key(|(id, _)| *id);

    let mut best = Best::new();

    for (id, tri) in &candidates {
        let tri = Shape::Triangle(*tri);

        if tri.compute_local_aabb().intersects(&aabb1)
            && dispatch::shape_distance(pos1, g1, pos2, &tri, 0.0).distance <= 0.0
        {
            return Ok(None);
        }

        if let Some(mut hit) = dispatch::shape_cast(pos1, vel, g1, pos2, &tri, options)? {
            hit.sub_shape2 = *id;
            let _ = best.offer(hit);
        }
    }

    Ok(best.into_inner())
}

/// Calls `f` with the distance between each triangle of `set` and `g2`, for
/// every triangle within `max_dist`, in ascending triangle order.
pub fn distance_all_triangle_set_shape<S: ?Sized + TriangleSet>(
    pos1: &Isometry<Real>,
    set: &S,
    pos2: &Isometry<Real>,
    g2: &Shape,
    max_dist: Real,
    f: &mut dyn FnMut(&DistanceResult),
) {
    let aabb2 = g2.compute_aabb(&pos1.inv_mul(pos2));
    let mut candidates = sorted_candidates(set, &aabb2.loosened(max_dist.max(0.0)), &aabb2);
    candidates.sort_by_key(|(_, id, _)| *id);

    for (_, id, tri) in &candidates {
        let mut res = dispatch::shape_distance(pos1, &Shape::Triangle(*tri), pos2, g2, max_dist);

        if dispatch::is_within(&res, max_dist) {
            res.sub_shape1 = *id;
            f(&res);
        }
    }
}

#[cfg(test)]
mod test {
    use na::DMatrix;

    use super::{cast_shape_triangle_set, distance_shape_triangle_set};
    use crate::math::{Isometry, Point, Vector};
    use crate::query::CastOptions;
    use crate::shape::{Ball, HeightField, Shape, TriMesh};

    fn quad() -> TriMesh {
        TriMesh::from_buffers(
            vec![
                Point::new(-1.0, 0.0, -1.0),
                Point::new(1.0, 0.0, -1.0),
                Point::new(1.0, 0.0, 1.0),
                Point::new(-1.0, 0.0, 1.0),
            ],
            vec![[0, 2, 1], [0, 3, 2]],
        )
        .unwrap()
    }

    #[test]
    fn distance_beyond_max_dist_is_still_exact() {
        let ball = Shape::Ball(Ball::new(0.5));
        let res = distance_shape_triangle_set(
            &Isometry::translation(-0.5, 10.0, 0.5),
            &ball,
            &Isometry::identity(),
            &quad(),
            0.1,
        );

        assert_relative_eq!(res.distance, 9.5, epsilon = 1.0e-4);
        assert_relative_eq!(res.normal1.into_inner(), -Vector::y(), epsilon = 1.0e-4);
        assert_eq!(res.sub_shape2, 1);
    }

    #[test]
    fn ball_cast_on_heightfield() {
        let heights = DMatrix::from_element(5, 5, 0.0);
        let heightfield = HeightField::from_heights(heights, Vector::new(10.0, 1.0, 10.0)).unwrap();
        let ball = Shape::Ball(Ball::new(0.5));

        let hit = cast_shape_triangle_set(
            &Isometry::translation(1.1, 3.0, -2.3),
            &Vector::new(0.0, -5.0, 0.0),
            &ball,
            &Isometry::identity(),
            &heightfield,
            &CastOptions::default(),
        )
        .unwrap()
        .unwrap();

        assert_relative_eq!(hit.distance, 2.5, epsilon = 1.0e-3);
        assert_relative_eq!(hit.normal2.into_inner().y.abs(), 1.0, epsilon = 1.0e-3);
    }

    #[test]
    fn cast_starting_in_contact_with_one_triangle_is_rejected() {
        let ball = Shape::Ball(Ball::new(0.5));
        let hit = cast_shape_triangle_set(
            &Isometry::translation(0.0, 0.25, 0.0),
            &Vector::new(5.0, 0.0, 0.0),
            &ball,
            &Isometry::identity(),
            &quad(),
            &CastOptions::default(),
        )
        .unwrap();

        assert!(hit.is_none());
    }
}
