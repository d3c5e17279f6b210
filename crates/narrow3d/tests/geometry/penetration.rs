use approx::assert_relative_eq;
use narrow3d::math::{Isometry, Real, Vector};
use narrow3d::query;
use narrow3d::shape::{Capsule, Cuboid, Shape};

use super::shapes::{box_hull, rand_isometry, rand_real};

/// A shape made of an axis-aligned box dilated by a radius.
struct Rounded {
    shape: Shape,
    half_extents: Vector<Real>,
    radius: Real,
}

fn rand_half_extents(rng: &mut oorandom::Rand32) -> Vector<Real> {
    Vector::new(
        0.7 + rand_real(rng),
        0.7 + rand_real(rng),
        0.7 + rand_real(rng),
    )
}

fn rand_cuboid(rng: &mut oorandom::Rand32) -> Rounded {
    let half_extents = rand_half_extents(rng);
    Rounded {
        shape: Shape::Cuboid(Cuboid::new(half_extents)),
        half_extents,
        radius: 0.0,
    }
}

fn rand_hull(rng: &mut oorandom::Rand32) -> Rounded {
    let half_extents = rand_half_extents(rng);
    Rounded {
        shape: Shape::ConvexPolyhedron(box_hull(half_extents)),
        half_extents,
        radius: 0.0,
    }
}

fn rand_capsule(rng: &mut oorandom::Rand32) -> Rounded {
    let half_height = 0.5 + rand_real(rng);
    let radius = 0.2 + rand_real(rng) * 0.4;
    Rounded {
        shape: Shape::Capsule(Capsule::new_y(half_height, radius)),
        half_extents: Vector::new(0.0, half_height, 0.0),
        radius,
    }
}

/// Overlaps `g1` and `g2` by a known depth along a random axis, under a random
/// common placement, and checks the penetration found.
fn check_axis_aligned_penetrations(
    seed: u64,
    rand_g1: fn(&mut oorandom::Rand32) -> Rounded,
    rand_g2: fn(&mut oorandom::Rand32) -> Rounded,
    epsilon: Real,
) {
    let mut rng = oorandom::Rand32::new(seed);

    for _ in 0..200 {
        let g1 = rand_g1(&mut rng);
        let g2 = rand_g2(&mut rng);
        let reach = g1.half_extents + g2.half_extents + Vector::repeat(g1.radius + g2.radius);

        let axis = rng.rand_range(0..3) as usize;
        let sign = if rng.rand_range(0..2) == 0 { 1.0 } else { -1.0 };
        let depth = 0.05 + rand_real(&mut rng) * 0.35;

        // Small lateral offsets keep the other axes overlapping by more than `depth`.
        let mut offset = Vector::new(
            (rand_real(&mut rng) * 2.0 - 1.0) * 0.2,
            (rand_real(&mut rng) * 2.0 - 1.0) * 0.2,
            (rand_real(&mut rng) * 2.0 - 1.0) * 0.2,
        );
        offset[axis] = sign * (reach[axis] - depth);

        let pos1 = rand_isometry(&mut rng);
        let pos2 = pos1 * Isometry::translation(offset.x, offset.y, offset.z);
        let mut local_normal = Vector::zeros();
        local_normal[axis] = sign;
        let normal = pos1.rotation * local_normal;

        let (hit, res) = query::distance_between(&pos1, &g1.shape, &pos2, &g2.shape, 0.0);
        assert!(hit);
        assert_relative_eq!(res.distance, -depth, epsilon = epsilon);
        assert_relative_eq!(res.normal1.into_inner(), normal, epsilon = epsilon * 10.0);
        assert_relative_eq!(res.normal2.into_inner(), -normal, epsilon = epsilon * 10.0);
        assert_relative_eq!(
            (res.point2 - res.point1).dot(&normal),
            -depth,
            epsilon = epsilon
        );
    }
}

#[test]
fn cuboid_cuboid_penetrations() {
    check_axis_aligned_penetrations(1, rand_cuboid, rand_cuboid, 1.0e-3);
}

#[test]
fn hull_hull_penetrations() {
    check_axis_aligned_penetrations(2, rand_hull, rand_hull, 1.0e-3);
}

#[test]
fn hull_cuboid_penetrations() {
    check_axis_aligned_penetrations(3, rand_hull, rand_cuboid, 1.0e-3);
    check_axis_aligned_penetrations(4, rand_cuboid, rand_hull, 1.0e-3);
}

#[test]
fn capsule_hull_penetrations() {
    check_axis_aligned_penetrations(5, rand_capsule, rand_hull, 2.0e-3);
    check_axis_aligned_penetrations(6, rand_hull, rand_capsule, 2.0e-3);
}

#[test]
fn capsule_cuboid_penetrations() {
    check_axis_aligned_penetrations(7, rand_capsule, rand_cuboid, 2.0e-3);
    check_axis_aligned_penetrations(8, rand_cuboid, rand_capsule, 2.0e-3);
}
