use crate::math::{Isometry, Real, UnitVector, Vector, DEFAULT_EPSILON, DIM};
use crate::shape::{Cuboid, SupportMap};

/// An edge-edge axis only wins over a face normal if it separates the
/// cuboids by at least this much more.
const EDGE_SEPARATION_BIAS: Real = 1.0e-4;

/// Separation of the two cuboids along `axis1`, in the local-space of `cuboid1`.
///
/// The axis is returned flipped, if needed, so that it points toward `cuboid2`.
fn separation_along(
    cuboid1: &Cuboid,
    cuboid2: &Cuboid,
    pos12: &Isometry<Real>,
    axis1: &Vector<Real>,
) -> (Real, Vector<Real>) {
    let axis1 = if pos12.translation.vector.dot(axis1) < 0.0 {
        -axis1
    } else {
        *axis1
    };
    let extent1 = cuboid1.local_support_point(&axis1).coords.dot(&axis1);
    let deepest2 = pos12 * cuboid2.local_support_point(&pos12.inverse_transform_vector(&-axis1));

    (deepest2.coords.dot(&axis1) - extent1, axis1)
}

fn best_of(candidates: impl Iterator<Item = (Real, Vector<Real>)>) -> (Real, Vector<Real>) {
    candidates.fold((-Real::MAX, Vector::zeros()), |best, candidate| {
        if candidate.0 > best.0 {
            candidate
        } else {
            best
        }
    })
}

/// The best separating axis among the face normals of `cuboid1`.
fn best_face_axis(
    cuboid1: &Cuboid,
    cuboid2: &Cuboid,
    pos12: &Isometry<Real>,
) -> (Real, Vector<Real>) {
    best_of((0..DIM).map(|i| separation_along(cuboid1, cuboid2, pos12, &Vector::ith(i, 1.0))))
}

/// The best separating axis among the cross products of the edge directions
/// of both cuboids.
fn best_edge_axis(
    cuboid1: &Cuboid,
    cuboid2: &Cuboid,
    pos12: &Isometry<Real>,
) -> (Real, Vector<Real>) {
    let edge_pairs = (0..DIM).flat_map(|j| (0..DIM).map(move |i| (i, j)));

    best_of(edge_pairs.filter_map(|(i, j)| {
        let dir2 = pos12 * Vector::ith(j, 1.0);
        let axis = Vector::<Real>::ith(i, 1.0).cross(&dir2);
        // Parallel edges give the same axes as the face normals.
        let axis = axis.try_normalize(DEFAULT_EPSILON)?;
        Some(separation_along(cuboid1, cuboid2, pos12, &axis))
    }))
}

/// Finds the axis of maximum separation between two cuboids among their 15 candidate axes.
///
/// Returns the separation (negative if they overlap) and the axis, in the
/// local-space of `cuboid1`, pointing from `cuboid1` toward `cuboid2`.
pub fn cuboid_cuboid_find_best_separating_axis(
    cuboid1: &Cuboid,
    cuboid2: &Cuboid,
    pos12: &Isometry<Real>,
) -> (Real, UnitVector<Real>) {
    let (sep1, axis1) = best_face_axis(cuboid1, cuboid2, pos12);
    let (sep2, axis2) = best_face_axis(cuboid2, cuboid1, &pos12.inverse());
    let (edge_sep, edge_axis) = best_edge_axis(cuboid1, cuboid2, pos12);

    let (mut best_sep, mut best_axis) = if sep2 > sep1 {
        (sep2, pos12 * -axis2)
    } else {
        (sep1, axis1)
    };

    if edge_sep > best_sep + EDGE_SEPARATION_BIAS {
        best_sep = edge_sep;
        best_axis = edge_axis;
    }

    (best_sep, UnitVector::new_normalize(best_axis))
}
