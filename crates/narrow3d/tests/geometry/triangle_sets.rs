use std::sync::Arc;

use approx::assert_relative_eq;
use narrow3d::math::{Isometry, Point, Real, Vector};
use narrow3d::na::DMatrix;
use narrow3d::query;
use narrow3d::shape::{
    Ball, Capsule, Compound, Cuboid, HeightField, HeightFieldCellStatus, HeightFieldData, Shape,
    TriMesh, TriMeshData,
};

/// A flat square of side 2 in the `y = 0` plane, made of a grid of `n * n` quads.
fn ground_mesh_data(n: u32) -> TriMeshData {
    let mut vertices = vec![];
    let mut indices = vec![];
    let step = 2.0 / n as Real;

    for i in 0..=n {
        for j in 0..=n {
            vertices.push(Point::new(-1.0 + step * j as Real, 0.0, -1.0 + step * i as Real));
        }
    }

    for i in 0..n {
        for j in 0..n {
            let a = i * (n + 1) + j;
            let b = a + 1;
            let c = a + n + 1;
            let d = c + 1;
            indices.push([a, c, b]);
            indices.push([b, c, d]);
        }
    }

    TriMeshData::new(vertices, indices).unwrap()
}

#[test]
fn ball_above_a_trimesh() {
    let mesh = Shape::TriMesh(TriMesh::new(Arc::new(ground_mesh_data(8))));
    let ball = Shape::Ball(Ball::new(0.5));
    let pos_ball = Isometry::translation(0.3, 2.0, -0.6);

    let (hit, res) = query::distance_between(&pos_ball, &ball, &Isometry::identity(), &mesh, 2.0);
    assert!(hit);
    assert_relative_eq!(res.distance, 1.5, epsilon = 1.0e-5);
    assert_relative_eq!(res.point2, Point::new(0.3, 0.0, -0.6), epsilon = 1.0e-5);
    assert_relative_eq!(res.normal1.into_inner(), -Vector::y(), epsilon = 1.0e-5);
    assert_eq!(res.sub_shape1, 0);

    // The closest triangle is found even when it lies beyond `max_dist`.
    let (hit, far) = query::distance_between(&pos_ball, &ball, &Isometry::identity(), &mesh, 0.1);
    assert!(!hit);
    assert_relative_eq!(far.distance, 1.5, epsilon = 1.0e-5);
}

#[test]
fn shared_mesh_with_different_scales() {
    let data = Arc::new(ground_mesh_data(2));
    let small = Shape::TriMesh(TriMesh::new(data.clone()));
    let large = Shape::TriMesh(
        TriMesh::new(data.clone())
            .with_scale(Vector::new(4.0, 1.0, 4.0))
            .unwrap(),
    );
    let ball = Shape::Ball(Ball::new(0.5));
    let pos_ball = Isometry::translation(3.0, 1.0, 0.0);

    let (_, res_small) = query::distance_between(
        &pos_ball,
        &ball,
        &Isometry::identity(),
        &small,
        10.0,
    );
    let (_, res_large) = query::distance_between(
        &pos_ball,
        &ball,
        &Isometry::identity(),
        &large,
        10.0,
    );

    assert_eq!(Arc::strong_count(&data), 3);
    assert_relative_eq!(res_small.distance, (5.0 as Real).sqrt() - 0.5, epsilon = 1.0e-4);
    assert_relative_eq!(res_large.distance, 0.5, epsilon = 1.0e-5);
}

#[test]
fn capsule_cast_onto_a_trimesh() {
    let mesh = Shape::TriMesh(TriMesh::new(Arc::new(ground_mesh_data(4))));
    let capsule = Shape::Capsule(Capsule::new_y(0.5, 0.25));
    let pos_capsule = Isometry::translation(0.1, 3.0, 0.2);

    let hit = query::collider_cast(
        &pos_capsule,
        &Point::new(0.1, -3.0, 0.2),
        &capsule,
        &Isometry::identity(),
        &mesh,
    )
    .unwrap()
    .unwrap();

    assert_relative_eq!(hit.distance, 2.25, epsilon = 1.0e-3);
    assert_relative_eq!(hit.normal1.into_inner(), -Vector::y(), epsilon = 1.0e-3);
    assert_relative_eq!(hit.point.y, 0.0, epsilon = 1.0e-3);

    // Same impact, seen from the mesh.
    let reversed = query::collider_cast(
        &Isometry::identity(),
        &Point::new(0.0, 6.0, 0.0),
        &mesh,
        &pos_capsule,
        &capsule,
    )
    .unwrap()
    .unwrap();

    assert_relative_eq!(reversed.distance, 2.25, epsilon = 1.0e-3);
    assert_relative_eq!(reversed.normal1.into_inner(), Vector::y(), epsilon = 1.0e-3);
    assert_relative_eq!(reversed.point, Point::new(0.1, 2.25, 0.2), epsilon = 1.0e-2);
}

#[test]
fn ball_cast_onto_a_heightfield() {
    let heights = DMatrix::from_element(5, 5, 0.0);
    let heightfield = Shape::HeightField(
        HeightField::from_heights(heights, Vector::new(10.0, 1.0, 10.0)).unwrap(),
    );
    let ball = Shape::Ball(Ball::new(0.5));

    let hit = query::collider_cast(
        &Isometry::translation(1.0, 3.0, 1.0),
        &Point::new(1.0, -3.0, 1.0),
        &ball,
        &Isometry::identity(),
        &heightfield,
    )
    .unwrap()
    .unwrap();

    assert_relative_eq!(hit.distance, 2.5, epsilon = 1.0e-4);
    assert_relative_eq!(hit.point, Point::new(1.0, 0.0, 1.0), epsilon = 1.0e-4);
    assert_relative_eq!(hit.normal1.into_inner(), -Vector::y(), epsilon = 1.0e-4);
}

#[test]
fn removed_heightfield_cells_are_holes() {
    let heights = DMatrix::from_element(3, 3, 0.0);
    let mut status = DMatrix::repeat(2, 2, HeightFieldCellStatus::default());
    // Cell (row 0, column 1) covers x in [0, 1] and z in [-1, 0] once scaled.
    status[(0, 1)] = HeightFieldCellStatus::CELL_REMOVED;
    let data = Arc::new(HeightFieldData::with_cell_status(heights, status).unwrap());
    let heightfield = Shape::HeightField(
        HeightField::new(data, Vector::new(2.0, 1.0, 2.0)).unwrap(),
    );
    let ball = Shape::Ball(Ball::new(0.1));

    let over_hole = Isometry::translation(0.5, 1.0, -0.5);
    let (_, res) = query::distance_between(
        &over_hole,
        &ball,
        &Isometry::identity(),
        &heightfield,
        2.0,
    );
    // The closest remaining points are on the border of the hole.
    assert_relative_eq!(res.distance, (1.25 as Real).sqrt() - 0.1, epsilon = 1.0e-4);

    let over_ground = Isometry::translation(-0.5, 1.0, -0.5);
    let (_, res) = query::distance_between(
        &over_ground,
        &ball,
        &Isometry::identity(),
        &heightfield,
        2.0,
    );
    assert_relative_eq!(res.distance, 0.9, epsilon = 1.0e-5);
}

#[test]
fn compound_against_a_trimesh() {
    let mesh = Shape::TriMesh(TriMesh::new(Arc::new(ground_mesh_data(2))));
    let compound = Shape::Compound(
        Compound::new(vec![
            (Isometry::translation(0.0, 3.0, 0.0), Shape::Ball(Ball::new(0.5))),
            (
                Isometry::translation(0.0, 1.0, 0.0),
                Shape::Cuboid(Cuboid::new(Vector::repeat(0.25))),
            ),
        ])
        .unwrap(),
    );

    let (_, res) = query::distance_between(
        &Isometry::identity(),
        &compound,
        &Isometry::identity(),
        &mesh,
        5.0,
    );
    assert_eq!(res.sub_shape1, 1);
    assert_relative_eq!(res.distance, 0.75, epsilon = 1.0e-4);

    let (_, res) = query::distance_between(
        &Isometry::identity(),
        &mesh,
        &Isometry::identity(),
        &compound,
        5.0,
    );
    assert_eq!(res.sub_shape2, 1);
    assert_relative_eq!(res.distance, 0.75, epsilon = 1.0e-4);
    assert_relative_eq!(res.normal1.into_inner(), Vector::y(), epsilon = 1.0e-4);
}

#[test]
fn triangle_sets_never_collide_with_each_other() {
    let mesh = Shape::TriMesh(TriMesh::new(Arc::new(ground_mesh_data(2))));
    let heightfield = Shape::HeightField(
        HeightField::from_heights(DMatrix::from_element(2, 2, 0.0), Vector::repeat(2.0)).unwrap(),
    );
    let pos = Isometry::identity();

    for (g1, g2) in [(&mesh, &mesh), (&mesh, &heightfield), (&heightfield, &mesh)] {
        let (hit, res) = query::distance_between(&pos, g1, &pos, g2, Real::MAX);
        assert!(!hit);
        assert_eq!(res.distance, Real::MAX);

        let cast = query::collider_cast(
            &Isometry::translation(0.0, 1.0, 0.0),
            &Point::new(0.0, -1.0, 0.0),
            g1,
            &pos,
            g2,
        );
        assert_eq!(cast, Ok(None));
    }
}
