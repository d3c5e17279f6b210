use narrow3d::math::{Isometry, Point, Real, Vector};
use narrow3d::shape::{Ball, Capsule, Compound, ConvexPolyhedron, Cuboid, Shape, Triangle};

/// A convex octahedron with vertices on the axes, at distance `r` from its center.
pub fn octahedron(r: Real) -> ConvexPolyhedron {
    let points = vec![
        Point::new(r, 0.0, 0.0),
        Point::new(-r, 0.0, 0.0),
        Point::new(0.0, r, 0.0),
        Point::new(0.0, -r, 0.0),
        Point::new(0.0, 0.0, r),
        Point::new(0.0, 0.0, -r),
    ];
    let faces = [
        [0, 2, 4],
        [1, 4, 2],
        [0, 4, 3],
        [0, 5, 2],
        [1, 3, 4],
        [1, 2, 5],
        [0, 3, 5],
        [1, 5, 3],
    ];

    ConvexPolyhedron::from_convex_mesh(points, &faces).unwrap()
}

/// One shape of each primitive type plus a compound, each containing its local origin.
pub fn zoo() -> Vec<Shape> {
    vec![
        Shape::Ball(Ball::new(0.7)),
        Shape::Capsule(Capsule::new_y(0.8, 0.4)),
        Shape::ConvexPolyhedron(octahedron(1.2)),
        Shape::Cuboid(Cuboid::new(Vector::new(0.5, 0.8, 0.6))),
        Shape::Triangle(Triangle::new(
            Point::new(-1.0, -0.5, 0.0),
            Point::new(1.0, -0.5, 0.0),
            Point::new(0.0, 1.0, 0.0),
        )),
        Shape::Compound(
            Compound::new(vec![
                (Isometry::identity(), Shape::Ball(Ball::new(0.5))),
                (
                    Isometry::translation(1.2, 0.0, 0.0),
                    Shape::Cuboid(Cuboid::new(Vector::repeat(0.4))),
                ),
            ])
            .unwrap(),
        ),
    ]
}

pub fn rand_real(rng: &mut oorandom::Rand32) -> Real {
    rng.rand_float() as Real
}

pub fn rand_unit_vector(rng: &mut oorandom::Rand32) -> Vector<Real> {
    loop {
        let v = Vector::new(
            rand_real(rng) * 2.0 - 1.0,
            rand_real(rng) * 2.0 - 1.0,
            rand_real(rng) * 2.0 - 1.0,
        );
        let norm = v.norm();

        if norm > 0.1 && norm <= 1.0 {
            return v / norm;
        }
    }
}

/// A random placement around the origin.
pub fn rand_isometry(rng: &mut oorandom::Rand32) -> Isometry<Real> {
    let translation = rand_unit_vector(rng) * rand_real(rng) * 10.0;
    let axisangle = rand_unit_vector(rng) * rand_real(rng) * 3.0;
    Isometry::new(translation, axisangle)
}

/// A random placement whose origin is at `dist` from the origin of `pos`.
pub fn rand_isometry_at(
    rng: &mut oorandom::Rand32,
    pos: &Isometry<Real>,
    dist: Real,
) -> Isometry<Real> {
    let translation = pos.translation.vector + rand_unit_vector(rng) * dist;
    let axisangle = rand_unit_vector(rng) * rand_real(rng) * 3.0;
    Isometry::new(translation, axisangle)
}

/// A box-shaped convex polyhedron with the given half extents.
pub fn box_hull(half_extents: Vector<Real>) -> ConvexPolyhedron {
    let points = (0..8)
        .map(|i| {
            Point::new(
                if i & 1 != 0 { half_extents.x } else { -half_extents.x },
                if i & 2 != 0 { half_extents.y } else { -half_extents.y },
                if i & 4 != 0 { half_extents.z } else { -half_extents.z },
            )
        })
        .collect();
    let faces = [
        [0, 6, 2],
        [0, 4, 6],
        [1, 7, 5],
        [1, 3, 7],
        [0, 5, 4],
        [0, 1, 5],
        [2, 7, 3],
        [2, 6, 7],
        [0, 3, 1],
        [0, 2, 3],
        [4, 7, 6],
        [4, 5, 7],
    ];

    ConvexPolyhedron::from_convex_mesh(points, &faces).unwrap()
}
