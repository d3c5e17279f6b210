use approx::assert_relative_eq;
use narrow3d::math::{Isometry, Point, Real, Vector};
use narrow3d::query;
use narrow3d::shape::{Ball, Compound, Cuboid, Shape};

fn three_balls() -> Shape {
    // At distances 5, 2 and 8 from a ball of radius 0.5 at the origin.
    Shape::Compound(
        Compound::new(vec![
            (Isometry::translation(6.0, 0.0, 0.0), Shape::Ball(Ball::new(0.5))),
            (Isometry::translation(0.0, 3.0, 0.0), Shape::Ball(Ball::new(0.5))),
            (Isometry::translation(0.0, 0.0, -9.0), Shape::Ball(Ball::new(0.5))),
        ])
        .unwrap(),
    )
}

#[test]
fn closest_part_is_reported() {
    let compound = three_balls();
    let other = Shape::Ball(Ball::new(0.5));
    let pos = Isometry::identity();

    let (hit, res) = query::distance_between(&pos, &other, &pos, &compound, 1.0);
    assert!(!hit);
    assert_eq!(res.sub_shape2, 1);
    assert_relative_eq!(res.distance, 2.0, epsilon = 1.0e-5);
    assert_relative_eq!(res.point2, Point::new(0.0, 2.5, 0.0), epsilon = 1.0e-5);

    let (_, res) = query::distance_between(&pos, &compound, &pos, &other, Real::MAX);
    assert_eq!(res.sub_shape1, 1);
    assert_eq!(res.sub_shape2, 0);
    assert_relative_eq!(res.distance, 2.0, epsilon = 1.0e-5);
}

#[test]
fn compound_placement_applies_to_every_part() {
    let compound = three_balls();
    let other = Shape::Cuboid(Cuboid::new(Vector::repeat(0.5)));
    let pos_compound = Isometry::translation(0.0, -3.0, 0.0);

    // The second part now sits on the cuboid.
    let (hit, res) = query::distance_between(
        &Isometry::identity(),
        &other,
        &pos_compound,
        &compound,
        0.0,
    );
    assert!(hit);
    assert_eq!(res.sub_shape2, 1);
    assert_relative_eq!(res.distance, -1.0, epsilon = 1.0e-4);
}

#[test]
fn every_part_within_reach_is_visited_in_order() {
    let compound = three_balls();
    let other = Shape::Ball(Ball::new(0.5));
    let pos = Isometry::identity();
    let mut visited = vec![];

    query::distance_between_all(&pos, &compound, &pos, &other, 6.0, |res| {
        visited.push((res.sub_shape1, res.distance))
    });

    assert_eq!(visited.len(), 2);
    assert_eq!(visited[0].0, 0);
    assert_eq!(visited[1].0, 1);
    assert_relative_eq!(visited[0].1, 5.0, epsilon = 1.0e-5);
    assert_relative_eq!(visited[1].1, 2.0, epsilon = 1.0e-5);
}

#[test]
fn primitive_is_its_own_single_part() {
    let ball = Shape::Ball(Ball::new(0.5));
    let mut visited = vec![];

    query::distance_between_all(
        &Isometry::identity(),
        &ball,
        &Isometry::translation(2.0, 0.0, 0.0),
        &ball,
        1.0,
        |res| visited.push(*res),
    );

    assert_eq!(visited.len(), 1);
    assert_eq!(visited[0].sub_shape1, 0);
    assert_relative_eq!(visited[0].distance, 1.0, epsilon = 1.0e-6);
}

#[test]
fn cast_reports_the_first_part_hit() {
    let compound = three_balls();
    let other = Shape::Ball(Ball::new(0.5));

    let hit = query::collider_cast(
        &Isometry::translation(-4.0, 3.0, 0.0),
        &Point::new(10.0, 3.0, 0.0),
        &other,
        &Isometry::identity(),
        &compound,
    )
    .unwrap()
    .unwrap();

    assert_eq!(hit.sub_shape2, 1);
    assert_relative_eq!(hit.distance, 3.0, epsilon = 1.0e-4);
}
