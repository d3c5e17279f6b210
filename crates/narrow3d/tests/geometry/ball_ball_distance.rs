use approx::assert_relative_eq;
use narrow3d::math::{Isometry, Point, Vector};
use narrow3d::query;
use narrow3d::shape::{Ball, Shape};

#[test]
fn separated_balls_have_exact_witnesses() {
    let ball = Shape::Ball(Ball::new(1.0));
    let pos1 = Isometry::identity();
    let pos2 = Isometry::translation(3.0, 0.0, 0.0);

    let (hit, res) = query::distance_between(&pos1, &ball, &pos2, &ball, 10.0);

    assert!(hit);
    assert_relative_eq!(res.distance, 1.0, epsilon = 1.0e-6);
    assert_relative_eq!(res.point1, Point::new(1.0, 0.0, 0.0), epsilon = 1.0e-6);
    assert_relative_eq!(res.point2, Point::new(2.0, 0.0, 0.0), epsilon = 1.0e-6);
    assert_relative_eq!(res.normal1.into_inner(), Vector::x(), epsilon = 1.0e-6);
    assert_relative_eq!(res.normal2.into_inner(), -Vector::x(), epsilon = 1.0e-6);
}

#[test]
fn coincident_balls_have_a_finite_normal() {
    let ball = Shape::Ball(Ball::new(1.0));
    let pos = Isometry::translation(1.0, 2.0, 3.0);

    let (hit, res) = query::distance_between(&pos, &ball, &pos, &ball, 0.0);

    assert!(hit);
    assert_relative_eq!(res.distance, -2.0, epsilon = 1.0e-6);
    assert_relative_eq!(res.normal1.norm(), 1.0, epsilon = 1.0e-6);
    assert!(res.normal1.iter().all(|x| x.is_finite()));
    assert!(res.point1.iter().chain(res.point2.iter()).all(|x| x.is_finite()));
}

#[test]
fn max_dist_only_gates_the_hit_flag() {
    let ball = Shape::Ball(Ball::new(0.5));
    let pos1 = Isometry::identity();
    let pos2 = Isometry::translation(0.0, 0.0, 4.0);

    let (near, res_near) = query::distance_between(&pos1, &ball, &pos2, &ball, 3.0);
    let (far, res_far) = query::distance_between(&pos1, &ball, &pos2, &ball, 2.9);

    assert!(near);
    assert!(!far);
    assert_eq!(res_near, res_far);
    assert_relative_eq!(res_far.distance, 3.0, epsilon = 1.0e-6);
}
