use narrow3d::math::{Isometry, Point, Vector};
use narrow3d::query::{self, CastError, CastOptions, FaultPolicy};
use narrow3d::shape::{Cuboid, Shape};

#[test]
fn exhausted_sweep_follows_the_fault_policy() {
    let cuboid = Shape::Cuboid(Cuboid::new(Vector::repeat(1.0)));
    let pos1 = Isometry::identity();
    let pos2 = Isometry::translation(5.0, 3.0, 0.0);
    let end = Point::new(10.0, 0.0, 0.0);
    let options = CastOptions {
        max_iterations: 0,
        ..CastOptions::default()
    };

    let res = query::collider_cast_with_options(&pos1, &end, &cuboid, &pos2, &cuboid, &options);
    assert!(matches!(res, Err(CastError::NumericalFault { .. })));

    let options = options.with_fault_policy(FaultPolicy::TreatAsMiss);
    let res = query::collider_cast_with_options(&pos1, &end, &cuboid, &pos2, &cuboid, &options);
    assert_eq!(res, Ok(None));
}

#[test]
fn default_options_resolve_the_same_sweep() {
    let cuboid = Shape::Cuboid(Cuboid::new(Vector::repeat(1.0)));
    let pos1 = Isometry::identity();
    let end = Point::new(10.0, 0.0, 0.0);

    let beside = Isometry::translation(5.0, 3.0, 0.0);
    assert_eq!(query::collider_cast(&pos1, &end, &cuboid, &beside, &cuboid), Ok(None));

    let ahead = Isometry::translation(5.0, 1.5, 0.0);
    let hit = query::collider_cast(&pos1, &end, &cuboid, &ahead, &cuboid)
        .unwrap()
        .unwrap();
    approx::assert_relative_eq!(hit.distance, 3.0, epsilon = 1.0e-3);
}
