use approx::assert_relative_eq;
use narrow3d::math::{Isometry, Point, Translation, Vector};
use narrow3d::query;
use narrow3d::shape::{Ball, Shape};

use super::shapes::{rand_isometry, rand_isometry_at, zoo};

#[test]
fn cast_stops_where_the_distance_vanishes() {
    let shapes = zoo();
    let mut rng = oorandom::Rand32::new(0xca57);

    for g1 in &shapes {
        for g2 in &shapes {
            for _ in 0..10 {
                let pos1 = rand_isometry(&mut rng);
                let pos2 = rand_isometry_at(&mut rng, &pos1, 6.0);
                // Aim the origin of `g1` at the origin of `g2`, which lies inside of it.
                let end = Point::from(pos2.translation.vector);
                let sweep = end - Point::from(pos1.translation.vector);

                let (_, start) = query::distance_between(&pos1, g1, &pos2, g2, 0.0);
                let hit = query::collider_cast(&pos1, &end, g1, &pos2, g2)
                    .unwrap()
                    .unwrap_or_else(|| {
                        panic!("{:?} missed {:?}", g1.shape_type(), g2.shape_type())
                    });

                assert!(start.distance > 0.0);
                assert!(hit.distance >= 0.0 && hit.distance <= sweep.norm() + 1.0e-4);
                // The shapes cannot meet before covering their initial gap.
                assert!(start.distance <= hit.distance + 1.0e-2);

                let impact = Translation::from(sweep.normalize() * hit.distance) * pos1;
                let (touching, at_impact) = query::distance_between(&impact, g1, &pos2, g2, 1.0e-2);
                assert!(touching);
                assert_relative_eq!(at_impact.distance, 0.0, epsilon = 1.0e-2);
                assert_relative_eq!(hit.normal1.norm(), 1.0, epsilon = 1.0e-4);
            }
        }
    }
}

#[test]
fn cast_starting_in_contact_is_a_miss() {
    let shapes = zoo();
    let pos1 = Isometry::translation(1.0, -2.0, 0.5);
    let pos2 = Isometry::new(Vector::new(1.0, -2.0, 0.5), Vector::x() * 0.6);
    let end = Point::new(11.0, -2.0, 0.5);

    for g1 in &shapes {
        for g2 in &shapes {
            assert_eq!(
                query::collider_cast(&pos1, &end, g1, &pos2, g2),
                Ok(None),
                "{:?} against {:?}",
                g1.shape_type(),
                g2.shape_type()
            );
        }
    }
}

#[test]
fn cast_shorter_than_the_gap_is_a_miss() {
    let ball = Shape::Ball(Ball::new(0.5));
    let pos1 = Isometry::identity();
    let pos2 = Isometry::translation(5.0, 0.0, 0.0);

    let short = query::collider_cast(&pos1, &Point::new(3.9, 0.0, 0.0), &ball, &pos2, &ball);
    assert_eq!(short, Ok(None));

    let hit = query::collider_cast(&pos1, &Point::new(4.1, 0.0, 0.0), &ball, &pos2, &ball)
        .unwrap()
        .unwrap();
    assert_relative_eq!(hit.distance, 4.0, epsilon = 1.0e-5);
    assert_relative_eq!(hit.point, Point::new(4.5, 0.0, 0.0), epsilon = 1.0e-5);
    assert_relative_eq!(
        hit.translation(&Vector::x_axis()),
        Vector::new(4.0, 0.0, 0.0),
        epsilon = 1.0e-5
    );
}
