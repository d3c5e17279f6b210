use approx::assert_relative_eq;
use narrow3d::math::Point;
use narrow3d::query;

use super::shapes::{rand_isometry, rand_isometry_at, rand_real, zoo};

#[test]
fn swapping_the_shapes_flips_the_result() {
    let shapes = zoo();
    let mut rng = oorandom::Rand32::new(0xd15ea5e);

    for g1 in &shapes {
        for g2 in &shapes {
            for _ in 0..20 {
                let pos1 = rand_isometry(&mut rng);
                let dist = 5.0 + rand_real(&mut rng) * 3.0;
                let pos2 = rand_isometry_at(&mut rng, &pos1, dist);

                let (hit12, res12) = query::distance_between(&pos1, g1, &pos2, g2, 4.0);
                let (hit21, res21) = query::distance_between(&pos2, g2, &pos1, g1, 4.0);
                let res21 = res21.flipped();

                assert_eq!(hit12, res12.distance <= 4.0);
                assert_eq!(hit21, res21.distance <= 4.0);
                assert!(res12.distance > 0.0);
                assert_relative_eq!(res12.distance, res21.distance, epsilon = 1.0e-3);
                assert_eq!(res12.sub_shape1, res21.sub_shape1);
                assert_eq!(res12.sub_shape2, res21.sub_shape2);

                // Separated shapes: the witnesses are `distance` apart along the normal.
                for res in [&res12, &res21] {
                    assert_relative_eq!(
                        (res.point2 - res.point1).norm(),
                        res.distance,
                        epsilon = 1.0e-3
                    );
                    assert_relative_eq!(
                        res.normal1.dot(&(res.point2 - res.point1)),
                        res.distance,
                        epsilon = 1.0e-3
                    );
                }
            }
        }
    }
}

#[test]
fn repeated_queries_are_identical() {
    let shapes = zoo();
    let mut rng = oorandom::Rand32::new(42);

    for g1 in &shapes {
        for g2 in &shapes {
            let pos1 = rand_isometry(&mut rng);
            // Close enough for some pairs to penetrate.
            let dist = rand_real(&mut rng) * 3.0;
            let pos2 = rand_isometry_at(&mut rng, &pos1, dist);

            let first = query::distance_between(&pos1, g1, &pos2, g2, 0.0);
            let second = query::distance_between(&pos1, g1, &pos2, g2, 0.0);
            assert_eq!(first, second);

            let end = Point::from(pos2.translation.vector);
            let first = query::collider_cast(&pos1, &end, g1, &pos2, g2);
            let second = query::collider_cast(&pos1, &end, g1, &pos2, g2);
            assert_eq!(first, second);
        }
    }
}
