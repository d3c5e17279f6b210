use na::ComplexField;

use crate::math::{Point, Real};
use crate::query::Ray;

/// Time of impact of a ray on a solid ball.
///
/// A ray starting inside of the ball hits it at time zero. Returns `None` if
/// the ray misses the ball or points away from it.
#[inline]
pub fn ray_toi_with_ball(center: &Point<Real>, radius: Real, ray: &Ray) -> Option<Real> {
    let dcenter = ray.origin - center;
    let c = dcenter.norm_squared() - radius * radius;

    if c <= 0.0 {
        return Some(0.0);
    }

    // Solves `|dcenter + t * dir|² = radius²` for its smallest root.
    let a = ray.dir.norm_squared();
    let b = dcenter.dot(&ray.dir);

    if a == 0.0 || b > 0.0 {
        return None;
    }

    let delta = b * b - a * c;

    if delta < 0.0 {
        None
    } else {
        Some((-b - ComplexField::sqrt(delta)) / a)
    }
}
