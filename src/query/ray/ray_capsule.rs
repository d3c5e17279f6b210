use na::ComplexField;

use crate::math::{Real, DEFAULT_EPSILON};
use crate::query::{PointQuery, Ray};
use crate::query::ray::ray_toi_with_ball;
use crate::shape::Capsule;

/// Computes the time of impact of a ray on a capsule, in multiples of `ray.dir`.
///
/// Returns `Some(0.0)` if the ray starts inside of the capsule.
pub fn ray_toi_with_capsule(capsule: &Capsule, ray: &Ray) -> Option<Real> {
    let seg = &capsule.segment;
    let radius = capsule.radius;

    if seg.distance_to_local_point(&ray.origin, true) <= radius {
        return Some(0.0);
    }

    let caps = [seg.a, seg.b]
        .iter()
        .filter_map(|center| ray_toi_with_ball(center, radius, ray))
        .fold(None, |best: Option<Real>, t| {
            Some(best.map(|b| b.min(t)).unwrap_or(t))
        });

    let axis = match seg.direction() {
        Some(axis) => axis.into_inner(),
        None => return caps,
    };

    let length = seg.length();
    let dpos = ray.origin - seg.a;
    let dir_perp = ray.dir - axis * ray.dir.dot(&axis);
    let dpos_perp = dpos - axis * dpos.dot(&axis);

    let a = dir_perp.norm_squared();
    let b = dpos_perp.dot(&dir_perp);
    let c = dpos_perp.norm_squared() - radius * radius;

    let mut side = None;

    if a > DEFAULT_EPSILON {
        let delta = b * b - a * c;

        if delta >= 0.0 {
            let t = (-b - ComplexField::sqrt(delta)) / a;
            let s = (dpos + ray.dir * t).dot(&axis);

            if t >= 0.0 && s >= 0.0 && s <= length {
                side = Some(t);
            }
        }
    }

    match (side, caps) {
        (Some(t1), Some(t2)) => Some(t1.min(t2)),
        (side, caps) => side.or(caps),
    }
}
