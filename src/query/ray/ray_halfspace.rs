use crate::math::{Point, Real, Vector};
use crate::query::Ray;

/// Time at which a ray crosses the boundary plane of a half-space.
///
/// The plane goes through `center` with the normal `normal`. Returns `None`
/// if the ray is parallel to the plane or crosses it behind its origin.
#[inline]
pub fn ray_toi_with_halfspace(
    center: &Point<Real>,
    normal: &Vector<Real>,
    ray: &Ray,
) -> Option<Real> {
    let denom = normal.dot(&ray.dir);

    if relative_eq!(denom, 0.0) {
        return None;
    }

    let t = normal.dot(&(center - ray.origin)) / denom;
    (t >= 0.0).then_some(t)
}

#[cfg(test)]
mod test {
    use super::ray_toi_with_halfspace;
    use crate::math::{Point, Vector};
    use crate::query::Ray;

    #[test]
    fn ray_crosses_plane() {
        let center = Point::new(0.0, 2.0, 0.0);
        let ray = Ray::new(Point::origin(), Vector::new(1.0, 1.0, 0.0));

        assert_relative_eq!(ray_toi_with_halfspace(&center, &Vector::y(), &ray).unwrap(), 2.0);
        assert_eq!(
            ray_toi_with_halfspace(&center, &-Vector::y(), &Ray::new(Point::origin(), Vector::x())),
            None,
        );
        assert_eq!(
            ray_toi_with_halfspace(&center, &Vector::y(), &Ray::new(Point::origin(), -Vector::y())),
            None,
        );
    }
}
