use crate::math::{Point, Real, Vector};
use crate::query::{PointProjection, PointQuery};
use crate::shape::{Ball, FeatureId};

impl PointQuery for Ball {
    #[inline]
    fn project_local_point(&self, pt: &Point<Real>, solid: bool) -> PointProjection {
        let center_dist = pt.coords.norm();
        let inside = center_dist <= self.radius;

        if solid && inside {
            return PointProjection::new(true, *pt);
        }

        // The center projects on an arbitrary boundary point.
        let dir = if center_dist > 0.0 {
            pt.coords / center_dist
        } else {
            Vector::x()
        };

        PointProjection::new(inside, Point::from(dir * self.radius))
    }

    #[inline]
    fn project_local_point_and_get_feature(
        &self,
        pt: &Point<Real>,
    ) -> (PointProjection, FeatureId) {
        (self.project_local_point(pt, false), FeatureId::Face(0))
    }

    #[inline]
    fn distance_to_local_point(&self, pt: &Point<Real>, solid: bool) -> Real {
        let signed = pt.coords.norm() - self.radius;

        if solid {
            signed.max(0.0)
        } else {
            signed
        }
    }

    #[inline]
    fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        pt.coords.norm_squared() <= self.radius * self.radius
    }
}
