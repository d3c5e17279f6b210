use crate::approx::AbsDiffEq;
use crate::math::{Point, Real, Vector};
use crate::query::{PointProjection, PointQuery, PointQueryWithLocation};
use crate::shape::{Capsule, FeatureId, SegmentPointLocation};
use crate::utils;
use na::Unit;

impl PointQuery for Capsule {
    #[inline]
    fn project_local_point(&self, pt: &Point<Real>, solid: bool) -> PointProjection {
        self.project_local_point_and_get_location(pt, solid).0
    }

    #[inline]
    fn project_local_point_and_get_feature(
        &self,
        pt: &Point<Real>,
    ) -> (PointProjection, FeatureId) {
        let (proj, loc) = self.project_local_point_and_get_location(pt, false);
        let feature = match loc {
            SegmentPointLocation::OnVertex(i) => FeatureId::Vertex(i),
            SegmentPointLocation::OnEdge(..) => FeatureId::Edge(0),
        };

        (proj, feature)
    }
}

impl PointQueryWithLocation for Capsule {
    /// The location of the projection of the point on the capsule core segment.
    type Location = SegmentPointLocation;

    fn project_local_point_and_get_location(
        &self,
        pt: &Point<Real>,
        solid: bool,
    ) -> (PointProjection, Self::Location) {
        let (proj, loc) = self.segment.project_local_point_and_get_location(pt, solid);
        let dproj = *pt - proj.point;

        if let Some((dir, dist)) = Unit::try_new_and_get(dproj, Real::default_epsilon()) {
            let inside = dist <= self.radius;
            if solid && inside {
                (PointProjection::new(true, *pt), loc)
            } else {
                (
                    PointProjection::new(inside, proj.point + dir.into_inner() * self.radius),
                    loc,
                )
            }
        } else if solid {
            (PointProjection::new(true, *pt), loc)
        } else {
            // The point lies on the core segment.
            let dir = match self.segment.direction() {
                Some(axis) => utils::any_orthogonal_unit(&axis),
                None => Vector::y_axis(),
            };
            (
                PointProjection::new(true, proj.point + dir.into_inner() * self.radius),
                loc,
            )
        }
    }
}
