use crate::math::{Point, Real};
use crate::query::pairwise::segment_feature;
use crate::query::{PointProjection, PointQuery, PointQueryWithLocation};
use crate::shape::{FeatureId, Segment, SegmentPointLocation};

impl PointQuery for Segment {
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
        (proj, segment_feature(&loc))
    }
}

impl PointQueryWithLocation for Segment {
    type Location = SegmentPointLocation;

    /// A segment has no interior: `solid` has no effect.
    #[inline]
    fn project_local_point_and_get_location(
        &self,
        pt: &Point<Real>,
        _: bool,
    ) -> (PointProjection, Self::Location) {
        let ab = self.b - self.a;
        let sqlen = ab.norm_squared();
        // Parameter of the orthogonal projection on the supporting line.
        let t = if sqlen > 0.0 {
            ab.dot(&(pt - self.a)) / sqlen
        } else {
            0.0
        };

        let (proj, location) = if t <= 0.0 {
            (self.a, SegmentPointLocation::OnVertex(0))
        } else if t >= 1.0 {
            (self.b, SegmentPointLocation::OnVertex(1))
        } else {
            (self.a + ab * t, SegmentPointLocation::OnEdge([1.0 - t, t]))
        };

        (PointProjection::new(relative_eq!(proj, *pt), proj), location)
    }
}
