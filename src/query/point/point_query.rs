use crate::math::{Isometry, Point, Real, UnitVector};
use crate::shape::FeatureId;

/// The projection of a point on a shape.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PointProjection {
    /// Whether the projected point lies inside of the shape.
    pub is_inside: bool,
    /// The closest point of the shape.
    pub point: Point<Real>,
}

impl PointProjection {
    /// A projection at `point`.
    pub fn new(is_inside: bool, point: Point<Real>) -> Self {
        PointProjection { is_inside, point }
    }

    /// The same projection with its point moved to the frame `pos`.
    pub fn transform_by(&self, pos: &Isometry<Real>) -> Self {
        PointProjection::new(self.is_inside, pos * self.point)
    }
}

/// Point inclusion and projection on a shape.
///
/// Points given to the `local` methods are expressed in the local frame of
/// the shape. The other methods take the placement of the shape explicitly.
pub trait PointQuery {
    /// Projects a local point on `self`.
    ///
    /// When `solid` is `true`, a point inside of `self` projects on itself.
    /// Otherwise it projects on the boundary.
    fn project_local_point(&self, pt: &Point<Real>, solid: bool) -> PointProjection;

    /// Projects a local point on the boundary of `self` and reports the
    /// feature it landed on.
    fn project_local_point_and_get_feature(&self, pt: &Point<Real>)
        -> (PointProjection, FeatureId);

    /// An outward normal of `self` at `feature`, in local-space.
    ///
    /// Needed when a point lies on the boundary and its projection carries
    /// no direction.
    fn feature_normal(&self, _feature: FeatureId) -> Option<UnitVector<Real>> {
        None
    }

    /// Distance from a local point to `self`, negative inside when `solid` is `false`.
    fn distance_to_local_point(&self, pt: &Point<Real>, solid: bool) -> Real {
        let proj = self.project_local_point(pt, solid);
        let dist = na::distance(pt, &proj.point);

        if proj.is_inside && !solid {
            -dist
        } else {
            dist
        }
    }

    /// Whether a local point lies inside of `self`.
    fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        self.project_local_point(pt, true).is_inside
    }

    /// Projects a world-space point on `self` placed at `m`.
    fn project_point(&self, m: &Isometry<Real>, pt: &Point<Real>, solid: bool) -> PointProjection {
        let local = m.inverse_transform_point(pt);
        self.project_local_point(&local, solid).transform_by(m)
    }

    /// Whether a world-space point lies inside of `self` placed at `m`.
    #[inline]
    fn contains_point(&self, m: &Isometry<Real>, pt: &Point<Real>) -> bool {
        self.contains_local_point(&m.inverse_transform_point(pt))
    }
}

/// Point projection reporting a shape-specific location, e.g., barycentric
/// coordinates on a segment or a triangle.
pub trait PointQueryWithLocation {
    /// Where on the shape the projection landed.
    type Location;

    /// Projects a local point on `self`.
    fn project_local_point_and_get_location(
        &self,
        pt: &Point<Real>,
        solid: bool,
    ) -> (PointProjection, Self::Location);
}
