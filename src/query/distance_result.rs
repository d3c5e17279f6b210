use core::mem;

use crate::math::{Isometry, Point, Real, UnitVector, Vector};
use crate::shape::FeatureId;

/// Closest points, normals, and signed distance between two shapes.
///
/// Everything is expressed in world-space.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct DistanceResult {
    /// Signed distance between the shapes. Negative if they penetrate.
    pub distance: Real,

    /// Closest point on the first shape.
    pub point1: Point<Real>,

    /// Closest point on the second shape.
    pub point2: Point<Real>,

    /// Outward normal of the first shape at `point1`.
    ///
    /// It points toward the second shape if they are separated.
    pub normal1: UnitVector<Real>,

    /// Outward normal of the second shape at `point2`.
    pub normal2: UnitVector<Real>,

    /// The feature of the first shape `point1` lies on.
    pub feature1: FeatureId,

    /// The feature of the second shape `point2` lies on.
    pub feature2: FeatureId,

    /// Index of the part of the first shape, if it is composite.
    pub sub_shape1: u32,

    /// Index of the part of the second shape, if it is composite.
    pub sub_shape2: u32,
}

impl DistanceResult {
    /// Creates a new result, with `normal2 = -normal1` and both sub-shape indices set to zero.
    #[inline]
    pub fn new(
        distance: Real,
        point1: Point<Real>,
        point2: Point<Real>,
        normal1: UnitVector<Real>,
        feature1: FeatureId,
        feature2: FeatureId,
    ) -> Self {
        DistanceResult {
            distance,
            point1,
            point2,
            normal1,
            normal2: -normal1,
            feature1,
            feature2,
            sub_shape1: 0,
            sub_shape2: 0,
        }
    }

    /// A result with an infinite distance.
    ///
    /// Returned for pairs with nothing to measure, e.g., a triangle mesh
    /// without any triangle.
    pub fn infinite() -> Self {
        Self::new(
            Real::MAX,
            Point::origin(),
            Point::origin(),
            Vector::x_axis(),
            FeatureId::Unknown,
            FeatureId::Unknown,
        )
    }

    /// Swaps every paired field of this result.
    #[inline]
    pub fn flip(&mut self) {
        mem::swap(&mut self.point1, &mut self.point2);
        mem::swap(&mut self.normal1, &mut self.normal2);
        mem::swap(&mut self.feature1, &mut self.feature2);
        mem::swap(&mut self.sub_shape1, &mut self.sub_shape2);
    }

    /// Returns this result with every paired field swapped.
    #[inline]
    pub fn flipped(mut self) -> Self {
        self.flip();
        self
    }

    /// Maps the points and normals of this result by `pos`.
    #[inline]
    pub fn transform_by(mut self, pos: &Isometry<Real>) -> Self {
        self.point1 = pos * self.point1;
        self.point2 = pos * self.point2;
        self.normal1 = pos.rotation * self.normal1;
        self.normal2 = pos.rotation * self.normal2;
        self
    }

    /// Sets the sub-shape indices of this result.
    #[inline]
    pub fn with_sub_shapes(mut self, sub_shape1: u32, sub_shape2: u32) -> Self {
        self.sub_shape1 = sub_shape1;
        self.sub_shape2 = sub_shape2;
        self
    }
}
