//! Definition of the segment shape.

use crate::math::{Isometry, Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::shape::SupportMap;

/// A segment shape.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Segment {
    /// The segment first point.
    pub a: Point<Real>,
    /// The segment second point.
    pub b: Point<Real>,
}

/// Logical description of the location of a point on a segment.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum SegmentPointLocation {
    /// The point lies on a vertex (0 for `a`, 1 for `b`).
    OnVertex(u32),
    /// The point lies on the segment interior, with the given barycentric
    /// coordinates relative to `a` and `b`.
    OnEdge([Real; 2]),
}

impl SegmentPointLocation {
    /// The barycentric coordinates corresponding to this point location.
    pub fn barycentric_coordinates(&self) -> [Real; 2] {
        match self {
            SegmentPointLocation::OnVertex(0) => [1.0, 0.0],
            SegmentPointLocation::OnVertex(_) => [0.0, 1.0],
            SegmentPointLocation::OnEdge(bcoords) => *bcoords,
        }
    }
}

impl Segment {
    /// Creates a new segment from two points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>) -> Segment {
        Segment { a, b }
    }

    /// The vector from `a` to `b`.
    #[inline]
    pub fn scaled_direction(&self) -> Vector<Real> {
        self.b - self.a
    }

    /// The length of this segment.
    #[inline]
    pub fn length(&self) -> Real {
        self.scaled_direction().norm()
    }

    /// The unit direction of this segment, `None` if it is degenerate.
    #[inline]
    pub fn direction(&self) -> Option<UnitVector<Real>> {
        UnitVector::try_new(self.scaled_direction(), DEFAULT_EPSILON)
    }

    /// The middle of this segment.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.a, &self.b)
    }

    /// This segment transformed by `m`.
    #[inline]
    pub fn transformed(&self, m: &Isometry<Real>) -> Self {
        Segment::new(m * self.a, m * self.b)
    }

    /// This segment with its endpoints scaled component-wise by `scale`.
    #[inline]
    pub fn scaled(&self, scale: &Vector<Real>) -> Self {
        Segment::new(
            self.a.coords.component_mul(scale).into(),
            self.b.coords.component_mul(scale).into(),
        )
    }

    /// The point of this segment at the given location.
    #[inline]
    pub fn point_at(&self, location: &SegmentPointLocation) -> Point<Real> {
        match *location {
            SegmentPointLocation::OnVertex(0) => self.a,
            SegmentPointLocation::OnVertex(_) => self.b,
            SegmentPointLocation::OnEdge(bcoords) => {
                self.a * bcoords[0] + self.b.coords * bcoords[1]
            }
        }
    }
}

impl SupportMap for Segment {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        if self.a.coords.dot(dir) >= self.b.coords.dot(dir) {
            self.a
        } else {
            self.b
        }
    }

    #[inline]
    fn local_interior_point(&self) -> Point<Real> {
        self.center()
    }
}
