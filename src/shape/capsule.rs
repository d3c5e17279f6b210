use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use crate::shape::{Segment, SupportMap};
use na::Unit;

/// A capsule shape defined as a round segment.
///
/// Every query treats it as its core [`Segment`] dilated by `radius`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Capsule {
    /// The axis and endpoint centers of the capsule.
    pub segment: Segment,
    /// The radius of the capsule.
    pub radius: Real,
}

impl Capsule {
    /// Creates a new capsule aligned with the `y` axis and with the given half-height and radius.
    pub fn new_y(half_height: Real, radius: Real) -> Self {
        let b = Point::from(Vector::y() * half_height);
        Self::new(-b, b, radius)
    }

    /// Creates a new capsule defined as the segment between `a` and `b` and with the given `radius`.
    pub fn new(a: Point<Real>, b: Point<Real>, radius: Real) -> Self {
        let segment = Segment::new(a, b);
        Self { segment, radius }
    }

    /// The height of this capsule, not counting its end caps.
    pub fn height(&self) -> Real {
        self.segment.length()
    }

    /// The half-height of this capsule, not counting its end caps.
    pub fn half_height(&self) -> Real {
        self.height() / 2.0
    }

    /// The center of this capsule.
    pub fn center(&self) -> Point<Real> {
        self.segment.center()
    }

    /// This capsule transformed by `pos`.
    pub fn transformed(&self, pos: &Isometry<Real>) -> Self {
        Self {
            segment: self.segment.transformed(pos),
            radius: self.radius,
        }
    }
}

impl SupportMap for Capsule {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let dir = Unit::try_new(*dir, DEFAULT_EPSILON).unwrap_or_else(Vector::x_axis);
        self.local_support_point_toward(&dir)
    }

    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.segment.local_support_point_toward(dir) + **dir * self.radius
    }

    fn local_interior_point(&self) -> Point<Real> {
        self.center()
    }
}
