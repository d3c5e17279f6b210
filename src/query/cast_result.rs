use core::mem;

use crate::math::{Point, Real, UnitVector, Vector};

/// The first contact between a shape swept along a straight line and a static target.
///
/// Everything is expressed in world-space.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CastResult {
    /// Distance travelled along the sweep before the impact.
    pub distance: Real,

    /// Contact point at the time of impact.
    pub point: Point<Real>,

    /// Outward normal of the swept shape at the contact.
    pub normal1: UnitVector<Real>,

    /// Outward normal of the target at the contact.
    pub normal2: UnitVector<Real>,

    /// Index of the part of the swept shape, if it is composite.
    pub sub_shape1: u32,

    /// Index of the part of the target, if it is composite.
    pub sub_shape2: u32,
}

impl CastResult {
    /// Describes the same impact with the roles of the swept shape and the target exchanged.
    ///
    /// `self` must result from sweeping the target along `-dir` toward the
    /// swept shape: the contact point is moved back by the travelled
    /// distance so that it lies where the original swept shape meets the target.
    pub fn reversed(mut self, dir: &UnitVector<Real>) -> Self {
        self.point += dir.into_inner() * self.distance;
        mem::swap(&mut self.normal1, &mut self.normal2);
        mem::swap(&mut self.sub_shape1, &mut self.sub_shape2);
        self
    }

    /// The translation of the swept shape at the time of impact.
    pub fn translation(&self, dir: &UnitVector<Real>) -> Vector<Real> {
        dir.into_inner() * self.distance
    }
}
