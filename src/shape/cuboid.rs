//! Support mapping based Cuboid shape.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::shape::SupportMap;

/// Shape of a box, centered at the origin of its local frame.
///
/// Vertex `i` has the sign of its `k`-th coordinate given by bit `k` of `i`
/// (set means positive). Face `k < 3` has the outward normal `+e_k`, face
/// `k + 3` has `-e_k`. Edge `4 * k + s` is parallel to `e_k`, `s` holding the
/// signs of the two other coordinates in increasing axis order.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Cuboid {
    /// The half-extents of the cuboid.
    pub half_extents: Vector<Real>,
}

impl Cuboid {
    /// Creates a new box from its half-extents.
    #[inline]
    pub fn new(half_extents: Vector<Real>) -> Cuboid {
        Cuboid { half_extents }
    }

    /// The AABB of this cuboid in its local frame.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_half_extents(Point::origin(), self.half_extents)
    }

    /// The vertex with the given identifier.
    pub fn vertex(&self, id: u32) -> Point<Real> {
        let mut res = self.half_extents;
        for k in 0..3 {
            if id & (1 << k) == 0 {
                res[k] = -res[k];
            }
        }
        Point::from(res)
    }
}

impl SupportMap for Cuboid {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        Point::from(
            dir.zip_map(&self.half_extents, |d, h| if d < 0.0 { -h } else { h }),
        )
    }
}
