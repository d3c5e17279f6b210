//! Shape composed from the union of primitives.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Real};
use crate::shape::{Shape, ShapeError};

/// The immutable parts of a compound shape.
#[derive(Clone, Debug, PartialEq)]
pub struct CompoundData {
    parts: Vec<(Isometry<Real>, Shape)>,
    aabbs: Vec<Aabb>,
    aabb: Aabb,
}

/// A compound shape with an aabb bounding volume.
///
/// A compound shape is a shape composed of the union of several primitive
/// shapes, each with its own placement relative to the compound. Parts are
/// visited in order, and their index is reported as the sub-shape index of
/// query results.
#[derive(Clone, Debug, PartialEq)]
pub struct Compound {
    data: Arc<CompoundData>,
}

impl Compound {
    /// Builds a new compound shape.
    ///
    /// Fails if no part is given or if one of them is itself a composite shape.
    pub fn new(parts: Vec<(Isometry<Real>, Shape)>) -> Result<Compound, ShapeError> {
        if parts.is_empty() {
            return Err(ShapeError::EmptyCompound);
        }

        let mut aabbs = Vec::with_capacity(parts.len());
        let mut aabb = Aabb::new_invalid();

        for (i, (delta, shape)) in parts.iter().enumerate() {
            if shape.is_composite() {
                return Err(ShapeError::NestedComposite(i));
            }

            let part_aabb = shape.compute_aabb(delta);
            aabb.merge(&part_aabb);
            aabbs.push(part_aabb);
        }

        Ok(Compound {
            data: Arc::new(CompoundData { parts, aabbs, aabb }),
        })
    }

    /// The parts of this compound shape with their local placements.
    #[inline]
    pub fn parts(&self) -> &[(Isometry<Real>, Shape)] {
        &self.data.parts
    }

    /// The part with the given index.
    #[inline]
    pub fn part(&self, i: usize) -> Option<&(Isometry<Real>, Shape)> {
        self.data.parts.get(i)
    }

    /// The AABB of each part, in the local frame of this compound.
    #[inline]
    pub fn aabbs(&self) -> &[Aabb] {
        &self.data.aabbs
    }

    /// The AABB of this compound in its local frame.
    #[inline]
    pub fn local_aabb(&self) -> &Aabb {
        &self.data.aabb
    }
}
