use crate::bounding_volume::Aabb;
use crate::shape::Triangle;

/// A composite shape made of triangles indexed by a spatial structure.
///
/// Implemented by [`TriMesh`](crate::shape::TriMesh) (AABB tree) and
/// [`HeightField`](crate::shape::HeightField) (regular grid). Every returned
/// triangle is expressed in the local frame of the set, scale included.
pub trait TriangleSet {
    /// The AABB of the whole set in its local frame.
    fn local_aabb(&self) -> Aabb;

    /// The triangle with the given identifier, `None` if it doesn't exist or was removed.
    fn triangle(&self, id: u32) -> Option<Triangle>;

    /// Calls `f` with the identifier of every triangle whose bounds may
    /// intersect `aabb`, expressed in the local frame of the set.
    ///
    /// Stops as soon as `f` returns `false`.
    fn find_candidates(&self, aabb: &Aabb, f: &mut dyn FnMut(u32) -> bool);
}
