//! Shapes supported by narrow3d.

pub use self::ball::Ball;
pub use self::capsule::Capsule;
pub use self::compound::{Compound, CompoundData};
pub use self::convex_polyhedron::{ConvexPolyhedron, ConvexPolyhedronData};
#[cfg(test)]
pub(crate) use self::convex_polyhedron::unit_cube;
pub use self::cuboid::Cuboid;
pub use self::error::ShapeError;
pub use self::feature_id::FeatureId;
pub use self::heightfield::{HeightField, HeightFieldCellStatus, HeightFieldData};
pub use self::segment::{Segment, SegmentPointLocation};
pub use self::shape::{Shape, ShapeType};
pub use self::support_map::SupportMap;
pub use self::triangle::{Triangle, TrianglePointLocation};
pub use self::triangle_set::TriangleSet;
pub use self::trimesh::{TriMesh, TriMeshData};

mod ball;
mod capsule;
mod compound;
mod convex_polyhedron;
mod cuboid;
mod error;
mod feature_id;
mod heightfield;
mod segment;
mod shape;
mod support_map;
mod triangle;
mod triangle_set;
mod trimesh;
