//! Point inclusion and projection.

#[doc(inline)]
pub use self::point_query::{PointProjection, PointQuery, PointQueryWithLocation};
pub use self::point_support_map::project_exterior_point_on_support_map;

mod point_ball;
mod point_capsule;
mod point_convex_polyhedron;
mod point_cuboid;
#[doc(hidden)]
pub mod point_query;
mod point_segment;
mod point_support_map;
mod point_triangle;
