//! Reduction of queries involving compounds, triangle meshes and heightfields.
//!
//! Every composite query runs the pairwise queries against the relevant
//! sub-shapes and keeps the best result with [`Best`].

pub use self::best::{Best, Ranked};
pub use self::compound::{cast_shape_compound, distance_all_compound_shape, distance_shape_compound};
pub use self::triangle_set::{
    cast_shape_triangle_set, distance_all_triangle_set_shape, distance_shape_triangle_set,
};

mod best;
mod compound;
mod triangle_set;
