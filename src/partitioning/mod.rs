//! Spatial partitioning tools.

pub use self::bvh::{Bvh, BvhNode};

mod bvh;
