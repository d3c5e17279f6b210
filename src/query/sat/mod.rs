//! Application of the Separating-Axis-Theorem (SAT).

pub use self::sat_cuboid_cuboid::*;

mod sat_cuboid_cuboid;
