//! Implementation details of the Minkowski Portal Refinement algorithm, applied to linear sweeps.

pub use self::mpr::cast_support_maps;

mod mpr;
