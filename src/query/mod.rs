//! Non-persistent geometric queries.
//!
//! # General cases
//! The most general functions provided by this module are:
//!
//! * [`distance_between()`] to compute the signed distance, the closest points and the normals
//!   between two shapes, penetrating or not.
//! * [`collider_cast()`] to determine when and where a shape moving along a straight line first
//!   hits another one.
//! * [`distance_between_all()`] to compute the distance to every sub-shape of a composite shape
//!   within a given distance.
//!
//! Point projection can be achieved by importing the [`PointQuery`] trait.
//!
//! # Specific cases
//! The functions exported by the `pairwise` submodule solve a single pair of shape types known at
//! compile-time. They have the form `[operation]_[shape1]_[shape2]()` where `[operation]` is
//! `distance` or `cast`, and `[shape1]` precedes `[shape2]` in the
//! [`ShapeType`](crate::shape::ShapeType) order.

pub use self::cast_result::CastResult;
pub use self::dispatch::{
    collider_cast, collider_cast_with_options, distance_between, distance_between_all,
};
pub use self::distance_result::DistanceResult;
pub use self::error::{CastError, MprStage};
pub use self::manifold::{ContactManifold, ManifoldKind, TrackedContact, MAX_MANIFOLD_POINTS};
pub use self::options::{CastOptions, FaultPolicy};
pub use self::point::{PointProjection, PointQuery, PointQueryWithLocation};
pub use self::ray::Ray;

pub mod batch;
mod cast_result;
pub mod closest_points;
pub mod composite;
mod dispatch;
pub mod distance;
mod distance_result;
pub mod epa;
mod error;
pub mod gjk;
mod manifold;
pub mod mpr;
mod options;
pub mod pairwise;
pub mod point;
pub mod ray;
pub mod sat;
