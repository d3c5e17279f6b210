//! Closed-form closest points between primitive features.

pub use self::segment_segment::{
    closest_points_segment_segment, closest_points_segment_segment_with_locations,
};
pub use self::segment_triangle::{closest_points_segment_triangle, segment_triangle_intersection};

mod segment_segment;
mod segment_triangle;
