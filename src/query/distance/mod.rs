//! Distance kernels shared by the pairwise solvers.

pub use self::distance_ball_point_query::distance_ball_point_query;
pub use self::distance_support_map_support_map::{
    distance_support_map_support_map, refine_witnesses,
};

mod distance_ball_point_query;
mod distance_support_map_support_map;
