//! Various unsorted geometrical operators.

pub use self::ccw_face_normal::ccw_face_normal;
pub use self::isometry_ops::IsometryOps;
pub use self::orthonormal::{any_orthogonal_unit, orthonormal_basis};
pub use self::point_cloud_support_point::{
    point_cloud_support_point, point_cloud_support_point_id,
};

mod ccw_face_normal;
mod isometry_ops;
mod orthonormal;
mod point_cloud_support_point;
