//! Ray definition and ray-casting primitives used by the sweep queries.

pub use self::ray::Ray;
pub use self::ray_ball::ray_toi_with_ball;
pub use self::ray_capsule::ray_toi_with_capsule;
pub use self::ray_halfspace::ray_toi_with_halfspace;

mod ray;
mod ray_ball;
mod ray_capsule;
mod ray_halfspace;
