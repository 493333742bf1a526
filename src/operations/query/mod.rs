mod bounding_box;
mod closest_point;

pub use bounding_box::{Aabb, BoundingBox};
pub use closest_point::{ClosestPointOnSegment, ClosestPointResult};
