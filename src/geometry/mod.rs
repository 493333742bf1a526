mod plane;
mod polyhedron;
pub mod solid;

pub use plane::Plane;
pub use polyhedron::ConvexPolyhedron;
pub use solid::{Cuboid, Pyramid, Solid, SolidKind, Sphere};
