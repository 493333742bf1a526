//! Pairwise intersection of cuboids, spheres and pyramids.
//!
//! [`CalculateIntersection`] evaluates every unordered pair of input solids
//! and collects the result per pair. Polyhedral pairs are clipped against
//! each other's half-spaces; pairs involving a sphere intersect the sphere
//! with the other solid's faces and edges.

mod config;
mod cuboid_pyramid;
mod cuboid_sphere;
mod engine;
mod polyhedron_clip;
mod result;
mod sphere_face;
mod sphere_pyramid;
mod sphere_sphere;

pub use config::{IntersectConfig, MIN_ARC_SEGMENTS};
pub use engine::{calculate_intersection, intersect_pair, CalculateIntersection};
pub use result::{IntersectionLocus, IntersectionResult, PairIntersection};
