use tracing::debug;

use crate::error::Result;
use crate::geometry::{ConvexPolyhedron, Cuboid, Pyramid};

use super::polyhedron_clip::intersect_convex;
use super::IntersectionLocus;

/// Intersection of an axis-aligned box with a pyramid.
///
/// The pyramid's five faces are clipped against the six half-spaces of the
/// box. `plane_eps` is the relative threshold for the pyramid face planes,
/// `eps` the absolute one for clipping.
///
/// # Errors
///
/// Returns an error if a pyramid face plane is degenerate.
pub(super) fn intersect_cuboid_pyramid(
    cuboid: &Cuboid,
    pyramid: &Pyramid,
    plane_eps: f64,
    eps: f64,
) -> Result<IntersectionLocus> {
    let pyramid = ConvexPolyhedron::from_pyramid(pyramid, plane_eps)?;
    let locus = intersect_convex(&pyramid, &ConvexPolyhedron::from_cuboid(cuboid), eps);
    debug!(
        points = locus.points.len(),
        faces = locus.faces.len(),
        "cuboid-pyramid clipped"
    );
    Ok(locus)
}
