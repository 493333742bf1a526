use tracing::debug;

use crate::error::Result;
use crate::geometry::{ConvexPolyhedron, Pyramid, Sphere};

use super::sphere_face::sphere_polyhedron_locus;
use super::IntersectionLocus;

/// Intersection of a sphere with a pyramid.
///
/// Each of the five faces contributes the part of its plane section inside
/// the face; the eight edges contribute tangent points. A ball strictly
/// inside the pyramid is empty.
///
/// # Errors
///
/// Returns an error if a pyramid face plane is degenerate.
pub(super) fn intersect_sphere_pyramid(
    sphere: &Sphere,
    pyramid: &Pyramid,
    segments: usize,
    plane_eps: f64,
    eps: f64,
) -> Result<IntersectionLocus> {
    let poly = ConvexPolyhedron::from_pyramid(pyramid, plane_eps)?;
    let center = sphere.center();
    let reach = sphere.radius() + eps;

    if poly.planes().iter().any(|p| p.signed_distance(center) > reach) {
        debug!("sphere misses pyramid");
        return Ok(IntersectionLocus::default());
    }
    if poly
        .planes()
        .iter()
        .all(|p| p.signed_distance(center) < -reach)
    {
        debug!("sphere strictly inside pyramid");
        return Ok(IntersectionLocus::default());
    }

    Ok(sphere_polyhedron_locus(
        sphere,
        &poly,
        &pyramid.edges(),
        segments,
        eps,
    ))
}
