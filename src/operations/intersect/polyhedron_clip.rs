use tracing::trace;

use crate::geometry::{ConvexPolyhedron, Plane};
use crate::math::intersect_3d::segment_plane_intersection;
use crate::math::polygon_3d::{order_coplanar_points, polygon_area_3d, polygon_vector_area};
use crate::math::vector::{dedup_points, dedup_polygon};
use crate::math::Point3;

use super::IntersectionLocus;

/// Clips a polygon to the half-space `plane.signed_distance(x) <= eps`.
///
/// Vertices on the plane and new crossing points are also appended to
/// `on_plane` so the caller can build the cap.
fn clip_polygon(
    polygon: &[Point3],
    plane: &Plane,
    eps: f64,
    on_plane: &mut Vec<Point3>,
) -> Vec<Point3> {
    let n = polygon.len();
    let mut out = Vec::with_capacity(n + 1);

    for i in 0..n {
        let cur = polygon[i];
        let next = polygon[(i + 1) % n];
        let dc = plane.signed_distance(&cur);
        let dn = plane.signed_distance(&next);

        if dc <= eps {
            out.push(cur);
            if dc >= -eps {
                on_plane.push(cur);
            }
        }
        if (dc > eps && dn < -eps) || (dc < -eps && dn > eps) {
            if let Some(x) = segment_plane_intersection(&cur, &next, plane, eps) {
                out.push(x);
                on_plane.push(x);
            }
        }
    }
    out
}

/// Clips the closed surface `faces` by each of `planes`.
///
/// Each cut is closed with a cap polygon built from the points the clip
/// left on the cutting plane, so after the last plane the face list bounds
/// the common volume. Returns the faces of the clipped surface, possibly degenerate, or an
/// empty list when nothing survives.
pub(super) fn clip_polyhedron(
    faces: &[Vec<Point3>],
    planes: &[Plane],
    eps: f64,
) -> Vec<Vec<Point3>> {
    let mut current: Vec<Vec<Point3>> = faces.to_vec();

    for plane in planes {
        let mut on_plane = Vec::new();
        let mut next: Vec<Vec<Point3>> = current
            .iter()
            .map(|face| dedup_polygon(&clip_polygon(face, plane, eps, &mut on_plane), eps))
            .filter(|face| !face.is_empty())
            .collect();

        if next.is_empty() {
            return next;
        }

        let already_capped = next
            .iter()
            .any(|f| f.len() >= 3 && f.iter().all(|p| plane.signed_distance(p).abs() <= eps));
        if !already_capped {
            let cap_points = dedup_points(&on_plane, eps);
            if cap_points.len() >= 3 {
                let cap = order_coplanar_points(&cap_points, plane.normal());
                if polygon_area_3d(&cap, plane.normal()) > eps * eps {
                    trace!(vertices = cap.len(), "cap added");
                    next.push(cap);
                }
            }
        }
        current = next;
    }
    current
}

/// Common part of two convex polyhedra.
///
/// Faces of positive area become locus faces; slivers left by solids that
/// only touch contribute their points.
pub(super) fn intersect_convex(
    a: &ConvexPolyhedron,
    b: &ConvexPolyhedron,
    eps: f64,
) -> IntersectionLocus {
    let clipped = clip_polyhedron(a.faces(), b.planes(), eps);

    let mut faces = Vec::new();
    let mut isolated = Vec::new();
    for face in clipped {
        if polygon_vector_area(&face).norm() > eps * eps {
            faces.push(face);
        } else {
            isolated.extend(face);
        }
    }

    IntersectionLocus::assemble(Vec::new(), faces, &isolated, eps)
}
