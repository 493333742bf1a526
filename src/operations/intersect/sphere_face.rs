use std::cmp::Ordering;
use std::f64::consts::TAU;

use tracing::trace;

use crate::geometry::{ConvexPolyhedron, Plane, Sphere};
use crate::math::intersect_3d::{
    circle_segment_intersections, segment_sphere_intersections, sphere_plane_circle, PlaneCircle,
};
use crate::math::polygon_3d::point_in_convex_polygon_3d;
use crate::math::{distance, Point3};
use crate::operations::query::ClosestPointOnSegment;
use crate::tessellation::Polyline;

use super::IntersectionLocus;

/// Sphere surface and solid ball against a convex polyhedron's boundary.
///
/// Each face plane cuts the sphere in a circle; the part of that circle
/// inside the face polygon is the face's share of the locus. Faces lying
/// wholly inside the ball are reported as outlines. `edges` contribute the
/// points where they pierce or graze the sphere, which is all a box
/// flattened to a segment has to offer.
pub(super) fn sphere_polyhedron_locus(
    sphere: &Sphere,
    poly: &ConvexPolyhedron,
    edges: &[(Point3, Point3)],
    segments: usize,
    eps: f64,
) -> IntersectionLocus {
    let center = sphere.center();
    let radius = sphere.radius();

    let mut curves = Vec::new();
    let mut faces = Vec::new();
    let mut isolated = Vec::new();

    let planes = poly.planes();
    for (index, (face, plane)) in poly.faces().iter().zip(planes).enumerate() {
        // A flat solid has both sides on one plane; the second adds nothing.
        if planes[..index].iter().any(|seen| seen.is_flip_of(plane, eps)) {
            continue;
        }
        if face.iter().all(|v| distance(v, center) <= radius + eps) {
            trace!(face = index, "face enclosed by sphere");
            faces.push(face.clone());
            continue;
        }
        let Some(circle) = sphere_plane_circle(center, radius, plane, eps) else {
            continue;
        };
        if circle.radius <= eps {
            if point_in_convex_polygon_3d(&circle.center, face, plane.normal(), eps) {
                trace!(face = index, "sphere tangent to face");
                isolated.push(circle.center);
            }
            continue;
        }
        let arcs = clip_circle_to_face(&circle, face, plane, segments, eps);
        trace!(face = index, arcs = arcs.len(), radius = circle.radius, "face section");
        curves.extend(arcs);
    }

    for (a, b) in edges {
        let closest = ClosestPointOnSegment::new(*a, *b, *center).execute();
        if (closest.distance - radius).abs() <= eps {
            isolated.push(closest.point);
        }
        isolated.extend(segment_sphere_intersections(a, b, center, radius, eps));
    }

    IntersectionLocus::assemble(curves, faces, &isolated, eps)
}

/// Parts of `circle` inside the convex `face`, as polylines.
///
/// The circle is sampled at `segments` uniform angles plus the exact angles
/// where it crosses the face edges. Every sub-arc between consecutive
/// angles is kept or dropped by testing its midpoint, so arcs start and end
/// exactly on the face boundary.
pub(super) fn clip_circle_to_face(
    circle: &PlaneCircle,
    face: &[Point3],
    plane: &Plane,
    segments: usize,
    eps: f64,
) -> Vec<Polyline> {
    let (u, v) = plane.basis();

    #[allow(clippy::cast_precision_loss)]
    let mut angles: Vec<f64> = (0..segments)
        .map(|k| TAU * k as f64 / segments as f64)
        .collect();
    let n = face.len();
    for i in 0..n {
        for x in circle_segment_intersections(circle, &face[i], &face[(i + 1) % n], eps) {
            angles.push(circle.angle_of(&u, &v, &x));
        }
    }
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let angle_eps = eps / circle.radius;
    angles.dedup_by(|b, a| *b - *a <= angle_eps);
    while angles.len() > 1 && angles[0] + TAU - angles[angles.len() - 1] <= angle_eps {
        angles.pop();
    }

    let count = angles.len();
    let span = |i: usize| {
        let start = angles[i];
        let end = if i + 1 == count { angles[0] + TAU } else { angles[i + 1] };
        (start, end)
    };
    let inside: Vec<bool> = (0..count)
        .map(|i| {
            let (start, end) = span(i);
            let mid = circle.point_at(&u, &v, 0.5 * (start + end));
            point_in_convex_polygon_3d(&mid, face, plane.normal(), eps)
        })
        .collect();

    if inside.iter().all(|k| *k) {
        return vec![Polyline {
            points: angles.iter().map(|t| circle.point_at(&u, &v, *t)).collect(),
            closed: true,
        }];
    }
    let Some(first_out) = inside.iter().position(|k| !*k) else {
        return Vec::new();
    };

    let mut arcs = Vec::new();
    let mut run: Vec<Point3> = Vec::new();
    for step in 1..=count {
        let i = (first_out + step) % count;
        if inside[i] {
            let (start, end) = span(i);
            if run.is_empty() {
                run.push(circle.point_at(&u, &v, start));
            }
            run.push(circle.point_at(&u, &v, end));
        } else if !run.is_empty() {
            arcs.push(Polyline {
                points: std::mem::take(&mut run),
                closed: false,
            });
        }
    }
    if !run.is_empty() {
        arcs.push(Polyline {
            points: run,
            closed: false,
        });
    }
    arcs
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Cuboid;
    use crate::math::Vector3;

    const EPS: f64 = 1e-9;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn unit_square() -> Vec<Point3> {
        vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)]
    }

    fn boxed(bounds: [f64; 6]) -> ConvexPolyhedron {
        ConvexPolyhedron::from_cuboid(&Cuboid::from_bounds(bounds).unwrap())
    }

    fn unit_cube() -> ConvexPolyhedron {
        boxed([0.0, 0.0, 0.0, 1.0, 1.0, 1.0])
    }

    fn z_plane() -> Plane {
        Plane::from_normal(&Point3::origin(), &Vector3::z(), EPS).unwrap()
    }

    fn circle(center: Point3, radius: f64) -> PlaneCircle {
        PlaneCircle {
            center,
            radius,
            normal: Vector3::z(),
        }
    }

    #[test]
    fn circle_inside_face_is_closed() {
        let c = circle(p(0.5, 0.5, 0.0), 0.25);
        let arcs = clip_circle_to_face(&c, &unit_square(), &z_plane(), 32, EPS);
        assert_eq!(arcs.len(), 1);
        assert!(arcs[0].closed);
        assert_eq!(arcs[0].points.len(), 32);
    }

    #[test]
    fn circle_outside_face_is_dropped() {
        let c = circle(p(5.0, 5.0, 0.0), 0.5);
        let arcs = clip_circle_to_face(&c, &unit_square(), &z_plane(), 32, EPS);
        assert!(arcs.is_empty());
    }

    #[test]
    fn corner_circle_gives_quarter_arc() {
        let c = circle(p(0.0, 0.0, 0.0), 0.5);
        let arcs = clip_circle_to_face(&c, &unit_square(), &z_plane(), 64, EPS);
        assert_eq!(arcs.len(), 1);
        let arc = &arcs[0];
        assert!(!arc.closed);
        // Ends exactly on the two edges through the corner.
        let first = arc.points[0];
        let last = arc.points[arc.points.len() - 1];
        let on_axis = |q: &Point3| q.x.abs() < 1e-9 || q.y.abs() < 1e-9;
        assert!(on_axis(&first) && on_axis(&last));
        for q in &arc.points {
            assert!(((q - p(0.0, 0.0, 0.0)).norm() - 0.5).abs() < 1e-9);
            assert!(q.x >= -1e-9 && q.y >= -1e-9);
        }
    }

    #[test]
    fn circle_crossing_two_opposite_edges_gives_two_arcs() {
        let strip = vec![
            p(-2.0, -0.5, 0.0),
            p(2.0, -0.5, 0.0),
            p(2.0, 0.5, 0.0),
            p(-2.0, 0.5, 0.0),
        ];
        let c = circle(Point3::origin(), 1.0);
        let arcs = clip_circle_to_face(&c, &strip, &z_plane(), 64, EPS);
        assert_eq!(arcs.len(), 2);
        for arc in &arcs {
            assert!(arc.points.iter().all(|q| q.y.abs() <= 0.5 + 1e-9));
        }
    }

    #[test]
    fn enclosing_sphere_reports_all_faces() {
        let cube = unit_cube();
        let sphere = Sphere::new(p(0.5, 0.5, 0.5), 5.0).unwrap();
        let locus = sphere_polyhedron_locus(&sphere, &cube, &cube.edges(EPS), 64, EPS);
        assert_eq!(locus.faces.len(), 6);
        assert_eq!(locus.points.len(), 8);
        assert!(locus.curves.is_empty());
    }

    #[test]
    fn sphere_touching_edge_gives_tangent_point() {
        let cube = unit_cube();
        // Closest to the edge x = 1, y = 1.
        let d = 0.5_f64.sqrt();
        let sphere = Sphere::new(p(1.5, 1.5, 0.5), d).unwrap();
        let locus = sphere_polyhedron_locus(&sphere, &cube, &cube.edges(EPS), 64, EPS);
        assert!(locus.curves.is_empty());
        assert_eq!(locus.points.len(), 1);
        assert!((locus.points[0] - p(1.0, 1.0, 0.5)).norm() < 1e-9);
    }

    #[test]
    fn segment_box_through_sphere_gives_crossings() {
        let segment = boxed([0.0, 1.0, 1.0, 2.0, 1.0, 1.0]);
        let sphere = Sphere::new(p(1.0, 1.0, 1.0), 0.5).unwrap();
        let locus = sphere_polyhedron_locus(&sphere, &segment, &segment.edges(EPS), 64, EPS);
        assert_eq!(locus.points.len(), 2);
        assert!(locus.points.iter().any(|q| (q - p(0.5, 1.0, 1.0)).norm() < 1e-9));
        assert!(locus.points.iter().any(|q| (q - p(1.5, 1.0, 1.0)).norm() < 1e-9));
    }

    #[test]
    fn flat_box_reports_its_section_once() {
        let sheet = boxed([0.0, 0.0, 1.0, 2.0, 2.0, 1.0]);
        let sphere = Sphere::new(p(1.0, 1.0, 1.0), 0.5).unwrap();
        let locus = sphere_polyhedron_locus(&sphere, &sheet, &sheet.edges(EPS), 64, EPS);
        assert_eq!(locus.curves.len(), 1);
        assert!(locus.curves[0].closed);
        assert_eq!(locus.points.len(), 64);
    }

    #[test]
    fn crossing_edges_agree_with_arc_ends() {
        let cube = unit_cube();
        let sphere = Sphere::new(p(1.0, 1.0, 1.0), 0.5).unwrap();
        let locus = sphere_polyhedron_locus(&sphere, &cube, &cube.edges(EPS), 64, EPS);
        assert_eq!(locus.curves.len(), 3);
        for q in [p(0.5, 1.0, 1.0), p(1.0, 0.5, 1.0), p(1.0, 1.0, 0.5)] {
            assert!(locus.points.iter().any(|x| (x - q).norm() < 1e-9));
        }
        let arc_points: usize = locus.curves.iter().map(|c| c.points.len()).sum();
        assert_eq!(locus.points.len(), arc_points - 3);
    }
}
