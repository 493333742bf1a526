use tracing::debug;

use crate::geometry::{ConvexPolyhedron, Cuboid, Sphere};

use super::sphere_face::sphere_polyhedron_locus;
use super::IntersectionLocus;

/// Intersection of an axis-aligned box with a sphere.
///
/// Empty when the ball misses the box, or when the ball sits strictly
/// inside it without reaching any face.
pub(super) fn intersect_cuboid_sphere(
    cuboid: &Cuboid,
    sphere: &Sphere,
    segments: usize,
    eps: f64,
) -> IntersectionLocus {
    let center = sphere.center();
    let reach = sphere.radius() + eps;
    if cuboid.squared_distance_to(center) > reach * reach {
        debug!("sphere misses cuboid");
        return IntersectionLocus::default();
    }

    let poly = ConvexPolyhedron::from_cuboid(cuboid);
    if poly
        .planes()
        .iter()
        .all(|p| p.signed_distance(center) < -reach)
    {
        debug!("sphere strictly inside cuboid");
        return IntersectionLocus::default();
    }

    sphere_polyhedron_locus(sphere, &poly, &poly.edges(eps), segments, eps)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    const EPS: f64 = 1e-9;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn box2() -> Cuboid {
        Cuboid::from_bounds([0.0, 0.0, 0.0, 2.0, 2.0, 2.0]).unwrap()
    }

    #[test]
    fn sphere_inside_box_is_empty() {
        let s = Sphere::new(p(1.0, 1.0, 1.0), 0.5).unwrap();
        assert!(intersect_cuboid_sphere(&box2(), &s, 64, EPS).is_empty());
    }

    #[test]
    fn far_sphere_is_empty() {
        let s = Sphere::new(p(5.0, 5.0, 5.0), 1.0).unwrap();
        assert!(intersect_cuboid_sphere(&box2(), &s, 64, EPS).is_empty());
    }

    #[test]
    fn sphere_on_face_gives_full_circle() {
        let s = Sphere::new(p(2.0, 1.0, 1.0), 0.5).unwrap();
        let locus = intersect_cuboid_sphere(&box2(), &s, 64, EPS);
        assert_eq!(locus.curves.len(), 1);
        let circle = &locus.curves[0];
        assert!(circle.closed);
        for q in &circle.points {
            assert!((q.x - 2.0).abs() < 1e-12);
            assert!(((q - s.center()).norm() - 0.5).abs() < 1e-9);
        }
        assert_eq!(locus.points.len(), 64);
    }

    #[test]
    fn sphere_over_corner_gives_three_arcs() {
        let s = Sphere::new(p(2.0, 2.0, 2.0), 1.0).unwrap();
        let locus = intersect_cuboid_sphere(&box2(), &s, 64, EPS);
        assert_eq!(locus.curves.len(), 3);
        assert!(locus.curves.iter().all(|c| !c.closed));
        for q in &locus.points {
            assert!(((q - s.center()).norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn touching_sphere_gives_single_point() {
        let s = Sphere::new(p(3.0, 1.0, 1.0), 1.0).unwrap();
        let locus = intersect_cuboid_sphere(&box2(), &s, 64, EPS);
        assert_eq!(locus.points.len(), 1);
        assert!((locus.points[0] - p(2.0, 1.0, 1.0)).norm() < 1e-9);
    }

    #[test]
    fn zero_radius_sphere_on_face_is_a_point() {
        let s = Sphere::new(p(0.0, 1.0, 1.0), 0.0).unwrap();
        let locus = intersect_cuboid_sphere(&box2(), &s, 64, EPS);
        assert_eq!(locus.points.len(), 1);
    }
}
