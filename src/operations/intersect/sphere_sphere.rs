use std::f64::consts::TAU;

use tracing::debug;

use crate::geometry::{Plane, Sphere};
use crate::math::intersect_3d::PlaneCircle;
use crate::math::vector::dominant_axis;
use crate::math::{Point3, Vector3};
use crate::tessellation::Polyline;

use super::IntersectionLocus;

/// Intersection of two sphere surfaces: a circle, a touching point, or
/// nothing. Coincident spheres report three orthogonal great circles.
pub(super) fn intersect_sphere_sphere(
    a: &Sphere,
    b: &Sphere,
    segments: usize,
    eps: f64,
) -> IntersectionLocus {
    let (c1, r1) = (*a.center(), a.radius());
    let (c2, r2) = (*b.center(), b.radius());
    let axis = c2 - c1;
    let d = axis.norm();

    if d <= eps {
        if (r1 - r2).abs() > eps {
            debug!("concentric spheres do not meet");
            return IntersectionLocus::default();
        }
        if r1 <= eps {
            return IntersectionLocus::assemble(Vec::new(), Vec::new(), &[c1], eps);
        }
        debug!("coincident spheres");
        let curves = [Vector3::x(), Vector3::y(), Vector3::z()]
            .into_iter()
            .map(|normal| {
                sample_circle(
                    &PlaneCircle {
                        center: c1,
                        radius: r1,
                        normal,
                    },
                    segments,
                )
            })
            .collect();
        return IntersectionLocus::assemble(curves, Vec::new(), &[], eps);
    }

    if d > r1 + r2 + eps || d < (r1 - r2).abs() - eps {
        debug!("spheres apart or nested");
        return IntersectionLocus::default();
    }

    let mut normal = axis / d;
    // Sign-canonical so both argument orders sample the same points.
    if normal[dominant_axis(&normal)] < 0.0 {
        normal = -normal;
    }
    let along = (d * d + r1 * r1 - r2 * r2) / (2.0 * d);
    let center = c1 + (axis / d) * along;
    let radius = (r1 * r1 - along * along).max(0.0).sqrt();

    if radius <= eps {
        return IntersectionLocus::assemble(Vec::new(), Vec::new(), &[center], eps);
    }
    let circle = PlaneCircle {
        center,
        radius,
        normal,
    };
    IntersectionLocus::assemble(vec![sample_circle(&circle, segments)], Vec::new(), &[], eps)
}

fn sample_circle(circle: &PlaneCircle, segments: usize) -> Polyline {
    let (u, v) = Plane::from_unit_normal(circle.normal, 0.0).basis();
    #[allow(clippy::cast_precision_loss)]
    let points: Vec<Point3> = (0..segments)
        .map(|k| circle.point_at(&u, &v, TAU * k as f64 / segments as f64))
        .collect();
    Polyline {
        points,
        closed: true,
    }
}
