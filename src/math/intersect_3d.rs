use crate::geometry::Plane;

use super::{Point3, Vector3};

/// Relationship of a bounded segment `a -> b` with a plane.
#[derive(Debug, Clone, Copy)]
pub enum SegmentPlaneRelation {
    /// The segment crosses (or touches) the plane at parameter `t` in `[0, 1]`.
    Crossing { point: Point3, t: f64 },
    /// The supporting line crosses the plane outside the segment.
    Miss,
    /// The segment is parallel to the plane and off it.
    Parallel,
    /// The segment lies in the plane.
    Coincident,
}

/// Classifies the segment `a -> b` against a plane using the parametric solve
/// `t = (d - n.a) / n.(b - a)`.
#[must_use]
pub fn segment_plane_relation(
    a: &Point3,
    b: &Point3,
    plane: &Plane,
    eps: f64,
) -> SegmentPlaneRelation {
    let da = plane.signed_distance(a);
    let db = plane.signed_distance(b);
    let denom = da - db;

    if denom.abs() < eps {
        // n.(b - a) vanishes: parallel or in the plane.
        return if da.abs() <= eps {
            SegmentPlaneRelation::Coincident
        } else {
            SegmentPlaneRelation::Parallel
        };
    }

    let t = da / denom;
    let len = (b - a).norm();
    let t_eps = if len > 0.0 { eps / len } else { eps };
    if t < -t_eps || t > 1.0 + t_eps {
        return SegmentPlaneRelation::Miss;
    }
    let t = t.clamp(0.0, 1.0);
    SegmentPlaneRelation::Crossing {
        point: a + (b - a) * t,
        t,
    }
}

/// Point where segment `a -> b` meets the plane.
///
/// Returns `None` when the segment is parallel to the plane (and off it) or
/// crosses it only beyond its endpoints. A segment lying in the plane
/// yields `a`.
#[must_use]
pub fn segment_plane_intersection(
    a: &Point3,
    b: &Point3,
    plane: &Plane,
    eps: f64,
) -> Option<Point3> {
    match segment_plane_relation(a, b, plane, eps) {
        SegmentPlaneRelation::Crossing { point, .. } => Some(point),
        SegmentPlaneRelation::Coincident => Some(*a),
        SegmentPlaneRelation::Miss | SegmentPlaneRelation::Parallel => None,
    }
}

/// Classification of a point relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointPlaneClassification {
    /// Point is on the positive side (in the direction of the normal).
    Front,
    /// Point is on the negative side (opposite the normal).
    Back,
    /// Point lies on the plane (within tolerance).
    On,
}

/// Classifies a point relative to a plane.
#[must_use]
pub fn classify_point_plane(point: &Point3, plane: &Plane, eps: f64) -> PointPlaneClassification {
    let dist = plane.signed_distance(point);
    if dist > eps {
        PointPlaneClassification::Front
    } else if dist < -eps {
        PointPlaneClassification::Back
    } else {
        PointPlaneClassification::On
    }
}

/// Circle in 3D, lying in the plane through `center` with unit `normal`.
#[derive(Debug, Clone, Copy)]
pub struct PlaneCircle {
    pub center: Point3,
    pub radius: f64,
    pub normal: Vector3,
}

impl PlaneCircle {
    /// Point at angle `theta` measured in the basis `(u, v)` of the plane.
    #[must_use]
    pub fn point_at(&self, u: &Vector3, v: &Vector3, theta: f64) -> Point3 {
        self.center + (u * theta.cos() + v * theta.sin()) * self.radius
    }

    /// Angle of `point` in `[0, 2*pi)` measured in the basis `(u, v)`.
    #[must_use]
    pub fn angle_of(&self, u: &Vector3, v: &Vector3, point: &Point3) -> f64 {
        let d = point - self.center;
        d.dot(v).atan2(d.dot(u)).rem_euclid(std::f64::consts::TAU)
    }
}

/// Section of the sphere `(center, radius)` by a plane.
///
/// Returns `None` when the plane is farther than `radius + eps` from the
/// center. A tangent plane gives a circle of radius zero.
#[must_use]
pub fn sphere_plane_circle(
    center: &Point3,
    radius: f64,
    plane: &Plane,
    eps: f64,
) -> Option<PlaneCircle> {
    let dist = plane.signed_distance(center);
    if dist.abs() > radius + eps {
        return None;
    }
    let r2 = radius * radius - dist * dist;
    Some(PlaneCircle {
        center: plane.project(center),
        radius: r2.max(0.0).sqrt(),
        normal: *plane.normal(),
    })
}

/// Points where a circle meets the segment `a -> b`, both lying in the
/// circle's plane.
#[must_use]
pub fn circle_segment_intersections(
    circle: &PlaneCircle,
    a: &Point3,
    b: &Point3,
    eps: f64,
) -> Vec<Point3> {
    let n = circle.normal;
    let flatten = |p: &Point3| {
        let d = p - circle.center;
        d - n * d.dot(&n)
    };
    let fa = flatten(a);
    let dir = flatten(b) - fa;

    radius_crossings(&fa, &dir, circle.radius, eps)
        .into_iter()
        .map(|t| a + (b - a) * t)
        .collect()
}

/// Points where the segment `a -> b` crosses the surface of the sphere
/// `(center, radius)`. A segment grazing the sphere gives one point.
#[must_use]
pub fn segment_sphere_intersections(
    a: &Point3,
    b: &Point3,
    center: &Point3,
    radius: f64,
    eps: f64,
) -> Vec<Point3> {
    radius_crossings(&(a - center), &(b - a), radius, eps)
        .into_iter()
        .map(|t| a + (b - a) * t)
        .collect()
}

/// Parameters in `[0, 1]` where `|start + t dir| = radius`.
fn radius_crossings(start: &Vector3, dir: &Vector3, radius: f64, eps: f64) -> Vec<f64> {
    let qa = dir.dot(dir);
    if qa < eps * eps {
        return Vec::new();
    }
    let qb = 2.0 * start.dot(dir);
    let qc = start.dot(start) - radius * radius;
    let disc = qb * qb - 4.0 * qa * qc;
    // disc = 4 qa (r^2 - h^2) for a line at distance h; |r - h| <= eps is a touch.
    let touch = 8.0 * qa * radius * eps;
    if disc < -touch {
        return Vec::new();
    }

    let t_eps = eps / qa.sqrt();
    let sq = if disc <= touch { 0.0 } else { disc.sqrt() };
    let mut roots = vec![(-qb - sq) / (2.0 * qa), (-qb + sq) / (2.0 * qa)];
    if (roots[1] - roots[0]).abs() <= t_eps {
        roots.pop();
    }

    roots
        .into_iter()
        .filter(|t| *t >= -t_eps && *t <= 1.0 + t_eps)
        .map(|t| t.clamp(0.0, 1.0))
        .collect()
}
