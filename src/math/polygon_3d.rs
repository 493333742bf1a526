use std::cmp::Ordering;

use super::vector::dominant_axis;
use super::{Point3, Vector3};

/// Drops the dominant axis of `normal`, mapping a 3D point to 2D.
///
/// The remaining axes are taken in cyclic order so the projection keeps
/// the orientation seen from the positive side of that axis.
fn project_dropping_axis(point: &Point3, axis: usize) -> (f64, f64) {
    match axis {
        0 => (point.y, point.z),
        1 => (point.z, point.x),
        _ => (point.x, point.y),
    }
}

/// 2D cross product: `(ax * by - ay * bx)`.
#[inline]
fn cross_2d(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}

/// Point-in-polygon test for a point coplanar with a convex polygon.
///
/// Projects onto the coordinate plane perpendicular to the dominant axis of
/// `normal`, then checks that the point lies on the same side of every edge.
/// Points on the boundary (within `eps`) count as inside. Works for either
/// winding.
#[must_use]
pub fn point_in_convex_polygon_3d(
    point: &Point3,
    polygon: &[Point3],
    normal: &Vector3,
    eps: f64,
) -> bool {
    match polygon.len() {
        0 => return false,
        1 => return (point - polygon[0]).norm() <= eps,
        _ => {}
    }

    let axis = dominant_axis(normal);
    let (px, py) = project_dropping_axis(point, axis);
    let uvs: Vec<(f64, f64)> = polygon
        .iter()
        .map(|p| project_dropping_axis(p, axis))
        .collect();

    let n = uvs.len();
    let mut has_pos = false;
    let mut has_neg = false;
    for i in 0..n {
        let (x0, y0) = uvs[i];
        let (x1, y1) = uvs[(i + 1) % n];
        let (ex, ey) = (x1 - x0, y1 - y0);
        let len = ex.hypot(ey);
        if len <= eps {
            continue;
        }
        // Signed distance of the point from the edge line.
        let side = cross_2d(ex, ey, px - x0, py - y0) / len;
        if side > eps {
            has_pos = true;
        } else if side < -eps {
            has_neg = true;
        }
        if has_pos && has_neg {
            return false;
        }
    }

    if has_pos || has_neg {
        return true;
    }
    // Every edge was degenerate or the point is collinear with all of them:
    // the polygon collapsed to a segment, so test the bounding range.
    let (lo_x, hi_x) = uvs
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (x, _)| (lo.min(*x), hi.max(*x)));
    let (lo_y, hi_y) = uvs
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, y)| (lo.min(*y), hi.max(*y)));
    px >= lo_x - eps && px <= hi_x + eps && py >= lo_y - eps && py <= hi_y + eps
}

/// Arithmetic mean of a set of points.
#[must_use]
pub fn polygon_centroid(points: &[Point3]) -> Point3 {
    if points.is_empty() {
        return Point3::origin();
    }
    #[allow(clippy::cast_precision_loss)]
    let inv_n = 1.0 / points.len() as f64;
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum * inv_n)
}

/// Orders coplanar points counter-clockwise around their centroid, as seen
/// from the side `normal` points to.
///
/// For points in convex position this yields the convex polygon through
/// them. Input should already be free of duplicates.
#[must_use]
pub fn order_coplanar_points(points: &[Point3], normal: &Vector3) -> Vec<Point3> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let centroid = polygon_centroid(points);
    let reference = if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = reference.cross(normal).normalize();
    let v = normal.cross(&u);

    let mut keyed: Vec<(f64, Point3)> = points
        .iter()
        .map(|p| {
            let d = p - centroid;
            (d.dot(&v).atan2(d.dot(&u)), *p)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    keyed.into_iter().map(|(_, p)| p).collect()
}

/// Vector area of a 3D polygon: normal to the polygon, with length equal to
/// its area. Zero for fewer than 3 points or collinear points.
#[must_use]
pub fn polygon_vector_area(points: &[Point3]) -> Vector3 {
    if points.len() < 3 {
        return Vector3::zeros();
    }
    let n = points.len();
    let o = &points[0];
    let mut cross_sum = Vector3::zeros();
    for i in 1..n {
        let a = points[i] - o;
        let b = points[(i + 1) % n] - o;
        cross_sum += a.cross(&b);
    }
    cross_sum * 0.5
}

/// Compute the area of a 3D polygon (coplanar points).
///
/// Uses the cross-product summation method projected along the polygon normal.
#[must_use]
pub fn polygon_area_3d(points: &[Point3], normal: &Vector3) -> f64 {
    polygon_vector_area(points).dot(normal).abs()
}
