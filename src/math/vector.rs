use crate::error::{GeometryError, Result};

use super::{Point3, Vector3};

/// Euclidean distance between two points.
#[must_use]
pub fn distance(p: &Point3, q: &Point3) -> f64 {
    (q - p).norm()
}

/// Dot product of two vectors.
#[must_use]
pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
    a.dot(b)
}

/// Cross product of two vectors.
#[must_use]
pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
    a.cross(b)
}

/// Returns `v` scaled to unit length.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if `|v| < eps`.
pub fn normalize(v: &Vector3, eps: f64) -> Result<Vector3> {
    let len = v.norm();
    if len < eps || !len.is_finite() {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(v / len)
}

/// Index (0 = x, 1 = y, 2 = z) of the largest-magnitude component.
#[must_use]
pub fn dominant_axis(v: &Vector3) -> usize {
    let (ax, ay, az) = (v.x.abs(), v.y.abs(), v.z.abs());
    if ax >= ay && ax >= az {
        0
    } else if ay >= az {
        1
    } else {
        2
    }
}

/// Length of the diagonal of the axis-aligned box around `points`.
#[must_use]
pub fn extent_of(points: &[Point3]) -> f64 {
    let Some(first) = points.first() else {
        return 0.0;
    };
    let (mut lo, mut hi) = (*first, *first);
    for p in &points[1..] {
        for i in 0..3 {
            lo[i] = lo[i].min(p[i]);
            hi[i] = hi[i].max(p[i]);
        }
    }
    (hi - lo).norm()
}

/// Removes points lying within `eps` of an earlier point, keeping first
/// occurrences in order.
#[must_use]
pub fn dedup_points(points: &[Point3], eps: f64) -> Vec<Point3> {
    let mut unique: Vec<Point3> = Vec::with_capacity(points.len());
    for p in points {
        if !unique.iter().any(|q| distance(p, q) <= eps) {
            unique.push(*p);
        }
    }
    unique
}

/// Drops consecutive duplicates of a closed polygon, including a last
/// vertex that repeats the first.
#[must_use]
pub fn dedup_polygon(polygon: &[Point3], eps: f64) -> Vec<Point3> {
    let mut out: Vec<Point3> = Vec::with_capacity(polygon.len());
    for p in polygon {
        if out.last().is_none_or(|q| distance(p, q) > eps) {
            out.push(*p);
        }
    }
    while out.len() > 1 && distance(&out[0], &out[out.len() - 1]) <= eps {
        out.pop();
    }
    out
}
