use crate::error::{GeometryError, Result};
use crate::math::{normalize, Point3, Vector3};

/// An infinite plane in 3D space.
///
/// Stored in Hessian normal form: the set of points `x` with
/// `normal . x = offset`, where `normal` has unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vector3,
    offset: f64,
}

impl Plane {
    /// Creates a plane through `point` with the given normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is shorter than `eps`.
    pub fn from_normal(point: &Point3, normal: &Vector3, eps: f64) -> Result<Self> {
        let normal = normalize(normal, eps)?;
        let offset = normal.dot(&point.coords);
        Ok(Self { normal, offset })
    }

    /// Creates a plane from a unit normal and offset without validation.
    ///
    /// Callers guarantee `normal` is unit length.
    #[must_use]
    pub(crate) fn from_unit_normal(normal: Vector3, offset: f64) -> Self {
        Self { normal, offset }
    }

    /// Creates the plane through three points, oriented by the right-hand
    /// rule on `p0 -> p1 -> p2`.
    ///
    /// `eps` is relative: the points are collinear when the sine of the angle
    /// at `p0` is below it.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the points are collinear or
    /// coincident.
    pub fn from_points(p0: &Point3, p1: &Point3, p2: &Point3, eps: f64) -> Result<Self> {
        let e1 = p1 - p0;
        let e2 = p2 - p0;
        let n = e1.cross(&e2);
        let scale = e1.norm() * e2.norm();

        if scale <= f64::MIN_POSITIVE || n.norm() <= eps * scale {
            return Err(GeometryError::Degenerate(format!(
                "points {p0}, {p1}, {p2} are collinear"
            ))
            .into());
        }

        let normal = n / n.norm();
        Ok(Self {
            normal,
            offset: normal.dot(&p0.coords),
        })
    }

    /// Returns the unit normal.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns `d` in `normal . x = d`.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The point of the plane closest to the world origin.
    #[must_use]
    pub fn origin(&self) -> Point3 {
        Point3::from(self.normal * self.offset)
    }

    /// Returns the same plane with the normal reversed.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Whether `other` is this plane facing the other way, within `eps`.
    #[must_use]
    pub fn is_flip_of(&self, other: &Plane, eps: f64) -> bool {
        (self.normal + other.normal).norm() <= eps && (self.offset + other.offset).abs() <= eps
    }

    /// Signed distance from `point`; positive on the normal side.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Orthogonal projection of `point` onto the plane.
    #[must_use]
    pub fn project(&self, point: &Point3) -> Point3 {
        point - self.normal * self.signed_distance(point)
    }

    /// Two unit vectors `(u, v)` spanning the plane with `u x v = normal`.
    ///
    /// The basis depends only on the normal, so planes with equal normals
    /// share it.
    #[must_use]
    pub fn basis(&self) -> (Vector3, Vector3) {
        let reference = if self.normal.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };
        let u = reference.cross(&self.normal).normalize();
        let v = self.normal.cross(&u);
        (u, v)
    }
}
