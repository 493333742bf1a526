use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};

/// A solid ball given by center and radius.
///
/// A radius of zero is valid and describes a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
}

impl Sphere {
    /// Creates a new sphere.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate is not finite or the radius is
    /// negative.
    pub fn new(center: Point3, radius: f64) -> Result<Self> {
        if center.iter().any(|c| !c.is_finite()) || !radius.is_finite() {
            return Err(GeometryError::NonFinite("sphere").into());
        }
        if radius < 0.0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "radius",
                value: radius,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        Ok(Self { center, radius })
    }

    /// Returns the center of the sphere.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Whether `point` lies in the closed ball, with `eps` slack.
    #[must_use]
    pub fn contains(&self, point: &Point3, eps: f64) -> bool {
        (point - self.center).norm() <= self.radius + eps
    }

    /// Corners of the axis-aligned box around the sphere.
    #[must_use]
    pub fn bounds(&self) -> (Point3, Point3) {
        let r = Vector3::repeat(self.radius);
        (self.center - r, self.center + r)
    }
}
