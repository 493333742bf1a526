use crate::error::{GeometryError, Result};
use crate::geometry::Plane;
use crate::math::{Point3, Vector3};

/// An axis-aligned box.
///
/// Zero-extent axes are allowed, so a cuboid may degenerate to a plane
/// rectangle, a segment or a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    min: Point3,
    max: Point3,
}

impl Cuboid {
    /// Creates a cuboid from its minimum and maximum corners.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate is not finite or `min > max` on any
    /// axis.
    pub fn new(min: Point3, max: Point3) -> Result<Self> {
        if min.iter().chain(max.iter()).any(|c| !c.is_finite()) {
            return Err(GeometryError::NonFinite("cuboid").into());
        }
        for (i, axis) in ['x', 'y', 'z'].into_iter().enumerate() {
            if min[i] > max[i] {
                return Err(GeometryError::InvalidBounds {
                    axis,
                    min: min[i],
                    max: max[i],
                }
                .into());
            }
        }
        Ok(Self { min, max })
    }

    /// Creates a cuboid from `(x_min, y_min, z_min, x_max, y_max, z_max)`.
    ///
    /// # Errors
    ///
    /// See [`Cuboid::new`].
    pub fn from_bounds(bounds: [f64; 6]) -> Result<Self> {
        let [x0, y0, z0, x1, y1, z1] = bounds;
        Self::new(Point3::new(x0, y0, z0), Point3::new(x1, y1, z1))
    }

    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> &Point3 {
        &self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> &Point3 {
        &self.max
    }

    /// Returns the center of the box.
    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Length of the main diagonal.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        (self.max - self.min).norm()
    }

    /// Point of the box closest to `point` (the point itself when inside).
    #[must_use]
    pub fn closest_point(&self, point: &Point3) -> Point3 {
        Point3::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
            point.z.clamp(self.min.z, self.max.z),
        )
    }

    /// Squared distance from `point` to the box; zero inside.
    #[must_use]
    pub fn squared_distance_to(&self, point: &Point3) -> f64 {
        (point - self.closest_point(point)).norm_squared()
    }

    /// Whether `point` lies inside or within `eps` of the box.
    #[must_use]
    pub fn contains(&self, point: &Point3, eps: f64) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] - eps && point[i] <= self.max[i] + eps)
    }

    /// The 8 corners; bit 0 of the index selects max x, bit 1 max y, bit 2
    /// max z.
    #[must_use]
    pub fn corners(&self) -> [Point3; 8] {
        std::array::from_fn(|i| {
            Point3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        })
    }

    /// The 6 faces, each counter-clockwise when seen from outside.
    ///
    /// Order: `-x, +x, -y, +y, -z, +z`, matching [`Cuboid::face_planes`].
    #[must_use]
    pub fn faces(&self) -> [[Point3; 4]; 6] {
        let (a, b) = (self.min, self.max);
        let p = Point3::new;
        [
            [p(a.x, a.y, a.z), p(a.x, a.y, b.z), p(a.x, b.y, b.z), p(a.x, b.y, a.z)],
            [p(b.x, a.y, a.z), p(b.x, b.y, a.z), p(b.x, b.y, b.z), p(b.x, a.y, b.z)],
            [p(a.x, a.y, a.z), p(b.x, a.y, a.z), p(b.x, a.y, b.z), p(a.x, a.y, b.z)],
            [p(a.x, b.y, a.z), p(a.x, b.y, b.z), p(b.x, b.y, b.z), p(b.x, b.y, a.z)],
            [p(a.x, a.y, a.z), p(a.x, b.y, a.z), p(b.x, b.y, a.z), p(b.x, a.y, a.z)],
            [p(a.x, a.y, b.z), p(b.x, a.y, b.z), p(b.x, b.y, b.z), p(a.x, b.y, b.z)],
        ]
    }

    /// Outward face planes in the order of [`Cuboid::faces`].
    #[must_use]
    pub fn face_planes(&self) -> [Plane; 6] {
        let (a, b) = (self.min, self.max);
        [
            Plane::from_unit_normal(-Vector3::x(), -a.x),
            Plane::from_unit_normal(Vector3::x(), b.x),
            Plane::from_unit_normal(-Vector3::y(), -a.y),
            Plane::from_unit_normal(Vector3::y(), b.y),
            Plane::from_unit_normal(-Vector3::z(), -a.z),
            Plane::from_unit_normal(Vector3::z(), b.z),
        ]
    }
}
