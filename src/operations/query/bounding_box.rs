use crate::geometry::Solid;
use crate::math::Point3;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Smallest box containing all `points`; `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let first = points.first()?;
        let mut aabb = Self {
            min: *first,
            max: *first,
        };
        for p in &points[1..] {
            aabb.expand(p);
        }
        Some(aabb)
    }

    /// Grows the box to include `point`.
    pub fn expand(&mut self, point: &Point3) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(point[i]);
            self.max[i] = self.max[i].max(point[i]);
        }
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.expand(&other.min);
        out.expand(&other.max);
        out
    }

    /// Whether the boxes overlap or are within `eps` of touching.
    #[must_use]
    pub fn overlaps(&self, other: &Self, eps: f64) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] + eps && other.min[i] <= self.max[i] + eps)
    }

    /// Length of the main diagonal.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        (self.max - self.min).norm()
    }
}

/// Computes the axis-aligned bounding box of a solid.
pub struct BoundingBox<'a> {
    solid: &'a Solid,
}

impl<'a> BoundingBox<'a> {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(solid: &'a Solid) -> Self {
        Self { solid }
    }

    /// Executes the query, returning the AABB.
    #[must_use]
    pub fn execute(&self) -> Aabb {
        match self.solid {
            Solid::Cuboid(c) => Aabb {
                min: *c.min(),
                max: *c.max(),
            },
            Solid::Sphere(s) => {
                let (min, max) = s.bounds();
                Aabb { min, max }
            }
            Solid::Pyramid(p) => {
                let v = p.vertices();
                let mut aabb = Aabb {
                    min: v[0],
                    max: v[0],
                };
                for q in &v[1..] {
                    aabb.expand(q);
                }
                aabb
            }
        }
    }
}
