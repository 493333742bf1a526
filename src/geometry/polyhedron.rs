use crate::error::Result;
use crate::math::polygon_3d::polygon_centroid;
use crate::math::vector::{dedup_points, distance};
use crate::math::Point3;

use super::solid::{Cuboid, Pyramid};
use super::Plane;

/// A convex polyhedron as a list of face polygons with outward planes.
///
/// Faces are counter-clockwise when seen from outside. `faces[i]` lies in
/// `planes[i]`, and the interior is the intersection of the half-spaces
/// `planes[i].signed_distance(x) <= 0`.
#[derive(Debug, Clone)]
pub struct ConvexPolyhedron {
    faces: Vec<Vec<Point3>>,
    planes: Vec<Plane>,
}

impl ConvexPolyhedron {
    /// Boundary of an axis-aligned box.
    #[must_use]
    pub fn from_cuboid(cuboid: &Cuboid) -> Self {
        Self {
            faces: cuboid.faces().iter().map(|f| f.to_vec()).collect(),
            planes: cuboid.face_planes().to_vec(),
        }
    }

    /// Boundary of a pyramid; each face is re-oriented to face outward.
    ///
    /// `eps` is the relative collinearity threshold of [`Plane::from_points`].
    ///
    /// # Errors
    ///
    /// Returns an error if a face plane is degenerate, which a validated
    /// [`Pyramid`] rules out.
    pub fn from_pyramid(pyramid: &Pyramid, eps: f64) -> Result<Self> {
        let interior = polygon_centroid(&pyramid.vertices());
        let mut faces = Vec::with_capacity(5);
        let mut planes = Vec::with_capacity(5);

        for mut face in pyramid.faces() {
            let mut plane = Plane::from_points(&face[0], &face[1], &face[2], eps)?;
            if plane.signed_distance(&interior) > 0.0 {
                plane = plane.flipped();
                face.reverse();
            }
            faces.push(face);
            planes.push(plane);
        }

        Ok(Self { faces, planes })
    }

    /// Returns the face polygons.
    #[must_use]
    pub fn faces(&self) -> &[Vec<Point3>] {
        &self.faces
    }

    /// Returns the outward face planes.
    #[must_use]
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Distinct vertices of all faces.
    #[must_use]
    pub fn vertices(&self, eps: f64) -> Vec<Point3> {
        let all: Vec<Point3> = self.faces.iter().flatten().copied().collect();
        dedup_points(&all, eps)
    }

    /// Distinct edges; an edge shared by two faces is listed once.
    #[must_use]
    pub fn edges(&self, eps: f64) -> Vec<(Point3, Point3)> {
        let same = |a: &(Point3, Point3), b: &(Point3, Point3)| {
            (distance(&a.0, &b.0) <= eps && distance(&a.1, &b.1) <= eps)
                || (distance(&a.0, &b.1) <= eps && distance(&a.1, &b.0) <= eps)
        };

        let mut edges: Vec<(Point3, Point3)> = Vec::new();
        for face in &self.faces {
            let n = face.len();
            for i in 0..n {
                let edge = (face[i], face[(i + 1) % n]);
                if distance(&edge.0, &edge.1) <= eps {
                    continue;
                }
                if !edges.iter().any(|e| same(e, &edge)) {
                    edges.push(edge);
                }
            }
        }
        edges
    }

    /// Whether `point` is inside or within `eps` of the boundary.
    #[must_use]
    pub fn contains(&self, point: &Point3, eps: f64) -> bool {
        self.planes.iter().all(|p| p.signed_distance(point) <= eps)
    }
}
