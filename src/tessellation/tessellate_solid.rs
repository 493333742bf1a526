use std::f64::consts::{PI, TAU};

use crate::error::{OperationError, Result};
use crate::geometry::{ConvexPolyhedron, Cuboid, Pyramid, Solid, Sphere};
use crate::math::{Point3, Vector3, DEFAULT_EPSILON};

use super::{TessellationParams, TriangleMesh};

/// Tessellates a solid into a triangle mesh for rendering.
pub struct TessellateSolid<'a> {
    solid: &'a Solid,
    params: TessellationParams,
}

impl<'a> TessellateSolid<'a> {
    /// Creates a new `TessellateSolid` operation.
    #[must_use]
    pub fn new(solid: &'a Solid, params: TessellationParams) -> Self {
        Self { solid, params }
    }

    /// Executes the tessellation, returning a mesh with outward normals.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 3 sphere segments are requested.
    pub fn execute(&self) -> Result<TriangleMesh> {
        match self.solid {
            Solid::Cuboid(c) => Ok(tessellate_cuboid(c)),
            Solid::Sphere(s) => tessellate_sphere(s, self.params.segments),
            Solid::Pyramid(p) => tessellate_pyramid(p),
        }
    }
}

/// Fan-triangulates convex faces, one flat normal per face.
#[allow(clippy::cast_possible_truncation)]
fn mesh_from_faces<'f>(faces: impl Iterator<Item = (&'f [Point3], Vector3)>) -> TriangleMesh {
    let mut mesh = TriangleMesh::default();
    for (face, normal) in faces {
        let base = mesh.vertices.len() as u32;
        mesh.vertices.extend_from_slice(face);
        mesh.normals.extend(std::iter::repeat_n(normal, face.len()));
        for k in 1..face.len().saturating_sub(1) as u32 {
            mesh.indices.push([base, base + k, base + k + 1]);
        }
    }
    mesh
}

fn tessellate_cuboid(cuboid: &Cuboid) -> TriangleMesh {
    let faces = cuboid.faces();
    let planes = cuboid.face_planes();
    mesh_from_faces(
        faces
            .iter()
            .zip(planes.iter())
            .map(|(f, p)| (f.as_slice(), *p.normal())),
    )
}

fn tessellate_pyramid(pyramid: &Pyramid) -> Result<TriangleMesh> {
    let poly = ConvexPolyhedron::from_pyramid(pyramid, DEFAULT_EPSILON)?;
    Ok(mesh_from_faces(
        poly.faces()
            .iter()
            .zip(poly.planes())
            .map(|(f, p)| (f.as_slice(), *p.normal())),
    ))
}

/// UV sphere: `segments` longitudes by `segments / 2` latitudes, poles
/// included as rings of coincident vertices.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn tessellate_sphere(sphere: &Sphere, segments: usize) -> Result<TriangleMesh> {
    if segments < 3 {
        return Err(OperationError::InvalidConfig(format!(
            "sphere tessellation needs at least 3 segments, got {segments}"
        ))
        .into());
    }
    let slices = segments;
    let stacks = (segments / 2).max(2);
    let ring = slices + 1;

    let mut mesh = TriangleMesh::default();
    for i in 0..=stacks {
        let theta = PI * i as f64 / stacks as f64;
        for j in 0..=slices {
            let phi = TAU * j as f64 / slices as f64;
            let dir = Vector3::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos());
            mesh.vertices.push(sphere.center() + dir * sphere.radius());
            mesh.normals.push(dir);
        }
    }

    let idx = |i: usize, j: usize| (i * ring + j) as u32;
    for i in 0..stacks {
        for j in 0..slices {
            let (a, b, c, d) = (idx(i, j), idx(i + 1, j), idx(i + 1, j + 1), idx(i, j + 1));
            if i + 1 < stacks {
                mesh.indices.push([a, b, c]);
            }
            if i > 0 {
                mesh.indices.push([a, c, d]);
            }
        }
    }
    Ok(mesh)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn outward(mesh: &TriangleMesh, center: &Point3) -> bool {
        mesh.indices.iter().all(|[a, b, c]| {
            let (a, b, c) = (
                mesh.vertices[*a as usize],
                mesh.vertices[*b as usize],
                mesh.vertices[*c as usize],
            );
            let n = (b - a).cross(&(c - a));
            n.dot(&(a - center)) > -1e-12
        })
    }

    #[test]
    fn cuboid_has_twelve_triangles() {
        let c = Cuboid::from_bounds([0.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();
        let solid = Solid::Cuboid(c);
        let mesh = TessellateSolid::new(&solid, TessellationParams::default())
            .execute()
            .unwrap();
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.vertices.len(), 24);
        assert!(outward(&mesh, &c.center()));
    }

    #[test]
    fn pyramid_has_six_triangles() {
        let pyr = Pyramid::new(
            p(1.0, 1.0, 2.0),
            [p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(2.0, 2.0, 0.0), p(0.0, 2.0, 0.0)],
        )
        .unwrap();
        let solid = Solid::Pyramid(pyr);
        let mesh = TessellateSolid::new(&solid, TessellationParams::default())
            .execute()
            .unwrap();
        assert_eq!(mesh.triangle_count(), 6);
        assert!(outward(&mesh, &p(1.0, 1.0, 0.5)));
    }

    #[test]
    fn sphere_vertices_on_surface() {
        let s = Sphere::new(p(1.0, 2.0, 3.0), 2.0).unwrap();
        let solid = Solid::Sphere(s);
        let params = TessellationParams { segments: 16 };
        let mesh = TessellateSolid::new(&solid, params).execute().unwrap();
        assert_eq!(mesh.vertices.len(), 17 * 9);
        // Two triangles per quad except one at each pole row.
        assert_eq!(mesh.triangle_count(), 16 * 8 * 2 - 2 * 16);
        for v in &mesh.vertices {
            assert!(((v - s.center()).norm() - 2.0).abs() < 1e-12);
        }
        assert!(outward(&mesh, s.center()));
    }

    #[test]
    fn too_few_segments_rejected() {
        let solid = Solid::Sphere(Sphere::new(Point3::origin(), 1.0).unwrap());
        let params = TessellationParams { segments: 2 };
        assert!(TessellateSolid::new(&solid, params).execute().is_err());
    }
}
