use crate::error::{GeometryError, Result};
use crate::geometry::Plane;
use crate::math::polygon_3d::polygon_centroid;
use crate::math::vector::extent_of;
use crate::math::{Point3, Tolerance};

/// A pyramid with a convex quadrilateral base.
///
/// Faces are the base `[b0, b1, b2, b3]` and the four triangles
/// `[apex, b_i, b_(i+1)]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pyramid {
    apex: Point3,
    base: [Point3; 4],
}

impl Pyramid {
    /// Creates a pyramid, validating it with the default tolerance.
    ///
    /// # Errors
    ///
    /// See [`Pyramid::with_tolerance`].
    pub fn new(apex: Point3, base: [Point3; 4]) -> Result<Self> {
        Self::with_tolerance(apex, base, &Tolerance::default())
    }

    /// Creates a pyramid, validating it against `tolerance`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFinite`] for non-finite input, and
    /// [`GeometryError::Degenerate`] when the first three base vertices are
    /// collinear, the fourth is off their plane, the base is not a convex
    /// simple quadrilateral, or the apex lies in the base plane.
    pub fn with_tolerance(apex: Point3, base: [Point3; 4], tolerance: &Tolerance) -> Result<Self> {
        if std::iter::once(&apex)
            .chain(base.iter())
            .any(|p| p.iter().any(|c| !c.is_finite()))
        {
            return Err(GeometryError::NonFinite("pyramid").into());
        }

        let all = [apex, base[0], base[1], base[2], base[3]];
        let eps = tolerance.scaled(extent_of(&all));

        let plane = Plane::from_points(&base[0], &base[1], &base[2], tolerance.epsilon())
            .map_err(|_| {
                GeometryError::Degenerate("pyramid base vertices are collinear".into())
            })?;

        if plane.signed_distance(&base[3]).abs() > eps {
            return Err(
                GeometryError::Degenerate("pyramid base vertices are not coplanar".into()).into(),
            );
        }

        if !is_convex_quad(&base, &plane, eps) {
            return Err(GeometryError::Degenerate(
                "pyramid base is not a convex simple quadrilateral".into(),
            )
            .into());
        }

        if plane.signed_distance(&apex).abs() <= eps {
            return Err(
                GeometryError::Degenerate("pyramid apex lies in the base plane".into()).into(),
            );
        }

        Ok(Self { apex, base })
    }

    /// Creates a pyramid from 15 numbers: apex, then base vertices 1 to 4.
    ///
    /// # Errors
    ///
    /// See [`Pyramid::new`].
    pub fn from_coords(coords: [f64; 15]) -> Result<Self> {
        let at = |i: usize| Point3::new(coords[i], coords[i + 1], coords[i + 2]);
        Self::new(at(0), [at(3), at(6), at(9), at(12)])
    }

    /// Returns the apex.
    #[must_use]
    pub fn apex(&self) -> &Point3 {
        &self.apex
    }

    /// Returns the base vertices in order.
    #[must_use]
    pub fn base(&self) -> &[Point3; 4] {
        &self.base
    }

    /// Apex followed by the base vertices.
    #[must_use]
    pub fn vertices(&self) -> [Point3; 5] {
        [self.apex, self.base[0], self.base[1], self.base[2], self.base[3]]
    }

    /// Base polygon followed by the four side triangles.
    #[must_use]
    pub fn faces(&self) -> Vec<Vec<Point3>> {
        let b = &self.base;
        let mut faces = vec![b.to_vec()];
        for i in 0..4 {
            faces.push(vec![self.apex, b[i], b[(i + 1) % 4]]);
        }
        faces
    }

    /// The 8 edges: base ring first, then apex to each base vertex.
    #[must_use]
    pub fn edges(&self) -> [(Point3, Point3); 8] {
        let b = &self.base;
        std::array::from_fn(|i| {
            if i < 4 {
                (b[i], b[(i + 1) % 4])
            } else {
                (self.apex, b[i - 4])
            }
        })
    }

    /// Whether `point` lies in the closed pyramid, with `eps` slack.
    ///
    /// Face normals come straight from the vertices, so the answer does not
    /// depend on the tolerance the pyramid was validated with.
    #[must_use]
    pub fn contains(&self, point: &Point3, eps: f64) -> bool {
        let interior = polygon_centroid(&self.vertices());
        self.faces().iter().all(|face| {
            let normal = (face[1] - face[0]).cross(&(face[2] - face[0]));
            let len = normal.norm();
            if len <= f64::MIN_POSITIVE {
                return true;
            }
            let side = |q: &Point3| normal.dot(&(*q - face[0])) / len;
            if side(&interior) > 0.0 {
                -side(point) <= eps
            } else {
                side(point) <= eps
            }
        })
    }
}

/// Whether four coplanar points form a convex, non-self-intersecting
/// quadrilateral: every turn along the boundary has the same strict sign.
fn is_convex_quad(base: &[Point3; 4], plane: &Plane, eps: f64) -> bool {
    let (u, v) = plane.basis();
    let uv: Vec<(f64, f64)> = base
        .iter()
        .map(|p| (p.coords.dot(&u), p.coords.dot(&v)))
        .collect();

    let mut sign = 0.0_f64;
    for i in 0..4 {
        let (x0, y0) = uv[i];
        let (x1, y1) = uv[(i + 1) % 4];
        let (x2, y2) = uv[(i + 2) % 4];
        let (ax, ay) = (x1 - x0, y1 - y0);
        let (bx, by) = (x2 - x1, y2 - y1);
        let scale = ax.hypot(ay) * bx.hypot(by);
        let turn = ax * by - ay * bx;
        if turn.abs() <= eps * scale.max(eps) {
            return false;
        }
        if sign == 0.0 {
            sign = turn.signum();
        } else if turn.signum() != sign {
            return false;
        }
    }
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn square_base() -> [Point3; 4] {
        [
            p(0.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(2.0, 2.0, 0.0),
            p(0.0, 2.0, 0.0),
        ]
    }

    fn is_degenerate(r: Result<Pyramid>) -> bool {
        matches!(
            r,
            Err(crate::GeosectError::Geometry(GeometryError::Degenerate(_)))
        )
    }

    #[test]
    fn valid_square_pyramid() {
        let pyr = Pyramid::new(p(1.0, 1.0, 3.0), square_base()).unwrap();
        assert_eq!(pyr.faces().len(), 5);
        assert_eq!(pyr.edges().len(), 8);
        assert!((pyr.vertices()[0] - p(1.0, 1.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn from_coords_reads_apex_first() {
        let pyr = Pyramid::from_coords([
            1.0, 1.0, 3.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 2.0, 2.0, 0.0, 0.0, 2.0, 0.0,
        ])
        .unwrap();
        assert!((pyr.apex() - p(1.0, 1.0, 3.0)).norm() < 1e-12);
        assert!((pyr.base()[2] - p(2.0, 2.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn collinear_base_rejected() {
        let base = [
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(0.0, 2.0, 0.0),
        ];
        assert!(is_degenerate(Pyramid::new(p(0.0, 0.0, 1.0), base)));
    }

    #[test]
    fn non_coplanar_base_rejected() {
        let mut base = square_base();
        base[3].z = 0.5;
        assert!(is_degenerate(Pyramid::new(p(1.0, 1.0, 3.0), base)));
    }

    #[test]
    fn self_intersecting_base_rejected() {
        let mut base = square_base();
        base.swap(1, 2);
        assert!(is_degenerate(Pyramid::new(p(1.0, 1.0, 3.0), base)));
    }

    #[test]
    fn apex_in_base_plane_rejected() {
        assert!(is_degenerate(Pyramid::new(p(1.0, 1.0, 0.0), square_base())));
    }

    #[test]
    fn looser_tolerance_accepts_slightly_warped_base() {
        let mut base = square_base();
        base[3].z = 1e-6;
        assert!(Pyramid::new(p(1.0, 1.0, 3.0), base).is_err());
        assert!(Pyramid::with_tolerance(p(1.0, 1.0, 3.0), base, &Tolerance::new(1e-5)).is_ok());
    }

    #[test]
    fn clockwise_base_is_accepted() {
        let mut base = square_base();
        base.reverse();
        assert!(Pyramid::new(p(1.0, 1.0, -2.0), base).is_ok());
    }

    #[test]
    fn contains_interior_and_rejects_outside() {
        let pyr = Pyramid::new(p(1.0, 1.0, 3.0), square_base()).unwrap();
        assert!(pyr.contains(&p(1.0, 1.0, 1.0), 1e-9));
        assert!(pyr.contains(&p(2.0, 2.0, 0.0), 1e-9));
        assert!(!pyr.contains(&p(1.0, 1.0, -0.1), 1e-9));
        assert!(!pyr.contains(&p(0.1, 0.1, 2.9), 1e-9));
    }

    #[test]
    fn contains_works_for_very_flat_pyramid() {
        let pyr =
            Pyramid::with_tolerance(p(1.0, 1.0, 1e-10), square_base(), &Tolerance::new(1e-13))
                .unwrap();
        assert!(pyr.contains(&p(1.0, 1.0, 0.0), 1e-15));
        assert!(pyr.contains(&p(1.0, 1.0, 5e-11), 1e-15));
        assert!(!pyr.contains(&p(1.0, 1.0, 1.0), 1e-15));
    }
}
