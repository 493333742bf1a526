use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::geometry::{ConvexPolyhedron, Solid};
use crate::operations::query::{Aabb, BoundingBox};

use super::cuboid_pyramid::intersect_cuboid_pyramid;
use super::cuboid_sphere::intersect_cuboid_sphere;
use super::polyhedron_clip::intersect_convex;
use super::sphere_pyramid::intersect_sphere_pyramid;
use super::sphere_sphere::intersect_sphere_sphere;
use super::{IntersectConfig, IntersectionLocus, IntersectionResult, PairIntersection};

/// Intersects two solids.
///
/// Dispatch depends only on the pair of kinds, so swapping the arguments
/// runs the same routine. The absolute tolerance is the configured one
/// scaled by the diagonal of the pair's joint bounding box.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a pyramid face
/// plane is degenerate.
pub fn intersect_pair(a: &Solid, b: &Solid, config: &IntersectConfig) -> Result<IntersectionLocus> {
    config.validate()?;

    let box_a = BoundingBox::new(a).execute();
    let box_b = BoundingBox::new(b).execute();
    let eps = config.tolerance.scaled(box_a.union(&box_b).diagonal());
    if !box_a.overlaps(&box_b, eps) {
        return Ok(IntersectionLocus::default());
    }

    let plane_eps = config.tolerance.epsilon();
    let segments = config.arc_segments;
    let locus = match (a, b) {
        (Solid::Cuboid(c1), Solid::Cuboid(c2)) => intersect_convex(
            &ConvexPolyhedron::from_cuboid(c1),
            &ConvexPolyhedron::from_cuboid(c2),
            eps,
        ),
        (Solid::Cuboid(c), Solid::Sphere(s)) | (Solid::Sphere(s), Solid::Cuboid(c)) => {
            intersect_cuboid_sphere(c, s, segments, eps)
        }
        (Solid::Cuboid(c), Solid::Pyramid(p)) | (Solid::Pyramid(p), Solid::Cuboid(c)) => {
            intersect_cuboid_pyramid(c, p, plane_eps, eps)?
        }
        (Solid::Sphere(s1), Solid::Sphere(s2)) => intersect_sphere_sphere(s1, s2, segments, eps),
        (Solid::Sphere(s), Solid::Pyramid(p)) | (Solid::Pyramid(p), Solid::Sphere(s)) => {
            intersect_sphere_pyramid(s, p, segments, plane_eps, eps)?
        }
        (Solid::Pyramid(p1), Solid::Pyramid(p2)) => intersect_convex(
            &ConvexPolyhedron::from_pyramid(p1, plane_eps)?,
            &ConvexPolyhedron::from_pyramid(p2, plane_eps)?,
            eps,
        ),
    };
    Ok(locus)
}

/// Computes the intersection of every pair of a set of solids.
///
/// # Example
///
/// ```
/// use geosect::geometry::{Cuboid, Solid};
/// use geosect::operations::intersect::CalculateIntersection;
///
/// let solids: Vec<Solid> = vec![
///     Cuboid::from_bounds([0.0, 0.0, 0.0, 2.0, 2.0, 2.0]).unwrap().into(),
///     Cuboid::from_bounds([1.0, 0.0, 0.0, 3.0, 2.0, 2.0]).unwrap().into(),
/// ];
/// let result = CalculateIntersection::new(&solids).execute().unwrap();
/// assert_eq!(result.points().len(), 8);
/// ```
pub struct CalculateIntersection<'a> {
    solids: &'a [Solid],
    config: IntersectConfig,
}

impl<'a> CalculateIntersection<'a> {
    /// Creates a new `CalculateIntersection` operation with the default
    /// configuration.
    #[must_use]
    pub fn new(solids: &'a [Solid]) -> Self {
        Self {
            solids,
            config: IntersectConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: IntersectConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the computation.
    ///
    /// Pairs are reported in the order `(0, 1), (0, 2), ..., (1, 2), ...`
    /// whether or not they are evaluated in parallel. Fewer than two solids
    /// give an empty result.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or any pair fails.
    #[instrument(skip_all, fields(solids = self.solids.len()))]
    pub fn execute(&self) -> Result<IntersectionResult> {
        self.config.validate()?;

        let boxes: Vec<Aabb> = self
            .solids
            .iter()
            .map(|s| BoundingBox::new(s).execute())
            .collect();
        let extent = boxes
            .iter()
            .copied()
            .reduce(|acc, b| acc.union(&b))
            .map_or(0.0, |b| b.diagonal());
        let eps = self.config.tolerance.scaled(extent);

        let n = self.solids.len();
        let indices: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect();

        let evaluate = |&(i, j): &(usize, usize)| -> Result<PairIntersection> {
            let (a, b) = (&self.solids[i], &self.solids[j]);
            let locus = intersect_pair(a, b, &self.config)?;
            debug!(
                first = i,
                second = j,
                first_kind = %a.kind(),
                second_kind = %b.kind(),
                points = locus.points.len(),
                curves = locus.curves.len(),
                faces = locus.faces.len(),
                "pair intersected"
            );
            Ok(PairIntersection {
                first: i,
                second: j,
                kinds: (a.kind(), b.kind()),
                locus,
            })
        };

        let pairs: Vec<PairIntersection> = if self.config.parallel {
            indices.par_iter().map(evaluate).collect::<Result<_>>()?
        } else {
            indices.iter().map(evaluate).collect::<Result<_>>()?
        };

        let result = IntersectionResult::new(pairs, eps);
        debug!(
            pairs = result.pairs().len(),
            empty = result.is_empty(),
            "intersection computed"
        );
        Ok(result)
    }
}

/// Intersects every pair of `solids` with the default configuration.
///
/// # Errors
///
/// See [`CalculateIntersection::execute`].
pub fn calculate_intersection(solids: &[Solid]) -> Result<IntersectionResult> {
    CalculateIntersection::new(solids).execute()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{GeosectError, OperationError};
    use crate::geometry::{Cuboid, Pyramid, Sphere};
    use crate::math::Point3;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn cuboid(b: [f64; 6]) -> Solid {
        Cuboid::from_bounds(b).unwrap().into()
    }

    fn sphere(c: Point3, r: f64) -> Solid {
        Sphere::new(c, r).unwrap().into()
    }

    fn pyramid() -> Solid {
        Pyramid::new(
            p(1.0, 1.0, 3.0),
            [p(0.0, 0.0, 0.5), p(2.0, 0.0, 0.5), p(2.0, 2.0, 0.5), p(0.0, 2.0, 0.5)],
        )
        .unwrap()
        .into()
    }

    fn same_points(a: &IntersectionLocus, b: &IntersectionLocus) -> bool {
        a.points.len() == b.points.len()
            && a
                .points
                .iter()
                .all(|q| b.points.iter().any(|x| (x - q).norm() < 1e-9))
    }

    #[test]
    fn fewer_than_two_solids_is_empty() {
        assert!(calculate_intersection(&[]).unwrap().pairs().is_empty());
        let one = [cuboid([0.0, 0.0, 0.0, 1.0, 1.0, 1.0])];
        let result = calculate_intersection(&one).unwrap();
        assert!(result.is_empty());
        assert!(result.points().is_empty());
    }

    #[test]
    fn pairs_come_in_index_order() {
        let solids = [
            cuboid([0.0, 0.0, 0.0, 2.0, 2.0, 2.0]),
            sphere(p(2.0, 1.0, 1.0), 0.5),
            pyramid(),
            sphere(p(10.0, 10.0, 10.0), 1.0),
        ];
        let result = calculate_intersection(&solids).unwrap();
        let order: Vec<(usize, usize)> =
            result.pairs().iter().map(|p| (p.first, p.second)).collect();
        assert_eq!(order, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        assert!(result.pair(0, 3).unwrap().locus.is_empty());
        assert!(!result.pair(1, 0).unwrap().locus.is_empty());
    }

    #[test]
    fn parallel_and_serial_agree() {
        let solids = [
            cuboid([0.0, 0.0, 0.0, 2.0, 2.0, 2.0]),
            sphere(p(2.0, 2.0, 2.0), 1.0),
            pyramid(),
        ];
        let serial = CalculateIntersection::new(&solids)
            .with_config(IntersectConfig::default().with_parallel(false))
            .execute()
            .unwrap();
        let parallel = CalculateIntersection::new(&solids).execute().unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn every_kind_pair_is_symmetric() {
        let solids = [
            cuboid([0.0, 0.0, 0.0, 2.0, 2.0, 2.0]),
            cuboid([1.0, 0.5, 0.5, 3.0, 3.0, 3.0]),
            sphere(p(2.0, 2.0, 1.5), 1.0),
            sphere(p(1.0, 1.0, 2.5), 0.75),
            pyramid(),
        ];
        let config = IntersectConfig::default();
        for a in &solids {
            for b in &solids {
                let ab = intersect_pair(a, b, &config).unwrap();
                let ba = intersect_pair(b, a, &config).unwrap();
                assert!(same_points(&ab, &ba), "{} vs {}", a.kind(), b.kind());
            }
        }
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let solids = [cuboid([0.0, 0.0, 0.0, 2.0, 2.0, 2.0]), pyramid()];
        let first = calculate_intersection(&solids).unwrap();
        let second = calculate_intersection(&solids).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let solids = [cuboid([0.0, 0.0, 0.0, 1.0, 1.0, 1.0])];
        let config = IntersectConfig::default().with_arc_segments(1);
        assert!(CalculateIntersection::new(&solids)
            .with_config(config)
            .execute()
            .is_err());
    }

    #[test]
    fn single_pair_rejects_invalid_config() {
        let a = cuboid([0.0, 0.0, 0.0, 2.0, 2.0, 2.0]);
        let b = sphere(p(2.0, 1.0, 1.0), 0.5);
        let config = IntersectConfig::default().with_arc_segments(0);
        let err = intersect_pair(&a, &b, &config).unwrap_err();
        assert!(matches!(
            err,
            GeosectError::Operation(OperationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn disjoint_boxes_skip_clipping() {
        let a = cuboid([0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let b = cuboid([2.0, 2.0, 2.0, 3.0, 3.0, 3.0]);
        assert!(intersect_pair(&a, &b, &IntersectConfig::default())
            .unwrap()
            .is_empty());
    }
}
