use crate::geometry::SolidKind;
use crate::math::vector::{dedup_points, dedup_polygon};
use crate::math::Point3;
use crate::tessellation::Polyline;

/// The intersection of exactly two solids.
///
/// `points` always holds every distinct point of `curves` and `faces` plus
/// any isolated points (tangencies, degenerate overlaps), so an empty
/// `points` means the solids do not meet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntersectionLocus {
    /// Distinct points of the locus.
    pub points: Vec<Point3>,
    /// Curves such as clipped circle arcs.
    pub curves: Vec<Polyline>,
    /// Planar polygons such as the faces of a clipped polyhedron.
    pub faces: Vec<Vec<Point3>>,
}

impl IntersectionLocus {
    /// Builds a locus, deriving `points` from all parts.
    ///
    /// Faces that collapse below 3 distinct vertices contribute points only.
    #[must_use]
    pub fn assemble(
        curves: Vec<Polyline>,
        faces: Vec<Vec<Point3>>,
        isolated: &[Point3],
        eps: f64,
    ) -> Self {
        let faces: Vec<Vec<Point3>> = faces.iter().map(|f| dedup_polygon(f, eps)).collect();

        let all: Vec<Point3> = curves
            .iter()
            .flat_map(|c| c.points.iter())
            .chain(faces.iter().flatten())
            .chain(isolated.iter())
            .copied()
            .collect();

        Self {
            points: dedup_points(&all, eps),
            curves,
            faces: faces.into_iter().filter(|f| f.len() >= 3).collect(),
        }
    }

    /// Whether the solids do not meet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Locus of one pair of input solids, identified by their input indices.
#[derive(Debug, Clone, PartialEq)]
pub struct PairIntersection {
    /// Index of the first solid (always below `second`).
    pub first: usize,
    /// Index of the second solid.
    pub second: usize,
    /// Kinds of the two solids, in index order.
    pub kinds: (SolidKind, SolidKind),
    /// What the two solids share.
    pub locus: IntersectionLocus,
}

/// Intersections of every pair of a set of solids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntersectionResult {
    pairs: Vec<PairIntersection>,
    eps: f64,
}

impl IntersectionResult {
    pub(crate) fn new(pairs: Vec<PairIntersection>, eps: f64) -> Self {
        Self { pairs, eps }
    }

    /// All pairs, including those that do not meet, in pair order.
    #[must_use]
    pub fn pairs(&self) -> &[PairIntersection] {
        &self.pairs
    }

    /// The pair of input solids `i` and `j` in either order.
    #[must_use]
    pub fn pair(&self, i: usize, j: usize) -> Option<&PairIntersection> {
        let (first, second) = if i < j { (i, j) } else { (j, i) };
        self.pairs
            .iter()
            .find(|p| p.first == first && p.second == second)
    }

    /// Union of all pairwise points, deduplicated.
    #[must_use]
    pub fn points(&self) -> Vec<Point3> {
        let all: Vec<Point3> = self
            .pairs
            .iter()
            .flat_map(|p| p.locus.points.iter().copied())
            .collect();
        dedup_points(&all, self.eps)
    }

    /// Whether no pair of solids meets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.iter().all(|p| p.locus.is_empty())
    }
}
