use crate::math::Point3;

/// Result of a closest point query.
#[derive(Debug, Clone, Copy)]
pub struct ClosestPointResult {
    /// The closest point on the segment.
    pub point: Point3,
    /// Parameter in `[0, 1]` along the segment.
    pub parameter: f64,
    /// The distance from the query point to the closest point.
    pub distance: f64,
}

/// Finds the closest point on the segment `start -> end` to a given point.
pub struct ClosestPointOnSegment {
    start: Point3,
    end: Point3,
    point: Point3,
}

impl ClosestPointOnSegment {
    /// Creates a new `ClosestPointOnSegment` query.
    #[must_use]
    pub fn new(start: Point3, end: Point3, point: Point3) -> Self {
        Self { start, end, point }
    }

    /// Executes the query by projecting onto the supporting line and
    /// clamping to the segment. A zero-length segment returns its start.
    #[must_use]
    pub fn execute(&self) -> ClosestPointResult {
        let dir = self.end - self.start;
        let len2 = dir.norm_squared();

        let t = if len2 > 0.0 {
            ((self.point - self.start).dot(&dir) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let closest = self.start + dir * t;
        ClosestPointResult {
            point: closest,
            parameter: t,
            distance: (self.point - closest).norm(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn projects_onto_interior() {
        let r = ClosestPointOnSegment::new(p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0), p(1.0, 3.0, 0.0))
            .execute();
        assert!((r.point - p(1.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((r.parameter - 0.25).abs() < 1e-12);
        assert!((r.distance - 3.0).abs() < 1e-12);
    }

    #[test]
    fn clamps_to_endpoint() {
        let r = ClosestPointOnSegment::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(5.0, 0.0, 0.0))
            .execute();
        assert!((r.point - p(1.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((r.parameter - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_length_segment() {
        let q = p(1.0, 1.0, 1.0);
        let r = ClosestPointOnSegment::new(q, q, p(1.0, 1.0, 3.0)).execute();
        assert!((r.distance - 2.0).abs() < 1e-12);
    }
}
