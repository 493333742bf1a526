use crate::error::{OperationError, Result};
use crate::math::Tolerance;

/// Smallest arc resolution that still outlines a circle.
pub const MIN_ARC_SEGMENTS: usize = 3;

/// Configuration for [`CalculateIntersection`](super::CalculateIntersection).
///
/// # Presets
///
/// - [`IntersectConfig::default()`]: epsilon `1e-9`, 64 arc segments
/// - [`IntersectConfig::precise()`]: epsilon `1e-12`, 256 arc segments
/// - [`IntersectConfig::coarse()`]: epsilon `1e-6`, 16 arc segments
///
/// # Example
///
/// ```
/// use geosect::operations::intersect::IntersectConfig;
/// use geosect::math::Tolerance;
///
/// let config = IntersectConfig::default()
///     .with_tolerance(Tolerance::new(1e-7))
///     .with_arc_segments(128)
///     .with_parallel(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectConfig {
    /// Relative tolerance for on-boundary, parallel and coplanar decisions.
    pub tolerance: Tolerance,

    /// Number of samples around a full circle when outlining sphere sections.
    pub arc_segments: usize,

    /// Whether to evaluate pairs on the rayon thread pool.
    pub parallel: bool,
}

impl Default for IntersectConfig {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            arc_segments: 64,
            parallel: true,
        }
    }
}

impl IntersectConfig {
    /// Tight tolerance and dense arcs, for exact input coordinates.
    #[must_use]
    pub fn precise() -> Self {
        Self {
            tolerance: Tolerance::new(1e-12),
            arc_segments: 256,
            parallel: true,
        }
    }

    /// Loose tolerance and sparse arcs, for hand-entered or noisy input.
    #[must_use]
    pub fn coarse() -> Self {
        Self {
            tolerance: Tolerance::new(1e-6),
            arc_segments: 16,
            parallel: true,
        }
    }

    /// Set the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the number of samples per full circle.
    #[must_use]
    pub fn with_arc_segments(mut self, segments: usize) -> Self {
        self.arc_segments = segments;
        self
    }

    /// Enable or disable parallel pair evaluation.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidConfig`] if `arc_segments` is below
    /// [`MIN_ARC_SEGMENTS`].
    pub fn validate(&self) -> Result<()> {
        if self.arc_segments < MIN_ARC_SEGMENTS {
            return Err(OperationError::InvalidConfig(format!(
                "arc_segments must be at least {MIN_ARC_SEGMENTS}, got {}",
                self.arc_segments
            ))
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = IntersectConfig::default();
        assert!((config.tolerance.epsilon() - 1e-9).abs() < 1e-20);
        assert_eq!(config.arc_segments, 64);
        assert!(config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn presets_order_tolerances() {
        let eps = |c: IntersectConfig| c.tolerance.epsilon();
        assert!(eps(IntersectConfig::precise()) < eps(IntersectConfig::default()));
        assert!(eps(IntersectConfig::coarse()) > eps(IntersectConfig::default()));
    }

    #[test]
    fn builders_chain() {
        let config = IntersectConfig::default()
            .with_arc_segments(8)
            .with_parallel(false)
            .with_tolerance(Tolerance::new(1e-4));
        assert_eq!(config.arc_segments, 8);
        assert!(!config.parallel);
        assert!((config.tolerance.epsilon() - 1e-4).abs() < 1e-20);
    }

    #[test]
    fn too_few_segments_invalid() {
        let config = IntersectConfig::default().with_arc_segments(2);
        assert!(config.validate().is_err());
    }
}
