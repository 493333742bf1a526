pub mod intersect_3d;
pub mod polygon_3d;
pub mod vector;

pub use vector::{cross, dedup_points, distance, dot, normalize};

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Default epsilon for on-boundary, parallel and coplanar decisions.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Numerical tolerance shared by every intersection routine.
///
/// The raw epsilon is relative: [`Tolerance::scaled`] multiplies it by the
/// extent of the inputs so that large and small scenes behave alike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    epsilon: f64,
}

impl Tolerance {
    /// Creates a tolerance with the given relative epsilon.
    ///
    /// Non-finite or non-positive values fall back to [`DEFAULT_EPSILON`].
    #[must_use]
    pub fn new(epsilon: f64) -> Self {
        if epsilon.is_finite() && epsilon > 0.0 {
            Self { epsilon }
        } else {
            Self::default()
        }
    }

    /// Returns the relative epsilon.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Absolute epsilon for inputs spanning `extent`.
    ///
    /// Extents below 1 use the raw epsilon so point-like inputs keep a
    /// non-zero threshold.
    #[must_use]
    pub fn scaled(&self, extent: f64) -> f64 {
        self.epsilon * extent.abs().max(1.0)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_grows_with_extent() {
        let tol = Tolerance::default();
        assert!((tol.scaled(1000.0) - 1e-6).abs() < 1e-15);
        assert!((tol.scaled(0.001) - DEFAULT_EPSILON).abs() < 1e-20);
    }

    #[test]
    fn invalid_epsilon_falls_back() {
        assert_eq!(Tolerance::new(-1.0), Tolerance::default());
        assert_eq!(Tolerance::new(f64::NAN), Tolerance::default());
        assert!((Tolerance::new(1e-6).epsilon() - 1e-6).abs() < 1e-20);
    }
}
