mod cuboid;
mod pyramid;
mod sphere;

pub use cuboid::Cuboid;
pub use pyramid::Pyramid;
pub use sphere::Sphere;

use std::fmt;

use crate::math::Point3;

/// The kind of a [`Solid`], ordered as pairs are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SolidKind {
    Cuboid,
    Sphere,
    Pyramid,
}

impl fmt::Display for SolidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cuboid => "cuboid",
            Self::Sphere => "sphere",
            Self::Pyramid => "pyramid",
        })
    }
}

/// Any of the supported solids; the unit the intersection engine works on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solid {
    Cuboid(Cuboid),
    Sphere(Sphere),
    Pyramid(Pyramid),
}

impl Solid {
    /// Returns the kind tag.
    #[must_use]
    pub fn kind(&self) -> SolidKind {
        match self {
            Self::Cuboid(_) => SolidKind::Cuboid,
            Self::Sphere(_) => SolidKind::Sphere,
            Self::Pyramid(_) => SolidKind::Pyramid,
        }
    }

    /// Whether `point` lies in the closed solid, with `eps` slack.
    #[must_use]
    pub fn contains(&self, point: &Point3, eps: f64) -> bool {
        match self {
            Self::Cuboid(c) => c.contains(point, eps),
            Self::Sphere(s) => s.contains(point, eps),
            Self::Pyramid(p) => p.contains(point, eps),
        }
    }
}

impl From<Cuboid> for Solid {
    fn from(c: Cuboid) -> Self {
        Self::Cuboid(c)
    }
}

impl From<Sphere> for Solid {
    fn from(s: Sphere) -> Self {
        Self::Sphere(s)
    }
}

impl From<Pyramid> for Solid {
    fn from(p: Pyramid) -> Self {
        Self::Pyramid(p)
    }
}
