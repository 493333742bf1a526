mod parse;

pub use parse::{parse_cuboid, parse_pyramid, parse_sphere};

use tracing::debug;

use crate::error::{InputError, Result};
use crate::geometry::{Cuboid, Pyramid, Solid, Sphere};
use crate::math::Point3;
use crate::operations::intersect::{CalculateIntersection, IntersectConfig, IntersectionResult};
use crate::operations::query::{Aabb, BoundingBox};
use crate::tessellation::{TessellateSolid, TessellationParams, TriangleMesh};

/// The shapes the user entered; absent ones were left blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeInputs {
    pub cuboid: Option<Cuboid>,
    pub sphere: Option<Sphere>,
    pub pyramid: Option<Pyramid>,
}

impl ShapeInputs {
    /// Parses the three coordinate strings.
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`] met, in cuboid, sphere, pyramid
    /// order.
    pub fn from_text(cuboid: &str, sphere: &str, pyramid: &str) -> Result<Self> {
        Ok(Self {
            cuboid: parse_cuboid(cuboid)?,
            sphere: parse_sphere(sphere)?,
            pyramid: parse_pyramid(pyramid)?,
        })
    }
}

/// Which of the entered shapes take part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeSelection {
    pub cuboid: bool,
    pub sphere: bool,
    pub pyramid: bool,
}

impl ShapeSelection {
    /// Every shape selected.
    #[must_use]
    pub fn all() -> Self {
        Self {
            cuboid: true,
            sphere: true,
            pyramid: true,
        }
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.cuboid || self.sphere || self.pyramid)
    }
}

/// The selected solids, ready to be intersected and drawn.
///
/// Parse the three coordinate strings into [`ShapeInputs`], pick shapes
/// with a [`ShapeSelection`], then call [`Scene::compute`] for the
/// [`PlotData`] handed to the renderer.
#[derive(Debug, Clone)]
pub struct Scene {
    solids: Vec<Solid>,
    tessellation: TessellationParams,
}

impl Scene {
    /// Keeps the selected shapes that were actually given, in cuboid,
    /// sphere, pyramid order.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NothingSelected`] if `selection` is empty.
    pub fn new(inputs: ShapeInputs, selection: ShapeSelection) -> Result<Self> {
        if selection.is_empty() {
            return Err(InputError::NothingSelected.into());
        }

        let solids: Vec<Solid> = [
            inputs.cuboid.filter(|_| selection.cuboid).map(Solid::from),
            inputs.sphere.filter(|_| selection.sphere).map(Solid::from),
            inputs.pyramid.filter(|_| selection.pyramid).map(Solid::from),
        ]
        .into_iter()
        .flatten()
        .collect();

        Ok(Self {
            solids,
            tessellation: TessellationParams::default(),
        })
    }

    /// Set the sphere mesh resolution.
    #[must_use]
    pub fn with_tessellation(mut self, params: TessellationParams) -> Self {
        self.tessellation = params;
        self
    }

    /// Returns the solids in the scene.
    #[must_use]
    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    /// Intersects the solids and meshes them for display.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a computation
    /// fails.
    pub fn compute(&self, config: &IntersectConfig) -> Result<PlotData> {
        let intersection = CalculateIntersection::new(&self.solids)
            .with_config(*config)
            .execute()?;
        let meshes = self
            .solids
            .iter()
            .map(|s| TessellateSolid::new(s, self.tessellation).execute())
            .collect::<Result<Vec<_>>>()?;

        debug!(
            solids = self.solids.len(),
            points = intersection.points().len(),
            "scene computed"
        );
        Ok(PlotData {
            solids: self.solids.clone(),
            meshes,
            intersection,
        })
    }
}

/// Everything the renderer draws.
#[derive(Debug, Clone)]
pub struct PlotData {
    /// The solids, in scene order.
    pub solids: Vec<Solid>,
    /// One mesh per solid, in the same order.
    pub meshes: Vec<TriangleMesh>,
    /// Pairwise intersections of the solids.
    pub intersection: IntersectionResult,
}

impl PlotData {
    /// Intersection points to scatter over the shapes.
    #[must_use]
    pub fn points(&self) -> Vec<Point3> {
        self.intersection.points()
    }

    /// All solid meshes merged into one, for renderers that draw a single
    /// buffer.
    #[must_use]
    pub fn combined_mesh(&self) -> TriangleMesh {
        let mut combined = TriangleMesh::default();
        for mesh in &self.meshes {
            combined.merge(mesh);
        }
        combined
    }

    /// Box around every solid, for the plot axes; `None` for an empty scene.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        self.solids
            .iter()
            .map(|s| BoundingBox::new(s).execute())
            .reduce(|acc, b| acc.union(&b))
    }
}
