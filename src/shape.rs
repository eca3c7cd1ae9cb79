//! A generated shape: an L-System together with everything needed to turn it into
//! indexed geometry, recomputed lazily when any input changes.

use crate::error::{LSystemError, Result};
use crate::geometry::{BoundingBox, SpatialIndex};
use crate::interpreter::{Geometry, InterpretationMap, compute_vertices};
use crate::lsystem::LSystem;
use crate::turtle::DrawingParameters;
use glam::Vec2;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Limits applied by a [`Shape`] before it asks the engine for geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeConfig {
    /// Highest iteration a shape may request. Sequence length grows exponentially
    /// with the iteration count and the engine itself does not stop it.
    pub max_iterations: usize,
    /// Upper bound on the number of sub-boxes used for hit-testing.
    pub max_sub_boxes: usize,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            max_iterations: 16,
            max_sub_boxes: 10,
        }
    }
}

/// Derived data, valid for one L-System revision.
#[derive(Clone, Debug)]
struct Derived {
    revision: u64,
    geometry: Geometry,
    index: SpatialIndex,
}

/// An L-System, its interpretation and the geometry derived from them.
///
/// Mutable access to any input marks the derived geometry stale; it is recomputed
/// on the next read. Shapes share nothing, so distinct shapes can be computed on
/// different threads.
#[derive(Clone, Debug)]
pub struct Shape {
    lsystem: LSystem,
    map: InterpretationMap,
    parameters: DrawingParameters,
    config: ShapeConfig,
    derived: Option<Derived>,
}

impl Shape {
    pub fn new(lsystem: LSystem, map: InterpretationMap, parameters: DrawingParameters) -> Self {
        Self::with_config(lsystem, map, parameters, ShapeConfig::default())
    }

    pub fn with_config(
        lsystem: LSystem,
        map: InterpretationMap,
        parameters: DrawingParameters,
        config: ShapeConfig,
    ) -> Self {
        Self {
            lsystem,
            map,
            parameters,
            config,
            derived: None,
        }
    }

    pub fn lsystem(&self) -> &LSystem {
        &self.lsystem
    }

    /// Mutable access to the L-System. The caller may replace it outright, so the
    /// derived geometry is dropped.
    pub fn lsystem_mut(&mut self) -> &mut LSystem {
        self.derived = None;
        &mut self.lsystem
    }

    pub fn map(&self) -> &InterpretationMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut InterpretationMap {
        self.derived = None;
        &mut self.map
    }

    pub fn parameters(&self) -> &DrawingParameters {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut DrawingParameters {
        self.derived = None;
        &mut self.parameters
    }

    pub fn config(&self) -> &ShapeConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ShapeConfig) {
        self.config = config;
        self.derived = None;
    }

    /// Returns `true` if the next read will recompute the geometry.
    pub fn is_stale(&self) -> bool {
        self.derived
            .as_ref()
            .is_none_or(|d| d.revision != self.lsystem.revision())
    }

    fn refresh(&mut self) -> Result<&Derived> {
        let derived = match self.derived.take() {
            Some(d) if d.revision == self.lsystem.revision() => d,
            _ => self.recompute()?,
        };
        Ok(self.derived.insert(derived))
    }

    fn recompute(&mut self) -> Result<Derived> {
        if self.parameters.iterations > self.config.max_iterations {
            return Err(LSystemError::InvalidArgument(format!(
                "{} iterations requested, at most {} allowed",
                self.parameters.iterations, self.config.max_iterations
            )));
        }

        debug!(
            "recomputing shape at iteration {} (revision {})",
            self.parameters.iterations,
            self.lsystem.revision()
        );
        let geometry = match compute_vertices(&mut self.lsystem, &self.map, &self.parameters) {
            Ok(geometry) => geometry,
            Err(LSystemError::StackUnderflow { position }) => {
                warn!("unbalanced pop at symbol {position}, shape left empty");
                Geometry::default()
            }
            Err(e) => return Err(e),
        };
        let index = SpatialIndex::build(&geometry.vertices, self.config.max_sub_boxes)?;

        Ok(Derived {
            revision: self.lsystem.revision(),
            geometry,
            index,
        })
    }

    /// The current geometry, recomputed if stale.
    ///
    /// An unbalanced sequence yields empty geometry rather than an error.
    pub fn geometry(&mut self) -> Result<&Geometry> {
        Ok(&self.refresh()?.geometry)
    }

    pub fn index(&mut self) -> Result<&SpatialIndex> {
        Ok(&self.refresh()?.index)
    }

    pub fn bounding_box(&mut self) -> Result<BoundingBox> {
        Ok(self.refresh()?.index.bounding_box)
    }

    /// Approximate hit test against the shape's sub-boxes.
    pub fn is_inside(&mut self, point: Vec2) -> Result<bool> {
        Ok(self.refresh()?.index.point_inside(point))
    }
}
