//! The geometry capability the heatsink builder is written against.
//!
//! [`SolidGeometry`] is the seam between design logic and whatever engine
//! actually builds solids. [`SolidStore`] implements it with the exact
//! convex-cell kernel in [`crate::operations`].

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::{Point3, Vector3};
use crate::operations::boolean::Union;
use crate::operations::creation::MakeBox;
use crate::operations::query::{Aabb, Area, BoundingBox, Volume};
use crate::operations::transform::{Rotate, Translate};
use crate::topology::{SolidId, SolidStore};

/// Primitive solid operations needed to build and measure a heatsink.
///
/// Lengths are in millimetres, angles in degrees.
pub trait SolidGeometry {
    /// Handle to a solid owned by the kernel.
    type Solid: Copy + std::fmt::Debug;

    /// Creates a box `dx × dy × dz` with its minimum corner at the origin.
    ///
    /// # Errors
    ///
    /// Fails if any size is not finite and positive.
    fn make_box(&mut self, dx: f64, dy: f64, dz: f64) -> Result<Self::Solid>;

    /// Rotates a solid in place about an axis (right-hand rule).
    ///
    /// # Errors
    ///
    /// Fails on a zero axis or an unknown solid.
    fn rotate(
        &mut self,
        solid: Self::Solid,
        axis_origin: Point3,
        axis_direction: Vector3,
        angle_deg: f64,
    ) -> Result<()>;

    /// Translates a solid in place.
    ///
    /// # Errors
    ///
    /// Fails on an unknown solid.
    fn translate(&mut self, solid: Self::Solid, displacement: Vector3) -> Result<()>;

    /// Fuses two solids, consuming both on success.
    ///
    /// # Errors
    ///
    /// Fails if the fusion is degenerate; the inputs stay valid in that case.
    fn union(&mut self, a: Self::Solid, b: Self::Solid) -> Result<Self::Solid>;

    /// Volume in mm³.
    ///
    /// # Errors
    ///
    /// Fails on an unknown solid.
    fn volume(&self, solid: Self::Solid) -> Result<f64>;

    /// Outer surface area in mm².
    ///
    /// # Errors
    ///
    /// Fails on an unknown solid.
    fn surface_area(&self, solid: Self::Solid) -> Result<f64>;

    /// Axis-aligned bounds in the solid's own coordinates.
    ///
    /// # Errors
    ///
    /// Fails on an unknown or empty solid.
    fn bounding_box(&self, solid: Self::Solid) -> Result<Aabb>;

    /// Exports the solid's shape for persistence.
    ///
    /// # Errors
    ///
    /// Fails on an unknown solid.
    fn snapshot(&self, solid: Self::Solid) -> Result<ShapeSnapshot>;

    /// Releases a solid. Unknown handles are ignored.
    fn discard(&mut self, solid: Self::Solid);
}

/// Kernel-neutral copy of a solid: a list of convex cells, each given as
/// face loops of `[x, y, z]` points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeSnapshot {
    pub cells: Vec<Vec<Vec<[f64; 3]>>>,
}

impl SolidGeometry for SolidStore {
    type Solid = SolidId;

    fn make_box(&mut self, dx: f64, dy: f64, dz: f64) -> Result<SolidId> {
        MakeBox::with_size(dx, dy, dz).execute(self)
    }

    fn rotate(
        &mut self,
        solid: SolidId,
        axis_origin: Point3,
        axis_direction: Vector3,
        angle_deg: f64,
    ) -> Result<()> {
        Rotate::new(solid, axis_origin, axis_direction, angle_deg.to_radians()).execute(self)
    }

    fn translate(&mut self, solid: SolidId, displacement: Vector3) -> Result<()> {
        Translate::new(solid, displacement).execute(self)
    }

    fn union(&mut self, a: SolidId, b: SolidId) -> Result<SolidId> {
        Union::new(a, b).execute(self)
    }

    fn volume(&self, solid: SolidId) -> Result<f64> {
        Volume::new(solid).execute(self)
    }

    fn surface_area(&self, solid: SolidId) -> Result<f64> {
        Area::new(solid).execute(self)
    }

    fn bounding_box(&self, solid: SolidId) -> Result<Aabb> {
        BoundingBox::new(solid).execute(self)
    }

    fn snapshot(&self, solid: SolidId) -> Result<ShapeSnapshot> {
        let data = self.solid(solid)?;
        let cells = data
            .cells
            .iter()
            .map(|cell| {
                cell.faces()
                    .iter()
                    .map(|face| face.vertices.iter().map(|v| [v.x, v.y, v.z]).collect())
                    .collect()
            })
            .collect();
        Ok(ShapeSnapshot { cells })
    }

    fn discard(&mut self, solid: SolidId) {
        self.remove_solid(solid);
    }
}
