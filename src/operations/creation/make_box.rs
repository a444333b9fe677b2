use crate::error::{GeometryError, Result};
use crate::math::Point3;
use crate::topology::{ConvexCell, SolidData, SolidId, SolidStore};

/// Creates an axis-aligned box solid from two corner points.
pub struct MakeBox {
    min_corner: Point3,
    max_corner: Point3,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(min_corner: Point3, max_corner: Point3) -> Self {
        Self {
            min_corner,
            max_corner,
        }
    }

    /// Box of size `dx × dy × dz` with its minimum corner at the origin.
    #[must_use]
    pub fn with_size(dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(Point3::origin(), Point3::new(dx, dy, dz))
    }

    /// Executes the operation, creating the box in the solid store.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDimension`] if any edge length is not
    /// finite and positive.
    pub fn execute(&self, store: &mut SolidStore) -> Result<SolidId> {
        let extent = self.max_corner - self.min_corner;
        for (parameter, value) in [("dx", extent.x), ("dy", extent.y), ("dz", extent.z)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GeometryError::InvalidDimension { parameter, value }.into());
            }
        }

        let cell = ConvexCell::cuboid(self.min_corner, self.max_corner);
        Ok(store.add_solid(SolidData::from_cell(cell)))
    }
}
