use crate::error::{GeometryError, Result};
use crate::math::Point3;
use crate::topology::{SolidId, SolidStore};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

/// Computes the axis-aligned bounding box of a solid.
pub struct BoundingBox {
    solid: SolidId,
}

impl BoundingBox {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is missing or has no cells.
    pub fn execute(&self, store: &SolidStore) -> Result<Aabb> {
        let data = store.solid(self.solid)?;
        let mut cells = data.cells.iter().map(crate::topology::ConvexCell::bounds);
        let Some((mut min, mut max)) = cells.next() else {
            return Err(GeometryError::Degenerate("solid has no cells".into()).into());
        };
        for (lo, hi) in cells {
            min = min.inf(&lo);
            max = max.sup(&hi);
        }
        Ok(Aabb { min, max })
    }
}
