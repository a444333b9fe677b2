use crate::error::Result;
use crate::topology::{ConvexCell, SolidId, SolidStore};

/// Computes the volume of a solid.
///
/// Cells never overlap, so the volume is the plain sum of the cell volumes.
/// Each cell volume is exact for its planar faces.
pub struct Volume {
    solid: SolidId,
}

impl Volume {
    /// Creates a new `Volume` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the query, returning the volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the store.
    pub fn execute(&self, store: &SolidStore) -> Result<f64> {
        let data = store.solid(self.solid)?;
        Ok(data.cells.iter().map(ConvexCell::volume).sum())
    }
}
