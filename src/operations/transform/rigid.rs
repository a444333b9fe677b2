use crate::error::Result;
use crate::math::Isometry3;
use crate::topology::{SolidId, SolidStore};

/// Applies a rigid transform to every cell of a solid.
pub struct RigidTransform {
    solid: SolidId,
    isometry: Isometry3,
}

impl RigidTransform {
    /// Creates a new `RigidTransform` operation.
    #[must_use]
    pub fn new(solid: SolidId, isometry: Isometry3) -> Self {
        Self { solid, isometry }
    }

    /// Executes the transformation, modifying the solid in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the store.
    pub fn execute(&self, store: &mut SolidStore) -> Result<()> {
        let data = store.solid_mut(self.solid)?;
        for cell in &mut data.cells {
            cell.transform(&self.isometry);
        }
        Ok(())
    }
}
