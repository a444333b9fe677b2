use crate::error::Result;
use crate::math::{Isometry3, Vector3};
use crate::topology::{SolidId, SolidStore};

use super::RigidTransform;

/// Translates a solid by a displacement vector.
pub struct Translate {
    solid: SolidId,
    displacement: Vector3,
}

impl Translate {
    /// Creates a new `Translate` operation.
    #[must_use]
    pub fn new(solid: SolidId, displacement: Vector3) -> Self {
        Self {
            solid,
            displacement,
        }
    }

    /// Executes the translation, modifying the solid in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the store.
    pub fn execute(&self, store: &mut SolidStore) -> Result<()> {
        let isometry = Isometry3::translation(
            self.displacement.x,
            self.displacement.y,
            self.displacement.z,
        );
        RigidTransform::new(self.solid, isometry).execute(store)
    }
}
