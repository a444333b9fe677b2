pub mod cell;
pub mod solid;

pub use cell::{CellFace, CellSide, ConvexCell};
pub use solid::{SolidData, SolidId};

use crate::error::GeometryError;
use slotmap::SlotMap;

/// Central arena that owns all solids.
///
/// Solids are referenced by typed IDs (generational indices), so a solid
/// that has been fused or discarded can never be reached through a stale ID.
#[derive(Debug, Default)]
pub struct SolidStore {
    solids: SlotMap<SolidId, SolidData>,
}

impl SolidStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a solid and returns its ID.
    pub fn add_solid(&mut self, data: SolidData) -> SolidId {
        self.solids.insert(data)
    }

    /// Returns a reference to the solid data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the store.
    pub fn solid(&self, id: SolidId) -> Result<&SolidData, GeometryError> {
        self.solids.get(id).ok_or(GeometryError::SolidNotFound)
    }

    /// Returns a mutable reference to the solid data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the store.
    pub fn solid_mut(&mut self, id: SolidId) -> Result<&mut SolidData, GeometryError> {
        self.solids.get_mut(id).ok_or(GeometryError::SolidNotFound)
    }

    /// Removes a solid, returning its data if it was present.
    pub fn remove_solid(&mut self, id: SolidId) -> Option<SolidData> {
        self.solids.remove(id)
    }

    /// Number of live solids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.solids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }
}
