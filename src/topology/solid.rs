use super::cell::ConvexCell;

slotmap::new_key_type! {
    /// Unique identifier for a solid in the solid store.
    pub struct SolidId;
}

/// Data associated with a solid.
///
/// A solid is the union of its cells; cell interiors never overlap.
#[derive(Debug, Clone, Default)]
pub struct SolidData {
    /// Disjoint convex pieces making up the solid.
    pub cells: Vec<ConvexCell>,
}

impl SolidData {
    #[must_use]
    pub fn from_cell(cell: ConvexCell) -> Self {
        Self { cells: vec![cell] }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
