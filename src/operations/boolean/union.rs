use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::topology::{ConvexCell, SolidData, SolidId, SolidStore};

use super::subtract_convex;

/// Computes the boolean union of two solids.
///
/// Both inputs are consumed: on success they are removed from the store and
/// replaced by the fused result. On failure the store is left untouched.
pub struct Union {
    solid_a: SolidId,
    solid_b: SolidId,
}

impl Union {
    /// Creates a new `Union` operation.
    #[must_use]
    pub fn new(solid_a: SolidId, solid_b: SolidId) -> Self {
        Self { solid_a, solid_b }
    }

    /// Executes the union, creating the result solid in the solid store.
    ///
    /// # Errors
    ///
    /// Returns an error if either solid is missing, if both IDs name the same
    /// solid, or if the fused result is empty.
    pub fn execute(&self, store: &mut SolidStore) -> Result<SolidId> {
        if self.solid_a == self.solid_b {
            return Err(GeometryError::Degenerate("cannot fuse a solid with itself".into()).into());
        }

        let cells = fuse_cells(
            &store.solid(self.solid_a)?.cells,
            &store.solid(self.solid_b)?.cells,
        );
        if cells.is_empty() {
            return Err(GeometryError::Degenerate("union produced an empty solid".into()).into());
        }
        debug!(cells = cells.len(), "fused solids");

        store.remove_solid(self.solid_a);
        store.remove_solid(self.solid_b);
        Ok(store.add_solid(SolidData { cells }))
    }
}

/// Fuses two disjoint-cell collections into one.
///
/// Cells of `a` are kept as they are; each cell of `b` is reduced to the
/// parts not already covered by `a`. Cells of `b` are assumed disjoint from
/// each other, so they only need to be cut against `a`.
#[must_use]
pub fn fuse_cells(a: &[ConvexCell], b: &[ConvexCell]) -> Vec<ConvexCell> {
    let mut result = a.to_vec();
    for cell in b {
        let mut fragments = vec![cell.clone()];
        for existing in a {
            fragments = fragments
                .iter()
                .flat_map(|fragment| subtract_convex(fragment, existing))
                .collect();
            if fragments.is_empty() {
                break;
            }
        }
        result.extend(fragments);
    }
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::MakeBox;
    use crate::operations::query::{Area, Volume};
    use crate::operations::transform::{Rotate, Translate};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn union_of_overlapping_boxes() {
        let mut store = SolidStore::new();
        let a = MakeBox::new(p(0.0, 0.0, 0.0), p(2.0, 2.0, 2.0))
            .execute(&mut store)
            .unwrap();
        let b = MakeBox::new(p(1.0, 1.0, 1.0), p(3.0, 3.0, 3.0))
            .execute(&mut store)
            .unwrap();

        let fused = Union::new(a, b).execute(&mut store).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.solid(a).is_err());

        let volume = Volume::new(fused).execute(&store).unwrap();
        assert_relative_eq!(volume, 15.0, epsilon = 1e-9);

        // Two 24-unit boxes lose three 1x1 patches each where they overlap.
        let area = Area::new(fused).execute(&store).unwrap();
        assert_relative_eq!(area, 42.0, epsilon = 1e-9);
    }

    #[test]
    fn union_of_stacked_boxes_hides_contact_face() {
        let mut store = SolidStore::new();
        let base = MakeBox::with_size(10.0, 10.0, 2.0).execute(&mut store).unwrap();
        let fin = MakeBox::with_size(1.0, 10.0, 5.0).execute(&mut store).unwrap();
        Translate::new(fin, Vector3::new(4.0, 0.0, 2.0))
            .execute(&mut store)
            .unwrap();

        let fused = Union::new(base, fin).execute(&mut store).unwrap();
        let volume = Volume::new(fused).execute(&store).unwrap();
        assert_relative_eq!(volume, 250.0, epsilon = 1e-9);

        // 320 (base) + 130 (fin) - 2 * 10 (shared footprint)
        let area = Area::new(fused).execute(&store).unwrap();
        assert_relative_eq!(area, 430.0, epsilon = 1e-9);
    }

    #[test]
    fn union_with_tilted_fin_counts_overlap_once() {
        let mut store = SolidStore::new();
        let base = MakeBox::with_size(20.0, 10.0, 5.0).execute(&mut store).unwrap();
        let fin = MakeBox::with_size(2.0, 10.0, 20.0).execute(&mut store).unwrap();
        Rotate::new(fin, p(0.0, 0.0, 0.0), Vector3::y(), 20f64.to_radians())
            .execute(&mut store)
            .unwrap();
        Translate::new(fin, Vector3::new(8.0, 0.0, 5.0))
            .execute(&mut store)
            .unwrap();

        let fused = Union::new(base, fin).execute(&mut store).unwrap();
        let volume = Volume::new(fused).execute(&store).unwrap();

        // The fin's lower corner dips into the base as a right triangular
        // prism: legs 2 (fin thickness) and 2*tan(20°), extruded 10 along Y.
        let angle = 20f64.to_radians();
        let buried = 0.5 * 2.0 * (2.0 * angle.tan()) * 10.0;
        assert_relative_eq!(volume, 1000.0 + 400.0 - buried, epsilon = 1e-7);
    }

    #[test]
    fn fusing_solid_with_itself_fails() {
        let mut store = SolidStore::new();
        let a = MakeBox::with_size(1.0, 1.0, 1.0).execute(&mut store).unwrap();
        assert!(Union::new(a, a).execute(&mut store).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn fuse_cells_keeps_first_operand() {
        let a = vec![ConvexCell::cuboid(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0))];
        let b = vec![ConvexCell::cuboid(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0))];
        let fused = fuse_cells(&a, &b);
        assert_eq!(fused.len(), 1);
    }
}
