use crate::error::Result;
use crate::math::polygon::overlap_area;
use crate::math::COPLANAR_TOLERANCE;
use crate::topology::{ConvexCell, SolidId, SolidStore};

/// Computes the outer surface area of a solid.
///
/// Every cell face counts, minus the patches where it sits back to back with
/// a face of a neighbouring cell. Those patches are interior to the solid.
pub struct Area {
    solid: SolidId,
}

impl Area {
    /// Creates a new `Area` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the query, returning the total exposed surface area.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the store.
    pub fn execute(&self, store: &SolidStore) -> Result<f64> {
        let data = store.solid(self.solid)?;
        Ok(exposed_area(&data.cells))
    }
}

/// Exposed boundary area of a set of interior-disjoint convex cells.
#[must_use]
pub fn exposed_area(cells: &[ConvexCell]) -> f64 {
    let bounds: Vec<_> = cells.iter().map(ConvexCell::bounds).collect();
    let mut total = 0.0;

    for (i, cell) in cells.iter().enumerate() {
        for face in cell.faces() {
            let mut exposed = face.area();
            for (j, other) in cells.iter().enumerate() {
                if i == j || !touching(&bounds[i], &bounds[j]) {
                    continue;
                }
                for other_face in other.faces() {
                    if face.plane.is_opposite(&other_face.plane) {
                        exposed -= overlap_area(
                            &face.vertices,
                            face.plane.normal(),
                            &other_face.vertices,
                            other_face.plane.normal(),
                        );
                    }
                }
            }
            total += exposed.max(0.0);
        }
    }
    total
}

type Bounds = (crate::math::Point3, crate::math::Point3);

fn touching(a: &Bounds, b: &Bounds) -> bool {
    (0..3).all(|k| {
        a.0[k] <= b.1[k] + COPLANAR_TOLERANCE && b.0[k] <= a.1[k] + COPLANAR_TOLERANCE
    })
}
