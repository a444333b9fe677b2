use nalgebra::{Unit, UnitQuaternion};

use crate::error::{GeometryError, Result};
use crate::math::{Isometry3, Point3, Vector3, TOLERANCE};
use crate::topology::{SolidId, SolidStore};

use super::RigidTransform;

/// Rotates a solid around an axis (right-hand rule).
pub struct Rotate {
    solid: SolidId,
    axis_origin: Point3,
    axis_direction: Vector3,
    angle: f64,
}

impl Rotate {
    /// Creates a new `Rotate` operation.
    ///
    /// * `angle` - Rotation angle in radians.
    #[must_use]
    pub fn new(solid: SolidId, axis_origin: Point3, axis_direction: Vector3, angle: f64) -> Self {
        Self {
            solid,
            axis_origin,
            axis_direction,
            angle,
        }
    }

    /// Executes the rotation, modifying the solid in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis direction is zero-length or the solid is
    /// not in the store.
    pub fn execute(&self, store: &mut SolidStore) -> Result<()> {
        if self.axis_direction.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let axis = Unit::new_normalize(self.axis_direction);
        let rotation = UnitQuaternion::from_axis_angle(&axis, self.angle);
        let isometry = Isometry3::rotation_wrt_point(rotation, self.axis_origin);

        RigidTransform::new(self.solid, isometry).execute(store)
    }
}
