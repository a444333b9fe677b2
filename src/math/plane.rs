use crate::error::GeometryError;

use super::{Isometry3, Point3, Vector3, COPLANAR_TOLERANCE, TOLERANCE};

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Strictly in the direction of the normal.
    Front,
    /// Strictly against the normal.
    Back,
    /// Within [`TOLERANCE`] of the plane.
    On,
}

impl Side {
    /// Classifies a signed distance.
    #[must_use]
    pub fn of_distance(distance: f64) -> Self {
        if distance > TOLERANCE {
            Self::Front
        } else if distance < -TOLERANCE {
            Self::Back
        } else {
            Self::On
        }
    }
}

/// An oriented plane `normal · p = offset` with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vector3,
    offset: f64,
}

impl Plane {
    /// Creates a plane through `point` with the given (not necessarily unit)
    /// normal.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the normal has zero length.
    pub fn from_point_normal(point: &Point3, normal: &Vector3) -> Result<Self, GeometryError> {
        let len = normal.norm();
        if len < TOLERANCE || !len.is_finite() {
            return Err(GeometryError::ZeroVector);
        }
        let normal = normal / len;
        Ok(Self {
            normal,
            offset: normal.dot(&point.coords),
        })
    }

    /// Unit normal of the plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Signed distance from the origin along the normal.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Signed distance of `point` from the plane (positive in front).
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        self.normal.dot(&point.coords) - self.offset
    }

    #[must_use]
    pub fn side(&self, point: &Point3) -> Side {
        Side::of_distance(self.signed_distance(point))
    }

    /// The same plane facing the other way.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Whether `other` is this plane with its normal reversed, i.e. two faces
    /// lying on it would touch back to back.
    #[must_use]
    pub fn is_opposite(&self, other: &Self) -> bool {
        (self.normal + other.normal).norm() < COPLANAR_TOLERANCE
            && (self.offset + other.offset).abs() < COPLANAR_TOLERANCE
    }

    /// Applies a rigid transform to the plane.
    #[must_use]
    pub fn transformed(&self, iso: &Isometry3) -> Self {
        let anchor = Point3::from(self.normal * self.offset);
        let normal = iso.rotation * self.normal;
        let anchor = iso * anchor;
        Self {
            normal,
            offset: normal.dot(&anchor.coords),
        }
    }
}
