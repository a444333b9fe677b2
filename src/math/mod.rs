pub mod plane;
pub mod polygon;

pub use plane::{Plane, Side};

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Rigid-body transform (rotation followed by translation).
pub type Isometry3 = nalgebra::Isometry3<f64>;

/// Linear tolerance (mm) used when classifying points against a plane.
pub const TOLERANCE: f64 = 1e-9;

/// Two face planes closer than this (mm, and in normal components) are
/// treated as the same plane.
pub const COPLANAR_TOLERANCE: f64 = 1e-6;

/// Faces (mm²) and cells (mm³) below this size are dropped as slivers.
pub const SLIVER_TOLERANCE: f64 = 1e-9;
