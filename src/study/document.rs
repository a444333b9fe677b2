//! The persisted study document: every successfully built design, placed on
//! a grid with its shape and display colour.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StudyError};
use crate::kernel::ShapeSnapshot;
use crate::operations::query::Aabb;

/// Name given to every study document.
pub const DOCUMENT_NAME: &str = "HeatsinkStudy";
/// Format identifier written into saved documents.
pub const DOCUMENT_FORMAT: &str = "heatsink-study";
/// Current document format version.
pub const FORMAT_VERSION: u32 = 1;

/// Axis-aligned box in document coordinates, mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Bounds {
    #[must_use]
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        for k in 0..3 {
            out.min[k] = out.min[k].min(other.min[k]);
            out.max[k] = out.max[k].max(other.max[k]);
        }
        out
    }

    #[must_use]
    pub fn translated(&self, offset: [f64; 3]) -> Self {
        let mut out = *self;
        for k in 0..3 {
            out.min[k] += offset[k];
            out.max[k] += offset[k];
        }
        out
    }
}

impl From<Aabb> for Bounds {
    fn from(aabb: Aabb) -> Self {
        Self::new(
            [aabb.min.x, aabb.min.y, aabb.min.z],
            [aabb.max.x, aabb.max.y, aabb.max.z],
        )
    }
}

/// One heatsink placed in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    /// Document label, e.g. `Heatsink_3`.
    pub label: String,
    /// Name of the design it was built from, e.g. `Design_3`.
    pub design: String,
    /// Translation applied to the shape, mm.
    pub placement: [f64; 3],
    /// RGB display colour, each channel in `[0, 1)`.
    pub color: [f32; 3],
    /// Shape in local coordinates.
    pub shape: ShapeSnapshot,
    /// Bounds of the shape in local coordinates.
    pub local_bounds: Bounds,
    /// Placed bounds; filled in by [`StudyDocument::recompute`].
    #[serde(default)]
    pub bounds: Option<Bounds>,
}

/// Collection of placed heatsinks plus the fitted view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyDocument {
    pub format: String,
    pub version: u32,
    pub name: String,
    pub created: DateTime<Utc>,
    pub objects: Vec<PlacedObject>,
    /// Bounds enclosing every object; set by [`StudyDocument::fit_view`].
    #[serde(default)]
    pub view: Option<Bounds>,
}

impl Default for StudyDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl StudyDocument {
    #[must_use]
    pub fn new() -> Self {
        Self {
            format: DOCUMENT_FORMAT.to_string(),
            version: FORMAT_VERSION,
            name: DOCUMENT_NAME.to_string(),
            created: Utc::now(),
            objects: Vec::new(),
            view: None,
        }
    }

    /// Adds an object. Its placed bounds stay unset until the next
    /// recompute.
    pub fn add_object(
        &mut self,
        label: impl Into<String>,
        design: impl Into<String>,
        placement: [f64; 3],
        color: [f32; 3],
        shape: ShapeSnapshot,
        local_bounds: Bounds,
    ) {
        self.objects.push(PlacedObject {
            label: label.into(),
            design: design.into(),
            placement,
            color,
            shape,
            local_bounds,
            bounds: None,
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[must_use]
    pub fn object(&self, label: &str) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| o.label == label)
    }

    /// Refreshes every object's placed bounds from its local bounds and
    /// placement.
    pub fn recompute(&mut self) {
        for object in &mut self.objects {
            object.bounds = Some(object.local_bounds.translated(object.placement));
        }
    }

    /// Sets the view to enclose every object with placed bounds.
    pub fn fit_view(&mut self) {
        self.view = self
            .objects
            .iter()
            .filter_map(|o| o.bounds)
            .reduce(|acc, b| acc.union(&b));
    }

    /// Writes the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`StudyError`] if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(StudyError::from)?;
        std::fs::write(path, json).map_err(StudyError::from)?;
        Ok(())
    }

    /// Reads a document written by [`StudyDocument::save`].
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::UnsupportedDocument`] for a foreign format or a
    /// newer version, and I/O or JSON errors otherwise.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(StudyError::from)?;
        let document: Self = serde_json::from_str(&json).map_err(StudyError::from)?;
        if document.format != DOCUMENT_FORMAT || document.version > FORMAT_VERSION {
            return Err(StudyError::UnsupportedDocument {
                format: document.format,
                version: document.version,
            }
            .into());
        }
        Ok(document)
    }
}
