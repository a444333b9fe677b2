//! Turns a [`DesignParameters`] into a fused solid.

use tracing::{debug, instrument};

use crate::design::DesignParameters;
use crate::error::{GeometryError, Result};
use crate::kernel::SolidGeometry;
use crate::math::{Point3, Vector3};

/// Position and tilt of one fin, before it is lifted onto the base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinPlacement {
    pub index: u32,
    /// Offset of the fin's left face along the width axis, in mm.
    pub x_pos: f64,
    /// Tilt about the length axis, in degrees.
    pub angle_deg: f64,
}

/// Lays fins out evenly across the base width.
///
/// The first fin sits flush with the left edge and the last flush with the
/// right edge. A single fin is centred.
#[must_use]
pub fn fin_layout(params: &DesignParameters) -> Vec<FinPlacement> {
    let span = params.width - params.fin_thickness;
    let (start, spacing) = match params.num_fins {
        0 => return Vec::new(),
        1 => (span / 2.0, 0.0),
        n => (0.0, span / f64::from(n - 1)),
    };

    (0..params.num_fins)
        .map(|index| FinPlacement {
            index,
            x_pos: start + f64::from(index) * spacing,
            angle_deg: params.pattern.fin_tilt(params.fin_angle, index),
        })
        .collect()
}

/// Builds the heatsink solid for a design: a base plate with every fin
/// fused onto its top face.
pub struct BuildHeatsink<'a> {
    params: &'a DesignParameters,
}

impl<'a> BuildHeatsink<'a> {
    #[must_use]
    pub fn new(params: &'a DesignParameters) -> Self {
        Self { params }
    }

    /// Executes the build against `kernel`.
    ///
    /// On failure every intermediate solid is discarded, so the kernel holds
    /// nothing from this design.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] for zero fins, non-positive or non-finite
    /// dimensions, or a degenerate fusion.
    #[instrument(skip_all, fields(design = %self.params.name, pattern = %self.params.pattern))]
    pub fn execute<K: SolidGeometry>(&self, kernel: &mut K) -> Result<K::Solid> {
        self.validate()?;
        let p = self.params;

        let mut body = kernel.make_box(p.width, p.length, p.base_height)?;
        for placement in fin_layout(p) {
            match self.add_fin(kernel, body, &placement) {
                Ok(fused) => body = fused,
                Err(err) => {
                    kernel.discard(body);
                    return Err(err);
                }
            }
        }
        debug!(fins = p.num_fins, "heatsink fused");
        Ok(body)
    }

    fn validate(&self) -> Result<()> {
        let p = self.params;
        if p.num_fins == 0 {
            return Err(GeometryError::NoFins.into());
        }
        for (parameter, value) in [
            ("width", p.width),
            ("length", p.length),
            ("base_height", p.base_height),
            ("fin_height", p.fin_height),
            ("fin_thickness", p.fin_thickness),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GeometryError::InvalidDimension { parameter, value }.into());
            }
        }
        if !p.fin_angle.is_finite() {
            return Err(GeometryError::InvalidDimension {
                parameter: "fin_angle",
                value: p.fin_angle,
            }
            .into());
        }
        Ok(())
    }

    fn add_fin<K: SolidGeometry>(
        &self,
        kernel: &mut K,
        body: K::Solid,
        placement: &FinPlacement,
    ) -> Result<K::Solid> {
        let p = self.params;
        let fin = kernel.make_box(p.fin_thickness, p.length, p.fin_height)?;

        let placed = self.place_fin(kernel, fin, placement);
        let fused = placed.and_then(|()| kernel.union(body, fin));
        if fused.is_err() {
            kernel.discard(fin);
        }
        fused
    }

    fn place_fin<K: SolidGeometry>(
        &self,
        kernel: &mut K,
        fin: K::Solid,
        placement: &FinPlacement,
    ) -> Result<()> {
        if placement.angle_deg != 0.0 {
            kernel.rotate(fin, Point3::origin(), Vector3::y(), placement.angle_deg)?;
        }
        kernel.translate(
            fin,
            Vector3::new(placement.x_pos, 0.0, self.params.base_height),
        )
    }
}
