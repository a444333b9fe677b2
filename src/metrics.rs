//! Physical estimates derived from a built heatsink.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::design::{DesignParameters, FinPattern};
use crate::error::Result;
use crate::kernel::SolidGeometry;

/// Density of aluminium, g/cm³.
pub const ALUMINIUM_DENSITY: f64 = 2.7;
/// Natural-convection heat transfer coefficient, W/(m²·K).
pub const HEAT_TRANSFER_COEFFICIENT: f64 = 10.0;
/// Assumed fin-to-ambient temperature difference, K.
pub const TEMPERATURE_DELTA: f64 = 50.0;
/// Complexity bonus for tilted fin patterns.
const TILT_COMPLEXITY: u32 = 10;

/// How surface area is converted before the convection estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermalModel {
    /// Divides cm² by 100, reproducing the historical spreadsheet values.
    /// This overstates dissipation by a factor of 100.
    Legacy,
    /// Converts cm² to m² properly (divide by 10 000).
    #[default]
    Corrected,
}

impl ThermalModel {
    /// Area fed into `h * A * ΔT`, from an area in cm².
    #[must_use]
    pub fn convective_area(self, area_cm2: f64) -> f64 {
        match self {
            Self::Legacy => area_cm2 / 100.0,
            Self::Corrected => area_cm2 / 10_000.0,
        }
    }
}

impl fmt::Display for ThermalModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Legacy => "legacy",
            Self::Corrected => "corrected",
        })
    }
}

impl FromStr for ThermalModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "corrected" => Ok(Self::Corrected),
            other => Err(format!(
                "unknown thermal model '{other}' (expected legacy or corrected)"
            )),
        }
    }
}

/// Rounded metrics reported for one design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignMetrics {
    pub volume_cm3: f64,
    pub surface_area_cm2: f64,
    pub weight_kg: f64,
    #[serde(rename = "heat_dissipation_W")]
    pub heat_dissipation_w: f64,
    pub complexity_score: u32,
}

/// Derives [`DesignMetrics`] from a solid's measurements.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsEvaluator {
    thermal_model: ThermalModel,
}

impl MetricsEvaluator {
    #[must_use]
    pub fn new(thermal_model: ThermalModel) -> Self {
        Self { thermal_model }
    }

    /// Measures `solid` and derives its metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if the kernel cannot measure the solid.
    pub fn evaluate<K: SolidGeometry>(
        &self,
        kernel: &K,
        solid: K::Solid,
        params: &DesignParameters,
    ) -> Result<DesignMetrics> {
        let volume_mm3 = kernel.volume(solid)?;
        let area_mm2 = kernel.surface_area(solid)?;
        Ok(self.compute(volume_mm3, area_mm2, params))
    }

    /// Metrics from raw measurements in mm³ and mm².
    ///
    /// Every figure is derived from unrounded inputs; rounding is applied
    /// last, per field.
    #[must_use]
    pub fn compute(
        &self,
        volume_mm3: f64,
        area_mm2: f64,
        params: &DesignParameters,
    ) -> DesignMetrics {
        let volume_cm3 = volume_mm3 / 1000.0;
        let surface_area_cm2 = area_mm2 / 100.0;
        let weight_kg = volume_cm3 * ALUMINIUM_DENSITY / 1000.0;
        let heat_dissipation_w = HEAT_TRANSFER_COEFFICIENT
            * self.thermal_model.convective_area(surface_area_cm2)
            * TEMPERATURE_DELTA;

        DesignMetrics {
            volume_cm3: round_to(volume_cm3, 2),
            surface_area_cm2: round_to(surface_area_cm2, 2),
            weight_kg: round_to(weight_kg, 3),
            heat_dissipation_w: round_to(heat_dissipation_w, 1),
            complexity_score: complexity_score(params.pattern, params.num_fins),
        }
    }
}

/// Manufacturing difficulty heuristic: two points per fin, plus a fixed
/// bonus when fins are tilted.
#[must_use]
pub fn complexity_score(pattern: FinPattern, num_fins: u32) -> u32 {
    let base = num_fins.saturating_mul(2);
    if pattern.is_tilted() {
        base.saturating_add(TILT_COMPLEXITY)
    } else {
        base
    }
}

/// Rounds half away from zero to `places` decimals.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn params(pattern: FinPattern, num_fins: u32) -> DesignParameters {
        DesignParameters {
            width: 100.0,
            length: 100.0,
            base_height: 10.0,
            fin_height: 30.0,
            fin_thickness: 2.0,
            num_fins,
            pattern,
            fin_angle: 0.0,
            name: "Design_1".into(),
        }
    }

    #[test]
    fn complexity_scores() {
        assert_eq!(complexity_score(FinPattern::Straight, 7), 14);
        assert_eq!(complexity_score(FinPattern::Angled, 7), 24);
        assert_eq!(complexity_score(FinPattern::Zigzag, 7), 24);
    }

    #[test]
    fn unit_conversions() {
        let p = params(FinPattern::Straight, 5);
        let m = MetricsEvaluator::new(ThermalModel::Legacy).compute(130_000.0, 52_000.0, &p);
        assert_relative_eq!(m.volume_cm3, 130.0);
        assert_relative_eq!(m.surface_area_cm2, 520.0);
        assert_relative_eq!(m.weight_kg, 0.351);
        // 10 * (520 / 100) * 50
        assert_relative_eq!(m.heat_dissipation_w, 2600.0);
        assert_eq!(m.complexity_score, 10);
    }

    #[test]
    fn corrected_model_uses_square_metres() {
        let p = params(FinPattern::Angled, 5);
        let m = MetricsEvaluator::default().compute(130_000.0, 52_000.0, &p);
        // 520 cm² = 0.052 m²; 10 * 0.052 * 50 = 26 W
        assert_relative_eq!(m.heat_dissipation_w, 26.0);
        assert_eq!(m.complexity_score, 20);
    }

    #[test]
    fn reported_values_are_rounded() {
        let p = params(FinPattern::Straight, 5);
        let m = MetricsEvaluator::new(ThermalModel::Corrected).compute(
            123_456.789,
            45_678.912,
            &p,
        );
        assert_relative_eq!(m.volume_cm3, 123.46);
        assert_relative_eq!(m.surface_area_cm2, 456.79);
        assert_relative_eq!(m.weight_kg, 0.333);
        assert_relative_eq!(m.heat_dissipation_w, 22.8);
    }

    #[test]
    fn thermal_model_parses() {
        assert_eq!("Legacy".parse::<ThermalModel>().unwrap(), ThermalModel::Legacy);
        assert_eq!("corrected".parse::<ThermalModel>().unwrap(), ThermalModel::Corrected);
        assert!("metric".parse::<ThermalModel>().is_err());
    }

    #[test]
    fn round_half_away_from_zero() {
        assert_relative_eq!(round_to(2.25, 1), 2.3);
        assert_relative_eq!(round_to(-1.005, 0), -1.0);
        assert_relative_eq!(round_to(0.0004, 3), 0.0);
    }
}
