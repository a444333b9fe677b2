use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Minimum clear gap between neighbouring fins, in mm.
pub const MIN_FIN_CLEARANCE: f64 = 5.0;

/// Fin layout strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinPattern {
    /// Upright fins.
    Straight,
    /// Every fin tilted by the same angle.
    Angled,
    /// Tilt alternates sign from fin to fin.
    Zigzag,
}

impl FinPattern {
    pub const ALL: [Self; 3] = [Self::Straight, Self::Angled, Self::Zigzag];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::Angled => "angled",
            Self::Zigzag => "zigzag",
        }
    }

    /// Whether fins of this pattern are tilted.
    #[must_use]
    pub fn is_tilted(self) -> bool {
        !matches!(self, Self::Straight)
    }

    /// Tilt of fin `index` in degrees for a pattern with the given base
    /// angle. Straight fins are never tilted; zigzag fins alternate sign,
    /// positive on even indices.
    #[must_use]
    pub fn fin_tilt(self, fin_angle: f64, index: u32) -> f64 {
        match self {
            Self::Straight => 0.0,
            Self::Angled => fin_angle,
            Self::Zigzag if index % 2 == 0 => fin_angle,
            Self::Zigzag => -fin_angle,
        }
    }
}

impl fmt::Display for FinPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("unknown fin pattern '{s}' (expected straight, angled or zigzag)")
            })
    }
}

/// One heatsink design. All lengths in mm, `fin_angle` in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignParameters {
    pub width: f64,
    pub length: f64,
    pub base_height: f64,
    pub fin_height: f64,
    pub fin_thickness: f64,
    pub num_fins: u32,
    pub pattern: FinPattern,
    pub fin_angle: f64,
    pub name: String,
}

impl DesignParameters {
    /// Most fins that fit across `width` while keeping
    /// [`MIN_FIN_CLEARANCE`] between them, or `None` if not even one fits.
    #[must_use]
    pub fn max_fins_for(width: f64, fin_thickness: f64) -> Option<u32> {
        let fit = ((width - MIN_FIN_CLEARANCE) / (fin_thickness + MIN_FIN_CLEARANCE)).floor();
        if fit.is_finite() && fit >= 1.0 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Some(fit.min(f64::from(u32::MAX)) as u32)
        } else {
            None
        }
    }

    /// Whether the fin count respects the clearance rule.
    #[must_use]
    pub fn respects_clearance(&self) -> bool {
        Self::max_fins_for(self.width, self.fin_thickness).is_some_and(|max| self.num_fins <= max)
    }
}
