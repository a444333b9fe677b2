use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::metrics::ThermalModel;

/// Allowed nominal footprint, mm.
pub const BASE_SIZE_RANGE: RangeInclusive<u32> = 50..=200;
/// Allowed number of designs per study.
pub const NUM_DESIGNS_RANGE: RangeInclusive<u32> = 1..=15;
/// Grid pitch between placed designs, as a multiple of the base size.
const GRID_PITCH_FACTOR: f64 = 1.5;
/// Designs per grid row in the study document.
pub const GRID_COLUMNS: u32 = 3;

/// Everything a study run needs, independent of how it was collected.
///
/// Missing keys in a TOML file fall back to [`StudyConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudyConfig {
    /// Nominal footprint in mm.
    pub base_size: u32,
    /// Number of designs to attempt.
    pub num_designs: u32,
    /// Existing directory that receives the CSV and document.
    pub output_dir: PathBuf,
    /// Seed for reproducible runs; entropy when absent.
    pub seed: Option<u64>,
    pub thermal_model: ThermalModel,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            base_size: 100,
            num_designs: 5,
            output_dir: PathBuf::from("."),
            seed: None,
            thermal_model: ThermalModel::default(),
        }
    }
}

impl StudyConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] if `base_size` or `num_designs`
    /// is outside its allowed range.
    pub fn new(base_size: u32, num_designs: u32, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let config = Self {
            base_size,
            num_designs,
            output_dir: output_dir.into(),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_thermal_model(mut self, thermal_model: ThermalModel) -> Self {
        self.thermal_model = thermal_model;
        self
    }

    /// Loads a configuration from a TOML file.
    ///
    /// The result is not validated, so CLI overrides can still be applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// Checks numeric ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] for the first offending field.
    pub fn validate(&self) -> Result<()> {
        check_range("base_size", self.base_size, &BASE_SIZE_RANGE)?;
        check_range("num_designs", self.num_designs, &NUM_DESIGNS_RANGE)?;
        Ok(())
    }

    /// Distance between neighbouring grid cells in the study document, mm.
    #[must_use]
    pub fn grid_pitch(&self) -> f64 {
        f64::from(self.base_size) * GRID_PITCH_FACTOR
    }
}

fn check_range(
    parameter: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> std::result::Result<(), ConfigError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            parameter,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}
