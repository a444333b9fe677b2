use std::ops::RangeInclusive;

use rand::Rng;

use crate::error::{Result, SamplingError};

use super::params::{DesignParameters, FinPattern};

/// Footprint range as a fraction of the base size.
const FOOTPRINT_SCALE: RangeInclusive<f64> = 0.8..=1.2;
const BASE_HEIGHT_MM: RangeInclusive<f64> = 5.0..=15.0;
const FIN_HEIGHT_MM: RangeInclusive<f64> = 20.0..=50.0;
const FIN_THICKNESS_MM: RangeInclusive<f64> = 1.5..=3.0;
const FIN_COUNT: RangeInclusive<u32> = 5..=15;
const FIN_ANGLE_DEG: RangeInclusive<f64> = 10.0..=30.0;
/// Chance that a design gets a non-zero fin angle.
const TILT_PROBABILITY: f64 = 0.5;

/// Draws random heatsink designs around a nominal footprint.
///
/// The sampler holds no state of its own; all randomness comes from the
/// generator passed to [`ParameterSampler::sample`], so a seeded generator
/// gives a reproducible sequence of designs.
#[derive(Debug, Clone, Copy)]
pub struct ParameterSampler {
    base_size: f64,
}

impl ParameterSampler {
    /// Creates a sampler for a nominal footprint of `base_size` mm.
    #[must_use]
    pub fn new(base_size: f64) -> Self {
        Self { base_size }
    }

    /// Draws one design named `name`.
    ///
    /// The fin count is clamped down so that fins keep the minimum
    /// clearance across the sampled width.
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::InvalidBaseSize`] for a non-positive base size
    /// and [`SamplingError::NoRoomForFins`] when the sampled width cannot hold
    /// a single fin.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        name: impl Into<String>,
        rng: &mut R,
    ) -> Result<DesignParameters> {
        if !self.base_size.is_finite() || self.base_size <= 0.0 {
            return Err(SamplingError::InvalidBaseSize(self.base_size).into());
        }

        let footprint =
            (self.base_size * FOOTPRINT_SCALE.start())..=(self.base_size * FOOTPRINT_SCALE.end());
        let width = rng.gen_range(footprint.clone());
        let length = rng.gen_range(footprint);
        let base_height = rng.gen_range(BASE_HEIGHT_MM);
        let fin_height = rng.gen_range(FIN_HEIGHT_MM);
        let fin_thickness = rng.gen_range(FIN_THICKNESS_MM);
        let drawn_fins = rng.gen_range(FIN_COUNT);
        let pattern = FinPattern::ALL[rng.gen_range(0..FinPattern::ALL.len())];
        let fin_angle = if rng.gen_bool(TILT_PROBABILITY) {
            rng.gen_range(FIN_ANGLE_DEG)
        } else {
            0.0
        };

        let max_fins = DesignParameters::max_fins_for(width, fin_thickness).ok_or(
            SamplingError::NoRoomForFins {
                width,
                fin_thickness,
            },
        )?;

        Ok(DesignParameters {
            width,
            length,
            base_height,
            fin_height,
            fin_thickness,
            num_fins: drawn_fins.min(max_fins),
            pattern,
            fin_angle,
            name: name.into(),
        })
    }
}
