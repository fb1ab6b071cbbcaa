//! Per-sample randomized terrain parameters

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Scalars that shape one sample's heightfield.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleParameters {
    /// Coherent noise sampling frequency per grid cell
    pub noise_scale: f32,
    /// Multiplier applied to shaped peaks
    pub peak_intensity: f32,
    /// Exponent applied to base noise (> 1 sharpens ridgelines)
    pub cliff_sharpness: f32,
    /// Amplitude of the sinusoidal valley carved across the grid
    pub valley_noise_amplitude: f32,
    /// Seed for the coherent noise function
    pub noise_seed: u32,
}

impl SampleParameters {
    pub const NOISE_SCALE: RangeInclusive<f32> = 0.01..=0.03;
    pub const PEAK_INTENSITY: RangeInclusive<f32> = 0.3..=0.6;
    pub const CLIFF_SHARPNESS: RangeInclusive<f32> = 2.0..=5.0;
    pub const VALLEY_NOISE_AMPLITUDE: RangeInclusive<f32> = 0.1..=0.3;

    /// Draw a fresh parameter set from the sample's random stream.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            noise_scale: rng.random_range(Self::NOISE_SCALE),
            peak_intensity: rng.random_range(Self::PEAK_INTENSITY),
            cliff_sharpness: rng.random_range(Self::CLIFF_SHARPNESS),
            valley_noise_amplitude: rng.random_range(Self::VALLEY_NOISE_AMPLITUDE),
            noise_seed: rng.random(),
        }
    }

    /// True when every scalar lies inside its accepted range.
    pub fn in_range(&self) -> bool {
        Self::NOISE_SCALE.contains(&self.noise_scale)
            && Self::PEAK_INTENSITY.contains(&self.peak_intensity)
            && Self::CLIFF_SHARPNESS.contains(&self.cliff_sharpness)
            && Self::VALLEY_NOISE_AMPLITUDE.contains(&self.valley_noise_amplitude)
    }
}

impl Default for SampleParameters {
    /// Midpoint of every range
    fn default() -> Self {
        Self {
            noise_scale: 0.02,
            peak_intensity: 0.45,
            cliff_sharpness: 3.5,
            valley_noise_amplitude: 0.2,
            noise_seed: 0,
        }
    }
}
