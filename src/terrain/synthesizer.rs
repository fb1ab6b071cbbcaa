//! Noise-based heightfield synthesis
//!
//! Each cell combines a coherent noise sample raised to a sharpening power
//! (peaks and cliffs) with a sinusoidal valley carved across the x axis,
//! perturbed by the same noise at half frequency.

use std::f32::consts::PI;

use noise::{NoiseFn, Perlin};
use rand::Rng;

use super::heightfield::HeightField;
use super::params::SampleParameters;

/// Number of valley periods that traverse the grid width
const VALLEY_PERIODS: f32 = 3.0;
/// Weight of the half-frequency perturbation added to the valley term
const VALLEY_DETAIL_WEIGHT: f32 = 0.05;

/// Coherent 2D noise remapped to [0, 1]
pub struct CoherentNoise {
    perlin: Perlin,
}

impl CoherentNoise {
    pub fn new(seed: u32) -> Self {
        Self { perlin: Perlin::new(seed) }
    }

    /// Sample at (x, y), mapped from [-1, 1] to [0, 1] and clamped
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let value = self.perlin.get([x as f64, y as f64]);
        (((value + 1.0) * 0.5) as f32).clamp(0.0, 1.0)
    }
}

/// Produces square heightfields from [`SampleParameters`].
#[derive(Clone, Debug)]
pub struct HeightfieldSynthesizer {
    resolution: usize,
}

impl HeightfieldSynthesizer {
    pub fn new(resolution: usize) -> Self {
        Self { resolution }
    }

    /// Synthesize a heightfield.
    ///
    /// Cells are visited row by row; one uniform phase is drawn from `rng`
    /// per cell, so the result is reproducible for a given stream state.
    pub fn synthesize<R: Rng>(&self, params: &SampleParameters, rng: &mut R) -> HeightField {
        let res = self.resolution;
        let noise = CoherentNoise::new(params.noise_seed);
        let mut data = Vec::with_capacity(res * res);

        for y in 0..res {
            for x in 0..res {
                let phase: f32 = rng.random();
                data.push(height_at(&noise, params, res, x, y, phase));
            }
        }

        HeightField::from_vec(res, data)
            .unwrap_or_else(|| HeightField::flat(res.max(1), 0.0))
    }
}

/// Height of a single cell given its valley phase.
fn height_at(
    noise: &CoherentNoise,
    params: &SampleParameters,
    resolution: usize,
    x: usize,
    y: usize,
    phase: f32,
) -> f32 {
    let nx = x as f32 * params.noise_scale;
    let ny = y as f32 * params.noise_scale;

    let base = noise.sample(nx, ny);
    let peak = base.powf(params.cliff_sharpness) * params.peak_intensity;

    let mut valley = (x as f32 / resolution as f32 * PI * VALLEY_PERIODS + phase).sin()
        * params.valley_noise_amplitude;
    valley += noise.sample(nx * 0.5, ny * 0.5) * VALLEY_DETAIL_WEIGHT;

    (peak - valley).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn extremes() -> Vec<SampleParameters> {
        let mut out = Vec::new();
        for &noise_scale in &[0.01, 0.03] {
            for &peak_intensity in &[0.3, 0.6] {
                for &cliff_sharpness in &[2.0, 5.0] {
                    for &valley_noise_amplitude in &[0.1, 0.3] {
                        out.push(SampleParameters {
                            noise_scale,
                            peak_intensity,
                            cliff_sharpness,
                            valley_noise_amplitude,
                            noise_seed: 42,
                        });
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_coherent_noise_range() {
        let noise = CoherentNoise::new(3);
        for i in 0..1000 {
            let v = noise.sample(i as f32 * 0.137, i as f32 * 0.071);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_heights_bounded_for_parameter_extremes() {
        let synthesizer = HeightfieldSynthesizer::new(64);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for params in extremes() {
            let field = synthesizer.synthesize(&params, &mut rng);
            assert_eq!(field.as_slice().len(), 64 * 64);
            let (lo, hi) = field.bounds();
            assert!(lo >= 0.0 && hi <= 1.0, "{:?} -> ({}, {})", params, lo, hi);
        }
    }

    #[test]
    fn test_synthesis_reproducible_with_same_stream() {
        let synthesizer = HeightfieldSynthesizer::new(32);
        let params = SampleParameters::default();
        let a = synthesizer.synthesize(&params, &mut ChaCha8Rng::seed_from_u64(5));
        let b = synthesizer.synthesize(&params, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_phase_draws_vary_output() {
        let synthesizer = HeightfieldSynthesizer::new(32);
        let params = SampleParameters::default();
        let a = synthesizer.synthesize(&params, &mut ChaCha8Rng::seed_from_u64(5));
        let b = synthesizer.synthesize(&params, &mut ChaCha8Rng::seed_from_u64(6));
        assert_ne!(a, b);
    }

    #[test]
    fn test_consumes_one_draw_per_cell() {
        let synthesizer = HeightfieldSynthesizer::new(8);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        synthesizer.synthesize(&SampleParameters::default(), &mut rng);

        let mut reference = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..64 {
            let _: f32 = reference.random();
        }
        assert_eq!(rng.random::<u64>(), reference.random::<u64>());
    }

    #[test]
    fn test_height_at_matches_formula() {
        let noise = CoherentNoise::new(0);
        let params = SampleParameters {
            noise_scale: 0.02,
            peak_intensity: 0.5,
            cliff_sharpness: 2.0,
            valley_noise_amplitude: 0.1,
            noise_seed: 0,
        };
        // At the origin both noise samples sit on a lattice point (value 0.5)
        let expected = (0.25_f32 * 0.5 - (0.0_f32.sin() * 0.1 + 0.5 * 0.05)).clamp(0.0, 1.0);
        let actual = height_at(&noise, &params, 16, 0, 0, 0.0);
        assert!((actual - expected).abs() < 1e-5, "{} vs {}", actual, expected);
    }
}
