//! Per-sample random streams.
//!
//! Every sample's stream is derived from the batch seed and the sample
//! index alone, so any sample can be regenerated in isolation and samples
//! can run in any order or in parallel.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Random stream type used for all per-sample draws
pub type SampleRng = ChaCha8Rng;

/// Seed of sample `index` within a batch (SplitMix64 finalizer)
pub fn sample_seed(batch_seed: u64, index: u32) -> u64 {
    let mut z = batch_seed
        .wrapping_add((index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Random stream of sample `index`
pub fn sample_rng(batch_seed: u64, index: u32) -> SampleRng {
    SampleRng::seed_from_u64(sample_seed(batch_seed, index))
}
