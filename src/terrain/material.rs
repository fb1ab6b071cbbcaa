//! Per-cell material assignment
//!
//! A [`MaterialGrid`] holds a weight vector over the material classes for
//! every cell of a square alpha map. Assignment is a categorical draw per
//! cell against cumulative thresholds; cells are independent of each other
//! and of the heightfield.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of material classes
pub const MATERIAL_COUNT: usize = 5;

/// Ground material classes, in layer order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialClass {
    SoilA,
    SoilB,
    Bedrock,
    Sand,
    BigRock,
}

impl MaterialClass {
    pub const ALL: [MaterialClass; MATERIAL_COUNT] = [
        MaterialClass::SoilA,
        MaterialClass::SoilB,
        MaterialClass::Bedrock,
        MaterialClass::Sand,
        MaterialClass::BigRock,
    ];

    /// Layer index of this class
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Cumulative probability bands for categorical material sampling.
///
/// A draw `r` selects the first band with `r < upper`; if none match,
/// `fallback` is selected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialThresholds {
    pub bands: Vec<(f32, MaterialClass)>,
    pub fallback: MaterialClass,
}

impl MaterialThresholds {
    /// 40% soil, 25% bedrock, 20% sand, 15% big rock.
    ///
    /// SoilB has no band, so it is never sampled.
    pub fn reference() -> Self {
        Self {
            bands: vec![
                (0.40, MaterialClass::SoilA),
                (0.65, MaterialClass::Bedrock),
                (0.85, MaterialClass::Sand),
            ],
            fallback: MaterialClass::BigRock,
        }
    }

    /// Class selected by a uniform draw in [0, 1)
    pub fn classify(&self, r: f32) -> MaterialClass {
        self.bands
            .iter()
            .find(|(upper, _)| r < *upper)
            .map(|(_, class)| *class)
            .unwrap_or(self.fallback)
    }

    /// Bands must be ascending and lie within [0, 1].
    pub fn is_valid(&self) -> bool {
        self.bands.iter().all(|(upper, _)| (0.0..=1.0).contains(upper))
            && self.bands.windows(2).all(|w| w[0].0 <= w[1].0)
    }
}

impl Default for MaterialThresholds {
    fn default() -> Self {
        Self::reference()
    }
}

/// Square grid of per-cell material weight vectors, row-major (row = z).
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialGrid {
    resolution: usize,
    weights: Vec<[f32; MATERIAL_COUNT]>,
}

impl MaterialGrid {
    /// Assign one material per cell by drawing a uniform value per cell
    /// in row-major order.
    pub fn assign<R: Rng>(resolution: usize, thresholds: &MaterialThresholds, rng: &mut R) -> Self {
        let weights = (0..resolution * resolution)
            .map(|_| {
                let r: f32 = rng.random();
                one_hot(thresholds.classify(r))
            })
            .collect();

        Self { resolution, weights }
    }

    /// Grid where every cell holds the same class
    pub fn uniform(resolution: usize, class: MaterialClass) -> Self {
        Self {
            resolution,
            weights: vec![one_hot(class); resolution * resolution],
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Weight vector at column `x`, row `z`
    pub fn weights(&self, x: usize, z: usize) -> &[f32; MATERIAL_COUNT] {
        &self.weights[z * self.resolution + x]
    }

    /// Overwrite the weight vector of one cell.
    pub fn set_weights(&mut self, x: usize, z: usize, weights: [f32; MATERIAL_COUNT]) {
        self.weights[z * self.resolution + x] = weights;
    }

    /// Dominant class of a cell.
    ///
    /// Scans with a strict `>` against a running maximum that starts at 0,
    /// so ties resolve to the lowest index and an all-zero cell yields the
    /// first class.
    pub fn dominant(&self, x: usize, z: usize) -> MaterialClass {
        let mut dominant = 0;
        let mut max = 0.0;
        for (i, &w) in self.weights(x, z).iter().enumerate() {
            if w > max {
                max = w;
                dominant = i;
            }
        }
        MaterialClass::ALL[dominant]
    }

    /// Cell indices for normalized terrain coordinates, clamped to the grid.
    pub fn cell_for_normalized(&self, nx: f32, nz: f32) -> (usize, usize) {
        let last = self.resolution as i64 - 1;
        let to_index = |n: f32| ((n * self.resolution as f32).floor() as i64).clamp(0, last) as usize;
        (to_index(nx), to_index(nz))
    }

    /// Fraction of cells whose dominant class is `class`
    pub fn coverage(&self, class: MaterialClass) -> f32 {
        if self.weights.is_empty() {
            return 0.0;
        }
        let n = self.resolution;
        let count = (0..n)
            .flat_map(|z| (0..n).map(move |x| (x, z)))
            .filter(|&(x, z)| self.dominant(x, z) == class)
            .count();
        count as f32 / self.weights.len() as f32
    }
}

fn one_hot(class: MaterialClass) -> [f32; MATERIAL_COUNT] {
    let mut weights = [0.0; MATERIAL_COUNT];
    weights[class.index()] = 1.0;
    weights
}
