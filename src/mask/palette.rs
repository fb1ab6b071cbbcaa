//! Fixed label colors for mask images

use serde::{Deserialize, Serialize};

use crate::terrain::MaterialClass;

/// 8-bit RGB triple
pub type Rgb = [u8; 3];

/// Mapping from labels to output colors.
///
/// The two soil classes share one color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub soil: Rgb,
    pub bedrock: Rgb,
    pub sand: Rgb,
    pub big_rock: Rgb,
    /// Sky, misses, and hits beyond the distance threshold
    pub background: Rgb,
    /// Geometry that carries no material information
    pub unlabeled: Rgb,
}

impl Palette {
    pub const REFERENCE: Palette = Palette {
        soil: [255, 0, 0],
        bedrock: [0, 255, 0],
        sand: [255, 235, 4],
        big_rock: [128, 128, 128],
        background: [0, 0, 255],
        unlabeled: [255, 0, 255],
    };

    pub fn material(&self, class: MaterialClass) -> Rgb {
        match class {
            MaterialClass::SoilA | MaterialClass::SoilB => self.soil,
            MaterialClass::Bedrock => self.bedrock,
            MaterialClass::Sand => self.sand,
            MaterialClass::BigRock => self.big_rock,
        }
    }

    /// Colors must be pairwise distinct apart from the shared soil entry,
    /// otherwise labels cannot be recovered from the image.
    pub fn is_unambiguous(&self) -> bool {
        let colors = [
            self.soil,
            self.bedrock,
            self.sand,
            self.big_rock,
            self.background,
            self.unlabeled,
        ];
        colors
            .iter()
            .enumerate()
            .all(|(i, a)| colors[i + 1..].iter().all(|b| a != b))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::REFERENCE
    }
}
