//! Semantic mask synthesis.
//!
//! Masks label every pixel of a camera view with the dominant ground
//! material under it. Labels are derived independently of the color
//! renderer: each pixel casts its own ray into the scene and maps the hit
//! back onto the material grid.

pub mod palette;
pub mod synthesizer;

pub use palette::{Palette, Rgb};
pub use synthesizer::{MaskImage, MaskLabel, MaskSynthesizer, NonTerrainPolicy};
