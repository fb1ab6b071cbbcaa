//! Procedural terrain synthesis: heightfields and material layers

pub mod params;
pub use params::SampleParameters;

pub mod heightfield;
pub use heightfield::HeightField;

pub mod synthesizer;
pub use synthesizer::HeightfieldSynthesizer;

pub mod material;
pub use material::{MaterialClass, MaterialGrid, MaterialThresholds, MATERIAL_COUNT};
