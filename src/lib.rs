//! Regolith - synthetic planetary terrain dataset generator
//!
//! Each sample is a procedurally synthesized heightfield with a material
//! layer grid, rendered to a color image and paired with a per-pixel
//! material segmentation mask.

pub mod core;
pub mod math;
pub mod terrain;
pub mod mask;
pub mod render;
pub mod scene;
pub mod storage;
pub mod generation;
