//! Color rendering of constructed scenes

pub mod material;
pub mod shading;

pub use material::{MaterialLayer, MaterialLibrary};

use image::RgbImage;

use crate::core::{Camera, Result};

/// Color output buffer
pub type RenderedImage = RgbImage;

/// Renders a camera's view of a scene into an RGB image.
pub trait ColorRenderer {
    /// Render a `resolution × resolution` image.
    fn render(&self, camera: &Camera, resolution: u32) -> Result<RenderedImage>;
}
