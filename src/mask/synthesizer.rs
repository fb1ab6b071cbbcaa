//! Per-pixel mask labeling by ray intersection

use image::{Rgb as Pixel, RgbImage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::palette::{Palette, Rgb};
use crate::core::{Camera, Vec2};
use crate::scene::{RayCaster, TerrainBinding};
use crate::terrain::MaterialClass;

/// Mask output buffer
pub type MaskImage = RgbImage;

/// What to write when a ray hits geometry other than the bound terrain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NonTerrainPolicy {
    /// Treat the pixel as sky
    #[default]
    Background,
    /// Write the palette's reserved unlabeled color
    Unlabeled,
}

/// Label assigned to a single mask pixel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskLabel {
    Background,
    Material(MaterialClass),
    Unlabeled,
}

/// Produces semantic masks aligned with a camera's view.
#[derive(Clone, Debug)]
pub struct MaskSynthesizer {
    /// Output is `resolution × resolution`
    pub resolution: u32,
    /// Hits farther than this from the camera are labeled background
    pub distance_threshold: f32,
    pub palette: Palette,
    pub non_terrain: NonTerrainPolicy,
}

impl MaskSynthesizer {
    pub fn new(resolution: u32, distance_threshold: f32) -> Self {
        Self {
            resolution,
            distance_threshold,
            palette: Palette::REFERENCE,
            non_terrain: NonTerrainPolicy::default(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_non_terrain_policy(mut self, policy: NonTerrainPolicy) -> Self {
        self.non_terrain = policy;
        self
    }

    /// Label of mask pixel `(px, py)`, with `py` counted from the bottom.
    pub fn label_pixel<C>(
        &self,
        caster: &C,
        camera: &Camera,
        terrain: &TerrainBinding<'_>,
        px: u32,
        py: u32,
    ) -> MaskLabel
    where
        C: RayCaster + ?Sized,
    {
        let res = self.resolution as f32;
        let screen = Vec2::new(
            px as f32 / res * camera.pixel_size.x,
            py as f32 / res * camera.pixel_size.y,
        );
        let ray = camera.screen_point_to_ray(screen);

        let Some(hit) = caster.raycast(&ray) else {
            return MaskLabel::Background;
        };
        if hit.distance > self.distance_threshold {
            return MaskLabel::Background;
        }
        if hit.object != terrain.handle {
            return match self.non_terrain {
                NonTerrainPolicy::Background => MaskLabel::Background,
                NonTerrainPolicy::Unlabeled => MaskLabel::Unlabeled,
            };
        }

        let (nx, nz) = terrain.normalized(hit.point);
        let (x, z) = terrain.materials.cell_for_normalized(nx, nz);
        MaskLabel::Material(terrain.materials.dominant(x, z))
    }

    pub fn color(&self, label: MaskLabel) -> Rgb {
        match label {
            MaskLabel::Background => self.palette.background,
            MaskLabel::Material(class) => self.palette.material(class),
            MaskLabel::Unlabeled => self.palette.unlabeled,
        }
    }

    /// Synthesize the full mask image.
    ///
    /// Screen-space row `py` is stored in image row `resolution - 1 - py`,
    /// so the image is upright like the color render.
    pub fn synthesize<C>(&self, caster: &C, camera: &Camera, terrain: &TerrainBinding<'_>) -> MaskImage
    where
        C: RayCaster + Sync + ?Sized,
    {
        let res = self.resolution;
        let mut image = RgbImage::new(res, res);
        if res == 0 {
            return image;
        }

        let row_len = res as usize * 3;
        image
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(row, pixels)| {
                let py = res - 1 - row as u32;
                for (px, pixel) in pixels.chunks_exact_mut(3).enumerate() {
                    let label = self.label_pixel(caster, camera, terrain, px as u32, py);
                    pixel.copy_from_slice(&self.color(label));
                }
            });

        image
    }

    /// Color at screen-space pixel `(px, py)` of a synthesized mask
    pub fn pixel_at(image: &MaskImage, px: u32, py: u32) -> Rgb {
        let Pixel(rgb) = *image.get_pixel(px, image.height() - 1 - py);
        rgb
    }
}
