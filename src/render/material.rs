//! Terrain material layers and their textures

use std::path::Path;

use image::RgbImage;

use crate::core::{Error, Result, Vec2, Vec3};
use crate::terrain::{MaterialClass, MATERIAL_COUNT};

/// Visual definition of one terrain material layer
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialLayer {
    pub class: MaterialClass,
    pub name: &'static str,
    /// Diffuse texture file name, relative to the asset directory
    pub diffuse: &'static str,
    /// World-space size of one texture tile
    pub tile_size: f32,
    /// Linear albedo used when no texture is loaded
    pub albedo: Vec3,
}

/// The five reference layers, in class order.
pub fn reference_layers() -> [MaterialLayer; MATERIAL_COUNT] {
    [
        MaterialLayer {
            class: MaterialClass::SoilA,
            name: "Texture_2",
            diffuse: "Texture_2_Diffuse.png",
            tile_size: 10.0,
            albedo: Vec3::new(0.62, 0.36, 0.22),
        },
        MaterialLayer {
            class: MaterialClass::SoilB,
            name: "Texture_4",
            diffuse: "Texture_4_Diffuse.png",
            tile_size: 8.0,
            albedo: Vec3::new(0.55, 0.31, 0.19),
        },
        MaterialLayer {
            class: MaterialClass::Bedrock,
            name: "Texture_5",
            diffuse: "Texture_5_Diffuse.png",
            tile_size: 6.0,
            albedo: Vec3::new(0.42, 0.30, 0.24),
        },
        MaterialLayer {
            class: MaterialClass::Sand,
            name: "Texture_7",
            diffuse: "Texture_7_Diffuse.png",
            tile_size: 12.0,
            albedo: Vec3::new(0.78, 0.55, 0.35),
        },
        MaterialLayer {
            class: MaterialClass::BigRock,
            name: "Texture_9",
            diffuse: "Texture_9_Diffuse.png",
            tile_size: 5.0,
            albedo: Vec3::new(0.35, 0.30, 0.28),
        },
    ]
}

/// Material layers plus any loaded diffuse textures.
#[derive(Clone, Debug)]
pub struct MaterialLibrary {
    layers: [MaterialLayer; MATERIAL_COUNT],
    textures: [Option<RgbImage>; MATERIAL_COUNT],
}

impl MaterialLibrary {
    /// Library that shades with flat albedo colors only
    pub fn flat() -> Self {
        Self {
            layers: reference_layers(),
            textures: Default::default(),
        }
    }

    /// Load every layer's diffuse texture from `assets_dir`.
    ///
    /// Fails with [`Error::ResourceUnavailable`] naming the first missing file.
    pub fn load(assets_dir: &Path) -> Result<Self> {
        let mut library = Self::flat();
        for (slot, layer) in library.textures.iter_mut().zip(library.layers.iter()) {
            let path = assets_dir.join(layer.diffuse);
            if !path.is_file() {
                return Err(Error::ResourceUnavailable { resource: path });
            }
            let texture = image::open(&path)
                .map_err(|source| Error::Asset { path: path.clone(), source })?
                .to_rgb8();
            log::debug!(
                "Loaded layer {} from {} ({}x{})",
                layer.name,
                path.display(),
                texture.width(),
                texture.height()
            );
            *slot = Some(texture);
        }
        Ok(library)
    }

    pub fn layer(&self, class: MaterialClass) -> &MaterialLayer {
        &self.layers[class.index()]
    }

    pub fn is_textured(&self) -> bool {
        self.textures.iter().all(Option::is_some)
    }

    /// Linear albedo of `class` at world position `xz`, tiled by the
    /// layer's tile size.
    pub fn albedo(&self, class: MaterialClass, xz: Vec2) -> Vec3 {
        let layer = self.layer(class);
        let Some(texture) = &self.textures[class.index()] else {
            return layer.albedo;
        };
        if texture.width() == 0 || texture.height() == 0 {
            return layer.albedo;
        }

        let uv = xz / layer.tile_size;
        let u = uv.x - uv.x.floor();
        let v = uv.y - uv.y.floor();
        let px = ((u * texture.width() as f32) as u32).min(texture.width() - 1);
        let py = ((v * texture.height() as f32) as u32).min(texture.height() - 1);
        let [r, g, b] = texture.get_pixel(px, py).0;
        Vec3::new(r as f32, g as f32, b as f32) / 255.0
    }
}
