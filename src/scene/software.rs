//! CPU reference implementation of the scene collaborator, ray caster,
//! and color renderer.

use std::path::PathBuf;

use image::RgbImage;
use rayon::prelude::*;

use crate::core::{Camera, Error, Result, Vec2, Vec3};
use crate::math::{Aabb, Ray, RaySpan};
use crate::render::shading::{shade, sky_color, to_srgb8};
use crate::render::{ColorRenderer, MaterialLibrary, RenderedImage};
use crate::terrain::{HeightField, MaterialGrid};

use super::collaborator::{DirectionalLight, ObjectHandle, RayCaster, RayHit, SceneCollaborator};
use super::graph::SceneGraph;
use super::node::NodeContent;
use super::terrain::TerrainSurface;

/// Albedo of props, which carry no material layers
const PROP_ALBEDO: Vec3 = Vec3::new(0.3, 0.3, 0.3);

/// In-memory scene that ray casts and renders on the CPU.
pub struct SoftwareScene {
    graph: SceneGraph,
    /// Texture directory; `None` shades with flat layer colors
    assets_dir: Option<PathBuf>,
    /// Flat until textures are loaded from `assets_dir`
    library: MaterialLibrary,
}

impl SoftwareScene {
    pub fn new() -> Self {
        Self {
            graph: SceneGraph::new(),
            assets_dir: None,
            library: MaterialLibrary::flat(),
        }
    }

    /// Scene that loads material textures from `assets_dir` when terrain
    /// is built.
    pub fn with_assets(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: Some(assets_dir.into()),
            ..Self::new()
        }
    }

    /// Terrain surface behind a handle, if the handle names a terrain
    pub fn terrain(&self, handle: ObjectHandle) -> Option<&TerrainSurface> {
        match &self.graph.get(handle)?.content {
            NodeContent::Terrain(surface) => Some(surface),
            _ => None,
        }
    }

    /// Lowest-handle light in the scene
    fn sun(&self) -> Option<&DirectionalLight> {
        self.graph.iter().find_map(|node| match &node.content {
            NodeContent::Light(light) => Some(light),
            _ => None,
        })
    }

    /// Material layers used for shading
    pub fn library(&self) -> &MaterialLibrary {
        &self.library
    }

    fn shade_hit(&self, hit: &RayHit, library: &MaterialLibrary) -> Vec3 {
        let albedo = match self.terrain(hit.object) {
            Some(surface) => {
                let class = surface.material_at(hit.point);
                library.albedo(class, TerrainSurface::xz(hit.point))
            }
            None => PROP_ALBEDO,
        };
        shade(albedo, hit.normal, self.sun())
    }
}

impl Default for SoftwareScene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneCollaborator for SoftwareScene {
    fn build_terrain(
        &mut self,
        heights: &HeightField,
        materials: &MaterialGrid,
        origin: Vec3,
        extent: Vec3,
    ) -> Result<ObjectHandle> {
        if heights.resolution() < 2 || materials.resolution() == 0 {
            return Err(Error::Scene(format!(
                "terrain needs at least 2x2 heights and 1x1 materials, got {} and {}",
                heights.resolution(),
                materials.resolution()
            )));
        }
        if !extent.cmpgt(Vec3::ZERO).all() {
            return Err(Error::Scene(format!("terrain extent must be positive, got {}", extent)));
        }

        if let Some(dir) = &self.assets_dir {
            if !self.library.is_textured() {
                self.library = MaterialLibrary::load(dir)?;
            }
        }

        let surface = TerrainSurface::new(heights.clone(), materials.clone(), origin, extent);
        Ok(self.graph.insert("terrain", NodeContent::Terrain(Box::new(surface))))
    }

    fn add_light(&mut self, light: DirectionalLight) -> ObjectHandle {
        self.graph.insert("sun", NodeContent::Light(light))
    }

    fn add_camera(&mut self, camera: Camera) -> ObjectHandle {
        self.graph.insert("camera", NodeContent::Camera(camera))
    }

    fn add_prop(&mut self, bounds: Aabb) -> ObjectHandle {
        self.graph.insert("prop", NodeContent::Prop(bounds))
    }

    fn destroy(&mut self, handle: ObjectHandle) {
        if let Some(node) = self.graph.remove(handle) {
            log::trace!("Destroyed {} {:?}", node.name, handle);
        }
    }

    fn object_count(&self) -> usize {
        self.graph.len()
    }
}

impl RayCaster for SoftwareScene {
    fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;

        for node in self.graph.iter() {
            let candidate = match &node.content {
                NodeContent::Terrain(surface) => surface.intersect(ray).map(|t| {
                    let point = ray.at(t);
                    RayHit {
                        distance: t,
                        point,
                        normal: surface.normal_at(point.x, point.z),
                        object: node.id,
                    }
                }),
                NodeContent::Prop(bounds) => ray.clip(bounds).map(|RaySpan { enter: t, .. }| {
                    let point = ray.at(t);
                    RayHit {
                        distance: t,
                        point,
                        normal: bounds.normal_at(point),
                        object: node.id,
                    }
                }),
                NodeContent::Light(_) | NodeContent::Camera(_) => None,
            };

            if let Some(hit) = candidate {
                if best.is_none_or(|b| hit.distance < b.distance) {
                    best = Some(hit);
                }
            }
        }

        best
    }
}

impl ColorRenderer for SoftwareScene {
    /// One ray per pixel through the pixel center. Hits past the camera's
    /// far plane show sky.
    fn render(&self, camera: &Camera, resolution: u32) -> Result<RenderedImage> {
        let mut image = RgbImage::new(resolution, resolution);
        if resolution == 0 {
            return Ok(image);
        }

        let library = self.library();
        let max_distance = camera.far - camera.near;
        let res = resolution as f32;
        let row_len = resolution as usize * 3;

        image
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(row, pixels)| {
                let py = (resolution - 1 - row as u32) as f32 + 0.5;
                for (px, pixel) in pixels.chunks_exact_mut(3).enumerate() {
                    let screen = Vec2::new(
                        (px as f32 + 0.5) / res * camera.pixel_size.x,
                        py / res * camera.pixel_size.y,
                    );
                    let ray = camera.screen_point_to_ray(screen);
                    let color = match self.raycast(&ray) {
                        Some(hit) if hit.distance <= max_distance => self.shade_hit(&hit, library),
                        _ => sky_color(ray.direction),
                    };
                    pixel.copy_from_slice(&to_srgb8(color));
                }
            });

        Ok(image)
    }
}
