//! Scene layout: terrain frame, cameras, sun, and output resolutions

use serde::{Deserialize, Serialize};

use crate::core::{Camera, Error, Result, Vec3};
use crate::mask::{MaskSynthesizer, NonTerrainPolicy, Palette};
use crate::math::Aabb;
use crate::terrain::MaterialThresholds;

use super::collaborator::DirectionalLight;

/// Perspective camera placement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRig {
    pub position: Vec3,
    /// Downward tilt in degrees
    pub pitch_degrees: f32,
    /// Heading in degrees, 0 faces +Z
    pub yaw_degrees: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraRig {
    /// Close-framed view from the south edge of a 500 x 500 terrain
    fn default() -> Self {
        Self {
            position: Vec3::new(250.0, 85.0, 130.0),
            pitch_degrees: 35.0,
            yaw_degrees: 0.0,
            fov_degrees: 55.0,
            near: 0.3,
            far: 400.0,
        }
    }
}

/// Orthographic top-down camera centered over the terrain
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopViewRig {
    /// Camera altitude above the terrain origin
    pub height: f32,
    pub far: f32,
}

impl Default for TopViewRig {
    fn default() -> Self {
        Self {
            height: 600.0,
            far: 1000.0,
        }
    }
}

/// Directional sun light
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    pub pitch_degrees: f32,
    pub yaw_degrees: f32,
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            pitch_degrees: 50.0,
            yaw_degrees: 30.0,
            color: [1.0, 0.85, 0.65],
            intensity: 1.3,
        }
    }
}

/// Everything that shapes one sample's scene apart from the random draws.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneLayout {
    /// World position of the terrain's minimum corner
    pub terrain_origin: Vec3,
    /// Terrain size: width (x), max height (y), length (z)
    pub terrain_extent: Vec3,
    pub heightmap_resolution: usize,
    /// Material grid resolution
    pub alpha_resolution: usize,
    pub material_thresholds: MaterialThresholds,
    pub camera: CameraRig,
    pub top_view: TopViewRig,
    pub sun: SunConfig,
    /// Color image resolution (square)
    pub render_resolution: u32,
    /// Mask image resolution (square)
    pub mask_resolution: u32,
    /// Mask hits farther than this are labeled background
    pub distance_threshold: f32,
    pub palette: Palette,
    pub non_terrain_policy: NonTerrainPolicy,
    /// Extra solid boxes placed in every scene
    pub props: Vec<Aabb>,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            terrain_origin: Vec3::ZERO,
            terrain_extent: Vec3::new(500.0, 120.0, 500.0),
            heightmap_resolution: 256,
            alpha_resolution: 512,
            material_thresholds: MaterialThresholds::reference(),
            camera: CameraRig::default(),
            top_view: TopViewRig::default(),
            sun: SunConfig::default(),
            render_resolution: 2048,
            mask_resolution: 1024,
            distance_threshold: 120.0,
            palette: Palette::REFERENCE,
            non_terrain_policy: NonTerrainPolicy::Background,
            props: Vec::new(),
        }
    }
}

impl SceneLayout {
    /// Main camera, targeting the color render's pixel size
    pub fn main_camera(&self) -> Camera {
        let rig = &self.camera;
        let rotation = Camera::rotation_from_pitch_yaw(rig.pitch_degrees, rig.yaw_degrees);
        Camera::perspective(rig.position, rotation, rig.fov_degrees)
            .with_clip(rig.near, rig.far)
            .with_pixel_size(self.render_resolution, self.render_resolution)
    }

    /// Straight-down orthographic camera framing the whole terrain width
    pub fn top_camera(&self) -> Camera {
        let center = self.terrain_origin + self.terrain_extent * 0.5;
        let position = Vec3::new(center.x, self.terrain_origin.y + self.top_view.height, center.z);
        let rotation = Camera::rotation_from_pitch_yaw(90.0, 0.0);
        Camera::orthographic(position, rotation, self.terrain_extent.x * 0.5)
            .with_clip(0.3, self.top_view.far)
            .with_pixel_size(self.render_resolution, self.render_resolution)
    }

    pub fn sun_light(&self) -> DirectionalLight {
        let rotation = Camera::rotation_from_pitch_yaw(self.sun.pitch_degrees, self.sun.yaw_degrees);
        DirectionalLight {
            direction: rotation * -Vec3::Z,
            color: self.sun.color,
            intensity: self.sun.intensity,
        }
    }

    pub fn mask_synthesizer(&self) -> MaskSynthesizer {
        MaskSynthesizer::new(self.mask_resolution, self.distance_threshold)
            .with_palette(self.palette.clone())
            .with_non_terrain_policy(self.non_terrain_policy)
    }

    /// Reject layouts that cannot produce a meaningful sample.
    pub fn validate(&self) -> Result<()> {
        if !self.terrain_extent.cmpgt(Vec3::ZERO).all() {
            return Err(Error::InvalidConfig(format!(
                "terrain_extent must be positive on every axis, got {}",
                self.terrain_extent
            )));
        }
        if self.heightmap_resolution < 2 {
            return Err(Error::InvalidConfig("heightmap_resolution must be at least 2".into()));
        }
        if self.alpha_resolution == 0 {
            return Err(Error::InvalidConfig("alpha_resolution must be at least 1".into()));
        }
        if self.render_resolution == 0 || self.mask_resolution == 0 {
            return Err(Error::InvalidConfig("render and mask resolutions must be non-zero".into()));
        }
        if !(self.distance_threshold > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "distance_threshold must be positive, got {}",
                self.distance_threshold
            )));
        }
        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            return Err(Error::InvalidConfig(format!(
                "camera fov must lie in (0, 180), got {}",
                self.camera.fov_degrees
            )));
        }
        if !(self.camera.near > 0.0 && self.camera.near < self.camera.far) {
            return Err(Error::InvalidConfig("camera clip planes must satisfy 0 < near < far".into()));
        }
        if let Some(prop) = self.props.iter().find(|prop| !prop.is_valid()) {
            return Err(Error::InvalidConfig(format!(
                "prop bounds must have min <= max, got {:?}",
                prop
            )));
        }
        if !self.material_thresholds.is_valid() {
            return Err(Error::InvalidConfig(
                "material thresholds must be ascending and within [0, 1]".into(),
            ));
        }
        if !self.palette.is_unambiguous() {
            log::warn!("Palette reuses a color; some mask labels will be indistinguishable");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_valid() {
        assert!(SceneLayout::default().validate().is_ok());
    }

    #[test]
    fn test_main_camera_faces_terrain() {
        let layout = SceneLayout::default();
        let camera = layout.main_camera();
        let forward = camera.forward();
        assert!(forward.z > 0.0 && forward.y < 0.0);
        assert_eq!(camera.pixel_size.x, 2048.0);
        assert_eq!(camera.far, 400.0);
    }

    #[test]
    fn test_top_camera_centered() {
        let camera = SceneLayout::default().top_camera();
        assert_eq!(camera.position, Vec3::new(250.0, 600.0, 250.0));
        assert!((camera.forward() + Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_sun_points_down() {
        let sun = SceneLayout::default().sun_light();
        assert!(sun.direction.y < 0.0);
        assert!((sun.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            SceneLayout { terrain_extent: Vec3::new(0.0, 1.0, 1.0), ..Default::default() },
            SceneLayout { terrain_extent: Vec3::new(f32::NAN, 120.0, 500.0), ..Default::default() },
            SceneLayout {
                props: vec![Aabb::new(Vec3::ONE, Vec3::ZERO)],
                ..Default::default()
            },
            SceneLayout { heightmap_resolution: 1, ..Default::default() },
            SceneLayout { alpha_resolution: 0, ..Default::default() },
            SceneLayout { mask_resolution: 0, ..Default::default() },
            SceneLayout { distance_threshold: f32::NAN, ..Default::default() },
        ];
        for layout in bad {
            assert!(matches!(layout.validate(), Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let layout: SceneLayout =
            serde_json::from_str(r#"{ "mask_resolution": 64, "camera": { "fov_degrees": 40.0 } }"#)
                .expect("parse failed");
        assert_eq!(layout.mask_resolution, 64);
        assert_eq!(layout.camera.fov_degrees, 40.0);
        assert_eq!(layout.camera.pitch_degrees, 35.0);
        assert_eq!(layout.render_resolution, 2048);
    }
}
