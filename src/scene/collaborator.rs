//! Interfaces to the scene engine: construction, ray casting.
//!
//! These traits are the seams between dataset generation and whatever
//! engine owns geometry. [`super::SoftwareScene`] is the built-in CPU
//! implementation.

use serde::{Deserialize, Serialize};

use crate::core::{Camera, Result, Vec3};
use crate::math::{Aabb, Ray};
use crate::terrain::{HeightField, MaterialGrid};

/// Opaque reference to an object owned by a scene collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectHandle(pub u64);

/// Directional light (sun)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    /// Direction the light travels (normalized)
    pub direction: Vec3,
    /// Linear RGB color
    pub color: [f32; 3],
    pub intensity: f32,
}

/// First intersection of a ray with scene geometry
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Surface normal at the hit point
    pub normal: Vec3,
    /// Object that was hit
    pub object: ObjectHandle,
}

/// Builds and tears down scene objects.
pub trait SceneCollaborator {
    /// Create a terrain object spanning `extent` from `origin`.
    fn build_terrain(
        &mut self,
        heights: &HeightField,
        materials: &MaterialGrid,
        origin: Vec3,
        extent: Vec3,
    ) -> Result<ObjectHandle>;

    fn add_light(&mut self, light: DirectionalLight) -> ObjectHandle;

    fn add_camera(&mut self, camera: Camera) -> ObjectHandle;

    /// Add a miscellaneous solid box that carries no material data.
    fn add_prop(&mut self, bounds: Aabb) -> ObjectHandle;

    /// Release an object. Unknown handles are ignored.
    fn destroy(&mut self, handle: ObjectHandle);

    /// Number of live objects
    fn object_count(&self) -> usize;
}

/// First-hit ray queries against scene geometry.
pub trait RayCaster {
    fn raycast(&self, ray: &Ray) -> Option<RayHit>;
}

/// Material data of one terrain object, as the mask synthesizer needs it.
#[derive(Clone, Copy, Debug)]
pub struct TerrainBinding<'a> {
    pub handle: ObjectHandle,
    /// World position of the terrain's minimum corner
    pub origin: Vec3,
    /// Terrain size along x, y, z
    pub extent: Vec3,
    pub materials: &'a MaterialGrid,
}

impl<'a> TerrainBinding<'a> {
    /// Normalized horizontal terrain coordinates of a world point
    pub fn normalized(&self, point: Vec3) -> (f32, f32) {
        let local = point - self.origin;
        (local.x / self.extent.x, local.z / self.extent.z)
    }
}
