//! Scoped ownership of per-sample scene objects

use crate::core::{Camera, Result, Vec3};
use crate::math::Aabb;
use crate::terrain::{HeightField, MaterialGrid};

use super::collaborator::{DirectionalLight, ObjectHandle, SceneCollaborator, TerrainBinding};

/// Exclusive handle on a scene for the duration of one sample.
///
/// Every object created through the context is destroyed when the context
/// is dropped, whether the sample finished or bailed out with an error.
pub struct SceneContext<'s, S: SceneCollaborator> {
    scene: &'s mut S,
    owned: Vec<ObjectHandle>,
}

impl<'s, S: SceneCollaborator> SceneContext<'s, S> {
    pub fn new(scene: &'s mut S) -> Self {
        Self {
            scene,
            owned: Vec::new(),
        }
    }

    fn track(&mut self, handle: ObjectHandle) -> ObjectHandle {
        self.owned.push(handle);
        handle
    }

    /// Build terrain and return a binding that the mask synthesizer can
    /// label against.
    pub fn build_terrain<'m>(
        &mut self,
        heights: &HeightField,
        materials: &'m MaterialGrid,
        origin: Vec3,
        extent: Vec3,
    ) -> Result<TerrainBinding<'m>> {
        let handle = self.scene.build_terrain(heights, materials, origin, extent)?;
        self.track(handle);
        Ok(TerrainBinding {
            handle,
            origin,
            extent,
            materials,
        })
    }

    pub fn add_light(&mut self, light: DirectionalLight) -> ObjectHandle {
        let handle = self.scene.add_light(light);
        self.track(handle)
    }

    pub fn add_camera(&mut self, camera: Camera) -> ObjectHandle {
        let handle = self.scene.add_camera(camera);
        self.track(handle)
    }

    pub fn add_prop(&mut self, bounds: Aabb) -> ObjectHandle {
        let handle = self.scene.add_prop(bounds);
        self.track(handle)
    }

    /// Destroy one owned object ahead of the context's end.
    pub fn destroy(&mut self, handle: ObjectHandle) {
        if let Some(pos) = self.owned.iter().position(|&h| h == handle) {
            self.owned.remove(pos);
            self.scene.destroy(handle);
        }
    }

    /// Read access for rendering and ray queries
    pub fn scene(&self) -> &S {
        self.scene
    }

    pub fn owned_count(&self) -> usize {
        self.owned.len()
    }
}

impl<S: SceneCollaborator> Drop for SceneContext<'_, S> {
    fn drop(&mut self) {
        let count = self.owned.len();
        for handle in self.owned.drain(..).rev() {
            self.scene.destroy(handle);
        }
        log::trace!("Scene context released {} objects", count);
    }
}
