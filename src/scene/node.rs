//! Scene node types

use crate::core::Camera;
use crate::math::Aabb;

use super::collaborator::{DirectionalLight, ObjectHandle};
use super::terrain::TerrainSurface;

/// What a scene node contains.
#[derive(Clone, Debug)]
pub enum NodeContent {
    /// Heightfield terrain with its material layers
    Terrain(Box<TerrainSurface>),
    Light(DirectionalLight),
    Camera(Camera),
    /// Solid box without material data (rocks, debris, equipment)
    Prop(Aabb),
}

/// A single node in the scene.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub id: ObjectHandle,
    pub name: String,
    pub content: NodeContent,
}

impl SceneNode {
    pub fn new(id: ObjectHandle, name: impl Into<String>, content: NodeContent) -> Self {
        Self {
            id,
            name: name.into(),
            content,
        }
    }
}
