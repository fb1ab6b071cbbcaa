//! Scene construction and queries.
//!
//! The engine side of dataset generation is reached only through the
//! traits in [`collaborator`]. [`SoftwareScene`] implements all of them on
//! the CPU; [`SceneContext`] scopes the objects a sample creates.

pub mod collaborator;
pub mod config;
pub mod context;
pub mod graph;
pub mod node;
pub mod software;
pub mod terrain;

pub use collaborator::{
    DirectionalLight, ObjectHandle, RayCaster, RayHit, SceneCollaborator, TerrainBinding,
};
pub use config::{CameraRig, SceneLayout, SunConfig, TopViewRig};
pub use context::SceneContext;
pub use graph::SceneGraph;
pub use software::SoftwareScene;
pub use terrain::TerrainSurface;
