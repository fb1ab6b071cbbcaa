//! Geometry primitives for ray casting

pub mod aabb;
pub mod ray;

pub use aabb::Aabb;
pub use ray::{Ray, RaySpan};
