//! Axis-aligned boxes for terrain bounds and props

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;

/// Box spanning `min..=max` on every axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box with its minimum corner at `origin`
    pub fn from_origin_size(origin: Vec3, size: Vec3) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// True when `min <= max` on every axis and no coordinate is NaN
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    /// Outward normal of the face nearest to `p`.
    ///
    /// Used to shade hits on the box surface; ties resolve in x, y, z
    /// order, min face first.
    pub fn normal_at(&self, p: Vec3) -> Vec3 {
        let faces = [
            ((p.x - self.min.x).abs(), Vec3::NEG_X),
            ((p.x - self.max.x).abs(), Vec3::X),
            ((p.y - self.min.y).abs(), Vec3::NEG_Y),
            ((p.y - self.max.y).abs(), Vec3::Y),
            ((p.z - self.min.z).abs(), Vec3::NEG_Z),
            ((p.z - self.max.z).abs(), Vec3::Z),
        ];
        let mut nearest = (f32::INFINITY, Vec3::Y);
        for face in faces {
            if face.0 < nearest.0 {
                nearest = face;
            }
        }
        nearest.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_origin_size() {
        let aabb = Aabb::from_origin_size(Vec3::new(10.0, 0.0, -5.0), Vec3::new(500.0, 120.0, 500.0));
        assert_eq!(aabb.min, Vec3::new(10.0, 0.0, -5.0));
        assert_eq!(aabb.max, Vec3::new(510.0, 120.0, 495.0));
    }

    #[test]
    fn test_validity() {
        assert!(Aabb::new(Vec3::ZERO, Vec3::ONE).is_valid());
        assert!(Aabb::new(Vec3::ONE, Vec3::ONE).is_valid());
        assert!(!Aabb::new(Vec3::ONE, Vec3::ZERO).is_valid());
        assert!(!Aabb::new(Vec3::splat(f32::NAN), Vec3::ONE).is_valid());
    }

    #[test]
    fn test_normal_at_faces() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert_eq!(aabb.normal_at(Vec3::new(0.5, 1.0, 0.5)), Vec3::Y);
        assert_eq!(aabb.normal_at(Vec3::new(0.0, 0.4, 0.5)), Vec3::NEG_X);
        assert_eq!(aabb.normal_at(Vec3::new(0.3, 0.6, 1.0)), Vec3::Z);
    }
}
