//! Rays and their overlap with boxes

use crate::core::types::Vec3;
use super::aabb::Aabb;

/// Half-line from `origin` along a unit `direction`
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Componentwise reciprocal of `direction`; infinite on axis-parallel rays
    pub inv_direction: Vec3,
}

/// Parameter interval `[enter, exit]` a ray spends inside a box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaySpan {
    pub enter: f32,
    pub exit: f32,
}

impl RaySpan {
    pub fn length(&self) -> f32 {
        self.exit - self.enter
    }
}

impl Ray {
    /// `direction` is expected to be normalized
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: direction.recip(),
        }
    }

    /// Point at distance `t` from the origin
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Portion of the ray inside `bounds` (slab test).
    ///
    /// The span starts at 0 when the origin is inside the box; boxes
    /// entirely behind the origin give `None`.
    pub fn clip(&self, bounds: &Aabb) -> Option<RaySpan> {
        let a = (bounds.min - self.origin) * self.inv_direction;
        let b = (bounds.max - self.origin) * self.inv_direction;

        let enter = a.min(b).max_element();
        let exit = a.max(b).min_element();

        (enter <= exit && exit >= 0.0).then(|| RaySpan {
            enter: enter.max(0.0),
            exit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn test_clip_through_box() {
        let ray = Ray::new(Vec3::new(-2.0, 0.5, 0.5), Vec3::X);
        let span = ray.clip(&unit_box()).expect("ray should cross the box");
        assert!((span.enter - 2.0).abs() < 1e-4);
        assert!((span.exit - 3.0).abs() < 1e-4);
        assert!((span.length() - 1.0).abs() < 1e-4);
        assert_eq!(ray.at(span.enter), Vec3::new(0.0, 0.5, 0.5));
    }

    #[test]
    fn test_clip_misses() {
        let beside = Ray::new(Vec3::new(-2.0, 5.0, 0.5), Vec3::X);
        assert!(beside.clip(&unit_box()).is_none());

        let behind = Ray::new(Vec3::new(3.0, 0.5, 0.5), Vec3::X);
        assert!(behind.clip(&unit_box()).is_none());
    }

    #[test]
    fn test_clip_from_inside_starts_at_zero() {
        let ray = Ray::new(Vec3::splat(0.5), Vec3::X);
        let span = ray.clip(&unit_box()).expect("origin is inside");
        assert_eq!(span.enter, 0.0);
        assert!((span.exit - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_clip_straight_down() {
        // Zero x/z components give infinite reciprocals
        let ray = Ray::new(Vec3::new(0.5, 10.0, 0.5), Vec3::NEG_Y);
        let span = ray.clip(&unit_box()).expect("ray should cross the box");
        assert!((span.enter - 9.0).abs() < 1e-4);
        assert!((span.exit - 10.0).abs() < 1e-4);
    }
}
