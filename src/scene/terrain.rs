//! Heightfield terrain geometry for the software scene.
//!
//! Height sample `(i, j)` sits at `origin + (i, _, j) / (res - 1) * extent`;
//! the surface between samples is bilinear.

use crate::core::{Vec2, Vec3};
use crate::math::{Aabb, Ray};
use crate::terrain::{HeightField, MaterialClass, MaterialGrid};

/// Bisection steps used to refine a bracketed surface crossing
const REFINE_STEPS: u32 = 12;

/// Terrain object owned by a scene: geometry plus material layers.
#[derive(Clone, Debug)]
pub struct TerrainSurface {
    heights: HeightField,
    materials: MaterialGrid,
    origin: Vec3,
    extent: Vec3,
    bounds: Aabb,
    /// Ray-march step in world units (half a height cell)
    step: f32,
}

impl TerrainSurface {
    pub fn new(heights: HeightField, materials: MaterialGrid, origin: Vec3, extent: Vec3) -> Self {
        let cells = (heights.resolution().max(2) - 1) as f32;
        let step = (extent.x / cells).min(extent.z / cells) * 0.5;
        Self {
            heights,
            materials,
            origin,
            extent,
            bounds: Aabb::from_origin_size(origin, extent),
            step,
        }
    }

    /// World-space surface height at world (x, z)
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let cells = (self.heights.resolution() - 1) as f32;
        let gx = (x - self.origin.x) / self.extent.x * cells;
        let gz = (z - self.origin.z) / self.extent.z * cells;
        self.origin.y + self.heights.sample_bilinear(gx, gz) * self.extent.y
    }

    /// Surface normal by central differences
    pub fn normal_at(&self, x: f32, z: f32) -> Vec3 {
        let e = self.step;
        let dh_dx = (self.height_at(x + e, z) - self.height_at(x - e, z)) / (2.0 * e);
        let dh_dz = (self.height_at(x, z + e) - self.height_at(x, z - e)) / (2.0 * e);
        Vec3::new(-dh_dx, 1.0, -dh_dz).normalize()
    }

    /// Dominant material under a world point
    pub fn material_at(&self, point: Vec3) -> MaterialClass {
        let local = point - self.origin;
        let (x, z) = self
            .materials
            .cell_for_normalized(local.x / self.extent.x, local.z / self.extent.z);
        self.materials.dominant(x, z)
    }

    /// Horizontal world position of a point, for texture lookups
    pub fn xz(point: Vec3) -> Vec2 {
        Vec2::new(point.x, point.z)
    }

    /// Distance along `ray` to the first surface crossing.
    ///
    /// The ray is clipped to the terrain's bounding box, then marched at
    /// half-cell steps until it drops below the surface; the crossing is
    /// refined by bisection.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let span = ray.clip(&self.bounds)?;
        let (t_near, t_far) = (span.enter, span.exit);

        let above = |t: f32| {
            let p = ray.at(t);
            p.y - self.height_at(p.x, p.z)
        };

        if above(t_near) <= 0.0 {
            return Some(t_near);
        }

        let mut t_prev = t_near;
        let mut t = t_near;
        while t < t_far {
            t = (t + self.step).min(t_far);
            if above(t) <= 0.0 {
                return Some(refine(&above, t_prev, t));
            }
            t_prev = t;
        }
        None
    }
}

/// Bisect a bracket where `f(lo) > 0` and `f(hi) <= 0`
fn refine(f: &impl Fn(f32) -> f32, mut lo: f32, mut hi: f32) -> f32 {
    for _ in 0..REFINE_STEPS {
        let mid = (lo + hi) * 0.5;
        if f(mid) > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    hi
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_surface(level: f32) -> TerrainSurface {
        TerrainSurface::new(
            HeightField::flat(17, level),
            MaterialGrid::uniform(8, MaterialClass::Sand),
            Vec3::ZERO,
            Vec3::new(100.0, 50.0, 100.0),
        )
    }

    #[test]
    fn test_height_at_flat() {
        let surface = flat_surface(0.4);
        assert!((surface.height_at(10.0, 90.0) - 20.0).abs() < 1e-4);
        assert!((surface.normal_at(50.0, 50.0) - Vec3::Y).length() < 1e-4);
    }

    #[test]
    fn test_vertical_ray_hits_surface() {
        let surface = flat_surface(0.4);
        let ray = Ray::new(Vec3::new(30.0, 100.0, 30.0), -Vec3::Y);
        let t = surface.intersect(&ray).expect("ray should hit");
        assert!((t - 80.0).abs() < 0.01, "t = {}", t);
    }

    #[test]
    fn test_oblique_ray_hits_surface() {
        let surface = flat_surface(0.2);
        let direction = Vec3::new(0.0, -1.0, 1.0).normalize();
        let ray = Ray::new(Vec3::new(50.0, 40.0, 0.0), direction);
        let t = surface.intersect(&ray).expect("ray should hit");
        let p = ray.at(t);
        assert!((p.y - 10.0).abs() < 0.01);
        assert!((p.z - 30.0).abs() < 0.05);
    }

    #[test]
    fn test_ray_outside_bounds_misses() {
        let surface = flat_surface(0.4);
        let ray = Ray::new(Vec3::new(200.0, 100.0, 30.0), -Vec3::Y);
        assert!(surface.intersect(&ray).is_none());

        let upward = Ray::new(Vec3::new(30.0, 30.0, 30.0), Vec3::Y);
        assert!(surface.intersect(&upward).is_none());
    }

    #[test]
    fn test_ray_over_ridge_hits_slope() {
        // Ridge along z: heights rise with x
        let res = 9;
        let data: Vec<f32> = (0..res * res).map(|i| (i % res) as f32 / (res - 1) as f32).collect();
        let surface = TerrainSurface::new(
            HeightField::from_vec(res, data).unwrap(),
            MaterialGrid::uniform(4, MaterialClass::Bedrock),
            Vec3::ZERO,
            Vec3::new(80.0, 80.0, 80.0),
        );
        // Horizontal ray toward +x at y = 40 hits where height == 40 (x = 40)
        let ray = Ray::new(Vec3::new(-10.0, 40.0, 20.0), Vec3::X);
        let t = surface.intersect(&ray).expect("ray should hit");
        assert!((ray.at(t).x - 40.0).abs() < 0.05);
        assert!(surface.normal_at(40.0, 20.0).x < 0.0);
    }

    #[test]
    fn test_material_at_clamps() {
        let surface = flat_surface(0.1);
        assert_eq!(surface.material_at(Vec3::new(100.0, 0.0, 100.0)), MaterialClass::Sand);
        assert_eq!(surface.material_at(Vec3::new(-0.001, 0.0, 0.0)), MaterialClass::Sand);
    }
}
