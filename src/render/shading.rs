//! Lighting helpers for the software renderer

use crate::core::Vec3;
use crate::scene::DirectionalLight;

/// Constant ambient term added to every lit surface
pub const AMBIENT: Vec3 = Vec3::new(0.28, 0.22, 0.20);

/// Dusty sky: pale at the horizon, darker toward the zenith.
pub fn sky_color(direction: Vec3) -> Vec3 {
    let horizon = Vec3::new(0.86, 0.68, 0.52);
    let zenith = Vec3::new(0.45, 0.36, 0.32);
    let t = direction.y.clamp(0.0, 1.0).sqrt();
    horizon.lerp(zenith, t)
}

/// Lambert diffuse with a single directional light plus ambient
pub fn shade(albedo: Vec3, normal: Vec3, light: Option<&DirectionalLight>) -> Vec3 {
    let direct = light
        .map(|l| {
            let n_dot_l = normal.dot(-l.direction).max(0.0);
            Vec3::from(l.color) * l.intensity * n_dot_l
        })
        .unwrap_or(Vec3::ZERO);
    albedo * (AMBIENT + direct)
}

/// Linear color to 8-bit sRGB
pub fn to_srgb8(color: Vec3) -> [u8; 3] {
    let encode = |c: f32| {
        let c = c.clamp(0.0, 1.0);
        let s = if c <= 0.003_130_8 {
            c * 12.92
        } else {
            1.055 * c.powf(1.0 / 2.4) - 0.055
        };
        (s * 255.0).round() as u8
    };
    [encode(color.x), encode(color.y), encode(color.z)]
}
