//! Camera for ray generation
//!
//! Cameras follow the convention of looking down their local -Z axis, with
//! +Y up. Screen space has its origin at the bottom-left corner, so a screen
//! point `(0, 0)` maps to the lower-left edge of the view.

use serde::{Deserialize, Serialize};

use crate::core::types::{Mat3, Quat, Vec2, Vec3};
use crate::math::Ray;

/// Projection model of a camera
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    /// Vertical field of view in radians
    Perspective { fov_y: f32 },
    /// Half of the vertical view height in world units
    Orthographic { half_height: f32 },
}

/// Camera with position, rotation, and projection parameters
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// Rotation as quaternion
    pub rotation: Quat,
    pub projection: Projection,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Pixel dimensions of the camera's target, used by
    /// [`Camera::screen_point_to_ray`].
    pub pixel_size: Vec2,
}

impl Camera {
    /// Create a perspective camera
    pub fn perspective(position: Vec3, rotation: Quat, fov_y_degrees: f32) -> Self {
        Self {
            position,
            rotation,
            projection: Projection::Perspective { fov_y: fov_y_degrees.to_radians() },
            aspect: 1.0,
            near: 0.3,
            far: 1000.0,
            pixel_size: Vec2::ONE,
        }
    }

    /// Create an orthographic camera
    pub fn orthographic(position: Vec3, rotation: Quat, half_height: f32) -> Self {
        Self {
            position,
            rotation,
            projection: Projection::Orthographic { half_height },
            aspect: 1.0,
            near: 0.3,
            far: 1000.0,
            pixel_size: Vec2::ONE,
        }
    }

    /// Rotation for a camera pitched down by `pitch` and turned by `yaw`
    /// (degrees). Zero yaw faces +Z; a pitch of 90 looks straight down
    /// with +Z as the screen's up direction.
    pub fn rotation_from_pitch_yaw(pitch_degrees: f32, yaw_degrees: f32) -> Quat {
        let (sp, cp) = pitch_degrees.to_radians().sin_cos();
        let (sy, cy) = yaw_degrees.to_radians().sin_cos();

        let forward = Vec3::new(sy * cp, -sp, cy * cp);
        let up = Vec3::new(sy * sp, cp, cy * sp);
        let right = forward.cross(up).normalize();

        Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize()
    }

    /// Builder-style setter for clip planes
    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Builder-style setter for the target's pixel dimensions
    pub fn with_pixel_size(mut self, width: u32, height: u32) -> Self {
        self.pixel_size = Vec2::new(width as f32, height as f32);
        self.aspect = width as f32 / height as f32;
        self
    }

    /// Get forward direction (negative Z in camera space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get right direction (positive X in camera space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get up direction (positive Y in camera space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Build a world-space ray through a pixel-space screen point.
    ///
    /// The ray starts on the near plane; hit distances are measured from there.
    pub fn screen_point_to_ray(&self, screen: Vec2) -> Ray {
        let ndc = screen / self.pixel_size * 2.0 - Vec2::ONE;

        match self.projection {
            Projection::Perspective { fov_y } => {
                let tan_half = (fov_y * 0.5).tan();
                let local = Vec3::new(ndc.x * tan_half * self.aspect, ndc.y * tan_half, -1.0);
                let direction = (self.rotation * local).normalize();
                let origin = self.position + self.rotation * (local * self.near);
                Ray::new(origin, direction)
            }
            Projection::Orthographic { half_height } => {
                let offset = self.right() * (ndc.x * half_height * self.aspect)
                    + self.up() * (ndc.y * half_height);
                let direction = self.forward();
                Ray::new(self.position + offset + direction * self.near, direction)
            }
        }
    }
}
