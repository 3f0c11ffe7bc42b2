//! # First-Person Camera
//!
//! Yaw/pitch camera for walking through a scene. Input handling is left to the
//! driver; it maps keys and mouse deltas onto [`FirstPersonCamera::move_forward`],
//! [`FirstPersonCamera::strafe`] and [`FirstPersonCamera::turn`].
//!
//! ## Conventions
//! - Right-handed, Y-up world space
//! - Yaw 0 looks down -Z; positive yaw turns left (counter-clockwise seen from above)
//! - OpenGL clip space (depth -1..1), matching the shaders this drives

use super::backend::UniformSink;
use crate::foundation::math::{utils, Mat4, Point3, Vec3};

/// Pitch limit, just short of straight up/down to keep the view basis defined
const MAX_PITCH_DEGREES: f32 = 89.0;

/// Yaw/pitch perspective camera
#[derive(Debug, Clone, PartialEq)]
pub struct FirstPersonCamera {
    /// Eye position in world space
    pub position: Vec3,
    /// Rotation about +Y in radians
    pub yaw: f32,
    /// Rotation above the horizon in radians
    pub pitch: f32,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Viewport width / height
    pub aspect: f32,
    /// Near clipping distance
    pub near: f32,
    /// Far clipping distance
    pub far: f32,
}

impl FirstPersonCamera {
    /// Create a camera at `position` looking down -Z
    ///
    /// # Arguments
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Viewport width / height
    pub fn new(position: Vec3, fov_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            fov_y: utils::deg_to_rad(fov_degrees),
            aspect,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Create a camera at `position` facing `target`
    pub fn look_at(position: Vec3, target: Vec3, fov_degrees: f32, aspect: f32) -> Self {
        let mut camera = Self::new(position, fov_degrees, aspect);
        let dir = target - position;
        if dir.norm_squared() > f32::EPSILON {
            let dir = dir.normalize();
            camera.yaw = (-dir.x).atan2(-dir.z);
            camera.pitch = dir.y.asin();
            camera.clamp_pitch();
        }
        camera
    }

    /// Set the clipping planes
    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// Unit vector to the camera's right, always horizontal
    pub fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_yaw, 0.0, -sin_yaw)
    }

    /// Walk along the horizontal projection of the view direction
    pub fn move_forward(&mut self, distance: f32) {
        let flat = utils::horizontal(&self.forward());
        if flat.norm_squared() > f32::EPSILON {
            self.position += flat.normalize() * distance;
        }
    }

    /// Sidestep to the right (negative moves left)
    pub fn strafe(&mut self, distance: f32) {
        self.position += self.right() * distance;
    }

    /// Move straight up (negative moves down)
    pub fn rise(&mut self, distance: f32) {
        self.position.y += distance;
    }

    /// Turn by yaw/pitch deltas in radians; pitch is clamped short of vertical
    pub fn turn(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw = (self.yaw + yaw_delta).rem_euclid(std::f32::consts::TAU);
        self.pitch += pitch_delta;
        self.clamp_pitch();
    }

    /// World -> view matrix
    pub fn view_matrix(&self) -> Mat4 {
        let eye = Point3::from(self.position);
        let target = Point3::from(self.position + self.forward());
        Mat4::look_at_rh(&eye, &target, &Vec3::y())
    }

    /// View -> clip matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(self.aspect, self.fov_y, self.near, self.far)
    }

    /// Set the viewport aspect ratio after a resize
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Upload `view`, `projection` and `cameraPos`
    pub fn upload(&self, sink: &mut dyn UniformSink) {
        sink.set_uniform("view", self.view_matrix().into());
        sink.set_uniform("projection", self.projection_matrix().into());
        sink.set_uniform("cameraPos", self.position.into());
    }

    fn clamp_pitch(&mut self) {
        let limit = utils::deg_to_rad(MAX_PITCH_DEGREES);
        self.pitch = self.pitch.clamp(-limit, limit);
    }
}

impl Default for FirstPersonCamera {
    /// Five units back from the origin, looking at it
    fn default() -> Self {
        Self::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::zeros(), 45.0, 1200.0 / 800.0)
    }
}
