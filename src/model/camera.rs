use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Pitch is kept within this many degrees of the horizon so the view never flips.
pub const PITCH_LIMIT: f32 = 89.0;

/// First-person camera. Yaw, pitch and zoom are in degrees.
///
/// `front`, `right` and `up` are derived from yaw/pitch and only change
/// through [`Camera::set_orientation`], so they are never stale.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub zoom: f32,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Camera {
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            zoom: 45.0,
            world_up,
            yaw,
            pitch: 0.0,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        };
        camera.set_orientation(yaw, pitch);
        camera
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new(config.position, config.world_up, config.yaw, config.pitch);
        camera.zoom = config.zoom;
        camera
    }

    pub fn yaw(&self) -> f32 { self.yaw }
    pub fn pitch(&self) -> f32 { self.pitch }
    pub fn front(&self) -> Vec3 { self.front }
    pub fn right(&self) -> Vec3 { self.right }
    pub fn up(&self) -> Vec3 { self.up }

    /// Set yaw/pitch (pitch clamped to ±[`PITCH_LIMIT`]) and re-derive the basis.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32, z_near: f32, z_far: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect, z_near, z_far)
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}
