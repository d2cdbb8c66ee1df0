use crate::config::CameraConfig;
use crate::controller::input::{Action, InputState};
use crate::model::Camera;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Handles camera movement and orientation
#[derive(Debug, Clone, Copy)]
pub struct CameraController {
    /// World units per second
    pub movement_speed: f32,
    /// Degrees per pointer unit
    pub mouse_sensitivity: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            movement_speed: 5.0,
            mouse_sensitivity: 0.25,
        }
    }
}

impl CameraController {
    pub fn new(movement_speed: f32, mouse_sensitivity: f32) -> Self {
        Self { movement_speed, mouse_sensitivity }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(config.movement_speed, config.mouse_sensitivity)
    }

    /// Free-fly translation along the camera's front or right axis.
    pub fn process_keyboard(&self, camera: &mut Camera, direction: CameraMovement, dt: f32) {
        let velocity = self.movement_speed * dt;
        match direction {
            CameraMovement::Forward => camera.position += camera.front() * velocity,
            CameraMovement::Backward => camera.position -= camera.front() * velocity,
            CameraMovement::Left => camera.position -= camera.right() * velocity,
            CameraMovement::Right => camera.position += camera.right() * velocity,
        }
    }

    /// Apply a pointer delta to yaw/pitch. Positive `y_offset` looks up.
    pub fn process_mouse_movement(&self, camera: &mut Camera, x_offset: f32, y_offset: f32) {
        let yaw = camera.yaw() + x_offset * self.mouse_sensitivity;
        let pitch = camera.pitch() + y_offset * self.mouse_sensitivity;
        camera.set_orientation(yaw, pitch);
    }

    /// Move the camera for every held movement action.
    pub fn update_movement(&self, camera: &mut Camera, input: &InputState, dt: f32) {
        for action in [Action::MoveForward, Action::MoveBackward, Action::MoveLeft, Action::MoveRight] {
            if input.is_pressed(action) {
                if let Some(direction) = action.movement() {
                    self.process_keyboard(camera, direction, dt);
                }
            }
        }
    }
}
