use glam::Mat4;

use crate::config::ViewerConfig;
use crate::controller::camera_controller::CameraController;
use crate::controller::input::{Action, InputState};
use crate::model::{AnimatedObject, Animations, Camera, FrameClock, LampSwitch};

/// Dimensions and clip planes used to build the projection.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Viewport {
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

/// Everything the frame loop mutates: one owner, updated once per frame.
#[derive(Debug, Clone)]
pub struct SceneState {
    pub clock: FrameClock,
    pub camera: Camera,
    pub camera_controller: CameraController,
    pub animations: Animations,
    pub lamp: LampSwitch,
    pub viewport: Viewport,
}

impl SceneState {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            clock: FrameClock::new(),
            camera: Camera::from_config(&config.camera),
            camera_controller: CameraController::from_config(&config.camera),
            animations: Animations::default(),
            lamp: LampSwitch::default(),
            viewport: Viewport {
                width: config.window.width,
                height: config.window.height,
                z_near: config.camera.z_near,
                z_far: config.camera.z_far,
            },
        }
    }

    /// React to a freshly pressed action. Returns whether any state changed.
    ///
    /// Movement is continuous and handled in [`SceneState::update`]; quitting
    /// belongs to the window owner.
    pub fn handle_action(&mut self, action: Action) -> bool {
        if let Some(object) = action.animated_object() {
            let toggle = self.animations.get_mut(object);
            let flipped = toggle.request_toggle();
            if flipped {
                tracing::debug!(object = object.label(), enabled = toggle.enabled(), "animation toggled");
            } else {
                tracing::debug!(
                    object = object.label(),
                    parameter = toggle.parameter(),
                    "toggle ignored while in motion"
                );
            }
            return flipped;
        }
        match action {
            Action::ToggleLamp => {
                self.lamp.toggle();
                tracing::debug!(on = self.lamp.is_on(), "lamp switched");
                true
            }
            _ => false,
        }
    }

    /// Advance one frame at absolute time `now` (seconds). Returns the delta used.
    pub fn update(&mut self, input: &mut InputState, now: f64) -> f32 {
        let dt = self.clock.tick(now).max(0.0);

        let (dx, dy) = input.consume_look();
        if dx != 0.0 || dy != 0.0 {
            self.camera_controller.process_mouse_movement(&mut self.camera, dx, dy);
        }
        self.camera_controller.update_movement(&mut self.camera, input, dt);

        self.animations.update(dt, now);
        dt
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.camera
            .projection_matrix(self.viewport.aspect(), self.viewport.z_near, self.viewport.z_far)
    }

    pub fn parameter(&self, object: AnimatedObject) -> f32 {
        self.animations.parameter(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::input::InputEvent;

    fn scene() -> SceneState {
        SceneState::new(&ViewerConfig::default())
    }

    #[test]
    fn door_scenario() {
        let mut scene = scene();
        let mut input = InputState::new();
        assert!(scene.handle_action(Action::ToggleDoor));
        scene.update(&mut input, 0.0);
        scene.update(&mut input, 0.9);
        assert_eq!(scene.parameter(AnimatedObject::Door), 90.0);
    }

    #[test]
    fn mid_swing_toggle_is_ignored() {
        let mut scene = scene();
        let mut input = InputState::new();
        scene.handle_action(Action::ToggleDoor);
        scene.update(&mut input, 0.0);
        scene.update(&mut input, 0.2);
        assert!(!scene.handle_action(Action::ToggleDoor));
        assert!(scene.animations.get(AnimatedObject::Door).enabled());
    }

    #[test]
    fn backwards_clock_freezes_animation() {
        let mut scene = scene();
        let mut input = InputState::new();
        scene.handle_action(Action::ToggleDrawer);
        scene.update(&mut input, 5.0);
        let dt = scene.update(&mut input, 4.0);
        assert_eq!(dt, 0.0);
        assert_eq!(scene.parameter(AnimatedObject::Drawer), 0.0);
    }

    #[test]
    fn lamp_and_quit_actions() {
        let mut scene = scene();
        assert!(scene.handle_action(Action::ToggleLamp));
        assert!(scene.lamp.is_on());
        assert!(!scene.handle_action(Action::Quit));
        assert!(!scene.handle_action(Action::MoveForward));
    }

    #[test]
    fn look_delta_turns_camera() {
        let mut scene = scene();
        let mut input = InputState::new();
        input.process_event(&InputEvent::CursorMoved { x: 100.0, y: 100.0 });
        input.process_event(&InputEvent::CursorMoved { x: 140.0, y: 100.0 });
        scene.update(&mut input, 0.0);
        assert!((scene.camera.yaw() - 190.0).abs() < 1e-4);
    }

    #[test]
    fn projection_tracks_viewport() {
        let mut scene = scene();
        let wide = scene.projection_matrix();
        scene.set_viewport(720, 720);
        let square = scene.projection_matrix();
        assert!(wide.x_axis.x < square.x_axis.x);
    }
}
