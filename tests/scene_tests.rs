use glam::Vec3;
use roomview::controller::{Action, CameraController, CameraMovement, InputEvent, KeyBindings};
use roomview::model::{AnimatedObject, AnimationStrategy, AnimationToggle, Camera, SceneObject, PITCH_LIMIT};
use roomview::{FrameLoopContext, LoopControl, ViewerConfig};
use winit::keyboard::KeyCode;

fn key(code: KeyCode, pressed: bool) -> InputEvent {
    let action = KeyBindings::default().action_for(code).expect("key is bound by default");
    InputEvent::Action { action, key: code, pressed, repeat: false }
}

fn press(action: Action) -> InputEvent {
    key(KeyBindings::default().keys_for(action)[0], true)
}

fn release(action: Action) -> InputEvent {
    key(KeyBindings::default().keys_for(action)[0], false)
}

#[cfg(test)]
mod scene_tests {
    use super::*;

    #[test]
    fn test_door_opens_and_clamps_at_upper_bound() {
        let mut ctx = FrameLoopContext::new(&ViewerConfig::default());
        ctx.handle_event(&press(Action::ToggleDoor));
        ctx.handle_event(&release(Action::ToggleDoor));

        ctx.update(0.0);
        ctx.update(0.9);

        assert_eq!(ctx.scene.parameter(AnimatedObject::Door), 90.0);
    }

    #[test]
    fn test_door_closes_back_to_lower_bound() {
        let mut ctx = FrameLoopContext::new(&ViewerConfig::default());
        ctx.handle_event(&press(Action::ToggleDoor));
        ctx.update(0.0);
        ctx.update(1.0);
        ctx.handle_event(&release(Action::ToggleDoor));

        ctx.handle_event(&press(Action::ToggleDoor));
        ctx.update(1.0);
        ctx.update(3.0);

        let door = ctx.scene.animations.get(AnimatedObject::Door);
        assert!(!door.enabled());
        assert_eq!(door.parameter(), 0.0);
    }

    #[test]
    fn test_drawer_ignores_toggle_mid_slide() {
        let mut ctx = FrameLoopContext::new(&ViewerConfig::default());
        ctx.handle_event(&press(Action::ToggleDrawer));
        ctx.update(0.0);
        ctx.update(0.05);
        ctx.handle_event(&release(Action::ToggleDrawer));

        ctx.handle_event(&press(Action::ToggleDrawer));
        ctx.update(0.06);

        assert!(ctx.scene.animations.get(AnimatedObject::Drawer).enabled());
    }

    #[test]
    fn test_forward_step_moves_half_a_unit_along_front() {
        let mut camera = Camera::new(Vec3::new(10.0, 3.0, 0.0), Vec3::Y, 180.0, -10.0);
        let controller = CameraController::new(5.0, 0.25);
        let start = camera.position;
        let front = camera.front();

        controller.process_keyboard(&mut camera, CameraMovement::Forward, 0.1);

        let moved = camera.position - start;
        assert!((moved.length() - 0.5).abs() < 1e-5);
        assert!(moved.normalize().abs_diff_eq(front, 1e-5));
    }

    #[test]
    fn test_held_key_moves_camera_each_frame() {
        let mut ctx = FrameLoopContext::new(&ViewerConfig::default());
        let start = ctx.scene.camera.position;
        ctx.handle_event(&press(Action::MoveBackward));
        ctx.update(0.0);
        ctx.update(0.5);
        ctx.update(1.0);

        let travelled = (ctx.scene.camera.position - start).length();
        assert!((travelled - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_second_key_keeps_moving_after_first_release() {
        let mut ctx = FrameLoopContext::new(&ViewerConfig::default());
        let start = ctx.scene.camera.position;
        ctx.handle_event(&key(KeyCode::KeyW, true));
        ctx.handle_event(&key(KeyCode::ArrowUp, true));
        ctx.handle_event(&key(KeyCode::ArrowUp, false));
        ctx.update(0.0);
        ctx.update(1.0);

        let moved = (ctx.scene.camera.position - start).length();
        assert!((moved - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_captured_pointer_keeps_turning_past_window_edge() {
        let mut ctx = FrameLoopContext::new(&ViewerConfig::default());
        ctx.handle_event(&InputEvent::PointerCapture { captured: true });
        ctx.handle_event(&InputEvent::CursorMoved { x: 1279.0, y: 360.0 });
        ctx.update(0.0);
        let yaw = ctx.scene.camera.yaw();

        for frame in 1..=4 {
            ctx.handle_event(&InputEvent::CursorMoved { x: 1279.0, y: 360.0 });
            ctx.handle_event(&InputEvent::MouseMotion { dx: 40.0, dy: 0.0 });
            ctx.update(frame as f64 * 0.016);
        }

        assert!((ctx.scene.camera.yaw() - (yaw + 40.0)).abs() < 1e-3);
    }

    #[test]
    fn test_pitch_never_leaves_limit() {
        let mut camera = Camera::new(Vec3::ZERO, Vec3::Y, -90.0, 0.0);
        let controller = CameraController::default();

        controller.process_mouse_movement(&mut camera, 0.0, 10_000.0);
        assert_eq!(camera.pitch(), PITCH_LIMIT);

        controller.process_mouse_movement(&mut camera, 0.0, -20_000.0);
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn test_first_cursor_sample_does_not_turn_camera() {
        let mut ctx = FrameLoopContext::new(&ViewerConfig::default());
        let yaw = ctx.scene.camera.yaw();
        ctx.handle_event(&InputEvent::CursorMoved { x: 900.0, y: 10.0 });
        ctx.update(0.0);

        assert_eq!(ctx.scene.camera.yaw(), yaw);
    }

    #[test]
    fn test_focus_loss_releases_held_keys() {
        let mut ctx = FrameLoopContext::new(&ViewerConfig::default());
        ctx.handle_event(&press(Action::MoveForward));
        ctx.handle_event(&InputEvent::FocusLost);
        let start = ctx.scene.camera.position;
        ctx.update(0.0);
        ctx.update(1.0);

        assert_eq!(ctx.scene.camera.position, start);
    }

    #[test]
    fn test_oscillator_rests_when_disabled() {
        let mut ctx = FrameLoopContext::new(&ViewerConfig::default());
        ctx.handle_event(&press(Action::ToggleRockingChair));
        ctx.update(0.0);
        ctx.update(0.3);
        assert!(ctx.scene.parameter(AnimatedObject::RockingChair) != 0.0);
        ctx.handle_event(&release(Action::ToggleRockingChair));

        ctx.handle_event(&press(Action::ToggleRockingChair));
        ctx.update(0.4);
        assert_eq!(ctx.scene.parameter(AnimatedObject::RockingChair), 0.0);
    }

    #[test]
    fn test_animation_parameters_stay_within_bounds() {
        let mut toggle = AnimationToggle::new(AnimationStrategy::Oscillate {
            amplitude: 10.0,
            angular_speed: 2.0,
            rectified: false,
        });
        toggle.request_toggle();
        for step in 0..500 {
            let t = step as f64 * 0.037;
            toggle.update(0.037, t);
            assert!(toggle.parameter() >= toggle.lower_bound());
            assert!(toggle.parameter() <= toggle.upper_bound());
        }
    }

    #[test]
    fn test_open_door_moves_its_box() {
        let mut ctx = FrameLoopContext::new(&ViewerConfig::default());
        let closed = ctx.object_uniform(SceneObject::Door).model;
        ctx.handle_event(&press(Action::ToggleDoor));
        ctx.update(0.0);
        ctx.update(1.0);
        let open = ctx.object_uniform(SceneObject::Door).model;

        assert_ne!(closed, open);
        assert_eq!(
            ctx.object_uniform(SceneObject::Ground).model,
            FrameLoopContext::new(&ViewerConfig::default()).object_uniform(SceneObject::Ground).model
        );
    }

    #[test]
    fn test_escape_exits_loop() {
        let mut ctx = FrameLoopContext::new(&ViewerConfig::default());
        assert_eq!(ctx.update(0.0), LoopControl::Continue);
        ctx.handle_event(&press(Action::Quit));
        assert_eq!(ctx.update(0.1), LoopControl::Exit);
    }
}
