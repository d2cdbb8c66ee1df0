//! Keyboard and pointer input, mapped from physical keys to logical actions
use std::collections::HashMap;

use winit::event::{DeviceEvent, ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::controller::camera_controller::CameraMovement;
use crate::model::AnimatedObject;

/// What a bound key means to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    ToggleDoor,
    ToggleDrawer,
    ToggleLamp,
    ToggleRockingChair,
    ToggleRadio,
    Quit,
}

impl Action {
    pub fn movement(self) -> Option<CameraMovement> {
        match self {
            Action::MoveForward => Some(CameraMovement::Forward),
            Action::MoveBackward => Some(CameraMovement::Backward),
            Action::MoveLeft => Some(CameraMovement::Left),
            Action::MoveRight => Some(CameraMovement::Right),
            _ => None,
        }
    }

    pub fn animated_object(self) -> Option<AnimatedObject> {
        match self {
            Action::ToggleDoor => Some(AnimatedObject::Door),
            Action::ToggleDrawer => Some(AnimatedObject::Drawer),
            Action::ToggleRockingChair => Some(AnimatedObject::RockingChair),
            Action::ToggleRadio => Some(AnimatedObject::Radio),
            _ => None,
        }
    }
}

/// Platform-independent input events
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A bound key went down or up. `key` is the physical key, so two keys
    /// bound to one action are tracked separately.
    Action { action: Action, key: KeyCode, pressed: bool, repeat: bool },
    /// Absolute pointer position in window pixels.
    CursorMoved { x: f64, y: f64 },
    /// Raw relative pointer motion, unbounded by the window edges.
    MouseMotion { dx: f64, dy: f64 },
    /// The window grabbed or released the pointer.
    PointerCapture { captured: bool },
    FocusLost,
}

/// Input as seen by the frame loop: held keys, pending look delta and
/// the actions freshly pressed since the last frame.
#[derive(Debug)]
pub struct InputState {
    held: HashMap<KeyCode, Action>,
    triggered: Vec<Action>,
    cursor: (f32, f32),
    first_sample: bool,
    pointer_captured: bool,
    look_delta: (f32, f32),
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashMap::new(),
            triggered: Vec::new(),
            cursor: (0.0, 0.0),
            first_sample: true,
            pointer_captured: false,
            look_delta: (0.0, 0.0),
        }
    }

    pub fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::Action { action, key, pressed: true, repeat } => {
                self.held.insert(key, action);
                if !repeat {
                    self.triggered.push(action);
                }
            }
            InputEvent::Action { key, pressed: false, .. } => {
                self.held.remove(&key);
            }
            InputEvent::CursorMoved { x, y } => {
                // A captured pointer looks through raw motion instead
                if let Some((dx, dy)) = self.cursor_moved(x as f32, y as f32) {
                    if !self.pointer_captured {
                        self.add_look(dx, dy);
                    }
                }
            }
            InputEvent::MouseMotion { dx, dy } => {
                if self.pointer_captured {
                    self.add_look(dx as f32, -dy as f32);
                }
            }
            InputEvent::PointerCapture { captured } => {
                if captured != self.pointer_captured {
                    self.pointer_captured = captured;
                    self.first_sample = true;
                }
            }
            InputEvent::FocusLost => {
                self.clear_keys();
                // The pointer may come back anywhere
                self.first_sample = true;
            }
        }
    }

    /// Record a pointer sample and return `(x_offset, y_offset)` since the
    /// previous one. The very first sample only seeds the baseline.
    ///
    /// The y offset is inverted: screen y grows downward, pitch grows upward.
    pub fn cursor_moved(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        if self.first_sample {
            self.cursor = (x, y);
            self.first_sample = false;
            return None;
        }
        let offset = (x - self.cursor.0, self.cursor.1 - y);
        self.cursor = (x, y);
        Some(offset)
    }

    fn add_look(&mut self, dx: f32, dy: f32) {
        self.look_delta.0 += dx;
        self.look_delta.1 += dy;
    }

    /// Whether any key bound to `action` is currently down.
    pub fn is_pressed(&self, action: Action) -> bool {
        self.held.values().any(|&held| held == action)
    }

    pub fn is_first_sample(&self) -> bool {
        self.first_sample
    }

    pub fn is_pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    pub fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    pub fn clear_keys(&mut self) {
        self.held.clear();
    }

    pub fn consume_look(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.look_delta)
    }

    /// Actions pressed since the last call, in arrival order.
    pub fn drain_triggered(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.triggered)
    }
}

/// Key mapping configuration
#[derive(Debug, Clone)]
pub struct KeyBindings {
    keys: HashMap<KeyCode, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let keys = [
            (KeyCode::KeyW, Action::MoveForward),
            (KeyCode::ArrowUp, Action::MoveForward),
            (KeyCode::KeyS, Action::MoveBackward),
            (KeyCode::ArrowDown, Action::MoveBackward),
            (KeyCode::KeyA, Action::MoveLeft),
            (KeyCode::ArrowLeft, Action::MoveLeft),
            (KeyCode::KeyD, Action::MoveRight),
            (KeyCode::ArrowRight, Action::MoveRight),
            (KeyCode::Digit1, Action::ToggleDoor),
            (KeyCode::Digit2, Action::ToggleDrawer),
            (KeyCode::Digit3, Action::ToggleLamp),
            (KeyCode::Digit4, Action::ToggleRockingChair),
            (KeyCode::Digit5, Action::ToggleRadio),
            (KeyCode::Escape, Action::Quit),
        ];
        Self { keys: keys.into_iter().collect() }
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self { keys: HashMap::new() }
    }

    pub fn bind(&mut self, code: KeyCode, action: Action) {
        self.keys.insert(code, action);
    }

    pub fn action_for(&self, code: KeyCode) -> Option<Action> {
        self.keys.get(&code).copied()
    }

    /// Keys bound to `action`, for the help overlay.
    pub fn keys_for(&self, action: Action) -> Vec<KeyCode> {
        let mut keys: Vec<KeyCode> = self
            .keys
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(code, _)| *code)
            .collect();
        keys.sort_by_key(|code| format!("{code:?}"));
        keys
    }
}

/// Translates winit window events into [`InputEvent`]s through the bindings.
#[derive(Debug, Clone)]
pub struct InputProcessor {
    bindings: KeyBindings,
}

impl InputProcessor {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Unbound keys yield `None` and are never seen by the frame loop.
    pub fn translate_key(&self, code: KeyCode, state: ElementState, repeat: bool) -> Option<InputEvent> {
        let action = self.bindings.action_for(code)?;
        Some(InputEvent::Action {
            action,
            key: code,
            pressed: state == ElementState::Pressed,
            repeat,
        })
    }

    pub fn translate(&self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(code) => self.translate_key(code, event.state, event.repeat),
                PhysicalKey::Unidentified(_) => None,
            },
            WindowEvent::CursorMoved { position, .. } => {
                Some(InputEvent::CursorMoved { x: position.x, y: position.y })
            }
            WindowEvent::Focused(false) => Some(InputEvent::FocusLost),
            _ => None,
        }
    }

    pub fn translate_device(&self, event: &DeviceEvent) -> Option<InputEvent> {
        match event {
            DeviceEvent::MouseMotion { delta: (dx, dy) } => Some(InputEvent::MouseMotion { dx: *dx, dy: *dy }),
            _ => None,
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(key: KeyCode, pressed: bool) -> InputEvent {
        let action = KeyBindings::default().action_for(key).expect("bound key");
        InputEvent::Action { action, key, pressed, repeat: false }
    }

    #[test]
    fn first_cursor_sample_seeds_baseline() {
        let mut input = InputState::new();
        assert!(input.is_first_sample());
        assert_eq!(input.cursor_moved(640.0, 360.0), None);
        assert!(!input.is_first_sample());
        assert_eq!(input.cursor_moved(650.0, 350.0), Some((10.0, 10.0)));
        assert_eq!(input.cursor(), (650.0, 350.0));
    }

    #[test]
    fn cursor_events_accumulate_look() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::CursorMoved { x: 1000.0, y: 1000.0 });
        assert_eq!(input.consume_look(), (0.0, 0.0));
        input.process_event(&InputEvent::CursorMoved { x: 1003.0, y: 1000.0 });
        input.process_event(&InputEvent::CursorMoved { x: 1005.0, y: 998.0 });
        assert_eq!(input.consume_look(), (5.0, 2.0));
        assert_eq!(input.consume_look(), (0.0, 0.0));
    }

    #[test]
    fn held_and_triggered_actions() {
        let mut input = InputState::new();
        input.process_event(&key_event(KeyCode::KeyW, true));
        input.process_event(&InputEvent::Action {
            action: Action::MoveForward,
            key: KeyCode::KeyW,
            pressed: true,
            repeat: true,
        });
        assert!(input.is_pressed(Action::MoveForward));
        assert_eq!(input.drain_triggered(), vec![Action::MoveForward]);
        assert!(input.drain_triggered().is_empty());

        input.process_event(&key_event(KeyCode::KeyW, false));
        assert!(!input.is_pressed(Action::MoveForward));
    }

    #[test]
    fn releasing_one_of_two_keys_keeps_action_held() {
        let mut input = InputState::new();
        input.process_event(&key_event(KeyCode::KeyW, true));
        input.process_event(&key_event(KeyCode::ArrowUp, true));
        input.process_event(&key_event(KeyCode::ArrowUp, false));
        assert!(input.is_pressed(Action::MoveForward));

        input.process_event(&key_event(KeyCode::KeyW, false));
        assert!(!input.is_pressed(Action::MoveForward));
    }

    #[test]
    fn focus_loss_releases_keys_and_resets_pointer() {
        let mut input = InputState::new();
        input.process_event(&key_event(KeyCode::KeyA, true));
        input.process_event(&key_event(KeyCode::ArrowLeft, true));
        input.cursor_moved(1.0, 1.0);
        input.process_event(&InputEvent::FocusLost);
        assert!(!input.is_pressed(Action::MoveLeft));
        assert!(input.is_first_sample());
    }

    #[test]
    fn captured_pointer_looks_with_raw_motion() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::PointerCapture { captured: true });
        assert!(input.is_pointer_captured());

        // Pinned against the window edge: position stops changing
        input.process_event(&InputEvent::CursorMoved { x: 1279.0, y: 300.0 });
        input.process_event(&InputEvent::CursorMoved { x: 1279.0, y: 300.0 });
        for _ in 0..3 {
            input.process_event(&InputEvent::MouseMotion { dx: 15.0, dy: 4.0 });
        }
        assert_eq!(input.consume_look(), (45.0, -12.0));
    }

    #[test]
    fn free_pointer_ignores_raw_motion() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::MouseMotion { dx: 50.0, dy: 50.0 });
        assert_eq!(input.consume_look(), (0.0, 0.0));

        input.process_event(&InputEvent::CursorMoved { x: 10.0, y: 10.0 });
        input.process_event(&InputEvent::CursorMoved { x: 20.0, y: 10.0 });
        assert_eq!(input.consume_look(), (10.0, 0.0));
    }

    #[test]
    fn capture_change_reseeds_cursor() {
        let mut input = InputState::new();
        input.cursor_moved(5.0, 5.0);
        input.process_event(&InputEvent::PointerCapture { captured: true });
        assert!(input.is_first_sample());
        input.process_event(&InputEvent::PointerCapture { captured: false });
        input.process_event(&InputEvent::CursorMoved { x: 900.0, y: 900.0 });
        assert_eq!(input.consume_look(), (0.0, 0.0));
    }

    #[test]
    fn unbound_keys_are_dropped() {
        let processor = InputProcessor::default();
        assert_eq!(processor.translate_key(KeyCode::KeyZ, ElementState::Pressed, false), None);
        assert_eq!(
            processor.translate_key(KeyCode::Digit1, ElementState::Pressed, false),
            Some(key_event(KeyCode::Digit1, true))
        );
    }

    #[test]
    fn mouse_motion_is_translated() {
        let processor = InputProcessor::default();
        let event = DeviceEvent::MouseMotion { delta: (3.0, -2.0) };
        assert_eq!(processor.translate_device(&event), Some(InputEvent::MouseMotion { dx: 3.0, dy: -2.0 }));
    }

    #[test]
    fn arrows_and_wasd_share_actions() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.keys_for(Action::MoveForward).len(), 2);
        assert_eq!(bindings.action_for(KeyCode::ArrowLeft), Some(Action::MoveLeft));
    }

    #[test]
    fn custom_binding() {
        let mut bindings = KeyBindings::empty();
        bindings.bind(KeyCode::KeyO, Action::ToggleDoor);
        assert_eq!(bindings.action_for(KeyCode::KeyO), Some(Action::ToggleDoor));
        assert_eq!(bindings.action_for(KeyCode::Digit1), None);
    }
}
