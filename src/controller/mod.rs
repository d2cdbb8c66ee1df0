// CONTROLLER: Input, camera control and the per-frame update
pub mod input;
pub mod camera_controller;
pub mod scene_state;
pub mod frame_loop;

pub use input::{Action, InputEvent, InputProcessor, InputState, KeyBindings};
pub use camera_controller::{CameraController, CameraMovement};
pub use scene_state::{SceneState, Viewport};
pub use frame_loop::{
    CameraUniform, FrameLoopContext, LightingUniform, LoopControl, ObjectUniform, PointLightUniform, SpotLightUniform,
};
