use crate::config::ViewerConfig;
use crate::controller::input::{Action, InputEvent, InputProcessor, InputState};
use crate::controller::scene_state::SceneState;
use crate::model::lighting::{PointLight, SceneLights};
use crate::model::{FpsCounter, SceneObject};

/// Main loop state and per-frame update logic
pub struct FrameLoopContext {
    pub scene: SceneState,
    pub input: InputState,
    pub processor: InputProcessor,
    pub fps: FpsCounter,
}

/// Whether the loop should keep running after this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 3],
    /// Seconds since start, for vertex sway.
    pub time: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightUniform {
    pub position: [f32; 3],
    pub _pad0: f32,
    pub ambient: [f32; 3],
    pub _pad1: f32,
    pub diffuse: [f32; 3],
    pub _pad2: f32,
    pub attenuation: [f32; 3],
    pub _pad3: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpotLightUniform {
    pub position: [f32; 3],
    /// Cosine of the inner cutoff angle.
    pub inner_cos: f32,
    pub direction: [f32; 3],
    pub outer_cos: f32,
    pub ambient: [f32; 3],
    pub _pad0: f32,
    pub diffuse: [f32; 3],
    pub _pad1: f32,
    pub attenuation: [f32; 3],
    pub _pad2: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    pub sun_dir: [f32; 3],
    pub _pad0: f32,
    pub sun_ambient: [f32; 3],
    pub _pad1: f32,
    pub sun_diffuse: [f32; 3],
    pub _pad2: f32,
    pub points: [PointLightUniform; 3],
    pub spot: SpotLightUniform,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// Amplitude and angular speed of the vertex sway.
    pub sway: [f32; 2],
    pub _pad: [f32; 2],
}

impl From<&PointLight> for PointLightUniform {
    fn from(light: &PointLight) -> Self {
        Self {
            position: light.position.to_array(),
            _pad0: 0.0,
            ambient: light.ambient.to_array(),
            _pad1: 0.0,
            diffuse: light.diffuse.to_array(),
            _pad2: 0.0,
            attenuation: light.attenuation.to_array(),
            _pad3: 0.0,
        }
    }
}

impl FrameLoopContext {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            scene: SceneState::new(config),
            input: InputState::new(),
            processor: InputProcessor::new(config.bindings.clone()),
            fps: FpsCounter::default(),
        }
    }

    /// Feed one translated input event. Runs to completion before the next update.
    pub fn handle_event(&mut self, event: &InputEvent) {
        self.input.process_event(event);
    }

    /// Apply pending discrete actions, then advance the scene to `now` seconds.
    pub fn update(&mut self, now: f64) -> LoopControl {
        for action in self.input.drain_triggered() {
            if action == Action::Quit {
                tracing::info!("quit requested");
                return LoopControl::Exit;
            }
            self.scene.handle_action(action);
        }

        let dt = self.scene.update(&mut self.input, now);
        if let Some(fps) = self.fps.record(dt) {
            tracing::trace!(fps, "frame rate");
        }
        LoopControl::Continue
    }

    pub fn camera_uniform(&self) -> CameraUniform {
        let view_proj = self.scene.projection_matrix() * self.scene.view_matrix();
        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            eye: self.scene.camera.position.to_array(),
            time: self.scene.clock.current_time() as f32,
        }
    }

    pub fn lighting_uniform(&self) -> LightingUniform {
        let lights = SceneLights::new(&self.scene.lamp);
        let spot = &lights.spot;
        let (inner_cos, outer_cos) = spot.cutoff_cosines();
        LightingUniform {
            sun_dir: lights.sun.direction.to_array(),
            _pad0: 0.0,
            sun_ambient: lights.sun.ambient.to_array(),
            _pad1: 0.0,
            sun_diffuse: lights.sun.diffuse.to_array(),
            _pad2: 0.0,
            points: lights.points.each_ref().map(PointLightUniform::from),
            spot: SpotLightUniform {
                position: spot.position.to_array(),
                inner_cos,
                direction: spot.direction.normalize().to_array(),
                outer_cos,
                ambient: spot.ambient.to_array(),
                _pad0: 0.0,
                diffuse: spot.diffuse.to_array(),
                _pad1: 0.0,
                attenuation: spot.attenuation.to_array(),
                _pad2: 0.0,
            },
        }
    }

    pub fn object_uniform(&self, object: SceneObject) -> ObjectUniform {
        let (amplitude, speed) = object.sway();
        ObjectUniform {
            model: object.transform(&self.scene.animations, self.scene.view_matrix()).to_cols_array_2d(),
            color: object.color(),
            sway: [amplitude, speed],
            _pad: [0.0; 2],
        }
    }
}
