use std::env;
use std::str::FromStr;

use glam::Vec3;

use crate::controller::KeyBindings;

/// Everything the viewer needs to know before the first frame.
#[derive(Clone)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub bindings: KeyBindings,
}

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "roomview".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Starting pose and tuning of the first-person camera. Angles in degrees.
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    pub position: Vec3,
    pub world_up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            // Outside the front door, looking back toward the house
            position: Vec3::new(10.0, 3.0, 0.0),
            world_up: Vec3::Y,
            yaw: 180.0,
            pitch: -10.0,
            zoom: 45.0,
            movement_speed: 5.0,
            mouse_sensitivity: 0.25,
            z_near: 0.1,
            z_far: 1000.0,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            bindings: KeyBindings::default(),
        }
    }
}

impl ViewerConfig {
    /// Defaults with `ROOMVIEW_WIDTH` / `ROOMVIEW_HEIGHT` applied when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(width) = env_override::<u32>("ROOMVIEW_WIDTH") {
            config.window.width = width;
        }
        if let Some(height) = env_override::<u32>("ROOMVIEW_HEIGHT") {
            config.window.height = height;
        }
        config
    }
}

fn env_override<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    parse_override(key, &raw)
}

fn parse_override<T: FromStr>(key: &str, raw: &str) -> Option<T> {
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = raw, "ignoring unparsable override");
            None
        }
    }
}
