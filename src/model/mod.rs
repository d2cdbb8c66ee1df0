// MODEL: Scene data and pure state transitions
pub mod animation;
pub mod camera;
pub mod clock;
pub mod layout;
pub mod lighting;

pub use animation::{AnimatedObject, AnimationStrategy, AnimationToggle, Animations};
pub use camera::{Camera, PITCH_LIMIT};
pub use clock::{FpsCounter, FrameClock};
pub use layout::{billboard, SceneObject};
pub use lighting::{Attenuation, DirectionalLight, LampSwitch, PointLight, SceneLights, SpotLight};
