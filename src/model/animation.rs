//! Binary-toggle animations for the room's movable objects.
//!
//! Each object owns one [`AnimationToggle`]: an `enabled` flag flipped by the
//! user and a scalar `parameter` (an angle in degrees or an offset in world
//! units) that the renderer feeds into the object's transform.

/// Door swing when fully open, degrees.
pub const DOOR_OPEN_ANGLE: f32 = 90.0;
/// Door swing speed, degrees per second.
pub const DOOR_SWING_RATE: f32 = 100.0;
/// How far the drawer slides out, world units.
pub const DRAWER_TRAVEL: f32 = 0.487;
/// Drawer slide speed, world units per second.
pub const DRAWER_SLIDE_RATE: f32 = 4.0;
/// Rocking chair roll amplitude, degrees.
pub const CHAIR_ROCK_AMPLITUDE: f32 = 10.0;
/// Rocking chair angular speed, radians per second.
pub const CHAIR_ROCK_SPEED: f32 = 2.0;
/// Radio vibration amplitude, world units.
pub const RADIO_VIBRATION_AMPLITUDE: f32 = 0.01;
/// Radio vibration angular speed, radians per second.
pub const RADIO_VIBRATION_SPEED: f32 = 12.0;

/// How a toggle turns `enabled` into a parameter value over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationStrategy {
    /// Move toward `upper` at `rate` units/s while enabled, back toward
    /// `lower` while disabled. Toggling is refused mid-motion.
    EaseToBound { lower: f32, upper: f32, rate: f32 },
    /// `amplitude * sin(angular_speed * t)` while enabled (absolute value of
    /// the sine when `rectified`), snapped to 0 while disabled.
    Oscillate { amplitude: f32, angular_speed: f32, rectified: bool },
}

impl AnimationStrategy {
    pub fn bounds(&self) -> (f32, f32) {
        match *self {
            AnimationStrategy::EaseToBound { lower, upper, .. } => (lower, upper),
            AnimationStrategy::Oscillate { amplitude, rectified, .. } => {
                let a = amplitude.abs();
                if rectified { (0.0, a) } else { (-a, a) }
            }
        }
    }

    /// Parameter value while the toggle has never been enabled.
    pub fn rest_value(&self) -> f32 {
        match *self {
            AnimationStrategy::EaseToBound { lower, .. } => lower,
            AnimationStrategy::Oscillate { .. } => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationToggle {
    enabled: bool,
    parameter: f32,
    strategy: AnimationStrategy,
}

impl AnimationToggle {
    pub fn new(strategy: AnimationStrategy) -> Self {
        Self {
            enabled: false,
            parameter: strategy.rest_value(),
            strategy,
        }
    }

    pub fn ease_to_bound(lower: f32, upper: f32, rate: f32) -> Self {
        Self::new(AnimationStrategy::EaseToBound { lower, upper, rate })
    }

    pub fn oscillate(amplitude: f32, angular_speed: f32, rectified: bool) -> Self {
        Self::new(AnimationStrategy::Oscillate { amplitude, angular_speed, rectified })
    }

    pub fn enabled(&self) -> bool { self.enabled }
    pub fn parameter(&self) -> f32 { self.parameter }
    pub fn strategy(&self) -> AnimationStrategy { self.strategy }
    pub fn lower_bound(&self) -> f32 { self.strategy.bounds().0 }
    pub fn upper_bound(&self) -> f32 { self.strategy.bounds().1 }

    /// Whether a flip request would be honored right now.
    ///
    /// Ease-to-bound toggles accept a flip only when the parameter touches
    /// either bound, so a half-open door finishes its swing before it can
    /// reverse. The comparison is exact: no tolerance window near the bounds.
    pub fn can_toggle(&self) -> bool {
        match self.strategy {
            AnimationStrategy::EaseToBound { lower, upper, .. } => {
                self.parameter >= upper || self.parameter <= lower
            }
            AnimationStrategy::Oscillate { .. } => true,
        }
    }

    /// Flip `enabled` if allowed. Returns whether it flipped.
    pub fn request_toggle(&mut self) -> bool {
        if !self.can_toggle() {
            return false;
        }
        self.enabled = !self.enabled;
        true
    }

    /// Advance by `dt` seconds; `time` is absolute seconds for oscillators.
    pub fn update(&mut self, dt: f32, time: f64) {
        let (lower, upper) = self.strategy.bounds();
        self.parameter = match self.strategy {
            AnimationStrategy::EaseToBound { rate, .. } => {
                let step = rate * dt;
                let target = if self.enabled {
                    (self.parameter + step).min(upper)
                } else {
                    (self.parameter - step).max(lower)
                };
                target.clamp(lower, upper)
            }
            AnimationStrategy::Oscillate { amplitude, angular_speed, rectified } => {
                let value = if self.enabled {
                    let wave = (angular_speed as f64 * time).sin();
                    let wave = if rectified { wave.abs() } else { wave };
                    (amplitude.abs() as f64 * wave) as f32
                } else {
                    0.0
                };
                value.clamp(lower, upper)
            }
        };
    }

    /// Fraction of the way from lower to upper bound, for display.
    pub fn progress(&self) -> f32 {
        let (lower, upper) = self.strategy.bounds();
        if upper > lower {
            (self.parameter - lower) / (upper - lower)
        } else {
            0.0
        }
    }
}

/// The objects in the room that carry a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatedObject {
    Door,
    Drawer,
    RockingChair,
    Radio,
}

impl AnimatedObject {
    pub const ALL: [AnimatedObject; 4] = [
        AnimatedObject::Door,
        AnimatedObject::Drawer,
        AnimatedObject::RockingChair,
        AnimatedObject::Radio,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AnimatedObject::Door => "Door",
            AnimatedObject::Drawer => "Drawer",
            AnimatedObject::RockingChair => "Rocking chair",
            AnimatedObject::Radio => "Radio",
        }
    }

    pub fn default_toggle(self) -> AnimationToggle {
        match self {
            AnimatedObject::Door => AnimationToggle::ease_to_bound(0.0, DOOR_OPEN_ANGLE, DOOR_SWING_RATE),
            AnimatedObject::Drawer => AnimationToggle::ease_to_bound(0.0, DRAWER_TRAVEL, DRAWER_SLIDE_RATE),
            AnimatedObject::RockingChair => {
                AnimationToggle::oscillate(CHAIR_ROCK_AMPLITUDE, CHAIR_ROCK_SPEED, false)
            }
            AnimatedObject::Radio => {
                AnimationToggle::oscillate(RADIO_VIBRATION_AMPLITUDE, RADIO_VIBRATION_SPEED, true)
            }
        }
    }
}

/// One toggle per [`AnimatedObject`].
#[derive(Debug, Clone)]
pub struct Animations {
    door: AnimationToggle,
    drawer: AnimationToggle,
    rocking_chair: AnimationToggle,
    radio: AnimationToggle,
}

impl Default for Animations {
    fn default() -> Self {
        Self {
            door: AnimatedObject::Door.default_toggle(),
            drawer: AnimatedObject::Drawer.default_toggle(),
            rocking_chair: AnimatedObject::RockingChair.default_toggle(),
            radio: AnimatedObject::Radio.default_toggle(),
        }
    }
}

impl Animations {
    pub fn get(&self, object: AnimatedObject) -> &AnimationToggle {
        match object {
            AnimatedObject::Door => &self.door,
            AnimatedObject::Drawer => &self.drawer,
            AnimatedObject::RockingChair => &self.rocking_chair,
            AnimatedObject::Radio => &self.radio,
        }
    }

    pub fn get_mut(&mut self, object: AnimatedObject) -> &mut AnimationToggle {
        match object {
            AnimatedObject::Door => &mut self.door,
            AnimatedObject::Drawer => &mut self.drawer,
            AnimatedObject::RockingChair => &mut self.rocking_chair,
            AnimatedObject::Radio => &mut self.radio,
        }
    }

    pub fn parameter(&self, object: AnimatedObject) -> f32 {
        self.get(object).parameter()
    }

    pub fn update(&mut self, dt: f32, time: f64) {
        for object in AnimatedObject::ALL {
            self.get_mut(object).update(dt, time);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnimatedObject, &AnimationToggle)> + '_ {
        AnimatedObject::ALL.into_iter().map(move |object| (object, self.get(object)))
    }
}
