use glam::Vec3;

/// Sun-like light shining into the room.
pub const SUN_DIRECTION: Vec3 = Vec3::new(-0.2, -1.0, -0.3);
pub const SUN_AMBIENT: Vec3 = Vec3::new(0.704, 0.57, 0.475);
pub const SUN_DIFFUSE: Vec3 = Vec3::new(0.1, 0.1, 0.1);

/// Ceiling lamp above the sitting area.
pub const LAMP_POSITION: Vec3 = Vec3::new(-4.7, 2.9, -2.0);
pub const LAMP_ON_COLOR: Vec3 = Vec3::new(1.0, 1.0, 0.0);
/// The lamp's glow hangs this far below the fixture.
pub const LAMP_GLOW_DROP: f32 = 1.5;

/// Spotlight cone edges in degrees: full strength inside, dark outside.
pub const SPOT_INNER_CUTOFF: f32 = 30.5;
pub const SPOT_OUTER_CUTOFF: f32 = 45.0;

/// Constant, linear and quadratic falloff terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    pub const fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self { constant, linear, quadratic }
    }

    pub fn factor(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.constant, self.linear, self.quadratic]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub attenuation: Attenuation,
}

/// Cone light with a soft edge between the inner and outer cutoff angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub attenuation: Attenuation,
    /// Degrees from the axis.
    pub inner_cutoff: f32,
    pub outer_cutoff: f32,
}

impl SpotLight {
    /// Cosines of the inner and outer cutoffs, as the shader compares them.
    pub fn cutoff_cosines(&self) -> (f32, f32) {
        (self.inner_cutoff.to_radians().cos(), self.outer_cutoff.to_radians().cos())
    }

    /// Cone factor in [0, 1] for a point; 1 inside the inner cone, 0 outside the outer.
    pub fn cone_intensity(&self, point: Vec3) -> f32 {
        let (inner, outer) = self.cutoff_cosines();
        let to_point = (point - self.position).normalize_or_zero();
        let theta = to_point.dot(self.direction.normalize());
        ((theta - outer) / (inner - outer)).clamp(0.0, 1.0)
    }
}

/// Every light in the scene for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLights {
    pub sun: DirectionalLight,
    /// Porch light outside, lamp glow inside, distant sky light.
    pub points: [PointLight; 3],
    pub spot: SpotLight,
}

impl SceneLights {
    /// Lights with the lamp-driven ones following `lamp`.
    pub fn new(lamp: &LampSwitch) -> Self {
        let lamp_color = lamp.color();
        Self {
            sun: DirectionalLight {
                direction: SUN_DIRECTION.normalize(),
                ambient: SUN_AMBIENT,
                diffuse: SUN_DIFFUSE,
            },
            points: [
                PointLight {
                    position: Vec3::new(9.328, 3.656, -4.543),
                    ambient: Vec3::splat(0.01),
                    diffuse: Vec3::new(0.1, 0.1, 0.01),
                    attenuation: Attenuation::new(1.0, 0.9917, 3.16),
                },
                PointLight {
                    position: LAMP_POSITION - Vec3::Y * LAMP_GLOW_DROP,
                    ambient: Vec3::splat(0.05),
                    diffuse: lamp_color,
                    attenuation: Attenuation::new(1.0, 0.5, 0.5),
                },
                PointLight {
                    position: Vec3::new(1.767, 26.217, 0.018),
                    ambient: Vec3::splat(0.05),
                    diffuse: Vec3::ONE,
                    attenuation: Attenuation::new(1.0, 0.14, 0.07),
                },
            ],
            spot: SpotLight {
                position: LAMP_POSITION,
                direction: Vec3::NEG_Y,
                ambient: Vec3::splat(0.05),
                diffuse: lamp_color,
                attenuation: Attenuation::new(1.0, 0.09, 0.032),
                inner_cutoff: SPOT_INNER_CUTOFF,
                outer_cutoff: SPOT_OUTER_CUTOFF,
            },
        }
    }
}

/// The interior lamp. Unlike the furniture toggles it switches instantly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LampSwitch {
    on: bool,
}

impl LampSwitch {
    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn toggle(&mut self) {
        self.on = !self.on;
    }

    /// Light color the lamp contributes: yellow when on, black when off.
    pub fn color(&self) -> Vec3 {
        if self.on { LAMP_ON_COLOR } else { Vec3::ZERO }
    }
}
