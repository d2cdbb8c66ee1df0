//! Where every object in the room sits, as a model matrix for a unit box.
//!
//! The imported meshes of the furnished room are replaced by flat-colored
//! proxy boxes; animated objects read their toggle parameter from
//! [`Animations`] to build their transform. The chimney smoke is a
//! billboard that turns to face the camera every frame.

use glam::{Mat3, Mat4, Vec3};

use super::animation::{AnimatedObject, Animations};
use super::lighting::LAMP_POSITION;

/// Hinge line of the front door (bottom corner on the wall plane).
pub const DOOR_HINGE: Vec3 = Vec3::new(1.5, 0.0, -0.5);
pub const DOOR_SIZE: Vec3 = Vec3::new(0.08, 2.2, 1.0);

const NIGHTSTAND_CENTER: Vec3 = Vec3::new(-8.1, 0.3, -3.0);
const DRAWER_REST_CENTER: Vec3 = Vec3::new(-8.04, 0.45, -3.0);
const RADIO_REST_CENTER: Vec3 = Vec3::new(-3.5, 0.2, -2.5);
const ROCKING_CHAIR_BASE: Vec3 = Vec3::new(-7.0, 0.0, 0.8);

pub const SMOKE_POSITION: Vec3 = Vec3::new(-2.9, 3.0, -2.0);
pub const SMOKE_SCALE: Vec3 = Vec3::new(0.534, 0.7, 0.333);
/// Horizontal drift of the smoke's top edge, world units.
pub const SMOKE_SWAY_AMPLITUDE: f32 = 0.15;
/// Radians per second of the smoke drift.
pub const SMOKE_SWAY_SPEED: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneObject {
    Ground,
    BackWall,
    LeftWall,
    RightWall,
    FrontWallLeft,
    FrontWallRight,
    Lintel,
    Roof,
    Door,
    Nightstand,
    Drawer,
    Lamp,
    Armchair,
    Piano,
    Shelf,
    Radio,
    Phonograph,
    RockingChair,
    Sword,
    Fireplace,
    Bookcase,
    Smoke,
}

impl SceneObject {
    pub const ALL: [SceneObject; 22] = [
        SceneObject::Ground,
        SceneObject::BackWall,
        SceneObject::LeftWall,
        SceneObject::RightWall,
        SceneObject::FrontWallLeft,
        SceneObject::FrontWallRight,
        SceneObject::Lintel,
        SceneObject::Roof,
        SceneObject::Door,
        SceneObject::Nightstand,
        SceneObject::Drawer,
        SceneObject::Lamp,
        SceneObject::Armchair,
        SceneObject::Piano,
        SceneObject::Shelf,
        SceneObject::Radio,
        SceneObject::Phonograph,
        SceneObject::RockingChair,
        SceneObject::Sword,
        SceneObject::Fireplace,
        SceneObject::Bookcase,
        SceneObject::Smoke,
    ];

    /// The toggle driving this object, if any.
    pub fn animated(self) -> Option<AnimatedObject> {
        match self {
            SceneObject::Door => Some(AnimatedObject::Door),
            SceneObject::Drawer => Some(AnimatedObject::Drawer),
            SceneObject::RockingChair => Some(AnimatedObject::RockingChair),
            SceneObject::Radio => Some(AnimatedObject::Radio),
            _ => None,
        }
    }

    pub fn color(self) -> [f32; 4] {
        match self {
            SceneObject::Ground => [0.28, 0.45, 0.22, 1.0],
            SceneObject::BackWall
            | SceneObject::LeftWall
            | SceneObject::RightWall
            | SceneObject::FrontWallLeft
            | SceneObject::FrontWallRight
            | SceneObject::Lintel => [0.92, 0.86, 0.74, 1.0],
            SceneObject::Roof => [0.55, 0.18, 0.14, 1.0],
            SceneObject::Door => [0.45, 0.27, 0.12, 1.0],
            SceneObject::Nightstand | SceneObject::Drawer => [0.619, 0.313, 0.0, 1.0],
            SceneObject::Lamp => [1.0, 1.0, 0.0, 1.0],
            SceneObject::Armchair => [0.62, 0.12, 0.15, 1.0],
            SceneObject::Piano => [0.08, 0.08, 0.08, 1.0],
            SceneObject::Shelf | SceneObject::Bookcase => [0.5, 0.33, 0.18, 1.0],
            SceneObject::Radio => [0.36, 0.22, 0.1, 1.0],
            SceneObject::Phonograph => [0.78, 0.62, 0.2, 1.0],
            SceneObject::RockingChair => [0.6, 0.42, 0.25, 1.0],
            SceneObject::Sword => [0.75, 0.75, 0.8, 1.0],
            SceneObject::Fireplace => [0.4, 0.38, 0.36, 1.0],
            SceneObject::Smoke => [0.85, 0.85, 0.85, 0.35],
        }
    }

    /// Blended objects are drawn after every opaque one, without depth writes.
    pub fn is_translucent(self) -> bool {
        self.color()[3] < 1.0
    }

    /// Vertex sway as `(amplitude, angular_speed)`; zero for rigid objects.
    pub fn sway(self) -> (f32, f32) {
        match self {
            SceneObject::Smoke => (SMOKE_SWAY_AMPLITUDE, SMOKE_SWAY_SPEED),
            _ => (0.0, 0.0),
        }
    }

    /// Every object, opaque ones first.
    pub fn draw_order() -> Vec<SceneObject> {
        let (mut ordered, translucent): (Vec<_>, Vec<_>) =
            SceneObject::ALL.into_iter().partition(|object| !object.is_translucent());
        ordered.extend(translucent);
        ordered
    }

    /// Model matrix mapping the unit box (centered at the origin) onto this
    /// object. `view` orients camera-facing objects.
    pub fn transform(self, animations: &Animations, view: Mat4) -> Mat4 {
        match self {
            SceneObject::Smoke => billboard(view, SMOKE_POSITION, SMOKE_SCALE),
            SceneObject::Door => door_transform(animations.parameter(AnimatedObject::Door)),
            SceneObject::Drawer => {
                let offset = animations.parameter(AnimatedObject::Drawer);
                boxed(DRAWER_REST_CENTER + Vec3::X * offset, Vec3::new(0.45, 0.15, 0.4))
            }
            SceneObject::Radio => {
                let offset = animations.parameter(AnimatedObject::Radio);
                boxed(RADIO_REST_CENTER + Vec3::X * offset, Vec3::new(0.4, 0.4, 0.25))
            }
            SceneObject::RockingChair => {
                let roll = animations.parameter(AnimatedObject::RockingChair);
                Mat4::from_translation(ROCKING_CHAIR_BASE)
                    * Mat4::from_rotation_z(roll.to_radians())
                    * boxed(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.6, 1.0, 0.6))
            }
            _ => {
                let (center, size) = self.static_placement();
                boxed(center, size)
            }
        }
    }

    fn static_placement(self) -> (Vec3, Vec3) {
        match self {
            SceneObject::Ground => (Vec3::new(0.0, -0.05, 0.0), Vec3::new(40.0, 0.1, 40.0)),
            SceneObject::BackWall => (Vec3::new(-8.5, 1.5, 0.0), Vec3::new(0.1, 3.0, 8.0)),
            SceneObject::LeftWall => (Vec3::new(-3.5, 1.5, -4.0), Vec3::new(10.0, 3.0, 0.1)),
            SceneObject::RightWall => (Vec3::new(-3.5, 1.5, 4.0), Vec3::new(10.0, 3.0, 0.1)),
            SceneObject::FrontWallLeft => (Vec3::new(1.5, 1.5, -2.25), Vec3::new(0.1, 3.0, 3.5)),
            SceneObject::FrontWallRight => (Vec3::new(1.5, 1.5, 2.25), Vec3::new(0.1, 3.0, 3.5)),
            SceneObject::Lintel => (Vec3::new(1.5, 2.6, 0.0), Vec3::new(0.1, 0.8, 1.0)),
            SceneObject::Roof => (Vec3::new(-3.5, 3.05, 0.0), Vec3::new(10.2, 0.1, 8.2)),
            SceneObject::Nightstand => (NIGHTSTAND_CENTER, Vec3::new(0.5, 0.6, 0.5)),
            SceneObject::Lamp => (LAMP_POSITION, Vec3::splat(0.25)),
            SceneObject::Armchair => (Vec3::new(0.2, 0.4, -2.9), Vec3::new(0.9, 0.8, 0.9)),
            SceneObject::Piano => (Vec3::new(-3.5, 0.6, 3.4), Vec3::new(1.5, 1.2, 0.6)),
            SceneObject::Shelf => (Vec3::new(-3.5, 0.9, -3.7), Vec3::new(1.2, 1.8, 0.4)),
            SceneObject::Phonograph => (Vec3::new(-4.6, 0.75, 3.0), Vec3::splat(0.5)),
            SceneObject::Sword => (Vec3::new(-4.11, 1.5, 0.1), Vec3::new(0.05, 1.0, 0.1)),
            SceneObject::Fireplace => (Vec3::new(-4.0, 0.6, 1.0), Vec3::new(1.0, 1.2, 0.5)),
            SceneObject::Bookcase => (Vec3::new(-6.0, 1.0, -0.5), Vec3::new(0.4, 2.0, 1.2)),
            // Animated objects never reach here
            SceneObject::Door
            | SceneObject::Drawer
            | SceneObject::Radio
            | SceneObject::RockingChair
            | SceneObject::Smoke => (Vec3::ZERO, Vec3::ONE),
        }
    }
}

/// Door panel swung inward about its hinge by `angle` degrees.
pub fn door_transform(angle: f32) -> Mat4 {
    Mat4::from_translation(DOOR_HINGE)
        * Mat4::from_rotation_y(-angle.to_radians())
        * boxed(Vec3::new(0.0, DOOR_SIZE.y * 0.5, DOOR_SIZE.z * 0.5), DOOR_SIZE)
}

/// Model matrix at `position` whose rotation undoes the camera's, so the
/// object's local +Z always points back at the eye.
pub fn billboard(view: Mat4, position: Vec3, scale: Vec3) -> Mat4 {
    let facing = Mat3::from_mat4(view).transpose();
    Mat4::from_translation(position) * Mat4::from_mat3(facing) * Mat4::from_scale(scale)
}

fn boxed(center: Vec3, size: Vec3) -> Mat4 {
    Mat4::from_translation(center) * Mat4::from_scale(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn closed_door_fills_doorway() {
        let center = door_transform(0.0).transform_point3(Vec3::ZERO);
        assert!(close(center, Vec3::new(1.5, 1.1, 0.0)));
    }

    #[test]
    fn open_door_swings_inward() {
        let center = door_transform(90.0).transform_point3(Vec3::ZERO);
        assert!(close(center, Vec3::new(1.0, 1.1, -0.5)));
    }

    #[test]
    fn drawer_follows_its_parameter() {
        let mut animations = Animations::default();
        let closed = SceneObject::Drawer.transform(&animations, Mat4::IDENTITY).transform_point3(Vec3::ZERO);
        animations.get_mut(AnimatedObject::Drawer).request_toggle();
        animations.update(10.0, 0.0);
        let open = SceneObject::Drawer.transform(&animations, Mat4::IDENTITY).transform_point3(Vec3::ZERO);
        assert!(close(open - closed, Vec3::new(0.487, 0.0, 0.0)));
    }

    #[test]
    fn resting_chair_is_upright() {
        let animations = Animations::default();
        let top = SceneObject::RockingChair.transform(&animations, Mat4::IDENTITY).transform_point3(Vec3::new(0.0, 0.5, 0.0));
        assert!(close(top, ROCKING_CHAIR_BASE + Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn smoke_faces_the_eye() {
        use crate::model::Camera;

        let animations = Animations::default();
        for (eye, yaw, pitch) in [
            (Vec3::new(10.0, 3.0, 0.0), 180.0, -10.0),
            (Vec3::new(-2.0, 1.7, 2.5), 250.0, 30.0),
            (Vec3::new(-6.0, 5.0, -6.0), 45.0, -60.0),
        ] {
            let camera = Camera::new(eye, Vec3::Y, yaw, pitch);
            let model = SceneObject::Smoke.transform(&animations, camera.view_matrix());

            assert!(close(model.transform_point3(Vec3::ZERO), SMOKE_POSITION));
            let facing = model.transform_vector3(Vec3::Z).normalize();
            assert!(close(facing, -camera.front()));
            let up = model.transform_vector3(Vec3::Y).normalize();
            assert!(close(up, camera.up()));
        }
    }

    #[test]
    fn billboard_keeps_its_scale() {
        let view = Mat4::look_at_rh(Vec3::new(3.0, 2.0, 1.0), Vec3::ZERO, Vec3::Y);
        let model = billboard(view, Vec3::ZERO, SMOKE_SCALE);
        assert!((model.transform_vector3(Vec3::X).length() - SMOKE_SCALE.x).abs() < 1e-5);
        assert!((model.transform_vector3(Vec3::Y).length() - SMOKE_SCALE.y).abs() < 1e-5);
    }

    #[test]
    fn translucent_objects_draw_last() {
        let order = SceneObject::draw_order();
        assert_eq!(order.len(), SceneObject::ALL.len());
        let first_translucent = order.iter().position(|o| o.is_translucent()).expect("smoke is translucent");
        assert!(order[first_translucent..].iter().all(|o| o.is_translucent()));
        assert!(!SceneObject::Lamp.is_translucent());
        assert_eq!(order.last(), Some(&SceneObject::Smoke));
    }

    #[test]
    fn every_animated_object_has_a_scene_object() {
        for animated in AnimatedObject::ALL {
            assert!(SceneObject::ALL.iter().any(|o| o.animated() == Some(animated)));
        }
    }
}
