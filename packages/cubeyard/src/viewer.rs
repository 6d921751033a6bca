//! The player's viewpoint and how it moves.

use cube_physics::{
    interaction::Viewpoint,
    util_vec::normalized_or_zero_2d,
};
use std::f32::consts::PI;
use vek::*;


/// Which movement intents are currently held.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// The player's camera and body.
///
/// Yaw zero faces -Z. Velocity is in the viewer's own frame: X is rightward, Z is backward, and
/// Y is world up.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub pos: Vec3<f32>,
    pub vel: Vec3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub can_jump: bool,
    pub eye_height: f32,
    // radians per look unit (pointer movement pixels, probably)
    pub look_sensitivity: f32,
}

impl Viewer {
    /// Horizontal velocity lost per second, as a fraction of itself.
    pub const DRAG: f32 = 10.0;
    /// Downward acceleration while airborne.
    pub const FALL_ACCEL: f32 = 98.0;
    /// Horizontal acceleration while walking.
    pub const WALK_ACCEL: f32 = 400.0;
    /// Default radians turned per look unit.
    pub const LOOK_SENSITIVITY: f32 = 0.002;
    /// Upward velocity a jump adds.
    pub const JUMP_VEL: f32 = 20.0;

    /// Standing on the floor at the origin, facing -Z.
    pub fn new(eye_height: f32) -> Self {
        Viewer {
            pos: Vec3::new(0.0, eye_height, 0.0),
            vel: Vec3::zero(),
            yaw: 0.0,
            pitch: 0.0,
            can_jump: true,
            eye_height,
            look_sensitivity: Self::LOOK_SENSITIVITY,
        }
    }

    /// Unit vector in the direction the viewer is facing.
    pub fn facing(&self) -> Vec3<f32> {
        Vec3::new(
            -self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
    }

    /// Unit vector forward along the floor.
    pub fn forward_xz(&self) -> Vec3<f32> {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Unit vector rightward along the floor.
    pub fn right_xz(&self) -> Vec3<f32> {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    pub fn viewpoint(&self) -> Viewpoint {
        Viewpoint::new(self.pos, self.facing())
    }

    /// Turn in response to pointer movement.
    pub fn on_look(&mut self, amount: Vec2<f32>) {
        self.pitch += -amount.y * self.look_sensitivity;
        self.pitch = self.pitch.clamp(-PI / 2.0, PI / 2.0);

        self.yaw += -amount.x * self.look_sensitivity;
        self.yaw %= PI * 2.0;
    }

    /// Jump, if standing on the floor.
    pub fn jump(&mut self) {
        if self.can_jump {
            self.vel.y += Self::JUMP_VEL;
            self.can_jump = false;
        }
    }

    /// Walk and fall for `elapsed` seconds.
    pub fn update(&mut self, keys: &MoveKeys, elapsed: f32) {
        self.vel.x -= self.vel.x * Self::DRAG * elapsed;
        self.vel.z -= self.vel.z * Self::DRAG * elapsed;
        self.vel.y -= Self::FALL_ACCEL * elapsed;

        // walk's <x,y> is the viewer's <right,forward>
        let walk = normalized_or_zero_2d(Vec2::new(
            keys.right as i32 as f32 - keys.left as i32 as f32,
            keys.forward as i32 as f32 - keys.backward as i32 as f32,
        ));
        if keys.forward || keys.backward {
            self.vel.z -= walk.y * Self::WALK_ACCEL * elapsed;
        }
        if keys.left || keys.right {
            self.vel.x -= walk.x * Self::WALK_ACCEL * elapsed;
        }

        self.pos += self.right_xz() * -self.vel.x * elapsed;
        self.pos += self.forward_xz() * -self.vel.z * elapsed;
        self.pos.y += self.vel.y * elapsed;

        if self.pos.y < self.eye_height {
            self.vel.y = 0.0;
            self.pos.y = self.eye_height;
            self.can_jump = true;
        }
    }
}


#[test]
fn test_facing_follows_yaw_and_pitch() {
    let mut viewer = Viewer::new(2.0);
    assert!((viewer.facing() - Vec3::new(0.0, 0.0, -1.0)).magnitude() < 1e-6);

    viewer.yaw = PI / 2.0;
    assert!((viewer.facing() - Vec3::new(-1.0, 0.0, 0.0)).magnitude() < 1e-6);

    viewer.on_look(Vec2::new(0.0, -1.0e6));
    assert_eq!(viewer.pitch, PI / 2.0);
    assert!((viewer.facing() - Vec3::unit_y()).magnitude() < 1e-6);
}

#[test]
fn test_walking_forward_moves_along_facing() {
    let mut viewer = Viewer::new(2.0);
    let keys = MoveKeys { forward: true, ..MoveKeys::default() };
    for _ in 0..60 {
        viewer.update(&keys, 1.0 / 60.0);
    }
    assert!(viewer.pos.z < -1.0);
    assert!(viewer.pos.x.abs() < 1e-4);
    assert_eq!(viewer.pos.y, 2.0);
}

#[test]
fn test_opposing_keys_cancel_without_nan() {
    let mut viewer = Viewer::new(2.0);
    let keys = MoveKeys {
        forward: true,
        backward: true,
        left: true,
        right: true,
    };
    for _ in 0..10 {
        viewer.update(&keys, 1.0 / 60.0);
    }
    assert!(viewer.pos.into_iter().all(f32::is_finite));
    assert!(viewer.vel.into_iter().all(f32::is_finite));
    assert_eq!(viewer.pos, Vec3::new(0.0, 2.0, 0.0));
}

#[test]
fn test_jump_and_land() {
    let mut viewer = Viewer::new(2.0);
    viewer.jump();
    assert!(!viewer.can_jump);
    viewer.jump();
    assert_eq!(viewer.vel.y, Viewer::JUMP_VEL);

    viewer.update(&MoveKeys::default(), 1.0 / 60.0);
    assert!(viewer.pos.y > 2.0);
    for _ in 0..120 {
        viewer.update(&MoveKeys::default(), 1.0 / 60.0);
    }
    assert_eq!(viewer.pos.y, 2.0);
    assert!(viewer.can_jump);
}
