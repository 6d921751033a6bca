//! Simulated cube bodies.

use std::f32::consts::PI;
use rand::Rng;
use vek::*;


/// Half the side length of every cube. Collision always uses this, never the current scale.
pub const HALF_EXTENT: f32 = 0.5;

/// Side length of every cube.
pub const CUBE_SIZE: f32 = HALF_EXTENT * 2.0;


/// Stable handle to a body in a `BodyRegistry`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BodyId(pub usize);

/// A simulated cube.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Center position, world space.
    pub pos: Vec3<f32>,
    /// Accumulated Euler rotation in radians.
    pub rot: Vec3<f32>,
    /// Cosmetic non-uniform scale, rederived every tick from the squash state.
    pub scale: Vec3<f32>,
    /// Linear velocity, units per second.
    pub vel: Vec3<f32>,
    /// Angular velocity about each Euler axis, radians per second.
    pub ang_vel: Vec3<f32>,
    /// Squash-stretch animation state.
    pub squash: Squash,
    /// Visual material colour.
    pub color: Rgb<f32>,
    /// Whether the viewer may pick this body up.
    pub pickable: bool,
    // only `BodyRegistry::set_held` may change this, so it stays in sync with the registry
    pub(crate) held: bool,
}

/// Per-body squash-stretch animation state.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Squash {
    /// Monotonically increasing phase, radians.
    pub phase: f32,
    /// Phase advance per second.
    pub speed: f32,
    /// Peak scale deviation. Kept under 0.5 so scale stays positive.
    pub amount: f32,
}

impl Squash {
    /// Randomized animation parameters.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Squash {
            phase: rng.gen_range(0.0..PI * 2.0),
            speed: rng.gen_range(0.5..2.0),
            amount: rng.gen_range(0.1..0.3),
        }
    }
}

impl Body {
    /// Body at rest at `pos` with randomized squash parameters and colour.
    pub fn new<R: Rng>(pos: Vec3<f32>, rng: &mut R) -> Self {
        Body {
            pos,
            rot: Vec3::zero(),
            scale: Vec3::one(),
            vel: Vec3::zero(),
            ang_vel: Vec3::zero(),
            squash: Squash::random(rng),
            color: Rgb::new(rng.gen(), rng.gen(), rng.gen()),
            pickable: true,
            held: false,
        }
    }

    /// Whether the viewer is currently carrying this body.
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// The part of this body's state the presentation layer draws.
    pub fn transform(&self) -> BodyTransform {
        BodyTransform {
            pos: self.pos,
            rot: self.rot,
            scale: self.scale,
        }
    }
}

/// Per-body transform exposed to the presentation layer every tick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BodyTransform {
    pub pos: Vec3<f32>,
    pub rot: Vec3<f32>,
    pub scale: Vec3<f32>,
}
