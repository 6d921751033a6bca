//! Tunable constants of the simulation.

use serde::{Serialize, Deserialize};


/// Constants driving the cube simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Vertical acceleration, units per second squared.
    pub gravity: f32,
    /// Fraction of downward speed returned upward on hitting the floor.
    pub restitution: f32,
    /// Horizontal velocity multiplier on hitting the floor.
    pub ground_friction: f32,
    /// Velocity multiplier after a cube-cube bounce.
    pub damping: f32,
    /// Tangential velocity multiplier after a cube-cube bounce.
    pub friction: f32,
    /// Angular velocity retained per second.
    pub rotational_damping: f32,
    /// Angular velocity multiplier per tick for bodies resting on the floor.
    pub angular_drag: f32,
    /// Horizontal velocity multiplier per tick for bodies resting on the floor.
    pub rest_damping: f32,
    /// Vertical speed under which a body on the floor counts as resting.
    pub rest_speed: f32,
    /// How far above the floor a body may be and still count as resting.
    pub rest_tolerance: f32,
    /// Scale of the random spin injected by a floor bounce, per unit of speed.
    pub floor_spin: f32,
    /// Scale of the random spin injected by a cube-cube bounce, per unit of speed.
    pub contact_spin: f32,
    /// Longest time step the cube simulation will take, in seconds.
    pub max_step: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            gravity: -9.8,
            restitution: 0.3,
            ground_friction: 0.7,
            damping: 0.3,
            friction: 0.8,
            rotational_damping: 0.95,
            angular_drag: 0.98,
            rest_damping: 0.92,
            rest_speed: 0.1,
            rest_tolerance: 0.01,
            floor_spin: 0.5,
            contact_spin: 0.3,
            max_step: 0.1,
        }
    }
}

/// Constants driving player interaction with cubes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Speed at which cubes are thrown.
    pub throw_speed: f32,
    /// Width of the range each axis of a thrown cube's spin is uniformly sampled from.
    pub throw_spin: f32,
    /// Distance ahead of the viewer at which spawned cubes appear.
    pub spawn_distance: f32,
    /// Distance ahead of the viewer at which a held cube is carried.
    pub hold_distance: f32,
    /// Fraction of the remaining distance to its target a held cube covers each tick.
    pub carry_blend: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        InteractionConfig {
            throw_speed: 5.0,
            throw_spin: 5.0,
            spawn_distance: 3.0,
            hold_distance: 3.0,
            carry_blend: 0.1,
        }
    }
}
