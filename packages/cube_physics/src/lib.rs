//! Cube physics core.
//!
//! Simplified rigid-body simulation of unit cubes on an infinite ground plane. Every body is an
//! axis-aligned unit box for collision purposes, regardless of its rotation or its cosmetic
//! squash-stretch scale. The gist is:
//!
//! - The `BodyRegistry` owns every `Body` and hands out stable `BodyId` handles.
//! - Each tick, `CubeWorld::step` integrates the bodies that aren't held, animates their scale,
//!   resolves them against the floor, resolves them against each other pairwise, and damps the
//!   ones resting on the floor.
//! - The interaction functions let a viewer spawn and throw cubes, or pick one up, carry it in
//!   front of them, and throw it again.

#[macro_use]
extern crate tracing;

pub mod aa_box;
pub mod axis;
pub mod body;
pub mod registry;
pub mod config;
pub mod integrate;
pub mod squash;
pub mod floor;
pub mod pairwise;
pub mod stabilize;
pub mod raycast;
pub mod interaction;
pub mod world;
pub mod util_vec;


/// Physics core common re-exports.
pub mod prelude {
    pub use super::{
        aa_box::AaBox,
        body::{
            Body,
            BodyId,
            BodyTransform,
            HALF_EXTENT,
            CUBE_SIZE,
        },
        registry::BodyRegistry,
        config::{
            PhysicsConfig,
            InteractionConfig,
        },
        raycast::{
            RayQuery,
            RayHit,
        },
        interaction::Viewpoint,
        world::CubeWorld,
        util_vec::normalized_or_zero,
    };
}
