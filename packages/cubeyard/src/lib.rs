//! Cubeyard: walk around a field, throw cubes, pick them up, and watch them tumble and stack.
//!
//! The cube simulation itself lives in `cube_physics`. This crate drives it once per frame from
//! a viewer's input, and provides the headless front end the binary runs.

#[macro_use]
extern crate tracing;

pub mod logging;
pub mod settings;
pub mod frame_clock;
pub mod viewer;
pub mod input;
pub mod hud;
pub mod session;
pub mod demo;
