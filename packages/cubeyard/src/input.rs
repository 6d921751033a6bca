//! Input intents, as delivered by whatever maps raw keys and pointer events to them.

use crate::viewer::MoveKeys;
use vek::*;


/// Something the player did.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    /// Spawn a cube and throw it. Engages the session if it isn't already.
    SpawnAndThrow,
    /// Throw the held cube, or pick up the one being looked at.
    PickUpOrRelease,
    /// A movement intent started or stopped.
    Move(MoveDir, bool),
    Jump,
    /// Pointer movement while engaged.
    Look(Vec2<f32>),
    /// The session gained or lost pointer capture.
    SetEngaged(bool),
}

/// Movement intent direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveDir {
    Forward,
    Backward,
    Left,
    Right,
}

impl MoveKeys {
    /// Mark a movement intent as held or not.
    pub fn set(&mut self, dir: MoveDir, pressed: bool) {
        match dir {
            MoveDir::Forward => self.forward = pressed,
            MoveDir::Backward => self.backward = pressed,
            MoveDir::Left => self.left = pressed,
            MoveDir::Right => self.right = pressed,
        }
    }
}
