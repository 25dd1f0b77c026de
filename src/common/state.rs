//! Global state machine.
//!
//! The simulation resource is built on entering `InGame` and only stepped there.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}
