//! Core domain: game state definitions for the level flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    #[default]
    Boot,
    Level,
    LevelComplete,
    Defeated,
}

/// Ordered phases of a simulation tick. Dash logic always runs before the
/// enemies and the camera read the shared flags it writes.
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone, Copy)]
pub enum GameSet {
    Input,
    Motion,
    Dash,
    Enemies,
    Damage,
    Camera,
}
