//! Level domain: building, tearing down and advancing levels.

mod spawn;
mod systems;

#[cfg(test)]
mod tests;

pub use spawn::{block_layers, sensor_layers};

use bevy::prelude::*;

use crate::core::GameState;
use crate::level::spawn::spawn_level;
use crate::level::systems::{advance_level, restart_on_input, teardown_level};

/// Everything owned by the running level. Despawned on restart.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LevelEntity;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Level), spawn_level)
            .add_systems(
                OnExit(GameState::LevelComplete),
                (advance_level, teardown_level).chain(),
            )
            .add_systems(OnExit(GameState::Defeated), teardown_level)
            .add_systems(
                Update,
                restart_on_input.run_if(
                    in_state(GameState::LevelComplete).or(in_state(GameState::Defeated)),
                ),
            );
    }
}
