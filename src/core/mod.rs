//! Core domain: game state, tick ordering, shared flags and progress.

mod events;
mod progress;
mod resources;
mod state;
mod systems;

#[cfg(test)]
mod tests;

pub use events::{LevelCompletedEvent, SoundAction, SoundCue, UiNotice};
pub use progress::{FileProgressStore, Progress, ProgressError, ProgressStore};
pub use resources::{GameplayPaused, RunConfig, SimulationFlags, gameplay_active};
pub use state::{GameSet, GameState};

use bevy::prelude::*;

use crate::core::systems::{
    announce_defeat, handle_level_completed, load_progress, log_sound_cues,
    reset_simulation_flags, sync_physics_pause, toggle_pause, transition_to_level,
};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<RunConfig>()
            .init_resource::<GameplayPaused>()
            .init_resource::<SimulationFlags>()
            .init_resource::<Progress>()
            .add_message::<SoundCue>()
            .add_message::<UiNotice>()
            .add_message::<LevelCompletedEvent>()
            .configure_sets(
                Update,
                (
                    GameSet::Input,
                    GameSet::Motion,
                    GameSet::Dash,
                    GameSet::Enemies,
                    GameSet::Damage,
                    GameSet::Camera,
                )
                    .chain(),
            );

        for set in [
            GameSet::Input,
            GameSet::Motion,
            GameSet::Dash,
            GameSet::Enemies,
            GameSet::Damage,
            GameSet::Camera,
        ] {
            app.configure_sets(
                Update,
                set.run_if(in_state(GameState::Level))
                    .run_if(gameplay_active),
            );
        }

        app.add_systems(Startup, load_progress)
            .add_systems(
                Update,
                transition_to_level.run_if(in_state(GameState::Boot)),
            )
            .add_systems(OnEnter(GameState::Level), reset_simulation_flags)
            .add_systems(OnEnter(GameState::Defeated), announce_defeat)
            .add_systems(
                Update,
                (
                    (
                        toggle_pause.run_if(in_state(GameState::Level)),
                        sync_physics_pause,
                    )
                        .chain(),
                    handle_level_completed,
                    log_sound_cues,
                ),
            );
    }
}
