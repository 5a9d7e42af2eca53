//! UI domain: HUD counters and end-of-level screens.

mod hud;
mod screens;

#[cfg(test)]
mod tests;

pub use hud::{HudCounters, HudField, hud_label};
pub use screens::end_screen_text;

use bevy::prelude::*;

use crate::core::GameState;
use crate::ui::hud::{collect_notices, spawn_hud, update_hud_text};
use crate::ui::screens::{despawn_end_screen, handle_continue_button, spawn_end_screen};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudCounters>()
            .add_systems(Startup, spawn_hud)
            .add_systems(Update, (collect_notices, update_hud_text).chain())
            .add_systems(OnEnter(GameState::LevelComplete), spawn_end_screen)
            .add_systems(OnEnter(GameState::Defeated), spawn_end_screen)
            .add_systems(OnExit(GameState::LevelComplete), despawn_end_screen)
            .add_systems(OnExit(GameState::Defeated), despawn_end_screen)
            .add_systems(
                Update,
                handle_continue_button.run_if(
                    in_state(GameState::LevelComplete).or(in_state(GameState::Defeated)),
                ),
            );
    }
}
