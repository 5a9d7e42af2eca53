//! Debug overlay for fast iteration (F3).

mod state;
mod systems;
mod ui;

#[cfg(test)]
mod tests;

pub use state::{DebugState, PlayerReadout};

use bevy::prelude::*;

use crate::debug::systems::{toggle_debug_info, update_debug_info_overlay};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                toggle_debug_info,
                update_debug_info_overlay.run_if(|state: Res<DebugState>| state.show_info),
            )
                .chain(),
        );
    }
}
