//! Debug domain: overlay toggle and refresh.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::damage::Lives;
use crate::dash::DashMachine;
use crate::debug::state::{DebugState, PlayerReadout};
use crate::debug::ui::{DebugInfoOverlay, spawn_debug_info_overlay};
use crate::movement::{MovementState, Player};

/// Toggle the info overlay with F3
pub(crate) fn toggle_debug_info(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !keyboard.just_pressed(KeyCode::F3) {
        return;
    }

    debug_state.show_info = !debug_state.show_info;
    if debug_state.show_info {
        spawn_debug_info_overlay(&mut commands);
    } else {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn update_debug_info_overlay(
    player_query: Query<(&MovementState, &LinearVelocity, &DashMachine, &Lives), With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
) {
    let Ok(mut text) = overlay_query.single_mut() else {
        return;
    };

    **text = match player_query.single() {
        Ok((state, velocity, dash, lives)) => {
            PlayerReadout::new(state, velocity.0, dash.phase(), lives.current).to_text()
        }
        Err(_) => "No player".to_string(),
    };
}
