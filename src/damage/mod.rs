//! Damage domain: lives, invulnerability, pit falls and defeat.

mod components;
mod events;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{
    Checkpoint, DeathPit, HitOutcome, Invulnerability, Lives, PitFall, RespawnZone, pit_penalty,
    player_collision_layers, take_hit,
};
pub use events::PlayerDefeatedEvent;
pub use resources::DamageTuning;

use bevy::prelude::*;

use crate::core::GameSet;
use crate::damage::systems::{
    announce_starting_lives, damage_on_enemy_contact, freeze_defeated_player,
    register_checkpoints, respawn_from_pits, start_pit_falls, tick_invulnerability,
};

pub struct DamagePlugin;

impl Plugin for DamagePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DamageTuning>()
            .add_message::<PlayerDefeatedEvent>()
            .add_systems(
                Update,
                (
                    announce_starting_lives,
                    register_checkpoints,
                    damage_on_enemy_contact,
                    start_pit_falls,
                    respawn_from_pits,
                    tick_invulnerability,
                    freeze_defeated_player,
                )
                    .chain()
                    .in_set(GameSet::Damage),
            );
    }
}
