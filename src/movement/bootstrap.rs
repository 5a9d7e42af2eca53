//! Movement domain: player spawn at the active level's start point.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::ActiveLevel;
use crate::damage::{Checkpoint, DamageTuning, Invulnerability, Lives, player_collision_layers};
use crate::dash::{DashMachine, DashTuning};
use crate::level::LevelEntity;
use crate::movement::{MovementState, Player, PlayerBody};

pub const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);

/// Spawn the player on entering a level. A level restart despawns the old
/// player first, so an existing one here means the state was re-entered
/// without a restart and is left alone.
pub(crate) fn spawn_player(
    mut commands: Commands,
    level: Res<ActiveLevel>,
    dash_tuning: Res<DashTuning>,
    damage_tuning: Res<DamageTuning>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let spawn = level.0.spawn_point();
    info!(
        "Spawning player at {:?} (lives={}, dash range={})",
        spawn, damage_tuning.starting_lives, dash_tuning.max_distance
    );

    commands.spawn((
        // Identity & locomotion
        (
            Player,
            LevelEntity,
            PlayerBody { size: PLAYER_SIZE },
            MovementState::default(),
            DashMachine::new(dash_tuning.max_distance),
        ),
        // Damage
        (
            Lives::new(damage_tuning.starting_lives),
            Invulnerability::default(),
            Checkpoint(spawn),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.95),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_translation(spawn.extend(1.0)),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            // Gravity is integrated by the mover
            GravityScale(0.0),
            Friction::new(0.0),
            CollisionEventsEnabled,
            player_collision_layers(false),
        ),
    ));
}
