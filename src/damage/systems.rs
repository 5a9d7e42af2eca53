//! Damage domain: contact damage, pit falls, checkpoints and defeat.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::core::{GameState, SimulationFlags, SoundCue, UiNotice};
use crate::damage::{
    Checkpoint, DamageTuning, DeathPit, HitOutcome, Invulnerability, Lives, PitFall,
    PlayerDefeatedEvent, RespawnZone, pit_penalty, player_collision_layers, take_hit,
};
use crate::dash::{DashEffect, DashEffects, DashMachine, DashTuning};
use crate::enemies::Enemy;
use crate::movement::{MovementState, Player};

/// The player side of each collision start that touches an entity matching
/// `other`, without duplicates
fn player_contacts(
    collisions: &mut MessageReader<CollisionStart>,
    is_player: impl Fn(Entity) -> bool,
    other: impl Fn(Entity) -> bool,
) -> Vec<(Entity, Entity)> {
    let mut contacts = Vec::new();
    for event in collisions.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];
        for (player, entity) in pairs {
            if is_player(player) && other(entity) && !contacts.iter().any(|(p, _)| *p == player)
            {
                contacts.push((player, entity));
            }
        }
    }
    contacts
}

/// Lives reported once when the player appears
pub(crate) fn announce_starting_lives(
    players: Query<&Lives, Added<Lives>>,
    mut notices: MessageWriter<UiNotice>,
) {
    for lives in &players {
        notices.write(UiNotice::Lives(lives.current));
    }
}

pub(crate) fn register_checkpoints(
    mut collisions: MessageReader<CollisionStart>,
    zones: Query<&Transform, With<RespawnZone>>,
    mut players: Query<&mut Checkpoint, With<Player>>,
) {
    let contacts = player_contacts(
        &mut collisions,
        |e| players.contains(e),
        |e| zones.contains(e),
    );
    for (player, zone) in contacts {
        let (Ok(mut checkpoint), Ok(zone_transform)) = (players.get_mut(player), zones.get(zone))
        else {
            continue;
        };
        let position = zone_transform.translation.truncate();
        if checkpoint.0 != position {
            checkpoint.0 = position;
            debug!("Checkpoint moved to {:?}", position);
        }
    }
}

/// Enemy contact cancels any dash, then costs a life unless the
/// invulnerability window is open.
pub(crate) fn damage_on_enemy_contact(
    tuning: Res<DamageTuning>,
    dash_tuning: Res<DashTuning>,
    mut collisions: MessageReader<CollisionStart>,
    mut effects: DashEffects,
    mut notices: MessageWriter<UiNotice>,
    mut defeated: MessageWriter<PlayerDefeatedEvent>,
    enemies: Query<&Enemy>,
    mut players: Query<
        (
            &mut Transform,
            &mut MovementState,
            &mut LinearVelocity,
            &mut DashMachine,
            &mut Lives,
            &mut Invulnerability,
        ),
        With<Player>,
    >,
) {
    let contacts = player_contacts(
        &mut collisions,
        |e| players.contains(e),
        |e| enemies.get(e).is_ok_and(|enemy| !enemy.is_dead()),
    );

    let mut pending = Vec::new();
    for (player, enemy) in contacts {
        let Ok((
            mut transform,
            mut state,
            mut velocity,
            mut machine,
            mut lives,
            mut invulnerability,
        )) = players.get_mut(player)
        else {
            continue;
        };

        machine.cancel(&dash_tuning, &mut pending);
        let outcome = take_hit(&mut lives, &mut invulnerability);
        if outcome != HitOutcome::Ignored {
            pending.push(DashEffect::Sound(SoundCue::play("Hit")));
        }
        effects.apply(player, &mut pending, &mut transform, &mut state, &mut velocity);

        match outcome {
            HitOutcome::Ignored => {}
            HitOutcome::Hit { lives } => {
                velocity.y = tuning.hit_bounce;
                notices.write(UiNotice::Lives(lives));
                info!("Player hit by {:?}, {} live(s) left", enemy, lives);
            }
            HitOutcome::Defeated => {
                notices.write(UiNotice::Lives(lives.current));
                defeated.write(PlayerDefeatedEvent { player });
            }
        }
    }
}

/// Touching a death pit takes control away until the respawn
pub(crate) fn start_pit_falls(
    mut commands: Commands,
    dash_tuning: Res<DashTuning>,
    mut collisions: MessageReader<CollisionStart>,
    mut effects: DashEffects,
    pits: Query<(), With<DeathPit>>,
    mut players: Query<
        (
            &mut Transform,
            &mut MovementState,
            &mut LinearVelocity,
            &mut DashMachine,
            Has<PitFall>,
        ),
        With<Player>,
    >,
) {
    let contacts = player_contacts(
        &mut collisions,
        |e| players.contains(e),
        |e| pits.contains(e),
    );

    let mut pending = Vec::new();
    for (player, _) in contacts {
        let Ok((mut transform, mut state, mut velocity, mut machine, falling)) =
            players.get_mut(player)
        else {
            continue;
        };
        if falling {
            continue;
        }

        machine.cancel(&dash_tuning, &mut pending);
        pending.push(DashEffect::Sound(SoundCue::play("Fall")));
        effects.apply(player, &mut pending, &mut transform, &mut state, &mut velocity);

        state.set_movement(false);
        velocity.x = 0.0;
        commands.entity(player).insert(PitFall::default());
        debug!("Player fell into a pit");
    }
}

pub(crate) fn respawn_from_pits(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<DamageTuning>,
    mut notices: MessageWriter<UiNotice>,
    mut defeated: MessageWriter<PlayerDefeatedEvent>,
    mut players: Query<
        (
            Entity,
            &mut PitFall,
            &Checkpoint,
            &mut Transform,
            &mut MovementState,
            &mut LinearVelocity,
            &mut Lives,
            &mut Invulnerability,
        ),
        With<Player>,
    >,
) {
    for (
        entity,
        mut fall,
        checkpoint,
        mut transform,
        mut state,
        mut velocity,
        mut lives,
        mut invulnerability,
    ) in &mut players
    {
        fall.elapsed += time.delta_secs();
        if fall.elapsed < tuning.pit_fall_delay {
            continue;
        }
        commands.entity(entity).remove::<PitFall>();

        match pit_penalty(&mut lives, &mut invulnerability) {
            HitOutcome::Defeated => {
                notices.write(UiNotice::Lives(lives.current));
                defeated.write(PlayerDefeatedEvent { player: entity });
                continue;
            }
            HitOutcome::Hit { lives } => {
                notices.write(UiNotice::Lives(lives));
            }
            HitOutcome::Ignored => {}
        }

        transform.translation.x = checkpoint.0.x;
        transform.translation.y = checkpoint.0.y;
        velocity.0 = Vec2::ZERO;
        state.reset_airborne();
        state.set_movement(true);
        info!("Player respawned at {:?}", checkpoint.0);
    }
}

/// Count the window down, blink the sprite and keep enemy contacts
/// filtered out while it lasts
pub(crate) fn tick_invulnerability(
    time: Res<Time>,
    tuning: Res<DamageTuning>,
    mut players: Query<(&mut Invulnerability, &mut Sprite, &mut CollisionLayers), With<Player>>,
) {
    for (mut invulnerability, mut sprite, mut layers) in &mut players {
        if let Some(alpha) = invulnerability.tick(&tuning, time.delta_secs()) {
            sprite.color.set_alpha(alpha);
        }
        let wanted = player_collision_layers(invulnerability.is_active());
        if *layers != wanted {
            *layers = wanted;
        }
    }
}

/// Out of lives: freeze the player and the enemies and leave the level
pub(crate) fn freeze_defeated_player(
    mut commands: Commands,
    mut events: MessageReader<PlayerDefeatedEvent>,
    mut flags: ResMut<SimulationFlags>,
    mut sounds: MessageWriter<SoundCue>,
    mut game_state: ResMut<NextState<GameState>>,
    mut players: Query<(&mut MovementState, &mut LinearVelocity), With<Player>>,
    enemies: Query<(Entity, &Enemy), Without<RigidBodyDisabled>>,
) {
    for event in events.read() {
        let Ok((mut state, mut velocity)) = players.get_mut(event.player) else {
            continue;
        };
        state.set_movement(false);
        state.set_gravity(false, &mut velocity.0);
        velocity.0 = Vec2::ZERO;
        commands.entity(event.player).insert(RigidBodyDisabled);

        // Enemy systems do not run outside Level; freeze the bodies here
        flags.enemy_motion_enabled = false;
        for (entity, enemy) in &enemies {
            if !enemy.is_dead() {
                commands.entity(entity).insert(RigidBodyDisabled);
            }
        }

        sounds.write(SoundCue::play("Defeat"));
        game_state.set(GameState::Defeated);
        info!("Player {:?} is out of lives", event.player);
    }
}
