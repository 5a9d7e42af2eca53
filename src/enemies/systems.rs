//! Enemies domain: systems driving the behavior machines.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::core::{SimulationFlags, SoundCue};
use crate::dash::{DashableKind, DashedThroughEvent, WallStance};
use crate::enemies::death::{kill, launch_velocity};
use crate::enemies::spawn::{WALLER_COLOR, WALLER_WALL_COLOR};
use crate::enemies::{
    Dying, Enemy, EnemyBody, EnemyRng, EnemyTuning, Flyer, PlayerView, Walker, Waller,
};
use crate::movement::{AvianProbe, Player, PlayerBody};

/// Turn dash hits into deaths: disable the collider and launch the body
pub(crate) fn kill_dashed_enemies(
    mut commands: Commands,
    tuning: Res<EnemyTuning>,
    mut dashed: MessageReader<DashedThroughEvent>,
    mut enemies: Query<(&mut Enemy, &mut LinearVelocity, Has<Flyer>)>,
) {
    for event in dashed.read() {
        if event.kind != DashableKind::Enemy {
            continue;
        }
        let Ok((mut enemy, mut velocity, is_flyer)) = enemies.get_mut(event.target) else {
            continue;
        };
        if !kill(&mut enemy) {
            continue;
        }

        velocity.0 = launch_velocity(enemy.orientation, tuning.death.launch_strength);
        let mut entity = commands.entity(event.target);
        entity
            .insert((Dying::default(), ColliderDisabled))
            .remove::<RigidBodyDisabled>();
        if is_flyer {
            entity.insert((RigidBody::Dynamic, GravityScale(1.0)));
        }
        debug!("Enemy {:?} dashed through", event.target);
    }
}

/// Pause enemy bodies while a dash holds the world still. Logical state is
/// untouched; the behavior systems simply skip the tick.
pub(crate) fn freeze_enemies(
    mut commands: Commands,
    flags: Res<SimulationFlags>,
    enemies: Query<(Entity, &Enemy, Has<RigidBodyDisabled>)>,
) {
    for (entity, enemy, frozen) in &enemies {
        let should_freeze = !flags.enemy_motion_enabled && !enemy.is_dead();
        if should_freeze && !frozen {
            commands.entity(entity).insert(RigidBodyDisabled);
        } else if !should_freeze && frozen {
            commands.entity(entity).remove::<RigidBodyDisabled>();
        }
    }
}

pub(crate) fn drive_walkers(
    time: Res<Time>,
    tuning: Res<EnemyTuning>,
    flags: Res<SimulationFlags>,
    spatial_query: SpatialQuery,
    players: Query<Entity, With<Player>>,
    mut walkers: Query<
        (
            Entity,
            &Transform,
            &mut Enemy,
            &mut Walker,
            &mut EnemyRng,
            &mut LinearVelocity,
        ),
        Without<Player>,
    >,
) {
    if !flags.enemy_motion_enabled {
        return;
    }
    let dt = time.delta_secs();
    let physics = AvianProbe::new(&spatial_query);
    let player = players.iter().next();

    for (entity, transform, mut enemy, mut walker, mut rng, mut velocity) in &mut walkers {
        let mut body = EnemyBody {
            position: transform.translation.truncate(),
            velocity: velocity.0,
        };
        let transition = walker.tick(
            &mut enemy,
            &mut body,
            player,
            &physics,
            &mut rng.0,
            &tuning.walker,
            dt,
        );
        velocity.0 = body.velocity;

        if let Some(state) = transition {
            debug!("Walker {:?} -> {:?}", entity, state);
        }
    }
}

pub(crate) fn drive_flyers(
    time: Res<Time>,
    tuning: Res<EnemyTuning>,
    flags: Res<SimulationFlags>,
    spatial_query: SpatialQuery,
    mut sounds: MessageWriter<SoundCue>,
    players: Query<(Entity, &Transform, &PlayerBody), With<Player>>,
    mut flyers: Query<
        (
            Entity,
            &Transform,
            &mut Enemy,
            &mut Flyer,
            &mut LinearVelocity,
        ),
        Without<Player>,
    >,
) {
    if !flags.enemy_motion_enabled {
        return;
    }
    let dt = time.delta_secs();
    let physics = AvianProbe::new(&spatial_query);
    let player = players
        .iter()
        .next()
        .map(|(entity, transform, body)| PlayerView {
            entity,
            position: transform.translation.truncate(),
            half_extents: body.half_extents(),
        });

    let mut cues = Vec::new();
    for (entity, transform, mut enemy, mut flyer, mut velocity) in &mut flyers {
        let mut body = EnemyBody {
            position: transform.translation.truncate(),
            velocity: velocity.0,
        };
        let transition = flyer.tick(
            &mut enemy,
            &mut body,
            player.as_ref(),
            &physics,
            &tuning.flyer,
            dt,
            &mut cues,
        );
        velocity.0 = body.velocity;

        if let Some(state) = transition {
            debug!("Flyer {:?} -> {:?} ({:?})", entity, state, flyer.phase());
        }
    }
    sounds.write_batch(cues);
}

pub(crate) fn drive_wallers(
    time: Res<Time>,
    tuning: Res<EnemyTuning>,
    flags: Res<SimulationFlags>,
    spatial_query: SpatialQuery,
    mut wallers: Query<
        (
            &Transform,
            &mut Enemy,
            &mut Waller,
            &mut EnemyRng,
            &mut LinearVelocity,
        ),
        Without<Player>,
    >,
) {
    if !flags.enemy_motion_enabled {
        return;
    }
    let dt = time.delta_secs();
    let physics = AvianProbe::new(&spatial_query);

    for (transform, mut enemy, mut waller, mut rng, mut velocity) in &mut wallers {
        let mut body = EnemyBody {
            position: transform.translation.truncate(),
            velocity: velocity.0,
        };
        waller.tick(&mut enemy, &mut body, &physics, &mut rng.0, &tuning.waller, dt);
        velocity.0 = body.velocity;
    }
}

/// Mirror behavior substates onto the physics and dash-facing components
pub(crate) fn sync_enemy_bodies(
    mut commands: Commands,
    mut wallers: Query<(&Waller, &Enemy, &mut WallStance, &mut Sprite)>,
    flyers: Query<(Entity, &Flyer, &Enemy, Has<ColliderDisabled>)>,
) {
    for (waller, enemy, mut stance, mut sprite) in &mut wallers {
        let is_wall = waller.is_wall() && !enemy.is_dead();
        if stance.0 != is_wall {
            stance.0 = is_wall;
            sprite.color = if is_wall { WALLER_WALL_COLOR } else { WALLER_COLOR };
        }
    }

    for (entity, flyer, enemy, disabled) in &flyers {
        if enemy.is_dead() {
            continue;
        }
        if flyer.collider_enabled() && disabled {
            commands.entity(entity).remove::<ColliderDisabled>();
        } else if !flyer.collider_enabled() && !disabled {
            commands.entity(entity).insert(ColliderDisabled);
        }
    }
}

/// Remove dead enemies once their launch has played out
pub(crate) fn tick_dying(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<EnemyTuning>,
    mut dying: Query<(Entity, &mut Dying)>,
) {
    for (entity, mut timer) in &mut dying {
        timer.elapsed += time.delta_secs();
        if timer.elapsed >= tuning.death.delay {
            commands.entity(entity).despawn();
        }
    }
}
