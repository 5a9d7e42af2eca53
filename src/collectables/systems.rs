//! Collectables domain: pickup by touch or dash, effects and the level end.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::collectables::{
    Collectable, CollectableKind, CollectableTuning, CollectedEvent, Collecting, CollectorGoal,
    DiamondCounter, LevelEnd, PickupEvent, PowerUpCollected,
};
use crate::content::ActiveLevel;
use crate::core::{LevelCompletedEvent, SoundCue, UiNotice};
use crate::dash::{DashableKind, DashedThroughEvent};
use crate::movement::Player;

const COLLECT_END_SCALE: f32 = 0.2;

/// Fresh counters for every level attempt
pub(crate) fn reset_collection_progress(
    level: Res<ActiveLevel>,
    tuning: Res<CollectableTuning>,
    mut diamonds: ResMut<DiamondCounter>,
    mut goal: ResMut<CollectorGoal>,
    mut notices: MessageWriter<UiNotice>,
) {
    *diamonds = DiamondCounter::default();
    *goal = CollectorGoal::new(level.0.purple_goal.unwrap_or(tuning.purple_goal));
    notices.write_batch([UiNotice::Diamonds(0), UiNotice::PurpleDiamonds(0)]);
    debug!("Collector goal set to {}", goal.goal);
}

/// Both ways of reaching a collectable end up as the same pickup
pub(crate) fn detect_pickups(
    mut collisions: MessageReader<CollisionStart>,
    mut dashed: MessageReader<DashedThroughEvent>,
    mut pickups: MessageWriter<PickupEvent>,
    players: Query<(), With<Player>>,
    collectables: Query<(), With<Collectable>>,
) {
    for event in collisions.read() {
        for (player, collectable) in [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ] {
            if players.contains(player) && collectables.contains(collectable) {
                pickups.write(PickupEvent {
                    player,
                    collectable,
                });
            }
        }
    }

    for event in dashed.read() {
        if event.kind == DashableKind::Collectable {
            pickups.write(PickupEvent {
                player: event.player,
                collectable: event.target,
            });
        }
    }
}

pub(crate) fn collect_pickups(
    mut commands: Commands,
    mut pickups: MessageReader<PickupEvent>,
    mut collected: MessageWriter<CollectedEvent>,
    mut sounds: MessageWriter<SoundCue>,
    mut collectables: Query<&mut Collectable>,
) {
    for pickup in pickups.read() {
        let Ok(mut collectable) = collectables.get_mut(pickup.collectable) else {
            continue;
        };
        if !collectable.collect() {
            continue;
        }

        commands
            .entity(pickup.collectable)
            .insert((Collecting::default(), ColliderDisabled));
        collected.write(CollectedEvent {
            player: pickup.player,
            kind: collectable.kind,
        });
        sounds.write(SoundCue::play("Collect"));
    }
}

/// An inactive level end has its collider off, so opening it while the
/// player already stands inside still registers a fresh contact.
pub(crate) fn apply_collect_effects(
    mut commands: Commands,
    mut collected: MessageReader<CollectedEvent>,
    mut diamonds: ResMut<DiamondCounter>,
    mut goal: ResMut<CollectorGoal>,
    mut power_ups: MessageWriter<PowerUpCollected>,
    mut notices: MessageWriter<UiNotice>,
    mut sounds: MessageWriter<SoundCue>,
    mut level_ends: Query<(Entity, &mut LevelEnd, &mut Visibility)>,
) {
    for event in collected.read() {
        match event.kind {
            CollectableKind::Diamond => {
                diamonds.count += 1;
                notices.write(UiNotice::Diamonds(diamonds.count));
            }
            CollectableKind::DashPowerUp => {
                power_ups.write(PowerUpCollected {
                    player: event.player,
                });
            }
            CollectableKind::PurpleDiamond => {
                let reached = goal.record();
                notices.write(UiNotice::PurpleDiamonds(goal.collected));
                if reached {
                    for (entity, mut level_end, mut visibility) in &mut level_ends {
                        level_end.active = true;
                        *visibility = Visibility::Inherited;
                        commands.entity(entity).remove::<ColliderDisabled>();
                    }
                    sounds.write(SoundCue::play("LevelEndOpen"));
                    info!("Collector goal of {} met, level end open", goal.goal);
                }
            }
        }
    }
}

/// Shrink collected pickups and remove them when the animation is over
pub(crate) fn tick_collecting(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<CollectableTuning>,
    mut collecting: Query<(Entity, &mut Collecting, &mut Transform)>,
) {
    for (entity, mut timer, mut transform) in &mut collecting {
        timer.elapsed += time.delta_secs();
        if timer.elapsed >= tuning.collect_time {
            commands.entity(entity).despawn();
            continue;
        }
        let t = (timer.elapsed / tuning.collect_time).clamp(0.0, 1.0);
        transform.scale = Vec3::splat(1.0 + (COLLECT_END_SCALE - 1.0) * t);
    }
}

/// Touching an open level end finishes the level, once
pub(crate) fn reach_level_end(
    mut collisions: MessageReader<CollisionStart>,
    mut completed: MessageWriter<LevelCompletedEvent>,
    players: Query<(), With<Player>>,
    mut level_ends: Query<&mut LevelEnd>,
) {
    for event in collisions.read() {
        for (player, other) in [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ] {
            if !players.contains(player) {
                continue;
            }
            let Ok(mut level_end) = level_ends.get_mut(other) else {
                continue;
            };
            if !level_end.active {
                continue;
            }
            level_end.active = false;
            completed.write(LevelCompletedEvent {
                level_number: level_end.level_number,
            });
        }
    }
}
