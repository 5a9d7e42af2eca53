//! Level domain: building the active level's entities.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::camera::CameraBounds;
use crate::collectables::{Collectable, CollectableKind, CollectableTuning, LevelEnd};
use crate::content::{ActiveLevel, BlockKind, ZoneDef};
use crate::core::RunConfig;
use crate::damage::{DeathPit, RespawnZone};
use crate::dash::{Dashable, DashableKind};
use crate::enemies::{EnemyTuning, spawn_enemy};
use crate::level::LevelEntity;
use crate::movement::{GameLayer, Ground, Wall};

const GROUND_COLOR: Color = Color::srgb(0.35, 0.4, 0.35);
const WALL_COLOR: Color = Color::srgb(0.25, 0.25, 0.35);
const PIT_COLOR: Color = Color::srgba(0.6, 0.1, 0.1, 0.35);
const RESPAWN_COLOR: Color = Color::srgba(0.3, 0.7, 0.9, 0.25);
const LEVEL_END_COLOR: Color = Color::srgb(0.95, 0.85, 0.3);

const COLLECTABLE_SIZE: f32 = 20.0;

pub fn block_layers(kind: BlockKind) -> CollisionLayers {
    let member = match kind {
        BlockKind::Ground => GameLayer::Ground,
        BlockKind::Wall => GameLayer::Wall,
    };
    CollisionLayers::new(member, [GameLayer::Player, GameLayer::Enemy])
}

/// Sensors only ever report the player
pub fn sensor_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player])
}

fn collectable_color(kind: CollectableKind) -> Color {
    match kind {
        CollectableKind::Diamond => Color::srgb(0.4, 0.85, 0.95),
        CollectableKind::DashPowerUp => Color::srgb(0.3, 0.95, 0.4),
        CollectableKind::PurpleDiamond => Color::srgb(0.65, 0.3, 0.95),
    }
}

fn zone_sprite(zone: &ZoneDef, color: Color) -> (Sprite, Transform) {
    (
        Sprite {
            color,
            custom_size: Some(Vec2::from(zone.size)),
            ..default()
        },
        Transform::from_translation(Vec2::from(zone.center).extend(-0.5)),
    )
}

/// Spawn geometry, hazards, enemies, pickups and the level end, and frame
/// the camera to the level.
pub(crate) fn spawn_level(
    mut commands: Commands,
    level: Res<ActiveLevel>,
    run_config: Res<RunConfig>,
    enemy_tuning: Res<EnemyTuning>,
    collectable_tuning: Res<CollectableTuning>,
    mut bounds: ResMut<CameraBounds>,
) {
    let level = &level.0;
    info!(
        "Building level {} '{}' (seed: {})",
        level.level_number, level.name, run_config.seed
    );
    *bounds = level.bounds;

    for block in &level.blocks {
        let size = Vec2::from(block.size);
        let mut entity = commands.spawn((
            LevelEntity,
            Sprite {
                color: match block.kind {
                    BlockKind::Ground => GROUND_COLOR,
                    BlockKind::Wall => WALL_COLOR,
                },
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(Vec2::from(block.center).extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            block_layers(block.kind),
        ));
        match block.kind {
            BlockKind::Ground => entity.insert(Ground),
            BlockKind::Wall => entity.insert(Wall),
        };
    }

    for pit in &level.pits {
        commands.spawn((
            LevelEntity,
            DeathPit,
            zone_sprite(pit, PIT_COLOR),
            Collider::rectangle(pit.size[0], pit.size[1]),
            Sensor,
            sensor_layers(),
        ));
    }

    for zone in &level.respawn_zones {
        commands.spawn((
            LevelEntity,
            RespawnZone,
            zone_sprite(zone, RESPAWN_COLOR),
            Collider::rectangle(zone.size[0], zone.size[1]),
            Sensor,
            sensor_layers(),
        ));
    }

    for (index, placement) in level.enemies.iter().enumerate() {
        spawn_enemy(
            &mut commands,
            placement.kind,
            Vec2::from(placement.position),
            run_config.seed,
            index as u64,
            &enemy_tuning,
        );
    }

    for placement in &level.collectables {
        commands.spawn((
            LevelEntity,
            Collectable::new(placement.kind),
            Dashable {
                kind: DashableKind::Collectable,
            },
            Sprite {
                color: collectable_color(placement.kind),
                custom_size: Some(Vec2::splat(COLLECTABLE_SIZE)),
                ..default()
            },
            Transform::from_translation(Vec2::from(placement.position).extend(0.5))
                .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_4)),
            Collider::rectangle(COLLECTABLE_SIZE, COLLECTABLE_SIZE),
            Sensor,
            CollisionLayers::new(GameLayer::Collectable, [GameLayer::Player]),
        ));
    }

    let goal = level.purple_goal.unwrap_or(collectable_tuning.purple_goal);
    let open = goal == 0;
    let end = &level.level_end;
    let mut level_end = commands.spawn((
        LevelEntity,
        LevelEnd {
            level_number: level.level_number,
            active: open,
        },
        zone_sprite(end, LEVEL_END_COLOR),
        if open {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        },
        Collider::rectangle(end.size[0], end.size[1]),
        Sensor,
        sensor_layers(),
    ));
    if !open {
        level_end.insert(ColliderDisabled);
    }

    info!(
        "Level ready: {} block(s), {} enemy(ies), {} collectable(s), goal {}",
        level.blocks.len(),
        level.enemies.len(),
        level.collectables.len(),
        goal
    );
}
