//! Enemies domain: spawning helpers for level-defined enemies.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::dash::{Dashable, DashableKind, WallStance};
use crate::enemies::{Enemy, EnemyRng, EnemyTuning, Flyer, PatrolRoute, Walker, Waller};
use crate::level::LevelEntity;
use crate::movement::GameLayer;

pub const WALKER_SIZE: Vec2 = Vec2::new(28.0, 28.0);
pub const WALLER_SIZE: Vec2 = Vec2::new(32.0, 40.0);
pub const FLYER_SIZE: Vec2 = Vec2::new(32.0, 24.0);

pub const WALKER_COLOR: Color = Color::srgb(0.85, 0.3, 0.3);
pub const FLYER_COLOR: Color = Color::srgb(0.7, 0.35, 0.85);
pub const WALLER_COLOR: Color = Color::srgb(0.85, 0.55, 0.25);
pub const WALLER_WALL_COLOR: Color = Color::srgb(0.55, 0.55, 0.6);

/// Enemy kinds a level can place
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    Walker,
    Waller,
    /// Patrols between `left` and `right` at its spawn altitude
    Flyer { left: f32, right: f32 },
}

/// Components every enemy carries, whatever its behavior
#[derive(Bundle)]
struct EnemyBase {
    enemy: Enemy,
    rng: EnemyRng,
    dashable: Dashable,
    level_entity: LevelEntity,
    sprite: Sprite,
    transform: Transform,
    collider: Collider,
    locked_axes: LockedAxes,
    velocity: LinearVelocity,
    friction: Friction,
    collision_layers: CollisionLayers,
}

impl EnemyBase {
    fn new(size: Vec2, color: Color, position: Vec2, rng: EnemyRng) -> Self {
        Self {
            enemy: Enemy::new(size),
            rng,
            dashable: Dashable {
                kind: DashableKind::Enemy,
            },
            level_entity: LevelEntity,
            sprite: Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_translation(position.extend(0.5)),
            collider: Collider::rectangle(size.x, size.y),
            locked_axes: LockedAxes::ROTATION_LOCKED,
            velocity: LinearVelocity::default(),
            friction: Friction::new(0.0),
            collision_layers: CollisionLayers::new(
                GameLayer::Enemy,
                [GameLayer::Ground, GameLayer::Wall, GameLayer::Player],
            ),
        }
    }
}

/// Spawn one enemy. `spawn_index` decorrelates the per-enemy random streams.
pub fn spawn_enemy(
    commands: &mut Commands,
    kind: EnemyKind,
    position: Vec2,
    seed: u64,
    spawn_index: u64,
    tuning: &EnemyTuning,
) -> Entity {
    let mut rng = EnemyRng::new(seed, spawn_index);

    match kind {
        EnemyKind::Walker => {
            let walker = Walker::new(&mut rng.0, &tuning.walker);
            commands
                .spawn((
                    EnemyBase::new(WALKER_SIZE, WALKER_COLOR, position, rng),
                    walker,
                    RigidBody::Dynamic,
                ))
                .id()
        }
        EnemyKind::Waller => {
            let waller = Waller::new(&mut rng.0, &tuning.waller);
            commands
                .spawn((
                    EnemyBase::new(WALLER_SIZE, WALLER_COLOR, position, rng),
                    waller,
                    WallStance(false),
                    RigidBody::Dynamic,
                ))
                .id()
        }
        EnemyKind::Flyer { left, right } => {
            let route = PatrolRoute {
                left,
                right,
                altitude: position.y,
            };
            commands
                .spawn((
                    EnemyBase::new(FLYER_SIZE, FLYER_COLOR, position, rng),
                    Flyer::new(route),
                    RigidBody::Kinematic,
                    GravityScale(0.0),
                ))
                .id()
        }
    }
}
