//! Enemies domain: ground locomotion shared by walkers and wallers.

use bevy::prelude::*;

use crate::enemies::{Enemy, EnemyBody};
use crate::movement::{GameLayer, PhysicsQuery};
use crate::movement::mover::sign_or_zero;

/// Speed up toward `speed` in `direction`, clamped at `speed`
pub fn accelerate(vx: f32, direction: f32, speed: f32, accel: f32, dt: f32) -> f32 {
    let vx = vx + dt * accel * direction;
    if vx.abs() > speed { speed * direction } else { vx }
}

/// Slow down against the current motion, stopping at zero instead of
/// reversing. Works the same in both directions.
pub fn decelerate_to_rest(vx: f32, decel: f32, dt: f32) -> f32 {
    let sign = sign_or_zero(vx);
    let next = vx - dt * decel * sign;
    if sign_or_zero(next) != sign { 0.0 } else { next }
}

/// Turn around when there is no ground just ahead of the leading foot
pub fn check_pit(
    enemy: &mut Enemy,
    body: &EnemyBody,
    physics: &impl PhysicsQuery,
    probe_distance: f32,
) {
    let foot = body.position
        + Vec2::new(
            enemy.half_extents.x * enemy.orientation,
            -enemy.half_extents.y,
        );
    let ground = physics.probe(
        foot,
        Dir2::NEG_Y,
        probe_distance,
        GameLayer::Ground.into(),
    );
    if ground.is_none() {
        enemy.flip();
    }
}
