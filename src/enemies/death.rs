//! Enemies domain: dash kills.

use bevy::prelude::*;

use crate::enemies::{Enemy, EnemyState};

/// Knock-back on death: up and away from where the enemy was facing
pub fn launch_velocity(orientation: f32, strength: f32) -> Vec2 {
    Vec2::new(-orientation, 2.0).normalize() * strength
}

/// Marks the enemy dead. Returns false if it already was, so a kill is only
/// ever applied once.
pub fn kill(enemy: &mut Enemy) -> bool {
    if enemy.is_dead() {
        return false;
    }
    enemy.state = EnemyState::Dead;
    true
}
