//! Damage domain: tuning resource.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageTuning {
    pub starting_lives: i32,
    pub invulnerability_time: f32,
    pub blink_interval: f32,
    /// Fall animation length before the pit respawn
    pub pit_fall_delay: f32,
    /// Upward hop given to the player when an enemy lands a hit
    pub hit_bounce: f32,
}

impl Default for DamageTuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            invulnerability_time: 1.5,
            blink_interval: 0.1,
            pit_fall_delay: 0.6,
            hit_bounce: 260.0,
        }
    }
}
