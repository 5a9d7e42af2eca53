//! Dash domain: tuning resource.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashTuning {
    /// Starting reach of the marker, measured horizontally from the player
    pub max_distance: f32,
    pub marker_speed: f32,
    /// Horizontal offset ahead of the player where the marker appears
    pub spawn_distance: f32,
    /// Radius kept clear of solid geometry at the spawn point
    pub spawn_clearance: f32,
    pub wall_probe_distance: f32,
    pub jump_impulse: f32,
    pub prepare_time: f32,
    pub disappear_time: f32,
    pub jump_start_delay: f32,
    pub jump_interval: f32,
    pub movement_cancel_delay: f32,
    /// How far below the landing point to look for geometry to stand on
    pub embed_probe_distance: f32,
    pub power_up_increment: f32,
    pub locked_smoothing: f32,
    pub normal_smoothing: f32,
    pub smoothing_ease_delay: f32,
    pub smoothing_ease_duration: f32,
}

impl Default for DashTuning {
    fn default() -> Self {
        Self {
            max_distance: 224.0,
            marker_speed: 480.0,
            spawn_distance: 40.0,
            spawn_clearance: 16.0,
            wall_probe_distance: 16.0,
            jump_impulse: 760.0,
            prepare_time: 0.35,
            disappear_time: 0.25,
            jump_start_delay: 0.1,
            jump_interval: 0.3,
            movement_cancel_delay: 0.25,
            embed_probe_distance: 320.0,
            power_up_increment: 64.0,
            locked_smoothing: 0.4,
            normal_smoothing: 0.1,
            smoothing_ease_delay: 1.0,
            smoothing_ease_duration: 2.0,
        }
    }
}
