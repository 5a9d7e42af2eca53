//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub max_speed: f32,
    pub accel: f32,
    pub decel: f32,
    /// Smallest velocity change applied by a single accelerate/decelerate step
    pub min_speed_step: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Zero-gravity hang time at the jump apex
    pub apex_time: f32,
    pub apex_speed: f32,
    pub apex_accel: f32,
    pub jump_end_early_divisor: f32,
    pub jump_buffer_time: f32,
    pub coyote_time: f32,
    pub ground_probe_distance: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_speed: 320.0,
            accel: 2400.0,
            decel: 3200.0,
            min_speed_step: 6.0,
            jump_velocity: 680.0,
            gravity: 1800.0,
            max_fall_speed: 1100.0,
            apex_time: 0.08,
            apex_speed: 260.0,
            apex_accel: 50000.0,
            jump_end_early_divisor: 2.0,
            jump_buffer_time: 0.12,
            coyote_time: 0.1,
            ground_probe_distance: 3.0,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: f32,
    pub jump_just_pressed: bool,
    pub jump_just_released: bool,
    pub charge_just_pressed: bool,
    pub charge_just_released: bool,
}
