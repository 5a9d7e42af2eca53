//! Enemies domain: behavior tuning for every enemy kind.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerTuning {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub accel: f32,
    pub decel: f32,
    pub wait_min: f32,
    pub wait_max: f32,
    pub walk_min: f32,
    pub walk_max: f32,
    /// Grace period after losing sight before calming down
    pub search_time: f32,
    pub sight_range: f32,
    pub pit_probe_distance: f32,
}

impl Default for WalkerTuning {
    fn default() -> Self {
        Self {
            walk_speed: 96.0,
            run_speed: 224.0,
            accel: 600.0,
            decel: 900.0,
            wait_min: 1.0,
            wait_max: 2.5,
            walk_min: 1.0,
            walk_max: 2.5,
            search_time: 1.5,
            sight_range: 256.0,
            pit_probe_distance: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyerTuning {
    pub patrol_speed: f32,
    /// Half-angle of the downward-forward view cone, in degrees
    pub fov_degrees: f32,
    pub sight_radius: f32,
    /// Minimum patrol time between two attacks
    pub neutral_cooldown: f32,
    pub descend_windup: f32,
    pub swoop_windup: f32,
    pub descent_speed: f32,
    pub swoop_speed: f32,
    pub rising_speed: f32,
    pub floor_check_distance: f32,
    pub wall_check_distance: f32,
    pub flap_interval: f32,
}

impl Default for FlyerTuning {
    fn default() -> Self {
        Self {
            patrol_speed: 96.0,
            fov_degrees: 35.0,
            sight_radius: 320.0,
            neutral_cooldown: 1.5,
            descend_windup: 0.4,
            swoop_windup: 0.3,
            descent_speed: 420.0,
            swoop_speed: 520.0,
            rising_speed: 160.0,
            floor_check_distance: 24.0,
            wall_check_distance: 12.0,
            flap_interval: 0.65,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WallerTuning {
    pub speed: f32,
    pub accel: f32,
    pub decel: f32,
    pub wait_min: f32,
    pub wait_max: f32,
    pub walk_min: f32,
    pub walk_max: f32,
    pub wall_min: f32,
    pub wall_max: f32,
    pub pit_probe_distance: f32,
}

impl Default for WallerTuning {
    fn default() -> Self {
        Self {
            speed: 80.0,
            accel: 500.0,
            decel: 800.0,
            wait_min: 0.8,
            wait_max: 2.0,
            walk_min: 1.0,
            walk_max: 2.0,
            wall_min: 1.5,
            wall_max: 3.0,
            pit_probe_distance: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeathTuning {
    pub launch_strength: f32,
    /// Time between the kill and removal
    pub delay: f32,
}

impl Default for DeathTuning {
    fn default() -> Self {
        Self {
            launch_strength: 320.0,
            delay: 0.5,
        }
    }
}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub walker: WalkerTuning,
    pub flyer: FlyerTuning,
    pub waller: WallerTuning,
    pub death: DeathTuning,
}
