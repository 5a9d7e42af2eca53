//! Core domain: shared resources for pausing, seeding and cross-domain locks.

use bevy::prelude::*;
use rand::Rng;
use std::collections::HashSet;

/// Resource tracking if gameplay should be paused.
/// Gameplay is paused if any source is active.
#[derive(Resource, Debug, Default)]
pub struct GameplayPaused {
    pub sources: HashSet<String>,
}

impl GameplayPaused {
    pub fn is_paused(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn pause(&mut self, source: impl Into<String>) {
        self.sources.insert(source.into());
    }

    pub fn unpause(&mut self, source: impl Into<String>) {
        self.sources.remove(&source.into());
    }

    pub fn toggle(&mut self, source: impl Into<String>) {
        let source = source.into();
        if !self.sources.remove(&source) {
            self.sources.insert(source);
        }
    }
}

/// Run condition: returns true only when gameplay is not paused
pub fn gameplay_active(paused: Res<GameplayPaused>) -> bool {
    !paused.is_paused()
}

#[derive(Resource, Debug)]
pub struct RunConfig {
    pub seed: u64,
    pub level_number: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
            level_number: 1,
        }
    }
}

/// Global switches written by the dash (and the defeat flow) and read every
/// tick by the camera and enemy domains. Only one domain writes per tick phase.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SimulationFlags {
    pub enemy_motion_enabled: bool,
    pub camera_tracking_enabled: bool,
}

impl Default for SimulationFlags {
    fn default() -> Self {
        Self {
            enemy_motion_enabled: true,
            camera_tracking_enabled: true,
        }
    }
}
