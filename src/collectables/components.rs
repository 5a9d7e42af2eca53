//! Collectables domain: pickups, the purple diamond goal and the level end.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectableKind {
    Diamond,
    DashPowerUp,
    PurpleDiamond,
}

#[derive(Component, Debug, Clone)]
pub struct Collectable {
    pub kind: CollectableKind,
    collected: bool,
}

impl Collectable {
    pub fn new(kind: CollectableKind) -> Self {
        Self {
            kind,
            collected: false,
        }
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// True only the first time; a touch and a dash in the same tick, or a
    /// second dash, find it already taken.
    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }
}

/// Collect animation countdown before removal
#[derive(Component, Debug, Default)]
pub struct Collecting {
    pub elapsed: f32,
}

/// Goal post that finishes the level once enough purple diamonds are in
#[derive(Component, Debug, Clone)]
pub struct LevelEnd {
    pub level_number: u32,
    pub active: bool,
}

/// Diamonds picked up in the current level
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiamondCounter {
    pub count: u32,
}

/// Purple diamond progress toward opening the level end
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectorGoal {
    pub collected: u32,
    pub goal: u32,
}

impl Default for CollectorGoal {
    fn default() -> Self {
        Self::new(6)
    }
}

impl CollectorGoal {
    pub fn new(goal: u32) -> Self {
        Self { collected: 0, goal }
    }

    pub fn is_met(&self) -> bool {
        self.collected >= self.goal
    }

    /// Count one purple diamond. Returns true on the pickup that meets the
    /// goal, never again afterwards.
    pub fn record(&mut self) -> bool {
        let was_met = self.is_met();
        self.collected += 1;
        !was_met && self.is_met()
    }
}
