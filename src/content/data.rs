//! Data definitions for the RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::camera::{CameraBounds, CameraTuning};
use crate::collectables::{CollectableKind, CollectableTuning};
use crate::damage::DamageTuning;
use crate::dash::DashTuning;
use crate::enemies::{EnemyKind, EnemyTuning};
use crate::movement::MovementTuning;

// ============================================================================
// Tuning (tuning.ron)
// ============================================================================

/// Every tunable, as one file. Missing sections keep their defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GameplayTuning {
    pub movement: MovementTuning,
    pub dash: DashTuning,
    pub camera: CameraTuning,
    pub enemies: EnemyTuning,
    pub damage: DamageTuning,
    pub collectables: CollectableTuning,
}

// ============================================================================
// Levels (level_N.ron)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum BlockKind {
    Ground,
    Wall,
}

/// Axis-aligned solid piece of level geometry
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BlockDef {
    pub kind: BlockKind,
    pub center: [f32; 2],
    pub size: [f32; 2],
}

/// Axis-aligned sensor area (death pits, respawn zones)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ZoneDef {
    pub center: [f32; 2],
    pub size: [f32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct EnemyPlacement {
    pub kind: EnemyKind,
    pub position: [f32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CollectablePlacement {
    pub kind: CollectableKind,
    pub position: [f32; 2],
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LevelDef {
    pub level_number: u32,
    pub name: String,
    pub bounds: CameraBounds,
    pub spawn: [f32; 2],
    /// Purple diamonds needed to open the level end; the tuning default
    /// applies when unset
    #[serde(default)]
    pub purple_goal: Option<u32>,
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
    #[serde(default)]
    pub pits: Vec<ZoneDef>,
    #[serde(default)]
    pub respawn_zones: Vec<ZoneDef>,
    #[serde(default)]
    pub enemies: Vec<EnemyPlacement>,
    #[serde(default)]
    pub collectables: Vec<CollectablePlacement>,
    pub level_end: ZoneDef,
}

impl LevelDef {
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::from(self.spawn)
    }
}

/// Built-in level used when no level file can be read
impl Default for LevelDef {
    fn default() -> Self {
        let ground = |x: f32, width: f32| BlockDef {
            kind: BlockKind::Ground,
            center: [x, -32.0],
            size: [width, 64.0],
        };
        let purple = |x: f32, y: f32| CollectablePlacement {
            kind: CollectableKind::PurpleDiamond,
            position: [x, y],
        };

        Self {
            level_number: 1,
            name: "Training Grounds".to_string(),
            bounds: CameraBounds {
                left: -800.0,
                right: 2400.0,
                top: 900.0,
                bottom: -400.0,
            },
            spawn: [-600.0, 40.0],
            purple_goal: Some(6),
            blocks: vec![
                ground(-200.0, 1200.0),
                ground(1550.0, 1700.0),
                BlockDef {
                    kind: BlockKind::Ground,
                    center: [500.0, 160.0],
                    size: [192.0, 24.0],
                },
                BlockDef {
                    kind: BlockKind::Wall,
                    center: [-784.0, 400.0],
                    size: [32.0, 1000.0],
                },
                BlockDef {
                    kind: BlockKind::Wall,
                    center: [2384.0, 400.0],
                    size: [32.0, 1000.0],
                },
            ],
            pits: vec![ZoneDef {
                center: [550.0, -300.0],
                size: [300.0, 64.0],
            }],
            respawn_zones: vec![ZoneDef {
                center: [900.0, 40.0],
                size: [64.0, 96.0],
            }],
            enemies: vec![
                EnemyPlacement {
                    kind: EnemyKind::Walker,
                    position: [100.0, 20.0],
                },
                EnemyPlacement {
                    kind: EnemyKind::Waller,
                    position: [1300.0, 24.0],
                },
                EnemyPlacement {
                    kind: EnemyKind::Flyer {
                        left: 1500.0,
                        right: 2200.0,
                    },
                    position: [1700.0, 300.0],
                },
            ],
            collectables: vec![
                CollectablePlacement {
                    kind: CollectableKind::Diamond,
                    position: [-300.0, 40.0],
                },
                CollectablePlacement {
                    kind: CollectableKind::DashPowerUp,
                    position: [500.0, 200.0],
                },
                purple(-100.0, 40.0),
                purple(300.0, 40.0),
                purple(800.0, 120.0),
                purple(1100.0, 40.0),
                purple(1600.0, 40.0),
                purple(1950.0, 140.0),
            ],
            level_end: ZoneDef {
                center: [2250.0, 48.0],
                size: [48.0, 96.0],
            },
        }
    }
}
