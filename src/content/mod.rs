//! Content domain: tuning and level data loaded from RON files.

mod data;
mod loader;
mod validation;


pub use data::{
    BlockDef, BlockKind, CollectablePlacement, EnemyPlacement, GameplayTuning, LevelDef, ZoneDef,
};
pub use loader::{ContentLoadError, load_level, load_tuning, parse_single};
pub use validation::{ValidationError, validate_level};

use bevy::prelude::*;
use std::path::Path;

use crate::core::RunConfig;

const CONTENT_DIR: &str = "assets/data";

/// The level being played
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveLevel(pub LevelDef);

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveLevel>()
            .add_systems(Startup, load_content);
    }
}

/// Replace the built-in defaults with whatever loads; failures keep them.
fn load_content(mut commands: Commands, run_config: Res<RunConfig>) {
    let base_path = Path::new(CONTENT_DIR);

    let tuning = match load_tuning(base_path) {
        Ok(tuning) => {
            info!("Loaded gameplay tuning from {}", CONTENT_DIR);
            tuning
        }
        Err(e) => {
            warn!("{}; using default tuning", e);
            GameplayTuning::default()
        }
    };

    let level = match load_level(
        base_path,
        run_config.level_number,
        tuning.collectables.purple_goal,
    ) {
        Ok(level) => {
            info!("Loaded level {} '{}'", level.level_number, level.name);
            level
        }
        Err(e) => {
            warn!("{}; using the built-in level", e);
            LevelDef::default()
        }
    };

    commands.insert_resource(tuning.movement);
    commands.insert_resource(tuning.dash);
    commands.insert_resource(tuning.camera);
    commands.insert_resource(tuning.enemies);
    commands.insert_resource(tuning.damage);
    commands.insert_resource(tuning.collectables);
    commands.insert_resource(ActiveLevel(level));
}
