//! Level domain: restart flow between finished and fresh levels.

use bevy::prelude::*;
use std::path::Path;

use crate::camera::{CameraFrame, FramedCamera};
use crate::collectables::CollectableTuning;
use crate::content::{ActiveLevel, ContentLoadError, LevelDef, load_level};
use crate::core::{GameState, GameplayPaused, RunConfig};
use crate::dash::DashMarker;
use crate::level::LevelEntity;

const CONTENT_DIR: &str = "assets/data";

pub(crate) fn restart_keys_pressed(keyboard: &ButtonInput<KeyCode>) -> bool {
    keyboard.any_just_pressed([KeyCode::Enter, KeyCode::KeyR])
}

pub(crate) fn restart_on_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    if restart_keys_pressed(&keyboard) {
        game_state.set(GameState::Level);
    }
}

/// Pick the level to play after `current`. A missing or invalid next level
/// replays the current one.
pub(crate) fn next_level(
    current: &LevelDef,
    loaded: Result<LevelDef, ContentLoadError>,
) -> LevelDef {
    match loaded {
        Ok(level) => level,
        Err(e) => {
            info!("{}; replaying level {}", e, current.level_number);
            current.clone()
        }
    }
}

pub(crate) fn advance_level(
    mut active: ResMut<ActiveLevel>,
    mut run_config: ResMut<RunConfig>,
    tuning: Res<CollectableTuning>,
) {
    let loaded = load_level(
        Path::new(CONTENT_DIR),
        active.0.level_number + 1,
        tuning.purple_goal,
    );
    active.0 = next_level(&active.0, loaded);
    run_config.level_number = active.0.level_number;
}

/// Clear the finished level so the next `OnEnter(Level)` starts clean.
pub(crate) fn teardown_level(
    mut commands: Commands,
    entities: Query<Entity, Or<(With<LevelEntity>, With<DashMarker>)>>,
    cameras: Query<Entity, (With<FramedCamera>, With<CameraFrame>)>,
    mut paused: ResMut<GameplayPaused>,
) {
    let mut count = 0;
    for entity in &entities {
        commands.entity(entity).despawn();
        count += 1;
    }
    for camera in &cameras {
        commands.entity(camera).remove::<CameraFrame>();
    }
    paused.unpause("defeated");
    info!("Tore down level: {} entities", count);
}
