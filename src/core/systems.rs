//! Core domain: level flow systems and notification sinks.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::core::events::{LevelCompletedEvent, SoundAction, SoundCue};
use crate::core::progress::Progress;
use crate::core::resources::{GameplayPaused, RunConfig, SimulationFlags};
use crate::core::state::GameState;

pub(crate) fn load_progress(mut progress: ResMut<Progress>) {
    match progress.load() {
        Ok(levels) => info!("Loaded progress: {} level(s) unlocked", levels),
        Err(e) => warn!("{}; keeping {} level(s) unlocked", e, progress.levels_unlocked),
    }
}

pub(crate) fn transition_to_level(mut game_state: ResMut<NextState<GameState>>) {
    game_state.set(GameState::Level);
}

/// Reset shared locks so a fresh level never inherits a frozen world
pub(crate) fn reset_simulation_flags(mut flags: ResMut<SimulationFlags>) {
    *flags = SimulationFlags::default();
}

pub(crate) fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut paused: ResMut<GameplayPaused>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        paused.toggle("menu");
        info!("Gameplay paused: {}", paused.is_paused());
    }
}

/// Physics time follows the pause sources so bodies stop with the systems
pub(crate) fn sync_physics_pause(
    paused: Res<GameplayPaused>,
    mut time: ResMut<Time<Physics>>,
) {
    if paused.is_paused() != time.is_paused() {
        if paused.is_paused() {
            time.pause();
        } else {
            time.unpause();
        }
        debug!("Physics paused: {}", time.is_paused());
    }
}

/// Handle level completion - persist progress and leave the level
pub(crate) fn handle_level_completed(
    mut events: MessageReader<LevelCompletedEvent>,
    mut progress: ResMut<Progress>,
    run_config: Res<RunConfig>,
    mut sounds: MessageWriter<SoundCue>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    for event in events.read() {
        match progress.complete_level(event.level_number) {
            Ok(true) => info!(
                "Level {} complete, {} level(s) unlocked",
                event.level_number, progress.levels_unlocked
            ),
            Ok(false) => info!("Level {} complete again", run_config.level_number),
            Err(e) => warn!("Level {} complete but progress not saved: {}", event.level_number, e),
        }

        sounds.write(SoundCue::play("Win"));
        game_state.set(GameState::LevelComplete);
    }
}

/// Audio playback sink. Cues are only traced; there is no asset pipeline.
pub(crate) fn log_sound_cues(mut cues: MessageReader<SoundCue>) {
    for cue in cues.read() {
        match cue.action {
            SoundAction::Play => debug!("sound: play {}", cue.name),
            SoundAction::Stop => debug!("sound: stop {}", cue.name),
        }
    }
}

pub(crate) fn announce_defeat(mut paused: ResMut<GameplayPaused>) {
    info!("Player defeated, returning to menu flow");
    paused.pause("defeated");
}
