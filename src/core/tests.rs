//! Core domain: unit tests for pause sources, flags and progress persistence.

use avian2d::prelude::*;
use bevy::prelude::*;
use std::path::PathBuf;

use super::systems::sync_physics_pause;
use super::{FileProgressStore, GameplayPaused, Progress, ProgressStore, SimulationFlags};

fn scratch_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "dash-platformer-{}-{}",
        std::process::id(),
        name
    ));
    path.push("progress.json");
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn test_pause_sources() {
    let mut paused = GameplayPaused::default();
    assert!(!paused.is_paused());

    paused.pause("menu");
    paused.pause("defeated");
    assert!(paused.is_paused());

    paused.unpause("menu");
    assert!(paused.is_paused());

    paused.unpause("defeated");
    assert!(!paused.is_paused());
}

#[test]
fn test_pause_toggle() {
    let mut paused = GameplayPaused::default();
    paused.toggle("menu");
    assert!(paused.is_paused());
    paused.toggle("menu");
    assert!(!paused.is_paused());
}

#[test]
fn test_physics_time_follows_pause_sources() {
    let mut app = App::new();
    app.init_resource::<GameplayPaused>()
        .init_resource::<Time<Physics>>()
        .add_systems(Update, sync_physics_pause);

    app.update();
    assert!(!app.world().resource::<Time<Physics>>().is_paused());

    app.world_mut()
        .resource_mut::<GameplayPaused>()
        .pause("menu");
    app.world_mut()
        .resource_mut::<GameplayPaused>()
        .pause("defeated");
    app.update();
    assert!(app.world().resource::<Time<Physics>>().is_paused());

    app.world_mut()
        .resource_mut::<GameplayPaused>()
        .unpause("menu");
    app.update();
    assert!(app.world().resource::<Time<Physics>>().is_paused());

    app.world_mut()
        .resource_mut::<GameplayPaused>()
        .unpause("defeated");
    app.update();
    assert!(!app.world().resource::<Time<Physics>>().is_paused());
}

#[test]
fn test_simulation_flags_start_enabled() {
    let flags = SimulationFlags::default();
    assert!(flags.enemy_motion_enabled);
    assert!(flags.camera_tracking_enabled);
}

#[test]
fn test_missing_progress_file_is_created_with_one_level() {
    let path = scratch_path("missing");
    let store = FileProgressStore::new(&path);

    assert_eq!(store.load().unwrap(), 1);
    assert!(path.exists());
    assert_eq!(store.load().unwrap(), 1);
}

#[test]
fn test_progress_round_trips_through_file() {
    let path = scratch_path("roundtrip");
    let store = FileProgressStore::new(&path);

    store.save(4).unwrap();
    assert_eq!(store.load().unwrap(), 4);
}

#[test]
fn test_complete_level_only_advances_from_furthest_level() {
    let path = scratch_path("complete");
    let mut progress = Progress::with_store(FileProgressStore::new(&path));
    progress.load().unwrap();
    assert_eq!(progress.levels_unlocked, 1);

    assert!(progress.complete_level(1).unwrap());
    assert_eq!(progress.levels_unlocked, 2);

    // Replaying an earlier level does not unlock anything new
    assert!(!progress.complete_level(1).unwrap());
    assert_eq!(progress.levels_unlocked, 2);

    let reloaded = FileProgressStore::new(&path).load().unwrap();
    assert_eq!(reloaded, 2);
}

#[test]
fn test_corrupt_progress_file_reports_error() {
    let path = scratch_path("corrupt");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json").unwrap();

    let err = FileProgressStore::new(&path).load().unwrap_err();
    assert!(err.to_string().contains("Parse error"));
}
