//! Level domain: collision layer and level advance tests.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::systems::{next_level, restart_keys_pressed};
use super::{block_layers, sensor_layers};
use crate::content::{BlockKind, ContentLoadError, LevelDef};
use crate::movement::GameLayer;

fn mask(layer: GameLayer) -> LayerMask {
    LayerMask::from(layer)
}

// -----------------------------------------------------------------------------
// Collision layers
// -----------------------------------------------------------------------------

#[test]
fn test_blocks_collide_with_player_and_enemies() {
    let ground = block_layers(BlockKind::Ground);
    assert_eq!(ground.memberships, mask(GameLayer::Ground));
    assert!(ground.filters.has_all(mask(GameLayer::Player)));
    assert!(ground.filters.has_all(mask(GameLayer::Enemy)));

    let wall = block_layers(BlockKind::Wall);
    assert_eq!(wall.memberships, mask(GameLayer::Wall));
}

#[test]
fn test_sensors_only_see_the_player() {
    let sensor = sensor_layers();
    assert_eq!(sensor.memberships, mask(GameLayer::Sensor));
    assert!(sensor.filters.has_all(mask(GameLayer::Player)));
    assert!(!sensor.filters.has_all(mask(GameLayer::Enemy)));
}

// -----------------------------------------------------------------------------
// Level flow
// -----------------------------------------------------------------------------

#[test]
fn test_next_level_advances_when_loaded() {
    let current = LevelDef::default();
    let mut following = LevelDef::default();
    following.level_number = current.level_number + 1;
    following.name = "Second".to_string();

    let next = next_level(&current, Ok(following));
    assert_eq!(next.level_number, current.level_number + 1);
    assert_eq!(next.name, "Second");
}

#[test]
fn test_missing_next_level_replays_current() {
    let current = LevelDef::default();
    let err = ContentLoadError {
        file: "level_2.ron".to_string(),
        message: "IO error: not found".to_string(),
    };

    let next = next_level(&current, Err(err));
    assert_eq!(next.level_number, current.level_number);
    assert_eq!(next.name, current.name);
}

#[test]
fn test_restart_keys() {
    let mut keyboard = ButtonInput::<KeyCode>::default();
    assert!(!restart_keys_pressed(&keyboard));

    keyboard.press(KeyCode::KeyR);
    assert!(restart_keys_pressed(&keyboard));

    keyboard.clear();
    keyboard.press(KeyCode::Space);
    assert!(!restart_keys_pressed(&keyboard));
}
