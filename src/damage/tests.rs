//! Damage domain: lives and invulnerability window tests.

use avian2d::prelude::*;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;

use super::systems::{damage_on_enemy_contact, freeze_defeated_player};
use super::{
    DamageTuning, HitOutcome, Invulnerability, Lives, PlayerDefeatedEvent, pit_penalty,
    player_collision_layers, take_hit,
};
use crate::camera::CameraCommand;
use crate::core::{GameState, SimulationFlags, SoundCue, UiNotice};
use crate::dash::{
    DashContext, DashEffect, DashEffects, DashInput, DashMachine, DashPhase, DashTargets,
    DashTuning, DashableKind, DashedThroughEvent,
};
use crate::enemies::{Enemy, EnemyState};
use crate::movement::{GameLayer, MovementState, Player};
use crate::testing::BoxWorld;

const DT: f32 = 1.0 / 60.0;

fn run_window(
    invulnerability: &mut Invulnerability,
    tuning: &DamageTuning,
    seconds: f32,
) -> Vec<f32> {
    let mut alphas = Vec::new();
    for _ in 0..(seconds / DT).round() as usize {
        if let Some(alpha) = invulnerability.tick(tuning, DT) {
            alphas.push(alpha);
        }
    }
    alphas
}

// -----------------------------------------------------------------------------
// Hits
// -----------------------------------------------------------------------------

#[test]
fn test_invulnerability_window_absorbs_third_hit() {
    let tuning = DamageTuning::default();
    let mut lives = Lives::new(tuning.starting_lives);
    let mut invulnerability = Invulnerability::default();
    assert_eq!(lives.current, 3);

    assert_eq!(
        take_hit(&mut lives, &mut invulnerability),
        HitOutcome::Hit { lives: 2 }
    );
    run_window(&mut invulnerability, &tuning, tuning.invulnerability_time + 0.1);
    assert!(!invulnerability.is_active());

    assert_eq!(
        take_hit(&mut lives, &mut invulnerability),
        HitOutcome::Hit { lives: 1 }
    );
    run_window(&mut invulnerability, &tuning, tuning.invulnerability_time * 0.5);
    assert!(invulnerability.is_active());

    assert_eq!(
        take_hit(&mut lives, &mut invulnerability),
        HitOutcome::Ignored
    );
    assert_eq!(lives.current, 1);
}

#[test]
fn test_last_life_defeats() {
    let mut lives = Lives::new(1);
    let mut invulnerability = Invulnerability::default();

    assert_eq!(
        take_hit(&mut lives, &mut invulnerability),
        HitOutcome::Defeated
    );
    assert!(lives.is_out());
}

#[test]
fn test_pit_fall_during_window_keeps_life_and_restarts_window() {
    let tuning = DamageTuning::default();
    let mut lives = Lives::new(3);
    let mut invulnerability = Invulnerability::default();
    take_hit(&mut lives, &mut invulnerability);
    run_window(&mut invulnerability, &tuning, tuning.invulnerability_time - 0.2);

    assert_eq!(
        pit_penalty(&mut lives, &mut invulnerability),
        HitOutcome::Ignored
    );
    assert_eq!(lives.current, 2);

    // The restarted window outlasts what remained of the old one
    run_window(&mut invulnerability, &tuning, 0.5);
    assert!(invulnerability.is_active());
}

#[test]
fn test_pit_fall_costs_a_life() {
    let mut lives = Lives::new(3);
    let mut invulnerability = Invulnerability::default();

    assert_eq!(
        pit_penalty(&mut lives, &mut invulnerability),
        HitOutcome::Hit { lives: 2 }
    );
    assert!(invulnerability.is_active());
}

// -----------------------------------------------------------------------------
// Blinking
// -----------------------------------------------------------------------------

#[test]
fn test_blink_alternates_and_ends_opaque() {
    let tuning = DamageTuning::default();
    let mut invulnerability = Invulnerability::default();
    invulnerability.start();

    let alphas = run_window(&mut invulnerability, &tuning, tuning.invulnerability_time + 0.1);
    assert!(alphas.len() > 3);
    assert_eq!(alphas[0], 0.5);
    assert_eq!(alphas[1], 1.0);
    assert_eq!(alphas[2], 0.5);
    assert_eq!(alphas.last(), Some(&1.0));
    assert!(!invulnerability.is_active());
}

#[test]
fn test_idle_window_reports_nothing() {
    let tuning = DamageTuning::default();
    let mut invulnerability = Invulnerability::default();
    assert!(run_window(&mut invulnerability, &tuning, 1.0).is_empty());
}

// -----------------------------------------------------------------------------
// Collision filtering
// -----------------------------------------------------------------------------

#[test]
fn test_enemies_filtered_only_while_invulnerable() {
    let enemy = LayerMask::from(GameLayer::Enemy).0;

    let normal = player_collision_layers(false);
    assert_ne!(normal.filters.0 & enemy, 0);

    let invulnerable = player_collision_layers(true);
    assert_eq!(invulnerable.filters.0 & enemy, 0);
    assert_ne!(
        invulnerable.filters.0 & LayerMask::from(GameLayer::Ground).0,
        0
    );
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

type PlayerMotion = (
    Entity,
    &'static mut Transform,
    &'static mut MovementState,
    &'static mut LinearVelocity,
);

struct NoTargets;

impl DashTargets for NoTargets {
    fn dashable_kind(&self, _entity: Entity) -> Option<DashableKind> {
        None
    }

    fn wall_bounds(&self, _entity: Entity) -> Option<Rect> {
        None
    }
}

/// A machine that has just released its charge, plus every effect emitted
/// on the way there
fn released_dash(tuning: &DashTuning) -> (DashMachine, Vec<DashEffect>) {
    let mut world = BoxWorld::new();
    world.add_box(
        Vec2::new(0.0, -20.0),
        Vec2::new(4000.0, 40.0),
        GameLayer::Ground,
    );
    let ctx = DashContext {
        position: Vec2::new(0.0, 24.0),
        half_extents: Vec2::new(12.0, 24.0),
        orientation: 1.0,
        grounded: true,
    };

    let mut machine = DashMachine::new(tuning.max_distance);
    let mut out = Vec::new();
    let charge = DashInput {
        charge_pressed: true,
        ..default()
    };
    machine.update(&ctx, &charge, &world, &NoTargets, tuning, DT, &mut out);
    for _ in 0..120 {
        if machine.phase() == DashPhase::Charging {
            break;
        }
        let idle = DashInput::default();
        machine.update(&ctx, &idle, &world, &NoTargets, tuning, DT, &mut out);
    }
    let release = DashInput {
        charge_released: true,
        ..default()
    };
    machine.update(&ctx, &release, &world, &NoTargets, tuning, DT, &mut out);
    assert_eq!(machine.phase(), DashPhase::Teleporting);
    (machine, out)
}

fn contact_app() -> App {
    let mut app = App::new();
    app.init_resource::<DamageTuning>()
        .init_resource::<DashTuning>()
        .init_resource::<SimulationFlags>()
        .init_resource::<NextState<GameState>>()
        .add_message::<CollisionStart>()
        .add_message::<SoundCue>()
        .add_message::<CameraCommand>()
        .add_message::<DashedThroughEvent>()
        .add_message::<UiNotice>()
        .add_message::<PlayerDefeatedEvent>();
    app
}

#[test]
fn test_enemy_contact_mid_dash_unlocks_everything_and_costs_a_life() {
    let mut app = contact_app();
    app.add_systems(Update, damage_on_enemy_contact);

    let tuning = DashTuning::default();
    let (machine, mut pending) = released_dash(&tuning);
    let player = app
        .world_mut()
        .spawn((
            Player,
            Transform::from_xyz(0.0, 24.0, 0.0),
            MovementState::default(),
            LinearVelocity(Vec2::new(80.0, 0.0)),
            machine,
            Lives::new(3),
            Invulnerability::default(),
        ))
        .id();
    let enemy = app.world_mut().spawn(Enemy::new(Vec2::splat(28.0))).id();

    // Apply the release so every lock is held
    let lock = move |mut effects: DashEffects, mut players: Query<PlayerMotion, With<Player>>| {
        for (entity, mut transform, mut state, mut velocity) in &mut players {
            effects.apply(entity, &mut pending, &mut transform, &mut state, &mut velocity);
        }
    };
    app.world_mut().run_system_once(lock).unwrap();
    {
        let world = app.world();
        let flags = world.resource::<SimulationFlags>();
        assert!(!flags.enemy_motion_enabled);
        assert!(!flags.camera_tracking_enabled);
        let state = world.get::<MovementState>(player).unwrap();
        assert!(!state.movement_enabled);
        assert!(!state.gravity_enabled);
        assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec2::ZERO);
    }

    app.world_mut().write_message(CollisionStart {
        collider1: enemy,
        collider2: player,
        body1: Some(enemy),
        body2: Some(player),
    });
    app.update();

    let world = app.world();
    let flags = world.resource::<SimulationFlags>();
    assert!(flags.enemy_motion_enabled);
    assert!(flags.camera_tracking_enabled);
    let state = world.get::<MovementState>(player).unwrap();
    assert!(state.movement_enabled);
    assert!(state.gravity_enabled);
    assert!(!state.physics_driven);
    assert_eq!(
        world.get::<DashMachine>(player).unwrap().phase(),
        DashPhase::Idle
    );
    assert_eq!(world.get::<Lives>(player).unwrap().current, 2);
    assert!(world.get::<Invulnerability>(player).unwrap().is_active());
}

#[test]
fn test_defeat_freezes_living_enemies() {
    let mut app = contact_app();
    app.add_systems(Update, freeze_defeated_player);

    let player = app
        .world_mut()
        .spawn((
            Player,
            MovementState::default(),
            LinearVelocity(Vec2::new(0.0, -50.0)),
        ))
        .id();
    let walking = app
        .world_mut()
        .spawn((
            Enemy::new(Vec2::splat(28.0)),
            LinearVelocity(Vec2::new(100.0, 0.0)),
        ))
        .id();
    let mut dead_enemy = Enemy::new(Vec2::splat(28.0));
    dead_enemy.state = EnemyState::Dead;
    let dying = app
        .world_mut()
        .spawn((dead_enemy, LinearVelocity(Vec2::new(-60.0, 200.0))))
        .id();

    app.world_mut().write_message(PlayerDefeatedEvent { player });
    for _ in 0..3 {
        app.update();
    }

    let world = app.world();
    assert!(world.get::<RigidBodyDisabled>(player).is_some());
    assert!(world.get::<RigidBodyDisabled>(walking).is_some());
    assert!(world.get::<RigidBodyDisabled>(dying).is_none());
    assert!(!world.resource::<SimulationFlags>().enemy_motion_enabled);
    assert!(!world.get::<MovementState>(player).unwrap().movement_enabled);
    assert!(matches!(
        world.resource::<NextState<GameState>>(),
        NextState::Pending(GameState::Defeated)
    ));
}
