//! Dash domain: tests for the charge, teleport and dash-jump sequence.

use bevy::prelude::*;
use std::collections::HashMap;

use super::{
    DashContext, DashEffect, DashInput, DashMachine, DashPhase, DashTargets, DashTuning,
    DashableKind,
};
use crate::camera::CameraCommand;
use crate::core::SoundCue;
use crate::movement::GameLayer;
use crate::testing::BoxWorld;

const DT: f32 = 1.0 / 60.0;

#[derive(Default)]
struct FakeTargets {
    kinds: HashMap<Entity, DashableKind>,
    walls: HashMap<Entity, Rect>,
}

impl DashTargets for FakeTargets {
    fn dashable_kind(&self, entity: Entity) -> Option<DashableKind> {
        self.kinds.get(&entity).copied()
    }

    fn wall_bounds(&self, entity: Entity) -> Option<Rect> {
        self.walls.get(&entity).copied()
    }
}

struct Rig {
    machine: DashMachine,
    world: BoxWorld,
    targets: FakeTargets,
    tuning: DashTuning,
    ctx: DashContext,
}

impl Rig {
    /// Player standing at the origin on a long floor whose top is y = 0
    fn new() -> Self {
        let tuning = DashTuning::default();
        let mut world = BoxWorld::new();
        world.add_box(
            Vec2::new(0.0, -20.0),
            Vec2::new(4000.0, 40.0),
            GameLayer::Ground,
        );
        Self {
            machine: DashMachine::new(tuning.max_distance),
            world,
            targets: FakeTargets::default(),
            tuning,
            ctx: DashContext {
                position: Vec2::new(0.0, 24.0),
                half_extents: Vec2::new(12.0, 24.0),
                orientation: 1.0,
                grounded: true,
            },
        }
    }

    fn step(&mut self, input: DashInput) -> Vec<DashEffect> {
        let mut out = Vec::new();
        self.machine.update(
            &self.ctx,
            &input,
            &self.world,
            &self.targets,
            &self.tuning,
            DT,
            &mut out,
        );
        out
    }

    fn idle(&mut self) -> Vec<DashEffect> {
        self.step(DashInput::default())
    }

    fn press_charge(&mut self) -> Vec<DashEffect> {
        self.step(DashInput {
            charge_pressed: true,
            ..default()
        })
    }

    fn release_charge(&mut self) -> Vec<DashEffect> {
        self.step(DashInput {
            charge_released: true,
            ..default()
        })
    }

    /// Tick with no input until the phase changes, collecting every effect
    fn run_until_phase_changes(&mut self) -> Vec<DashEffect> {
        let start = self.machine.phase();
        let mut all = Vec::new();
        for _ in 0..600 {
            all.extend(self.idle());
            if self.machine.phase() != start {
                return all;
            }
        }
        panic!("phase {:?} never ended", start);
    }

    fn run_for(&mut self, seconds: f32) -> Vec<DashEffect> {
        let mut all = Vec::new();
        let ticks = (seconds / DT).ceil() as usize;
        for _ in 0..ticks {
            all.extend(self.idle());
        }
        all
    }

    /// Charge, wait for the marker to reach full range, release and land
    fn dash_to_jump_window(&mut self) -> Vec<DashEffect> {
        let mut all = self.press_charge();
        all.extend(self.run_until_phase_changes());
        all.extend(self.run_for(2.0));
        all.extend(self.release_charge());
        all.extend(self.run_until_phase_changes());
        assert_eq!(self.machine.phase(), DashPhase::JumpWindow);
        all
    }
}

fn teleport_target(effects: &[DashEffect]) -> Option<Vec2> {
    effects.iter().find_map(|e| match e {
        DashEffect::Teleport(p) => Some(*p),
        _ => None,
    })
}

fn dashed(effects: &[DashEffect]) -> Vec<(Entity, DashableKind)> {
    effects
        .iter()
        .filter_map(|e| match e {
            DashEffect::DashedThrough { entity, kind } => Some((*entity, *kind)),
            _ => None,
        })
        .collect()
}

// -----------------------------------------------------------------------------
// Charge acceptance
// -----------------------------------------------------------------------------

#[test]
fn test_charge_spawns_marker_ahead_of_player() {
    let mut rig = Rig::new();
    let effects = rig.press_charge();

    assert_eq!(rig.machine.phase(), DashPhase::Preparing);
    assert!(effects.contains(&DashEffect::SpawnMarker(Vec2::new(40.0, 24.0))));
    assert!(effects.contains(&DashEffect::Sound(SoundCue::play("Star"))));
    assert!(effects.contains(&DashEffect::Camera(CameraCommand::FrameCharge {
        orientation: 1.0
    })));
}

#[test]
fn test_charge_rejected_while_airborne() {
    let mut rig = Rig::new();
    rig.ctx.grounded = false;

    let effects = rig.press_charge();
    assert_eq!(rig.machine.phase(), DashPhase::Idle);
    assert!(effects.is_empty());
}

#[test]
fn test_charge_rejected_when_spawn_point_is_inside_wall() {
    let mut rig = Rig::new();
    rig.world.add_box(
        Vec2::new(50.0, 60.0),
        Vec2::new(20.0, 120.0),
        GameLayer::Wall,
    );

    rig.press_charge();
    assert_eq!(rig.machine.phase(), DashPhase::Idle);
}

#[test]
fn test_charge_rejected_while_settling() {
    let mut rig = Rig::new();
    rig.dash_to_jump_window();
    rig.run_until_phase_changes();
    assert_eq!(rig.machine.phase(), DashPhase::Settling);

    let effects = rig.press_charge();
    assert_eq!(rig.machine.phase(), DashPhase::Settling);
    assert!(!effects.iter().any(|e| matches!(e, DashEffect::SpawnMarker(_))));
}

// -----------------------------------------------------------------------------
// Preparing / Charging
// -----------------------------------------------------------------------------

#[test]
fn test_preparing_becomes_charging_after_delay() {
    let mut rig = Rig::new();
    rig.press_charge();

    let effects = rig.run_until_phase_changes();
    assert_eq!(rig.machine.phase(), DashPhase::Charging);
    assert!(effects.contains(&DashEffect::Sound(SoundCue::play("Charge"))));
}

#[test]
fn test_release_while_preparing_cancels() {
    let mut rig = Rig::new();
    rig.press_charge();
    rig.idle();

    let effects = rig.release_charge();
    assert_eq!(rig.machine.phase(), DashPhase::Idle);
    assert!(effects.contains(&DashEffect::DespawnMarker));
    assert!(!effects.contains(&DashEffect::Lock));
    assert!(rig.machine.marker().is_none());
}

#[test]
fn test_marker_stops_at_max_distance() {
    let mut rig = Rig::new();
    rig.press_charge();
    rig.run_until_phase_changes();

    // Travel time for the full reach is max_distance / speed
    let travel = rig.tuning.max_distance / rig.tuning.marker_speed;
    rig.run_for(travel + 0.1);

    let marker = rig.machine.marker().unwrap();
    assert_eq!(marker.x, rig.tuning.max_distance);
    assert_eq!(marker.y, 24.0);
}

#[test]
fn test_marker_moves_left_when_facing_left() {
    let mut rig = Rig::new();
    rig.ctx.orientation = -1.0;
    rig.press_charge();
    rig.run_until_phase_changes();
    rig.run_for(2.0);

    assert_eq!(rig.machine.marker().unwrap().x, -rig.tuning.max_distance);
}

#[test]
fn test_marker_halts_at_wall_without_final_step() {
    let mut rig = Rig::new();
    // Wall face at x = 100
    rig.world.add_box(
        Vec2::new(110.0, 60.0),
        Vec2::new(20.0, 120.0),
        GameLayer::Wall,
    );
    rig.press_charge();
    rig.run_until_phase_changes();
    rig.run_for(2.0);

    // The probe fires within wall_probe_distance of the face; at most one
    // step was taken before that
    let marker = rig.machine.marker().unwrap();
    let step = rig.tuning.marker_speed * DT;
    assert!(marker.x < 100.0);
    assert!(marker.x >= 100.0 - rig.tuning.wall_probe_distance - step);
    assert_eq!(rig.machine.phase(), DashPhase::Charging);

    let held = rig.run_for(0.5);
    assert!(!held.iter().any(|e| matches!(e, DashEffect::MoveMarker(_))));
    assert_eq!(rig.machine.marker().unwrap(), marker);
}

#[test]
fn test_power_up_extends_reach() {
    let mut rig = Rig::new();
    rig.machine.extend_range(rig.tuning.power_up_increment);
    rig.press_charge();
    rig.run_until_phase_changes();
    rig.run_for(2.0);

    assert_eq!(
        rig.machine.marker().unwrap().x,
        rig.tuning.max_distance + rig.tuning.power_up_increment
    );
}

// -----------------------------------------------------------------------------
// Release, teleport and landing
// -----------------------------------------------------------------------------

#[test]
fn test_release_while_charging_locks_and_teleports() {
    let mut rig = Rig::new();
    rig.press_charge();
    rig.run_until_phase_changes();
    rig.run_for(2.0);

    let released = rig.release_charge();
    assert_eq!(rig.machine.phase(), DashPhase::Teleporting);
    assert!(released.contains(&DashEffect::Lock));
    assert!(released.contains(&DashEffect::DespawnMarker));
    assert!(released.contains(&DashEffect::Camera(CameraCommand::SetSmoothing(
        rig.tuning.locked_smoothing
    ))));
    assert!(released.contains(&DashEffect::Sound(SoundCue::play("Disappear"))));

    let landed = rig.run_until_phase_changes();
    assert_eq!(rig.machine.phase(), DashPhase::JumpWindow);
    let target = teleport_target(&landed).unwrap();
    assert!((target.x - rig.tuning.max_distance).abs() < 1e-4);
    assert!((target.y - 24.0).abs() < 1e-3);
    assert!(landed.contains(&DashEffect::Sound(SoundCue::play("Cut"))));
}

#[test]
fn test_landing_inside_step_is_nudged_up() {
    let mut rig = Rig::new();
    // Step whose top (y = 10) buries the feet of a player landing at x = 224
    rig.world.add_box(
        Vec2::new(224.0, 0.0),
        Vec2::new(40.0, 20.0),
        GameLayer::Ground,
    );

    let effects = rig.dash_to_jump_window();
    let target = teleport_target(&effects).unwrap();
    assert!((target.y - 34.0).abs() < 1e-3);
}

#[test]
fn test_waller_in_wall_form_redirects_target() {
    let mut rig = Rig::new();
    let waller = rig.world.add_box(
        Vec2::new(150.0, 24.0),
        Vec2::new(32.0, 48.0),
        GameLayer::Enemy,
    );
    rig.targets.kinds.insert(waller, DashableKind::Enemy);
    let wall = Rect::from_center_half_size(Vec2::new(150.0, 24.0), Vec2::new(16.0, 24.0));
    rig.targets.walls.insert(waller, wall);

    let effects = rig.dash_to_jump_window();
    let target = teleport_target(&effects).unwrap();
    // Near face at 134; the 24 wide body stops a quarter width before it
    assert!((target.x - 116.0).abs() < 1e-4);
    assert!(target.x + rig.ctx.half_extents.x < wall.min.x);
}

// -----------------------------------------------------------------------------
// Jump window, settling and hit-scan
// -----------------------------------------------------------------------------

#[test]
fn test_dash_jump_launches_diagonally_and_hits_path() {
    let mut rig = Rig::new();
    let enemy = rig.world.add_box(
        Vec2::new(100.0, 24.0),
        Vec2::new(24.0, 24.0),
        GameLayer::Enemy,
    );
    rig.targets.kinds.insert(enemy, DashableKind::Enemy);

    rig.dash_to_jump_window();
    // Wait out the delay before the window opens
    rig.run_for(rig.tuning.jump_start_delay);

    let effects = rig.step(DashInput {
        jump_pressed: true,
        ..default()
    });
    assert_eq!(rig.machine.phase(), DashPhase::Settling);
    assert!(rig.machine.dash_jumped());
    assert!(effects.contains(&DashEffect::ReleaseWorld));
    assert_eq!(dashed(&effects), vec![(enemy, DashableKind::Enemy)]);
    assert!(effects.contains(&DashEffect::Sound(SoundCue::play("SwordHit"))));

    let launch = effects
        .iter()
        .find_map(|e| match e {
            DashEffect::Launch(v) => Some(*v),
            _ => None,
        })
        .unwrap();
    let expected = Vec2::new(1.0, 1.0).normalize() * rig.tuning.jump_impulse;
    assert!((launch - expected).length() < 1e-3);
}

#[test]
fn test_dash_jump_requires_ground() {
    let mut rig = Rig::new();
    rig.dash_to_jump_window();
    rig.run_for(rig.tuning.jump_start_delay);
    rig.ctx.grounded = false;

    rig.step(DashInput {
        jump_pressed: true,
        ..default()
    });
    assert_eq!(rig.machine.phase(), DashPhase::JumpWindow);
}

#[test]
fn test_window_expiry_releases_world_then_restores_control() {
    let mut rig = Rig::new();
    let effects = rig.dash_to_jump_window();
    assert!(!effects.contains(&DashEffect::ReleaseWorld));

    let expired = rig.run_until_phase_changes();
    assert_eq!(rig.machine.phase(), DashPhase::Settling);
    assert!(!rig.machine.dash_jumped());
    assert!(expired.contains(&DashEffect::Sound(SoundCue::play("Appear"))));
    assert!(expired.contains(&DashEffect::ReleaseWorld));
    assert!(!expired.contains(&DashEffect::RestoreControl));

    let settled = rig.run_until_phase_changes();
    assert_eq!(rig.machine.phase(), DashPhase::Idle);
    assert!(settled.contains(&DashEffect::RestoreControl));
    assert!(settled.contains(&DashEffect::Camera(CameraCommand::EaseSmoothing {
        target: rig.tuning.normal_smoothing,
        delay: rig.tuning.smoothing_ease_delay,
        duration: rig.tuning.smoothing_ease_duration,
    })));
}

#[test]
fn test_hit_scan_notifies_each_dashable_once_in_order() {
    let mut rig = Rig::new();
    let near = rig.world.add_box(
        Vec2::new(80.0, 24.0),
        Vec2::new(16.0, 16.0),
        GameLayer::Enemy,
    );
    let gem = rig.world.add_box(
        Vec2::new(120.0, 24.0),
        Vec2::new(16.0, 16.0),
        GameLayer::Collectable,
    );
    let far = rig.world.add_box(
        Vec2::new(160.0, 24.0),
        Vec2::new(16.0, 16.0),
        GameLayer::Enemy,
    );
    // Second collider on the near enemy, further along the path
    rig.world.attach_box(
        near,
        Vec2::new(190.0, 24.0),
        Vec2::new(16.0, 16.0),
        GameLayer::Enemy,
    );
    // Scenery on a dashable layer without a dashable component
    rig.world.add_box(
        Vec2::new(60.0, 24.0),
        Vec2::new(4.0, 4.0),
        GameLayer::Enemy,
    );
    rig.targets.kinds.insert(near, DashableKind::Enemy);
    rig.targets.kinds.insert(gem, DashableKind::Collectable);
    rig.targets.kinds.insert(far, DashableKind::Enemy);

    rig.dash_to_jump_window();
    let effects = rig.run_until_phase_changes();

    assert_eq!(
        dashed(&effects),
        vec![
            (near, DashableKind::Enemy),
            (gem, DashableKind::Collectable),
            (far, DashableKind::Enemy),
        ]
    );
}

// -----------------------------------------------------------------------------
// Cancellation
// -----------------------------------------------------------------------------

#[test]
fn test_cancel_while_idle_does_nothing() {
    let mut rig = Rig::new();
    let mut out = Vec::new();
    rig.machine.cancel(&rig.tuning, &mut out);
    assert!(out.is_empty());
}

#[test]
fn test_cancel_mid_teleport_restores_every_lock() {
    let mut rig = Rig::new();
    rig.press_charge();
    rig.run_until_phase_changes();
    rig.release_charge();
    assert_eq!(rig.machine.phase(), DashPhase::Teleporting);

    let mut out = Vec::new();
    rig.machine.cancel(&rig.tuning, &mut out);
    assert_eq!(rig.machine.phase(), DashPhase::Idle);
    assert!(out.contains(&DashEffect::ReleaseWorld));
    assert!(out.contains(&DashEffect::RestoreControl));
    assert!(out.contains(&DashEffect::Camera(CameraCommand::SetSmoothing(
        rig.tuning.normal_smoothing
    ))));

    // Nothing left to finish afterwards
    let later = rig.run_for(1.0);
    assert!(teleport_target(&later).is_none());
}

#[test]
fn test_cancel_after_dash_jump_still_restores_control() {
    let mut rig = Rig::new();
    rig.dash_to_jump_window();
    rig.run_for(rig.tuning.jump_start_delay);
    rig.step(DashInput {
        jump_pressed: true,
        ..default()
    });

    let mut out = Vec::new();
    rig.machine.cancel(&rig.tuning, &mut out);
    assert!(out.contains(&DashEffect::RestoreControl));
    assert!(!rig.machine.dash_jumped());
}

#[test]
fn test_locomotion_interrupt_only_breaks_charge() {
    let mut rig = Rig::new();
    rig.press_charge();
    let mut out = Vec::new();
    rig.machine.interrupt(&rig.tuning, &mut out);
    assert_eq!(rig.machine.phase(), DashPhase::Idle);
    assert!(out.contains(&DashEffect::DespawnMarker));

    let mut rig = Rig::new();
    rig.dash_to_jump_window();
    let mut out = Vec::new();
    rig.machine.interrupt(&rig.tuning, &mut out);
    assert_eq!(rig.machine.phase(), DashPhase::JumpWindow);
    assert!(out.is_empty());
}
