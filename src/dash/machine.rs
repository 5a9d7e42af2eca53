//! Dash domain: the charge / teleport / dash-jump sequence.
//!
//! `DashMachine` is driven once per tick and reports what should happen to
//! the world as a list of `DashEffect`s. Every lock it acquires in
//! `release` has a matching release in `cancel`.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::camera::CameraCommand;
use crate::core::SoundCue;
use crate::dash::DashTuning;
use crate::movement::{GameLayer, PhysicsQuery, solid_mask};

const EMBED_PROBE_HEIGHT: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashPhase {
    #[default]
    Idle,
    Preparing,
    Charging,
    Teleporting,
    JumpWindow,
    Settling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashableKind {
    Enemy,
    Collectable,
}

/// World lookups the dash needs about entities crossed by its path.
pub trait DashTargets {
    fn dashable_kind(&self, entity: Entity) -> Option<DashableKind>;
    /// Bounds of `entity` if it is a waller currently standing as a wall
    fn wall_bounds(&self, entity: Entity) -> Option<Rect>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashEffect {
    SpawnMarker(Vec2),
    MoveMarker(Vec2),
    DespawnMarker,
    Sound(SoundCue),
    Camera(CameraCommand),
    /// Disable player control and gravity, zero velocity, stop camera
    /// tracking and enemy motion
    Lock,
    /// Restore gravity, camera tracking and enemy motion
    ReleaseWorld,
    /// Restore player control and clear the physics-driven flag
    RestoreControl,
    Teleport(Vec2),
    /// Impulse-driven velocity that owns the player until control returns
    Launch(Vec2),
    DashedThrough { entity: Entity, kind: DashableKind },
}

#[derive(Debug, Clone, Copy)]
pub struct DashContext {
    pub position: Vec2,
    pub half_extents: Vec2,
    pub orientation: f32,
    pub grounded: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DashInput {
    pub charge_pressed: bool,
    pub charge_released: bool,
    pub jump_pressed: bool,
}

pub fn dashable_mask() -> LayerMask {
    LayerMask::from([GameLayer::Enemy, GameLayer::Collectable])
}

#[derive(Component, Debug, Clone)]
pub struct DashMachine {
    phase: DashPhase,
    elapsed: f32,
    orientation: f32,
    marker: Option<Vec2>,
    marker_blocked: bool,
    origin: Vec2,
    target: Vec2,
    window_open: bool,
    dash_jumped: bool,
    max_distance: f32,
}

impl DashMachine {
    pub fn new(max_distance: f32) -> Self {
        Self {
            phase: DashPhase::Idle,
            elapsed: 0.0,
            orientation: 1.0,
            marker: None,
            marker_blocked: false,
            origin: Vec2::ZERO,
            target: Vec2::ZERO,
            window_open: false,
            dash_jumped: false,
            max_distance,
        }
    }

    pub fn phase(&self) -> DashPhase {
        self.phase
    }

    pub fn marker(&self) -> Option<Vec2> {
        self.marker
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    pub fn dash_jumped(&self) -> bool {
        self.dash_jumped
    }

    pub fn is_active(&self) -> bool {
        self.phase != DashPhase::Idle
    }

    /// Power-up pickup
    pub fn extend_range(&mut self, increment: f32) {
        self.max_distance += increment;
    }

    fn enter(&mut self, phase: DashPhase) {
        debug!("Dash: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.elapsed = 0.0;
    }

    /// One tick: advance timers, then react to this tick's input edges.
    pub fn update(
        &mut self,
        ctx: &DashContext,
        input: &DashInput,
        physics: &impl PhysicsQuery,
        targets: &impl DashTargets,
        tuning: &DashTuning,
        dt: f32,
        out: &mut Vec<DashEffect>,
    ) {
        self.tick(ctx, input, physics, targets, tuning, dt, out);
        if input.charge_pressed {
            self.charge(ctx, physics, tuning, out);
        }
        if input.charge_released {
            self.release(ctx, tuning, out);
        }
    }

    /// Start charging. Returns false when the request is rejected.
    pub fn charge(
        &mut self,
        ctx: &DashContext,
        physics: &impl PhysicsQuery,
        tuning: &DashTuning,
        out: &mut Vec<DashEffect>,
    ) -> bool {
        if self.phase != DashPhase::Idle {
            debug!("Dash charge rejected: sequence already in {:?}", self.phase);
            return false;
        }
        if !ctx.grounded {
            debug!("Dash charge rejected: airborne");
            return false;
        }

        let spawn = ctx.position + Vec2::new(tuning.spawn_distance * ctx.orientation, 0.0);
        if !physics
            .overlap_circle(spawn, tuning.spawn_clearance, solid_mask())
            .is_empty()
        {
            debug!("Dash charge rejected: no room for the marker at {:?}", spawn);
            return false;
        }

        self.orientation = ctx.orientation;
        self.marker = Some(spawn);
        self.marker_blocked = false;
        self.dash_jumped = false;
        out.push(DashEffect::SpawnMarker(spawn));
        out.push(DashEffect::Sound(SoundCue::play("Star")));
        out.push(DashEffect::Camera(CameraCommand::FrameCharge {
            orientation: ctx.orientation,
        }));
        self.enter(DashPhase::Preparing);
        true
    }

    pub fn release(
        &mut self,
        ctx: &DashContext,
        tuning: &DashTuning,
        out: &mut Vec<DashEffect>,
    ) {
        match self.phase {
            DashPhase::Preparing => {
                out.push(DashEffect::Sound(SoundCue::stop("Charge")));
                self.discard_marker(out);
                self.enter(DashPhase::Idle);
            }
            DashPhase::Charging => {
                out.push(DashEffect::Sound(SoundCue::stop("Charge")));
                let Some(marker) = self.marker else {
                    self.enter(DashPhase::Idle);
                    return;
                };
                self.origin = ctx.position;
                self.target = marker;
                self.discard_marker(out);
                out.push(DashEffect::Lock);
                out.push(DashEffect::Camera(CameraCommand::SetSmoothing(
                    tuning.locked_smoothing,
                )));
                out.push(DashEffect::Sound(SoundCue::play("Disappear")));
                self.enter(DashPhase::Teleporting);
            }
            _ => {}
        }
    }

    /// Abort from any phase, undoing every lock taken so far.
    pub fn cancel(&mut self, tuning: &DashTuning, out: &mut Vec<DashEffect>) {
        match self.phase {
            DashPhase::Idle => return,
            DashPhase::Preparing | DashPhase::Charging => {
                out.push(DashEffect::Sound(SoundCue::stop("Charge")));
                self.discard_marker(out);
            }
            DashPhase::Teleporting | DashPhase::JumpWindow | DashPhase::Settling => {
                out.push(DashEffect::Sound(SoundCue::stop("Charge")));
                self.discard_marker(out);
                out.push(DashEffect::ReleaseWorld);
                out.push(DashEffect::RestoreControl);
                out.push(DashEffect::Camera(CameraCommand::SetSmoothing(
                    tuning.normal_smoothing,
                )));
            }
        }
        self.dash_jumped = false;
        self.window_open = false;
        self.enter(DashPhase::Idle);
    }

    /// Locomotion only breaks a charge that has not been released yet
    pub fn interrupt(&mut self, tuning: &DashTuning, out: &mut Vec<DashEffect>) {
        if matches!(self.phase, DashPhase::Preparing | DashPhase::Charging) {
            self.cancel(tuning, out);
        }
    }

    fn tick(
        &mut self,
        ctx: &DashContext,
        input: &DashInput,
        physics: &impl PhysicsQuery,
        targets: &impl DashTargets,
        tuning: &DashTuning,
        dt: f32,
        out: &mut Vec<DashEffect>,
    ) {
        match self.phase {
            DashPhase::Idle => {}
            DashPhase::Preparing => {
                self.elapsed += dt;
                if self.elapsed >= tuning.prepare_time {
                    out.push(DashEffect::Sound(SoundCue::play("Charge")));
                    self.enter(DashPhase::Charging);
                }
            }
            DashPhase::Charging => self.advance_marker(ctx, physics, tuning, dt, out),
            DashPhase::Teleporting => {
                self.elapsed += dt;
                if self.elapsed >= tuning.disappear_time {
                    self.teleport(ctx, physics, targets, tuning, out);
                }
            }
            DashPhase::JumpWindow => {
                self.elapsed += dt;
                if !self.window_open {
                    if self.elapsed < tuning.jump_start_delay {
                        return;
                    }
                    self.window_open = true;
                    self.elapsed = 0.0;
                    out.push(DashEffect::Sound(SoundCue::play("Appear")));
                }

                if input.jump_pressed && ctx.grounded {
                    out.push(DashEffect::ReleaseWorld);
                    self.resolve_hits(physics, targets, out);
                    let direction = Vec2::new(self.orientation, 1.0).normalize();
                    out.push(DashEffect::Launch(direction * tuning.jump_impulse));
                    self.dash_jumped = true;
                    self.window_open = false;
                    self.enter(DashPhase::Settling);
                } else if self.elapsed >= tuning.jump_interval {
                    out.push(DashEffect::ReleaseWorld);
                    self.resolve_hits(physics, targets, out);
                    self.window_open = false;
                    self.enter(DashPhase::Settling);
                }
            }
            DashPhase::Settling => {
                self.elapsed += dt;
                if self.elapsed >= tuning.movement_cancel_delay {
                    out.push(DashEffect::RestoreControl);
                    out.push(DashEffect::Camera(CameraCommand::EaseSmoothing {
                        target: tuning.normal_smoothing,
                        delay: tuning.smoothing_ease_delay,
                        duration: tuning.smoothing_ease_duration,
                    }));
                    self.dash_jumped = false;
                    self.enter(DashPhase::Idle);
                }
            }
        }
    }

    fn advance_marker(
        &mut self,
        ctx: &DashContext,
        physics: &impl PhysicsQuery,
        tuning: &DashTuning,
        dt: f32,
        out: &mut Vec<DashEffect>,
    ) {
        if self.marker_blocked {
            return;
        }
        let Some(mut marker) = self.marker else {
            return;
        };

        let forward = if self.orientation < 0.0 {
            Dir2::NEG_X
        } else {
            Dir2::X
        };
        if physics
            .probe(marker, forward, tuning.wall_probe_distance, solid_mask())
            .is_some()
        {
            debug!("Dash marker stopped by wall at {:?}", marker);
            self.marker_blocked = true;
            return;
        }

        let reach = self.max_distance;
        let offset = marker.x + tuning.marker_speed * dt * self.orientation - ctx.position.x;
        marker.x = ctx.position.x + offset.clamp(-reach, reach);
        if self.marker != Some(marker) {
            self.marker = Some(marker);
            out.push(DashEffect::MoveMarker(marker));
        }
    }

    fn teleport(
        &mut self,
        ctx: &DashContext,
        physics: &impl PhysicsQuery,
        targets: &impl DashTargets,
        tuning: &DashTuning,
        out: &mut Vec<DashEffect>,
    ) {
        let mut target = self.target;
        let waller = physics
            .linecast_all(self.origin, target, GameLayer::Enemy.into())
            .into_iter()
            .find_map(|hit| targets.wall_bounds(hit.entity));
        if let Some(wall) = waller {
            let near_face = if self.orientation > 0.0 {
                wall.min.x
            } else {
                wall.max.x
            };
            // Body clear of the near face with a quarter width to spare
            target.x = near_face - self.orientation * ctx.half_extents.x * 1.5;
            debug!("Dash redirected by waller at {:?}", wall.center());
        }
        self.target = target;

        let mut landing = target;
        if let Some(hit) = physics.box_probe(
            landing,
            Vec2::new(ctx.half_extents.x * 2.0, EMBED_PROBE_HEIGHT),
            Dir2::NEG_Y,
            tuning.embed_probe_distance,
            solid_mask(),
        ) {
            // Measured from the body's center to the surface below it
            let dif = hit.distance + EMBED_PROBE_HEIGHT * 0.5 - ctx.half_extents.y;
            if dif < 0.0 {
                landing.y += dif.abs();
            }
        }

        out.push(DashEffect::Teleport(landing));
        out.push(DashEffect::Sound(SoundCue::play("Cut")));
        self.window_open = false;
        self.enter(DashPhase::JumpWindow);
    }

    /// Notify each dashable on the dash path once, nearest first.
    fn resolve_hits(
        &self,
        physics: &impl PhysicsQuery,
        targets: &impl DashTargets,
        out: &mut Vec<DashEffect>,
    ) {
        let mut seen: Vec<Entity> = Vec::new();
        for hit in physics.linecast_all(self.origin, self.target, dashable_mask()) {
            if seen.contains(&hit.entity) {
                continue;
            }
            let Some(kind) = targets.dashable_kind(hit.entity) else {
                continue;
            };
            seen.push(hit.entity);
            out.push(DashEffect::DashedThrough {
                entity: hit.entity,
                kind,
            });
            if kind == DashableKind::Enemy {
                out.push(DashEffect::Sound(SoundCue::play("SwordHit")));
                out.push(DashEffect::Sound(SoundCue::play("EnemyHit")));
            }
        }
    }

    fn discard_marker(&mut self, out: &mut Vec<DashEffect>) {
        if self.marker.take().is_some() {
            out.push(DashEffect::DespawnMarker);
        }
        self.marker_blocked = false;
    }
}
