//! Dash domain: systems driving the dash machine and applying its effects.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::camera::CameraCommand;
use crate::core::{SimulationFlags, SoundCue};
use crate::dash::{
    DashContext, DashEffect, DashInput, DashMachine, DashMarker, DashTargets, DashTuning,
    Dashable, DashableKind, DashedThroughEvent, WallStance,
};
use crate::enemies::Enemy;
use crate::movement::{
    AvianProbe, LocomotionInterrupt, MovementInput, MovementState, Player, PlayerBody,
};

const MARKER_SIZE: f32 = 14.0;
const MARKER_Z: f32 = 5.0;

type DashableQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Dashable,
        &'static Transform,
        Option<&'static WallStance>,
        Option<&'static Enemy>,
    ),
    Without<Player>,
>;

/// `DashTargets` over the dashable entities in the world
struct EcsDashTargets<'a, 'w, 's> {
    dashables: &'a DashableQuery<'w, 's>,
}

impl DashTargets for EcsDashTargets<'_, '_, '_> {
    fn dashable_kind(&self, entity: Entity) -> Option<DashableKind> {
        self.dashables.get(entity).ok().map(|(d, _, _, _)| d.kind)
    }

    fn wall_bounds(&self, entity: Entity) -> Option<Rect> {
        match self.dashables.get(entity) {
            Ok((_, transform, Some(WallStance(true)), Some(enemy))) => Some(
                Rect::from_center_half_size(transform.translation.truncate(), enemy.half_extents),
            ),
            _ => None,
        }
    }
}

/// Everything outside the player that a dash effect can touch.
#[derive(SystemParam)]
pub struct DashEffects<'w, 's> {
    commands: Commands<'w, 's>,
    flags: ResMut<'w, SimulationFlags>,
    sounds: MessageWriter<'w, SoundCue>,
    camera: MessageWriter<'w, CameraCommand>,
    dashed: MessageWriter<'w, DashedThroughEvent>,
    markers: Query<
        'w,
        's,
        (Entity, &'static DashMarker, &'static mut Transform),
        (Without<Player>, Without<Dashable>),
    >,
}

impl DashEffects<'_, '_> {
    pub fn apply(
        &mut self,
        player: Entity,
        effects: &mut Vec<DashEffect>,
        transform: &mut Transform,
        state: &mut MovementState,
        velocity: &mut LinearVelocity,
    ) {
        for effect in effects.drain(..) {
            match effect {
                DashEffect::SpawnMarker(position) => {
                    self.despawn_markers(player);
                    self.commands.spawn((
                        DashMarker { owner: player },
                        Sprite {
                            color: Color::srgb(1.0, 0.9, 0.3),
                            custom_size: Some(Vec2::splat(MARKER_SIZE)),
                            ..default()
                        },
                        Transform::from_translation(position.extend(MARKER_Z)),
                    ));
                }
                DashEffect::MoveMarker(position) => {
                    for (_, marker, mut marker_transform) in &mut self.markers {
                        if marker.owner == player {
                            marker_transform.translation = position.extend(MARKER_Z);
                        }
                    }
                }
                DashEffect::DespawnMarker => self.despawn_markers(player),
                DashEffect::Sound(cue) => {
                    self.sounds.write(cue);
                }
                DashEffect::Camera(command) => {
                    self.camera.write(command);
                }
                DashEffect::Lock => {
                    state.set_movement(false);
                    state.set_gravity(false, &mut velocity.0);
                    velocity.0 = Vec2::ZERO;
                    self.flags.camera_tracking_enabled = false;
                    self.flags.enemy_motion_enabled = false;
                }
                DashEffect::ReleaseWorld => {
                    state.set_gravity(true, &mut velocity.0);
                    self.flags.camera_tracking_enabled = true;
                    self.flags.enemy_motion_enabled = true;
                }
                DashEffect::RestoreControl => {
                    state.physics_driven = false;
                    state.set_movement(true);
                }
                DashEffect::Teleport(position) => {
                    transform.translation.x = position.x;
                    transform.translation.y = position.y;
                    debug!("Dash teleport to {:?}", position);
                }
                DashEffect::Launch(impulse) => {
                    state.physics_driven = true;
                    velocity.0 = impulse;
                }
                DashEffect::DashedThrough { entity, kind } => {
                    self.dashed.write(DashedThroughEvent {
                        player,
                        target: entity,
                        kind,
                    });
                }
            }
        }
    }

    fn despawn_markers(&mut self, player: Entity) {
        for (entity, marker, _) in &self.markers {
            if marker.owner == player {
                self.commands.entity(entity).despawn();
            }
        }
    }
}

pub(crate) fn interrupt_charge_on_locomotion(
    tuning: Res<DashTuning>,
    mut interrupts: MessageReader<LocomotionInterrupt>,
    mut effects: DashEffects,
    mut players: Query<
        (
            Entity,
            &mut Transform,
            &mut MovementState,
            &mut LinearVelocity,
            &mut DashMachine,
        ),
        With<Player>,
    >,
) {
    let mut pending = Vec::new();
    for interrupt in interrupts.read() {
        let Ok((entity, mut transform, mut state, mut velocity, mut machine)) =
            players.get_mut(interrupt.player)
        else {
            continue;
        };
        machine.interrupt(&tuning, &mut pending);
        effects.apply(entity, &mut pending, &mut transform, &mut state, &mut velocity);
    }
}

pub(crate) fn drive_dash(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<DashTuning>,
    spatial_query: SpatialQuery,
    dashables: DashableQuery,
    mut effects: DashEffects,
    mut players: Query<
        (
            Entity,
            &mut Transform,
            &PlayerBody,
            &mut MovementState,
            &mut LinearVelocity,
            &mut DashMachine,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    let physics = AvianProbe::new(&spatial_query);
    let targets = EcsDashTargets {
        dashables: &dashables,
    };
    let dash_input = DashInput {
        charge_pressed: input.charge_just_pressed,
        charge_released: input.charge_just_released,
        jump_pressed: input.jump_just_pressed,
    };

    let mut pending = Vec::new();
    for (entity, mut transform, body, mut state, mut velocity, mut machine) in &mut players {
        let ctx = DashContext {
            position: transform.translation.truncate(),
            half_extents: body.half_extents(),
            orientation: state.orientation(),
            grounded: state.grounded,
        };
        machine.update(&ctx, &dash_input, &physics, &targets, &tuning, dt, &mut pending);
        effects.apply(entity, &mut pending, &mut transform, &mut state, &mut velocity);
    }
}

/// Dash power-ups collected this tick
pub(crate) fn apply_power_ups(
    tuning: Res<DashTuning>,
    mut pickups: MessageReader<crate::collectables::PowerUpCollected>,
    mut players: Query<&mut DashMachine, With<Player>>,
) {
    for pickup in pickups.read() {
        if let Ok(mut machine) = players.get_mut(pickup.player) {
            machine.extend_range(tuning.power_up_increment);
            info!("Dash range extended to {}", machine.max_distance());
        }
    }
}
