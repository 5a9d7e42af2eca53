//! Movement domain: per-tick mover driver and sprite facing.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::mover::{self, MoverInput};
use crate::movement::systems::collisions::probe_ground;
use crate::movement::{
    AvianProbe, Facing, LocomotionInterrupt, MovementInput, MovementState, MovementTuning,
    Player, PlayerBody,
};

pub(crate) fn drive_player(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    spatial_query: SpatialQuery,
    mut interrupts: MessageWriter<LocomotionInterrupt>,
    mut query: Query<
        (
            Entity,
            &Transform,
            &PlayerBody,
            &mut MovementState,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    let physics = AvianProbe::new(&spatial_query);
    let mover_input = MoverInput {
        axis: input.axis,
        jump_pressed: input.jump_just_pressed,
        jump_released: input.jump_just_released,
    };

    for (entity, transform, body, mut state, mut velocity) in &mut query {
        let position = transform.translation.truncate();
        let mut v = velocity.0;
        let report = mover::step(
            &mut state,
            &mut v,
            &mover_input,
            &tuning,
            || probe_ground(&physics, position, body, &tuning),
            dt,
        );
        velocity.0 = v;

        if report.landed {
            debug!("Landed at {:?}", position);
        }
        if report.reached_apex {
            debug!("Jump apex at y={}", position.y);
        }
        if report.interrupt_charge {
            interrupts.write(LocomotionInterrupt { player: entity });
        }
    }
}

pub(crate) fn update_facing(mut query: Query<(&MovementState, &mut Sprite), With<Player>>) {
    for (state, mut sprite) in &mut query {
        sprite.flip_x = state.facing == Facing::Left;
    }
}
