//! Movement domain: messages emitted by the mover.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// The player steered or left the ground this tick
#[derive(Debug, Clone, Copy)]
pub struct LocomotionInterrupt {
    pub player: Entity,
}

impl Message for LocomotionInterrupt {}
