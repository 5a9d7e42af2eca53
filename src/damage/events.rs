use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Fired once when the player runs out of lives
#[derive(Debug)]
pub struct PlayerDefeatedEvent {
    pub player: Entity,
}

impl Message for PlayerDefeatedEvent {}
