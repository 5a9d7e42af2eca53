//! Collectables domain: pickup notifications.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::collectables::CollectableKind;

/// A dash power-up was taken by `player`
#[derive(Debug, Clone, Copy)]
pub struct PowerUpCollected {
    pub player: Entity,
}

impl Message for PowerUpCollected {}

/// Touch or dash contact with a collectable, before the once-only check
#[derive(Debug, Clone, Copy)]
pub struct PickupEvent {
    pub player: Entity,
    pub collectable: Entity,
}

impl Message for PickupEvent {}

#[derive(Debug, Clone, Copy)]
pub struct CollectedEvent {
    pub player: Entity,
    pub kind: CollectableKind,
}

impl Message for CollectedEvent {}
