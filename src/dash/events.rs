//! Dash domain: hit notifications.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::dash::DashableKind;

/// A dash path crossed `target`. Sent once per target per dash.
#[derive(Debug, Clone, Copy)]
pub struct DashedThroughEvent {
    pub player: Entity,
    pub target: Entity,
    pub kind: DashableKind,
}

impl Message for DashedThroughEvent {}
