//! Dash domain: marker and dashable components.

use bevy::prelude::*;

use crate::dash::DashableKind;

/// Visual for the charge marker; the position lives in the owner's machine
#[derive(Component, Debug)]
pub struct DashMarker {
    pub owner: Entity,
}

/// Entity that reacts to being crossed by a dash
#[derive(Component, Debug, Clone, Copy)]
pub struct Dashable {
    pub kind: DashableKind,
}

/// Set while an entity stands as a wall the dash cannot pass through
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct WallStance(pub bool);
