//! Dash domain: charge, teleport and dash-jump sequence for the player.

mod components;
mod events;
mod machine;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{DashMarker, Dashable, WallStance};
pub use events::DashedThroughEvent;
pub use machine::{
    DashContext, DashEffect, DashInput, DashMachine, DashPhase, DashTargets, DashableKind,
    dashable_mask,
};
pub use resources::DashTuning;
pub use systems::DashEffects;

use bevy::prelude::*;

use crate::core::GameSet;
use crate::dash::systems::{apply_power_ups, drive_dash, interrupt_charge_on_locomotion};

pub struct DashPlugin;

impl Plugin for DashPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DashTuning>()
            .add_message::<DashedThroughEvent>()
            .add_systems(
                Update,
                (interrupt_charge_on_locomotion, drive_dash, apply_power_ups)
                    .chain()
                    .in_set(GameSet::Dash),
            );
    }
}
