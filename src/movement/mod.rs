//! Movement domain: kinematic player mover, ground probing and input sampling.

mod bootstrap;
mod components;
mod events;
pub mod mover;
mod probe;
mod resources;
mod systems;


pub use bootstrap::PLAYER_SIZE;
pub use components::{
    Facing, GameLayer, Ground, JumpPhase, MovementState, Player, PlayerBody, Wall, solid_mask,
};
pub use events::LocomotionInterrupt;
pub use probe::{AvianProbe, PhysicsQuery, ProbeHit};
pub use resources::{MovementInput, MovementTuning};
pub use systems::probe_ground;

use bevy::prelude::*;

use crate::core::{GameSet, GameState};
use crate::movement::bootstrap::spawn_player;
use crate::movement::systems::{drive_player, read_input, update_facing};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_message::<LocomotionInterrupt>()
            .add_systems(OnEnter(GameState::Level), spawn_player)
            .add_systems(Update, read_input.in_set(GameSet::Input))
            .add_systems(
                Update,
                (drive_player, update_facing).chain().in_set(GameSet::Motion),
            );
    }
}
