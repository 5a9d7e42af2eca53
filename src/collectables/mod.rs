//! Collectables domain: diamonds, dash power-ups, purple diamonds and the
//! level end they unlock.

mod components;
mod events;
mod resources;
mod systems;


pub use components::{
    Collectable, CollectableKind, Collecting, CollectorGoal, DiamondCounter, LevelEnd,
};
pub use events::{CollectedEvent, PickupEvent, PowerUpCollected};
pub use resources::CollectableTuning;

use bevy::prelude::*;

use crate::collectables::systems::{
    apply_collect_effects, collect_pickups, detect_pickups, reach_level_end,
    reset_collection_progress, tick_collecting,
};
use crate::core::{GameSet, GameState};

pub struct CollectablesPlugin;

impl Plugin for CollectablesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CollectableTuning>()
            .init_resource::<DiamondCounter>()
            .init_resource::<CollectorGoal>()
            .add_message::<PowerUpCollected>()
            .add_message::<PickupEvent>()
            .add_message::<CollectedEvent>()
            .add_systems(OnEnter(GameState::Level), reset_collection_progress)
            .add_systems(
                Update,
                (
                    detect_pickups,
                    collect_pickups,
                    apply_collect_effects,
                    tick_collecting,
                    reach_level_end,
                )
                    .chain()
                    .in_set(GameSet::Damage),
            );
    }
}
