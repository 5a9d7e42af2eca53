//! Enemies domain: walker, flyer and waller behavior machines.

mod components;
mod death;
mod flyer;
mod locomotion;
mod resources;
mod spawn;
mod systems;
mod walker;
mod waller;


pub use components::{
    Dying, Enemy, EnemyBody, EnemyRng, EnemyState, PlayerView, random_orientation, roll,
};
pub use death::launch_velocity;
pub use flyer::{Flyer, FlyerPhase, PatrolRoute, spot_player};
pub use resources::{DeathTuning, EnemyTuning, FlyerTuning, WalkerTuning, WallerTuning};
pub use spawn::{EnemyKind, spawn_enemy};
pub use walker::{Walker, WalkerBehavior, Wander};
pub use waller::{Waller, WallerStep};

use bevy::prelude::*;

use crate::core::GameSet;
use crate::enemies::systems::{
    drive_flyers, drive_walkers, drive_wallers, freeze_enemies, kill_dashed_enemies,
    sync_enemy_bodies, tick_dying,
};

pub struct EnemiesPlugin;

impl Plugin for EnemiesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyTuning>().add_systems(
            Update,
            (
                kill_dashed_enemies,
                freeze_enemies,
                (drive_walkers, drive_flyers, drive_wallers),
                sync_enemy_bodies,
                tick_dying,
            )
                .chain()
                .in_set(GameSet::Enemies),
        );
    }
}
