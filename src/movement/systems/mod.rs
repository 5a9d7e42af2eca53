//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub use collisions::probe_ground;
pub(crate) use input::read_input;
pub(crate) use movement::{drive_player, update_facing};
