//! Camera domain: look-ahead framing that follows the player.

mod events;
mod framing;
mod smooth;
mod systems;


pub use events::CameraCommand;
pub use framing::{CameraBounds, CameraFrame, CameraTuning, FrameInput, Side, clamp_to_bounds};
pub use smooth::{ease_out_quad, smooth_damp};
pub use systems::FramedCamera;

use bevy::prelude::*;

use crate::camera::systems::{apply_camera_commands, attach_frame, follow_player, spawn_camera};
use crate::core::GameSet;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraTuning>()
            .init_resource::<CameraBounds>()
            .add_message::<CameraCommand>()
            .add_systems(Startup, spawn_camera)
            .add_systems(
                Update,
                (attach_frame, apply_camera_commands, follow_player)
                    .chain()
                    .in_set(GameSet::Camera),
            );
    }
}
