//! Camera domain: spawning the camera and driving its frame each tick.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::camera::{CameraBounds, CameraCommand, CameraFrame, CameraTuning, FrameInput};
use crate::core::SimulationFlags;
use crate::movement::{MovementState, Player, PlayerBody};

/// Used when no primary window exists (headless runs)
const FALLBACK_VIEW: Vec2 = Vec2::new(1280.0, 720.0);

#[derive(Component, Debug)]
pub struct FramedCamera;

pub(crate) fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, FramedCamera));
}

fn half_view(windows: &Query<&Window, With<PrimaryWindow>>) -> Vec2 {
    windows
        .single()
        .map(|w| Vec2::new(w.width(), w.height()))
        .unwrap_or(FALLBACK_VIEW)
        * 0.5
}

/// Attach a fresh frame centred on the player once one exists
pub(crate) fn attach_frame(
    mut commands: Commands,
    tuning: Res<CameraTuning>,
    bounds: Res<CameraBounds>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<Entity, (With<FramedCamera>, Without<CameraFrame>)>,
    players: Query<&Transform, With<Player>>,
) {
    let Ok(player) = players.single() else {
        return;
    };
    for camera in &cameras {
        let frame = CameraFrame::new(
            player.translation.truncate(),
            &tuning,
            &bounds,
            half_view(&windows),
        );
        commands.entity(camera).insert(frame);
    }
}

pub(crate) fn apply_camera_commands(
    tuning: Res<CameraTuning>,
    mut commands: MessageReader<CameraCommand>,
    mut frames: Query<&mut CameraFrame>,
) {
    for command in commands.read() {
        for mut frame in &mut frames {
            frame.apply(*command, &tuning);
        }
    }
}

pub(crate) fn follow_player(
    time: Res<Time>,
    tuning: Res<CameraTuning>,
    bounds: Res<CameraBounds>,
    flags: Res<SimulationFlags>,
    windows: Query<&Window, With<PrimaryWindow>>,
    players: Query<(&Transform, &PlayerBody, &MovementState), With<Player>>,
    mut cameras: Query<(&mut CameraFrame, &mut Transform), (With<FramedCamera>, Without<Player>)>,
) {
    let Ok((player_transform, body, state)) = players.single() else {
        return;
    };
    let input = FrameInput {
        player: player_transform.translation.truncate(),
        player_half_width: body.half_extents().x,
        grounded: state.grounded,
        tracking_enabled: flags.camera_tracking_enabled,
        half_view: half_view(&windows),
    };

    for (mut frame, mut transform) in &mut cameras {
        let position = frame.update(&input, &tuning, &bounds, time.delta_secs());
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}
