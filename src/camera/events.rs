//! Camera domain: requests other domains send to the framing controller.

use bevy::ecs::message::Message;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    /// Re-frame for a dash charge toward `orientation` (-1 left, 1 right)
    FrameCharge { orientation: f32 },
    /// Replace the horizontal smoothing time immediately
    SetSmoothing(f32),
    /// After `delay` seconds, interpolate the horizontal smoothing time to
    /// `target` over `duration` seconds
    EaseSmoothing {
        target: f32,
        delay: f32,
        duration: f32,
    },
}

impl Message for CameraCommand {}
