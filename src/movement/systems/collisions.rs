//! Movement domain: ground detection under the player's feet.

use bevy::prelude::*;

use crate::movement::{GameLayer, MovementTuning, PhysicsQuery, PlayerBody};

/// Height of the thin box swept down from the feet
const FOOT_PROBE_HEIGHT: f32 = 1.0;

/// Sweep a thin box the width of the player down from its feet.
pub fn probe_ground(
    physics: &impl PhysicsQuery,
    position: Vec2,
    body: &PlayerBody,
    tuning: &MovementTuning,
) -> bool {
    let half = body.half_extents();
    let feet = position - Vec2::new(0.0, half.y - FOOT_PROBE_HEIGHT * 0.5);
    physics
        .box_probe(
            feet,
            Vec2::new(body.size.x, FOOT_PROBE_HEIGHT),
            Dir2::NEG_Y,
            tuning.ground_probe_distance,
            GameLayer::Ground.into(),
        )
        .is_some()
}
