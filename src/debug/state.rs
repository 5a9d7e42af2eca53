//! Debug domain: overlay state and text formatting.

use bevy::prelude::*;

use crate::dash::DashPhase;
use crate::movement::MovementState;

/// Resource tracking debug overlay visibility
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the player info overlay is shown
    pub show_info: bool,
}

/// Snapshot of the player fields shown by the overlay
#[derive(Debug, Clone, Copy)]
pub struct PlayerReadout {
    pub grounded: bool,
    pub jumped: bool,
    pub falling: bool,
    pub movement_enabled: bool,
    pub orientation: f32,
    pub velocity: Vec2,
    pub dash_phase: DashPhase,
    pub lives: i32,
}

impl PlayerReadout {
    pub fn new(state: &MovementState, velocity: Vec2, dash_phase: DashPhase, lives: i32) -> Self {
        Self {
            grounded: state.grounded,
            jumped: state.has_jumped,
            falling: state.falling,
            movement_enabled: state.movement_enabled,
            orientation: state.orientation(),
            velocity,
            dash_phase,
            lives,
        }
    }

    pub fn to_text(&self) -> String {
        format!(
            concat!(
                "Grounded: {}\nJumped: {}\nFalling: {}\nMovement: {}\n",
                "Orientation: {:+.0}\nVelocity: ({:.1}, {:.1})\nDash: {:?}\nLives: {}",
            ),
            self.grounded,
            self.jumped,
            self.falling,
            self.movement_enabled,
            self.orientation,
            self.velocity.x,
            self.velocity.y,
            self.dash_phase,
            self.lives
        )
    }
}
