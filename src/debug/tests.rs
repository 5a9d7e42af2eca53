//! Debug domain: overlay text tests.

use bevy::prelude::*;

use super::PlayerReadout;
use crate::dash::DashPhase;
use crate::movement::{Facing, MovementState};

#[test]
fn test_readout_lists_every_field() {
    let mut state = MovementState::default();
    state.grounded = true;
    state.facing = Facing::Left;

    let text = PlayerReadout::new(&state, Vec2::new(120.0, -3.5), DashPhase::Charging, 2).to_text();

    assert!(text.contains("Grounded: true"));
    assert!(text.contains("Jumped: false"));
    assert!(text.contains("Falling: false"));
    assert!(text.contains("Movement: true"));
    assert!(text.contains("Orientation: -1"));
    assert!(text.contains("Velocity: (120.0, -3.5)"));
    assert!(text.contains("Dash: Charging"));
    assert!(text.contains("Lives: 2"));
}
