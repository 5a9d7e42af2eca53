//! Movement domain: kinematic mover step for the player body.
//!
//! The step owns horizontal velocity, the jump windows and the manual gravity
//! integration. It never touches the engine; the caller feeds it a ground
//! probe and writes the resulting velocity back to the rigid body.

use bevy::prelude::*;

use crate::movement::{Facing, MovementState, MovementTuning};

#[derive(Debug, Clone, Copy, Default)]
pub struct MoverInput {
    pub axis: f32,
    pub jump_pressed: bool,
    pub jump_released: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoverReport {
    pub jumped: bool,
    pub landed: bool,
    pub reached_apex: bool,
    /// Locomotion happened this tick (airborne or steering)
    pub interrupt_charge: bool,
}

/// Sign with zero treated as positive
pub fn unity_sign(value: f32) -> f32 {
    if value >= 0.0 { 1.0 } else { -1.0 }
}

pub fn sign_or_zero(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Advance the player by one tick.
pub fn step(
    state: &mut MovementState,
    velocity: &mut Vec2,
    input: &MoverInput,
    tuning: &MovementTuning,
    ground_probe: impl FnOnce() -> bool,
    dt: f32,
) -> MoverReport {
    let mut report = MoverReport::default();

    if let Some(elapsed) = state.apex_float.as_mut() {
        *elapsed += dt;
        if *elapsed >= tuning.apex_time {
            state.apex_float = None;
        }
    }

    if state.movement_enabled {
        state.axis = input.axis;
        handle_jump(state, velocity, input, tuning, ground_probe, &mut report);
        tick_windows(state, tuning, dt);
        if !state.physics_driven {
            handle_horizontal(state, velocity, tuning, dt, &mut report);
        }
    } else if state.check_grounding {
        // Teleports and respawns still need an up-to-date grounded flag
        state.grounded = ground_probe();
        state.was_grounded = state.grounded;
    }

    apply_gravity(state, velocity, tuning, dt);
    report
}

fn handle_jump(
    state: &mut MovementState,
    velocity: &mut Vec2,
    input: &MoverInput,
    tuning: &MovementTuning,
    ground_probe: impl FnOnce() -> bool,
    report: &mut MoverReport,
) {
    if state.check_grounding {
        state.grounded = ground_probe();
    }

    if state.grounded {
        if !state.was_grounded {
            report.landed = true;
        }
        state.has_jumped = false;
        state.falling = false;
    } else {
        report.interrupt_charge = true;
    }

    // Walked off a ledge
    if !state.has_jumped
        && state.was_grounded
        && !state.grounded
        && !state.coyote_jump
        && state.coyote_window.is_none()
    {
        state.falling = true;
        state.coyote_window = Some(0.0);
    }

    let mut press_consumed = false;
    if state.coyote_window.is_some() && !state.grounded && input.jump_pressed {
        state.coyote_jump = true;
        state.coyote_window = None;
        press_consumed = true;
    }

    if !state.grounded && input.jump_pressed && !press_consumed {
        state.buffer_window = Some(0.0);
    }
    if state.buffer_window.is_some() && state.grounded {
        state.jump_buffered = true;
        state.buffer_window = None;
    }

    if (state.grounded && input.jump_pressed) || state.jump_buffered || state.coyote_jump {
        state.has_jumped = true;
        state.falling = false;
        state.grounded = false;
        state.check_grounding = false;
        state.jump_buffered = false;
        state.coyote_jump = false;
        state.coyote_window = None;
        velocity.y = tuning.jump_velocity;
        report.jumped = true;
        debug!("Jump: vy={}", velocity.y);
    }

    if state.has_jumped && !state.falling && input.jump_released {
        velocity.y /= tuning.jump_end_early_divisor;
    }

    if state.has_jumped
        && !state.falling
        && unity_sign(velocity.y) < state.previous_vertical_sign
    {
        state.check_grounding = true;
        state.falling = true;
        state.apex_float = Some(0.0);
        velocity.y = 0.0;
        report.reached_apex = true;
    }

    state.previous_vertical_sign = unity_sign(velocity.y);
    state.was_grounded = state.grounded;
}

fn tick_windows(state: &mut MovementState, tuning: &MovementTuning, dt: f32) {
    if let Some(elapsed) = state.coyote_window.as_mut() {
        *elapsed += dt;
        if *elapsed >= tuning.coyote_time {
            state.coyote_window = None;
        }
    }
    if let Some(elapsed) = state.buffer_window.as_mut() {
        *elapsed += dt;
        if *elapsed >= tuning.jump_buffer_time {
            state.buffer_window = None;
        }
    }
}

fn handle_horizontal(
    state: &mut MovementState,
    velocity: &mut Vec2,
    tuning: &MovementTuning,
    dt: f32,
    report: &mut MoverReport,
) {
    let (speed, accel) = if state.apex_float.is_some() {
        (tuning.apex_speed, tuning.apex_accel)
    } else {
        (tuning.max_speed, tuning.accel)
    };
    let axis = state.axis;
    let mut vx = velocity.x;

    if axis != 0.0 {
        if vx.abs() < speed {
            vx = accelerate(vx, axis, speed, accel, tuning.min_speed_step, dt);
        }
        if vx.abs() > speed {
            vx = decelerate(vx, speed, state.previous_axis, tuning, dt);
        }
        // Pivot stop: any change of input, even between two nonzero values
        if axis != state.previous_axis {
            vx = 0.0;
        }
        state.previous_axis = axis;
        if let Some(facing) = Facing::from_axis(axis) {
            state.facing = facing;
        }
        report.interrupt_charge = true;
    } else if vx.abs() > 0.0 {
        vx = decelerate(vx, 0.0, state.previous_axis, tuning, dt);
    }

    velocity.x = vx;
}

fn accelerate(vx: f32, axis: f32, speed: f32, accel: f32, min_step: f32, dt: f32) -> f32 {
    let mut add = dt * accel * axis;
    if add.abs() < min_step {
        add = min_step * axis;
    }
    let vx = vx + add;
    if vx.abs() > speed { speed * axis } else { vx }
}

fn decelerate(vx: f32, target: f32, previous_axis: f32, tuning: &MovementTuning, dt: f32) -> f32 {
    let mut sub = dt * tuning.decel * previous_axis;
    if sub.abs() < tuning.min_speed_step {
        sub = tuning.min_speed_step * previous_axis;
    }
    let vx = vx - sub;
    if target > 0.0 {
        if vx.abs() < target {
            return target * previous_axis;
        }
        vx
    } else if unity_sign(vx) != sign_or_zero(previous_axis) {
        0.0
    } else {
        vx
    }
}

fn apply_gravity(state: &MovementState, velocity: &mut Vec2, tuning: &MovementTuning, dt: f32) {
    if !state.gravity_enabled {
        velocity.y = 0.0;
    } else if state.apex_float.is_none() {
        velocity.y = (velocity.y - tuning.gravity * dt).max(-tuning.max_fall_speed);
    }
}
