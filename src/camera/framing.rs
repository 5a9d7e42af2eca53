//! Camera domain: auxiliary-point framing with look-ahead bias.
//!
//! The camera follows an auxiliary point rather than the player. The point
//! only chases the player once the player leaves a dead zone centred on it,
//! and the camera sits a signed bias away from the point toward the side the
//! player is heading.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::camera::CameraCommand;
use crate::camera::smooth::{ease_out_quad, lerp, smooth_damp};

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Horizontal smoothing time of the auxiliary point outside a dash
    pub smoothing_x: f32,
    pub smoothing_y: f32,
    pub shift_duration: f32,
    /// Dead zone width as a fraction of the viewport width
    pub zone_width: f32,
    /// Viewport height fraction (from the bottom) under which the camera
    /// always follows vertically
    pub vertical_limit: f32,
    pub bias_offset: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            smoothing_x: 0.1,
            smoothing_y: 0.25,
            shift_duration: 0.6,
            zone_width: 0.1,
            vertical_limit: 0.3,
            bias_offset: 140.0,
        }
    }
}

/// World-space limits the visible area must stay inside
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for CameraBounds {
    fn default() -> Self {
        Self {
            left: -2000.0,
            right: 2000.0,
            top: 1000.0,
            bottom: -1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    /// Focus left frames the player left of centre, so the camera sits ahead
    /// on the right
    pub fn bias_sign(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct BiasShift {
    from: f32,
    to: f32,
    elapsed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SmoothingEase {
    from: f32,
    to: f32,
    delay: f32,
    duration: f32,
    elapsed: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    pub player: Vec2,
    pub player_half_width: f32,
    pub grounded: bool,
    pub tracking_enabled: bool,
    /// Half the visible area in world units
    pub half_view: Vec2,
}

#[derive(Component, Debug, Clone)]
pub struct CameraFrame {
    aux_x: f32,
    aux_velocity: f32,
    bias: f32,
    focus: Side,
    shift: Option<BiasShift>,
    smoothing_x: f32,
    ease: Option<SmoothingEase>,
    position: Vec2,
    velocity_y: f32,
}

impl CameraFrame {
    pub fn new(
        player: Vec2,
        tuning: &CameraTuning,
        bounds: &CameraBounds,
        half_view: Vec2,
    ) -> Self {
        let bias = Side::Left.bias_sign() * tuning.bias_offset;
        let position = clamp_to_bounds(Vec2::new(player.x + bias, player.y), bounds, half_view);
        Self {
            aux_x: player.x,
            aux_velocity: 0.0,
            bias,
            focus: Side::Left,
            shift: None,
            smoothing_x: tuning.smoothing_x,
            ease: None,
            position,
            velocity_y: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn aux_x(&self) -> f32 {
        self.aux_x
    }

    pub fn bias(&self) -> f32 {
        self.bias
    }

    pub fn focus(&self) -> Side {
        self.focus
    }

    pub fn smoothing_x(&self) -> f32 {
        self.smoothing_x
    }

    pub fn is_shifting(&self) -> bool {
        self.shift.is_some()
    }

    pub fn apply(&mut self, command: CameraCommand, tuning: &CameraTuning) {
        match command {
            CameraCommand::FrameCharge { orientation } => {
                // Charging left wants the camera ahead on the left, and vice versa
                if orientation < 0.0 && self.focus == Side::Left {
                    self.shift_to(Side::Right, tuning);
                } else if orientation > 0.0 && self.focus == Side::Right {
                    self.shift_to(Side::Left, tuning);
                }
            }
            CameraCommand::SetSmoothing(value) => {
                self.ease = None;
                self.smoothing_x = value;
            }
            CameraCommand::EaseSmoothing {
                target,
                delay,
                duration,
            } => {
                self.ease = Some(SmoothingEase {
                    from: self.smoothing_x,
                    to: target,
                    delay,
                    duration,
                    elapsed: 0.0,
                });
            }
        }
    }

    /// Start (or restart) the bias animation toward `focus`
    pub fn shift_to(&mut self, focus: Side, tuning: &CameraTuning) {
        debug!("Camera focus {:?} -> {:?}", self.focus, focus);
        self.focus = focus;
        self.shift = Some(BiasShift {
            from: self.bias,
            to: focus.bias_sign() * tuning.bias_offset,
            elapsed: 0.0,
        });
    }

    pub fn update(
        &mut self,
        input: &FrameInput,
        tuning: &CameraTuning,
        bounds: &CameraBounds,
        dt: f32,
    ) -> Vec2 {
        self.tick_tasks(tuning, dt);

        if input.tracking_enabled {
            self.track_horizontal(input, tuning, dt);
            self.position.x = self.aux_x + self.bias;
        }
        self.track_vertical(input, tuning, dt);

        self.position = clamp_to_bounds(self.position, bounds, input.half_view);
        self.position
    }

    fn tick_tasks(&mut self, tuning: &CameraTuning, dt: f32) {
        if let Some(shift) = self.shift.as_mut() {
            shift.elapsed += dt;
            if shift.elapsed >= tuning.shift_duration {
                self.bias = shift.to;
                self.shift = None;
            } else {
                let t = ease_out_quad(shift.elapsed / tuning.shift_duration);
                self.bias = lerp(shift.from, shift.to, t);
            }
        }

        if let Some(ease) = self.ease.as_mut() {
            ease.elapsed += dt;
            let ramp = ease.elapsed - ease.delay;
            if ramp >= ease.duration {
                self.smoothing_x = ease.to;
                self.ease = None;
            } else if ramp >= 0.0 {
                self.smoothing_x = lerp(ease.from, ease.to, ramp / ease.duration);
            }
        }
    }

    fn track_horizontal(&mut self, input: &FrameInput, tuning: &CameraTuning, dt: f32) {
        let zone_half = input.half_view.x * tuning.zone_width;
        if !outside_zone(input, self.aux_x, zone_half) {
            return;
        }

        let m = if input.player.x > self.aux_x { -1.0 } else { 1.0 };
        let target = input.player.x + m * (zone_half - input.player_half_width);
        self.aux_x = smooth_damp(self.aux_x, target, &mut self.aux_velocity, self.smoothing_x, dt);

        if outside_zone(input, self.aux_x, zone_half) {
            if input.player.x < self.aux_x && self.focus == Side::Left {
                self.shift_to(Side::Right, tuning);
            } else if input.player.x > self.aux_x && self.focus == Side::Right {
                self.shift_to(Side::Left, tuning);
            }
        }
    }

    fn track_vertical(&mut self, input: &FrameInput, tuning: &CameraTuning, dt: f32) {
        let limit =
            self.position.y - input.half_view.y + tuning.vertical_limit * 2.0 * input.half_view.y;
        let below = input.player.y < limit;
        let above_grounded = input.player.y > limit && input.grounded;
        if below || above_grounded {
            self.position.y = smooth_damp(
                self.position.y,
                input.player.y,
                &mut self.velocity_y,
                tuning.smoothing_y,
                dt,
            );
        }
    }
}

fn outside_zone(input: &FrameInput, aux_x: f32, zone_half: f32) -> bool {
    let left = (input.player.x - input.player_half_width - aux_x).abs();
    let right = (input.player.x + input.player_half_width - aux_x).abs();
    left > zone_half || right > zone_half
}

/// Keep the whole view inside the bounds; centre it when the bounds are
/// narrower than the view.
pub fn clamp_to_bounds(position: Vec2, bounds: &CameraBounds, half_view: Vec2) -> Vec2 {
    fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
        if lo > hi {
            (lo + hi) * 0.5
        } else {
            value.clamp(lo, hi)
        }
    }
    Vec2::new(
        clamp_axis(
            position.x,
            bounds.left + half_view.x,
            bounds.right - half_view.x,
        ),
        clamp_axis(
            position.y,
            bounds.bottom + half_view.y,
            bounds.top - half_view.y,
        ),
    )
}
