//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Enemy characters
    Enemy,
    /// Sensors (pits, checkpoints, level end) - should not block movement
    Sensor,
    /// Pickups that react to touch and to dashes
    Collectable,
}

/// Mask of everything the player treats as solid level geometry
pub fn solid_mask() -> LayerMask {
    LayerMask::from([GameLayer::Ground, GameLayer::Wall])
}

#[derive(Component, Debug)]
pub struct Player;

/// Size of the player's box collider, cached for probes
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerBody {
    pub size: Vec2,
}

impl PlayerBody {
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn from_axis(axis: f32) -> Option<Facing> {
        if axis > 0.0 {
            Some(Facing::Right)
        } else if axis < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Observable phase of the jump sub-machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpPhase {
    Grounded,
    Rising,
    ApexFloat,
    Falling,
}

/// Player kinematic state, mutated every tick by the mover and read by the
/// dash, camera and debug overlay.
#[derive(Component, Debug)]
pub struct MovementState {
    pub facing: Facing,
    /// Raw horizontal input of the current tick (can be 0)
    pub axis: f32,
    /// Last nonzero horizontal input, compared by exact equality
    pub previous_axis: f32,
    pub previous_vertical_sign: f32,
    pub grounded: bool,
    pub was_grounded: bool,
    pub has_jumped: bool,
    pub falling: bool,
    pub jump_buffered: bool,
    pub coyote_jump: bool,
    pub check_grounding: bool,
    pub movement_enabled: bool,
    /// Set while an impulse (dash jump) owns horizontal velocity
    pub physics_driven: bool,
    pub gravity_enabled: bool,
    pub coyote_window: Option<f32>,
    pub buffer_window: Option<f32>,
    pub apex_float: Option<f32>,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            facing: Facing::Right,
            axis: 0.0,
            previous_axis: 0.0,
            previous_vertical_sign: 0.0,
            grounded: false,
            was_grounded: false,
            has_jumped: false,
            falling: false,
            jump_buffered: false,
            coyote_jump: false,
            check_grounding: true,
            movement_enabled: true,
            physics_driven: false,
            gravity_enabled: true,
            coyote_window: None,
            buffer_window: None,
            apex_float: None,
        }
    }
}

impl MovementState {
    pub fn jump_phase(&self) -> JumpPhase {
        if self.apex_float.is_some() {
            JumpPhase::ApexFloat
        } else if self.grounded {
            JumpPhase::Grounded
        } else if self.has_jumped && !self.falling {
            JumpPhase::Rising
        } else {
            JumpPhase::Falling
        }
    }

    pub fn orientation(&self) -> f32 {
        self.facing.sign()
    }

    /// Freezes vertical motion, or releases it with a tiny downward nudge so
    /// the next ground probe settles immediately.
    pub fn set_gravity(&mut self, enabled: bool, velocity: &mut Vec2) {
        self.gravity_enabled = enabled;
        velocity.y = if enabled { -0.01 } else { 0.0 };
    }

    pub fn set_movement(&mut self, enabled: bool) {
        self.movement_enabled = enabled;
        if !enabled {
            self.axis = 0.0;
        }
    }

    /// Drops an in-flight jump back to a neutral state (respawn, defeat)
    pub fn reset_airborne(&mut self) {
        self.has_jumped = false;
        self.falling = false;
        self.jump_buffered = false;
        self.coyote_jump = false;
        self.check_grounding = true;
        self.coyote_window = None;
        self.buffer_window = None;
        self.apex_float = None;
    }
}

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;
