//! Damage domain: lives, invulnerability window and hazard zones.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::damage::DamageTuning;
use crate::movement::GameLayer;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lives {
    pub current: i32,
}

impl Lives {
    pub fn new(starting: i32) -> Self {
        Self { current: starting }
    }

    pub fn is_out(&self) -> bool {
        self.current <= 0
    }
}

/// What a single hit did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Already invulnerable, nothing changed
    Ignored,
    Hit { lives: i32 },
    Defeated,
}

/// Post-hit window during which enemy contact is ignored and the sprite
/// blinks.
#[derive(Component, Debug, Clone, Default)]
pub struct Invulnerability {
    window: Option<BlinkWindow>,
}

#[derive(Debug, Clone, Copy, Default)]
struct BlinkWindow {
    elapsed: f32,
    since_toggle: f32,
    translucent: bool,
}

impl Invulnerability {
    pub fn is_active(&self) -> bool {
        self.window.is_some()
    }

    /// Restarts the window from zero
    pub fn start(&mut self) {
        self.window = Some(BlinkWindow::default());
    }

    /// Advance the window. Returns the sprite alpha to apply when it
    /// changes; the window closing always yields fully opaque.
    pub fn tick(&mut self, tuning: &DamageTuning, dt: f32) -> Option<f32> {
        let window = self.window.as_mut()?;

        if window.elapsed >= tuning.invulnerability_time {
            self.window = None;
            return Some(1.0);
        }

        let mut alpha = None;
        if window.since_toggle > tuning.blink_interval {
            alpha = Some(if window.translucent { 1.0 } else { 0.5 });
            window.translucent = !window.translucent;
            window.since_toggle = 0.0;
        }
        window.since_toggle += dt;
        window.elapsed += dt;
        alpha
    }
}

/// Lose one life unless the invulnerability window is open; a landed hit
/// opens it.
pub fn take_hit(lives: &mut Lives, invulnerability: &mut Invulnerability) -> HitOutcome {
    if invulnerability.is_active() {
        return HitOutcome::Ignored;
    }
    lives.current -= 1;
    invulnerability.start();
    if lives.is_out() {
        HitOutcome::Defeated
    } else {
        HitOutcome::Hit {
            lives: lives.current,
        }
    }
}

/// Pit falls cost a life like a hit, but always end with a fresh window
/// since the player reappears at the checkpoint.
pub fn pit_penalty(lives: &mut Lives, invulnerability: &mut Invulnerability) -> HitOutcome {
    let outcome = take_hit(lives, invulnerability);
    invulnerability.start();
    outcome
}

/// Where the player comes back after a pit fall
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Checkpoint(pub Vec2);

/// Player is falling into a pit; counts up to the respawn
#[derive(Component, Debug, Default)]
pub struct PitFall {
    pub elapsed: f32,
}

/// Sensor that swallows the player
#[derive(Component, Debug)]
pub struct DeathPit;

/// Sensor that moves the player's checkpoint to its own position
#[derive(Component, Debug)]
pub struct RespawnZone;

/// The player's collision layers. Enemies are filtered out while
/// invulnerable so their contacts neither push nor hurt.
pub fn player_collision_layers(invulnerable: bool) -> CollisionLayers {
    let filters = LayerMask::from([
        GameLayer::Ground,
        GameLayer::Wall,
        GameLayer::Sensor,
        GameLayer::Collectable,
    ]);
    let filters = if invulnerable {
        filters
    } else {
        LayerMask(filters.0 | LayerMask::from(GameLayer::Enemy).0)
    };
    CollisionLayers::new(GameLayer::Player, filters)
}
