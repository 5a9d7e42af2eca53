//! Enemies domain: shared enemy components and per-enemy random source.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Top-level behavior state shared by every enemy kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyState {
    #[default]
    Neutral,
    Hostile,
    Dead,
}

#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub state: EnemyState,
    /// -1 facing left, +1 facing right
    pub orientation: f32,
    pub half_extents: Vec2,
}

impl Enemy {
    pub fn new(size: Vec2) -> Self {
        Self {
            state: EnemyState::Neutral,
            orientation: -1.0,
            half_extents: size * 0.5,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.state == EnemyState::Dead
    }

    pub fn flip(&mut self) {
        self.orientation = -self.orientation;
    }
}

/// Seeded random source driving wait/walk durations
#[derive(Component, Debug, Clone)]
pub struct EnemyRng(pub ChaCha8Rng);

impl EnemyRng {
    pub fn new(seed: u64, spawn_index: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed ^ spawn_index))
    }
}

/// Uniform draw in `[lo, hi]`; a degenerate range yields `lo`
pub fn roll(rng: &mut ChaCha8Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..=hi) } else { lo }
}

pub fn random_orientation(rng: &mut ChaCha8Rng) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

/// Counts down to removal after a dash kill
#[derive(Component, Debug, Default)]
pub struct Dying {
    pub elapsed: f32,
}

/// Kinematic snapshot handed to the behavior machines each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyBody {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// What an enemy may know about the player
#[derive(Debug, Clone, Copy)]
pub struct PlayerView {
    pub entity: Entity,
    pub position: Vec2,
    pub half_extents: Vec2,
}

impl PlayerView {
    pub fn corners(&self) -> [Vec2; 4] {
        let h = self.half_extents;
        [
            self.position + Vec2::new(-h.x, h.y),
            self.position + Vec2::new(-h.x, -h.y),
            self.position + Vec2::new(h.x, h.y),
            self.position + Vec2::new(h.x, -h.y),
        ]
    }
}
