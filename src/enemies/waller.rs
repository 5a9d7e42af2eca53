//! Enemies domain: waller, a wanderer that periodically stands as a wall.
//!
//! While standing as a wall the dash cannot pass through it; the teleport
//! target is pulled back to just outside it instead.

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::enemies::locomotion::{accelerate, check_pit, decelerate_to_rest};
use crate::enemies::{Enemy, EnemyBody, WallerTuning, random_orientation, roll};
use crate::movement::PhysicsQuery;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WallerStep {
    Waiting { remaining: f32 },
    Walking { remaining: f32 },
    Stopping,
    Wall { remaining: f32 },
}

#[derive(Component, Debug, Clone)]
pub struct Waller {
    step: WallerStep,
}

impl Waller {
    pub fn new(rng: &mut ChaCha8Rng, tuning: &WallerTuning) -> Self {
        Self {
            step: wait(rng, tuning),
        }
    }

    pub fn step(&self) -> WallerStep {
        self.step
    }

    pub fn is_wall(&self) -> bool {
        matches!(self.step, WallerStep::Wall { .. })
    }

    pub fn tick(
        &mut self,
        enemy: &mut Enemy,
        body: &mut EnemyBody,
        physics: &impl PhysicsQuery,
        rng: &mut ChaCha8Rng,
        tuning: &WallerTuning,
        dt: f32,
    ) {
        if enemy.is_dead() {
            return;
        }

        self.step = match self.step {
            WallerStep::Waiting { remaining } => {
                body.velocity.x = 0.0;
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    WallerStep::Waiting { remaining }
                } else if rng.random_bool(0.5) {
                    enemy.orientation = random_orientation(rng);
                    WallerStep::Walking {
                        remaining: roll(rng, tuning.walk_min, tuning.walk_max),
                    }
                } else {
                    debug!("Waller turns into a wall");
                    WallerStep::Wall {
                        remaining: roll(rng, tuning.wall_min, tuning.wall_max),
                    }
                }
            }
            WallerStep::Walking { remaining } => {
                check_pit(enemy, body, physics, tuning.pit_probe_distance);
                body.velocity.x = accelerate(
                    body.velocity.x,
                    enemy.orientation,
                    tuning.speed,
                    tuning.accel,
                    dt,
                );
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    WallerStep::Walking { remaining }
                } else {
                    WallerStep::Stopping
                }
            }
            WallerStep::Stopping => {
                check_pit(enemy, body, physics, tuning.pit_probe_distance);
                body.velocity.x = decelerate_to_rest(body.velocity.x, tuning.decel, dt);
                if body.velocity.x == 0.0 {
                    wait(rng, tuning)
                } else {
                    WallerStep::Stopping
                }
            }
            WallerStep::Wall { remaining } => {
                body.velocity.x = 0.0;
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    WallerStep::Wall { remaining }
                } else {
                    wait(rng, tuning)
                }
            }
        };
    }
}

fn wait(rng: &mut ChaCha8Rng, tuning: &WallerTuning) -> WallerStep {
    WallerStep::Waiting {
        remaining: roll(rng, tuning.wait_min, tuning.wait_max),
    }
}
