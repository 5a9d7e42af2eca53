//! Enemies domain: patrol/pursue walker.
//!
//! Neutral walkers idle, then wander in a random direction for a random time,
//! turning back at ledges. A forward sight ray makes them hostile: they run
//! straight ahead until they have lost sight of the player for a while.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::enemies::locomotion::{accelerate, check_pit, decelerate_to_rest};
use crate::enemies::{Enemy, EnemyBody, EnemyState, WalkerTuning, random_orientation, roll};
use crate::movement::{GameLayer, PhysicsQuery};

/// One step of the neutral wander cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wander {
    Waiting { remaining: f32 },
    Walking { remaining: f32 },
    Stopping,
}

impl Wander {
    fn start(rng: &mut ChaCha8Rng, tuning: &WalkerTuning) -> Self {
        Wander::Waiting {
            remaining: roll(rng, tuning.wait_min, tuning.wait_max),
        }
    }
}

/// The running behavior loop. Replacing the value drops the old loop, so two
/// loops can never drive the same walker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WalkerBehavior {
    Neutral(Wander),
    Hostile,
}

#[derive(Component, Debug, Clone)]
pub struct Walker {
    behavior: WalkerBehavior,
    /// Time spent without sight of the player while hostile
    search: Option<f32>,
    sees_player: bool,
}

impl Walker {
    pub fn new(rng: &mut ChaCha8Rng, tuning: &WalkerTuning) -> Self {
        Self {
            behavior: WalkerBehavior::Neutral(Wander::start(rng, tuning)),
            search: None,
            sees_player: false,
        }
    }

    pub fn behavior(&self) -> WalkerBehavior {
        self.behavior
    }

    pub fn sees_player(&self) -> bool {
        self.sees_player
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    /// Advance one tick. Returns the new top-level state on a transition.
    pub fn tick(
        &mut self,
        enemy: &mut Enemy,
        body: &mut EnemyBody,
        player: Option<Entity>,
        physics: &impl PhysicsQuery,
        rng: &mut ChaCha8Rng,
        tuning: &WalkerTuning,
        dt: f32,
    ) -> Option<EnemyState> {
        if enemy.is_dead() {
            return None;
        }

        let mut transition = None;
        self.sees_player =
            player.is_some_and(|p| looks_at_player(enemy, body, physics, p, tuning));

        if self.sees_player && enemy.state == EnemyState::Neutral {
            enemy.state = EnemyState::Hostile;
            self.behavior = WalkerBehavior::Hostile;
            self.search = None;
            transition = Some(EnemyState::Hostile);
        } else if !self.sees_player && enemy.state == EnemyState::Hostile && self.search.is_none()
        {
            self.search = Some(0.0);
        }

        if let Some(elapsed) = self.search.as_mut() {
            if self.sees_player {
                self.search = None;
            } else {
                *elapsed += dt;
                if *elapsed >= tuning.search_time {
                    enemy.state = EnemyState::Neutral;
                    self.behavior = WalkerBehavior::Neutral(Wander::start(rng, tuning));
                    self.search = None;
                    transition = Some(EnemyState::Neutral);
                }
            }
        }

        match self.behavior {
            WalkerBehavior::Neutral(step) => {
                let next = wander(step, enemy, body, physics, rng, tuning, dt);
                self.behavior = WalkerBehavior::Neutral(next);
            }
            WalkerBehavior::Hostile => {
                check_pit(enemy, body, physics, tuning.pit_probe_distance);
                body.velocity.x = tuning.run_speed * enemy.orientation;
            }
        }

        transition
    }
}

/// Forward sight ray; level geometry blocks it
fn looks_at_player(
    enemy: &Enemy,
    body: &EnemyBody,
    physics: &impl PhysicsQuery,
    player: Entity,
    tuning: &WalkerTuning,
) -> bool {
    let Ok(direction) = Dir2::new(Vec2::new(enemy.orientation, 0.0)) else {
        return false;
    };
    let mask = LayerMask::from([GameLayer::Player, GameLayer::Ground, GameLayer::Wall]);
    physics
        .probe(body.position, direction, tuning.sight_range, mask)
        .is_some_and(|hit| hit.entity == player)
}

fn wander(
    step: Wander,
    enemy: &mut Enemy,
    body: &mut EnemyBody,
    physics: &impl PhysicsQuery,
    rng: &mut ChaCha8Rng,
    tuning: &WalkerTuning,
    dt: f32,
) -> Wander {
    match step {
        Wander::Waiting { remaining } => {
            body.velocity.x = 0.0;
            let remaining = remaining - dt;
            if remaining > 0.0 {
                return Wander::Waiting { remaining };
            }
            enemy.orientation = random_orientation(rng);
            Wander::Walking {
                remaining: roll(rng, tuning.walk_min, tuning.walk_max),
            }
        }
        Wander::Walking { remaining } => {
            check_pit(enemy, body, physics, tuning.pit_probe_distance);
            body.velocity.x = accelerate(
                body.velocity.x,
                enemy.orientation,
                tuning.walk_speed,
                tuning.accel,
                dt,
            );
            let remaining = remaining - dt;
            if remaining > 0.0 {
                Wander::Walking { remaining }
            } else {
                Wander::Stopping
            }
        }
        Wander::Stopping => {
            check_pit(enemy, body, physics, tuning.pit_probe_distance);
            body.velocity.x = decelerate_to_rest(body.velocity.x, tuning.decel, dt);
            if body.velocity.x == 0.0 {
                Wander::start(rng, tuning)
            } else {
                Wander::Stopping
            }
        }
    }
}
