//! Enemies domain: flying dive attacker.
//!
//! A flyer patrols between two x limits at a fixed altitude, watching a cone
//! below and ahead of it. On sighting the player it winds up, dives to the
//! player's altitude, winds up again, swoops across to the player's x and
//! climbs back to its route with its collider off.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::SoundCue;
use crate::enemies::{Enemy, EnemyBody, EnemyState, FlyerTuning, PlayerView};
use crate::movement::{GameLayer, PhysicsQuery, solid_mask};

/// Patrol limits and cruising altitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrolRoute {
    pub left: f32,
    pub right: f32,
    pub altitude: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlyerPhase {
    Patrolling,
    Descending,
    Swooping,
    Rising,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FlyerBehavior {
    Patrol {
        cooldown: f32,
    },
    /// Wind-up, then the dive toward `target`'s altitude
    Descend {
        windup: f32,
        diving: bool,
        target: Vec2,
    },
    Swoop {
        windup: f32,
        charging: bool,
        target: Vec2,
    },
    Rise,
}

#[derive(Component, Debug, Clone)]
pub struct Flyer {
    behavior: FlyerBehavior,
    route: PatrolRoute,
    flap: f32,
}

impl Flyer {
    pub fn new(route: PatrolRoute) -> Self {
        Self {
            behavior: FlyerBehavior::Patrol { cooldown: 0.0 },
            route,
            flap: 0.0,
        }
    }

    pub fn phase(&self) -> FlyerPhase {
        match self.behavior {
            FlyerBehavior::Patrol { .. } => FlyerPhase::Patrolling,
            FlyerBehavior::Descend { .. } => FlyerPhase::Descending,
            FlyerBehavior::Swoop { .. } => FlyerPhase::Swooping,
            FlyerBehavior::Rise => FlyerPhase::Rising,
        }
    }

    /// The collider is off while climbing back so the flyer can pass
    /// through platforms
    pub fn collider_enabled(&self) -> bool {
        self.phase() != FlyerPhase::Rising
    }

    pub fn route(&self) -> PatrolRoute {
        self.route
    }

    pub fn tick(
        &mut self,
        enemy: &mut Enemy,
        body: &mut EnemyBody,
        player: Option<&PlayerView>,
        physics: &impl PhysicsQuery,
        tuning: &FlyerTuning,
        dt: f32,
        sounds: &mut Vec<SoundCue>,
    ) -> Option<EnemyState> {
        if enemy.is_dead() {
            return None;
        }

        if matches!(self.behavior, FlyerBehavior::Patrol { .. } | FlyerBehavior::Rise) {
            self.flap += dt;
            if self.flap >= tuning.flap_interval {
                self.flap = 0.0;
                sounds.push(SoundCue::play("Flap"));
            }
        }

        match self.behavior {
            FlyerBehavior::Patrol { cooldown } => {
                let cooldown = if cooldown <= tuning.neutral_cooldown {
                    cooldown + dt
                } else {
                    cooldown
                };

                let sighted = player.and_then(|p| {
                    spot_player(body.position, enemy.orientation, p, physics, tuning)
                });
                if let Some(target) = sighted.filter(|_| cooldown > tuning.neutral_cooldown) {
                    body.velocity = Vec2::ZERO;
                    enemy.state = EnemyState::Hostile;
                    self.behavior = FlyerBehavior::Descend {
                        windup: tuning.descend_windup,
                        diving: false,
                        target,
                    };
                    return Some(EnemyState::Hostile);
                }

                if body.position.x >= self.route.right {
                    enemy.orientation = -1.0;
                }
                if body.position.x <= self.route.left {
                    enemy.orientation = 1.0;
                }
                body.velocity = Vec2::new(enemy.orientation * tuning.patrol_speed, 0.0);
                self.behavior = FlyerBehavior::Patrol { cooldown };
                None
            }
            FlyerBehavior::Descend {
                windup,
                diving,
                target,
            } => {
                if !diving {
                    body.velocity = Vec2::ZERO;
                    let windup = windup - dt;
                    if windup > 0.0 {
                        self.behavior = FlyerBehavior::Descend {
                            windup,
                            diving,
                            target,
                        };
                        return None;
                    }
                    sounds.push(SoundCue::play("FlyerDescent"));
                    sounds.push(SoundCue::play("FlyerScreech"));
                }

                if body.position.y <= target.y + tuning.floor_check_distance {
                    body.velocity.y = 0.0;
                    self.behavior = FlyerBehavior::Swoop {
                        windup: tuning.swoop_windup,
                        charging: false,
                        target,
                    };
                    return None;
                }

                let feet = body.position - Vec2::new(0.0, enemy.half_extents.y);
                let floor = physics.probe(
                    feet,
                    Dir2::NEG_Y,
                    tuning.floor_check_distance,
                    solid_mask(),
                );
                if floor.is_some() {
                    return self.start_rise(enemy, body, tuning, sounds);
                }

                body.velocity.y = -tuning.descent_speed;
                self.behavior = FlyerBehavior::Descend {
                    windup: 0.0,
                    diving: true,
                    target,
                };
                None
            }
            FlyerBehavior::Swoop {
                windup,
                charging,
                target,
            } => {
                if !charging {
                    body.velocity = Vec2::ZERO;
                    let windup = windup - dt;
                    if windup > 0.0 {
                        self.behavior = FlyerBehavior::Swoop {
                            windup,
                            charging,
                            target,
                        };
                        return None;
                    }
                    sounds.push(SoundCue::play("FlyerImpulse"));
                }

                let short_of_target = (enemy.orientation > 0.0 && body.position.x <= target.x)
                    || (enemy.orientation < 0.0 && body.position.x >= target.x);
                if !short_of_target {
                    return self.start_rise(enemy, body, tuning, sounds);
                }

                let front =
                    body.position + Vec2::new(enemy.orientation * enemy.half_extents.x, 0.0);
                let direction = if enemy.orientation > 0.0 {
                    Dir2::X
                } else {
                    Dir2::NEG_X
                };
                if physics
                    .probe(front, direction, tuning.wall_check_distance, solid_mask())
                    .is_some()
                {
                    return self.start_rise(enemy, body, tuning, sounds);
                }

                body.velocity.x = enemy.orientation * tuning.swoop_speed;
                self.behavior = FlyerBehavior::Swoop {
                    windup: 0.0,
                    charging: true,
                    target,
                };
                None
            }
            FlyerBehavior::Rise => self.rise(enemy, body, tuning),
        }
    }

    fn start_rise(
        &mut self,
        enemy: &mut Enemy,
        body: &mut EnemyBody,
        tuning: &FlyerTuning,
        sounds: &mut Vec<SoundCue>,
    ) -> Option<EnemyState> {
        self.behavior = FlyerBehavior::Rise;
        self.flap = 0.0;
        sounds.push(SoundCue::play("Flap"));
        self.rise(enemy, body, tuning)
    }

    /// Climb back inside the route; done once at altitude and within limits
    fn rise(
        &mut self,
        enemy: &mut Enemy,
        body: &mut EnemyBody,
        tuning: &FlyerTuning,
    ) -> Option<EnemyState> {
        let route = self.route;
        let position = body.position;
        let below = position.y < route.altitude;

        if below || position.x < route.left || position.x > route.right {
            let mut heading = Vec2::new(enemy.orientation, if below { 1.0 } else { 0.0 });
            if position.x < route.left {
                enemy.orientation = 1.0;
                heading.x = 1.0;
            } else if position.x > route.right {
                enemy.orientation = -1.0;
                heading.x = -1.0;
            }
            body.velocity = heading.normalize_or_zero() * tuning.rising_speed;
            return None;
        }

        body.velocity = Vec2::ZERO;
        enemy.state = EnemyState::Neutral;
        self.behavior = FlyerBehavior::Patrol { cooldown: 0.0 };
        Some(EnemyState::Neutral)
    }
}

/// Look for the player inside the view cone: within `sight_radius`, with at
/// least one collider corner between straight down and `fov_degrees` toward
/// the facing side, and an unobstructed line to that corner. Returns the
/// player's position when seen.
pub fn spot_player(
    position: Vec2,
    orientation: f32,
    player: &PlayerView,
    physics: &impl PhysicsQuery,
    tuning: &FlyerTuning,
) -> Option<Vec2> {
    let nearby = physics.overlap_circle(position, tuning.sight_radius, GameLayer::Player.into());
    if !nearby.contains(&player.entity) {
        return None;
    }

    for corner in player.corners() {
        let Some(direction) = (corner - position).try_normalize() else {
            continue;
        };
        let angle = -orientation * direction.angle_to(Vec2::NEG_Y).to_degrees();
        if !(0.0..=tuning.fov_degrees).contains(&angle) {
            continue;
        }
        if physics.linecast(position, corner, solid_mask()).is_none() {
            return Some(player.position);
        }
    }
    None
}
