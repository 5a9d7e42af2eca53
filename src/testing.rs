//! In-memory physics world of axis-aligned boxes for state machine tests.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{PhysicsQuery, ProbeHit};

struct TestBox {
    entity: Entity,
    min: Vec2,
    max: Vec2,
    layers: LayerMask,
}

pub struct BoxWorld {
    world: World,
    boxes: Vec<TestBox>,
}

impl Default for BoxWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxWorld {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            boxes: Vec::new(),
        }
    }

    /// An entity id with no box attached (players, markers, enemies off-grid)
    pub fn entity(&mut self) -> Entity {
        self.world.spawn_empty().id()
    }

    pub fn add_box(&mut self, center: Vec2, size: Vec2, layers: impl Into<LayerMask>) -> Entity {
        let entity = self.entity();
        self.attach_box(entity, center, size, layers);
        entity
    }

    /// Give an existing entity another collider
    pub fn attach_box(
        &mut self,
        entity: Entity,
        center: Vec2,
        size: Vec2,
        layers: impl Into<LayerMask>,
    ) {
        self.boxes.push(TestBox {
            entity,
            min: center - size * 0.5,
            max: center + size * 0.5,
            layers: layers.into(),
        });
    }

    pub fn remove(&mut self, entity: Entity) {
        self.boxes.retain(|b| b.entity != entity);
    }

    fn matching(&self, mask: LayerMask) -> impl Iterator<Item = &TestBox> {
        self.boxes.iter().filter(move |b| b.layers.0 & mask.0 != 0)
    }
}

/// Slab test; returns the entry distance, or 0 when the origin is inside
fn ray_aabb(origin: Vec2, dir: Vec2, min: Vec2, max: Vec2, max_distance: f32) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = max_distance;
    for axis in 0..2 {
        let (o, d, lo, hi) = (origin[axis], dir[axis], min[axis], max[axis]);
        if d.abs() < f32::EPSILON {
            if o < lo || o > hi {
                return None;
            }
        } else {
            let inv = 1.0 / d;
            let (mut t0, mut t1) = ((lo - o) * inv, (hi - o) * inv);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
    }
    Some(t_min)
}

impl PhysicsQuery for BoxWorld {
    fn probe(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<ProbeHit> {
        self.matching(mask)
            .filter_map(|b| {
                ray_aabb(origin, *direction, b.min, b.max, max_distance).map(|distance| ProbeHit {
                    entity: b.entity,
                    point: origin + *direction * distance,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn box_probe(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<ProbeHit> {
        let half = size * 0.5;
        self.matching(mask)
            .filter_map(|b| {
                ray_aabb(center, *direction, b.min - half, b.max + half, max_distance).map(
                    |distance| ProbeHit {
                        entity: b.entity,
                        point: center + *direction * distance,
                        distance,
                    },
                )
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn linecast_all(&self, start: Vec2, end: Vec2, mask: LayerMask) -> Vec<ProbeHit> {
        let Ok(direction) = Dir2::new(end - start) else {
            return Vec::new();
        };
        let length = start.distance(end);
        let mut hits: Vec<ProbeHit> = self
            .matching(mask)
            .filter_map(|b| {
                ray_aabb(start, *direction, b.min, b.max, length).map(|distance| ProbeHit {
                    entity: b.entity,
                    point: start + *direction * distance,
                    distance,
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<Entity> {
        self.matching(mask)
            .filter(|b| center.clamp(b.min, b.max).distance(center) <= radius)
            .map(|b| b.entity)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::GameLayer;

    #[test]
    fn test_probe_hits_nearest_box() {
        let mut world = BoxWorld::new();
        let near = world.add_box(Vec2::new(10.0, 0.0), Vec2::splat(2.0), GameLayer::Wall);
        world.add_box(Vec2::new(20.0, 0.0), Vec2::splat(2.0), GameLayer::Wall);

        let hit = world
            .probe(Vec2::ZERO, Dir2::X, 100.0, GameLayer::Wall.into())
            .unwrap();
        assert_eq!(hit.entity, near);
        assert!((hit.distance - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_probe_respects_mask_and_range() {
        let mut world = BoxWorld::new();
        world.add_box(Vec2::new(10.0, 0.0), Vec2::splat(2.0), GameLayer::Enemy);

        assert!(world.probe(Vec2::ZERO, Dir2::X, 100.0, GameLayer::Wall.into()).is_none());
        assert!(world.probe(Vec2::ZERO, Dir2::X, 5.0, GameLayer::Enemy.into()).is_none());
    }

    #[test]
    fn test_box_probe_uses_swept_extent() {
        let mut world = BoxWorld::new();
        world.add_box(Vec2::new(0.0, -10.0), Vec2::new(100.0, 2.0), GameLayer::Ground);

        // Box bottom sits at y = -4, ground top at y = -9
        let hit = world.box_probe(
            Vec2::ZERO,
            Vec2::new(8.0, 8.0),
            Dir2::NEG_Y,
            10.0,
            GameLayer::Ground.into(),
        );
        assert!((hit.unwrap().distance - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_linecast_all_is_sorted() {
        let mut world = BoxWorld::new();
        let far = world.add_box(Vec2::new(30.0, 0.0), Vec2::splat(2.0), GameLayer::Enemy);
        let near = world.add_box(Vec2::new(10.0, 0.0), Vec2::splat(2.0), GameLayer::Enemy);

        let hits = world.linecast_all(Vec2::ZERO, Vec2::new(40.0, 0.0), GameLayer::Enemy.into());
        let order: Vec<Entity> = hits.iter().map(|h| h.entity).collect();
        assert_eq!(order, vec![near, far]);
    }
}
