//! Movement domain: the physics query seam shared by mover, dash and enemies.

use avian2d::prelude::*;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    pub entity: Entity,
    pub point: Vec2,
    pub distance: f32,
}

/// Read-only physics queries used by the gameplay state machines.
///
/// Distances are measured from the probe origin along the probe direction.
/// A probe that starts inside a collider reports a hit at distance zero.
pub trait PhysicsQuery {
    fn probe(&self, origin: Vec2, direction: Dir2, max_distance: f32, mask: LayerMask)
    -> Option<ProbeHit>;

    /// Sweeps an axis-aligned box of `size` centered on `center`
    fn box_probe(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<ProbeHit>;

    /// Every collider crossed by the segment, nearest first
    fn linecast_all(&self, start: Vec2, end: Vec2, mask: LayerMask) -> Vec<ProbeHit>;

    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<Entity>;

    fn linecast(&self, start: Vec2, end: Vec2, mask: LayerMask) -> Option<ProbeHit> {
        let direction = Dir2::new(end - start).ok()?;
        self.probe(start, direction, start.distance(end), mask)
    }
}

/// `PhysicsQuery` over avian's spatial query pipeline
pub struct AvianProbe<'a, 'w, 's> {
    spatial: &'a SpatialQuery<'w, 's>,
}

impl<'a, 'w, 's> AvianProbe<'a, 'w, 's> {
    pub fn new(spatial: &'a SpatialQuery<'w, 's>) -> Self {
        Self { spatial }
    }
}

impl PhysicsQuery for AvianProbe<'_, '_, '_> {
    fn probe(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<ProbeHit> {
        let filter = SpatialQueryFilter::from_mask(mask);
        self.spatial
            .cast_ray(origin, direction, max_distance, true, &filter)
            .map(|hit| ProbeHit {
                entity: hit.entity,
                point: origin + *direction * hit.distance,
                distance: hit.distance,
            })
    }

    fn box_probe(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<ProbeHit> {
        let filter = SpatialQueryFilter::from_mask(mask);
        let shape = Collider::rectangle(size.x, size.y);
        let config = ShapeCastConfig::from_max_distance(max_distance);
        self.spatial
            .cast_shape(&shape, center, 0.0, direction, &config, &filter)
            .map(|hit| ProbeHit {
                entity: hit.entity,
                point: hit.point1,
                distance: hit.distance,
            })
    }

    fn linecast_all(&self, start: Vec2, end: Vec2, mask: LayerMask) -> Vec<ProbeHit> {
        let Ok(direction) = Dir2::new(end - start) else {
            return Vec::new();
        };
        let filter = SpatialQueryFilter::from_mask(mask);
        let mut hits: Vec<ProbeHit> = self
            .spatial
            .ray_hits(start, direction, start.distance(end), u32::MAX, true, &filter)
            .into_iter()
            .map(|hit| ProbeHit {
                entity: hit.entity,
                point: start + *direction * hit.distance,
                distance: hit.distance,
            })
            .collect();
        // ray_hits makes no ordering promise
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<Entity> {
        let filter = SpatialQueryFilter::from_mask(mask);
        self.spatial
            .shape_intersections(&Collider::circle(radius), center, 0.0, &filter)
    }
}
