//! Raycasting for target selection.

use crate::HitWorld;
use glam::Vec3;
use rapier3d::prelude::*;

/// Result of a raycast query.
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit {
    /// The collider that was hit.
    pub collider: ColliderHandle,
    /// Distance along the ray to the hit point.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
    /// Surface normal at the hit point (zero when the ray starts inside the shape).
    pub normal: Vec3,
}

impl HitWorld {
    fn ray(origin: Vec3, direction: Vec3) -> Option<Ray> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }
        Some(Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        ))
    }

    /// Cast a ray and return all hits up to `max_distance`, nearest first.
    ///
    /// Equal distances keep the pipeline's traversal order; callers needing a stable
    /// tie-break sort again on their own key.
    pub fn raycast_all(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        targets: Group,
    ) -> Vec<RaycastHit> {
        let Some(ray) = Self::ray(origin, direction) else {
            return Vec::new();
        };
        let filter = QueryFilter::default().groups(crate::TargetGroup::query_groups(targets));
        let mut hits = Vec::new();

        self.query_pipeline.intersections_with_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_distance,
            true,
            filter,
            |collider, intersection: RayIntersection| {
                let point = ray.point_at(intersection.time_of_impact);
                hits.push(RaycastHit {
                    collider,
                    distance: intersection.time_of_impact,
                    point: Vec3::new(point.x, point.y, point.z),
                    normal: Vec3::new(
                        intersection.normal.x,
                        intersection.normal.y,
                        intersection.normal.z,
                    ),
                });
                true // Continue searching
            },
        );

        // Sort by distance (use unwrap_or to avoid panic on NaN)
        hits.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HitShape, TargetGroup};

    fn world_with_two_balls() -> (HitWorld, ColliderHandle, ColliderHandle) {
        let mut world = HitWorld::new();
        let near = world.insert(Vec3::new(5.0, 0.0, 0.0), HitShape::Ball { radius: 1.0 }, TargetGroup::Planet, 1);
        let far = world.insert(Vec3::new(20.0, 0.0, 0.0), HitShape::Ball { radius: 2.0 }, TargetGroup::Sun, 2);
        world.update_query_pipeline();
        (world, near, far)
    }

    #[test]
    fn nearest_hit_comes_first() {
        let (world, near, _) = world_with_two_balls();
        let hits = world.raycast_all(Vec3::ZERO, Vec3::X, 100.0, TargetGroup::all());
        let hit = hits[0];
        assert_eq!(hit.collider, near);
        assert!((hit.distance - 4.0).abs() < 1e-4);
        assert!((hit.point - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn raycast_all_sorted_by_distance() {
        let (world, near, far) = world_with_two_balls();
        let hits = world.raycast_all(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), 100.0, TargetGroup::all());
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].collider, near);
        assert_eq!(hits[1].collider, far);
        assert!((hits[1].distance - 18.0).abs() < 1e-4);
    }

    #[test]
    fn group_filter_skips_other_tiers() {
        let (world, _, far) = world_with_two_balls();
        let hits = world.raycast_all(Vec3::ZERO, Vec3::X, 100.0, TargetGroup::Sun.bits());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].collider, far);
    }

    #[test]
    fn max_distance_limits_hits() {
        let (world, _, _) = world_with_two_balls();
        assert_eq!(world.raycast_all(Vec3::ZERO, Vec3::X, 10.0, TargetGroup::all()).len(), 1);
    }

    #[test]
    fn miss_and_degenerate_direction() {
        let (world, _, _) = world_with_two_balls();
        assert!(world.raycast_all(Vec3::ZERO, -Vec3::X, 100.0, TargetGroup::all()).is_empty());
        assert!(world.raycast_all(Vec3::ZERO, Vec3::ZERO, 100.0, TargetGroup::all()).is_empty());
    }

    #[test]
    fn moved_collider_is_found_after_update() {
        let (mut world, near, _) = world_with_two_balls();
        world.set_position(near, Vec3::new(0.0, 0.0, -6.0));
        world.update_query_pipeline();
        let hits = world.raycast_all(Vec3::ZERO, -Vec3::Z, 100.0, TargetGroup::all());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].collider, near);
    }

    #[test]
    fn ray_starting_inside_solid_hits_at_zero() {
        let (world, near, _) = world_with_two_balls();
        let hits = world.raycast_all(Vec3::new(5.0, 0.0, 0.0), Vec3::X, 100.0, TargetGroup::all());
        assert_eq!(hits[0].collider, near);
        assert_eq!(hits[0].distance, 0.0);
    }
}
