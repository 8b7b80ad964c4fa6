//! Per-tick collectible motion: patrolling suns, orbiting planets, flash expiry.

use engine_core::{Flash, Pose};
use glam::Vec3;
use hecs::Entity;
use procgen::orbit_position;

use crate::collectible::{HitBody, Motion, Orbit};
use crate::registry::CollectibleRegistry;

/// What one kinematics pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KinematicsStats {
    pub patrolled: usize,
    pub orbited: usize,
    /// Orbits skipped because their center was missing.
    pub orphaned: usize,
    pub flashes_expired: usize,
}

/// Advance a patrol by one tick. The direction is negated when a coordinate is past
/// ±`half_extent` and still heading outward.
pub fn patrol_step(position: &mut Vec3, direction: &mut Vec3, half_extent: f32) {
    *position += *direction;
    let heading_out = (0..3).any(|axis| {
        (position[axis] > half_extent && direction[axis] > 0.0)
            || (position[axis] < -half_extent && direction[axis] < 0.0)
    });
    if heading_out {
        *direction = -*direction;
    }
}

/// Advance an orbit by one tick and return the new position around `center`.
pub fn orbit_step(orbit: &mut Orbit, center: Vec3) -> Vec3 {
    orbit.angle = (orbit.angle + orbit.angular_speed).rem_euclid(std::f32::consts::TAU);
    orbit_position(center, orbit.radius, orbit.angle)
}

/// Run one tick of collectible motion.
///
/// Patrols move first, then orbits read their centers' post-patrol positions. All
/// orbit centers are read before any orbiting body is written.
pub fn update_collectibles(
    registry: &mut CollectibleRegistry,
    half_extent: f32,
    now: u64,
) -> KinematicsStats {
    let mut stats = KinematicsStats::default();
    let mut moved = Vec::new();

    for (_, (pose, motion, body)) in registry
        .world_mut()
        .query_mut::<(&mut Pose, &mut Motion, &HitBody)>()
    {
        if let Motion::Patrolling { direction } = motion {
            patrol_step(&mut pose.position, direction, half_extent);
            moved.push((body.collider, pose.position));
            stats.patrolled += 1;
        }
    }

    let orbit_updates: Vec<(Entity, Option<Vec3>)> = {
        let world = registry.world();
        let mut query = world.query::<&Motion>();
        query
            .iter()
            .filter_map(|(entity, motion)| match motion {
                Motion::Orbiting(orbit) => Some((
                    entity,
                    world.get::<&Pose>(orbit.center.entity()).ok().map(|p| p.position),
                )),
                _ => None,
            })
            .collect()
    };

    for (entity, center) in orbit_updates {
        let Some(center) = center else {
            log::debug!("Orbit center of {:?} is missing, skipping", entity);
            stats.orphaned += 1;
            continue;
        };
        if let Ok((pose, motion, body)) = registry
            .world_mut()
            .query_one_mut::<(&mut Pose, &mut Motion, &HitBody)>(entity)
        {
            if let Motion::Orbiting(orbit) = motion {
                pose.position = orbit_step(orbit, center);
                moved.push((body.collider, pose.position));
                stats.orbited += 1;
            }
        }
    }

    let hits = registry.hits_mut();
    for (collider, position) in moved {
        hits.set_position(collider, position);
    }

    let expired: Vec<Entity> = registry
        .world_mut()
        .query_mut::<&Flash>()
        .into_iter()
        .filter(|(_, flash)| !flash.is_active(now))
        .map(|(entity, _)| entity)
        .collect();
    for entity in expired {
        if registry.world_mut().remove_one::<Flash>(entity).is_ok() {
            stats.flashes_expired += 1;
        }
    }

    stats
}
