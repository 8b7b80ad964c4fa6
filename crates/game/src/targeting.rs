//! Activation: pick the collectible under the aim ray and collect it if close enough.

use engine_core::{Flash, Pose};
use glam::{Vec2, Vec3};
use physics::{Group, TargetGroup};
use procgen::{orbit_position, random_phase, random_point, HeightRule};
use rand::Rng;

use crate::camera::FollowCamera;
use crate::collectible::{Category, CollectibleId, Motion};
use crate::config::{AimMode, GameConfig};
use crate::economy::Economy;
use crate::registry::CollectibleRegistry;

/// Phases tried before an orbiting body is parked.
const ORBIT_PHASE_ATTEMPTS: usize = 16;

/// Result of one activation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activation {
    /// Collected and moved elsewhere.
    Collected {
        id: CollectibleId,
        score: u32,
        category: Category,
        new_position: Vec3,
    },
    /// The nearest collectible on the ray was too far from the entity.
    OutOfRange { id: CollectibleId, distance: f32 },
    /// Nothing on the ray.
    Miss,
}

impl Activation {
    pub fn is_collected(&self) -> bool {
        matches!(self, Activation::Collected { .. })
    }
}

/// Ray used for an activation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

#[derive(Debug, Clone)]
pub struct TargetingSystem {
    aim: AimMode,
    activation_distance: f32,
    max_ray_distance: f32,
    flash_ticks: u64,
    respawn_height: HeightRule,
    half_extent: f32,
    targets: Group,
}

impl TargetingSystem {
    pub fn new(config: &GameConfig) -> Self {
        let targeting = &config.targeting;
        Self {
            aim: config.aim,
            activation_distance: targeting.activation_distance,
            max_ray_distance: targeting.max_ray_distance,
            flash_ticks: targeting.flash_ticks,
            respawn_height: targeting.respawn_height.into(),
            half_extent: config.half_extent(),
            targets: TargetGroup::all(),
        }
    }

    pub fn aim_mode(&self) -> AimMode {
        self.aim
    }

    pub fn activation_distance(&self) -> f32 {
        self.activation_distance
    }

    /// Aim ray for the configured mode: the entity's forward vector, or the camera
    /// ray through `cursor` (NDC).
    pub fn aim_ray(&self, entity: &Pose, camera: &FollowCamera, cursor: Vec2) -> AimRay {
        match self.aim {
            AimMode::Forward => AimRay {
                origin: entity.position,
                direction: entity.forward(),
            },
            AimMode::Cursor => {
                let (origin, direction) = camera.screen_ray(cursor);
                AimRay { origin, direction }
            }
        }
    }

    /// Try to collect the nearest collectible on `ray`.
    ///
    /// Succeeds only if its center is strictly closer than the activation distance to
    /// `entity`. On success the score is credited, suns raise speed, and the collectible
    /// respawns and flashes.
    pub fn activate<R: Rng + ?Sized>(
        &self,
        registry: &mut CollectibleRegistry,
        economy: &mut Economy,
        entity: &Pose,
        ray: AimRay,
        rng: &mut R,
        now: u64,
    ) -> Activation {
        let Some(hit) = registry.nearest_hit(ray.origin, ray.direction, self.max_ray_distance, self.targets)
        else {
            log::debug!("Activation missed");
            return Activation::Miss;
        };
        let (Some(position), Some(collectible)) = (registry.position(hit.id), registry.collectible(hit.id))
        else {
            return Activation::Miss;
        };

        let distance = entity.position.distance(position);
        if distance >= self.activation_distance {
            log::debug!(
                "{:?} #{} is {:.1} away (limit {:.1})",
                collectible.category,
                collectible.serial,
                distance,
                self.activation_distance
            );
            return Activation::OutOfRange { id: hit.id, distance };
        }

        economy.collect(collectible.score);
        if collectible.category.is_top_tier() {
            economy.raise_speed();
        }
        let new_position = self.respawn(registry, hit.id, rng).unwrap_or(position);
        registry.flash(hit.id, Flash::starting_at(now, self.flash_ticks));

        log::debug!(
            "Collected {:?} #{} for {} (energy {}, speed {:.2})",
            collectible.category,
            collectible.serial,
            collectible.score,
            economy.energy(),
            economy.speed()
        );
        Activation::Collected {
            id: hit.id,
            score: collectible.score,
            category: collectible.category,
            new_position,
        }
    }

    /// Move a collectible to a fresh in-bounds spot. Orbiting bodies get a new phase on
    /// their orbit; if no phase keeps them inside the world they stop orbiting. Everything
    /// else gets a uniform in-bounds point.
    pub fn respawn<R: Rng + ?Sized>(
        &self,
        registry: &mut CollectibleRegistry,
        id: CollectibleId,
        rng: &mut R,
    ) -> Option<Vec3> {
        let motion = registry.motion(id)?;
        let new_position = match motion {
            Motion::Orbiting(mut orbit) => {
                let placed = registry
                    .position(orbit.center)
                    .and_then(|center| self.orbit_phase(center, orbit.radius, rng));
                match placed {
                    Some((angle, position)) => {
                        orbit.angle = angle;
                        registry.set_motion(id, Motion::Orbiting(orbit));
                        position
                    }
                    None => {
                        log::debug!("No in-bounds phase on orbit of radius {:.1}; parking", orbit.radius);
                        registry.set_motion(id, Motion::Static);
                        random_point(rng, self.half_extent, self.respawn_height)
                    }
                }
            }
            Motion::Static | Motion::Patrolling { .. } => {
                random_point(rng, self.half_extent, self.respawn_height)
            }
        };
        registry.set_position(id, new_position).then_some(new_position)
    }

    /// Draw random phases until one lands inside the world.
    fn orbit_phase<R: Rng + ?Sized>(&self, center: Vec3, radius: f32, rng: &mut R) -> Option<(f32, Vec3)> {
        (0..ORBIT_PHASE_ATTEMPTS).find_map(|_| {
            let angle = random_phase(rng);
            let position = orbit_position(center, radius, angle);
            (position.abs().max_element() <= self.half_extent).then_some((angle, position))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectible::{Orbit, SpawnRequest};
    use crate::config::CameraConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::FRAC_PI_2;

    struct Fixture {
        targeting: TargetingSystem,
        registry: CollectibleRegistry,
        economy: Economy,
        rng: StdRng,
    }

    fn fixture(config: &GameConfig) -> Fixture {
        Fixture {
            targeting: TargetingSystem::new(config),
            registry: CollectibleRegistry::new(),
            economy: Economy::from_config(config),
            rng: StdRng::seed_from_u64(7),
        }
    }

    impl Fixture {
        fn activate_from(&mut self, entity: Pose) -> Activation {
            let camera = FollowCamera::new(&CameraConfig::first_person(), &entity);
            let ray = self.targeting.aim_ray(&entity, &camera, Vec2::ZERO);
            self.targeting
                .activate(&mut self.registry, &mut self.economy, &entity, ray, &mut self.rng, 1)
        }
    }

    fn facing_x(position: Vec3) -> Pose {
        Pose::new(position, -FRAC_PI_2, 0.0)
    }

    #[test]
    fn distant_target_is_left_alone() {
        let mut f = fixture(&GameConfig::flight());
        let target = f.registry.register(SpawnRequest::new(Vec3::new(40.0, 0.0, 0.0), 3, Category::Planet));

        for _ in 0..5 {
            let outcome = f.activate_from(facing_x(Vec3::ZERO));
            assert!(matches!(outcome, Activation::OutOfRange { id, distance } if id == target && distance == 40.0));
        }
        assert_eq!(f.economy.energy(), 0);
        assert_eq!(f.registry.position(target), Some(Vec3::new(40.0, 0.0, 0.0)));
        assert!(!f.registry.view(target, 1).unwrap().highlighted);
    }

    #[test]
    fn close_target_is_collected_and_respawned_in_bounds() {
        let mut f = fixture(&GameConfig::flight());
        let target = f.registry.register(SpawnRequest::new(Vec3::new(40.0, 0.0, 0.0), 3, Category::Planet));

        let outcome = f.activate_from(facing_x(Vec3::new(35.0, 0.0, 0.0)));
        let Activation::Collected { id, score, category, new_position } = outcome else {
            panic!("expected a collection, got {outcome:?}");
        };
        assert_eq!(id, target);
        assert_eq!(score, 3);
        assert_eq!(category, Category::Planet);
        assert_eq!(f.economy.energy(), 3);
        assert!(new_position.abs().max_element() <= 50.0);
        assert_eq!(f.registry.position(target), Some(new_position));

        let collectible = f.registry.collectible(target).unwrap();
        assert_eq!(collectible.score, 3);
        assert_eq!(collectible.category, Category::Planet);
        assert!(f.registry.view(target, 1).unwrap().highlighted);
        assert!(!f.registry.view(target, 31).unwrap().highlighted);
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut f = fixture(&GameConfig::flight());
        f.registry.register(SpawnRequest::new(Vec3::new(10.0, 0.0, 0.0), 1, Category::Planet));
        assert!(matches!(f.activate_from(facing_x(Vec3::ZERO)), Activation::OutOfRange { .. }));
        assert_eq!(f.economy.energy(), 0);
    }

    #[test]
    fn empty_ray_is_a_miss() {
        let mut f = fixture(&GameConfig::flight());
        f.registry.register(SpawnRequest::new(Vec3::new(0.0, 0.0, 5.0), 1, Category::Planet));
        assert_eq!(f.activate_from(facing_x(Vec3::ZERO)), Activation::Miss);
        assert_eq!(f.economy.energy(), 0);
    }

    #[test]
    fn suns_raise_speed_cumulatively() {
        let mut f = fixture(&GameConfig::flight());
        f.registry.register(SpawnRequest::new(Vec3::new(5.0, 0.0, 0.0), 5, Category::Sun));
        let start = f.economy.speed();
        assert_eq!(start, 0.5);

        let mut last = start;
        let mut collected = 0;
        for _ in 0..3 {
            // Put the sun back in front of the entity each time.
            let id = f.registry.id_by_serial(0).unwrap();
            f.registry.set_position(id, Vec3::new(5.0, 0.0, 0.0));
            if f.activate_from(facing_x(Vec3::ZERO)).is_collected() {
                collected += 1;
            }
            assert!(f.economy.speed() >= last);
            last = f.economy.speed();
        }
        assert_eq!(collected, 3);
        assert!((f.economy.speed() - 0.8).abs() < 1e-5);
        assert_eq!(f.economy.energy(), 15);
    }

    #[test]
    fn planets_do_not_raise_speed() {
        let mut f = fixture(&GameConfig::flight());
        f.registry.register(SpawnRequest::new(Vec3::new(5.0, 0.0, 0.0), 2, Category::Planet));
        assert!(f.activate_from(facing_x(Vec3::ZERO)).is_collected());
        assert_eq!(f.economy.speed(), 0.5);
    }

    #[test]
    fn nearest_hit_wins_even_when_farther_one_is_closer_to_entity() {
        let mut f = fixture(&GameConfig::flight());
        let near = f.registry.register(SpawnRequest::new(Vec3::new(3.0, 0.0, 0.0), 1, Category::Planet));
        let far = f.registry.register(SpawnRequest::new(Vec3::new(6.0, 0.0, 0.0), 9, Category::Sun));
        let outcome = f.activate_from(facing_x(Vec3::ZERO));
        assert!(matches!(outcome, Activation::Collected { id, .. } if id == near));
        assert_eq!(f.economy.energy(), 1);
        assert_eq!(f.registry.position(far), Some(Vec3::new(6.0, 0.0, 0.0)));
    }

    #[test]
    fn fixed_height_respawn() {
        let mut config = GameConfig::grounded();
        config.aim = AimMode::Forward;
        let mut f = fixture(&config);
        let id = f.registry.register(SpawnRequest::new(Vec3::new(4.0, 1.5, 0.0), 1, Category::Cube));
        for _ in 0..10 {
            let p = f.targeting.respawn(&mut f.registry, id, &mut f.rng).unwrap();
            assert_eq!(p.y, 0.5);
            assert!(p.x.abs() <= 25.0 && p.z.abs() <= 25.0);
        }
    }

    #[test]
    fn orbiting_body_respawns_on_its_orbit() {
        let mut f = fixture(&GameConfig::flight());
        let sun = f.registry.register(SpawnRequest::new(Vec3::new(-20.0, 4.0, 0.0), 5, Category::Sun));
        let planet = f.registry.register(
            SpawnRequest::new(Vec3::new(-12.0, 4.0, 0.0), 2, Category::Planet).with_motion(Motion::Orbiting(
                Orbit {
                    center: sun,
                    radius: 8.0,
                    angle: 0.0,
                    angular_speed: 0.01,
                },
            )),
        );
        let p = f.targeting.respawn(&mut f.registry, planet, &mut f.rng).unwrap();
        assert!(((p - Vec3::new(-20.0, 4.0, 0.0)).length() - 8.0).abs() < 1e-4);
        let Some(Motion::Orbiting(orbit)) = f.registry.motion(planet) else {
            panic!("orbit lost");
        };
        assert!((orbit_position(Vec3::new(-20.0, 4.0, 0.0), 8.0, orbit.angle) - p).length() < 1e-4);
    }

    #[test]
    fn cursor_aim_uses_camera_ray() {
        let mut config = GameConfig::flight();
        config.aim = AimMode::Cursor;
        let targeting = TargetingSystem::new(&config);
        let entity = Pose::default();
        let camera = FollowCamera::new(&CameraConfig::default(), &entity);
        let ray = targeting.aim_ray(&entity, &camera, Vec2::ZERO);
        assert_eq!(ray.origin, camera.position());
        assert!((ray.direction - camera.forward()).length() < 1e-5);
    }

    #[test]
    fn orbit_near_the_wall_respawns_inside() {
        let mut f = fixture(&GameConfig::flight());
        let center = Vec3::new(45.0, 0.0, 0.0);
        let sun = f.registry.register(SpawnRequest::new(center, 5, Category::Sun));
        let planet = f.registry.register(
            SpawnRequest::new(Vec3::new(25.0, 0.0, 0.0), 2, Category::Planet).with_motion(Motion::Orbiting(
                Orbit {
                    center: sun,
                    radius: 20.0,
                    angle: 0.0,
                    angular_speed: 0.01,
                },
            )),
        );
        for _ in 0..100 {
            let p = f.targeting.respawn(&mut f.registry, planet, &mut f.rng).unwrap();
            assert!(p.abs().max_element() <= 50.0, "{p:?} left the world");
            match f.registry.motion(planet) {
                Some(Motion::Orbiting(orbit)) => {
                    assert!(((p - center).length() - 20.0).abs() < 1e-3);
                    assert!((orbit_position(center, 20.0, orbit.angle) - p).length() < 1e-3);
                }
                Some(Motion::Static) => {}
                other => panic!("unexpected motion {other:?}"),
            }
        }
    }

    #[test]
    fn orbit_that_cannot_fit_is_parked() {
        let mut f = fixture(&GameConfig::flight());
        let sun = f.registry.register(SpawnRequest::new(Vec3::ZERO, 5, Category::Sun));
        let planet = f.registry.register(
            SpawnRequest::new(Vec3::new(40.0, 0.0, 0.0), 2, Category::Planet).with_motion(Motion::Orbiting(
                Orbit {
                    center: sun,
                    radius: 200.0,
                    angle: 0.0,
                    angular_speed: 0.01,
                },
            )),
        );
        let p = f.targeting.respawn(&mut f.registry, planet, &mut f.rng).unwrap();
        assert!(p.abs().max_element() <= 50.0);
        assert_eq!(f.registry.motion(planet), Some(Motion::Static));
        assert_eq!(f.registry.position(planet), Some(p));
    }

    #[test]
    fn cursor_aim_collects_off_axis_target() {
        let mut f = fixture(&GameConfig::grounded());
        let entity = Pose::new(Vec3::new(0.0, 1.5, 0.0), 0.0, 0.0);
        let camera = FollowCamera::new(&CameraConfig::first_person(), &entity);
        let decoy = f.registry.register(SpawnRequest::new(Vec3::new(0.0, 1.5, -8.0), 1, Category::Cube));
        let cursor = Vec2::new(0.5, 0.0);
        let (origin, direction) = camera.screen_ray(cursor);
        let side = f.registry.register(SpawnRequest::new(origin + direction * 11.0, 4, Category::Cube));

        let ray = f.targeting.aim_ray(&entity, &camera, cursor);
        let outcome = f.targeting.activate(&mut f.registry, &mut f.economy, &entity, ray, &mut f.rng, 1);
        assert!(matches!(outcome, Activation::Collected { id, score: 4, .. } if id == side));
        assert_eq!(f.economy.energy(), 4);
        assert_eq!(f.registry.position(decoy), Some(Vec3::new(0.0, 1.5, -8.0)));
    }
}
