//! World layout generation: suns, the planets orbiting them, and loose cubes.
//!
//! Suns drift on a reflecting diagonal patrol. Planets follow circular orbits around a
//! sun, advancing a fixed angle per tick. Cubes sit still on the ground. A layout is a
//! flat list of bodies in which every orbit center appears before the bodies that
//! reference it, so the list can be registered front to back.

use crate::scatter::{random_diagonal, random_phase, random_point, HeightRule};
use glam::Vec3;
use rand::prelude::*;

/// Tier of a generated body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Cube,
    Planet,
    Sun,
}

/// How a generated body moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyMotion {
    Static,
    /// Circular orbit around the body at index `center` of the same layout.
    Orbit {
        center: usize,
        radius: f32,
        angle: f32,
        angular_speed: f32,
    },
    /// Linear drift, `direction` per tick.
    Patrol { direction: Vec3 },
}

/// One body of a layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    pub kind: BodyKind,
    pub position: Vec3,
    pub score: u32,
    /// Hit radius (half-edge for cubes).
    pub radius: f32,
    pub motion: BodyMotion,
}

/// Inputs for [`WorldLayout::generate`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    /// Edge length of the cubic world; bodies scatter within ±size/2.
    pub world_size: f32,
    pub suns: usize,
    pub planets_per_sun: usize,
    pub cubes: usize,
    /// Height band for cubes.
    pub cube_height: HeightRule,
    pub cube_score: u32,
    pub cube_half_extent: f32,
    pub sun_score: u32,
    pub sun_radius: f32,
    /// Per-axis patrol speed of suns (units per tick).
    pub sun_patrol_speed: f32,
    /// Inclusive planet score range.
    pub planet_score: (u32, u32),
    pub planet_radius: (f32, f32),
    pub orbit_radius: (f32, f32),
    /// Radians per tick.
    pub orbit_speed: (f32, f32),
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            world_size: 100.0,
            suns: 2,
            planets_per_sun: 3,
            cubes: 0,
            cube_height: HeightRule::Band { min: 0.0, max: 5.0 },
            cube_score: 1,
            cube_half_extent: 0.5,
            sun_score: 5,
            sun_radius: 3.0,
            sun_patrol_speed: 0.05,
            planet_score: (1, 3),
            planet_radius: (0.8, 1.6),
            orbit_radius: (8.0, 20.0),
            orbit_speed: (0.005, 0.02),
        }
    }
}

/// Position on a circular orbit in the XZ plane around `center`.
pub fn orbit_position(center: Vec3, radius: f32, angle: f32) -> Vec3 {
    center + Vec3::new(angle.cos(), 0.0, angle.sin()) * radius
}

fn sample(rng: &mut StdRng, (min, max): (f32, f32)) -> f32 {
    if min < max {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

/// A generated set of bodies.
#[derive(Debug, Clone)]
pub struct WorldLayout {
    pub seed: u64,
    pub bodies: Vec<BodySpec>,
}

impl WorldLayout {
    /// Generate a layout from a seed.
    pub fn generate(seed: u64, params: &LayoutParams) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let half = params.world_size * 0.5;
        let mut bodies = Vec::with_capacity(
            params.suns * (1 + params.planets_per_sun) + params.cubes,
        );

        for _ in 0..params.suns {
            // Keep suns clear of the walls so they start inside the patrol box
            let margin = (half - params.sun_radius).max(0.0);
            let center = bodies.len();
            bodies.push(BodySpec {
                kind: BodyKind::Sun,
                position: random_point(&mut rng, margin, HeightRule::Random),
                score: params.sun_score,
                radius: params.sun_radius,
                motion: BodyMotion::Patrol {
                    direction: random_diagonal(&mut rng, params.sun_patrol_speed),
                },
            });

            let sun_position = bodies[center].position;
            for _ in 0..params.planets_per_sun {
                let radius = sample(&mut rng, params.orbit_radius);
                let angle = random_phase(&mut rng);
                let (lo, hi) = params.planet_score;
                let score = if lo < hi { rng.gen_range(lo..=hi) } else { lo };
                bodies.push(BodySpec {
                    kind: BodyKind::Planet,
                    position: orbit_position(sun_position, radius, angle),
                    score,
                    radius: sample(&mut rng, params.planet_radius),
                    motion: BodyMotion::Orbit {
                        center,
                        radius,
                        angle,
                        angular_speed: sample(&mut rng, params.orbit_speed),
                    },
                });
            }
        }

        for _ in 0..params.cubes {
            bodies.push(BodySpec {
                kind: BodyKind::Cube,
                position: random_point(&mut rng, half, params.cube_height),
                score: params.cube_score,
                radius: params.cube_half_extent,
                motion: BodyMotion::Static,
            });
        }

        log::debug!("Generated layout seed {} with {} bodies", seed, bodies.len());
        Self { seed, bodies }
    }

    /// Bodies of one kind.
    pub fn of_kind(&self, kind: BodyKind) -> impl Iterator<Item = &BodySpec> {
        self.bodies.iter().filter(move |b| b.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_counts_match_params() {
        let params = LayoutParams {
            suns: 2,
            planets_per_sun: 4,
            cubes: 10,
            ..Default::default()
        };
        let layout = WorldLayout::generate(42, &params);
        assert_eq!(layout.bodies.len(), 2 + 8 + 10);
        assert_eq!(layout.of_kind(BodyKind::Sun).count(), 2);
        assert_eq!(layout.of_kind(BodyKind::Planet).count(), 8);
        assert_eq!(layout.of_kind(BodyKind::Cube).count(), 10);
    }

    #[test]
    fn layout_is_deterministic() {
        let params = LayoutParams::default();
        let a = WorldLayout::generate(99, &params);
        let b = WorldLayout::generate(99, &params);
        assert_eq!(a.bodies, b.bodies);
    }

    #[test]
    fn orbit_centers_precede_planets_and_are_suns() {
        let layout = WorldLayout::generate(5, &LayoutParams::default());
        for (i, body) in layout.bodies.iter().enumerate() {
            if let BodyMotion::Orbit { center, radius, angle, .. } = body.motion {
                assert!(center < i);
                let sun = &layout.bodies[center];
                assert_eq!(sun.kind, BodyKind::Sun);
                let expected = orbit_position(sun.position, radius, angle);
                assert!((body.position - expected).length() < 1e-4);
            }
        }
    }

    #[test]
    fn suns_and_cubes_start_in_bounds() {
        let params = LayoutParams {
            cubes: 30,
            ..Default::default()
        };
        let layout = WorldLayout::generate(1234, &params);
        let half = params.world_size * 0.5;
        for body in layout.bodies.iter().filter(|b| b.kind != BodyKind::Planet) {
            assert!(body.position.abs().max_element() <= half, "{body:?}");
        }
        for cube in layout.of_kind(BodyKind::Cube) {
            assert!((0.0..=5.0).contains(&cube.position.y));
            assert_eq!(cube.motion, BodyMotion::Static);
        }
    }

    #[test]
    fn planet_scores_within_range() {
        let layout = WorldLayout::generate(8, &LayoutParams::default());
        for planet in layout.of_kind(BodyKind::Planet) {
            assert!((1..=3).contains(&planet.score));
        }
    }

    #[test]
    fn orbit_position_on_circle() {
        let p = orbit_position(Vec3::new(1.0, 2.0, 3.0), 5.0, std::f32::consts::FRAC_PI_2);
        assert!((p - Vec3::new(1.0, 2.0, 8.0)).length() < 1e-5);
    }
}
