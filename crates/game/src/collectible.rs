//! Collectible components: identity, tier, motion kind, and hit region.

use glam::Vec3;
use hecs::Entity;
use physics::{ColliderHandle, HitShape, TargetGroup};
use procgen::{BodyKind, BodySpec};
use serde::{Deserialize, Serialize};

/// Stable handle of a registered collectible. Non-owning: every lookup through it is
/// fallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectibleId(pub(crate) Entity);

impl CollectibleId {
    pub fn entity(self) -> Entity {
        self.0
    }
}

/// Collectible tier. Ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Cube,
    Planet,
    Sun,
}

impl Category {
    /// Whether collecting this tier also raises speed.
    pub fn is_top_tier(self) -> bool {
        self == Category::Sun
    }

    pub fn target_group(self) -> TargetGroup {
        match self {
            Category::Cube => TargetGroup::Cube,
            Category::Planet => TargetGroup::Planet,
            Category::Sun => TargetGroup::Sun,
        }
    }

    /// Hit region used when a spawn request does not specify one.
    pub fn default_shape(self) -> HitShape {
        match self {
            Category::Cube => HitShape::Cuboid {
                half_extents: Vec3::splat(0.5),
            },
            Category::Planet => HitShape::Ball { radius: 1.2 },
            Category::Sun => HitShape::Ball { radius: 3.0 },
        }
    }
}

impl From<BodyKind> for Category {
    fn from(kind: BodyKind) -> Self {
        match kind {
            BodyKind::Cube => Category::Cube,
            BodyKind::Planet => Category::Planet,
            BodyKind::Sun => Category::Sun,
        }
    }
}

/// Identity and scoring data of a collectible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collectible {
    /// Registration order; the tie-breaker for equidistant ray hits.
    pub serial: u64,
    pub score: u32,
    pub category: Category,
}

/// Circular orbit around another collectible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub center: CollectibleId,
    pub radius: f32,
    /// Current angle in radians, kept in `[0, 2π)`.
    pub angle: f32,
    /// Radians per tick.
    pub angular_speed: f32,
}

/// Per-tick motion of a collectible.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Motion {
    #[default]
    Static,
    Orbiting(Orbit),
    /// Reflecting linear drift, `direction` per tick.
    Patrolling { direction: Vec3 },
}

/// Link from a collectible to its collider in the hit world.
#[derive(Debug, Clone, Copy)]
pub struct HitBody {
    pub collider: ColliderHandle,
    pub shape: HitShape,
}

impl HitBody {
    /// Uniform scale of the unit render mesh for this shape.
    pub fn render_scale(&self) -> f32 {
        match self.shape {
            HitShape::Ball { radius } => radius,
            HitShape::Cuboid { half_extents } => half_extents.max_element() * 2.0,
        }
    }
}

/// Everything needed to register a collectible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub position: Vec3,
    pub score: u32,
    pub category: Category,
    pub shape: HitShape,
    pub motion: Motion,
}

impl SpawnRequest {
    /// Static collectible with the category's default hit region.
    pub fn new(position: Vec3, score: u32, category: Category) -> Self {
        Self {
            position,
            score,
            category,
            shape: category.default_shape(),
            motion: Motion::Static,
        }
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    pub fn with_shape(mut self, shape: HitShape) -> Self {
        self.shape = shape;
        self
    }

    /// Request for a generated body. `center` resolves the body's orbit center, if any;
    /// an orbit whose center is unknown becomes static.
    pub fn from_body(body: &BodySpec, center: Option<CollectibleId>) -> Self {
        let category = Category::from(body.kind);
        let shape = match category {
            Category::Cube => HitShape::Cuboid {
                half_extents: Vec3::splat(body.radius),
            },
            _ => HitShape::Ball {
                radius: body.radius,
            },
        };
        let motion = match (body.motion, center) {
            (procgen::BodyMotion::Orbit { radius, angle, angular_speed, .. }, Some(center)) => {
                Motion::Orbiting(Orbit {
                    center,
                    radius,
                    angle,
                    angular_speed,
                })
            }
            (procgen::BodyMotion::Patrol { direction }, _) => Motion::Patrolling { direction },
            _ => Motion::Static,
        };
        Self::new(body.position, body.score, category)
            .with_shape(shape)
            .with_motion(motion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_is_the_top_tier() {
        assert!(Category::Sun.is_top_tier());
        assert!(!Category::Planet.is_top_tier());
        assert!(Category::Cube < Category::Planet && Category::Planet < Category::Sun);
    }

    #[test]
    fn body_without_center_becomes_static() {
        let body = BodySpec {
            kind: BodyKind::Planet,
            position: Vec3::ONE,
            score: 2,
            radius: 1.0,
            motion: procgen::BodyMotion::Orbit {
                center: 0,
                radius: 5.0,
                angle: 0.0,
                angular_speed: 0.01,
            },
        };
        let request = SpawnRequest::from_body(&body, None);
        assert_eq!(request.motion, Motion::Static);
        assert_eq!(request.category, Category::Planet);
        assert_eq!(request.shape, HitShape::Ball { radius: 1.0 });
    }

    #[test]
    fn cube_body_gets_cuboid() {
        let body = BodySpec {
            kind: BodyKind::Cube,
            position: Vec3::ZERO,
            score: 1,
            radius: 0.5,
            motion: procgen::BodyMotion::Static,
        };
        let request = SpawnRequest::from_body(&body, None);
        assert_eq!(
            request.shape,
            HitShape::Cuboid {
                half_extents: Vec3::splat(0.5)
            }
        );
    }
}
