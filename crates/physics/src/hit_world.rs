//! Query-only Rapier world holding one collider per collectible.

use crate::collision::TargetGroup;
use glam::Vec3;
use rapier3d::prelude::*;

/// Hit region of a collectible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitShape {
    Ball { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

impl HitShape {
    fn builder(&self) -> ColliderBuilder {
        match *self {
            HitShape::Ball { radius } => ColliderBuilder::ball(radius),
            HitShape::Cuboid { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
        }
    }
}

/// Collider storage plus the query pipeline used for ray casts.
pub struct HitWorld {
    /// Always empty; Rapier queries take a body set alongside the colliders.
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub query_pipeline: QueryPipeline,
    /// Colliders were inserted or moved since the last pipeline update.
    dirty: bool,
}

impl Default for HitWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl HitWorld {
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
            dirty: false,
        }
    }

    /// Add a fixed collider at `position`. `user_data` is returned on hits.
    pub fn insert(
        &mut self,
        position: Vec3,
        shape: HitShape,
        group: TargetGroup,
        user_data: u128,
    ) -> ColliderHandle {
        let collider = shape
            .builder()
            .translation(vector![position.x, position.y, position.z])
            .collision_groups(group.collider_groups())
            .user_data(user_data)
            .build();
        self.dirty = true;
        self.collider_set.insert(collider)
    }

    /// Move a collider. Unknown handles are ignored.
    pub fn set_position(&mut self, handle: ColliderHandle, position: Vec3) {
        if let Some(collider) = self.collider_set.get_mut(handle) {
            collider.set_translation(vector![position.x, position.y, position.z]);
            self.dirty = true;
        }
    }

    /// User data attached at insertion.
    pub fn user_data(&self, handle: ColliderHandle) -> Option<u128> {
        self.collider_set.get(handle).map(|collider| collider.user_data)
    }

    /// Rebuild the query pipeline if anything changed. Must run before ray casts.
    pub fn update_query_pipeline(&mut self) {
        if self.dirty {
            self.query_pipeline.update(&self.collider_set);
            self.dirty = false;
            log::trace!("Query pipeline rebuilt for {} colliders", self.collider_set.len());
        }
    }

    pub fn len(&self) -> usize {
        self.collider_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collider_set.is_empty()
    }
}
