//! Collectible registry: a hecs world plus the hit world mirroring it.
//!
//! Insert-only. Collectibles are recycled in place, never despawned, so the
//! registration order doubles as a dense serial → entity table.

use std::sync::mpsc::{self, Receiver, Sender};

use engine_core::{Flash, Pose};
use glam::Vec3;
use hecs::{Entity, World};
use physics::{Group, HitWorld};

use crate::collectible::{Collectible, CollectibleId, HitBody, Motion, SpawnRequest};

/// Cloneable, `Send` handle through which asynchronous loaders queue collectibles.
/// Requests are registered at the start of the next tick, on the tick thread.
#[derive(Debug, Clone)]
pub struct LoaderHandle {
    tx: Sender<SpawnRequest>,
}

impl LoaderHandle {
    /// Queue a collectible. Returns false if the session is gone.
    pub fn submit(&self, request: SpawnRequest) -> bool {
        self.tx.send(request).is_ok()
    }
}

/// Nearest collectible along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetHit {
    pub id: CollectibleId,
    pub serial: u64,
    /// Distance along the ray.
    pub distance: f32,
    pub point: Vec3,
}

/// Read-only copy of one collectible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectibleView {
    pub id: CollectibleId,
    pub serial: u64,
    pub position: Vec3,
    pub score: u32,
    pub category: crate::collectible::Category,
    pub motion: Motion,
    pub highlighted: bool,
    pub scale: f32,
}

/// Owns every collectible of a session.
pub struct CollectibleRegistry {
    world: World,
    hits: HitWorld,
    /// Entities in registration order; index == serial.
    order: Vec<Entity>,
    pending_tx: Sender<SpawnRequest>,
    pending_rx: Receiver<SpawnRequest>,
}

impl Default for CollectibleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectibleRegistry {
    pub fn new() -> Self {
        let (pending_tx, pending_rx) = mpsc::channel();
        Self {
            world: World::new(),
            hits: HitWorld::new(),
            order: Vec::new(),
            pending_tx,
            pending_rx,
        }
    }

    /// Handle for loaders running off the tick thread.
    pub fn loader_handle(&self) -> LoaderHandle {
        LoaderHandle {
            tx: self.pending_tx.clone(),
        }
    }

    /// Register a collectible now.
    pub fn register(&mut self, request: SpawnRequest) -> CollectibleId {
        let serial = self.order.len() as u64;
        let collider = self.hits.insert(
            request.position,
            request.shape,
            request.category.target_group(),
            u128::from(serial),
        );
        let entity = self.world.spawn((
            Collectible {
                serial,
                score: request.score,
                category: request.category,
            },
            Pose::from_position(request.position),
            request.motion,
            HitBody {
                collider,
                shape: request.shape,
            },
        ));
        self.order.push(entity);
        log::trace!(
            "Registered {:?} #{} at {:?} (score {})",
            request.category,
            serial,
            request.position,
            request.score
        );
        CollectibleId(entity)
    }

    /// Register everything queued through loader handles. Returns the new ids.
    pub fn flush_pending(&mut self) -> Vec<CollectibleId> {
        let requests: Vec<SpawnRequest> = self.pending_rx.try_iter().collect();
        if !requests.is_empty() {
            log::debug!("Registering {} queued collectibles", requests.len());
        }
        requests.into_iter().map(|r| self.register(r)).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: CollectibleId) -> bool {
        self.world.contains(id.0)
    }

    /// Ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = CollectibleId> + '_ {
        self.order.iter().map(|&e| CollectibleId(e))
    }

    /// Id of the collectible registered `serial`-th.
    pub fn id_by_serial(&self, serial: u64) -> Option<CollectibleId> {
        self.order.get(usize::try_from(serial).ok()?).map(|&e| CollectibleId(e))
    }

    pub fn position(&self, id: CollectibleId) -> Option<Vec3> {
        self.world.get::<&Pose>(id.0).ok().map(|pose| pose.position)
    }

    pub fn motion(&self, id: CollectibleId) -> Option<Motion> {
        self.world.get::<&Motion>(id.0).ok().map(|m| *m)
    }

    pub fn collectible(&self, id: CollectibleId) -> Option<Collectible> {
        self.world.get::<&Collectible>(id.0).ok().map(|c| *c)
    }

    /// Snapshot of one collectible at tick `now`.
    pub fn view(&self, id: CollectibleId, now: u64) -> Option<CollectibleView> {
        let mut query = self
            .world
            .query_one::<(&Collectible, &Pose, &Motion, &HitBody, Option<&Flash>)>(id.0)
            .ok()?;
        let (collectible, pose, motion, body, flash) = query.get()?;
        Some(CollectibleView {
            id,
            serial: collectible.serial,
            position: pose.position,
            score: collectible.score,
            category: collectible.category,
            motion: *motion,
            highlighted: flash.is_some_and(|f| f.is_active(now)),
            scale: body.render_scale(),
        })
    }

    /// Views of all collectibles in registration order.
    pub fn views(&self, now: u64) -> Vec<CollectibleView> {
        self.ids().filter_map(|id| self.view(id, now)).collect()
    }

    /// Move a collectible and its collider. Returns false for unknown ids.
    pub fn set_position(&mut self, id: CollectibleId, position: Vec3) -> bool {
        let Ok((pose, body)) = self.world.query_one_mut::<(&mut Pose, &HitBody)>(id.0) else {
            return false;
        };
        pose.position = position;
        self.hits.set_position(body.collider, position);
        true
    }

    /// Replace a collectible's motion. Returns false for unknown ids.
    pub fn set_motion(&mut self, id: CollectibleId, motion: Motion) -> bool {
        match self.world.get::<&mut Motion>(id.0) {
            Ok(mut current) => {
                *current = motion;
                true
            }
            Err(_) => false,
        }
    }

    /// Start (or restart) a collectible's hit indicator.
    pub fn flash(&mut self, id: CollectibleId, flash: Flash) -> bool {
        self.world.insert_one(id.0, flash).is_ok()
    }

    /// Nearest collectible hit by the ray; equal distances resolve to the earliest
    /// registered collectible.
    pub fn nearest_hit(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        targets: Group,
    ) -> Option<TargetHit> {
        self.hits.update_query_pipeline();
        self.hits
            .raycast_all(origin, direction, max_distance, targets)
            .into_iter()
            .filter_map(|hit| {
                let serial = u64::try_from(self.hits.user_data(hit.collider)?).ok()?;
                let id = self.id_by_serial(serial)?;
                Some(TargetHit {
                    id,
                    serial,
                    distance: hit.distance,
                    point: hit.point,
                })
            })
            .min_by(|a, b| {
                a.distance
                    .partial_cmp(&b.distance)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.serial.cmp(&b.serial))
            })
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub(crate) fn hits_mut(&mut self) -> &mut HitWorld {
        &mut self.hits
    }
}
