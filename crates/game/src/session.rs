//! Session context: owns every piece of simulation state and runs the per-tick pipeline.

use std::collections::{HashMap, HashSet};

use engine_core::{Pose, TickClock};
use input::{Action, InputState};
use procgen::{random_point, BodyMotion, WorldLayout};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::{CameraUniform, FollowCamera};
use crate::collectible::{CollectibleId, SpawnRequest};
use crate::config::GameConfig;
use crate::economy::Economy;
use crate::error::ConfigError;
use crate::hud::{HudPublisher, HudState};
use crate::kinematics::{self, KinematicsStats};
use crate::motion::MotionController;
use crate::registry::{CollectibleRegistry, LoaderHandle};
use crate::snapshot::RenderSnapshot;
use crate::targeting::{Activation, TargetingSystem};

/// Something that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    Jumped,
    Boosted,
    BoostDenied,
    Activated(Activation),
    Spawned(CollectibleId),
}

/// Summary of one tick.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick: u64,
    /// Sanitized timestep used for this tick.
    pub dt: f32,
    pub events: Vec<SessionEvent>,
    /// New HUD state, if it changed this tick.
    pub hud_changed: Option<HudState>,
    /// Collectibles registered from the loader queue.
    pub loaded: usize,
    pub kinematics: KinematicsStats,
}

impl TickReport {
    pub fn activation(&self) -> Option<Activation> {
        self.events.iter().find_map(|event| match event {
            SessionEvent::Activated(activation) => Some(*activation),
            _ => None,
        })
    }
}

/// One running game.
pub struct Session {
    config: GameConfig,
    clock: TickClock,
    registry: CollectibleRegistry,
    economy: Economy,
    motion: MotionController,
    camera: FollowCamera,
    targeting: TargetingSystem,
    hud: HudPublisher,
    rng: StdRng,
}

impl Session {
    /// Validate `config` and build an empty session.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let motion = MotionController::new(&config);
        let camera = FollowCamera::new(config.camera(), motion.pose());
        log::info!(
            "Session started: {:?} mode, {:?} aim, world size {}",
            config.mode,
            config.aim,
            config.world_size
        );
        Ok(Self {
            clock: TickClock::new(config.fixed_dt, config.max_dt),
            registry: CollectibleRegistry::new(),
            economy: Economy::from_config(&config),
            targeting: TargetingSystem::new(&config),
            hud: HudPublisher::new(),
            rng: StdRng::seed_from_u64(config.layout.seed.wrapping_add(1)),
            motion,
            camera,
            config,
        })
    }

    /// Generate the configured layout.
    pub fn layout(&self) -> WorldLayout {
        WorldLayout::generate(self.config.layout.seed, &self.config.layout_params())
    }

    /// Register every body of `layout` now.
    pub fn populate(&mut self, layout: &WorldLayout) -> Vec<CollectibleId> {
        let centers = self.register_centers(layout);
        let mut ids: Vec<CollectibleId> = centers.values().copied().collect();
        for request in dependent_requests(layout, &centers) {
            ids.push(self.register_collectible(request));
        }
        log::info!("Populated {} collectibles", ids.len());
        ids
    }

    /// Register the bodies others orbit. Returns their ids keyed by layout index.
    pub fn register_centers(&mut self, layout: &WorldLayout) -> HashMap<usize, CollectibleId> {
        let wanted = center_indices(layout);
        layout
            .bodies
            .iter()
            .enumerate()
            .filter(|(index, _)| wanted.contains(index))
            .map(|(index, body)| (index, self.register_collectible(SpawnRequest::from_body(body, None))))
            .collect()
    }

    /// Register a collectible immediately. Call between ticks.
    pub fn register_collectible(&mut self, request: SpawnRequest) -> CollectibleId {
        self.registry.register(request)
    }

    /// Handle for registering collectibles from other threads.
    pub fn loader_handle(&self) -> LoaderHandle {
        self.registry.loader_handle()
    }

    /// Run one tick. `dt` is the driver's frame time; `None` runs at the fixed rate.
    pub fn tick(&mut self, input: &mut InputState, dt: Option<f32>) -> TickReport {
        let dt = self.clock.advance(dt);
        let now = self.clock.tick();
        let mut events = Vec::new();

        let loaded = self.registry.flush_pending().len();
        if let Some(id) = self.spawn_periodic(now) {
            events.push(SessionEvent::Spawned(id));
        }

        let outcome = self.motion.update(input, &mut self.economy, dt);
        if outcome.jumped {
            events.push(SessionEvent::Jumped);
        }
        if outcome.boosted {
            events.push(SessionEvent::Boosted);
        }
        if outcome.boost_denied {
            events.push(SessionEvent::BoostDenied);
        }

        let kinematics = kinematics::update_collectibles(&mut self.registry, self.config.half_extent(), now);
        self.camera.follow(self.motion.pose());

        if input.consume_action(Action::Activate) {
            let pose = *self.motion.pose();
            let ray = self.targeting.aim_ray(&pose, &self.camera, input.cursor_ndc());
            let activation = self.targeting.activate(
                &mut self.registry,
                &mut self.economy,
                &pose,
                ray,
                &mut self.rng,
                now,
            );
            events.push(SessionEvent::Activated(activation));
        }

        input.end_tick();

        TickReport {
            tick: now,
            dt,
            events,
            hud_changed: self.hud.publish(HudState::from_economy(&self.economy)),
            loaded,
            kinematics,
        }
    }

    fn spawn_periodic(&mut self, now: u64) -> Option<CollectibleId> {
        let spawning = self.config.spawning.as_ref()?;
        if spawning.every_ticks == 0
            || now % spawning.every_ticks != 0
            || self.registry.len() >= spawning.max_total
        {
            return None;
        }
        let position = random_point(
            &mut self.rng,
            self.config.half_extent(),
            self.config.targeting.respawn_height.into(),
        );
        let request = SpawnRequest::new(position, spawning.score, spawning.category);
        let id = self.registry.register(request);
        log::debug!("Spawned {:?} at {:?}", spawning.category, position);
        Some(id)
    }

    pub fn hud(&self) -> HudState {
        HudState::from_economy(&self.economy)
    }

    /// Frame state for the renderer.
    pub fn snapshot(&self) -> RenderSnapshot {
        let now = self.clock.tick();
        RenderSnapshot {
            tick: now,
            player: *self.motion.pose(),
            camera: self.camera.pose(),
            camera_uniform: CameraUniform::from(&self.camera),
            collectibles: self.registry.views(now),
        }
    }

    pub fn player(&self) -> &Pose {
        self.motion.pose()
    }

    /// Move the controlled entity, e.g. to a checkpoint.
    pub fn teleport(&mut self, pose: Pose) {
        self.motion.set_pose(pose);
        self.camera.snap_to(&pose);
    }

    pub fn motion(&self) -> &MotionController {
        &self.motion
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn registry(&self) -> &CollectibleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    /// Update the camera aspect ratio (call on window resize).
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(width, height);
    }
}

/// Layout indices referenced as orbit centers.
fn center_indices(layout: &WorldLayout) -> HashSet<usize> {
    layout
        .bodies
        .iter()
        .filter_map(|body| match body.motion {
            BodyMotion::Orbit { center, .. } => Some(center),
            _ => None,
        })
        .collect()
}

/// Requests for every body of `layout` that is not in `centers`, with orbit centers
/// resolved through `centers`.
pub fn dependent_requests(
    layout: &WorldLayout,
    centers: &HashMap<usize, CollectibleId>,
) -> Vec<SpawnRequest> {
    layout
        .bodies
        .iter()
        .enumerate()
        .filter(|(index, _)| !centers.contains_key(index))
        .map(|(_, body)| {
            let center = match body.motion {
                BodyMotion::Orbit { center, .. } => centers.get(&center).copied(),
                _ => None,
            };
            SpawnRequest::from_body(body, center)
        })
        .collect()
}
