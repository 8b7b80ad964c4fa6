//! Session configuration (movement, economy, targeting, world layout). Loaded from
//! config.ron at startup.

use crate::collectible::Category;
use crate::error::ConfigError;
use glam::Vec3;
use procgen::{HeightRule, LayoutParams};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which movement model drives the controlled entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    /// On foot: planar movement, gravity, jumping.
    Grounded,
    /// Ship: free movement in the local basis, no gravity.
    #[default]
    Flight,
}

/// Where activation rays come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AimMode {
    /// From the controlled entity along its forward vector.
    #[default]
    Forward,
    /// From the camera through the cursor.
    Cursor,
}

/// Height rule for respawned collectibles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RespawnHeight {
    Fixed(f32),
    Random,
}

impl From<RespawnHeight> for HeightRule {
    fn from(height: RespawnHeight) -> Self {
        match height {
            RespawnHeight::Fixed(y) => HeightRule::Fixed(y),
            RespawnHeight::Random => HeightRule::Random,
        }
    }
}

/// Follow-camera rig.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Offset from the entity in its local frame (+Z is behind).
    pub offset: [f32; 3],
    /// Lerp factor per tick toward the goal pose (1.0 = rigid).
    pub follow_factor: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: [0.0, 3.0, 10.0],
            follow_factor: 0.1,
            fov_degrees: 75.0,
        }
    }
}

impl CameraConfig {
    /// First-person rig: camera sits on the entity.
    pub fn first_person() -> Self {
        Self {
            offset: [0.0; 3],
            follow_factor: 1.0,
            ..Default::default()
        }
    }

    pub fn offset(&self) -> Vec3 {
        Vec3::from_array(self.offset)
    }
}

/// Resource rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Energy debited per boost.
    pub boost_cost: u32,
    /// Permanent speed gain per collected sun.
    pub sun_speed_increment: f32,
    pub starting_energy: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            boost_cost: 10,
            sun_speed_increment: 0.1,
            starting_energy: 0,
        }
    }
}

/// Activation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    /// Collection succeeds only strictly inside this distance from the player.
    pub activation_distance: f32,
    /// Ray length.
    pub max_ray_distance: f32,
    /// Hit indicator duration in ticks.
    pub flash_ticks: u64,
    pub respawn_height: RespawnHeight,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            activation_distance: 10.0,
            max_ray_distance: 1000.0,
            flash_ticks: 30,
            respawn_height: RespawnHeight::Random,
        }
    }
}

/// On-foot movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundedConfig {
    /// Horizontal acceleration per tick, multiplied by the current speed.
    pub acceleration: f32,
    /// Per-tick horizontal velocity multiplier (0..=1).
    pub friction: f32,
    /// Downward acceleration in units/s².
    pub gravity: f32,
    /// Vertical velocity set by a jump, units/s.
    pub jump_impulse: f32,
    /// Lowest allowed height (eye level above the floor).
    pub floor_height: f32,
    /// Forward velocity added by a boost.
    pub boost_impulse: f32,
    /// Radians per mouse count.
    pub look_sensitivity: f32,
    pub camera: CameraConfig,
}

impl Default for GroundedConfig {
    fn default() -> Self {
        Self {
            acceleration: 0.2,
            friction: 0.9,
            gravity: 9.8,
            jump_impulse: 5.0,
            floor_height: 1.5,
            boost_impulse: 2.0,
            look_sensitivity: 0.002,
            camera: CameraConfig::first_person(),
        }
    }
}

/// Ship movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    /// Forward displacement of a boost.
    pub boost_distance: f32,
    /// Pitch clamp in degrees (each side).
    pub pitch_limit_degrees: f32,
    /// Radians per mouse count.
    pub look_sensitivity: f32,
    /// Keep the ship inside the world cube.
    pub confine_to_world: bool,
    pub camera: CameraConfig,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            boost_distance: 20.0,
            pitch_limit_degrees: 45.0,
            look_sensitivity: 0.002,
            confine_to_world: true,
            camera: CameraConfig::default(),
        }
    }
}

/// Initial world population.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub seed: u64,
    pub suns: usize,
    pub planets_per_sun: usize,
    pub cubes: usize,
    pub cube_score: u32,
    pub sun_score: u32,
    pub planet_score_min: u32,
    pub planet_score_max: u32,
    /// Per-axis sun drift per tick.
    pub sun_patrol_speed: f32,
    pub orbit_radius_min: f32,
    pub orbit_radius_max: f32,
    /// Radians per tick.
    pub orbit_speed_min: f32,
    pub orbit_speed_max: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            suns: 2,
            planets_per_sun: 3,
            cubes: 0,
            cube_score: 1,
            sun_score: 5,
            planet_score_min: 1,
            planet_score_max: 3,
            sun_patrol_speed: 0.05,
            orbit_radius_min: 8.0,
            orbit_radius_max: 20.0,
            orbit_speed_min: 0.005,
            orbit_speed_max: 0.02,
        }
    }
}

/// Periodic spawning of extra collectibles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Spawn one collectible every this many ticks (0 disables).
    pub every_ticks: u64,
    /// Stop once the registry holds this many collectibles.
    pub max_total: usize,
    pub category: Category,
    pub score: u32,
}

/// Complete session settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub mode: ControlMode,
    #[serde(default)]
    pub aim: AimMode,
    /// Edge length of the cubic world; everything lives in ±world_size/2.
    #[serde(default = "default_world_size")]
    pub world_size: f32,
    /// Timestep used when the driver supplies none, in seconds.
    #[serde(default = "default_fixed_dt")]
    pub fixed_dt: f32,
    /// Longest single tick, in seconds.
    #[serde(default = "default_max_dt")]
    pub max_dt: f32,
    /// Movement speed at session start.
    #[serde(default = "default_base_speed")]
    pub base_speed: f32,
    #[serde(default = "default_start_position")]
    pub start_position: [f32; 3],
    #[serde(default)]
    pub economy: EconomyConfig,
    #[serde(default)]
    pub targeting: TargetingConfig,
    #[serde(default)]
    pub grounded: GroundedConfig,
    #[serde(default)]
    pub flight: FlightConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub spawning: Option<SpawnConfig>,
}

fn default_world_size() -> f32 {
    100.0
}
fn default_fixed_dt() -> f32 {
    engine_core::DEFAULT_TIMESTEP
}
fn default_max_dt() -> f32 {
    0.25
}
fn default_base_speed() -> f32 {
    0.5
}
fn default_start_position() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: ControlMode::default(),
            aim: AimMode::default(),
            world_size: default_world_size(),
            fixed_dt: default_fixed_dt(),
            max_dt: default_max_dt(),
            base_speed: default_base_speed(),
            start_position: default_start_position(),
            economy: EconomyConfig::default(),
            targeting: TargetingConfig::default(),
            grounded: GroundedConfig::default(),
            flight: FlightConfig::default(),
            layout: LayoutConfig::default(),
            spawning: None,
        }
    }
}

impl GameConfig {
    /// Ship preset: suns and orbiting planets, forward aim, random-height respawns.
    pub fn flight() -> Self {
        Self::default()
    }

    /// On-foot preset: cubes on a floor, mouse aim, ground-level respawns.
    pub fn grounded() -> Self {
        Self {
            mode: ControlMode::Grounded,
            aim: AimMode::Cursor,
            world_size: 50.0,
            targeting: TargetingConfig {
                activation_distance: 12.0,
                respawn_height: RespawnHeight::Fixed(0.5),
                ..Default::default()
            },
            layout: LayoutConfig {
                suns: 0,
                planets_per_sun: 0,
                cubes: 20,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load and validate config from `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = ron::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }

    /// Half the world edge; collectibles stay within ±this on every axis.
    pub fn half_extent(&self) -> f32 {
        self.world_size * 0.5
    }

    pub fn start_position(&self) -> Vec3 {
        Vec3::from_array(self.start_position)
    }

    /// Camera rig for the active mode.
    pub fn camera(&self) -> &CameraConfig {
        match self.mode {
            ControlMode::Grounded => &self.grounded.camera,
            ControlMode::Flight => &self.flight.camera,
        }
    }

    /// Procgen parameters for the initial layout.
    pub fn layout_params(&self) -> LayoutParams {
        let layout = &self.layout;
        LayoutParams {
            world_size: self.world_size,
            suns: layout.suns,
            planets_per_sun: layout.planets_per_sun,
            cubes: layout.cubes,
            cube_score: layout.cube_score,
            sun_score: layout.sun_score,
            sun_patrol_speed: layout.sun_patrol_speed,
            planet_score: (layout.planet_score_min, layout.planet_score_max),
            orbit_radius: (layout.orbit_radius_min, layout.orbit_radius_max),
            orbit_speed: (layout.orbit_speed_min, layout.orbit_speed_max),
            ..Default::default()
        }
    }

    /// Reject settings the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_size.is_finite() && self.world_size > 0.0) {
            return Err(ConfigError::WorldSize(self.world_size));
        }
        for (field, value) in [("fixed_dt", self.fixed_dt), ("max_dt", self.max_dt)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Timestep { field, value });
            }
        }
        if !(self.fixed_dt..=MAX_FRAME_SECONDS).contains(&self.max_dt) {
            return Err(ConfigError::OutOfRange {
                field: "max_dt",
                value: self.max_dt,
                min: self.fixed_dt,
                max: MAX_FRAME_SECONDS,
            });
        }

        let respawn_y = match self.targeting.respawn_height {
            RespawnHeight::Fixed(y) => y,
            RespawnHeight::Random => 0.0,
        };
        let finite = |field: &'static str, values: &[f32]| {
            if values.iter().all(|v| v.is_finite()) {
                Ok(())
            } else {
                Err(ConfigError::NotFinite { field })
            }
        };
        finite("grounded.floor_height", &[self.grounded.floor_height])?;
        finite("start_position", &self.start_position)?;
        finite("targeting.respawn_height", &[respawn_y])?;
        finite("grounded.camera.offset", &self.grounded.camera.offset)?;
        finite("flight.camera.offset", &self.flight.camera.offset)?;

        let positive = [
            ("base_speed", self.base_speed),
            ("targeting.activation_distance", self.targeting.activation_distance),
            ("targeting.max_ray_distance", self.targeting.max_ray_distance),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("economy.sun_speed_increment", self.economy.sun_speed_increment),
            ("grounded.acceleration", self.grounded.acceleration),
            ("grounded.gravity", self.grounded.gravity),
            ("grounded.jump_impulse", self.grounded.jump_impulse),
            ("grounded.boost_impulse", self.grounded.boost_impulse),
            ("grounded.look_sensitivity", self.grounded.look_sensitivity),
            ("flight.boost_distance", self.flight.boost_distance),
            ("flight.look_sensitivity", self.flight.look_sensitivity),
            ("layout.sun_patrol_speed", self.layout.sun_patrol_speed),
            ("layout.orbit_radius_min", self.layout.orbit_radius_min),
            ("layout.orbit_speed_min", self.layout.orbit_speed_min),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }

        let ranged = [
            ("grounded.friction", self.grounded.friction, 0.0, 1.0),
            ("flight.pitch_limit_degrees", self.flight.pitch_limit_degrees, 0.0, 89.0),
            ("grounded.camera.follow_factor", self.grounded.camera.follow_factor, 0.001, 1.0),
            ("flight.camera.follow_factor", self.flight.camera.follow_factor, 0.001, 1.0),
            ("grounded.camera.fov_degrees", self.grounded.camera.fov_degrees, 1.0, 179.0),
            ("flight.camera.fov_degrees", self.flight.camera.fov_degrees, 1.0, 179.0),
        ];
        for (field, value, min, max) in ranged {
            if !(min..=max).contains(&value) {
                return Err(ConfigError::OutOfRange { field, value, min, max });
            }
        }

        if self.layout.planet_score_min > self.layout.planet_score_max {
            return Err(ConfigError::ScoreRange {
                min: self.layout.planet_score_min,
                max: self.layout.planet_score_max,
            });
        }
        for (field, min, max) in [
            ("layout.orbit_radius_max", self.layout.orbit_radius_min, self.layout.orbit_radius_max),
            ("layout.orbit_speed_max", self.layout.orbit_speed_min, self.layout.orbit_speed_max),
        ] {
            if !(max >= min && max.is_finite()) {
                return Err(ConfigError::OutOfRange { field, value: max, min, max: f32::INFINITY });
            }
        }
        Ok(())
    }
}

/// Longest frame a session will integrate in one tick.
const MAX_FRAME_SECONDS: f32 = 1.0;

fn config_path() -> std::path::PathBuf {
    std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from(".")).join("config.ron")
}
