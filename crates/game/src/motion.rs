//! Motion controller for the controlled entity: grounded walking or free flight.

use engine_core::{Pose, Velocity};
use glam::{Vec2, Vec3};
use input::{Action, InputState};

use crate::config::{ControlMode, FlightConfig, GameConfig, GroundedConfig};
use crate::economy::Economy;

/// Pitch limit for grounded mode, just short of straight up/down.
const GROUNDED_PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// What happened during one motion update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionOutcome {
    pub jumped: bool,
    pub boosted: bool,
    /// Boost was requested but energy was short.
    pub boost_denied: bool,
}

/// Drives the controlled entity's pose from input.
#[derive(Debug, Clone)]
pub struct MotionController {
    mode: ControlMode,
    pose: Pose,
    velocity: Velocity,
    grounded: bool,
    /// Cumulative look input for flight mode; pitch part kept inside the limit.
    look_total: Vec2,
    grounded_config: GroundedConfig,
    flight_config: FlightConfig,
    half_extent: f32,
}

impl MotionController {
    pub fn new(config: &GameConfig) -> Self {
        let mut position = config.start_position();
        if config.mode == ControlMode::Grounded {
            position.y = position.y.max(config.grounded.floor_height);
        }
        Self {
            mode: config.mode,
            pose: Pose::from_position(position),
            velocity: Velocity::default(),
            grounded: config.mode == ControlMode::Grounded
                && position.y <= config.grounded.floor_height,
            look_total: Vec2::ZERO,
            grounded_config: config.grounded.clone(),
            flight_config: config.flight.clone(),
            half_extent: config.half_extent(),
        }
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Teleport and reorient. Resets velocity and, in flight, the stored look input.
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
        self.velocity = Velocity::default();
        self.grounded = false;
        let sensitivity = self.flight_config.look_sensitivity;
        if sensitivity > 0.0 {
            self.look_total = Vec2::new(-pose.yaw, -pose.pitch) / sensitivity;
        }
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity.linear
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Radians of yaw/pitch per unit of look input in the current mode.
    pub fn look_sensitivity(&self) -> f32 {
        match self.mode {
            ControlMode::Grounded => self.grounded_config.look_sensitivity,
            ControlMode::Flight => self.flight_config.look_sensitivity,
        }
    }

    /// Advance one tick. Consumes the look delta and the Jump/Boost actions it uses.
    pub fn update(&mut self, input: &mut InputState, economy: &mut Economy, dt: f32) -> MotionOutcome {
        match self.mode {
            ControlMode::Grounded => self.update_grounded(input, economy, dt),
            ControlMode::Flight => self.update_flight(input, economy),
        }
    }

    fn update_grounded(&mut self, input: &mut InputState, economy: &mut Economy, dt: f32) -> MotionOutcome {
        let config = &self.grounded_config;
        let mut outcome = MotionOutcome::default();

        let look = input.consume_look_delta();
        self.pose.yaw -= look.x * config.look_sensitivity;
        self.pose.pitch = (self.pose.pitch - look.y * config.look_sensitivity)
            .clamp(-GROUNDED_PITCH_LIMIT, GROUNDED_PITCH_LIMIT);

        let axes = input.movement_axes();
        let wish = self.pose.right_flat() * axes.x + self.pose.forward_flat() * axes.z;
        if wish.length_squared() > 0.0 {
            self.velocity.linear += wish.normalize() * config.acceleration * economy.speed();
        }

        if input.consume_action(Action::Boost) {
            if economy.try_boost() {
                self.velocity.linear += self.pose.forward_flat() * config.boost_impulse;
                outcome.boosted = true;
            } else {
                outcome.boost_denied = true;
            }
        }

        self.pose.translate(self.velocity.horizontal());
        self.velocity.decay_horizontal(config.friction);

        if self.grounded && input.consume_action(Action::Jump) {
            self.velocity.linear.y = config.jump_impulse;
            self.grounded = false;
            outcome.jumped = true;
        }

        self.velocity.linear.y -= config.gravity * dt;
        self.pose.position.y += self.velocity.linear.y * dt;

        if self.pose.position.y < config.floor_height {
            self.pose.position.y = config.floor_height;
            self.velocity.linear.y = 0.0;
            self.grounded = true;
        }

        outcome
    }

    fn update_flight(&mut self, input: &mut InputState, economy: &mut Economy) -> MotionOutcome {
        let config = &self.flight_config;
        let mut outcome = MotionOutcome::default();

        self.look_total += input.consume_look_delta();
        let pitch_limit = config.pitch_limit_degrees.to_radians();
        if config.look_sensitivity > 0.0 {
            let max_total = pitch_limit / config.look_sensitivity;
            self.look_total.y = self.look_total.y.clamp(-max_total, max_total);
        }
        self.pose.yaw = -self.look_total.x * config.look_sensitivity;
        self.pose.pitch = (-self.look_total.y * config.look_sensitivity).clamp(-pitch_limit, pitch_limit);

        let axes = input.movement_axes();
        let direction = self.pose.forward() * axes.z + self.pose.right() * axes.x + self.pose.up() * axes.y;
        if direction.length_squared() > 0.0 {
            self.pose.translate(direction.normalize() * economy.speed());
        }

        if input.consume_action(Action::Boost) {
            if economy.try_boost() {
                self.pose.translate(self.pose.forward() * config.boost_distance);
                outcome.boosted = true;
            } else {
                outcome.boost_denied = true;
            }
        }

        if config.confine_to_world {
            let half = Vec3::splat(self.half_extent);
            self.pose.position = self.pose.position.clamp(-half, half);
        }

        outcome
    }
}
