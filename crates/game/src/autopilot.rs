//! Scripted pilot for the headless driver: turns toward the nearest collectible, closes
//! in, and activates once in range.

use std::f32::consts::{PI, TAU};

use engine_core::Pose;
use game::{ControlMode, Session};
use glam::{Vec2, Vec3};
use input::{Action, InputState, MoveDirection};

/// Boost only when the target is farther than this.
const BOOST_RANGE: f32 = 40.0;

#[derive(Debug, Default)]
pub struct Autopilot {
    /// Alternates so every activation is a fresh key-down.
    trigger_down: bool,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write this tick's input.
    pub fn steer(&mut self, session: &Session, input: &mut InputState) {
        let pose = *session.player();
        let Some(target) = nearest(session, pose.position) else {
            input.set_moving(MoveDirection::Forward, false);
            return;
        };
        let to_target = target - pose.position;
        let distance = to_target.length();
        let sensitivity = session.motion().look_sensitivity();
        if sensitivity > 0.0 {
            input.add_look_delta(look_delta_toward(&pose, to_target, sensitivity));
        }

        let reach = session.config().targeting.activation_distance;
        let grounded = session.motion().mode() == ControlMode::Grounded;
        // Grounded pilots can't climb; stop once roughly overhead.
        let close_enough = if grounded {
            Vec2::new(to_target.x, to_target.z).length() < reach * 0.5
        } else {
            distance < reach * 0.5
        };
        input.set_moving(MoveDirection::Forward, !close_enough);

        let want_boost = distance > BOOST_RANGE && session.hud().boost_ready;
        input.set_action(Action::Boost, want_boost);

        self.trigger_down = !self.trigger_down && distance < reach;
        input.set_action(Action::Activate, self.trigger_down);
    }
}

fn nearest(session: &Session, from: Vec3) -> Option<Vec3> {
    let registry = session.registry();
    registry
        .ids()
        .filter_map(|id| registry.position(id))
        .min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
}

/// Look input that turns `pose` to face `direction`.
fn look_delta_toward(pose: &Pose, direction: Vec3, sensitivity: f32) -> Vec2 {
    let yaw = Pose::yaw_facing(direction);
    let pitch = direction.y.atan2(Vec2::new(direction.x, direction.z).length());
    Vec2::new(
        -wrap_angle(yaw - pose.yaw) / sensitivity,
        -(pitch - pose.pitch) / sensitivity,
    )
}

fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}
