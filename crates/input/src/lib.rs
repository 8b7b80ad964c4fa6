//! Normalized per-tick input: movement intents, discrete actions, and look deltas.
//!
//! The window layer feeds raw device events through the adapter methods in
//! [`bindings`]; the simulation only ever reads the normalized queries below.

pub mod bindings;

pub use bindings::*;

use glam::{Vec2, Vec3};
use std::collections::HashSet;

/// Logical movement directions relative to the controlled entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Discrete, edge-triggered actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Jump,
    Boost,
    Activate,
}

/// Input state for the current tick.
#[derive(Debug, Default)]
pub struct InputState {
    /// Movement directions currently held.
    moving: HashSet<MoveDirection>,
    /// Action inputs currently held down (used for edge detection).
    actions_held: HashSet<Action>,
    /// Actions pressed since the last tick and not yet consumed.
    actions_pending: HashSet<Action>,
    /// Look movement accumulated since the last `consume_look_delta`.
    look_delta: Vec2,
    /// Cursor in normalized device coordinates ([-1, 1], +y up).
    cursor_ndc: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear a movement intent.
    pub fn set_moving(&mut self, direction: MoveDirection, held: bool) {
        if held {
            self.moving.insert(direction);
        } else {
            self.moving.remove(&direction);
        }
    }

    /// Record an action input going down or up. Only the down transition arms the action,
    /// so a held key fires once.
    pub fn set_action(&mut self, action: Action, down: bool) {
        if down {
            if self.actions_held.insert(action) {
                self.actions_pending.insert(action);
            }
        } else {
            self.actions_held.remove(&action);
        }
    }

    /// Add look movement (mouse counts).
    pub fn add_look_delta(&mut self, delta: Vec2) {
        self.look_delta += delta;
    }

    /// Set the cursor position in normalized device coordinates.
    pub fn set_cursor_ndc(&mut self, ndc: Vec2) {
        self.cursor_ndc = ndc.clamp(Vec2::splat(-1.0), Vec2::ONE);
    }

    // Query methods

    /// Check if a movement direction is held.
    pub fn is_moving(&self, direction: MoveDirection) -> bool {
        self.moving.contains(&direction)
    }

    /// Movement intent as (strafe, vertical, forward), each in [-1, 1]. Not normalized.
    pub fn movement_axes(&self) -> Vec3 {
        let axis = |pos: MoveDirection, neg: MoveDirection| {
            f32::from(u8::from(self.is_moving(pos))) - f32::from(u8::from(self.is_moving(neg)))
        };
        Vec3::new(
            axis(MoveDirection::Right, MoveDirection::Left),
            axis(MoveDirection::Up, MoveDirection::Down),
            axis(MoveDirection::Forward, MoveDirection::Backward),
        )
    }

    /// Return the accumulated look delta and reset it. Call at most once per tick.
    pub fn consume_look_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.look_delta)
    }

    /// Returns true once per press of `action`.
    pub fn consume_action(&mut self, action: Action) -> bool {
        self.actions_pending.remove(&action)
    }

    /// Check whether an action is pending without consuming it.
    pub fn is_action_pending(&self, action: Action) -> bool {
        self.actions_pending.contains(&action)
    }

    /// Get the cursor position in normalized device coordinates.
    pub fn cursor_ndc(&self) -> Vec2 {
        self.cursor_ndc
    }

    /// Drop actions nobody consumed this tick. Called by the simulation at the end of
    /// every tick so that e.g. a jump pressed mid-air does not fire on landing.
    pub fn end_tick(&mut self) {
        self.actions_pending.clear();
    }
}
