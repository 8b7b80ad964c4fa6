//! Common components used across the engine.

use glam::Vec3;

/// Velocity of a moving entity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    pub linear: Vec3,
}

impl Velocity {
    pub fn new(linear: Vec3) -> Self {
        Self { linear }
    }

    /// Horizontal (XZ) part of the velocity.
    pub fn horizontal(&self) -> Vec3 {
        Vec3::new(self.linear.x, 0.0, self.linear.z)
    }

    /// Scale the horizontal components by `factor`, leaving vertical speed alone.
    pub fn decay_horizontal(&mut self, factor: f32) {
        self.linear.x *= factor;
        self.linear.z *= factor;
    }
}

/// Tick-counted highlight. Active while the current tick is before `until_tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flash {
    pub until_tick: u64,
}

impl Flash {
    /// Flash lasting `ticks` ticks starting at `now`.
    pub fn starting_at(now: u64, ticks: u64) -> Self {
        Self {
            until_tick: now.saturating_add(ticks),
        }
    }

    pub fn is_active(&self, now: u64) -> bool {
        now < self.until_tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_keeps_vertical() {
        let mut v = Velocity::new(Vec3::new(1.0, 2.0, -4.0));
        v.decay_horizontal(0.5);
        assert_eq!(v.linear, Vec3::new(0.5, 2.0, -2.0));
        assert_eq!(v.horizontal(), Vec3::new(0.5, 0.0, -2.0));
    }

    #[test]
    fn flash_expires_on_deadline() {
        let flash = Flash::starting_at(10, 30);
        assert!(flash.is_active(10));
        assert!(flash.is_active(39));
        assert!(!flash.is_active(40));
    }
}
