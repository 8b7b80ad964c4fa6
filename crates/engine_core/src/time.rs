//! Tick timing for the frame-driven game loop.

/// Default fixed timestep (60 Hz), used when the driver supplies no dt.
pub const DEFAULT_TIMESTEP: f32 = 1.0 / 60.0;

/// Counts simulated ticks and turns driver-supplied frame times into a usable dt.
#[derive(Debug, Clone)]
pub struct TickClock {
    /// Fixed timestep in seconds, substituted for missing or bad frame times.
    fixed_timestep: f32,
    /// Upper bound for a single tick's dt.
    max_timestep: f32,
    /// Duration of the last tick.
    delta: f32,
    /// Total simulated time since start, in seconds.
    elapsed: f64,
    /// Ticks run since start.
    tick: u64,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIMESTEP, 0.25)
    }
}

impl TickClock {
    /// Create a clock. Callers validate that `fixed_timestep > 0` and
    /// `max_timestep >= fixed_timestep` beforehand.
    pub fn new(fixed_timestep: f32, max_timestep: f32) -> Self {
        Self {
            fixed_timestep,
            max_timestep,
            delta: 0.0,
            elapsed: 0.0,
            tick: 0,
        }
    }

    /// Clamp a driver frame time into `(0, max_timestep]`.
    ///
    /// `None` means the driver runs at the fixed rate. Non-finite or non-positive values
    /// are replaced with the fixed timestep.
    pub fn sanitize(&self, dt: Option<f32>) -> f32 {
        match dt {
            None => self.fixed_timestep,
            Some(dt) if !dt.is_finite() || dt <= 0.0 => {
                log::warn!("Rejected frame time {dt}, using fixed timestep {}", self.fixed_timestep);
                self.fixed_timestep
            }
            Some(dt) => dt.min(self.max_timestep),
        }
    }

    /// Start a new tick and return the dt to integrate with.
    pub fn advance(&mut self, dt: Option<f32>) -> f32 {
        let dt = self.sanitize(dt);
        self.delta = dt;
        self.elapsed += f64::from(dt);
        self.tick += 1;
        dt
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta
    }

    /// Get total simulated time in seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }

    /// Index of the current tick (0 before the first `advance`).
    pub fn tick(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dt_uses_fixed_step() {
        let clock = TickClock::default();
        assert_eq!(clock.sanitize(None), DEFAULT_TIMESTEP);
    }

    #[test]
    fn bad_dt_is_replaced() {
        let clock = TickClock::default();
        assert_eq!(clock.sanitize(Some(0.0)), DEFAULT_TIMESTEP);
        assert_eq!(clock.sanitize(Some(-1.0)), DEFAULT_TIMESTEP);
        assert_eq!(clock.sanitize(Some(f32::NAN)), DEFAULT_TIMESTEP);
        assert_eq!(clock.sanitize(Some(f32::INFINITY)), DEFAULT_TIMESTEP);
    }

    #[test]
    fn long_frames_are_clamped() {
        let clock = TickClock::new(DEFAULT_TIMESTEP, 0.1);
        assert_eq!(clock.sanitize(Some(2.0)), 0.1);
        assert_eq!(clock.sanitize(Some(0.05)), 0.05);
    }

    #[test]
    fn advance_counts_ticks() {
        let mut clock = TickClock::default();
        assert_eq!(clock.tick(), 0);
        clock.advance(None);
        clock.advance(Some(0.02));
        assert_eq!(clock.tick(), 2);
        assert_eq!(clock.delta_seconds(), 0.02);
        assert!((clock.elapsed_seconds() - f64::from(DEFAULT_TIMESTEP + 0.02)).abs() < 1e-4);
    }

    #[test]
    fn huge_steps_accumulate_without_overflow() {
        let mut clock = TickClock::new(1e30, 1e30);
        clock.advance(None);
        clock.advance(Some(f32::MAX));
        assert_eq!(clock.tick(), 2);
        assert!(clock.elapsed_seconds() > 1e30);
    }
}
