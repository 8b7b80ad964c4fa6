//! HUD data: energy, speed, and whether a boost is affordable.
//! Published as a change notification and rendered as a console line by the headless driver.

use std::fmt;

use crate::economy::Economy;

/// Everything the HUD shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudState {
    pub energy: u64,
    pub speed: f32,
    pub boost_ready: bool,
}

impl HudState {
    pub fn from_economy(economy: &Economy) -> Self {
        Self {
            energy: economy.energy(),
            speed: economy.speed(),
            boost_ready: economy.boost_ready(),
        }
    }

    /// Console rendering with a charge bar toward the next boost.
    pub fn render_console(&self, boost_cost: u32) -> String {
        let charge = if boost_cost == 0 {
            1.0
        } else {
            (self.energy as f32 / boost_cost as f32).min(1.0)
        };
        let boost = if self.boost_ready { "[READY]" } else { "[-----]" };
        format!(
            "ENERGY {:>5} {}  │  SPEED {:>5.2}  │  BOOST {}",
            self.energy,
            charge_bar(charge, 10),
            self.speed,
            boost
        )
    }
}

impl fmt::Display for HudState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "energy {} | speed {:.2} | boost {}",
            self.energy,
            self.speed,
            if self.boost_ready { "ready" } else { "locked" }
        )
    }
}

fn charge_bar(percent: f32, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 1.0) * width as f32) as usize).min(width);
    format!("{}{}", "▓".repeat(filled), "░".repeat(width - filled))
}

/// Emits a HUD state only when it differs from the last one emitted.
#[derive(Debug, Default)]
pub struct HudPublisher {
    last: Option<HudState>,
}

impl HudPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Some(state)` if `state` changed since the previous publish.
    pub fn publish(&mut self, state: HudState) -> Option<HudState> {
        if self.last == Some(state) {
            return None;
        }
        self.last = Some(state);
        Some(state)
    }
}
