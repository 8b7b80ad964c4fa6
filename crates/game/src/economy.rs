//! Energy and speed, the two quantities collection feeds.

use crate::config::{EconomyConfig, GameConfig};

/// Energy is spent on boosts and earned by collecting; speed only ever grows.
///
/// Energy is 64-bit while a single score is 32-bit.
#[derive(Debug, Clone, PartialEq)]
pub struct Economy {
    energy: u64,
    speed: f32,
    boost_cost: u32,
    sun_speed_increment: f32,
}

impl Economy {
    pub fn new(config: &EconomyConfig, base_speed: f32) -> Self {
        Self {
            energy: u64::from(config.starting_energy),
            speed: base_speed,
            boost_cost: config.boost_cost,
            sun_speed_increment: config.sun_speed_increment,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(&config.economy, config.base_speed)
    }

    pub fn energy(&self) -> u64 {
        self.energy
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn boost_cost(&self) -> u32 {
        self.boost_cost
    }

    /// Whether a boost would currently be affordable.
    pub fn boost_ready(&self) -> bool {
        self.energy >= u64::from(self.boost_cost)
    }

    /// Credit a collected score.
    pub fn collect(&mut self, score: u32) {
        self.energy = self.energy.saturating_add(u64::from(score));
    }

    /// Debit `amount` if affordable. Never leaves energy partially spent.
    pub fn try_spend(&mut self, amount: u32) -> bool {
        match self.energy.checked_sub(u64::from(amount)) {
            Some(rest) => {
                self.energy = rest;
                true
            }
            None => false,
        }
    }

    /// Pay for one boost.
    pub fn try_boost(&mut self) -> bool {
        self.try_spend(self.boost_cost)
    }

    /// Permanent speed gain from a top-tier collection.
    pub fn raise_speed(&mut self) {
        self.speed += self.sun_speed_increment;
    }
}
