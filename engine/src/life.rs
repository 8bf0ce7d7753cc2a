use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeState {
    Standing,
    Defeated,
}

/// Current/maximum health pair. `hp` always stays within `0..=max_hp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    hp: u32,
    max_hp: u32,
}

impl Health {
    pub fn new(max_hp: u32) -> Self {
        Self { hp: max_hp, max_hp }
    }

    /// Builds a partially depleted pool; `hp` is clamped to `max_hp`.
    pub fn with_current(hp: u32, max_hp: u32) -> Self {
        Self {
            hp: hp.min(max_hp),
            max_hp,
        }
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn state(&self) -> LifeState {
        if self.hp == 0 {
            LifeState::Defeated
        } else {
            LifeState::Standing
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    pub fn after_damage(self, amount: u32) -> Self {
        Self {
            hp: self.hp.saturating_sub(amount),
            ..self
        }
    }

    pub fn after_heal(self, amount: u32) -> Self {
        Self {
            hp: self.hp.saturating_add(amount).min(self.max_hp),
            ..self
        }
    }
}
