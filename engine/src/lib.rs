pub mod ability;
pub mod api;
pub mod battle;
pub mod checks;
pub mod combat;
pub mod combatant;
pub mod content;
pub mod error;
pub mod life;
pub mod log;

pub use ability::{Ability, EffectClass};
pub use battle::{experience_gain, simulate, Battle, Phase, MAX_ROUNDS};
pub use checks::{
    crit_chance, hit_chance, initiative, percent_check, CheckResult, Initiative, Side,
};
pub use combat::actions::{magnitude, resolve_turn, TurnOutcome};
pub use combatant::{max_health, Attributes, Combatant};
pub use error::{BattleError, SnapshotError};
pub use life::{Health, LifeState};
pub use log::LogEntry;

/// Pure draw: maps `counter` through `fract(sin(counter) * 10000)` and rescales
/// into `min..=max`. Same inputs, same output.
pub fn draw_in_range(min: i64, max: i64, counter: u64) -> i64 {
    if max <= min {
        return min;
    }
    let x = (counter as f64).sin() * 10000.0;
    let fract = x - x.floor();
    let span = (max - min + 1) as f64;
    // fract is in [0, 1) but guard against rounding pushing us onto the span.
    let offset = ((fract * span).floor() as i64).min(max - min);
    min + offset
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DiceSource {
    Sine { counter: u64 },
    Scripted { rolls: Vec<i64>, next: usize },
}

/// Cursor over the draw source. Every draw consumes one counter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dice {
    source: DiceSource,
    consumed: u64,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: DiceSource::Sine { counter: seed },
            consumed: 0,
        }
    }

    /// Replays `rolls` in order, ignoring the requested range. Once the script
    /// runs out every draw returns `min`.
    pub fn from_scripted(rolls: Vec<i64>) -> Self {
        Self {
            source: DiceSource::Scripted { rolls, next: 0 },
            consumed: 0,
        }
    }

    pub fn draw(&mut self, min: i64, max: i64) -> i64 {
        self.consumed += 1;
        match &mut self.source {
            DiceSource::Sine { counter } => {
                let value = draw_in_range(min, max, *counter);
                *counter = counter.wrapping_add(1);
                value
            }
            DiceSource::Scripted { rolls, next } => {
                let value = rolls.get(*next).copied().unwrap_or(min);
                *next += 1;
                value
            }
        }
    }

    pub fn d20(&mut self) -> i64 {
        self.draw(1, 20)
    }

    pub fn d100(&mut self) -> i64 {
        self.draw(1, 100)
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }
}
