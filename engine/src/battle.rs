use serde::Serialize;
use tracing::{debug, info};

use crate::checks::{initiative, Side};
use crate::combat::actions::resolve_turn;
use crate::error::BattleError;
use crate::log::LogEntry;
use crate::{Combatant, Dice};

pub const MAX_ROUNDS: u32 = 30;

const BASE_XP: i64 = 10;
const XP_PER_LOSER_LEVEL: i64 = 5;
const MIN_XP: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    InProgress,
    Finished,
}

/// A battle between a challenger and an opponent.
///
/// Values only move forward through [`Battle::step`], which consumes the
/// current state and returns the next one. Once finished, stepping is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Battle {
    id: String,
    seed: u64,
    #[serde(rename = "rounds")]
    round: u32,
    challenger: Combatant,
    opponent: Combatant,
    log: Vec<LogEntry>,
    finished: bool,
    winner_id: Option<String>,
    experience_gain: u32,
    #[serde(skip)]
    dice: Dice,
}

impl Battle {
    /// Both combatants start rested: full health, no cooldowns.
    pub fn new(
        id: impl Into<String>,
        seed: u64,
        challenger: Combatant,
        opponent: Combatant,
    ) -> Result<Self, BattleError> {
        Self::with_dice(id, seed, challenger, opponent, Dice::from_seed(seed))
    }

    /// Like [`Battle::new`] but with a caller-supplied draw source.
    pub fn with_dice(
        id: impl Into<String>,
        seed: u64,
        challenger: Combatant,
        opponent: Combatant,
        dice: Dice,
    ) -> Result<Self, BattleError> {
        if challenger.id() == opponent.id() {
            return Err(BattleError::SelfBattle(challenger.id().to_string()));
        }
        Ok(Self {
            id: id.into(),
            seed,
            round: 0,
            challenger: challenger.rested(),
            opponent: opponent.rested(),
            log: Vec::new(),
            finished: false,
            winner_id: None,
            experience_gain: 0,
            dice,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rounds executed so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn challenger(&self) -> &Combatant {
        &self.challenger
    }

    pub fn opponent(&self) -> &Combatant {
        &self.opponent
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn winner_id(&self) -> Option<&str> {
        self.winner_id.as_deref()
    }

    pub fn experience_gain(&self) -> u32 {
        self.experience_gain
    }

    pub fn is_draw(&self) -> bool {
        self.finished && self.winner_id.is_none()
    }

    pub fn phase(&self) -> Phase {
        if self.finished {
            Phase::Finished
        } else if self.round == 0 {
            Phase::NotStarted
        } else {
            Phase::InProgress
        }
    }

    /// Play one full round.
    pub fn step(self) -> Battle {
        if self.finished {
            return self;
        }

        let Battle {
            id,
            seed,
            round,
            challenger,
            opponent,
            mut log,
            mut dice,
            ..
        } = self;
        let round = round + 1;

        let init = initiative(&mut dice, &challenger, &opponent);
        debug!(
            battle = %id,
            round,
            challenger_roll = init.challenger_roll,
            opponent_roll = init.opponent_roll,
            first = ?init.first,
            "initiative"
        );

        let mut fighters = Fighters {
            challenger,
            opponent,
            spent: [None, None],
        };

        let first = init.first;
        fighters.act(first, round, 1, &mut dice, &mut log);

        let someone_down = fighters.challenger.is_defeated() || fighters.opponent.is_defeated();
        if !someone_down {
            fighters.act(first.other(), round, 2, &mut dice, &mut log);
        }

        let Fighters {
            challenger,
            opponent,
            spent,
        } = fighters;
        let [challenger_spent, opponent_spent] = spent;

        let next = Battle {
            id,
            seed,
            round,
            challenger,
            opponent,
            log,
            finished: false,
            winner_id: None,
            experience_gain: 0,
            dice,
        };

        if next.challenger.is_defeated() || next.opponent.is_defeated() {
            return next.conclude();
        }

        let next = Battle {
            challenger: next.challenger.tick_cooldowns(challenger_spent.as_deref()),
            opponent: next.opponent.tick_cooldowns(opponent_spent.as_deref()),
            ..next
        };
        debug!(battle = %next.id, round, "cooldowns ticked");

        if next.round >= MAX_ROUNDS {
            next.conclude()
        } else {
            next
        }
    }

    /// Step until finished.
    pub fn run(self) -> Battle {
        let mut battle = self;
        while !battle.finished {
            battle = battle.step();
        }
        battle
    }

    fn conclude(self) -> Battle {
        let (winner_id, experience_gain) =
            match (self.challenger.is_defeated(), self.opponent.is_defeated()) {
                (false, true) => (
                    Some(self.challenger.id().to_string()),
                    experience_gain(&self.challenger, &self.opponent),
                ),
                (true, false) => (
                    Some(self.opponent.id().to_string()),
                    experience_gain(&self.opponent, &self.challenger),
                ),
                _ => (None, 0),
            };

        info!(
            battle = %self.id,
            seed = self.seed,
            rounds = self.round,
            winner = winner_id.as_deref().unwrap_or("draw"),
            experience = experience_gain,
            "battle finished"
        );

        Battle {
            finished: true,
            winner_id,
            experience_gain,
            ..self
        }
    }
}

/// Working pair for one round; tracks which ability each side spent.
struct Fighters {
    challenger: Combatant,
    opponent: Combatant,
    spent: [Option<String>; 2],
}

impl Fighters {
    fn act(&mut self, side: Side, round: u32, turn: u8, dice: &mut Dice, log: &mut Vec<LogEntry>) {
        let (actor, defender) = match side {
            Side::Challenger => (&self.challenger, &self.opponent),
            Side::Opponent => (&self.opponent, &self.challenger),
        };
        let outcome = resolve_turn(round, turn, actor, defender, dice);
        let spent = outcome.used_ability().map(str::to_string);
        match side {
            Side::Challenger => {
                self.spent[0] = spent;
                self.challenger = outcome.actor;
                self.opponent = outcome.defender;
            }
            Side::Opponent => {
                self.spent[1] = spent;
                self.opponent = outcome.actor;
                self.challenger = outcome.defender;
            }
        }
        log.push(outcome.entry);
    }
}

/// Reward for `winner` after defeating `loser`:
/// `max(5, floor((10 + loser.level*5) * (1 + (loser.level - winner.level)*0.1)))`.
pub fn experience_gain(winner: &Combatant, loser: &Combatant) -> u32 {
    let loser_level = i64::from(loser.level());
    let winner_level = i64::from(winner.level());
    let base = BASE_XP + loser_level * XP_PER_LOSER_LEVEL;
    // multiplier in tenths: 10 + (loser - winner)
    let multiplier_tenths = 10 + (loser_level - winner_level);
    let gain = base.saturating_mul(multiplier_tenths).div_euclid(10);
    gain.clamp(i64::from(MIN_XP), i64::from(u32::MAX)) as u32
}

/// Run a whole battle from `seed`.
pub fn simulate(
    id: impl Into<String>,
    seed: u64,
    challenger: Combatant,
    opponent: Combatant,
) -> Result<Battle, BattleError> {
    Ok(Battle::new(id, seed, challenger, opponent)?.run())
}
