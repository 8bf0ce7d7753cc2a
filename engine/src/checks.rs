use serde::{Deserialize, Serialize};

use crate::{Ability, Combatant, Dice};

/// Hit chance never drops below this, however nimble the target.
pub const MIN_HIT_CHANCE: i64 = 10;
const HIT_PENALTY_PER_AGILITY: i64 = 2;
const BASE_CRIT_CHANCE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckResult {
    pub roll: i64,
    pub chance: u32,
    pub passed: bool,
}

/// Roll 1..=100 and pass when the roll is at or under `chance`.
pub fn percent_check(dice: &mut Dice, chance: u32) -> CheckResult {
    let roll = dice.d100();
    CheckResult {
        roll,
        chance,
        passed: roll <= i64::from(chance),
    }
}

/// `max(accuracy - target.agility*2, 10)`.
pub fn hit_chance(ability: &Ability, target: &Combatant) -> u32 {
    let raw = i64::from(ability.accuracy()) - i64::from(target.agility()) * HIT_PENALTY_PER_AGILITY;
    raw.max(MIN_HIT_CHANCE) as u32
}

/// `5 + floor(intelligence / 2)`.
pub fn crit_chance(actor: &Combatant) -> u32 {
    BASE_CRIT_CHANCE + actor.intelligence() / 2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Challenger,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Challenger => Side::Opponent,
            Side::Opponent => Side::Challenger,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Initiative {
    pub challenger_roll: i64,
    pub opponent_roll: i64,
    pub first: Side,
}

/// d20 + agility for each side, challenger drawn first. Ties go to the challenger.
pub fn initiative(dice: &mut Dice, challenger: &Combatant, opponent: &Combatant) -> Initiative {
    let challenger_roll = dice.d20() + i64::from(challenger.agility());
    let opponent_roll = dice.d20() + i64::from(opponent.agility());
    let first = if challenger_roll >= opponent_roll {
        Side::Challenger
    } else {
        Side::Opponent
    };
    Initiative {
        challenger_roll,
        opponent_roll,
        first,
    }
}
