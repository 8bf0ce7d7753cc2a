use tracing::debug;

use crate::checks::{crit_chance, hit_chance, percent_check};
use crate::log::{self, LogEntry};
use crate::{Ability, Combatant, Dice, EffectClass};

const VARIANCE_MIN: i64 = 80;
const VARIANCE_MAX: i64 = 120;
const DAMAGE_REDUCTION_PER_CONSTITUTION: i64 = 3;
const MIN_MAGNITUDE: u32 = 1;

/// Both participants after one turn, plus the entry describing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub actor: Combatant,
    /// The participant who did not act.
    pub defender: Combatant,
    pub entry: LogEntry,
}

impl TurnOutcome {
    /// Id of the ability spent this turn, `None` on a pass.
    pub fn used_ability(&self) -> Option<&str> {
        (!self.entry.is_pass()).then_some(self.entry.ability_id.as_str())
    }
}

/// Resolve `actor`'s turn against `defender`.
///
/// Draw order: ability pick, hit, crit, variance. A pass draws nothing; a miss
/// stops after the hit roll; classes without a magnitude skip the variance roll.
pub fn resolve_turn(
    round: u32,
    turn: u8,
    actor: &Combatant,
    defender: &Combatant,
    dice: &mut Dice,
) -> TurnOutcome {
    let available = actor.available_abilities();
    if available.is_empty() {
        debug!(round, turn, actor = actor.id(), "no ability ready, passing");
        let entry = entry(round, turn, actor, defender, None, EntryFacts::pass(actor, defender));
        return TurnOutcome {
            actor: actor.clone(),
            defender: defender.clone(),
            entry,
        };
    }

    let last = available.len() - 1;
    let pick = dice.draw(0, last as i64).clamp(0, last as i64) as usize;
    let ability = available[pick].clone();
    let actor_after = actor.use_ability(ability.id());

    let hit = percent_check(dice, hit_chance(&ability, defender));
    if !hit.passed {
        debug!(
            round,
            turn,
            actor = actor.id(),
            ability = ability.id(),
            roll = hit.roll,
            chance = hit.chance,
            "miss"
        );
        let facts = EntryFacts {
            target_id: defender.id().to_string(),
            magnitude: 0,
            success: false,
            critical: false,
            summary: log::miss_summary(actor, &ability, defender),
        };
        let entry = entry(round, turn, &actor_after, defender, Some(&ability), facts);
        return TurnOutcome {
            actor: actor_after,
            defender: defender.clone(),
            entry,
        };
    }

    let crit = percent_check(dice, crit_chance(actor));
    let critical = crit.passed;
    let magnitude = magnitude(&ability, actor, defender, critical, dice);

    let (actor_after, defender_after, facts) = match ability.effect() {
        EffectClass::Attack => (
            actor_after,
            defender.take_damage(magnitude),
            EntryFacts {
                target_id: defender.id().to_string(),
                magnitude,
                success: true,
                critical,
                summary: log::attack_summary(actor, &ability, defender, magnitude, critical),
            },
        ),
        EffectClass::Heal => (
            actor_after.heal(magnitude),
            defender.clone(),
            EntryFacts {
                target_id: actor.id().to_string(),
                magnitude,
                success: true,
                critical,
                summary: log::heal_summary(actor, &ability, magnitude, critical),
            },
        ),
        EffectClass::Special => (
            actor_after,
            defender.clone(),
            EntryFacts {
                target_id: defender.id().to_string(),
                magnitude,
                success: true,
                critical,
                summary: log::special_summary(actor, &ability, defender, magnitude, critical),
            },
        ),
        EffectClass::Defense | EffectClass::Buff | EffectClass::Debuff => (
            actor_after,
            defender.clone(),
            EntryFacts {
                target_id: defender.id().to_string(),
                magnitude,
                success: true,
                critical,
                summary: log::plain_use_summary(actor, &ability),
            },
        ),
    };

    debug!(
        round,
        turn,
        actor = actor.id(),
        ability = ability.id(),
        effect = ?ability.effect(),
        magnitude,
        critical,
        actor_hp = actor_after.hp(),
        defender_hp = defender_after.hp(),
        "hit"
    );

    let entry = entry(round, turn, &actor_after, &defender_after, Some(&ability), facts);
    TurnOutcome {
        actor: actor_after,
        defender: defender_after,
        entry,
    }
}

/// Effect size of a landed ability, drawing the variance factor when the
/// class has a magnitude at all.
///
/// Attack: `power + strength*2`, Special: `power + intelligence*2`, Heal:
/// `power + intelligence*3`. Then variance 80..=120%, x1.5 on a crit and, for
/// Attack only, `constitution*3`% damage reduction. Everything except Heal is
/// floored at 1.
pub fn magnitude(
    ability: &Ability,
    actor: &Combatant,
    target: &Combatant,
    critical: bool,
    dice: &mut Dice,
) -> u32 {
    let power = i64::from(ability.power());
    let base = match ability.effect() {
        EffectClass::Attack => power + i64::from(actor.strength()) * 2,
        EffectClass::Special => power + i64::from(actor.intelligence()) * 2,
        EffectClass::Heal => power + i64::from(actor.intelligence()) * 3,
        EffectClass::Defense | EffectClass::Buff | EffectClass::Debuff => return 0,
    };

    let factor = dice.draw(VARIANCE_MIN, VARIANCE_MAX);
    let mut value = base * factor / 100;
    if critical {
        value = value * 3 / 2;
    }
    if ability.effect() == EffectClass::Attack {
        let kept = (100 - i64::from(target.constitution()) * DAMAGE_REDUCTION_PER_CONSTITUTION).max(0);
        value = value * kept / 100;
    }

    let value = value.max(0) as u32;
    match ability.effect() {
        EffectClass::Heal => value,
        _ => value.max(MIN_MAGNITUDE),
    }
}

struct EntryFacts {
    target_id: String,
    magnitude: u32,
    success: bool,
    critical: bool,
    summary: String,
}

impl EntryFacts {
    fn pass(actor: &Combatant, defender: &Combatant) -> Self {
        Self {
            target_id: defender.id().to_string(),
            magnitude: 0,
            success: true,
            critical: false,
            summary: log::pass_summary(actor),
        }
    }
}

fn entry(
    round: u32,
    turn: u8,
    actor: &Combatant,
    defender: &Combatant,
    ability: Option<&Ability>,
    facts: EntryFacts,
) -> LogEntry {
    LogEntry {
        round,
        turn,
        actor_id: actor.id().to_string(),
        target_id: facts.target_id,
        ability_id: ability.map(|a| a.id().to_string()).unwrap_or_default(),
        ability_name: ability.map(|a| a.name().to_string()).unwrap_or_default(),
        magnitude: facts.magnitude,
        success: facts.success,
        critical: facts.critical,
        summary: facts.summary,
        actor_health: actor.hp(),
        defender_health: defender.hp(),
    }
}
