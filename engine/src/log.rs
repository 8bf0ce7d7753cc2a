use serde::{Deserialize, Serialize};

use crate::{Ability, Combatant};

/// One resolved turn. Entries are appended to a battle's log and never touched again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub round: u32,
    /// 1 for whoever won initiative, 2 for the other side.
    pub turn: u8,
    pub actor_id: String,
    pub target_id: String,
    /// Empty on a pass.
    pub ability_id: String,
    pub ability_name: String,
    pub magnitude: u32,
    pub success: bool,
    pub critical: bool,
    pub summary: String,
    pub actor_health: u32,
    /// Health of the participant who did not act, whatever the target of record.
    pub defender_health: u32,
}

impl LogEntry {
    pub fn is_pass(&self) -> bool {
        self.ability_id.is_empty()
    }
}

pub(crate) fn pass_summary(actor: &Combatant) -> String {
    format!("{} has no ability ready and passes", actor.name())
}

pub(crate) fn miss_summary(actor: &Combatant, ability: &Ability, target: &Combatant) -> String {
    format!(
        "{} uses {} on {} but misses",
        actor.name(),
        ability.name(),
        target.name()
    )
}

pub(crate) fn attack_summary(
    actor: &Combatant,
    ability: &Ability,
    target: &Combatant,
    magnitude: u32,
    critical: bool,
) -> String {
    format!(
        "{}{} hits {} with {} for {} damage",
        crit_prefix(critical),
        actor.name(),
        target.name(),
        ability.name(),
        magnitude
    )
}

pub(crate) fn special_summary(
    actor: &Combatant,
    ability: &Ability,
    target: &Combatant,
    magnitude: u32,
    critical: bool,
) -> String {
    format!(
        "{}{} unleashes {} on {} ({} power)",
        crit_prefix(critical),
        actor.name(),
        ability.name(),
        target.name(),
        magnitude
    )
}

pub(crate) fn heal_summary(actor: &Combatant, ability: &Ability, magnitude: u32, critical: bool) -> String {
    format!(
        "{}{} uses {} and heals for {}",
        crit_prefix(critical),
        actor.name(),
        ability.name(),
        magnitude
    )
}

pub(crate) fn plain_use_summary(actor: &Combatant, ability: &Ability) -> String {
    format!("{} uses {}", actor.name(), ability.name())
}

fn crit_prefix(critical: bool) -> &'static str {
    if critical { "Critical! " } else { "" }
}
