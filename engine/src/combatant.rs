use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::ability::{Ability, AbilitySpec};
use crate::error::SnapshotError;
use crate::life::Health;

pub const ATTRIBUTE_MIN: i64 = 1;
pub const ATTRIBUTE_MAX: i64 = 20;

const BASE_HEALTH: u32 = 50;
const HEALTH_PER_CONSTITUTION: u32 = 10;
const HEALTH_PER_LEVEL: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: u32,
    pub agility: u32,
    pub constitution: u32,
    pub intelligence: u32,
}

impl Attributes {
    pub fn new(strength: u32, agility: u32, constitution: u32, intelligence: u32) -> Self {
        Self {
            strength,
            agility,
            constitution,
            intelligence,
        }
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        for (attribute, value) in [
            ("strength", self.strength),
            ("agility", self.agility),
            ("constitution", self.constitution),
            ("intelligence", self.intelligence),
        ] {
            let value = i64::from(value);
            if !(ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(&value) {
                return Err(SnapshotError::AttributeOutOfRange { attribute, value });
            }
        }
        Ok(())
    }
}

/// `50 + constitution*10 + level*5`.
pub fn max_health(constitution: u32, level: u32) -> u32 {
    BASE_HEALTH
        .saturating_add(constitution.saturating_mul(HEALTH_PER_CONSTITUTION))
        .saturating_add(level.saturating_mul(HEALTH_PER_LEVEL))
}

/// Wire form of a combatant; validated into [`Combatant`].
#[derive(Debug, Clone, Deserialize)]
pub struct CombatantSpec {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub attributes: Attributes,
    #[serde(default)]
    pub abilities: Vec<AbilitySpec>,
    /// Only the current value is honoured; the maximum is always derived.
    #[serde(default)]
    pub health: Option<Health>,
}

/// One fighter at a point in time. Every operation hands back a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CombatantSpec")]
pub struct Combatant {
    id: String,
    name: String,
    level: u32,
    attributes: Attributes,
    health: Health,
    abilities: Vec<Ability>,
}

impl Combatant {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        level: u32,
        attributes: Attributes,
        abilities: Vec<Ability>,
    ) -> Result<Self, SnapshotError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(SnapshotError::EmptyId { what: "combatant" });
        }
        if level == 0 {
            return Err(SnapshotError::ZeroLevel);
        }
        attributes.validate()?;
        let mut seen = HashSet::new();
        for ability in &abilities {
            if !seen.insert(ability.id()) {
                return Err(SnapshotError::DuplicateAbility(ability.id().to_string()));
            }
        }
        Ok(Self {
            id,
            name: name.into(),
            level,
            health: Health::new(max_health(attributes.constitution, level)),
            attributes,
            abilities,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn attributes(&self) -> Attributes {
        self.attributes
    }

    pub fn strength(&self) -> u32 {
        self.attributes.strength
    }

    pub fn agility(&self) -> u32 {
        self.attributes.agility
    }

    pub fn constitution(&self) -> u32 {
        self.attributes.constitution
    }

    pub fn intelligence(&self) -> u32 {
        self.attributes.intelligence
    }

    pub fn hp(&self) -> u32 {
        self.health.hp()
    }

    pub fn max_hp(&self) -> u32 {
        self.health.max_hp()
    }

    pub fn is_defeated(&self) -> bool {
        self.health.is_defeated()
    }

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn ability(&self, id: &str) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.id() == id)
    }

    pub fn available_abilities(&self) -> Vec<&Ability> {
        self.abilities.iter().filter(|a| a.is_available()).collect()
    }

    /// Full health and every ability ready: the state a battle starts from.
    pub fn rested(&self) -> Self {
        Self {
            health: Health::new(self.max_hp()),
            abilities: self.abilities.iter().map(Ability::ready).collect(),
            ..self.clone()
        }
    }

    pub fn take_damage(&self, amount: u32) -> Self {
        Self {
            health: self.health.after_damage(amount),
            ..self.clone()
        }
    }

    pub fn heal(&self, amount: u32) -> Self {
        Self {
            health: self.health.after_heal(amount),
            ..self.clone()
        }
    }

    /// Puts the ability with `ability_id` on its full cooldown.
    pub fn use_ability(&self, ability_id: &str) -> Self {
        self.map_abilities(|a| if a.id() == ability_id { a.used() } else { a.clone() })
    }

    /// End-of-round cooldown tick. The ability used during the round that is
    /// ending (if any) is left at its full cooldown.
    pub fn tick_cooldowns(&self, spared: Option<&str>) -> Self {
        self.map_abilities(|a| {
            if Some(a.id()) == spared {
                a.clone()
            } else {
                a.ticked()
            }
        })
    }

    fn map_abilities(&self, f: impl Fn(&Ability) -> Ability) -> Self {
        Self {
            abilities: self.abilities.iter().map(f).collect(),
            ..self.clone()
        }
    }
}

impl TryFrom<CombatantSpec> for Combatant {
    type Error = SnapshotError;

    fn try_from(spec: CombatantSpec) -> Result<Self, Self::Error> {
        let abilities = spec
            .abilities
            .into_iter()
            .map(Ability::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let combatant = Combatant::new(spec.id, spec.name, spec.level, spec.attributes, abilities)?;
        Ok(match spec.health {
            Some(h) => Self {
                health: Health::with_current(h.hp(), combatant.max_hp()),
                ..combatant
            },
            None => combatant,
        })
    }
}
