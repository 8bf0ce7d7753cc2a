use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

pub const POWER_RANGE: (i64, i64) = (1, 100);
pub const ACCURACY_RANGE: (i64, i64) = (1, 100);
pub const COOLDOWN_RANGE: (i64, i64) = (0, 10);

/// What an ability does when it lands. Only `Attack` and `Heal` move health;
/// the rest consume a turn and a cooldown and nothing else for now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectClass {
    Attack,
    Defense,
    Special,
    Heal,
    Buff,
    Debuff,
}

impl EffectClass {
    pub const ALL: [EffectClass; 6] = [
        EffectClass::Attack,
        EffectClass::Defense,
        EffectClass::Special,
        EffectClass::Heal,
        EffectClass::Buff,
        EffectClass::Debuff,
    ];

}

/// Wire form of an ability; validated into [`Ability`].
#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub effect: EffectClass,
    pub power: i64,
    pub accuracy: i64,
    #[serde(default)]
    pub cooldown: i64,
    #[serde(default)]
    pub current_cooldown: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AbilitySpec")]
pub struct Ability {
    id: String,
    name: String,
    description: String,
    effect: EffectClass,
    power: u32,
    accuracy: u32,
    cooldown: u32,
    current_cooldown: u32,
}

impl Ability {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        effect: EffectClass,
        power: i64,
        accuracy: i64,
        cooldown: i64,
    ) -> Result<Self, SnapshotError> {
        Self::try_from(AbilitySpec {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            effect,
            power,
            accuracy,
            cooldown,
            current_cooldown: 0,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn effect(&self) -> EffectClass {
        self.effect
    }

    pub fn power(&self) -> u32 {
        self.power
    }

    pub fn accuracy(&self) -> u32 {
        self.accuracy
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn current_cooldown(&self) -> u32 {
        self.current_cooldown
    }

    pub fn is_available(&self) -> bool {
        self.current_cooldown == 0
    }

    /// The ability right after being used: remaining cooldown reset to its length.
    pub fn used(&self) -> Self {
        Self {
            current_cooldown: self.cooldown,
            ..self.clone()
        }
    }

    pub fn ready(&self) -> Self {
        Self {
            current_cooldown: 0,
            ..self.clone()
        }
    }

    pub fn ticked(&self) -> Self {
        Self {
            current_cooldown: self.current_cooldown.saturating_sub(1),
            ..self.clone()
        }
    }
}

fn check_range(
    ability: &str,
    field: &'static str,
    (min, max): (i64, i64),
    value: i64,
) -> Result<u32, SnapshotError> {
    if (min..=max).contains(&value) {
        Ok(value as u32)
    } else {
        Err(SnapshotError::AbilityOutOfRange {
            ability: ability.to_string(),
            field,
            min,
            max,
            value,
        })
    }
}

impl TryFrom<AbilitySpec> for Ability {
    type Error = SnapshotError;

    fn try_from(spec: AbilitySpec) -> Result<Self, Self::Error> {
        if spec.id.trim().is_empty() {
            return Err(SnapshotError::EmptyId { what: "ability" });
        }
        let power = check_range(&spec.id, "power", POWER_RANGE, spec.power)?;
        let accuracy = check_range(&spec.id, "accuracy", ACCURACY_RANGE, spec.accuracy)?;
        let cooldown = check_range(&spec.id, "cooldown", COOLDOWN_RANGE, spec.cooldown)?;
        if spec.current_cooldown > cooldown {
            return Err(SnapshotError::CooldownOverflow {
                ability: spec.id,
                current: spec.current_cooldown,
                length: cooldown,
            });
        }
        Ok(Self {
            id: spec.id,
            name: spec.name,
            description: spec.description,
            effect: spec.effect,
            power,
            accuracy,
            cooldown,
            current_cooldown: spec.current_cooldown,
        })
    }
}
