use thiserror::Error;

/// Rejections raised while building a combatant or ability snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("{what} id must not be empty")]
    EmptyId { what: &'static str },
    #[error("level must be at least 1")]
    ZeroLevel,
    #[error("{attribute} must be within 1..=20 (got {value})")]
    AttributeOutOfRange { attribute: &'static str, value: i64 },
    #[error("ability '{ability}': {field} must be within {min}..={max} (got {value})")]
    AbilityOutOfRange {
        ability: String,
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },
    #[error("ability '{ability}': remaining cooldown {current} exceeds cooldown length {length}")]
    CooldownOverflow {
        ability: String,
        current: u32,
        length: u32,
    },
    #[error("ability id '{0}' appears more than once")]
    DuplicateAbility(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("combatant '{0}' cannot battle itself")]
    SelfBattle(String),
    #[error("invalid combatant snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}
