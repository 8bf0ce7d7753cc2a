use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Picks YAML for `.yaml`/`.yml`, JSON otherwise.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => Format::Yaml,
            _ => Format::Json,
        }
    }
}

/// Builtin combatant sources, in roster order.
pub fn builtin_combatants() -> IndexMap<&'static str, (Format, &'static str)> {
    IndexMap::from([
        (
            "iron_warden",
            (Format::Json, include_str!("../content/combatants/iron_warden.json")),
        ),
        (
            "ember_adept",
            (Format::Json, include_str!("../content/combatants/ember_adept.json")),
        ),
        (
            "marsh_stalker",
            (Format::Yaml, include_str!("../content/combatants/marsh_stalker.yaml")),
        ),
    ])
}
