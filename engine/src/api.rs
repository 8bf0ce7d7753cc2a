use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use encoding_rs::Encoding;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::content::{builtin_combatants, Format};
use crate::{Battle, Combatant};

/// Upper bound (exclusive) for derived trial seeds; keeps the counter exact as `f64`.
const TRIAL_SEED_LIMIT: u64 = 1 << 32;

/// Where a combatant snapshot comes from.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatantSource {
    Builtin(String),
    Path(PathBuf),
    Inline(Combatant),
}

impl CombatantSource {
    /// Existing files are loaded from disk, anything else is treated as a builtin id.
    pub fn from_arg(arg: &str) -> Self {
        let path = Path::new(arg);
        if path.is_file() {
            CombatantSource::Path(path.to_path_buf())
        } else {
            CombatantSource::Builtin(arg.to_string())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleConfig {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub seed: u64,
    pub challenger: CombatantSource,
    pub opponent: CombatantSource,
}

impl BattleConfig {
    pub fn battle_id(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("battle-{}", self.seed))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleSummary {
    pub samples: u32,
    pub challenger_wins: u32,
    pub opponent_wins: u32,
    pub draws: u32,
    pub avg_rounds: f64,
    pub median_rounds: u32,
    pub hits: u32,
    pub misses: u32,
    pub crits: u32,
    pub passes: u32,
}

impl BattleSummary {
    fn record(&mut self, battle: &Battle) {
        self.samples += 1;
        match battle.winner_id() {
            Some(id) if id == battle.challenger().id() => self.challenger_wins += 1,
            Some(_) => self.opponent_wins += 1,
            None => self.draws += 1,
        }
        for entry in battle.log() {
            if entry.is_pass() {
                self.passes += 1;
            } else if entry.success {
                self.hits += 1;
                if entry.critical {
                    self.crits += 1;
                }
            } else {
                self.misses += 1;
            }
        }
    }
}

pub fn resolve_source(source: &CombatantSource) -> Result<Combatant> {
    match source {
        CombatantSource::Builtin(id) => builtin_combatant(id),
        CombatantSource::Path(path) => load_combatant(path),
        CombatantSource::Inline(combatant) => Ok(combatant.clone()),
    }
}

/// Read a text file, honouring a UTF-8/UTF-16 byte-order mark when present.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

pub fn load_combatant(path: &Path) -> Result<Combatant> {
    let text = read_text(path)
        .with_context(|| format!("failed to read combatant file: {}", path.display()))?;
    parse_combatant(&text, Format::from_path(path))
        .with_context(|| format!("failed to parse combatant file: {}", path.display()))
}

pub fn builtin_combatant(id: &str) -> Result<Combatant> {
    let roster = builtin_combatants();
    let (format, text) = roster
        .get(id)
        .ok_or_else(|| anyhow!("builtin combatant '{}' not found", id))?;
    parse_combatant(text, *format).with_context(|| format!("builtin combatant '{}' is malformed", id))
}

pub fn parse_combatant(text: &str, format: Format) -> Result<Combatant> {
    parse(text, format)
}

pub fn parse_battle_config(text: &str, format: Format) -> Result<BattleConfig> {
    parse(text, format)
}

pub fn load_battle_config(path: &Path) -> Result<BattleConfig> {
    let text = read_text(path)
        .with_context(|| format!("failed to read battle config: {}", path.display()))?;
    parse_battle_config(&text, Format::from_path(path))
        .with_context(|| format!("failed to parse battle config: {}", path.display()))
}

fn parse<T: DeserializeOwned>(text: &str, format: Format) -> Result<T> {
    let value = match format {
        Format::Json => serde_json::from_str(text)?,
        Format::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(value)
}

pub fn simulate_battle(cfg: BattleConfig) -> Result<Battle> {
    let challenger = resolve_source(&cfg.challenger).context("loading challenger")?;
    let opponent = resolve_source(&cfg.opponent).context("loading opponent")?;
    let battle = crate::simulate(cfg.battle_id(), cfg.seed, challenger, opponent)?;
    Ok(battle)
}

/// Run `samples` battles on seeds derived from `cfg.seed` and tally the results.
pub fn simulate_battle_many(cfg: BattleConfig, samples: u32) -> Result<BattleSummary> {
    let challenger = resolve_source(&cfg.challenger).context("loading challenger")?;
    let opponent = resolve_source(&cfg.opponent).context("loading opponent")?;
    let base_id = cfg.battle_id();

    if samples == 0 {
        warn!(battle = %base_id, "batch requested with zero samples");
        return Ok(BattleSummary::default());
    }

    let mut seeds = ChaCha8Rng::seed_from_u64(cfg.seed);
    let mut summary = BattleSummary::default();
    let mut rounds: Vec<u32> = Vec::with_capacity(samples as usize);
    for trial in 0..samples {
        let seed = seeds.gen_range(0..TRIAL_SEED_LIMIT);
        let battle = crate::simulate(
            format!("{}-{}", base_id, trial),
            seed,
            challenger.clone(),
            opponent.clone(),
        )?;
        rounds.push(battle.round());
        summary.record(&battle);
    }

    rounds.sort_unstable();
    let total: u64 = rounds.iter().map(|&r| u64::from(r)).sum();
    summary.avg_rounds = total as f64 / f64::from(samples);
    let m = rounds.len() / 2;
    summary.median_rounds = if rounds.len() % 2 == 1 {
        rounds[m]
    } else {
        (rounds[m - 1] + rounds[m]) / 2
    };
    debug!(
        battle = %base_id,
        samples,
        challenger_wins = summary.challenger_wins,
        opponent_wins = summary.opponent_wins,
        draws = summary.draws,
        "batch finished"
    );
    Ok(summary)
}
