use std::path::PathBuf;

use arena_engine::api::{self, BattleConfig, CombatantSource};
use arena_engine::content::builtin_combatants;
use arena_engine::{Battle, Dice};
use clap::{Parser, Subcommand};
use tracing::debug;

const DEFAULT_SEED: u64 = 42;

#[derive(Subcommand)]
enum Cmd {
    /// Run one battle and print its log
    Fight {
        /// RNG seed for determinism (defaults to 42, or the config's seed)
        #[arg(long)]
        seed: Option<u64>,
        /// Challenger: builtin id or path to a JSON/YAML snapshot
        #[arg(long, required_unless_present = "config")]
        challenger: Option<String>,
        /// Opponent: builtin id or path to a JSON/YAML snapshot
        #[arg(long, required_unless_present = "config")]
        opponent: Option<String>,
        /// Battle config file (JSON/YAML)
        #[arg(long, conflicts_with_all = ["challenger", "opponent"])]
        config: Option<PathBuf>,
        /// Battle id (defaults to battle-<seed>)
        #[arg(long)]
        id: Option<String>,
        /// Emit the finished battle as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print raw draws from the deterministic source
    Roll {
        /// Starting counter
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 1)]
        min: i64,
        #[arg(long, default_value_t = 20)]
        max: i64,
        /// Number of draws
        #[arg(long, default_value_t = 5)]
        count: u32,
    },
    /// List builtin combatants
    Roster,
    /// Serialize a builtin combatant to JSON (stdout)
    Dump {
        /// Builtin id
        id: String,
        /// Single-line JSON instead of pretty-printed
        #[arg(long, default_value_t = false)]
        compact: bool,
    },
}

#[derive(Parser)]
#[command(name = "arena-cli")]
#[command(about = "Deterministic arena battle harness")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Fight {
            seed,
            challenger,
            opponent,
            config,
            id,
            json,
        } => {
            let mut cfg = match config {
                Some(path) => {
                    let mut cfg = api::load_battle_config(&path)?;
                    if let Some(seed) = seed {
                        cfg.seed = seed;
                    }
                    debug!(path = %path.display(), seed = cfg.seed, "loaded battle config");
                    cfg
                }
                None => BattleConfig {
                    id: None,
                    seed: seed.unwrap_or(DEFAULT_SEED),
                    challenger: CombatantSource::from_arg(challenger.as_deref().unwrap_or_default()),
                    opponent: CombatantSource::from_arg(opponent.as_deref().unwrap_or_default()),
                },
            };
            if id.is_some() {
                cfg.id = id;
            }
            let battle = api::simulate_battle(cfg)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&battle)?);
            } else {
                print_battle(&battle);
            }
        }
        Cmd::Roll {
            seed,
            min,
            max,
            count,
        } => {
            let mut dice = Dice::from_seed(seed);
            for _ in 0..count {
                println!("{}", dice.draw(min, max));
            }
        }
        Cmd::Roster => {
            for id in builtin_combatants().keys() {
                let c = api::builtin_combatant(id)?;
                let a = c.attributes();
                println!(
                    "{:<14} {:<14} L{} HP {} STR {} AGI {} CON {} INT {}",
                    c.id(),
                    c.name(),
                    c.level(),
                    c.max_hp(),
                    a.strength,
                    a.agility,
                    a.constitution,
                    a.intelligence
                );
                for ability in c.abilities() {
                    println!(
                        "    {:<14} {:?} cd {}: {}",
                        ability.id(),
                        ability.effect(),
                        ability.cooldown(),
                        ability.description()
                    );
                }
            }
        }
        Cmd::Dump { id, compact } => {
            let c = api::builtin_combatant(&id)?;
            if compact {
                println!("{}", serde_json::to_string(&c)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&c)?);
            }
        }
    }
    Ok(())
}

fn print_battle(battle: &Battle) {
    let c = battle.challenger();
    let o = battle.opponent();
    println!(
        "[START] {} (HP {}) vs {} (HP {}) seed={}",
        c.name(),
        c.max_hp(),
        o.name(),
        o.max_hp(),
        battle.seed()
    );
    for entry in battle.log() {
        let mark = if entry.is_pass() {
            "-"
        } else if entry.success {
            "✔"
        } else {
            "✖"
        };
        println!(
            "[R{:>2}.{}] {} {} [{}: {} HP | other: {} HP]",
            entry.round,
            entry.turn,
            mark,
            entry.summary,
            entry.actor_id,
            entry.actor_health,
            entry.defender_health
        );
    }
    println!(
        "[END] winner={} rounds={} xp={}",
        battle.winner_id().unwrap_or("draw"),
        battle.round(),
        battle.experience_gain()
    );
}
