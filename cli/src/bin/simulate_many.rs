use arena_engine::api::{self, BattleConfig, CombatantSource};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

const DEFAULT_SEED: u64 = 12345;

#[derive(Parser)]
#[command(name = "simulate-many")]
#[command(about = "Monte Carlo sim: many battles between two combatants")]
struct Args {
    /// Battle config (JSON/YAML). Overrides --challenger/--opponent.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Challenger builtin id or snapshot path
    #[arg(long, default_value = "iron_warden")]
    challenger: String,

    /// Opponent builtin id or snapshot path
    #[arg(long, default_value = "ember_adept")]
    opponent: String,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// Base seed; per-trial seeds are derived from it (defaults to 12345, or the config's seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn rate(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let cfg = match args.config.as_ref() {
        Some(path) => {
            let mut cfg = api::load_battle_config(path)?;
            if let Some(seed) = args.seed {
                cfg.seed = seed;
            }
            cfg
        }
        None => BattleConfig {
            id: Some("sim".to_string()),
            seed: args.seed.unwrap_or(DEFAULT_SEED),
            challenger: CombatantSource::from_arg(&args.challenger),
            opponent: CombatantSource::from_arg(&args.opponent),
        },
    };

    let challenger = api::resolve_source(&cfg.challenger)?;
    let opponent = api::resolve_source(&cfg.opponent)?;
    info!(trials = args.trials, seed = cfg.seed, "starting batch");

    let seed = cfg.seed;
    let stats = api::simulate_battle_many(cfg, args.trials)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let swings = stats.hits + stats.misses;
    println!("simulate-many results");
    println!("---------------------");
    println!("trials:             {}", stats.samples);
    println!("seed:               {}", seed);
    println!(
        "challenger:         {} (L{}, HP {})",
        challenger.name(),
        challenger.level(),
        challenger.max_hp()
    );
    println!(
        "opponent:           {} (L{}, HP {})",
        opponent.name(),
        opponent.level(),
        opponent.max_hp()
    );
    println!();
    println!(
        "challenger wins:    {:.1}%",
        rate(stats.challenger_wins, stats.samples) * 100.0
    );
    println!(
        "opponent wins:      {:.1}%",
        rate(stats.opponent_wins, stats.samples) * 100.0
    );
    println!(
        "draws:              {:.1}%",
        rate(stats.draws, stats.samples) * 100.0
    );
    println!("hit rate:           {:.1}%", rate(stats.hits, swings) * 100.0);
    println!(
        "crit rate:          {:.1}%",
        rate(stats.crits, stats.hits) * 100.0
    );
    println!("passes:             {}", stats.passes);
    println!("avg rounds:         {:.2}", stats.avg_rounds);
    println!("median rounds:      {}", stats.median_rounds);

    Ok(())
}
