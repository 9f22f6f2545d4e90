//! Encounter simulator for the combat crates.
//!
//! Loads content from a data directory, seeds the RNG and plays a duel,
//! printing each outcome's combat-log line (or the whole report as JSON).
mod config;
mod encounter;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use combat_content::{CombatContent, ContentFactory};
use combat_core::{CombatActor, CombatEngine, CombatEnv, CombatantId, PcgRng, TracingTelemetry};

use config::SimConfig;
use encounter::{Encounter, EncounterReport};

/// Combat encounter simulator
#[derive(Parser)]
#[command(name = "combat-sim")]
#[command(about = "Run seeded combat encounters against data files", long_about = None)]
#[command(version)]
struct Cli {
    /// Content directory (config.toml, tables.toml, spells.ron, roster.ron)
    #[arg(short, long, value_name = "DIR", global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play rounds between one attacker and its targets
    Duel(Duel),

    /// List the combatants in the roster
    Roster,
}

#[derive(Parser)]
struct Duel {
    /// RNG seed; identical seeds replay identical encounters
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maximum number of rounds
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Attacker id (defaults to the first roster entry)
    #[arg(short, long, value_name = "ID")]
    attacker: Option<u32>,

    /// Target id, repeatable (defaults to everyone else)
    #[arg(short, long = "target", value_name = "ID")]
    targets: Vec<u32>,

    /// Print the full report as JSON instead of log lines
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();
    let mut config = SimConfig::from_env();
    if let Some(dir) = cli.data {
        config.data_dir = dir;
    }

    let content = ContentFactory::new(&config.data_dir)
        .load_all()
        .with_context(|| format!("loading content from {}", config.data_dir.display()))?;

    match cli.command {
        Command::Duel(duel) => duel.execute(config, content),
        Command::Roster => {
            print_roster(&content.roster);
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout stays clean for reports.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

impl Duel {
    fn execute(self, mut config: SimConfig, content: CombatContent) -> Result<()> {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(rounds) = self.rounds {
            config.rounds = rounds.max(1);
        }

        let (attacker, defenders) = self.pick_sides(&content.roster)?;
        tracing::info!(
            seed = config.seed,
            rounds = config.rounds,
            %attacker,
            defenders = defenders.len(),
            "starting duel"
        );

        let scaling = content.scaling();
        let telemetry = TracingTelemetry;
        let env = CombatEnv::with_all(&scaling, &content.spells, &telemetry);
        let engine = CombatEngine::new(env, content.config.clone(), PcgRng::seeded(config.seed));

        let mut encounter = Encounter::new(engine, content.roster, attacker, defenders);
        let report = encounter.run(config.rounds);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }
        Ok(())
    }

    fn pick_sides(&self, roster: &[CombatActor]) -> Result<(CombatantId, Vec<CombatantId>)> {
        let attacker = match self.attacker {
            Some(id) => CombatantId(id),
            None => match roster.first() {
                Some(actor) => actor.id,
                None => bail!("roster is empty"),
            },
        };
        if !roster.iter().any(|actor| actor.id == attacker) {
            bail!("attacker {attacker} is not in the roster");
        }

        let defenders: Vec<CombatantId> = if self.targets.is_empty() {
            roster
                .iter()
                .map(|actor| actor.id)
                .filter(|&id| id != attacker)
                .collect()
        } else {
            self.targets.iter().copied().map(CombatantId).collect()
        };
        if defenders.is_empty() {
            bail!("no targets to fight");
        }
        Ok((attacker, defenders))
    }
}

fn print_report(report: &EncounterReport) {
    for round in &report.rounds {
        println!("-- round {} --", round.round);
        for outcome in &round.outcomes {
            let marker = if outcome.success { ' ' } else { '!' };
            println!("{marker} {}", outcome.description);
        }
    }
    println!(
        "total damage {:.1}; survivors: {}",
        report.total_damage(),
        report.survivors.join(", ")
    );
}

fn print_roster(roster: &[CombatActor]) {
    for actor in roster {
        let weapon = actor
            .weapon
            .as_ref()
            .map_or_else(|| "unarmed".to_owned(), |weapon| weapon.name.clone());
        let role = format!("{:?}", actor.role);
        println!(
            "{:>4}  {:<14} {:<7} hp {:>5.0}/{:<5.0} {}",
            actor.id.0, actor.name, role, actor.health.current, actor.health.max, weapon
        );
    }
}
