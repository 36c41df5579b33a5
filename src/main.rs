//! Headless skirmish runner
//!
//! Loads a scenario, plays it out with a fixed policy and prints one JSON
//! object per line on stdout. Logs go to stderr (`RUST_LOG` to tune).

use std::path::PathBuf;

use ahash::AHashMap;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use firefight::combat::actions::{
    ActionResult, MeleeRequest, ReloadRequest, ShootRequest, UnjamRequest,
};
use firefight::combat::aiming::AimType;
use firefight::combat::combatant::Combatant;
use firefight::combat::session::CombatSession;
use firefight::combat::weapons::FiringMode;
use firefight::core::config::RulesConfig;
use firefight::core::error::CombatError;
use firefight::engine::{CombatService, Scenario, SessionSummary, StatsSnapshot};

/// Headless skirmish runner - plays a scenario to the end
#[derive(Parser, Debug)]
#[command(name = "firefight")]
#[command(about = "Play out a combat scenario and print JSON results")]
struct Args {
    /// Scenario TOML file
    scenario: PathBuf,

    /// Random seed (overrides the scenario's)
    #[arg(long)]
    seed: Option<u64>,

    /// Round limit (overrides the scenario's)
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Rules TOML replacing the scenario's rules
    #[arg(long)]
    rules: Option<PathBuf>,
}

/// One line of output
#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Line<'a> {
    Started(&'a SessionSummary),
    Action(&'a ActionResult),
    Round(&'a SessionSummary),
    Finished(&'a StatsSnapshot),
}

const DEFAULT_MAX_ROUNDS: u32 = 20;

/// What the current actor does next
enum Intent {
    Unjam,
    Reload,
    Shoot(String),
    Melee(String),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("firefight=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut scenario = Scenario::load(&args.scenario)?;
    if let Some(path) = &args.rules {
        scenario.rules = RulesConfig::load(path)?;
    }
    let seed = args
        .seed
        .or(scenario.seed)
        .unwrap_or_else(rand::random);
    let max_rounds = args
        .max_rounds
        .or(scenario.max_rounds)
        .unwrap_or(DEFAULT_MAX_ROUNDS);
    tracing::info!("Playing {} with seed {}", scenario.name, seed);

    let roster = scenario.roster(&scenario.catalog())?;
    let skills: AHashMap<String, i32> = scenario
        .combatants
        .iter()
        .map(|s| (s.name.clone(), s.skill))
        .collect();

    let service = CombatService::new(
        CombatSession::with_seed(scenario.rules.clone(), seed),
        scenario.environment,
    );
    let summary = service.start_session(&roster)?;
    emit(&Line::Started(&summary))?;

    loop {
        let (round, standing, actor, anyone_can_act) = service.inspect(|s| {
            (
                s.round(),
                s.active().len(),
                s.current_actor().cloned(),
                s.active().iter().any(|c| c.actions_remaining > 0),
            )
        });
        if standing <= 1 {
            break;
        }

        let Some(actor) = actor else { break };
        if actor.actions_remaining <= 0 {
            if anyone_can_act {
                service.advance_turn()?;
                continue;
            }
            if round >= max_rounds {
                tracing::info!("Round limit {} reached", max_rounds);
                break;
            }
            let summary = service.next_round()?;
            emit(&Line::Round(&summary))?;
            continue;
        }

        let skill = skills.get(&actor.name).copied().unwrap_or(10);
        let Some(opponent) = service.inspect(|s| {
            s.active()
                .iter()
                .find(|c| c.id != actor.id)
                .map(|c| c.name.clone())
        }) else {
            break;
        };

        let intent = choose(&actor, opponent.clone());
        let outcome = act(&service, intent, skill, scenario.range).or_else(|err| {
            tracing::debug!("{} falls back to melee: {}", actor.name, err);
            act(&service, Intent::Melee(opponent), skill, scenario.range)
        });
        match outcome {
            Ok(result) => emit(&Line::Action(&result))?,
            Err(err) => {
                tracing::warn!("{} is stuck ({}), ending the round", actor.name, err);
                if round >= max_rounds {
                    break;
                }
                let summary = service.next_round()?;
                emit(&Line::Round(&summary))?;
            }
        }
    }

    emit(&Line::Finished(&service.stats()))?;
    service.end_combat()?;
    Ok(())
}

fn choose(actor: &Combatant, opponent: String) -> Intent {
    match &actor.main_hand {
        None => Intent::Melee(opponent),
        Some(weapon) if weapon.primary.magazine.jammed => Intent::Unjam,
        Some(weapon) if weapon.primary.magazine.is_empty() => Intent::Reload,
        Some(_) => Intent::Shoot(opponent),
    }
}

fn act(
    service: &CombatService,
    intent: Intent,
    skill: i32,
    range: f64,
) -> Result<ActionResult, CombatError> {
    match intent {
        Intent::Unjam => service.unjam(&UnjamRequest::new(skill)),
        Intent::Reload => service.reload(&ReloadRequest::new(skill)),
        Intent::Shoot(target) => service.shoot(
            &ShootRequest::new(target, FiringMode::SingleRound, skill)
                .aimed(AimType::Uncontrolled, range),
        ),
        Intent::Melee(target) => service.melee(&MeleeRequest::new(target, skill)),
    }
}

fn emit(line: &Line<'_>) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string(line)?);
    Ok(())
}
