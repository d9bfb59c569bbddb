use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use npc_core::{AdvanceStopReason, ContentPack, DamageKind, Game, TileMap};
use serde::Serialize;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Runs a populated arena headless and checks world invariants")]
struct Args {
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    /// Tick budget.
    #[arg(short, long, default_value_t = 1_000)]
    ticks: u32,

    /// Creature definitions in TOML. The builtin pack is used when omitted.
    #[arg(short, long)]
    content: Option<PathBuf>,

    /// Creatures of each kind to place.
    #[arg(long, default_value_t = 3)]
    per_kind: usize,
}

#[derive(Serialize)]
struct SoakSummary {
    seed: u64,
    ticks: u32,
    stop_reason: &'static str,
    acted: u64,
    idle: u64,
    deaths: usize,
    items_dropped: usize,
    player_life: u32,
    snapshot_hash: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let pack = match &args.content {
        Some(path) => ContentPack::load(path)
            .with_context(|| format!("Failed to load content from {}", path.display()))?,
        None => ContentPack::builtin(),
    };

    let mut game =
        Game::arena(args.seed, &pack, args.per_kind).context("Failed to populate the arena")?;
    check_invariants(&game).context("Arena started in a broken state")?;

    let (mut acted, mut idle) = (0u64, 0u64);
    let mut ticks = 0;
    let mut strikes = [DamageKind::Physical, DamageKind::Fire, DamageKind::Acid].into_iter().cycle();
    while ticks < args.ticks {
        if game.state().player.dead {
            break;
        }
        let report = game.run_tick();
        acted += u64::from(report.acted);
        idle += u64::from(report.idle);
        ticks += 1;
        check_invariants(&game).with_context(|| format!("Invariant broken after tick {ticks}"))?;

        if let Some(kind) = strikes.next() {
            game.player_strike(kind, 2)?;
        }
        check_invariants(&game).with_context(|| format!("Invariant broken by strike {ticks}"))?;
    }
    let stop_reason = if game.state().player.dead {
        AdvanceStopReason::PlayerDefeated
    } else {
        AdvanceStopReason::BudgetExhausted
    };

    let state = game.state();
    let summary = SoakSummary {
        seed: args.seed,
        ticks,
        stop_reason: match stop_reason {
            AdvanceStopReason::PlayerDefeated => "player_defeated",
            AdvanceStopReason::BudgetExhausted => "budget_exhausted",
        },
        acted,
        idle,
        deaths: state.entities.values().filter(|e| e.dead).count(),
        items_dropped: state.items.items.len(),
        player_life: state.player.vitals.life,
        snapshot_hash: format!("{:016x}", game.snapshot_hash()),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn check_invariants(game: &Game) -> Result<()> {
    let state = game.state();
    let mut claimed = BTreeSet::new();
    for entity in state.entities.values().filter(|e| e.is_alive()) {
        if entity.vitals.life > entity.vitals.max_life {
            bail!("{} has {} of {} life", entity.name, entity.vitals.life, entity.vitals.max_life);
        }
        if !state.map.is_passable(entity.pos) || !state.map.is_interior(entity.pos) {
            bail!("{} stands on a blocked tile at {:?}", entity.name, entity.pos);
        }
        if !claimed.insert(entity.pos) {
            bail!("two live entities share {:?}", entity.pos);
        }
    }
    Ok(())
}
