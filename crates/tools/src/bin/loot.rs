//! Rolls a creature's drop table many times and compares against its weights.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use npc_core::content::keys;
use npc_core::{ContentPack, CreatureTemplate, Game, ItemKind, Map, Pos};
use serde::Serialize;
use tracing::Level;
use tracing_subscriber::EnvFilter;

const NON_ITEM: &str = "nothing";

#[derive(Parser)]
#[command(author, version, about = "Samples death loot for one creature kind")]
struct Args {
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    #[arg(short, long, default_value_t = 10_000)]
    trials: u32,

    #[arg(long, default_value = keys::GOBLIN)]
    creature: String,

    #[arg(long)]
    content: Option<PathBuf>,
}

#[derive(Serialize)]
struct Outcome {
    observed: u32,
    observed_share: f64,
    expected_share: f64,
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
    let template: &CreatureTemplate = pack.creature(&args.creature)?;

    let spot = Pos::new(1, 1);
    let mut game = Game::new(args.seed, Map::new(3, 4), Pos::new(1, 2));
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for _ in 0..args.trials {
        let id = game.spawn_creature(&args.creature, template, spot)?;
        let item = game.resolve_death(id)?;
        *counts.entry(item.map_or(NON_ITEM, ItemKind::loot_key)).or_insert(0) += 1;
    }

    let trials = f64::from(args.trials.max(1));
    let report: BTreeMap<&str, Outcome> = expected_shares(&template.drops)
        .into_iter()
        .map(|(key, expected_share)| {
            let observed = counts.get(key).copied().unwrap_or(0);
            let outcome =
                Outcome { observed, observed_share: f64::from(observed) / trials, expected_share };
            (key, outcome)
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Share of deaths each bucket should receive. Every outcome that is not an
/// item kind lands in the non-item bucket. Weights are summed as `u64`, the
/// same width the drop roll uses.
fn expected_shares(drops: &BTreeMap<String, u32>) -> BTreeMap<&'static str, f64> {
    let mut buckets: BTreeMap<&'static str, u64> = BTreeMap::new();
    for (key, &weight) in drops {
        let bucket = ItemKind::from_loot_key(key).map_or(NON_ITEM, ItemKind::loot_key);
        *buckets.entry(bucket).or_insert(0) += u64::from(weight);
    }
    let total: u64 = buckets.values().sum();
    buckets
        .into_iter()
        .map(|(bucket, weight)| (bucket, weight as f64 / total.max(1) as f64))
        .collect()
}
