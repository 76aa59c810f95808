#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Farm Defence scenario headless.

mod scenario;
mod sprites;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use farm_defence_core::{Inventory, Position};
use farm_defence_world::{query, Surroundings};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{scenario::Scenario, sprites::SpriteManifest};

const PLAYER_STEP: i32 = 2;
const DEFAULT_SCENARIO: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios/default.toml");

#[derive(Debug, Parser)]
#[command(name = "farm-defence", about = "Runs a Farm Defence scenario without a window")]
struct Args {
    /// Scenario file describing the farm, its defences and the spawners.
    #[arg(long, default_value = DEFAULT_SCENARIO)]
    scenario: PathBuf,
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 3_600)]
    frames: u64,
    /// Seed for the player's wandering.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Log a progress report every this many frames. Zero disables reports.
    #[arg(long, default_value_t = 600)]
    report_every: u64,
}

/// Entry point for the Farm Defence command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scenario = Scenario::from_path(&args.scenario)?;
    let catalog = match &scenario.sprites {
        Some(relative) => {
            let base = args.scenario.parent().map(PathBuf::from).unwrap_or_default();
            let manifest = SpriteManifest::from_path(base.join(relative))?;
            info!("loaded {} sprites", manifest.len());
            Some(manifest)
        }
        None => None,
    };

    let mut session = scenario.build()?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut player = scenario.player;

    for frame in 1..=args.frames {
        player = wander(player, &mut rng);
        let mut surroundings = Surroundings {
            player,
            inventory: &mut session.ledger,
            farm: &mut session.field,
        };
        session.world.frame(&mut surroundings);

        if let Some(catalog) = &catalog {
            let missing = session
                .world
                .render()
                .iter()
                .filter(|renderable| renderable.resolve(catalog).is_none())
                .count();
            if missing > 0 {
                debug!("frame {frame}: {missing} entities have no sprite");
            }
        }

        if args.report_every > 0 && frame % args.report_every == 0 {
            info!(
                "frame {frame}: coins {} food {} cabbages {} enemies {} npcs {}",
                session.ledger.coins(),
                session.ledger.food(),
                session.field.cabbage_count(),
                query::enemy_view(&session.world).live().count(),
                query::npcs(&session.world).len(),
            );
        }
    }

    println!(
        "after {} frames: {} coins, {} food, {} cabbages left",
        query::frame_index(&session.world),
        session.ledger.coins(),
        session.ledger.food(),
        session.field.cabbage_count(),
    );
    Ok(())
}

fn wander(player: Position, rng: &mut impl Rng) -> Position {
    let dx = rng.gen_range(-PLAYER_STEP..=PLAYER_STEP);
    let dy = rng.gen_range(-PLAYER_STEP..=PLAYER_STEP);
    player.offset(dx, dy)
}
