//! Scenario files describing the starting state of a headless session.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use farm_defence_core::{Dimensions, EnemyKind, NpcKind, Position};
use farm_defence_system_spawning::{Config, Spawner};
use farm_defence_world::{Field, Ledger, World};
use log::warn;
use serde::Deserialize;

/// Starting state of a session.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    pub(crate) tile_size: i32,
    pub(crate) player: Position,
    pub(crate) coins: i32,
    pub(crate) food: i32,
    #[serde(default)]
    pub(crate) sprites: Option<String>,
    #[serde(default)]
    pub(crate) cabbages: Vec<Position>,
    #[serde(default)]
    pub(crate) spawners: Vec<SpawnerEntry>,
    #[serde(default)]
    pub(crate) hives: Vec<Position>,
    #[serde(default)]
    pub(crate) scarecrows: Vec<Position>,
    #[serde(default)]
    pub(crate) purchases: Vec<PurchaseEntry>,
}

/// Spawner declared by a scenario.
#[derive(Clone, Copy, Debug, Deserialize)]
pub(crate) struct SpawnerEntry {
    kind: EnemyKind,
    x: i32,
    y: i32,
    interval: u32,
}

/// NPC the player buys before the first frame.
#[derive(Clone, Copy, Debug, Deserialize)]
pub(crate) struct PurchaseEntry {
    kind: NpcKind,
    x: i32,
    y: i32,
}

/// Everything a session simulates.
#[derive(Debug)]
pub(crate) struct Session {
    pub(crate) world: World,
    pub(crate) ledger: Ledger,
    pub(crate) field: Field,
}

impl Scenario {
    /// Reads and parses a scenario file.
    pub(crate) fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario at {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid scenario {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let scenario: Self =
            toml::from_str(contents).context("failed to parse scenario toml contents")?;
        anyhow::ensure!(
            scenario.tile_size > 0,
            "tile_size must be positive, got {}",
            scenario.tile_size
        );
        Ok(scenario)
    }

    /// Builds the world and the player's holdings.
    ///
    /// Free placements go in first, then purchases are charged in order.
    /// Purchases the player cannot afford are skipped with a warning.
    pub(crate) fn build(&self) -> Result<Session> {
        let mut world = World::new(Dimensions::new(self.tile_size));
        let mut ledger = Ledger::new(self.coins, self.food);
        let mut field = Field::new();

        for cabbage in &self.cabbages {
            let _ = field.plant_cabbage(*cabbage);
        }
        for entry in &self.spawners {
            let position = Position::new(entry.x, entry.y);
            let config = Config::try_new(entry.kind, position, entry.interval)
                .with_context(|| format!("invalid {:?} spawner at {position:?}", entry.kind))?;
            world.add_spawner(Spawner::new(config));
        }
        for hive in &self.hives {
            let _ = world.add_npc(NpcKind::BeeHive, *hive);
        }
        for scarecrow in &self.scarecrows {
            let _ = world.add_npc(NpcKind::Scarecrow, *scarecrow);
        }
        for purchase in &self.purchases {
            let position = Position::new(purchase.x, purchase.y);
            if let Err(error) = world.purchase_npc(purchase.kind, position, &mut ledger) {
                warn!("skipping purchase at {position:?}: {error}");
            }
        }

        Ok(Session {
            world,
            ledger,
            field,
        })
    }
}
