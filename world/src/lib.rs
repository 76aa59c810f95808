#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Farm Defence.
//!
//! The world owns the enemy and NPC collections and drives one frame as a
//! movement pass followed by an interaction pass. Player resources and farm
//! tiles stay with the caller and are lent to the world for each tick.

mod enemies;
mod homestead;
mod npcs;

use farm_defence_core::{
    Command, Dimensions, EnemyId, EnemyKind, Farm, Inventory, NpcId, NpcKind, Position,
    RenderableSnapshot, Target,
};
use farm_defence_system_birds::BirdContext;
use farm_defence_system_defence::{
    BeeHive, GuardBee, Npc, Scarecrow, HIVE_COIN_COST, HIVE_FOOD_COST, SCARECROW_COIN_COST,
};
use farm_defence_system_spawning::Spawner;
use log::debug;
use thiserror::Error;

pub use enemies::EnemyManager;
pub use homestead::{Field, Ledger};
pub use npcs::NpcManager;

/// Reasons a purchase can be refused.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    /// The player cannot afford the coin cost.
    #[error("{kind:?} costs {required} coins but only {available} are available")]
    InsufficientCoins {
        /// NPC that was requested.
        kind: NpcKind,
        /// Coins the NPC costs.
        required: i32,
        /// Coins the player holds.
        available: i32,
    },
    /// The player cannot afford the food cost.
    #[error("{kind:?} costs {required} food but only {available} is available")]
    InsufficientFood {
        /// NPC that was requested.
        kind: NpcKind,
        /// Food the NPC costs.
        required: i32,
        /// Food the player holds.
        available: i32,
    },
    /// The NPC cannot be bought directly.
    #[error("{0:?} cannot be purchased")]
    NotForSale(NpcKind),
}

/// Coin and food price of an NPC, if it can be bought.
#[must_use]
pub const fn price(kind: NpcKind) -> Option<(i32, i32)> {
    match kind {
        NpcKind::BeeHive => Some((HIVE_COIN_COST, HIVE_FOOD_COST)),
        NpcKind::Scarecrow => Some((SCARECROW_COIN_COST, 0)),
        NpcKind::GuardBee => None,
    }
}

/// Caller-owned state lent to the world for the movement pass.
pub struct Surroundings<'a> {
    /// Current location of the player.
    pub player: Position,
    /// Player resources.
    pub inventory: &'a mut dyn Inventory,
    /// Farm tiles.
    pub farm: &'a mut dyn Farm,
}

/// Represents the authoritative Farm Defence world state.
#[derive(Debug)]
pub struct World {
    dimensions: Dimensions,
    enemies: EnemyManager,
    npcs: NpcManager,
    frame_index: u64,
}

impl World {
    /// Creates an empty world using the provided tile dimensions.
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            enemies: EnemyManager::new(),
            npcs: NpcManager::new(),
            frame_index: 0,
        }
    }

    /// Registers a spawner.
    pub fn add_spawner(&mut self, spawner: Spawner) {
        self.enemies.add_spawner(spawner);
    }

    /// Places an enemy directly, bypassing the spawners.
    pub fn add_enemy(&mut self, kind: EnemyKind, position: Position, target: Target) -> EnemyId {
        self.enemies.spawn(kind, position, target)
    }

    /// Places an NPC without charging for it.
    ///
    /// A guard bee placed this way has no target and heads straight back to
    /// `position`.
    pub fn add_npc(&mut self, kind: NpcKind, position: Position) -> NpcId {
        let npc: Box<dyn Npc> = match kind {
            NpcKind::BeeHive => Box::new(BeeHive::new(position)),
            NpcKind::Scarecrow => Box::new(Scarecrow::new(position)),
            NpcKind::GuardBee => Box::new(GuardBee::new(position, None)),
        };
        self.npcs.add_npc(npc)
    }

    /// Charges the player and places an NPC.
    ///
    /// Nothing is charged when the purchase is refused.
    pub fn purchase_npc(
        &mut self,
        kind: NpcKind,
        position: Position,
        inventory: &mut dyn Inventory,
    ) -> Result<NpcId, PlacementError> {
        let (coins, food) = price(kind).ok_or(PlacementError::NotForSale(kind))?;
        if inventory.coins() < coins {
            return Err(PlacementError::InsufficientCoins {
                kind,
                required: coins,
                available: inventory.coins(),
            });
        }
        if inventory.food() < food {
            return Err(PlacementError::InsufficientFood {
                kind,
                required: food,
                available: inventory.food(),
            });
        }
        inventory.add_coins(-coins);
        inventory.add_food(-food);
        let id = self.add_npc(kind, position);
        debug!("bought {kind:?} {} at {position:?}", id.get());
        Ok(id)
    }

    /// Movement pass: enemies first, then NPCs.
    pub fn tick(&mut self, surroundings: &mut Surroundings<'_>) {
        let mut ctx = BirdContext {
            dimensions: self.dimensions,
            player: surroundings.player,
            inventory: &mut *surroundings.inventory,
            farm: &mut *surroundings.farm,
        };
        self.enemies.tick(&mut ctx);
        self.npcs.tick(self.dimensions, &mut self.enemies);
    }

    /// Interaction pass: NPCs first, then enemies.
    pub fn interact(&mut self) {
        self.npcs.interact(self.dimensions, &mut self.enemies);
        self.enemies.interact();
    }

    /// Runs one full frame.
    pub fn frame(&mut self, surroundings: &mut Surroundings<'_>) {
        self.tick(surroundings);
        self.interact();
        self.frame_index = self.frame_index.saturating_add(1);
    }

    /// Everything that should be drawn this frame, enemies before NPCs.
    ///
    /// The returned collection is a fresh copy.
    #[must_use]
    pub fn render(&self) -> Vec<RenderableSnapshot> {
        let mut renderables = self.enemies.render();
        renderables.extend(self.npcs.render());
        renderables
    }
}

/// Applies the provided command to whichever collection it targets.
pub fn apply(world: &mut World, command: Command) {
    match command {
        Command::SpawnGuardBee { .. } => world.npcs.apply(command),
        _ => world.enemies.apply(command),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use farm_defence_core::{Dimensions, EnemyView};

    use super::{EnemyManager, NpcManager, World};

    /// Tile dimensions of the session.
    #[must_use]
    pub fn dimensions(world: &World) -> Dimensions {
        world.dimensions
    }

    /// Number of frames completed so far.
    #[must_use]
    pub fn frame_index(world: &World) -> u64 {
        world.frame_index
    }

    /// Provides read-only access to the enemy collection.
    #[must_use]
    pub fn enemies(world: &World) -> &EnemyManager {
        &world.enemies
    }

    /// Provides read-only access to the NPC collection.
    #[must_use]
    pub fn npcs(world: &World) -> &NpcManager {
        &world.npcs
    }

    /// Captures a read-only view of every enemy.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        world.enemies.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::new(Dimensions::new(32))
    }

    #[test]
    fn purchase_charges_hive_costs() {
        let mut world = world();
        let mut ledger = Ledger::new(5, 3);

        let id = world
            .purchase_npc(NpcKind::BeeHive, Position::new(64, 64), &mut ledger)
            .expect("hive is affordable");

        assert_eq!((ledger.coins(), ledger.food()), (3, 1));
        assert_eq!(
            query::npcs(&world).get(id).map(|npc| npc.kind()),
            Some(NpcKind::BeeHive)
        );
    }

    #[test]
    fn refused_purchase_charges_nothing() {
        let mut world = world();
        let mut ledger = Ledger::new(5, 1);

        let error = world
            .purchase_npc(NpcKind::BeeHive, Position::new(0, 0), &mut ledger)
            .expect_err("not enough food");

        assert_eq!(
            error,
            PlacementError::InsufficientFood {
                kind: NpcKind::BeeHive,
                required: 2,
                available: 1,
            }
        );
        assert_eq!((ledger.coins(), ledger.food()), (5, 1));
        assert!(query::npcs(&world).is_empty());
    }

    #[test]
    fn scarecrow_costs_only_coins() {
        let mut world = world();
        let mut ledger = Ledger::new(2, 0);

        let _ = world
            .purchase_npc(NpcKind::Scarecrow, Position::new(0, 0), &mut ledger)
            .expect("scarecrow is affordable");

        assert_eq!((ledger.coins(), ledger.food()), (0, 0));
        assert_eq!(
            world.purchase_npc(NpcKind::Scarecrow, Position::new(0, 0), &mut ledger),
            Err(PlacementError::InsufficientCoins {
                kind: NpcKind::Scarecrow,
                required: 2,
                available: 0,
            })
        );
    }

    #[test]
    fn guard_bees_are_not_for_sale() {
        let mut world = world();
        let mut ledger = Ledger::new(100, 100);
        assert_eq!(
            world.purchase_npc(NpcKind::GuardBee, Position::new(0, 0), &mut ledger),
            Err(PlacementError::NotForSale(NpcKind::GuardBee))
        );
    }

    #[test]
    fn apply_routes_commands_to_their_collection() {
        let mut world = world();
        apply(
            &mut world,
            Command::SpawnEnemy {
                kind: EnemyKind::Eagle,
                position: Position::new(0, 0),
                target: Target::Player,
            },
        );
        let enemy = query::enemy_view(&world)
            .iter()
            .map(|snapshot| snapshot.id)
            .next()
            .expect("eagle spawned");
        apply(
            &mut world,
            Command::SpawnGuardBee {
                origin: Position::new(100, 0),
                target: enemy,
            },
        );

        assert_eq!(query::enemies(&world).len(), 1);
        assert_eq!(query::npcs(&world).len(), 1);
    }

    #[test]
    fn frames_are_counted() {
        let mut world = world();
        let mut ledger = Ledger::new(0, 0);
        let mut field = Field::new();
        let mut surroundings = Surroundings {
            player: Position::new(0, 0),
            inventory: &mut ledger,
            farm: &mut field,
        };
        world.frame(&mut surroundings);
        world.frame(&mut surroundings);
        assert_eq!(query::frame_index(&world), 2);
    }
}
