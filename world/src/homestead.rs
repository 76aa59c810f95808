//! Reference player resources and farm tiles.
//!
//! The surrounding game normally owns both; these are enough to drive the
//! simulation headless and in tests.

use farm_defence_core::{Farm, Inventory, Position, TileId, TileSnapshot};
use log::debug;

/// Coin and food balances of the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    coins: i32,
    food: i32,
}

impl Ledger {
    /// Creates a ledger holding the provided balances.
    #[must_use]
    pub const fn new(coins: i32, food: i32) -> Self {
        Self { coins, food }
    }
}

impl Inventory for Ledger {
    fn coins(&self) -> i32 {
        self.coins
    }

    fn add_coins(&mut self, delta: i32) {
        self.coins += delta;
    }

    fn food(&self) -> i32 {
        self.food
    }

    fn add_food(&mut self, delta: i32) {
        self.food += delta;
    }
}

/// Grid of farm tiles, some of which grow cabbages.
#[derive(Clone, Debug, Default)]
pub struct Field {
    tiles: Vec<TileSnapshot>,
}

impl Field {
    /// Creates a field without tiles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bare tile at `position`.
    pub fn add_tile(&mut self, position: Position) -> TileId {
        let id = TileId::new(self.tiles.len() as u32);
        self.tiles.push(TileSnapshot {
            id,
            position,
            has_cabbage: false,
        });
        id
    }

    /// Adds a tile at `position` with a cabbage already growing.
    pub fn plant_cabbage(&mut self, position: Position) -> TileId {
        let id = self.add_tile(position);
        self.tiles[id.get() as usize].has_cabbage = true;
        id
    }

    /// Whether a cabbage grows on `tile`.
    #[must_use]
    pub fn has_cabbage(&self, tile: TileId) -> bool {
        self.tile(tile).is_some_and(|tile| tile.has_cabbage)
    }

    /// Number of cabbages left in the field.
    #[must_use]
    pub fn cabbage_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.has_cabbage).count()
    }

    fn tile(&self, tile: TileId) -> Option<&TileSnapshot> {
        self.tiles.get(tile.get() as usize)
    }
}

impl Farm for Field {
    fn select_tiles(&self, predicate: &dyn Fn(&TileSnapshot) -> bool) -> Vec<TileSnapshot> {
        self.tiles
            .iter()
            .filter(|tile| predicate(tile))
            .copied()
            .collect()
    }

    fn tile_position(&self, tile: TileId) -> Option<Position> {
        self.tile(tile).map(|tile| tile.position)
    }

    fn remove_cabbage(&mut self, tile: TileId) -> bool {
        match self.tiles.get_mut(tile.get() as usize) {
            Some(entry) if entry.has_cabbage => {
                entry.has_cabbage = false;
                debug!("cabbage on tile {} was eaten", tile.get());
                true
            }
            _ => false,
        }
    }
}
