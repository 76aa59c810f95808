//! Coin thief that dives at the player.

use std::num::NonZeroU32;

use farm_defence_core::{ticks, EnemyKind, FixedTimer, Inventory, Position, SpriteKey, Target};
use log::debug;

use crate::{Bird, BirdContext, BirdState};

/// Ticks a magpie survives before giving up.
pub const MAGPIE_LIFESPAN: NonZeroU32 = ticks(10_000);
/// Speed while hunting.
pub const MAGPIE_SPEED: f64 = 1.0;
/// Speed after a successful theft.
pub const MAGPIE_RETREAT_SPEED: f64 = 2.0;
/// Coins taken per theft.
pub const MAGPIE_HAUL: i32 = 1;

/// Bird that steals a coin when it reaches its target.
///
/// A magpie only commits to the theft while the inventory actually holds a
/// coin; otherwise it keeps circling the player.
#[derive(Clone, Debug, PartialEq)]
pub struct Magpie {
    state: BirdState,
    coins: i32,
}

impl Magpie {
    /// Creates a magpie at `home` chasing `target`.
    #[must_use]
    pub fn new(home: Position, target: Target) -> Self {
        Self {
            state: BirdState::new(
                home,
                Some(target),
                FixedTimer::new(MAGPIE_LIFESPAN),
                MAGPIE_SPEED,
                SpriteKey::Down,
            ),
            coins: 0,
        }
    }

    /// Coins currently carried.
    #[must_use]
    pub const fn coins(&self) -> i32 {
        self.coins
    }
}

impl Bird for Magpie {
    fn kind(&self) -> EnemyKind {
        EnemyKind::Magpie
    }

    fn state(&self) -> &BirdState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BirdState {
        &mut self.state
    }

    fn retreat_speed(&self) -> f64 {
        MAGPIE_RETREAT_SPEED
    }

    fn steal(&mut self, ctx: &mut BirdContext<'_>) -> bool {
        if ctx.inventory.coins() <= 0 {
            return false;
        }
        ctx.inventory.add_coins(-MAGPIE_HAUL);
        self.coins += MAGPIE_HAUL;
        debug!("magpie stole {MAGPIE_HAUL} coin");
        true
    }

    fn return_loot(&mut self, inventory: &mut dyn Inventory) {
        if self.coins > 0 {
            inventory.add_coins(self.coins);
            debug!("magpie dropped {} coin", self.coins);
            self.coins = 0;
        }
    }
}
