//! Cabbage thief that raids the farm.

use std::num::NonZeroU32;

use farm_defence_core::{
    cabbage_tiles, nearest_tile, ticks, EnemyKind, FixedTimer, Inventory, Position, SpriteKey,
    Target,
};
use log::debug;

use crate::{Bird, BirdContext, BirdState};

/// Ticks a pigeon survives before giving up.
pub const PIGEON_LIFESPAN: NonZeroU32 = ticks(3_000);
/// Speed in both directions.
pub const PIGEON_SPEED: f64 = 1.0;

/// Bird that destroys the nearest cabbage.
///
/// The pigeon re-evaluates the closest cabbage every tick and abandons the
/// attack as soon as the farm has none left. The cabbage is destroyed on
/// contact rather than carried, so a pigeon never has loot to give back.
#[derive(Clone, Debug, PartialEq)]
pub struct Pigeon {
    state: BirdState,
}

impl Pigeon {
    /// Creates a pigeon at `home` chasing `target`.
    #[must_use]
    pub fn new(home: Position, target: Target) -> Self {
        Self {
            state: BirdState::new(
                home,
                Some(target),
                FixedTimer::new(PIGEON_LIFESPAN),
                PIGEON_SPEED,
                SpriteKey::Default,
            ),
        }
    }
}

impl Bird for Pigeon {
    fn kind(&self) -> EnemyKind {
        EnemyKind::Pigeon
    }

    fn state(&self) -> &BirdState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BirdState {
        &mut self.state
    }

    fn retreat_speed(&self) -> f64 {
        PIGEON_SPEED
    }

    fn retarget(&mut self, ctx: &mut BirdContext<'_>) {
        let tiles = cabbage_tiles(&*ctx.farm);
        match nearest_tile(self.position(), &tiles) {
            Some(tile) => self.state.set_target(Some(Target::Tile(tile.id))),
            None => {
                if self.state.stop_attacking() {
                    debug!("pigeon found no cabbages");
                }
            }
        }
    }

    fn steal(&mut self, ctx: &mut BirdContext<'_>) -> bool {
        let Some(Target::Tile(tile)) = self.state.target() else {
            return false;
        };
        if ctx.farm.remove_cabbage(tile) {
            debug!("pigeon ate the cabbage on tile {}", tile.get());
            true
        } else {
            false
        }
    }

    fn return_loot(&mut self, _inventory: &mut dyn Inventory) {}
}
