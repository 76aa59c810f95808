//! Food thief that raids the player once per flight.

use std::num::NonZeroU32;

use farm_defence_core::{ticks, EnemyKind, FixedTimer, Inventory, Position, SpriteKey, Target};
use log::debug;

use crate::{Bird, BirdContext, BirdState};

/// Ticks an eagle survives before giving up.
pub const EAGLE_LIFESPAN: NonZeroU32 = ticks(5_000);
/// Speed while hunting.
pub const EAGLE_SPEED: f64 = 2.0;
/// Speed after a successful theft.
pub const EAGLE_RETREAT_SPEED: f64 = 4.0;
/// Food taken per theft.
pub const EAGLE_HAUL: i32 = 3;

/// Bird that snatches food when it reaches its target.
///
/// The raid always succeeds, even against an empty larder.
#[derive(Clone, Debug, PartialEq)]
pub struct Eagle {
    state: BirdState,
    food: i32,
}

impl Eagle {
    /// Creates an eagle at `home` chasing `target`.
    #[must_use]
    pub fn new(home: Position, target: Target) -> Self {
        Self {
            state: BirdState::new(
                home,
                Some(target),
                FixedTimer::new(EAGLE_LIFESPAN),
                EAGLE_SPEED,
                SpriteKey::Default,
            ),
            food: 0,
        }
    }

    /// Food currently carried.
    #[must_use]
    pub const fn food(&self) -> i32 {
        self.food
    }
}

impl Bird for Eagle {
    fn kind(&self) -> EnemyKind {
        EnemyKind::Eagle
    }

    fn state(&self) -> &BirdState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BirdState {
        &mut self.state
    }

    fn retreat_speed(&self) -> f64 {
        EAGLE_RETREAT_SPEED
    }

    fn steal(&mut self, ctx: &mut BirdContext<'_>) -> bool {
        if self.food == 0 {
            ctx.inventory.add_food(-EAGLE_HAUL);
            self.food = EAGLE_HAUL;
            debug!("eagle stole {EAGLE_HAUL} food");
        }
        true
    }

    fn return_loot(&mut self, inventory: &mut dyn Inventory) {
        if self.food > 0 {
            inventory.add_food(self.food);
            debug!("eagle dropped {} food", self.food);
            self.food = 0;
        }
    }
}
