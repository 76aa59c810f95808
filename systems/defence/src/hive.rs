//! Stationary hive that launches guard bees at nearby enemies.

use std::num::NonZeroU32;

use farm_defence_core::{
    ticks, Actor, Command, Countdown, EnemyView, NpcKind, Position, RepeatingTimer,
};
use log::debug;

use crate::{Npc, NpcContext};

/// Enemies closer than this many world units trigger a launch.
pub const HIVE_DETECTION_DISTANCE: i32 = 350;
/// Frames between reloads.
///
/// The countdown only advances in the interaction pass, so it moves once per
/// frame and the movement pass leaves it untouched.
pub const HIVE_RELOAD: NonZeroU32 = ticks(240);
/// Coins charged when the player buys a hive.
pub const HIVE_COIN_COST: i32 = 2;
/// Food charged when the player buys a hive.
pub const HIVE_FOOD_COST: i32 = 2;

/// Hive that holds at most one bee and reloads on a fixed cadence.
#[derive(Clone, Debug)]
pub struct BeeHive {
    actor: Actor,
    loaded: bool,
    reload: RepeatingTimer,
}

impl BeeHive {
    /// Creates a loaded hive at `position`.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            actor: Actor::stationary(position),
            loaded: true,
            reload: RepeatingTimer::new(HIVE_RELOAD),
        }
    }

    /// Whether a bee is ready to launch.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Launches a bee at the first live enemy in range, if loaded.
    ///
    /// Candidates are considered in collection order, so the first match wins
    /// even when a later enemy is closer.
    pub fn release(&mut self, enemies: &EnemyView) -> Option<Command> {
        if !self.loaded {
            return None;
        }
        let position = self.actor.position();
        let enemy = enemies
            .live()
            .find(|enemy| position.distance_to(enemy.position) < HIVE_DETECTION_DISTANCE)?;
        self.loaded = false;
        debug!("hive at {position:?} launched a bee at enemy {}", enemy.id.get());
        Some(Command::SpawnGuardBee {
            origin: position,
            target: enemy.id,
        })
    }
}

impl Npc for BeeHive {
    fn kind(&self) -> NpcKind {
        NpcKind::BeeHive
    }

    fn actor(&self) -> &Actor {
        &self.actor
    }

    fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    fn interact(&mut self, ctx: &NpcContext<'_>, out: &mut Vec<Command>) {
        self.reload.tick();
        if let Some(command) = self.release(ctx.enemies) {
            out.push(command);
        }
        if self.reload.is_finished() {
            self.loaded = true;
        }
    }
}
