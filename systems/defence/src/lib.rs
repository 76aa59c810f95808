#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Friendly NPC behaviours that protect the farm.
//!
//! NPCs never touch the enemy collection directly. They read an immutable
//! [`EnemyView`] and answer with [`Command`] values (release a bee, remove
//! an enemy, scare a bird) for the world to apply.

mod guard_bee;
mod hive;
mod scarecrow;

use std::fmt;

use farm_defence_core::{Actor, Command, Dimensions, EnemyView, NpcKind, RenderableSnapshot};

pub use guard_bee::{facing_for, GuardBee, GUARD_BEE_LIFESPAN, GUARD_BEE_SPEED};
pub use hive::{BeeHive, HIVE_COIN_COST, HIVE_DETECTION_DISTANCE, HIVE_FOOD_COST, HIVE_RELOAD};
pub use scarecrow::{Scarecrow, SCARECROW_COIN_COST, SCARE_RADIUS_TILES};

/// Read-only state an NPC consults during either pass.
#[derive(Clone, Copy, Debug)]
pub struct NpcContext<'a> {
    /// Session dimensions used for every proximity threshold.
    pub dimensions: Dimensions,
    /// Enemies as seen by the current pass.
    pub enemies: &'a EnemyView,
}

/// Behaviour shared by every friendly NPC.
pub trait Npc: fmt::Debug {
    /// Variant of the NPC.
    fn kind(&self) -> NpcKind;

    /// Movable state of the NPC.
    fn actor(&self) -> &Actor;

    /// Mutable movable state of the NPC.
    fn actor_mut(&mut self) -> &mut Actor;

    /// Movement pass. Plain NPCs just step along their heading.
    fn tick(&mut self, _ctx: &NpcContext<'_>, _out: &mut Vec<Command>) {
        self.actor_mut().move_forward();
    }

    /// Interaction pass, run after every movement pass of the frame.
    fn interact(&mut self, _ctx: &NpcContext<'_>, _out: &mut Vec<Command>) {}

    /// Whether the NPC awaits removal.
    fn is_marked_for_removal(&self) -> bool {
        self.actor().is_marked_for_removal()
    }

    /// Everything a renderer needs to draw the NPC.
    fn renderable(&self) -> RenderableSnapshot {
        RenderableSnapshot {
            position: self.actor().position(),
            art: self.kind().art(),
            sprite: self.actor().sprite(),
        }
    }
}
