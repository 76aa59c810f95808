//! Stationary deterrent for small birds.

use farm_defence_core::{Actor, Command, NpcKind, Position};
use log::debug;

use crate::{Npc, NpcContext};

/// Coins charged when the player buys a scarecrow.
pub const SCARECROW_COIN_COST: i32 = 2;
/// Scare radius measured in tiles.
pub const SCARE_RADIUS_TILES: i32 = 4;

/// Scarecrow that turns attacking magpies and pigeons away.
#[derive(Clone, Debug)]
pub struct Scarecrow {
    actor: Actor,
}

impl Scarecrow {
    /// Creates a scarecrow at `position`.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            actor: Actor::stationary(position),
        }
    }
}

impl Npc for Scarecrow {
    fn kind(&self) -> NpcKind {
        NpcKind::Scarecrow
    }

    fn actor(&self) -> &Actor {
        &self.actor
    }

    fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    fn interact(&mut self, ctx: &NpcContext<'_>, out: &mut Vec<Command>) {
        let radius = ctx.dimensions.tile_size() * SCARE_RADIUS_TILES;
        let position = self.actor.position();
        for enemy in ctx.enemies.live() {
            if enemy.attacking
                && enemy.kind.fears_scarecrows()
                && position.distance_to(enemy.position) < radius
            {
                debug!("scarecrow frightened enemy {}", enemy.id.get());
                out.push(Command::ScareEnemy { enemy: enemy.id });
            }
        }
    }
}
