//! Homing projectile released by hives.

use std::num::NonZeroU32;

use farm_defence_core::{
    ticks, Actor, Command, Countdown, EnemyId, FixedTimer, Heading, NpcKind, Position, SpriteKey,
};
use log::debug;

use crate::{Npc, NpcContext};

/// World units covered per tick.
pub const GUARD_BEE_SPEED: f64 = 2.0;
/// Ticks a bee survives without hitting anything.
pub const GUARD_BEE_LIFESPAN: NonZeroU32 = ticks(300);

/// Picks the directional sprite for a heading.
#[must_use]
pub fn facing_for(heading: Heading) -> SpriteKey {
    match heading.normalized() {
        230..=309 => SpriteKey::Up,
        40..=139 => SpriteKey::Down,
        310..=359 | 0..=39 => SpriteKey::Right,
        _ => SpriteKey::Left,
    }
}

/// Bee that chases one enemy and stings the first enemy it touches.
///
/// Once its target is gone the bee flies back to where it was launched and
/// disappears there.
#[derive(Clone, Debug)]
pub struct GuardBee {
    actor: Actor,
    home: Position,
    target: Option<EnemyId>,
    lifespan: FixedTimer,
}

impl GuardBee {
    /// Creates a bee at `origin` chasing `target`.
    #[must_use]
    pub fn new(origin: Position, target: Option<EnemyId>) -> Self {
        let mut actor = Actor::new(origin, SpriteKey::Default);
        actor.set_speed(GUARD_BEE_SPEED);
        Self {
            actor,
            home: origin,
            target,
            lifespan: FixedTimer::new(GUARD_BEE_LIFESPAN),
        }
    }

    /// Enemy being chased.
    #[must_use]
    pub const fn target(&self) -> Option<EnemyId> {
        self.target
    }

    /// Countdown bounding the bee's lifetime.
    #[must_use]
    pub const fn lifespan(&self) -> &FixedTimer {
        &self.lifespan
    }

    /// Replaces the lifespan countdown.
    pub fn set_lifespan(&mut self, lifespan: FixedTimer) {
        self.lifespan = lifespan;
    }

    /// Where the bee is heading: its target, or home if the target is gone.
    #[must_use]
    pub fn destination(&self, ctx: &NpcContext<'_>) -> Position {
        self.target
            .and_then(|target| ctx.enemies.position_of(target))
            .unwrap_or(self.home)
    }
}

impl Npc for GuardBee {
    fn kind(&self) -> NpcKind {
        NpcKind::GuardBee
    }

    fn actor(&self) -> &Actor {
        &self.actor
    }

    fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    fn tick(&mut self, ctx: &NpcContext<'_>, out: &mut Vec<Command>) {
        if self.actor.is_marked_for_removal() {
            return;
        }

        let destination = self.destination(ctx);
        let position = self.actor.position();
        self.actor
            .set_heading(Heading::toward_off_axis(position, destination));
        self.actor.set_speed(GUARD_BEE_SPEED);

        if f64::from(self.actor.distance_to(destination)) <= GUARD_BEE_SPEED {
            self.actor.mark_for_removal();
            return;
        }

        let reach = ctx.dimensions.tile_size();
        if let Some(enemy) = ctx
            .enemies
            .live()
            .find(|enemy| position.distance_to(enemy.position) < reach)
        {
            debug!("bee stung enemy {}", enemy.id.get());
            out.push(Command::RemoveEnemy { enemy: enemy.id });
            self.actor.mark_for_removal();
            return;
        }

        self.actor.set_sprite(facing_for(self.actor.heading()));
        self.lifespan.tick();
        if self.lifespan.is_finished() {
            self.actor.mark_for_removal();
        }
        self.actor.move_forward();
    }
}
