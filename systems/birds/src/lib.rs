#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared attack/retreat state machine for every hostile bird.
//!
//! A bird starts out attacking. Each tick it ages, turns toward its tracked
//! target (or toward home once it stops attacking), moves, and then gives its
//! variant a chance to steal. A successful theft flips the bird into retreat
//! exactly once; a retreating bird that gets within a tile of home leaves the
//! simulation with its loot. Independently, a bird whose lifespan runs out is
//! removed on that tick and hands back anything it was carrying.
//!
//! Variants only supply the hooks on [`Bird`]; the transitions live in
//! [`advance`].

mod eagle;
mod magpie;
mod pigeon;

use std::fmt;

use farm_defence_core::{
    Actor, Countdown, Dimensions, EnemyKind, Farm, FixedTimer, Heading, Inventory, Position,
    SpriteKey, Target,
};
use log::{debug, trace};

pub use eagle::{Eagle, EAGLE_HAUL, EAGLE_LIFESPAN, EAGLE_RETREAT_SPEED, EAGLE_SPEED};
pub use magpie::{Magpie, MAGPIE_HAUL, MAGPIE_LIFESPAN, MAGPIE_RETREAT_SPEED, MAGPIE_SPEED};
pub use pigeon::{Pigeon, PIGEON_LIFESPAN, PIGEON_SPEED};

/// Collaborators a bird consults while ticking.
pub struct BirdContext<'a> {
    /// Session dimensions used for every proximity threshold.
    pub dimensions: Dimensions,
    /// Current location of the player.
    pub player: Position,
    /// Player resources that birds steal from.
    pub inventory: &'a mut dyn Inventory,
    /// Tile storage searched by cabbage thieves.
    pub farm: &'a mut dyn Farm,
}

impl BirdContext<'_> {
    /// Resolves a weak target to its current location.
    ///
    /// Returns `None` when the target no longer exists or is not something a
    /// bird can chase.
    #[must_use]
    pub fn resolve(&self, target: Target) -> Option<Position> {
        match target {
            Target::Player => Some(self.player),
            Target::Tile(tile) => self.farm.tile_position(tile),
            Target::Enemy(_) => None,
        }
    }
}

impl fmt::Debug for BirdContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BirdContext")
            .field("dimensions", &self.dimensions)
            .field("player", &self.player)
            .finish_non_exhaustive()
    }
}

/// State shared by every bird variant.
#[derive(Clone, Debug, PartialEq)]
pub struct BirdState {
    actor: Actor,
    home: Position,
    target: Option<Target>,
    attacking: bool,
    lifespan: FixedTimer,
}

impl BirdState {
    /// Creates an attacking bird at its home position.
    #[must_use]
    pub fn new(
        home: Position,
        target: Option<Target>,
        lifespan: FixedTimer,
        speed: f64,
        sprite: SpriteKey,
    ) -> Self {
        let mut actor = Actor::new(home, sprite);
        actor.set_speed(speed);
        Self {
            actor,
            home,
            target,
            attacking: true,
            lifespan,
        }
    }

    /// Movable state of the bird.
    #[must_use]
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Mutable access to the bird's movable state.
    pub fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    /// Spawn point the bird retreats to.
    #[must_use]
    pub const fn home(&self) -> Position {
        self.home
    }

    /// Target currently pursued, if any.
    #[must_use]
    pub const fn target(&self) -> Option<Target> {
        self.target
    }

    /// Replaces the pursued target.
    pub fn set_target(&mut self, target: Option<Target>) {
        self.target = target;
    }

    /// Whether the bird is still hunting.
    #[must_use]
    pub const fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// Ends the attack. Returns `true` only for the call that made the change.
    pub fn stop_attacking(&mut self) -> bool {
        let was_attacking = self.attacking;
        self.attacking = false;
        was_attacking
    }

    /// Countdown bounding the bird's lifetime.
    #[must_use]
    pub const fn lifespan(&self) -> &FixedTimer {
        &self.lifespan
    }

    /// Replaces the lifespan countdown.
    pub fn set_lifespan(&mut self, lifespan: FixedTimer) {
        self.lifespan = lifespan;
    }
}

/// Per-variant hooks plugged into the shared bird state machine.
pub trait Bird: fmt::Debug {
    /// Variant of the bird.
    fn kind(&self) -> EnemyKind;

    /// Shared state of the bird.
    fn state(&self) -> &BirdState;

    /// Mutable shared state of the bird.
    fn state_mut(&mut self) -> &mut BirdState;

    /// Speed adopted once a theft succeeds.
    fn retreat_speed(&self) -> f64;

    /// Runs after movement every tick so the bird can pick a new target.
    fn retarget(&mut self, _ctx: &mut BirdContext<'_>) {}

    /// Attempts a theft while within a tile of the target. Returns whether
    /// the bird got away with something.
    fn steal(&mut self, ctx: &mut BirdContext<'_>) -> bool;

    /// Hands carried loot back after the bird was removed before reaching
    /// home.
    fn return_loot(&mut self, inventory: &mut dyn Inventory);

    /// Advances the bird by one tick.
    fn tick(&mut self, ctx: &mut BirdContext<'_>) {
        advance(self, ctx);
    }

    /// Makes the bird give up its attack.
    fn scare(&mut self) {
        if self.state_mut().stop_attacking() {
            debug!("{:?} scared off", self.kind());
        }
    }

    /// Current location of the bird.
    fn position(&self) -> Position {
        self.state().actor().position()
    }

    /// Whether the bird awaits removal.
    fn is_marked_for_removal(&self) -> bool {
        self.state().actor().is_marked_for_removal()
    }
}

/// Runs one tick of the shared bird state machine.
pub fn advance<B>(bird: &mut B, ctx: &mut BirdContext<'_>)
where
    B: Bird + ?Sized,
{
    if bird.is_marked_for_removal() {
        return;
    }

    let tile_size = ctx.dimensions.tile_size();
    let kind = bird.kind();

    let state = bird.state_mut();
    state.lifespan.tick();
    if state.lifespan.is_finished() {
        state.actor.mark_for_removal();
        debug!("{kind:?} expired at {:?}", state.actor.position());
        bird.return_loot(ctx.inventory);
        return;
    }

    let state = bird.state_mut();
    let position = state.actor.position();
    if state.attacking {
        let destination = state
            .target
            .and_then(|target| ctx.resolve(target))
            .unwrap_or(state.home);
        state.actor.set_heading(Heading::toward(position, destination));
        state.actor.set_sprite(if destination.y() > position.y() {
            SpriteKey::Down
        } else {
            SpriteKey::Up
        });
    } else {
        state.actor.set_heading(Heading::toward(position, state.home));
        state.actor.set_sprite(if state.home.y() < position.y() {
            SpriteKey::Up
        } else {
            SpriteKey::Down
        });
    }
    state.actor.move_forward();
    trace!("{kind:?} moved to {:?}", state.actor.position());

    bird.retarget(ctx);

    let state = bird.state();
    if state.attacking {
        let within_reach = state
            .target
            .and_then(|target| ctx.resolve(target))
            .is_some_and(|target| state.actor.distance_to(target) < tile_size);
        if within_reach && bird.steal(ctx) {
            let speed = bird.retreat_speed();
            let state = bird.state_mut();
            let _ = state.stop_attacking();
            state.actor.set_speed(speed);
            debug!("{kind:?} made off toward {:?}", state.home);
        }
    }

    let state = bird.state_mut();
    if !state.attacking && state.actor.distance_to(state.home) < tile_size {
        state.actor.mark_for_removal();
        debug!("{kind:?} returned home");
    }
}
