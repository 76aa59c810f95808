#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Timer-driven spawning system responsible for emitting enemy spawn commands.

use std::num::NonZeroU32;

use farm_defence_core::{
    cabbage_tiles, nearest_tile, Command, Countdown, EnemyKind, Farm, Position, RepeatingTimer,
    Target, TimerError,
};
use log::{debug, trace};

/// Configuration parameters required to construct a spawner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    kind: EnemyKind,
    position: Position,
    interval: NonZeroU32,
}

impl Config {
    /// Creates a configuration spawning `kind` at `position` every `interval` ticks.
    #[must_use]
    pub const fn new(kind: EnemyKind, position: Position, interval: NonZeroU32) -> Self {
        Self {
            kind,
            position,
            interval,
        }
    }

    /// Creates a configuration from a runtime interval, rejecting zero.
    pub fn try_new(kind: EnemyKind, position: Position, interval: u32) -> Result<Self, TimerError> {
        let interval = NonZeroU32::new(interval).ok_or(TimerError::ZeroDuration)?;
        Ok(Self::new(kind, position, interval))
    }
}

/// Fixed point in the world that periodically releases one enemy.
///
/// A spawner never owns what it creates: it only emits
/// [`Command::SpawnEnemy`] and the enemy collection takes it from there.
#[derive(Clone, Debug)]
pub struct Spawner {
    kind: EnemyKind,
    position: Position,
    timer: RepeatingTimer,
}

impl Spawner {
    /// Creates a new spawner using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            kind: config.kind,
            position: config.position,
            timer: RepeatingTimer::new(config.interval),
        }
    }

    /// Variant of enemy released by the spawner.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Location enemies are released at.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Countdown gating the next release.
    #[must_use]
    pub const fn timer(&self) -> &RepeatingTimer {
        &self.timer
    }

    /// Advances the spawner by one tick and emits a spawn command when due.
    ///
    /// Pigeons need a cabbage to aim at. When the farm has none, the cycle is
    /// spent without a spawn and nothing is carried over to the next one.
    pub fn handle(&mut self, farm: &dyn Farm, out: &mut Vec<Command>) {
        self.timer.tick();

        let target = match self.kind {
            EnemyKind::Magpie | EnemyKind::Eagle => Target::Player,
            EnemyKind::Pigeon => {
                let tiles = cabbage_tiles(farm);
                match nearest_tile(self.position, &tiles) {
                    Some(tile) => Target::Tile(tile.id),
                    None => {
                        trace!("pigeon spawner at {:?} sees no cabbages", self.position);
                        return;
                    }
                }
            }
        };

        if !self.timer.is_finished() {
            return;
        }

        debug!("spawning {:?} at {:?}", self.kind, self.position);
        out.push(Command::SpawnEnemy {
            kind: self.kind,
            position: self.position,
            target,
        });
    }
}
