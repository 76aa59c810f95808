#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Farm Defence simulation.
//!
//! This crate defines the vocabulary that connects the authoritative world,
//! the pure behaviour systems, and the outer game. Systems read immutable
//! snapshots such as [`EnemyView`], mutate only the actors they own, and
//! express every effect on another collection as a [`Command`] that the world
//! applies. Everything the simulation needs from the surrounding game is
//! reached through the [`Inventory`], [`Farm`] and [`SpriteCatalog`] traits.

pub mod timer;

use serde::{Deserialize, Serialize};

pub use timer::{ticks, Countdown, FixedTimer, RepeatingTimer, TimerError};

/// Integer location of an entity expressed in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a position from world coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate. Larger values lie further down the screen.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Euclidean distance to `other`, truncated to whole world units.
    #[must_use]
    pub fn distance_to(self, other: Position) -> i32 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        (dx * dx + dy * dy).sqrt() as i32
    }

    /// Returns the position shifted by the provided displacement.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Session-wide dimensions every proximity threshold is derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    tile_size: i32,
}

impl Dimensions {
    /// Creates dimensions using the provided tile size in world units.
    #[must_use]
    pub const fn new(tile_size: i32) -> Self {
        Self { tile_size }
    }

    /// Side length of a single tile in world units.
    #[must_use]
    pub const fn tile_size(&self) -> i32 {
        self.tile_size
    }
}

/// Direction of travel measured in whole degrees.
///
/// Zero points along positive x and angles grow clockwise on screen, because
/// y grows downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Heading(i32);

impl Heading {
    /// Creates a heading from raw degrees.
    #[must_use]
    pub const fn from_degrees(degrees: i32) -> Self {
        Self(degrees)
    }

    /// Raw degrees as stored.
    #[must_use]
    pub const fn degrees(&self) -> i32 {
        self.0
    }

    /// Degrees wrapped into `[0, 360)`.
    #[must_use]
    pub const fn normalized(&self) -> i32 {
        self.0.rem_euclid(360)
    }

    /// Heading pointing from `from` toward `to`, truncated to whole degrees.
    #[must_use]
    pub fn toward(from: Position, to: Position) -> Self {
        Self(raw_angle(from, to) as i32)
    }

    /// Like [`Heading::toward`], but nudges exact multiples of 90 degrees by
    /// one degree so the result never sits on a quadrant boundary.
    #[must_use]
    pub fn toward_off_axis(from: Position, to: Position) -> Self {
        let angle = raw_angle(from, to);
        if angle % 90.0 == 0.0 {
            Self(angle as i32 + 1)
        } else {
            Self(angle as i32)
        }
    }

    fn radians(self) -> f64 {
        f64::from(self.0).to_radians()
    }
}

fn raw_angle(from: Position, to: Position) -> f64 {
    let dx = f64::from(to.x()) - f64::from(from.x());
    let dy = f64::from(to.y()) - f64::from(from.y());
    dy.atan2(dx).to_degrees()
}

/// Sprite identifiers understood by every art group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpriteKey {
    /// Neutral pose.
    Default,
    /// Facing toward the top of the screen.
    Up,
    /// Facing toward the bottom of the screen.
    Down,
    /// Facing toward decreasing x.
    Left,
    /// Facing toward increasing x.
    Right,
}

impl SpriteKey {
    /// Catalog key used by sprite collaborators.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Groups of art that entities select their sprites from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtGroup {
    /// Coin-stealing bird.
    Magpie,
    /// Food-stealing bird.
    Eagle,
    /// Cabbage-stealing bird.
    Pigeon,
    /// Guard bee released by hives.
    Bee,
    /// Stationary bee hive.
    Hive,
    /// Stationary scarecrow.
    Scarecrow,
}

impl ArtGroup {
    /// Catalog name of the art group.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Magpie => "magpie",
            Self::Eagle => "eagle",
            Self::Pigeon => "pigeon",
            Self::Bee => "bee",
            Self::Hive => "hive",
            Self::Scarecrow => "scarecrow",
        }
    }
}

/// Positioned, movable and removable state shared by every simulated actor.
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    position: Position,
    heading: Heading,
    speed: f64,
    sprite: SpriteKey,
    removed: bool,
}

impl Actor {
    /// Creates an actor at `position` facing east with unit speed.
    #[must_use]
    pub const fn new(position: Position, sprite: SpriteKey) -> Self {
        Self {
            position,
            heading: Heading::from_degrees(0),
            speed: 1.0,
            sprite,
            removed: false,
        }
    }

    /// Creates an actor that never moves.
    #[must_use]
    pub const fn stationary(position: Position) -> Self {
        Self {
            position,
            heading: Heading::from_degrees(0),
            speed: 0.0,
            sprite: SpriteKey::Default,
            removed: false,
        }
    }

    /// Current location of the actor.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Places the actor at a new location.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Current direction of travel.
    #[must_use]
    pub const fn heading(&self) -> Heading {
        self.heading
    }

    /// Updates the direction of travel.
    pub fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    /// World units covered per tick.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Updates the speed, clamping negative values to zero.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.max(0.0);
    }

    /// Sprite currently selected from the actor's art group.
    #[must_use]
    pub const fn sprite(&self) -> SpriteKey {
        self.sprite
    }

    /// Selects a different sprite.
    pub fn set_sprite(&mut self, sprite: SpriteKey) {
        self.sprite = sprite;
    }

    /// Truncated distance between the actor and `other`.
    #[must_use]
    pub fn distance_to(&self, other: Position) -> i32 {
        self.position.distance_to(other)
    }

    /// Advances one tick along the current heading at the current speed.
    pub fn move_forward(&mut self) {
        let radians = self.heading.radians();
        let dx = (radians.cos() * self.speed).round() as i32;
        let dy = (radians.sin() * self.speed).round() as i32;
        self.position = self.position.offset(dx, dy);
    }

    /// Flags the actor for removal during the next cleanup sweep.
    pub fn mark_for_removal(&mut self) {
        self.removed = true;
    }

    /// Reports whether the actor awaits removal.
    #[must_use]
    pub const fn is_marked_for_removal(&self) -> bool {
        self.removed
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a friendly or neutral NPC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NpcId(u32);

impl NpcId {
    /// Creates a new NPC identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a tile owned by the [`Farm`] collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(u32);

impl TileId {
    /// Creates a new tile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Hostile bird variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    /// Steals a coin from the player.
    Magpie,
    /// Steals food from the player.
    Eagle,
    /// Steals cabbages from the farm.
    Pigeon,
}

impl EnemyKind {
    /// Art group used to draw the enemy.
    #[must_use]
    pub const fn art(self) -> ArtGroup {
        match self {
            Self::Magpie => ArtGroup::Magpie,
            Self::Eagle => ArtGroup::Eagle,
            Self::Pigeon => ArtGroup::Pigeon,
        }
    }

    /// Reports whether a scarecrow frightens this kind of bird.
    #[must_use]
    pub const fn fears_scarecrows(self) -> bool {
        matches!(self, Self::Magpie | Self::Pigeon)
    }
}

/// Friendly or neutral NPC variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NpcKind {
    /// Stationary hive that releases guard bees.
    BeeHive,
    /// Short-lived projectile bee.
    GuardBee,
    /// Stationary bird deterrent.
    Scarecrow,
}

impl NpcKind {
    /// Art group used to draw the NPC.
    #[must_use]
    pub const fn art(self) -> ArtGroup {
        match self {
            Self::BeeHive => ArtGroup::Hive,
            Self::GuardBee => ArtGroup::Bee,
            Self::Scarecrow => ArtGroup::Scarecrow,
        }
    }
}

/// Weak reference to something an actor pursues.
///
/// Targets are resolved against their authoritative owner every tick and may
/// have disappeared in the meantime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// The player character.
    Player,
    /// A tile in the farm.
    Tile(TileId),
    /// An enemy in the enemy collection.
    Enemy(EnemyId),
}

/// Mutations one collection requests from another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests creation of one enemy.
    SpawnEnemy {
        /// Variant to create.
        kind: EnemyKind,
        /// Spawn point, which is also the enemy's home.
        position: Position,
        /// What the enemy should pursue.
        target: Target,
    },
    /// Requests creation of a guard bee.
    SpawnGuardBee {
        /// Launch point, which is also the bee's fallback destination.
        origin: Position,
        /// Enemy the bee should chase.
        target: EnemyId,
    },
    /// Requests that an enemy be flagged for removal.
    RemoveEnemy {
        /// Enemy to remove.
        enemy: EnemyId,
    },
    /// Requests that a bird abandon its attack.
    ScareEnemy {
        /// Enemy to frighten.
        enemy: EnemyId,
    },
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Variant of the enemy.
    pub kind: EnemyKind,
    /// Location at the time of capture.
    pub position: Position,
    /// Whether the enemy is still attacking.
    pub attacking: bool,
    /// Whether the enemy awaits removal.
    pub removed: bool,
}

/// Read-only snapshot describing all enemies in collection order.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over every captured enemy, including removed ones.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Iterator over enemies that are not awaiting removal.
    pub fn live(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter().filter(|snapshot| !snapshot.removed)
    }

    /// Looks up the captured position of an enemy.
    #[must_use]
    pub fn position_of(&self, id: EnemyId) -> Option<Position> {
        self.find(id).map(|snapshot| snapshot.position)
    }

    /// Records a removal that was applied after the view was captured.
    pub fn mark_removed(&mut self, id: EnemyId) {
        if let Ok(index) = self.snapshots.binary_search_by_key(&id, |s| s.id) {
            self.snapshots[index].removed = true;
        }
    }

    /// Number of captured enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    fn find(&self, id: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }
}

/// Everything a renderer needs to draw one entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderableSnapshot {
    /// Location of the entity.
    pub position: Position,
    /// Art group the sprite is drawn from.
    pub art: ArtGroup,
    /// Sprite selected within the art group.
    pub sprite: SpriteKey,
}

impl RenderableSnapshot {
    /// Resolves the snapshot's sprite through the provided catalog.
    #[must_use]
    pub fn resolve<'c, C>(&self, catalog: &'c C) -> Option<&'c C::Handle>
    where
        C: SpriteCatalog + ?Sized,
    {
        catalog.sprite(self.art, self.sprite)
    }
}

/// Read-only lookup of opaque sprite handles.
pub trait SpriteCatalog {
    /// Handle type the renderer understands.
    type Handle;

    /// Returns the sprite registered for the art group and key, if any.
    fn sprite(&self, art: ArtGroup, key: SpriteKey) -> Option<&Self::Handle>;
}

/// Player resources that birds steal from.
pub trait Inventory {
    /// Coins currently held.
    fn coins(&self) -> i32;

    /// Adds `delta` coins. Negative values remove coins.
    fn add_coins(&mut self, delta: i32);

    /// Food currently held.
    fn food(&self) -> i32;

    /// Adds `delta` food. Negative values remove food.
    fn add_food(&mut self, delta: i32);
}

/// Immutable description of a farm tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSnapshot {
    /// Identifier of the tile.
    pub id: TileId,
    /// Location of the tile.
    pub position: Position,
    /// Whether a cabbage currently grows on the tile.
    pub has_cabbage: bool,
}

/// Tile storage owned by the surrounding game.
pub trait Farm {
    /// Returns every tile matching `predicate`, in storage order.
    fn select_tiles(&self, predicate: &dyn Fn(&TileSnapshot) -> bool) -> Vec<TileSnapshot>;

    /// Looks up the location of a tile.
    fn tile_position(&self, tile: TileId) -> Option<Position>;

    /// Flags the cabbage on `tile` for removal. Returns whether one was found.
    fn remove_cabbage(&mut self, tile: TileId) -> bool;
}

/// Lists the tiles a pigeon could steal from.
#[must_use]
pub fn cabbage_tiles(farm: &dyn Farm) -> Vec<TileSnapshot> {
    farm.select_tiles(&|tile| tile.has_cabbage)
}

/// Picks the tile closest to `origin`. Earlier tiles win ties.
#[must_use]
pub fn nearest_tile(origin: Position, tiles: &[TileSnapshot]) -> Option<TileSnapshot> {
    let mut best: Option<(i32, TileSnapshot)> = None;
    for tile in tiles {
        let distance = origin.distance_to(tile.position);
        match best {
            Some((closest, _)) if closest <= distance => {}
            _ => best = Some((distance, *tile)),
        }
    }
    best.map(|(_, tile)| tile)
}
