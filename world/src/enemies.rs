//! Authoritative enemy and spawner collections.

use farm_defence_core::{
    Command, EnemyId, EnemyKind, EnemySnapshot, EnemyView, Position, RenderableSnapshot, Target,
};
use farm_defence_system_birds::{Bird, BirdContext, Eagle, Magpie, Pigeon};
use farm_defence_system_spawning::Spawner;
use log::{debug, trace};

#[derive(Debug)]
struct EnemyEntry {
    id: EnemyId,
    bird: Box<dyn Bird>,
}

/// Owns every enemy and every spawner.
///
/// Enemies are kept in insertion order. Removal is mark-then-sweep: a bird
/// flags itself (or is flagged by a command) and disappears during the
/// cleanup that opens the next tick.
#[derive(Debug, Default)]
pub struct EnemyManager {
    spawners: Vec<Spawner>,
    enemies: Vec<EnemyEntry>,
    next_enemy_id: u32,
    scratch: Vec<Command>,
}

impl EnemyManager {
    /// Creates an empty enemy manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a spawner. Spawners tick in registration order.
    pub fn add_spawner(&mut self, spawner: Spawner) {
        self.spawners.push(spawner);
    }

    /// Spawners currently registered.
    #[must_use]
    pub fn spawners(&self) -> &[Spawner] {
        &self.spawners
    }

    /// Appends an enemy and returns its identifier.
    pub fn add_enemy(&mut self, bird: Box<dyn Bird>) -> EnemyId {
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id += 1;
        self.enemies.push(EnemyEntry { id, bird });
        id
    }

    /// Creates one enemy of `kind` at `position` chasing `target`.
    pub fn spawn(&mut self, kind: EnemyKind, position: Position, target: Target) -> EnemyId {
        let bird: Box<dyn Bird> = match kind {
            EnemyKind::Magpie => Box::new(Magpie::new(position, target)),
            EnemyKind::Eagle => Box::new(Eagle::new(position, target)),
            EnemyKind::Pigeon => Box::new(Pigeon::new(position, target)),
        };
        let id = self.add_enemy(bird);
        debug!("{kind:?} {} joined at {position:?}", id.get());
        id
    }

    /// Looks up an enemy by identifier.
    #[must_use]
    pub fn get(&self, id: EnemyId) -> Option<&dyn Bird> {
        self.index_of(id)
            .map(|index| self.enemies[index].bird.as_ref())
    }

    /// Iterator over every enemy and its identifier, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EnemyId, &dyn Bird)> {
        self.enemies
            .iter()
            .map(|entry| (entry.id, entry.bird.as_ref()))
    }

    /// Number of enemies, including those awaiting removal.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Reports whether no enemies exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Drops every enemy flagged for removal.
    pub fn cleanup(&mut self) {
        for index in (0..self.enemies.len()).rev() {
            if self.enemies[index].bird.is_marked_for_removal() {
                let entry = self.enemies.remove(index);
                trace!("swept enemy {}", entry.id.get());
            }
        }
    }

    /// Sweeps, runs every spawner, then advances every enemy.
    ///
    /// Enemies released by a spawner during this call tick in the same call.
    pub fn tick(&mut self, ctx: &mut BirdContext<'_>) {
        self.cleanup();

        self.scratch.clear();
        for spawner in &mut self.spawners {
            spawner.handle(&*ctx.farm, &mut self.scratch);
        }
        let mut spawned = std::mem::take(&mut self.scratch);
        for command in spawned.drain(..) {
            self.apply(command);
        }
        self.scratch = spawned;

        for entry in &mut self.enemies {
            entry.bird.tick(ctx);
        }
    }

    /// Enemies have no interaction behaviour of their own.
    pub fn interact(&mut self) {}

    /// Applies an enemy-directed command. Other commands are ignored.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SpawnEnemy {
                kind,
                position,
                target,
            } => {
                let _ = self.spawn(kind, position, target);
            }
            Command::RemoveEnemy { enemy } => {
                if let Some(index) = self.index_of(enemy) {
                    self.enemies[index]
                        .bird
                        .state_mut()
                        .actor_mut()
                        .mark_for_removal();
                }
            }
            Command::ScareEnemy { enemy } => {
                if let Some(index) = self.index_of(enemy) {
                    self.enemies[index].bird.scare();
                }
            }
            Command::SpawnGuardBee { .. } => {}
        }
    }

    /// Captures a read-only snapshot of every enemy.
    #[must_use]
    pub fn view(&self) -> EnemyView {
        EnemyView::from_snapshots(
            self.enemies
                .iter()
                .map(|entry| EnemySnapshot {
                    id: entry.id,
                    kind: entry.bird.kind(),
                    position: entry.bird.position(),
                    attacking: entry.bird.state().is_attacking(),
                    removed: entry.bird.is_marked_for_removal(),
                })
                .collect(),
        )
    }

    /// Fresh copy of what should be drawn for every enemy.
    #[must_use]
    pub fn render(&self) -> Vec<RenderableSnapshot> {
        self.enemies
            .iter()
            .map(|entry| RenderableSnapshot {
                position: entry.bird.position(),
                art: entry.bird.kind().art(),
                sprite: entry.bird.state().actor().sprite(),
            })
            .collect()
    }

    fn index_of(&self, id: EnemyId) -> Option<usize> {
        self.enemies
            .binary_search_by_key(&id, |entry| entry.id)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_allocated_in_order() {
        let mut enemies = EnemyManager::new();
        let first = enemies.spawn(EnemyKind::Magpie, Position::new(0, 0), Target::Player);
        let second = enemies.spawn(EnemyKind::Eagle, Position::new(0, 0), Target::Player);

        assert_eq!(first, EnemyId::new(0));
        assert_eq!(second, EnemyId::new(1));
        assert_eq!(
            enemies.get(second).map(|bird| bird.kind()),
            Some(EnemyKind::Eagle)
        );
    }

    #[test]
    fn cleanup_only_drops_flagged_enemies() {
        let mut enemies = EnemyManager::new();
        let ids: Vec<_> = (0..4)
            .map(|_| enemies.spawn(EnemyKind::Pigeon, Position::new(0, 0), Target::Player))
            .collect();
        enemies.apply(Command::RemoveEnemy { enemy: ids[1] });
        enemies.apply(Command::RemoveEnemy { enemy: ids[3] });

        assert_eq!(enemies.len(), 4, "removal waits for the sweep");
        enemies.cleanup();

        let survivors: Vec<_> = enemies.iter().map(|(id, _)| id).collect();
        assert_eq!(survivors, vec![ids[0], ids[2]]);
    }

    #[test]
    fn commands_for_missing_enemies_are_ignored() {
        let mut enemies = EnemyManager::new();
        enemies.apply(Command::RemoveEnemy {
            enemy: EnemyId::new(9),
        });
        enemies.apply(Command::ScareEnemy {
            enemy: EnemyId::new(9),
        });
        assert!(enemies.is_empty());
    }

    #[test]
    fn scare_command_ends_the_attack() {
        let mut enemies = EnemyManager::new();
        let id = enemies.spawn(EnemyKind::Magpie, Position::new(0, 0), Target::Player);

        enemies.apply(Command::ScareEnemy { enemy: id });

        let attacking: Vec<_> = enemies.view().iter().map(|s| s.attacking).collect();
        assert_eq!(attacking, vec![false]);
    }
}
