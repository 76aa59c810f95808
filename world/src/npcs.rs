//! Authoritative collection of friendly NPCs.

use farm_defence_core::{Command, Dimensions, NpcId, RenderableSnapshot};
use farm_defence_system_defence::{GuardBee, Npc, NpcContext};
use log::trace;

use crate::enemies::EnemyManager;

#[derive(Debug)]
struct NpcEntry {
    id: NpcId,
    npc: Box<dyn Npc>,
}

/// Owns every hive, scarecrow and guard bee.
#[derive(Debug, Default)]
pub struct NpcManager {
    npcs: Vec<NpcEntry>,
    next_npc_id: u32,
    scratch: Vec<Command>,
}

impl NpcManager {
    /// Creates an empty NPC manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an NPC and returns its identifier.
    pub fn add_npc(&mut self, npc: Box<dyn Npc>) -> NpcId {
        let id = NpcId::new(self.next_npc_id);
        self.next_npc_id += 1;
        self.npcs.push(NpcEntry { id, npc });
        id
    }

    /// Looks up an NPC by identifier.
    #[must_use]
    pub fn get(&self, id: NpcId) -> Option<&dyn Npc> {
        self.npcs
            .binary_search_by_key(&id, |entry| entry.id)
            .ok()
            .map(|index| self.npcs[index].npc.as_ref())
    }

    /// Iterator over every NPC and its identifier, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NpcId, &dyn Npc)> {
        self.npcs.iter().map(|entry| (entry.id, entry.npc.as_ref()))
    }

    /// Number of NPCs, including those awaiting removal.
    #[must_use]
    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    /// Reports whether no NPCs exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }

    /// Drops every NPC flagged for removal.
    pub fn cleanup(&mut self) {
        for index in (0..self.npcs.len()).rev() {
            if self.npcs[index].npc.is_marked_for_removal() {
                let entry = self.npcs.remove(index);
                trace!("swept npc {}", entry.id.get());
            }
        }
    }

    /// Sweeps, then runs the movement pass of every NPC.
    ///
    /// Commands are applied as soon as each NPC finishes, so a bee that
    /// stings an enemy hides it from every bee after it in the same pass.
    pub fn tick(&mut self, dimensions: Dimensions, enemies: &mut EnemyManager) {
        self.cleanup();

        let mut view = enemies.view();
        let mut pending = Vec::new();
        for entry in &mut self.npcs {
            self.scratch.clear();
            let ctx = NpcContext {
                dimensions,
                enemies: &view,
            };
            entry.npc.tick(&ctx, &mut self.scratch);
            for command in self.scratch.drain(..) {
                match command {
                    Command::RemoveEnemy { enemy } => {
                        view.mark_removed(enemy);
                        enemies.apply(command);
                    }
                    Command::SpawnGuardBee { .. } => pending.push(command),
                    other => enemies.apply(other),
                }
            }
        }

        for command in pending {
            self.apply(command);
        }
    }

    /// Runs the interaction pass of every NPC against one enemy snapshot.
    ///
    /// Commands are collected and only applied once every NPC has acted, and
    /// NPCs created by the pass do not take part in it.
    pub fn interact(&mut self, dimensions: Dimensions, enemies: &mut EnemyManager) {
        let view = enemies.view();
        let ctx = NpcContext {
            dimensions,
            enemies: &view,
        };

        self.scratch.clear();
        for entry in &mut self.npcs {
            entry.npc.interact(&ctx, &mut self.scratch);
        }

        let commands = std::mem::take(&mut self.scratch);
        for command in &commands {
            match command {
                Command::SpawnGuardBee { .. } => self.apply(*command),
                _ => enemies.apply(*command),
            }
        }
        self.scratch = commands;
    }

    /// Applies an NPC-directed command. Other commands are ignored.
    pub fn apply(&mut self, command: Command) {
        if let Command::SpawnGuardBee { origin, target } = command {
            let _ = self.add_npc(Box::new(GuardBee::new(origin, Some(target))));
        }
    }

    /// Fresh copy of what should be drawn for every NPC.
    #[must_use]
    pub fn render(&self) -> Vec<RenderableSnapshot> {
        self.npcs.iter().map(|entry| entry.npc.renderable()).collect()
    }
}
