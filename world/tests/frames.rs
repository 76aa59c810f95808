use farm_defence_core::{
    ticks, ArtGroup, Dimensions, EnemyId, EnemyKind, Inventory, NpcId, NpcKind, Position, Target,
};
use farm_defence_system_spawning::{Config, Spawner};
use farm_defence_world::{query, Field, Ledger, Surroundings, World};

const TILE_SIZE: i32 = 32;

struct Farmstead {
    world: World,
    ledger: Ledger,
    field: Field,
    player: Position,
}

impl Farmstead {
    fn new(coins: i32, food: i32, player: Position) -> Self {
        Self {
            world: World::new(Dimensions::new(TILE_SIZE)),
            ledger: Ledger::new(coins, food),
            field: Field::new(),
            player,
        }
    }

    fn enemy(&mut self, kind: EnemyKind, position: Position, target: Target) -> EnemyId {
        self.world.add_enemy(kind, position, target)
    }

    fn npc(&mut self, kind: NpcKind, position: Position) -> NpcId {
        self.world.add_npc(kind, position)
    }

    fn run(&mut self, frames: usize) {
        let mut surroundings = Surroundings {
            player: self.player,
            inventory: &mut self.ledger,
            farm: &mut self.field,
        };
        for _ in 0..frames {
            self.world.frame(&mut surroundings);
        }
    }

    fn live_enemies(&self) -> Vec<EnemyId> {
        let view = query::enemy_view(&self.world);
        view.live().map(|enemy| enemy.id).collect()
    }

    fn enemies(&self) -> Vec<EnemyId> {
        let enemies = query::enemies(&self.world);
        enemies.iter().map(|(id, _)| id).collect()
    }

    fn npc_kinds(&self) -> Vec<NpcKind> {
        let npcs = query::npcs(&self.world);
        npcs.iter().map(|(_, npc)| npc.kind()).collect()
    }

    fn is_attacking(&self, id: EnemyId) -> Option<bool> {
        let view = query::enemy_view(&self.world);
        let enemy = view.iter().find(|enemy| enemy.id == id)?;
        Some(enemy.attacking)
    }
}

#[test]
fn spawner_releases_on_its_interval() {
    let mut farm = Farmstead::new(5, 0, Position::new(1000, 0));
    let config = Config::new(EnemyKind::Magpie, Position::new(0, 0), ticks(3));
    farm.world.add_spawner(Spawner::new(config));

    farm.run(2);
    assert!(farm.live_enemies().is_empty(), "interval not elapsed");

    farm.run(1);
    let view = query::enemy_view(&farm.world);
    let positions: Vec<_> = view.iter().map(|enemy| enemy.position).collect();
    assert_eq!(
        positions,
        vec![Position::new(1, 0)],
        "a fresh magpie moves on the tick it is spawned"
    );

    farm.run(3);
    assert_eq!(farm.live_enemies().len(), 2);
}

#[test]
fn magpie_steals_and_escapes_with_the_coin() {
    let mut farm = Farmstead::new(5, 0, Position::new(40, 0));
    let _ = farm.enemy(EnemyKind::Magpie, Position::new(0, 0), Target::Player);

    farm.run(20);

    assert_eq!(farm.ledger.coins(), 4, "exactly one coin is taken");
    assert!(farm.enemies().is_empty(), "magpie left for home");
}

#[test]
fn hive_launches_a_bee_that_stings_the_intruder() {
    let mut farm = Farmstead::new(5, 0, Position::new(1000, 0));
    let hive = farm.npc(NpcKind::BeeHive, Position::new(0, 0));
    let _ = farm.enemy(EnemyKind::Magpie, Position::new(100, 0), Target::Player);

    farm.run(1);
    let kinds = farm.npc_kinds();
    assert_eq!(kinds, vec![NpcKind::BeeHive, NpcKind::GuardBee]);
    let rendered = farm.world.render();
    let bee = rendered
        .iter()
        .find(|renderable| renderable.art == ArtGroup::Bee)
        .expect("bee is drawable");
    assert_eq!(bee.position, Position::new(0, 0), "bee has not moved");

    farm.run(200);

    assert!(farm.enemies().is_empty(), "magpie was stung");
    let npcs = query::npcs(&farm.world);
    let survivors: Vec<_> = npcs.iter().map(|(id, _)| id).collect();
    assert_eq!(survivors, vec![hive], "bee is spent after one sting");
    assert_eq!(farm.ledger.coins(), 5);
}

#[test]
fn neighbouring_hives_both_launch_at_one_magpie() {
    let mut farm = Farmstead::new(5, 0, Position::new(1000, 0));
    let _ = farm.npc(NpcKind::BeeHive, Position::new(0, 0));
    let _ = farm.npc(NpcKind::BeeHive, Position::new(10, 0));
    let _ = farm.enemy(EnemyKind::Magpie, Position::new(200, 0), Target::Player);

    farm.run(1);

    let expected = vec![
        NpcKind::BeeHive,
        NpcKind::BeeHive,
        NpcKind::GuardBee,
        NpcKind::GuardBee,
    ];
    assert_eq!(farm.npc_kinds(), expected);
}

#[test]
fn scarecrow_turns_back_small_birds_only() {
    let mut farm = Farmstead::new(5, 5, Position::new(500, 0));
    let _ = farm.npc(NpcKind::Scarecrow, Position::new(0, 0));
    let magpie = farm.enemy(EnemyKind::Magpie, Position::new(50, 0), Target::Player);
    let eagle = farm.enemy(EnemyKind::Eagle, Position::new(50, 10), Target::Player);

    farm.run(1);

    assert_eq!(farm.is_attacking(magpie), Some(false), "magpie is scared");
    assert_eq!(farm.is_attacking(eagle), Some(true), "eagle is not");

    farm.run(2);
    assert_eq!(farm.enemies(), vec![eagle], "magpie flew home");
    assert_eq!(farm.ledger.coins(), 5);
}

#[test]
fn pigeon_eats_the_nearest_cabbage_and_flies_home() {
    let mut farm = Farmstead::new(0, 0, Position::new(0, 500));
    let near = farm.field.plant_cabbage(Position::new(64, 0));
    let far = farm.field.plant_cabbage(Position::new(640, 0));
    let _ = farm.enemy(EnemyKind::Pigeon, Position::new(0, 0), Target::Tile(far));

    farm.run(40);

    assert!(!farm.field.has_cabbage(near), "closest cabbage was eaten");
    assert!(farm.field.has_cabbage(far));
    assert!(farm.enemies().is_empty(), "pigeon returned home");
}

#[test]
fn render_returns_an_independent_copy() {
    let mut farm = Farmstead::new(0, 10, Position::new(500, 0));
    let _ = farm.enemy(EnemyKind::Eagle, Position::new(0, 0), Target::Player);
    let _ = farm.npc(NpcKind::Scarecrow, Position::new(300, 300));

    let before = farm.world.render();
    farm.run(5);
    let after = farm.world.render();

    assert_eq!(before.len(), 2);
    assert_eq!(before[0].position, Position::new(0, 0));
    assert_ne!(after[0].position, before[0].position);
    let arts: Vec<_> = after.iter().map(|renderable| renderable.art).collect();
    assert_eq!(
        arts,
        vec![ArtGroup::Eagle, ArtGroup::Scarecrow],
        "enemies are drawn before npcs"
    );
}
