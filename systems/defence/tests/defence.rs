use farm_defence_core::{
    ticks, Command, Dimensions, EnemyId, EnemyKind, EnemySnapshot, EnemyView, FixedTimer,
    Position, SpriteKey,
};
use farm_defence_system_defence::{
    BeeHive, GuardBee, Npc, NpcContext, Scarecrow, HIVE_DETECTION_DISTANCE,
};

const TILE_SIZE: i32 = 32;

#[test]
fn hive_launches_a_single_bee_for_two_nearby_enemies() {
    let mut hive = BeeHive::new(Position::new(0, 0));
    let view = view(vec![
        enemy(1, EnemyKind::Magpie, Position::new(50, 0)),
        enemy(2, EnemyKind::Eagle, Position::new(20, 0)),
    ]);
    let mut out = Vec::new();

    hive.interact(&context(&view), &mut out);

    assert_eq!(
        out,
        vec![Command::SpawnGuardBee {
            origin: Position::new(0, 0),
            target: EnemyId::new(1),
        }],
        "first enemy in collection order wins"
    );
    assert!(!hive.is_loaded());
}

#[test]
fn hive_ignores_enemies_outside_detection_radius() {
    let mut hive = BeeHive::new(Position::new(0, 0));
    let view = view(vec![enemy(
        1,
        EnemyKind::Magpie,
        Position::new(HIVE_DETECTION_DISTANCE, 0),
    )]);
    let mut out = Vec::new();

    hive.interact(&context(&view), &mut out);

    assert!(out.is_empty());
    assert!(hive.is_loaded());
}

#[test]
fn hive_reloads_after_its_timer_completes() {
    let mut hive = BeeHive::new(Position::new(0, 0));
    let view = view(vec![enemy(1, EnemyKind::Pigeon, Position::new(10, 10))]);
    let mut out = Vec::new();

    for _ in 0..240 {
        hive.interact(&context(&view), &mut out);
    }
    assert_eq!(out.len(), 1, "still reloading");
    assert!(hive.is_loaded());

    hive.interact(&context(&view), &mut out);
    assert_eq!(out.len(), 2);
}

#[test]
fn movement_pass_leaves_the_reload_alone() {
    let mut hive = BeeHive::new(Position::new(0, 0));
    let view = view(vec![enemy(1, EnemyKind::Magpie, Position::new(10, 10))]);
    let mut out = Vec::new();

    hive.interact(&context(&view), &mut out);
    for _ in 0..500 {
        hive.tick(&context(&view), &mut out);
    }
    for _ in 0..238 {
        hive.interact(&context(&view), &mut out);
    }
    assert!(!hive.is_loaded(), "one reload per frame");

    hive.interact(&context(&view), &mut out);
    assert!(hive.is_loaded());
    assert_eq!(out.len(), 1);
}

#[test]
fn hive_does_not_move() {
    let mut hive = BeeHive::new(Position::new(5, 5));
    let view = EnemyView::default();
    let mut out = Vec::new();

    hive.tick(&context(&view), &mut out);

    assert_eq!(hive.actor().position(), Position::new(5, 5));
    assert_eq!(hive.actor().speed(), 0.0);
}

#[test]
fn bee_launched_onto_its_destination_is_removed_immediately() {
    let mut bee = GuardBee::new(Position::new(10, 20), None);
    let view = EnemyView::default();
    let mut out = Vec::new();

    bee.tick(&context(&view), &mut out);

    assert!(bee.is_marked_for_removal());
    assert!(out.is_empty());
}

#[test]
fn bee_stings_the_first_enemy_it_touches() {
    let mut bee = GuardBee::new(Position::new(0, 0), Some(EnemyId::new(1)));
    let view = view(vec![
        enemy(1, EnemyKind::Magpie, Position::new(100, 0)),
        enemy(2, EnemyKind::Eagle, Position::new(10, 0)),
    ]);
    let mut out = Vec::new();

    bee.tick(&context(&view), &mut out);

    assert_eq!(
        out,
        vec![Command::RemoveEnemy {
            enemy: EnemyId::new(2)
        }]
    );
    assert!(bee.is_marked_for_removal());
    assert_eq!(bee.actor().position(), Position::new(0, 0));
}

#[test]
fn bee_ignores_enemies_already_removed() {
    let mut bee = GuardBee::new(Position::new(0, 0), Some(EnemyId::new(1)));
    let mut view = view(vec![
        enemy(1, EnemyKind::Magpie, Position::new(100, 0)),
        enemy(2, EnemyKind::Eagle, Position::new(10, 0)),
    ]);
    view.mark_removed(EnemyId::new(2));
    let mut out = Vec::new();

    bee.tick(&context(&view), &mut out);

    assert!(out.is_empty());
    assert!(!bee.is_marked_for_removal());
    assert_eq!(bee.actor().position(), Position::new(2, 0));
    assert_eq!(bee.actor().sprite(), SpriteKey::Right);
}

#[test]
fn bee_without_target_flies_home() {
    let mut bee = GuardBee::new(Position::new(0, 0), Some(EnemyId::new(5)));
    bee.actor_mut().set_position(Position::new(100, 0));
    let view = EnemyView::default();
    let mut out = Vec::new();

    bee.tick(&context(&view), &mut out);

    assert_eq!(bee.actor().position(), Position::new(98, 0));
    assert_eq!(bee.actor().sprite(), SpriteKey::Left);
    assert!(!bee.is_marked_for_removal());
}

#[test]
fn bee_expires_after_its_lifespan() {
    let mut bee = GuardBee::new(Position::new(0, 0), Some(EnemyId::new(1)));
    bee.set_lifespan(FixedTimer::new(ticks(5)));
    let view = view(vec![enemy(1, EnemyKind::Magpie, Position::new(10_000, 0))]);
    let mut out = Vec::new();

    for _ in 0..4 {
        bee.tick(&context(&view), &mut out);
    }
    assert!(!bee.is_marked_for_removal());

    bee.tick(&context(&view), &mut out);
    assert!(bee.is_marked_for_removal());
    assert!(out.is_empty());
}

#[test]
fn scarecrow_frightens_attacking_small_birds_in_range() {
    let mut scarecrow = Scarecrow::new(Position::new(0, 0));
    let mut retreating = enemy(4, EnemyKind::Magpie, Position::new(10, 0));
    retreating.attacking = false;
    let view = view(vec![
        enemy(1, EnemyKind::Magpie, Position::new(100, 0)),
        enemy(2, EnemyKind::Eagle, Position::new(10, 0)),
        enemy(3, EnemyKind::Pigeon, Position::new(0, TILE_SIZE * 4)),
        retreating,
        enemy(5, EnemyKind::Pigeon, Position::new(-20, -20)),
    ]);
    let mut out = Vec::new();

    scarecrow.interact(&context(&view), &mut out);

    assert_eq!(
        out,
        vec![
            Command::ScareEnemy {
                enemy: EnemyId::new(1)
            },
            Command::ScareEnemy {
                enemy: EnemyId::new(5)
            },
        ]
    );
}

fn context(view: &EnemyView) -> NpcContext<'_> {
    NpcContext {
        dimensions: Dimensions::new(TILE_SIZE),
        enemies: view,
    }
}

fn view(snapshots: Vec<EnemySnapshot>) -> EnemyView {
    EnemyView::from_snapshots(snapshots)
}

fn enemy(id: u32, kind: EnemyKind, position: Position) -> EnemySnapshot {
    EnemySnapshot {
        id: EnemyId::new(id),
        kind,
        position,
        attacking: true,
        removed: false,
    }
}
