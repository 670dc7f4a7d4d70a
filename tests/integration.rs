// Native integration tests for `bomb-dash`. Everything here goes through the
// public API and runs under `cargo test` on the host.

use bomb_dash::collision::{self, BombOutcome};
use bomb_dash::maps::BombSpawn;
use bomb_dash::spawner::CoinSpawner;
use bomb_dash::{
    Bomb, CoinKind, EngineConfig, GameEngine, GameState, GameStatus, InputState, MapDefinition, MapError,
    Platform, Rect,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn flat_map(id: &str, bombs: Vec<BombSpawn>) -> MapDefinition {
    MapDefinition {
        id: id.to_string(),
        name: id.to_string(),
        width: 800.0,
        height: 600.0,
        player_start_x: 100.0,
        player_start_y: 518.0,
        platforms: vec![Platform::new(0.0, 550.0, 800.0, 50.0)],
        bombs,
        monsters: Vec::new(),
        background_color: "#111".to_string(),
        group_sequence: vec![1],
    }
}

fn run_countdown(engine: &mut GameEngine) {
    engine.start();
    let ticks = (engine.config().countdown_ms / engine.config().tick_ms).ceil() as usize;
    for _ in 0..ticks {
        engine.update();
    }
}

#[test]
fn every_bomb_branch_scores_and_records() {
    let mut bombs = vec![
        Bomb::new(0.0, 100.0, 20.0, 1, 1),
        Bomb::new(100.0, 100.0, 20.0, 2, 1),
        Bomb::new(200.0, 100.0, 20.0, 3, 1),
        Bomb::new(300.0, 100.0, 20.0, 4, 2),
        Bomb::new(400.0, 100.0, 20.0, 5, 2),
    ];
    let sequence: [u32; 2] = [1, 2];
    let mut store = GameState::default();
    let touch = |x: f64| Rect::new(x - 5.0, 95.0, 30.0, 30.0);
    let mut collect = |x: f64, store: &mut GameState| {
        collision::check_bomb_collisions(&touch(x), &mut bombs, store, &sequence)
    };

    // group 2 before any group is active, group 1 is next
    assert_eq!(collect(300.0, &mut store), vec![BombOutcome::WrongGroup]);
    assert_eq!(store.score, 20);
    assert_eq!(store.active_group, None);

    // first pick of the next group starts it
    assert_eq!(collect(0.0, &mut store), vec![BombOutcome::Correct]);
    assert_eq!(store.score, 220);
    assert_eq!(store.active_group, Some(1));

    // outside the active group; group 2 is now fully collected
    assert_eq!(collect(400.0, &mut store), vec![BombOutcome::OutsideGroup]);
    assert_eq!(store.score, 270);
    assert!(store.completed_groups.contains(&2));
    assert_eq!(store.active_group, Some(1));

    // order 2 is expected
    assert_eq!(collect(200.0, &mut store), vec![BombOutcome::WrongOrder]);
    assert_eq!(store.score, 300);

    assert_eq!(collect(100.0, &mut store), vec![BombOutcome::Correct]);
    assert_eq!(store.score, 500);
    assert_eq!(store.active_group, None);
    assert!(store.completed_groups.contains(&1));
    assert_eq!(store.correct_order_count, 2);
    assert_eq!(store.bombs_collected.len(), 5);
    assert!(bombs.iter().all(|b| b.collected));
}

#[test]
fn b_coin_spawns_once_when_score_crosses_5000() {
    let mut spawner = CoinSpawner::new(25.0, 60_000.0, 10_000.0);
    let mut rng = SmallRng::seed_from_u64(7);
    let mut coins = Vec::new();
    let mut game = GameState {
        score: 4999,
        ..GameState::default()
    };

    let spawned = spawner.check_spawns(&mut coins, &game, 0.0, 0.0, (800.0, 600.0), &mut rng);
    assert!(spawned.is_empty());

    game.score = 5001;
    let spawned = spawner.check_spawns(&mut coins, &game, 16.0, 16.0, (800.0, 600.0), &mut rng);
    assert_eq!(spawned, vec![CoinKind::B]);
    let spawned = spawner.check_spawns(&mut coins, &game, 32.0, 32.0, (800.0, 600.0), &mut rng);
    assert!(spawned.is_empty());
    assert_eq!(coins.len(), 1);
    let c = &coins[0];
    assert!(c.x >= 15.0 && c.x <= 785.0);
    assert!(c.y >= 50.0 && c.y <= 550.0);
}

#[test]
fn identical_engines_stay_in_lockstep() {
    let config = EngineConfig::default();
    let mut a = GameEngine::with_defaults(config.clone());
    let mut b = GameEngine::with_defaults(config);
    run_countdown(&mut a);
    run_countdown(&mut b);
    for i in 0..600 {
        let input = InputState {
            right: i % 120 < 60,
            left: i % 120 >= 60,
            jump: i % 45 == 0,
            ..Default::default()
        };
        a.set_input(input);
        b.set_input(input);
        a.update();
        b.update();
    }
    assert_eq!(a.debug_info(), b.debug_info());
    assert_eq!(a.monsters(), b.monsters());
    assert_eq!(a.state(), b.state());
}

#[test]
fn invalid_maps_are_rejected_up_front() {
    let mut dup = flat_map("dup", vec![BombSpawn::new(10.0, 10.0, 1, 1), BombSpawn::new(40.0, 10.0, 1, 1)]);
    let err = GameEngine::with_maps(EngineConfig::default(), GameState::default(), vec![dup.clone()]).err();
    assert_eq!(err, Some(MapError::DuplicateBombOrder { order: 1 }));

    dup.bombs.clear();
    let err = GameEngine::with_maps(EngineConfig::default(), GameState::default(), vec![dup]).err();
    assert_eq!(err, Some(MapError::NoBombs { id: "dup".to_string() }));

    let err = GameEngine::with_maps(EngineConfig::default(), GameState::default(), Vec::new()).err();
    assert_eq!(err, Some(MapError::EmptyCampaign));
}

#[test]
fn idle_player_rests_on_the_floor() {
    let map = flat_map("rest", vec![BombSpawn::new(700.0, 100.0, 1, 1)]);
    let mut e = GameEngine::with_maps(EngineConfig::default(), GameState::default(), vec![map]).expect("valid map");
    run_countdown(&mut e);
    for _ in 0..300 {
        e.update();
    }
    assert_eq!(e.state().status, GameStatus::Playing);
    assert!(e.player().on_ground);
    assert!((e.player().y - 518.0).abs() < 1e-6, "player drifted to {}", e.player().y);
    assert_eq!(e.state().score, 0);
}

#[test]
fn losing_every_life_ends_the_game() {
    let mut e = GameEngine::with_defaults(EngineConfig::default());
    run_countdown(&mut e);
    // park a monster on the spawn point so every respawn is another hit
    for _ in 0..3 {
        let p = e.player().rect();
        let m = &mut e.monsters_mut()[0];
        m.x = p.x;
        m.y = p.y;
        e.update();
    }
    assert_eq!(e.state().lives, 0);
    assert_eq!(e.state().status, GameStatus::GameOver);
    assert!(!e.state().game_completed);
}
