//! Player-versus-entity collision handling: bombs (the group/order state
//! machine), monsters and special coins.

use crate::entities::{Bomb, CoinKind, Player, Rect, SpecialCoin};
use crate::groups;
use crate::monster::Monster;
use crate::scoring;
use crate::store::{BombCollected, GameStatus, GameStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BombOutcome {
    /// In the active group and in order.
    Correct,
    /// In the active group, out of order.
    WrongOrder,
    /// A group is active and this bomb belongs to another one.
    OutsideGroup,
    /// No group active and this bomb's group is not the next pending one.
    WrongGroup,
}

impl BombOutcome {
    pub fn score(self, multiplier: u32) -> u64 {
        match self {
            BombOutcome::Correct => scoring::fire_bomb_score(multiplier),
            BombOutcome::WrongOrder => scoring::penalty_score(multiplier, scoring::WRONG_ORDER_PCT),
            BombOutcome::OutsideGroup => scoring::penalty_score(multiplier, scoring::OUTSIDE_GROUP_PCT),
            BombOutcome::WrongGroup => scoring::penalty_score(multiplier, scoring::WRONG_GROUP_PCT),
        }
    }
}

/// Collect every uncollected bomb overlapping `player`, in slice order.
/// Returns one outcome per collected bomb.
pub fn check_bomb_collisions<S: GameStore + ?Sized>(
    player: &Rect,
    bombs: &mut [Bomb],
    store: &mut S,
    sequence: &[u32],
) -> Vec<BombOutcome> {
    let mut outcomes = Vec::new();
    for i in 0..bombs.len() {
        if bombs[i].collected || !player.intersects(&bombs[i].rect()) {
            continue;
        }
        let (order, group) = (bombs[i].order, bombs[i].group);

        let active = store.state().active_group;
        let outcome = match active {
            None => {
                let next = groups::next_pending_group(sequence, &store.state().completed_groups);
                if next == Some(group) {
                    store.set_active_group(Some(group));
                    in_group_outcome(bombs, group, order)
                } else {
                    BombOutcome::WrongGroup
                }
            }
            Some(active) if active != group => BombOutcome::OutsideGroup,
            Some(_) => in_group_outcome(bombs, group, order),
        };

        bombs[i].collected = true;
        let score = outcome.score(store.state().multiplier);
        store.update_score(score);
        store.add_bomb_collected(BombCollected { order, group, score });
        if outcome == BombOutcome::Correct {
            store.increment_correct_order();
        }
        log::debug!("bomb {} (group {}) -> {:?}, +{}", order, group, outcome, score);

        if groups::group_complete(bombs, group) {
            store.add_completed_group(group);
            if store.state().active_group == Some(group) {
                store.set_active_group(None);
            }
        }
        outcomes.push(outcome);
    }
    outcomes
}

fn in_group_outcome(bombs: &[Bomb], group: u32, order: u32) -> BombOutcome {
    match groups::expected_order(bombs, group) {
        None => BombOutcome::Correct,
        Some(expected) if expected == order => BombOutcome::Correct,
        Some(_) => BombOutcome::WrongOrder,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonsterHit {
    /// Power mode: the monster was defeated for points.
    Defeated { points: u64 },
    /// The player lost a life and was sent back to spawn.
    PlayerHit { game_over: bool },
}

/// Resolve player/monster contact. Defeated monsters are removed from
/// `monsters`. At most one life is lost per call.
pub fn check_monster_collisions<S: GameStore + ?Sized>(
    player: &mut Player,
    spawn: (f64, f64),
    monsters: &mut Vec<Monster>,
    store: &mut S,
) -> Vec<MonsterHit> {
    let mut hits = Vec::new();
    let mut i = 0;
    while i < monsters.len() {
        if !player.rect().intersects(&monsters[i].rect()) {
            i += 1;
            continue;
        }
        let st = store.state();
        if st.power_mode_active {
            let points = scoring::power_tier_score(st.power_tier, st.multiplier);
            store.update_score(points);
            let m = monsters.remove(i);
            log::debug!("monster {:?} defeated, +{}", m.kind, points);
            hits.push(MonsterHit::Defeated { points });
            continue;
        }

        store.lose_life();
        store.decrement_correct_order();
        player.reset_to(spawn.0, spawn.1);
        let game_over = store.state().lives == 0;
        if game_over {
            store.set_game_status(GameStatus::GameOver);
        }
        log::debug!("player hit by {:?}, lives left {}", monsters[i].kind, store.state().lives);
        hits.push(MonsterHit::PlayerHit { game_over });
        break;
    }
    hits
}

/// Collect overlapping special coins and apply their awards. Collected coins
/// are removed from `coins`; their kinds are returned in collection order.
pub fn check_coin_collisions<S: GameStore + ?Sized>(
    player: &Rect,
    coins: &mut Vec<SpecialCoin>,
    store: &mut S,
    power_mode_ms: f64,
) -> Vec<CoinKind> {
    let mut taken = Vec::new();
    for coin in coins.iter_mut() {
        if coin.collected || !player.intersects(&coin.rect()) {
            continue;
        }
        coin.collected = true;
        let multiplier = store.state().multiplier;
        let points = match coin.kind {
            CoinKind::P => {
                let base = coin
                    .value
                    .unwrap_or_else(|| scoring::power_tier_score(store.state().power_tier, 1));
                base * multiplier as u64
            }
            CoinKind::B | CoinKind::E | CoinKind::S => scoring::special_coin_score(multiplier),
        };
        store.update_score(points);
        store.collect_special_coin(coin.kind);
        if coin.kind == CoinKind::P {
            store.activate_p_coin(power_mode_ms);
        }
        log::debug!("special coin {} collected, +{}", coin.kind.label(), points);
        taken.push(coin.kind);
    }
    coins.retain(|c| !c.collected);
    taken
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::{MonsterSpawn, MonsterType};
    use crate::store::GameState;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const SEQ: [u32; 2] = [1, 2];

    fn two_groups() -> Vec<Bomb> {
        vec![
            Bomb::new(100.0, 100.0, 20.0, 1, 1),
            Bomb::new(200.0, 100.0, 20.0, 2, 1),
            Bomb::new(300.0, 100.0, 20.0, 3, 1),
            Bomb::new(100.0, 300.0, 20.0, 4, 2),
            Bomb::new(200.0, 300.0, 20.0, 5, 2),
        ]
    }

    fn touching(b: &Bomb) -> Rect {
        Rect::new(b.x + 2.0, b.y + 2.0, 10.0, 10.0)
    }

    #[test]
    fn wrong_group_when_idle_scores_twenty_percent() {
        let mut bombs = two_groups();
        let mut store = GameState::default();
        let p = touching(&bombs[3]);
        let out = check_bomb_collisions(&p, &mut bombs, &mut store, &SEQ);
        assert_eq!(out, vec![BombOutcome::WrongGroup]);
        assert_eq!(store.score, 20);
        assert_eq!(store.active_group, None);
        assert_eq!(store.correct_order_count, 0);
        assert_eq!(store.bombs_collected, vec![BombCollected { order: 4, group: 2, score: 20 }]);
    }

    #[test]
    fn first_pick_of_next_group_starts_it_with_any_order() {
        let mut bombs = two_groups();
        let mut store = GameState::default();
        let p = touching(&bombs[2]);
        let out = check_bomb_collisions(&p, &mut bombs, &mut store, &SEQ);
        assert_eq!(out, vec![BombOutcome::Correct]);
        assert_eq!(store.active_group, Some(1));
        assert_eq!(store.score, 200);
        assert_eq!(store.correct_order_count, 1);
    }

    #[test]
    fn outside_active_group_scores_half() {
        let mut bombs = two_groups();
        let mut store = GameState::default();
        check_bomb_collisions(&touching(&bombs[0]), &mut bombs, &mut store, &SEQ);
        let p = touching(&bombs[4]);
        let out = check_bomb_collisions(&p, &mut bombs, &mut store, &SEQ);
        assert_eq!(out, vec![BombOutcome::OutsideGroup]);
        assert_eq!(store.score, 200 + 50);
        assert_eq!(store.active_group, Some(1), "active group unchanged");
    }

    #[test]
    fn out_of_order_in_group_scores_thirty_percent() {
        let mut bombs = two_groups();
        let mut store = GameState::default();
        check_bomb_collisions(&touching(&bombs[0]), &mut bombs, &mut store, &SEQ);
        // expected order is now 2; take 3
        let out = check_bomb_collisions(&touching(&bombs[2]), &mut bombs, &mut store, &SEQ);
        assert_eq!(out, vec![BombOutcome::WrongOrder]);
        assert_eq!(store.score, 200 + 30);
        assert_eq!(store.correct_order_count, 1);
    }

    #[test]
    fn multiplier_scales_penalties() {
        let mut bombs = two_groups();
        let mut store = GameState::default();
        store.multiplier = 3;
        check_bomb_collisions(&touching(&bombs[3]), &mut bombs, &mut store, &SEQ);
        assert_eq!(store.score, 60);
    }

    #[test]
    fn finished_group_is_completed_once_and_cleared() {
        let mut bombs = two_groups();
        let mut store = GameState::default();
        for i in 0..3 {
            let p = touching(&bombs[i]);
            check_bomb_collisions(&p, &mut bombs, &mut store, &SEQ);
        }
        assert_eq!(store.completed_groups, vec![1]);
        assert_eq!(store.active_group, None);
        assert_eq!(store.correct_order_count, 3);

        // re-touching collected bombs changes nothing
        let p = touching(&bombs[0]);
        assert!(check_bomb_collisions(&p, &mut bombs, &mut store, &SEQ).is_empty());
        assert_eq!(store.completed_groups, vec![1]);

        // group 2 is now next
        let out = check_bomb_collisions(&touching(&bombs[4]), &mut bombs, &mut store, &SEQ);
        assert_eq!(out, vec![BombOutcome::Correct]);
        assert_eq!(store.active_group, Some(2));
    }

    #[test]
    fn group_emptied_by_penalties_still_completes() {
        let mut bombs = two_groups();
        let mut store = GameState::default();
        check_bomb_collisions(&touching(&bombs[3]), &mut bombs, &mut store, &SEQ);
        check_bomb_collisions(&touching(&bombs[4]), &mut bombs, &mut store, &SEQ);
        assert_eq!(store.completed_groups, vec![2]);
        assert_eq!(groups::next_pending_group(&SEQ, &store.completed_groups), Some(1));
    }

    fn monster_at(x: f64, y: f64) -> Monster {
        let mut rng = SmallRng::seed_from_u64(1);
        Monster::spawn(&MonsterSpawn::new(x, y, MonsterType::Bureaucrat), 28.0, &mut rng)
    }

    #[test]
    fn monster_hit_costs_life_and_respawns() {
        let mut store = GameState::default();
        store.correct_order_count = 4;
        let mut player = Player::new(300.0, 300.0, 32.0, 32.0, "#fff");
        player.vx = 4.0;
        let mut monsters = vec![monster_at(310.0, 310.0)];
        let hits = check_monster_collisions(&mut player, (50.0, 450.0), &mut monsters, &mut store);
        assert_eq!(hits, vec![MonsterHit::PlayerHit { game_over: false }]);
        assert_eq!(store.lives, 2);
        assert_eq!(store.correct_order_count, 3);
        assert_eq!((player.x, player.y, player.vx), (50.0, 450.0, 0.0));
        assert_eq!(monsters.len(), 1);
    }

    #[test]
    fn last_life_ends_the_game() {
        let mut store = GameState::new(1);
        store.status = GameStatus::Playing;
        let mut player = Player::new(300.0, 300.0, 32.0, 32.0, "#fff");
        let mut monsters = vec![monster_at(310.0, 310.0)];
        let hits = check_monster_collisions(&mut player, (50.0, 450.0), &mut monsters, &mut store);
        assert_eq!(hits, vec![MonsterHit::PlayerHit { game_over: true }]);
        assert_eq!(store.status, GameStatus::GameOver);
    }

    #[test]
    fn power_mode_defeats_monsters_for_tier_points() {
        let mut store = GameState::default();
        store.activate_p_coin(5000.0);
        store.power_tier = 3;
        store.multiplier = 2;
        let mut player = Player::new(300.0, 300.0, 32.0, 32.0, "#fff");
        let mut monsters = vec![monster_at(310.0, 310.0), monster_at(305.0, 300.0), monster_at(700.0, 100.0)];
        let hits = check_monster_collisions(&mut player, (50.0, 450.0), &mut monsters, &mut store);
        assert_eq!(hits.len(), 2);
        assert_eq!(store.score, 2 * 500 * 2);
        assert_eq!(store.lives, 3);
        assert_eq!(monsters.len(), 1);
    }

    #[test]
    fn coins_apply_their_effects() {
        let mut store = GameState::default();
        let mut coins = vec![
            SpecialCoin::new(CoinKind::E, 100.0, 100.0, 25.0, 0.0),
            SpecialCoin::new(CoinKind::B, 400.0, 100.0, 25.0, 0.0),
        ];
        let p = Rect::new(105.0, 105.0, 10.0, 10.0);
        let taken = check_coin_collisions(&p, &mut coins, &mut store, 5000.0);
        assert_eq!(taken, vec![CoinKind::E]);
        assert_eq!(store.lives, 4);
        assert_eq!(store.score, 1000);
        assert_eq!(coins.len(), 1);

        let mut p_coin = SpecialCoin::new(CoinKind::P, 100.0, 100.0, 25.0, 0.0);
        p_coin.value = Some(300);
        let mut coins = vec![p_coin];
        store.multiplier = 2;
        check_coin_collisions(&p, &mut coins, &mut store, 5000.0);
        assert!(store.power_mode_active);
        assert_eq!(store.score, 1000 + 600);
    }
}
