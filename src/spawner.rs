//! Special coin spawning. Each kind fires on a rising edge of its threshold,
//! and at most one coin per kind is live at a time.

use rand::{Rng, RngCore};

use crate::entities::{CoinKind, POWER_COLORS, SpecialCoin};
use crate::scoring;
use crate::store::{GameState, MAX_MULTIPLIER};

/// Score step between B coins.
pub const B_COIN_SCORE_STEP: u64 = 5000;
/// Correct-order bombs per P coin.
pub const P_COIN_ORDER_STEP: u32 = 9;

/// Edge-detection memory. B and E survive level changes; P and S are per map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpawnerState {
    pub last_b_threshold: u64,
    pub last_e_b_count: u32,
    pub last_p_threshold: u32,
    pub s_spawned: bool,
}

#[derive(Clone, Debug)]
pub struct CoinSpawner {
    state: SpawnerState,
    coin_size: f64,
    s_coin_delay_ms: f64,
    s_coin_lifetime_ms: f64,
}

/// B coins needed for the next extra life. Fewer lives lower the bar.
pub fn e_coin_requirement(lives: u32) -> i64 {
    (8 - (3 - lives as i64)).max(1)
}

impl CoinSpawner {
    pub fn new(coin_size: f64, s_coin_delay_ms: f64, s_coin_lifetime_ms: f64) -> Self {
        Self {
            state: SpawnerState::default(),
            coin_size,
            s_coin_delay_ms,
            s_coin_lifetime_ms,
        }
    }

    pub fn state(&self) -> &SpawnerState {
        &self.state
    }

    /// Forget everything (new game).
    pub fn reset(&mut self) {
        self.state = SpawnerState::default();
    }

    /// Per-map reset; B and E thresholds carry over.
    pub fn on_map_loaded(&mut self) {
        self.state.last_p_threshold = 0;
        self.state.s_spawned = false;
    }

    /// Evaluate all thresholds against `game` and push new coins.
    pub fn check_spawns(
        &mut self,
        coins: &mut Vec<SpecialCoin>,
        game: &GameState,
        map_elapsed_ms: f64,
        now_ms: f64,
        bounds: (f64, f64),
        rng: &mut dyn RngCore,
    ) -> Vec<CoinKind> {
        let mut spawned = Vec::new();

        let b_threshold = game.score / B_COIN_SCORE_STEP;
        if b_threshold > self.state.last_b_threshold {
            self.state.last_b_threshold = b_threshold;
            if game.multiplier < MAX_MULTIPLIER {
                spawned.push(CoinKind::B);
            }
        }

        let b_count = game.b_coins_collected;
        if b_count as i64 >= e_coin_requirement(game.lives) && b_count > self.state.last_e_b_count {
            self.state.last_e_b_count = b_count;
            spawned.push(CoinKind::E);
        }

        let p_threshold = game.correct_order_count / P_COIN_ORDER_STEP;
        if p_threshold > self.state.last_p_threshold {
            self.state.last_p_threshold = p_threshold;
            spawned.push(CoinKind::P);
        }

        if !self.state.s_spawned && map_elapsed_ms >= self.s_coin_delay_ms {
            self.state.s_spawned = true;
            spawned.push(CoinKind::S);
        }

        spawned.retain(|kind| !coins.iter().any(|c| c.kind == *kind && !c.collected));
        for &kind in &spawned {
            let (x, y) = spawn_position(bounds, rng);
            let mut coin = SpecialCoin::new(kind, x, y, self.coin_size, now_ms);
            if kind == CoinKind::P {
                apply_power_tier(&mut coin, game.power_tier);
            }
            log::info!("spawned {} coin at ({:.0}, {:.0})", kind.label(), x, y);
            coins.push(coin);
        }
        spawned
    }

    /// Drop S coins that outlived their window. Returns how many expired.
    pub fn expire(&self, coins: &mut Vec<SpecialCoin>, now_ms: f64) -> usize {
        let before = coins.len();
        let lifetime = self.s_coin_lifetime_ms;
        coins.retain(|c| c.kind != CoinKind::S || now_ms - c.spawned_at_ms < lifetime);
        before - coins.len()
    }
}

fn spawn_position((width, height): (f64, f64), rng: &mut dyn RngCore) -> (f64, f64) {
    let x = rng.gen_range(0.0..1.0) * (width - 30.0) + 15.0;
    let y = rng.gen_range(0.0..1.0) * (height - 100.0) + 50.0;
    (x, y)
}

/// Sync a P coin's color and base value with the power tier.
pub fn apply_power_tier(coin: &mut SpecialCoin, tier: usize) {
    coin.color = POWER_COLORS[tier % POWER_COLORS.len()];
    coin.value = Some(scoring::power_tier_score(tier, 1));
}

/// Update every live P coin after the tier changed.
pub fn refresh_power_coins(coins: &mut [SpecialCoin], tier: usize) {
    for coin in coins.iter_mut().filter(|c| c.kind == CoinKind::P && !c.collected) {
        apply_power_tier(coin, tier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const BOUNDS: (f64, f64) = (800.0, 600.0);

    fn spawner() -> CoinSpawner {
        CoinSpawner::new(25.0, 60_000.0, 10_000.0)
    }

    fn count(coins: &[SpecialCoin], kind: CoinKind) -> usize {
        coins.iter().filter(|c| c.kind == kind).count()
    }

    #[test]
    fn crossing_five_thousand_spawns_one_b_coin() {
        let mut sp = spawner();
        let mut rng = SmallRng::seed_from_u64(9);
        let mut coins = Vec::new();
        let mut game = GameState::default();
        game.score = 4999;
        for _ in 0..50 {
            sp.check_spawns(&mut coins, &game, 0.0, 0.0, BOUNDS, &mut rng);
        }
        assert_eq!(count(&coins, CoinKind::B), 0);
        game.score = 5001;
        for _ in 0..500 {
            sp.check_spawns(&mut coins, &game, 0.0, 0.0, BOUNDS, &mut rng);
        }
        assert_eq!(count(&coins, CoinKind::B), 1);
        // collecting it does not re-arm the same threshold
        coins.clear();
        for _ in 0..50 {
            sp.check_spawns(&mut coins, &game, 0.0, 0.0, BOUNDS, &mut rng);
        }
        assert!(coins.is_empty());
    }

    #[test]
    fn b_coin_suppressed_at_max_multiplier() {
        let mut sp = spawner();
        let mut rng = SmallRng::seed_from_u64(9);
        let mut coins = Vec::new();
        let mut game = GameState::default();
        game.multiplier = MAX_MULTIPLIER;
        game.score = 12_000;
        sp.check_spawns(&mut coins, &game, 0.0, 0.0, BOUNDS, &mut rng);
        assert!(coins.is_empty());
        assert_eq!(sp.state().last_b_threshold, 2);
    }

    #[test]
    fn e_coin_follows_b_tally_and_lives() {
        assert_eq!(e_coin_requirement(3), 8);
        assert_eq!(e_coin_requirement(1), 6);
        let mut sp = spawner();
        let mut rng = SmallRng::seed_from_u64(9);
        let mut coins = Vec::new();
        let mut game = GameState::new(1);
        game.b_coins_collected = 5;
        sp.check_spawns(&mut coins, &game, 0.0, 0.0, BOUNDS, &mut rng);
        assert_eq!(count(&coins, CoinKind::E), 0);
        game.b_coins_collected = 6;
        sp.check_spawns(&mut coins, &game, 0.0, 0.0, BOUNDS, &mut rng);
        sp.check_spawns(&mut coins, &game, 0.0, 0.0, BOUNDS, &mut rng);
        assert_eq!(count(&coins, CoinKind::E), 1);
    }

    #[test]
    fn p_coin_fires_once_per_nine_and_not_on_recross() {
        let mut sp = spawner();
        let mut rng = SmallRng::seed_from_u64(9);
        let mut coins = Vec::new();
        let mut game = GameState::default();
        game.correct_order_count = 9;
        game.power_tier = 2;
        sp.check_spawns(&mut coins, &game, 0.0, 0.0, BOUNDS, &mut rng);
        assert_eq!(count(&coins, CoinKind::P), 1);
        assert_eq!(coins[0].color, POWER_COLORS[2]);
        assert_eq!(coins[0].value, Some(300));

        coins.clear();
        game.correct_order_count = 8;
        sp.check_spawns(&mut coins, &game, 0.0, 0.0, BOUNDS, &mut rng);
        game.correct_order_count = 9;
        sp.check_spawns(&mut coins, &game, 0.0, 0.0, BOUNDS, &mut rng);
        assert!(coins.is_empty());

        game.correct_order_count = 18;
        sp.check_spawns(&mut coins, &game, 0.0, 0.0, BOUNDS, &mut rng);
        assert_eq!(count(&coins, CoinKind::P), 1);
    }

    #[test]
    fn s_coin_appears_after_delay_and_expires() {
        let mut sp = spawner();
        let mut rng = SmallRng::seed_from_u64(9);
        let mut coins = Vec::new();
        let game = GameState::default();
        sp.check_spawns(&mut coins, &game, 59_984.0, 59_984.0, BOUNDS, &mut rng);
        assert!(coins.is_empty());
        sp.check_spawns(&mut coins, &game, 60_000.0, 60_000.0, BOUNDS, &mut rng);
        assert_eq!(count(&coins, CoinKind::S), 1);
        assert_eq!(sp.expire(&mut coins, 69_000.0), 0);
        assert_eq!(sp.expire(&mut coins, 70_000.0), 1);
        sp.check_spawns(&mut coins, &game, 80_000.0, 80_000.0, BOUNDS, &mut rng);
        assert!(coins.is_empty(), "S coin appears once per map");
    }

    #[test]
    fn spawn_positions_stay_inside_margins() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..1000 {
            let (x, y) = spawn_position(BOUNDS, &mut rng);
            assert!((15.0..785.0).contains(&x));
            assert!((50.0..550.0).contains(&y));
        }
    }

    #[test]
    fn tier_refresh_recolors_live_power_coin() {
        let mut coins = vec![SpecialCoin::new(CoinKind::P, 0.0, 0.0, 25.0, 0.0)];
        refresh_power_coins(&mut coins, 4);
        assert_eq!(coins[0].color, "#C0C0C0");
        assert_eq!(coins[0].value, Some(800));
    }
}
