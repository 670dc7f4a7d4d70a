//! Canonical game state and the mutator surface the simulation writes through.
//!
//! The engine never caches counters held here. Anything that needs a score,
//! a life count or the group progress reads it back from the store.

use crate::entities::CoinKind;

/// Efficiency multiplier ceiling.
pub const MAX_MULTIPLIER: u32 = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    #[default]
    Menu,
    Countdown,
    Playing,
    Paused,
    BonusScreen,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BombCollected {
    pub order: u32,
    pub group: u32,
    pub score: u64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub score: u64,
    pub lives: u32,
    /// 1-based index into the map list.
    pub level: u32,
    pub current_map: String,
    pub multiplier: u32,
    pub bombs_collected: Vec<BombCollected>,
    pub correct_order_count: u32,
    pub b_coins_collected: u32,
    pub e_coins_collected: u32,
    pub power_mode_active: bool,
    pub power_mode_remaining_ms: f64,
    /// Index into the P coin palette, advanced by jumps and wall hits.
    pub power_tier: usize,
    pub active_group: Option<u32>,
    pub completed_groups: Vec<u32>,
    pub last_bonus: u64,
    pub score_before_bonus: u64,
    pub status: GameStatus,
    pub game_completed: bool,
}

impl GameState {
    pub fn new(initial_lives: u32) -> Self {
        Self {
            score: 0,
            lives: initial_lives,
            level: 1,
            current_map: String::new(),
            multiplier: 1,
            bombs_collected: Vec::new(),
            correct_order_count: 0,
            b_coins_collected: 0,
            e_coins_collected: 0,
            power_mode_active: false,
            power_mode_remaining_ms: 0.0,
            power_tier: 0,
            active_group: None,
            completed_groups: Vec::new(),
            last_bonus: 0,
            score_before_bonus: 0,
            status: GameStatus::Menu,
            game_completed: false,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Write surface of the game store. The simulation talks to state only
/// through this trait so hosts can mirror changes into their own UI store.
pub trait GameStore {
    fn state(&self) -> &GameState;

    fn update_score(&mut self, points: u64);
    /// Overwrite the score, e.g. to roll back a level restart.
    fn set_score(&mut self, score: u64);
    fn lose_life(&mut self);
    fn gain_life(&mut self);
    fn set_level(&mut self, level: u32);
    fn set_current_map(&mut self, map_id: &str);
    fn set_game_status(&mut self, status: GameStatus);
    fn set_game_completed(&mut self, completed: bool);
    fn set_active_group(&mut self, group: Option<u32>);
    fn add_completed_group(&mut self, group: u32);
    fn add_bomb_collected(&mut self, record: BombCollected);
    fn increment_correct_order(&mut self);
    /// Saturates at zero.
    fn decrement_correct_order(&mut self);
    fn reset_correct_order_count(&mut self);
    fn reset_completed_groups(&mut self);
    /// Tally effects of a special coin (multiplier, lives, counters).
    fn collect_special_coin(&mut self, kind: CoinKind);
    fn activate_p_coin(&mut self, duration_ms: f64);
    fn tick_power_mode(&mut self, dt_ms: f64);
    fn advance_power_tier(&mut self, tiers: usize);
    fn reset_power_tier(&mut self);
    fn set_last_bonus_and_score(&mut self, bonus: u64, score_before: u64);
    /// Back to a fresh game with `initial_lives`.
    fn reset_game(&mut self, initial_lives: u32);
}

impl GameStore for GameState {
    fn state(&self) -> &GameState {
        self
    }

    fn update_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    fn set_score(&mut self, score: u64) {
        self.score = score;
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    fn gain_life(&mut self) {
        self.lives += 1;
    }

    fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    fn set_current_map(&mut self, map_id: &str) {
        self.current_map = map_id.to_string();
    }

    fn set_game_status(&mut self, status: GameStatus) {
        if self.status != status {
            log::info!("status {:?} -> {:?}", self.status, status);
        }
        self.status = status;
    }

    fn set_game_completed(&mut self, completed: bool) {
        self.game_completed = completed;
    }

    fn set_active_group(&mut self, group: Option<u32>) {
        self.active_group = group;
    }

    fn add_completed_group(&mut self, group: u32) {
        if !self.completed_groups.contains(&group) {
            self.completed_groups.push(group);
        }
    }

    fn add_bomb_collected(&mut self, record: BombCollected) {
        self.bombs_collected.push(record);
    }

    fn increment_correct_order(&mut self) {
        self.correct_order_count += 1;
    }

    fn decrement_correct_order(&mut self) {
        self.correct_order_count = self.correct_order_count.saturating_sub(1);
    }

    fn reset_correct_order_count(&mut self) {
        self.correct_order_count = 0;
    }

    fn reset_completed_groups(&mut self) {
        self.completed_groups.clear();
        self.active_group = None;
    }

    fn collect_special_coin(&mut self, kind: CoinKind) {
        match kind {
            CoinKind::B => {
                self.multiplier = (self.multiplier + 1).min(MAX_MULTIPLIER);
                self.b_coins_collected += 1;
            }
            CoinKind::E => {
                self.lives += 1;
                self.e_coins_collected += 1;
            }
            // timer started through activate_p_coin; S advances the level via the engine
            CoinKind::P | CoinKind::S => {}
        }
    }

    fn activate_p_coin(&mut self, duration_ms: f64) {
        self.power_mode_active = true;
        self.power_mode_remaining_ms = duration_ms;
    }

    fn tick_power_mode(&mut self, dt_ms: f64) {
        if !self.power_mode_active {
            return;
        }
        self.power_mode_remaining_ms -= dt_ms;
        if self.power_mode_remaining_ms <= 0.0 {
            self.power_mode_remaining_ms = 0.0;
            self.power_mode_active = false;
            log::debug!("power mode expired");
        }
    }

    fn advance_power_tier(&mut self, tiers: usize) {
        if tiers > 0 {
            self.power_tier = (self.power_tier + 1) % tiers;
        }
    }

    fn reset_power_tier(&mut self) {
        self.power_tier = 0;
    }

    fn set_last_bonus_and_score(&mut self, bonus: u64, score_before: u64) {
        self.last_bonus = bonus;
        self.score_before_bonus = score_before;
    }

    fn reset_game(&mut self, initial_lives: u32) {
        *self = GameState::new(initial_lives);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_caps_at_five() {
        let mut s = GameState::default();
        for _ in 0..9 {
            s.collect_special_coin(CoinKind::B);
        }
        assert_eq!(s.multiplier, MAX_MULTIPLIER);
        assert_eq!(s.b_coins_collected, 9);
    }

    #[test]
    fn power_mode_runs_out() {
        let mut s = GameState::default();
        s.activate_p_coin(5000.0);
        for _ in 0..312 {
            s.tick_power_mode(16.0);
        }
        assert!(s.power_mode_active, "5000ms lasts past 312 ticks of 16ms");
        s.tick_power_mode(16.0);
        assert!(!s.power_mode_active);
        assert_eq!(s.power_mode_remaining_ms, 0.0);
    }

    #[test]
    fn counters_saturate_at_zero() {
        let mut s = GameState::new(1);
        s.lose_life();
        s.lose_life();
        s.decrement_correct_order();
        assert_eq!(s.lives, 0);
        assert_eq!(s.correct_order_count, 0);
    }

    #[test]
    fn completed_groups_are_a_set() {
        let mut s = GameState::default();
        s.add_completed_group(2);
        s.add_completed_group(2);
        assert_eq!(s.completed_groups, vec![2]);
    }
}
