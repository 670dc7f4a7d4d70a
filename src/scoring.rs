//! Score values. Everything here is a pure function of the efficiency
//! multiplier (and, for tiered awards, the current power tier).

pub const JUMP_POINTS: u64 = 10;
pub const WALL_HIT_POINTS: u64 = 10;
pub const NORMAL_BOMB_POINTS: u64 = 100;
pub const FIRE_BOMB_POINTS: u64 = 200;
pub const SPECIAL_COIN_POINTS: u64 = 1000;

/// Award ladder for P coins and monsters defeated in power mode.
pub const POWER_TIER_POINTS: [u64; 7] = [100, 200, 300, 500, 800, 1200, 2000];

/// Penalty outcomes, as percent of the normal bomb value.
pub const WRONG_GROUP_PCT: u64 = 20;
pub const WRONG_ORDER_PCT: u64 = 30;
pub const OUTSIDE_GROUP_PCT: u64 = 50;

/// Correct-order count a full clear yields on the shipped maps.
pub const PERFECT_RUN: u32 = 24;

pub fn jump_score(multiplier: u32) -> u64 {
    JUMP_POINTS * multiplier as u64
}

pub fn wall_hit_score(multiplier: u32) -> u64 {
    WALL_HIT_POINTS * multiplier as u64
}

pub fn normal_bomb_score(multiplier: u32) -> u64 {
    NORMAL_BOMB_POINTS * multiplier as u64
}

pub fn fire_bomb_score(multiplier: u32) -> u64 {
    FIRE_BOMB_POINTS * multiplier as u64
}

/// `pct` percent of the normal bomb value, rounded down.
pub fn penalty_score(multiplier: u32, pct: u64) -> u64 {
    normal_bomb_score(multiplier) * pct / 100
}

pub fn special_coin_score(multiplier: u32) -> u64 {
    SPECIAL_COIN_POINTS * multiplier as u64
}

/// Tier lookup; out-of-range tiers clamp to the last entry.
pub fn power_tier_score(tier: usize, multiplier: u32) -> u64 {
    let idx = tier.min(POWER_TIER_POINTS.len() - 1);
    POWER_TIER_POINTS[idx] * multiplier as u64
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BonusTier {
    Big,
    Medium,
    Small,
    Tiny,
    None,
}

impl BonusTier {
    pub fn for_correct_order(count: u32) -> Self {
        match PERFECT_RUN.checked_sub(count) {
            Some(0) => BonusTier::Big,
            Some(1) => BonusTier::Medium,
            Some(2) => BonusTier::Small,
            Some(3) => BonusTier::Tiny,
            _ => BonusTier::None,
        }
    }

    pub fn points(self) -> u64 {
        match self {
            BonusTier::Big => 50_000,
            BonusTier::Medium => 30_000,
            BonusTier::Small => 10_000,
            BonusTier::Tiny => 5_000,
            BonusTier::None => 0,
        }
    }
}

/// End-of-level bonus for a correct-order count.
pub fn level_bonus(correct_order_count: u32) -> u64 {
    BonusTier::for_correct_order(correct_order_count).points()
}
