//! Tunable constants for the simulation.
//!
//! Every value the tick reads lives in [`EngineConfig`] (or its nested
//! [`PhysicsConfig`]). Defaults reproduce the shipped 800x600 game; the host
//! page may override any subset from JSON when the `serde_json` feature is on.

/// Simulated milliseconds per tick. Timers (jump hold, power mode, AI clocks)
/// advance by this amount on every `update()` regardless of wall time.
pub const TICK_MS: f64 = 16.0;

/// Reference resolution the maps are authored for.
pub const BASE_WIDTH: f64 = 800.0;
pub const BASE_HEIGHT: f64 = 600.0;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhysicsConfig {
    pub jump_force: f64,
    pub horizontal_speed: f64,
    pub gravity: f64,
    pub max_fall_speed: f64,
    /// Horizontal velocity multiplier applied per tick with no left/right held.
    pub friction: f64,
    /// Fall-speed multiplier while float is held (always in 0..1).
    pub float_factor: f64,
    /// Distance above the canvas floor that still counts as grounded.
    pub ground_tolerance: f64,
    pub max_jump_hold_ms: f64,
    /// Lower bound of the held-jump boost factor.
    pub min_jump_hold_factor: f64,
    /// Upward velocity multiplier applied when jump is released early.
    pub jump_release_damping: f64,
    /// Horizontal speeds below this snap to zero.
    pub rest_epsilon: f64,
    pub monster_gravity: f64,
    pub monster_max_fall_speed: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            jump_force: 16.5,
            horizontal_speed: 4.0,
            gravity: 0.25,
            max_fall_speed: 10.0,
            friction: 0.0,
            float_factor: 0.000_001,
            ground_tolerance: 2.0,
            max_jump_hold_ms: 300.0,
            min_jump_hold_factor: 0.3,
            jump_release_damping: 0.7,
            rest_epsilon: 0.1,
            monster_gravity: 0.15,
            monster_max_fall_speed: 8.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub player_width: f64,
    pub player_height: f64,
    pub player_color: String,
    pub bomb_size: f64,
    pub monster_size: f64,
    pub coin_size: f64,
    pub initial_lives: u32,
    pub countdown_ms: f64,
    pub bonus_screen_ms: f64,
    pub power_mode_ms: f64,
    /// Play time on a map before the S coin appears.
    pub s_coin_delay_ms: f64,
    /// An uncollected S coin disappears after this long.
    pub s_coin_lifetime_ms: f64,
    pub tick_ms: f64,
    /// Base RNG seed; each map load derives its own stream from it.
    pub seed: u64,
    pub physics: PhysicsConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas_width: BASE_WIDTH,
            canvas_height: BASE_HEIGHT,
            player_width: 32.0,
            player_height: 32.0,
            player_color: "#3B82F6".to_string(),
            bomb_size: 20.0,
            monster_size: 28.0,
            coin_size: 25.0,
            initial_lives: 3,
            countdown_ms: 3000.0,
            bonus_screen_ms: 3000.0,
            power_mode_ms: 5000.0,
            s_coin_delay_ms: 60_000.0,
            s_coin_lifetime_ms: 10_000.0,
            tick_ms: TICK_MS,
            seed: 0x5EED_B0B5,
            physics: PhysicsConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Config for a canvas of the given size. Entity sizes shrink or grow with
    /// the smaller of the two axis ratios against the 800x600 reference.
    pub fn for_screen_size(width: f64, height: f64) -> Self {
        let base = Self::default();
        let scale = (width / BASE_WIDTH).min(height / BASE_HEIGHT);
        let scaled = |v: f64| (v * scale).floor().max(1.0);
        Self {
            canvas_width: width,
            canvas_height: height,
            player_width: scaled(base.player_width),
            player_height: scaled(base.player_height),
            bomb_size: scaled(base.bomb_size),
            monster_size: scaled(base.monster_size),
            coin_size: scaled(base.coin_size),
            ..base
        }
    }

    /// Parse a (possibly partial) JSON override. Missing keys keep defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_resolution() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.canvas_width, 800.0);
        assert_eq!(cfg.canvas_height, 600.0);
        assert_eq!(cfg.initial_lives, 3);
        assert_eq!(cfg.physics.jump_force, 16.5);
    }

    #[test]
    fn screen_size_scales_by_smaller_axis() {
        // 1600x900: width ratio 2.0, height ratio 1.5 -> scale 1.5
        let cfg = EngineConfig::for_screen_size(1600.0, 900.0);
        assert_eq!(cfg.canvas_width, 1600.0);
        assert_eq!(cfg.player_width, 48.0);
        assert_eq!(cfg.bomb_size, 30.0);
        assert_eq!(cfg.monster_size, 42.0);
        // non-size settings untouched
        assert_eq!(cfg.power_mode_ms, 5000.0);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EngineConfig::from_json(r#"{"initial_lives": 5, "physics": {"gravity": 0.5}}"#)
            .expect("valid json");
        assert_eq!(cfg.initial_lives, 5);
        assert_eq!(cfg.physics.gravity, 0.5);
        assert_eq!(cfg.physics.jump_force, 16.5);
        assert_eq!(cfg.bomb_size, 20.0);
    }
}
