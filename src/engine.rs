//! The orchestrator. Owns every simulated entity, runs the fixed per-tick
//! pipeline and drives level flow through the store and the transition timer.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::audio::{AudioSink, SilentAudio, Sound};
use crate::collision::{self, BombOutcome, MonsterHit};
use crate::config::EngineConfig;
use crate::entities::{Bomb, BombHighlight, CoinKind, POWER_COLORS, Platform, Player, SpecialCoin};
use crate::groups;
use crate::input::InputState;
use crate::maps::{self, MapDefinition, MapError};
use crate::monster::{self, Monster, PatternCtx};
use crate::physics::Physics;
use crate::render::{Frame, Renderer};
use crate::scoring;
use crate::spawner::{self, CoinSpawner};
use crate::store::{GameState, GameStatus, GameStore};
use crate::transition::{TransitionAction, TransitionTimer};

/// Snapshot for the debug panel.
#[derive(Clone, Debug, PartialEq)]
pub struct DebugInfo {
    pub player_x: f64,
    pub player_y: f64,
    pub on_ground: bool,
    pub bombs_remaining: usize,
    pub monsters: usize,
    pub coins: Vec<CoinKind>,
    pub status: GameStatus,
    pub active_group: Option<u32>,
    pub next_group: Option<u32>,
    pub power_mode_ms: f64,
}

/// FNV-1a, so per-map seeds do not depend on std's hasher.
fn map_seed(base: u64, id: &str) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for b in id.bytes() {
        h ^= b as u64;
        h = h.wrapping_mul(0x0100_0000_01b3);
    }
    base ^ h
}

pub struct GameEngine<S: GameStore = GameState> {
    config: EngineConfig,
    store: S,
    maps: Vec<MapDefinition>,
    map_index: usize,
    map: MapDefinition,
    sequence: Vec<u32>,
    player: Player,
    platforms: Vec<Platform>,
    bombs: Vec<Bomb>,
    highlights: Vec<BombHighlight>,
    monsters: Vec<Monster>,
    coins: Vec<SpecialCoin>,
    physics: Physics,
    spawner: CoinSpawner,
    transitions: TransitionTimer,
    rng: SmallRng,
    input: InputState,
    clock_ms: f64,
    map_play_ms: f64,
    /// Score when the current map was loaded; `reset` rolls back to it.
    map_entry_score: u64,
    sandbox: bool,
    audio: Box<dyn AudioSink>,
}

impl GameEngine<GameState> {
    /// Engine over the built-in campaign with a fresh in-memory store.
    pub fn with_defaults(config: EngineConfig) -> Self {
        let store = GameState::new(config.initial_lives);
        Self::new(config, store)
    }
}

impl<S: GameStore> GameEngine<S> {
    pub fn new(config: EngineConfig, store: S) -> Self {
        let maps = maps::campaign().iter().map(|m| (*m).clone()).collect();
        Self::build(config, store, maps)
    }

    /// Engine over a custom map list. Every map must validate.
    pub fn with_maps(config: EngineConfig, store: S, maps: Vec<MapDefinition>) -> Result<Self, MapError> {
        if maps.is_empty() {
            return Err(MapError::EmptyCampaign);
        }
        for m in &maps {
            m.validate()?;
        }
        Ok(Self::build(config, store, maps))
    }

    fn build(config: EngineConfig, store: S, maps: Vec<MapDefinition>) -> Self {
        let first = maps[0].clone();
        let player = Player::new(
            first.player_start_x,
            first.player_start_y,
            config.player_width,
            config.player_height,
            &config.player_color,
        );
        let mut engine = Self {
            physics: Physics::new(config.physics.clone()),
            spawner: CoinSpawner::new(config.coin_size, config.s_coin_delay_ms, config.s_coin_lifetime_ms),
            rng: SmallRng::seed_from_u64(config.seed),
            config,
            store,
            maps,
            map_index: 0,
            map: first,
            sequence: Vec::new(),
            player,
            platforms: Vec::new(),
            bombs: Vec::new(),
            highlights: Vec::new(),
            monsters: Vec::new(),
            coins: Vec::new(),
            transitions: TransitionTimer::new(),
            input: InputState::default(),
            clock_ms: 0.0,
            map_play_ms: 0.0,
            map_entry_score: 0,
            sandbox: false,
            audio: Box::new(SilentAudio),
        };
        engine.load_map_index(0);
        engine
    }

    pub fn set_audio(&mut self, audio: Box<dyn AudioSink>) {
        self.audio = audio;
    }

    // --- Map loading ---------------------------------------------------------

    /// Replace the world with `map`. Bombs, monsters and coins are rebuilt,
    /// the player returns to spawn and per-level counters are cleared.
    pub fn load_map(&mut self, map: &MapDefinition) {
        self.transitions.cancel();
        self.rng = SmallRng::seed_from_u64(map_seed(self.config.seed, &map.id));

        self.map = map.clone();
        self.platforms = map.platforms.clone();
        self.bombs = map
            .bombs
            .iter()
            .map(|b| Bomb::new(b.x, b.y, self.config.bomb_size, b.order, b.group))
            .collect();
        self.sequence = groups::effective_sequence(&map.group_sequence, &self.bombs);
        self.monsters = map
            .monsters
            .iter()
            .map(|m| Monster::spawn(m, self.config.monster_size, &mut self.rng))
            .collect();
        self.coins.clear();
        self.player.reset_to(map.player_start_x, map.player_start_y);
        self.physics.reset();
        self.spawner.on_map_loaded();
        self.map_play_ms = 0.0;
        self.map_entry_score = self.store.state().score;
        self.sandbox = false;

        self.store.set_current_map(&map.id);
        self.store.reset_correct_order_count();
        self.store.reset_completed_groups();
        self.store.set_active_group(None);
        self.store.reset_power_tier();
        self.refresh_highlights();
        log::info!(
            "loaded map '{}' ({} bombs, {} monsters)",
            map.id,
            self.bombs.len(),
            self.monsters.len()
        );
    }

    fn load_map_index(&mut self, index: usize) {
        let Some(map) = self.maps.get(index).cloned() else {
            log::warn!("map index {} out of range", index);
            return;
        };
        self.map_index = index;
        self.store.set_level(index as u32 + 1);
        self.load_map(&map);
    }

    /// Load the playground and run it as a sandbox (ticks in every status).
    pub fn load_playground(&mut self) {
        self.load_map(maps::playground());
        self.sandbox = true;
    }

    // --- Level flow -----------------------------------------------------------

    /// Leave the menu (or a finished game) and begin the countdown.
    pub fn start(&mut self) {
        let status = self.store.state().status;
        match status {
            GameStatus::Menu => self.begin_countdown(),
            GameStatus::GameOver => self.restart_game(),
            _ => {}
        }
    }

    fn begin_countdown(&mut self) {
        self.store.set_game_status(GameStatus::Countdown);
        self.transitions
            .schedule(self.clock_ms, self.config.countdown_ms, TransitionAction::StartPlaying);
    }

    pub fn toggle_pause(&mut self) {
        let status = self.store.state().status;
        match status {
            GameStatus::Playing => self.store.set_game_status(GameStatus::Paused),
            GameStatus::Paused => self.store.set_game_status(GameStatus::Playing),
            _ => {}
        }
    }

    /// Reload the current map. The score goes back to what it was when the
    /// map was entered; lives and level are kept.
    pub fn reset(&mut self) {
        self.store.set_score(self.map_entry_score);
        if self.sandbox {
            self.load_playground();
            return;
        }
        self.load_map_index(self.map_index);
        self.begin_countdown();
    }

    /// Fresh game from the first map.
    pub fn restart_game(&mut self) {
        self.store.reset_game(self.config.initial_lives);
        self.spawner.reset();
        self.load_map_index(0);
        self.begin_countdown();
    }

    fn complete_level(&mut self) {
        self.audio.play(Sound::LevelComplete);
        let st = self.store.state();
        let score_before = st.score;
        let bonus = scoring::level_bonus(st.correct_order_count);
        self.store.set_last_bonus_and_score(bonus, score_before);
        self.store.update_score(bonus);
        self.store.set_game_status(GameStatus::BonusScreen);

        let next = self.map_index + 1;
        let action = if next < self.maps.len() {
            TransitionAction::LoadMap(next)
        } else {
            TransitionAction::FinishGame
        };
        log::info!("level {} complete, bonus {} -> {:?}", self.map_index + 1, bonus, action);
        self.transitions
            .schedule(self.clock_ms, self.config.bonus_screen_ms, action);
    }

    fn apply_transition(&mut self, action: TransitionAction) {
        match action {
            TransitionAction::LoadMap(index) => {
                self.load_map_index(index);
                self.begin_countdown();
            }
            TransitionAction::FinishGame => {
                self.store.set_game_completed(true);
                self.store.set_game_status(GameStatus::GameOver);
                self.audio.play(Sound::GameOver);
            }
            TransitionAction::StartPlaying => {
                if self.store.state().status == GameStatus::Countdown {
                    self.store.set_game_status(GameStatus::Playing);
                }
            }
        }
    }

    // --- Tick -----------------------------------------------------------------

    pub fn set_input(&mut self, input: InputState) {
        self.input = input;
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Advance the simulation by one fixed tick.
    pub fn update(&mut self) {
        let dt = self.config.tick_ms;
        self.clock_ms += dt;
        if let Some(action) = self.transitions.poll(self.clock_ms) {
            self.apply_transition(action);
        }
        if !self.sandbox && self.store.state().status != GameStatus::Playing {
            return;
        }
        self.map_play_ms += dt;
        let bounds = (self.map.width, self.map.height);

        let events = self
            .physics
            .step(&mut self.player, &self.input, &self.platforms, bounds, dt);
        let mut tier_changed = false;
        if events.just_left_ground {
            self.store.update_score(scoring::jump_score(self.store.state().multiplier));
            self.audio.play(Sound::Jump);
            tier_changed = true;
        }
        if events.hit_wall {
            self.store.update_score(scoring::wall_hit_score(self.store.state().multiplier));
            self.audio.play(Sound::WallHit);
            tier_changed = true;
        }
        if tier_changed {
            self.store.advance_power_tier(POWER_COLORS.len());
            spawner::refresh_power_coins(&mut self.coins, self.store.state().power_tier);
        }

        let ctx = PatternCtx {
            player: self.player.rect(),
            platforms: &self.platforms,
            bounds,
            physics: &self.config.physics,
        };
        monster::update_monsters(&mut self.monsters, &ctx, &mut self.rng, dt);

        let outcomes =
            collision::check_bomb_collisions(&self.player.rect(), &mut self.bombs, &mut self.store, &self.sequence);
        for outcome in outcomes {
            self.audio.play(match outcome {
                BombOutcome::Correct => Sound::BombCorrect,
                _ => Sound::BombWrong,
            });
        }

        let spawn = (self.map.player_start_x, self.map.player_start_y);
        let hits = collision::check_monster_collisions(&mut self.player, spawn, &mut self.monsters, &mut self.store);
        let mut game_over = false;
        for hit in hits {
            match hit {
                MonsterHit::Defeated { .. } => self.audio.play(Sound::MonsterDefeated),
                MonsterHit::PlayerHit { game_over: over } => {
                    self.physics.reset();
                    self.audio.play(Sound::MonsterHit);
                    if over {
                        self.audio.play(Sound::GameOver);
                        game_over = true;
                    }
                }
            }
        }
        if game_over {
            self.refresh_highlights();
            return;
        }

        let taken = collision::check_coin_collisions(
            &self.player.rect(),
            &mut self.coins,
            &mut self.store,
            self.config.power_mode_ms,
        );
        for kind in &taken {
            self.audio.play(if *kind == CoinKind::P {
                Sound::PowerModeStart
            } else {
                Sound::CoinCollected
            });
        }

        self.store.tick_power_mode(dt);
        self.refresh_highlights();

        self.spawner.expire(&mut self.coins, self.clock_ms);
        self.spawner.check_spawns(
            &mut self.coins,
            self.store.state(),
            self.map_play_ms,
            self.clock_ms,
            bounds,
            &mut self.rng,
        );

        let level_done = groups::all_collected(&self.bombs) || taken.contains(&CoinKind::S);
        if level_done {
            if self.sandbox {
                log::info!("playground cleared, reloading");
                self.load_playground();
            } else if self.store.state().status == GameStatus::Playing {
                self.complete_level();
            }
        }
    }

    fn refresh_highlights(&mut self) {
        let st = self.store.state();
        let next = groups::next_pending_group(&self.sequence, &st.completed_groups);
        self.highlights = groups::highlights(&self.bombs, st.active_group, next);
    }

    // --- Views ----------------------------------------------------------------

    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.render(&Frame {
            map: &self.map,
            platforms: &self.platforms,
            bombs: &self.bombs,
            highlights: &self.highlights,
            monsters: &self.monsters,
            player: &self.player,
            coins: &self.coins,
            state: self.store.state(),
        });
    }

    pub fn debug_info(&self) -> DebugInfo {
        let st = self.store.state();
        DebugInfo {
            player_x: self.player.x,
            player_y: self.player.y,
            on_ground: self.player.on_ground,
            bombs_remaining: self.bombs.iter().filter(|b| !b.collected).count(),
            monsters: self.monsters.len(),
            coins: self.coins.iter().map(|c| c.kind).collect(),
            status: st.status,
            active_group: st.active_group,
            next_group: groups::next_pending_group(&self.sequence, &st.completed_groups),
            power_mode_ms: st.power_mode_remaining_ms,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn state(&self) -> &GameState {
        self.store.state()
    }

    pub fn map(&self) -> &MapDefinition {
        &self.map
    }

    pub fn map_index(&self) -> usize {
        self.map_index
    }

    pub fn is_sandbox(&self) -> bool {
        self.sandbox
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn bombs(&self) -> &[Bomb] {
        &self.bombs
    }

    pub fn highlights(&self) -> &[BombHighlight] {
        &self.highlights
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn monsters_mut(&mut self) -> &mut [Monster] {
        &mut self.monsters
    }

    pub fn coins(&self) -> &[SpecialCoin] {
        &self.coins
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }
}
