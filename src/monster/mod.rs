//! Monster definitions and movement AI.
//!
//! Each monster carries an optional [`MovementConfig`]. Its pattern kind
//! indexes [`HANDLERS`], a table of plain functions in [`patterns`] that step
//! the monster one tick. Every step finishes with a canvas clamp that
//! reflects velocity off the edge it touched.

use rand::RngCore;

use crate::config::PhysicsConfig;
use crate::entities::{Platform, Rect};

mod patterns;

// --- Types -------------------------------------------------------------------

/// Monster archetype as named in map data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MonsterType {
    Bureaucrat,
    Taxman,
    Regulator,
    TaxGhost,
    RegulationRobot,
    BureaucratClone,
    FeeAlien,
    ControlCrab,
    /// Anything the map names that this build does not know.
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl MonsterType {
    pub fn from_key(key: &str) -> Self {
        match key {
            "bureaucrat" => MonsterType::Bureaucrat,
            "taxman" => MonsterType::Taxman,
            "regulator" => MonsterType::Regulator,
            "tax-ghost" => MonsterType::TaxGhost,
            "regulation-robot" => MonsterType::RegulationRobot,
            "bureaucrat-clone" => MonsterType::BureaucratClone,
            "fee-alien" => MonsterType::FeeAlien,
            "control-crab" => MonsterType::ControlCrab,
            _ => MonsterType::Unknown,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            MonsterType::Bureaucrat => "#00ff89",
            MonsterType::Taxman => "#ff4b36",
            MonsterType::Regulator => "#ffcf39",
            MonsterType::TaxGhost | MonsterType::RegulationRobot => "#d3d3d3",
            MonsterType::BureaucratClone => "#477777",
            MonsterType::FeeAlien => "#66a6a6",
            MonsterType::ControlCrab => "#808000",
            MonsterType::Unknown => "#888888",
        }
    }

    fn default_speed(self) -> f64 {
        match self {
            MonsterType::Taxman | MonsterType::TaxGhost | MonsterType::FeeAlien => 1.2,
            MonsterType::Regulator
            | MonsterType::RegulationRobot
            | MonsterType::BureaucratClone
            | MonsterType::ControlCrab => 1.5,
            MonsterType::Bureaucrat | MonsterType::Unknown => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MovementPattern {
    /// Walk between `origin.x` and `origin.x + distance`. With
    /// `falls_after_cycles` set, drop under monster gravity once that many
    /// round trips are done.
    HorizontalPatrol { distance: f64, falls_after_cycles: Option<u32> },
    VerticalBounce { distance: f64 },
    Circular { radius: f64, frequency: f64 },
    SineWave { amplitude: f64, frequency: f64 },
    FollowPlayer { detection_range: f64 },
    RandomWalk { turn_delay_ms: f64, bounce_platforms: bool },
    FigureEight { size: f64, frequency: f64 },
    GuardArea { patrol_size: f64, detection_range: f64 },
}

/// Discriminant of [`MovementPattern`], used to index the handler table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternKind {
    HorizontalPatrol = 0,
    VerticalBounce = 1,
    Circular = 2,
    SineWave = 3,
    FollowPlayer = 4,
    RandomWalk = 5,
    FigureEight = 6,
    GuardArea = 7,
}

impl MovementPattern {
    pub fn kind(&self) -> PatternKind {
        match self {
            MovementPattern::HorizontalPatrol { .. } => PatternKind::HorizontalPatrol,
            MovementPattern::VerticalBounce { .. } => PatternKind::VerticalBounce,
            MovementPattern::Circular { .. } => PatternKind::Circular,
            MovementPattern::SineWave { .. } => PatternKind::SineWave,
            MovementPattern::FollowPlayer { .. } => PatternKind::FollowPlayer,
            MovementPattern::RandomWalk { .. } => PatternKind::RandomWalk,
            MovementPattern::FigureEight { .. } => PatternKind::FigureEight,
            MovementPattern::GuardArea { .. } => PatternKind::GuardArea,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementConfig {
    pub pattern: MovementPattern,
    pub speed: f64,
}

/// Per-monster AI clock and memory.
#[derive(Clone, Debug, PartialEq)]
pub struct AiState {
    pub time_alive_ms: f64,
    pub direction: (f64, f64),
    pub last_direction_change_ms: f64,
    pub origin: (f64, f64),
    pub is_chasing: bool,
    pub phase_offset: f64,
    pub patrol_cycles: u32,
    pub falling: bool,
    warned: bool,
}

/// Monster placement as authored in map data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MonsterSpawn {
    pub x: f64,
    pub y: f64,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: MonsterType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub patrol_start_x: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub patrol_end_x: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: Option<f64>,
}

impl MonsterSpawn {
    pub const fn new(x: f64, y: f64, kind: MonsterType) -> Self {
        Self {
            x,
            y,
            kind,
            patrol_start_x: None,
            patrol_end_x: None,
            speed: None,
        }
    }

    pub const fn patrol(mut self, start_x: f64, end_x: f64) -> Self {
        self.patrol_start_x = Some(start_x);
        self.patrol_end_x = Some(end_x);
        self
    }

    pub const fn speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Movement for this spawn, or `None` for unknown monster types.
    pub fn movement(&self) -> Option<MovementConfig> {
        let speed = self.speed.filter(|s| *s > 0.0).unwrap_or(self.kind.default_speed());
        let pattern = match self.kind {
            MonsterType::Bureaucrat => {
                let start = self.patrol_start_x.unwrap_or(self.x);
                let end = self.patrol_end_x.unwrap_or(self.x + 100.0);
                let distance = end - start;
                MovementPattern::HorizontalPatrol {
                    distance: if distance > 0.0 { distance } else { 100.0 },
                    falls_after_cycles: Some(2),
                }
            }
            MonsterType::Taxman => MovementPattern::VerticalBounce { distance: 180.0 },
            MonsterType::Regulator => MovementPattern::Circular { radius: 80.0, frequency: 0.02 },
            MonsterType::TaxGhost => MovementPattern::SineWave { amplitude: 30.0, frequency: 0.03 },
            MonsterType::RegulationRobot => MovementPattern::FollowPlayer { detection_range: 100.0 },
            MonsterType::BureaucratClone => MovementPattern::RandomWalk {
                turn_delay_ms: 1000.0,
                bounce_platforms: true,
            },
            MonsterType::FeeAlien => MovementPattern::FigureEight { size: 40.0, frequency: 0.02 },
            MonsterType::ControlCrab => MovementPattern::GuardArea {
                patrol_size: 80.0,
                detection_range: 100.0,
            },
            MonsterType::Unknown => return None,
        };
        Some(MovementConfig { pattern, speed })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Monster {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub vx: f64,
    pub vy: f64,
    pub kind: MonsterType,
    pub color: &'static str,
    pub movement: Option<MovementConfig>,
    pub ai: AiState,
}

impl Monster {
    pub fn spawn(spawn: &MonsterSpawn, size: f64, rng: &mut dyn RngCore) -> Self {
        use rand::Rng;
        let movement = spawn.movement();
        Self::with_movement(spawn.x, spawn.y, size, spawn.kind, movement, rng.gen_range(0.0..std::f64::consts::TAU))
    }

    pub fn with_movement(
        x: f64,
        y: f64,
        size: f64,
        kind: MonsterType,
        movement: Option<MovementConfig>,
        phase_offset: f64,
    ) -> Self {
        Self {
            x,
            y,
            width: size,
            height: size,
            vx: movement.map(|m| m.speed).unwrap_or(1.0),
            vy: 0.0,
            kind,
            color: kind.color(),
            movement,
            ai: AiState {
                time_alive_ms: 0.0,
                direction: (1.0, 0.0),
                last_direction_change_ms: 0.0,
                origin: (x, y),
                is_chasing: false,
                phase_offset,
                patrol_cycles: 0,
                falling: false,
                warned: false,
            },
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// --- Update ------------------------------------------------------------------

/// Read-only world view handed to pattern handlers.
pub struct PatternCtx<'a> {
    pub player: Rect,
    pub platforms: &'a [Platform],
    pub bounds: (f64, f64),
    pub physics: &'a PhysicsConfig,
}

type PatternFn = fn(&mut Monster, &MovementPattern, f64, &PatternCtx<'_>, &mut dyn RngCore);

/// Indexed by `PatternKind as usize`.
const HANDLERS: [PatternFn; 8] = [
    patterns::horizontal_patrol,
    patterns::vertical_bounce,
    patterns::circular,
    patterns::sine_wave,
    patterns::follow_player,
    patterns::random_walk,
    patterns::figure_eight,
    patterns::guard_area,
];

/// Advance one monster by `dt_ms`.
pub fn update_monster(monster: &mut Monster, ctx: &PatternCtx<'_>, rng: &mut dyn RngCore, dt_ms: f64) {
    let Some(cfg) = monster.movement else {
        if !monster.ai.warned {
            log::warn!("monster {:?} has no movement pattern, leaving it idle", monster.kind);
            monster.ai.warned = true;
        }
        return;
    };
    monster.ai.time_alive_ms += dt_ms;
    HANDLERS[cfg.pattern.kind() as usize](monster, &cfg.pattern, cfg.speed, ctx, rng);
    constrain_to_bounds(monster, ctx.bounds);
}

pub fn update_monsters(monsters: &mut [Monster], ctx: &PatternCtx<'_>, rng: &mut dyn RngCore, dt_ms: f64) {
    for m in monsters.iter_mut() {
        update_monster(m, ctx, rng, dt_ms);
    }
}

fn constrain_to_bounds(m: &mut Monster, (width, height): (f64, f64)) {
    if m.x < 0.0 {
        m.x = 0.0;
        m.vx = m.vx.abs();
    }
    if m.x > width - m.width {
        m.x = width - m.width;
        m.vx = -m.vx.abs();
    }
    if m.y < 0.0 {
        m.y = 0.0;
        m.vy = m.vy.abs();
    }
    if m.y > height - m.height {
        m.y = height - m.height;
        m.vy = -m.vy.abs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const TYPES: [MonsterType; 8] = [
        MonsterType::Bureaucrat,
        MonsterType::Taxman,
        MonsterType::Regulator,
        MonsterType::TaxGhost,
        MonsterType::RegulationRobot,
        MonsterType::BureaucratClone,
        MonsterType::FeeAlien,
        MonsterType::ControlCrab,
    ];

    fn ctx<'a>(player: Rect, platforms: &'a [Platform], physics: &'a PhysicsConfig) -> PatternCtx<'a> {
        PatternCtx {
            player,
            platforms,
            bounds: (800.0, 600.0),
            physics,
        }
    }

    #[test]
    fn every_type_maps_to_a_distinct_pattern() {
        let mut kinds: Vec<usize> = TYPES
            .iter()
            .map(|t| MonsterSpawn::new(100.0, 100.0, *t).movement().expect("known type").pattern.kind() as usize)
            .collect();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), 8);
        assert!(MonsterSpawn::new(0.0, 0.0, MonsterType::Unknown).movement().is_none());
    }

    #[test]
    fn all_patterns_stay_in_bounds_for_ten_thousand_ticks() {
        let physics = PhysicsConfig::default();
        let platforms = [Rect::new(0.0, 550.0, 800.0, 50.0), Rect::new(300.0, 300.0, 200.0, 20.0)];
        let mut rng = SmallRng::seed_from_u64(7);
        // Spawn close to corners so clamping is exercised.
        let spots = [(5.0, 5.0), (760.0, 560.0), (10.0, 570.0), (770.0, 10.0)];
        for t in TYPES {
            for &(x, y) in &spots {
                let spawn = MonsterSpawn::new(x, y, t).patrol(x, x + 200.0).speed(3.0);
                let mut m = Monster::spawn(&spawn, 28.0, &mut rng);
                for tick in 0..10_000 {
                    // player sweeps the canvas so chasers move around
                    let px = (tick % 800) as f64;
                    let c = ctx(Rect::new(px, 300.0, 32.0, 32.0), &platforms, &physics);
                    update_monster(&mut m, &c, &mut rng, 16.0);
                    assert!(
                        m.x >= 0.0 && m.x + m.width <= 800.0 && m.y >= 0.0 && m.y + m.height <= 600.0,
                        "{:?} left the canvas at tick {}: ({}, {})",
                        t,
                        tick,
                        m.x,
                        m.y
                    );
                    match t {
                        MonsterType::Bureaucrat => {
                            assert!(m.x >= x && m.x <= x + 200.0 - m.width, "patrol left its span: {}", m.x)
                        }
                        MonsterType::Taxman => {
                            assert!(m.y >= y && m.y <= y + 180.0 - m.height, "bounce left its span: {}", m.y)
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    #[test]
    fn patrol_and_bounce_stop_exactly_at_their_ends() {
        let physics = PhysicsConfig::default();
        let mut rng = SmallRng::seed_from_u64(5);
        let c = ctx(Rect::new(700.0, 500.0, 32.0, 32.0), &[], &physics);

        let spawn = MonsterSpawn::new(100.0, 100.0, MonsterType::Bureaucrat).patrol(100.0, 200.0).speed(1.7);
        let mut m = Monster::spawn(&spawn, 28.0, &mut rng);
        let (mut lo, mut hi) = (m.x, m.x);
        for _ in 0..2000 {
            update_monster(&mut m, &c, &mut rng, 16.0);
            lo = lo.min(m.x);
            hi = hi.max(m.x);
        }
        assert_eq!((lo, hi), (100.0, 172.0));

        let spawn = MonsterSpawn::new(300.0, 100.0, MonsterType::Taxman).speed(1.7);
        let mut m = Monster::spawn(&spawn, 28.0, &mut rng);
        let (mut lo, mut hi) = (m.y, m.y);
        for _ in 0..2000 {
            update_monster(&mut m, &c, &mut rng, 16.0);
            lo = lo.min(m.y);
            hi = hi.max(m.y);
        }
        assert_eq!((lo, hi), (100.0, 252.0));
    }

    #[test]
    fn bureaucrat_starts_falling_after_two_cycles() {
        let physics = PhysicsConfig::default();
        let mut rng = SmallRng::seed_from_u64(1);
        let spawn = MonsterSpawn::new(100.0, 100.0, MonsterType::Bureaucrat).patrol(100.0, 200.0).speed(2.0);
        let mut m = Monster::spawn(&spawn, 28.0, &mut rng);
        let c = ctx(Rect::new(700.0, 500.0, 32.0, 32.0), &[], &physics);
        let mut ticks = 0;
        while !m.ai.falling && ticks < 1000 {
            update_monster(&mut m, &c, &mut rng, 16.0);
            assert!(m.y == 100.0, "patrol must stay level before falling");
            ticks += 1;
        }
        assert!(m.ai.falling);
        assert_eq!(m.ai.patrol_cycles, 2);
        for _ in 0..400 {
            update_monster(&mut m, &c, &mut rng, 16.0);
        }
        assert_eq!(m.y, 600.0 - 28.0, "falls to the canvas floor");
    }

    #[test]
    fn follow_player_closes_distance_in_range_only() {
        let physics = PhysicsConfig::default();
        let mut rng = SmallRng::seed_from_u64(1);
        let spawn = MonsterSpawn::new(400.0, 300.0, MonsterType::RegulationRobot);
        let mut m = Monster::spawn(&spawn, 28.0, &mut rng);

        let near = ctx(Rect::new(460.0, 300.0, 32.0, 32.0), &[], &physics);
        update_monster(&mut m, &near, &mut rng, 16.0);
        assert!(m.ai.is_chasing);
        assert!(m.x > 400.0);

        let far = ctx(Rect::new(50.0, 50.0, 32.0, 32.0), &[], &physics);
        let vx = m.vx;
        update_monster(&mut m, &far, &mut rng, 16.0);
        assert!(!m.ai.is_chasing);
        assert!(m.vx.abs() < vx.abs());
    }

    #[test]
    fn circular_keeps_radius_around_origin() {
        let physics = PhysicsConfig::default();
        let mut rng = SmallRng::seed_from_u64(3);
        let spawn = MonsterSpawn::new(400.0, 300.0, MonsterType::Regulator);
        let mut m = Monster::spawn(&spawn, 28.0, &mut rng);
        let c = ctx(Rect::new(0.0, 0.0, 32.0, 32.0), &[], &physics);
        for _ in 0..200 {
            update_monster(&mut m, &c, &mut rng, 16.0);
            let d = ((m.x - 400.0).powi(2) + (m.y - 300.0).powi(2)).sqrt();
            assert!((d - 80.0).abs() < 1e-6, "radius drifted to {}", d);
        }
    }

    #[test]
    fn unknown_monster_stays_put() {
        let physics = PhysicsConfig::default();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut m = Monster::spawn(&MonsterSpawn::new(10.0, 20.0, MonsterType::Unknown), 28.0, &mut rng);
        let c = ctx(Rect::new(0.0, 0.0, 32.0, 32.0), &[], &physics);
        for _ in 0..10 {
            update_monster(&mut m, &c, &mut rng, 16.0);
        }
        assert_eq!((m.x, m.y), (10.0, 20.0));
        assert_eq!(m.ai.time_alive_ms, 0.0);
    }

    #[test]
    fn type_keys_round_trip_through_kebab_case() {
        assert_eq!(MonsterType::from_key("tax-ghost"), MonsterType::TaxGhost);
        assert_eq!(MonsterType::from_key("control-crab"), MonsterType::ControlCrab);
        assert_eq!(MonsterType::from_key("dragon"), MonsterType::Unknown);
    }
}
