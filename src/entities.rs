//! Plain simulation entities. All geometry is axis-aligned, measured in canvas
//! pixels with the origin at the top-left and y growing downwards.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    #[cfg_attr(feature = "serde", serde(alias = "w"))]
    pub width: f64,
    #[cfg_attr(feature = "serde", serde(alias = "h"))]
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict AABB overlap; rectangles sharing only an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub vx: f64,
    pub vy: f64,
    pub on_ground: bool,
    pub color: String,
}

impl Player {
    pub fn new(x: f64, y: f64, width: f64, height: f64, color: &str) -> Self {
        Self {
            x,
            y,
            width,
            height,
            vx: 0.0,
            vy: 0.0,
            on_ground: false,
            color: color.to_string(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Teleport to `(x, y)` and drop all motion.
    pub fn reset_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.vx = 0.0;
        self.vy = 0.0;
        self.on_ground = false;
    }
}

pub type Platform = Rect;

#[derive(Clone, Debug, PartialEq)]
pub struct Bomb {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Global collection order, unique per map.
    pub order: u32,
    pub group: u32,
    pub collected: bool,
}

impl Bomb {
    pub fn new(x: f64, y: f64, size: f64, order: u32, group: u32) -> Self {
        Self {
            x,
            y,
            width: size,
            height: size,
            order,
            group,
            collected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Derived per-bomb flags for rendering. Rebuilt from scratch every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BombHighlight {
    pub is_correct_next: bool,
    pub is_in_active_group: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoinKind {
    /// Raises the efficiency multiplier.
    B,
    /// Extra life.
    E,
    /// Power mode.
    P,
    /// Instant level advance.
    S,
}

impl CoinKind {
    pub fn color(self) -> &'static str {
        match self {
            CoinKind::B => "#FFD700",
            CoinKind::E => "#FF69B4",
            CoinKind::P => POWER_COLORS[0],
            CoinKind::S => "#9400D3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CoinKind::B => "B",
            CoinKind::E => "E",
            CoinKind::P => "P",
            CoinKind::S => "S",
        }
    }
}

/// P coin charge colors, one per tier step.
pub const POWER_COLORS: [&str; 5] = ["#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#C0C0C0"];

#[derive(Clone, Debug, PartialEq)]
pub struct SpecialCoin {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub kind: CoinKind,
    pub collected: bool,
    pub color: &'static str,
    pub value: Option<u64>,
    /// Engine clock at spawn time.
    pub spawned_at_ms: f64,
}

impl SpecialCoin {
    pub fn new(kind: CoinKind, x: f64, y: f64, size: f64, now_ms: f64) -> Self {
        Self {
            x,
            y,
            width: size,
            height: size,
            kind,
            collected: false,
            color: kind.color(),
            value: None,
            spawned_at_ms: now_ms,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}
