//! Map definitions and the built-in level registry.
//!
//! Each shipped level lives in its own `map_*.rs` file and exposes a cached
//! `&'static MapDefinition` getter. The campaign order is the order of
//! [`campaign()`]; the playground is a separate sandbox map.

use core::fmt;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::entities::Platform;
use crate::monster::MonsterSpawn;

mod map_bureaucracy;
mod map_playground;
mod map_tower;
mod map_training;

pub use map_bureaucracy::bureaucracy;
pub use map_playground::playground;
pub use map_tower::tower;
pub use map_training::training;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BombSpawn {
    pub x: f64,
    pub y: f64,
    pub order: u32,
    pub group: u32,
}

impl BombSpawn {
    pub const fn new(x: f64, y: f64, order: u32, group: u32) -> Self {
        Self { x, y, order, group }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MapDefinition {
    pub id: String,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub player_start_x: f64,
    pub player_start_y: f64,
    pub platforms: Vec<Platform>,
    pub bombs: Vec<BombSpawn>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub monsters: Vec<MonsterSpawn>,
    pub background_color: String,
    /// Group order the player must follow. Empty means "ascending group ids".
    #[cfg_attr(feature = "serde", serde(default))]
    pub group_sequence: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapError {
    EmptyWorld { id: String },
    NoBombs { id: String },
    DuplicateBombOrder { order: u32 },
    GroupWithoutBombs { group: u32 },
    GroupNotInSequence { group: u32 },
    UnknownMap { id: String },
    EmptyCampaign,
    Parse { message: String },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWorld { id } => write!(f, "map '{id}' has a zero-sized world"),
            Self::NoBombs { id } => write!(f, "map '{id}' has no bombs"),
            Self::DuplicateBombOrder { order } => write!(f, "bomb order {order} appears more than once"),
            Self::GroupWithoutBombs { group } => {
                write!(f, "group {group} is in the sequence but has no bombs")
            }
            Self::GroupNotInSequence { group } => {
                write!(f, "bombs use group {group} which the sequence never reaches")
            }
            Self::UnknownMap { id } => write!(f, "no map with id '{id}'"),
            Self::EmptyCampaign => write!(f, "campaign has no maps"),
            Self::Parse { message } => write!(f, "map parse error: {message}"),
        }
    }
}

impl std::error::Error for MapError {}

impl MapDefinition {
    pub fn validate(&self) -> Result<(), MapError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(MapError::EmptyWorld { id: self.id.clone() });
        }
        if self.bombs.is_empty() {
            return Err(MapError::NoBombs { id: self.id.clone() });
        }
        let mut orders = HashSet::new();
        for b in &self.bombs {
            if !orders.insert(b.order) {
                return Err(MapError::DuplicateBombOrder { order: b.order });
            }
        }
        if !self.group_sequence.is_empty() {
            for g in &self.group_sequence {
                if !self.bombs.iter().any(|b| b.group == *g) {
                    return Err(MapError::GroupWithoutBombs { group: *g });
                }
            }
            if let Some(b) = self.bombs.iter().find(|b| !self.group_sequence.contains(&b.group)) {
                return Err(MapError::GroupNotInSequence { group: b.group });
            }
        }
        Ok(())
    }

    /// Parse and validate a map authored as JSON.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let map: MapDefinition = serde_json::from_str(json).map_err(|e| MapError::Parse {
            message: e.to_string(),
        })?;
        map.validate()?;
        Ok(map)
    }
}

/// Shared floor used by every shipped map.
pub(crate) const GROUND: Platform = Platform::new(0.0, 550.0, 800.0, 50.0);

/// Bombs in four-per-group runs: `rows[i]` lists `(x, y)` for group `i + 1`,
/// orders are assigned consecutively.
pub(crate) fn grouped_bombs(rows: &[[(f64, f64); 4]]) -> Vec<BombSpawn> {
    let mut out = Vec::with_capacity(rows.len() * 4);
    for (gi, row) in rows.iter().enumerate() {
        for &(x, y) in row {
            let order = out.len() as u32 + 1;
            out.push(BombSpawn::new(x, y, order, gi as u32 + 1));
        }
    }
    out
}

/// Campaign maps in play order.
pub fn campaign() -> &'static [&'static MapDefinition] {
    static CAMPAIGN: OnceLock<&'static [&'static MapDefinition]> = OnceLock::new();
    CAMPAIGN.get_or_init(|| Box::leak(vec![training(), bureaucracy(), tower()].into_boxed_slice()))
}

/// Look a map up by id, including the playground.
pub fn find(id: &str) -> Result<&'static MapDefinition, MapError> {
    campaign()
        .iter()
        .copied()
        .chain(std::iter::once(playground()))
        .find(|m| m.id == id)
        .ok_or_else(|| MapError::UnknownMap { id: id.to_string() })
}
