use crate::entities::{Bomb, BombHighlight, Platform, Player, SpecialCoin};
use crate::maps::MapDefinition;
use crate::monster::Monster;
use crate::store::GameState;

/// Read-only view of one simulated frame.
pub struct Frame<'a> {
    pub map: &'a MapDefinition,
    pub platforms: &'a [Platform],
    pub bombs: &'a [Bomb],
    /// Index-aligned with `bombs`.
    pub highlights: &'a [BombHighlight],
    pub monsters: &'a [Monster],
    pub player: &'a Player,
    pub coins: &'a [SpecialCoin],
    pub state: &'a GameState,
}

pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>);
}
