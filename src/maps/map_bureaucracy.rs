// Map 2: Bureaucracy Maze
// Groups 2, 4, 5 and 6 straddle two platforms each.
use super::{BombSpawn, GROUND, MapDefinition, grouped_bombs};
use crate::entities::Platform;
use crate::monster::{MonsterSpawn, MonsterType};
use std::sync::OnceLock;

fn build_bombs() -> Vec<BombSpawn> {
    grouped_bombs(&[
        [(75.0, 520.0), (105.0, 520.0), (135.0, 520.0), (165.0, 520.0)],
        [(500.0, 520.0), (530.0, 520.0), (120.0, 420.0), (150.0, 420.0)],
        [(320.0, 370.0), (350.0, 370.0), (380.0, 370.0), (410.0, 370.0)],
        [(170.0, 320.0), (200.0, 320.0), (220.0, 220.0), (250.0, 220.0)],
        [(470.0, 270.0), (500.0, 270.0), (530.0, 270.0), (520.0, 170.0)],
        [(550.0, 170.0), (130.0, 120.0), (160.0, 120.0), (190.0, 120.0)],
    ])
}

pub fn bureaucracy() -> &'static MapDefinition {
    static MAP: OnceLock<MapDefinition> = OnceLock::new();
    MAP.get_or_init(|| MapDefinition {
        id: "bureaucracy".to_string(),
        name: "Bureaucracy Maze".to_string(),
        width: 800.0,
        height: 600.0,
        player_start_x: 50.0,
        player_start_y: 450.0,
        platforms: vec![
            GROUND,
            Platform::new(100.0, 450.0, 100.0, 20.0),
            Platform::new(300.0, 400.0, 200.0, 20.0),
            Platform::new(150.0, 350.0, 100.0, 20.0),
            Platform::new(450.0, 300.0, 150.0, 20.0),
            Platform::new(200.0, 250.0, 120.0, 20.0),
            Platform::new(500.0, 200.0, 100.0, 20.0),
            Platform::new(100.0, 150.0, 200.0, 20.0),
        ],
        bombs: build_bombs(),
        monsters: vec![
            MonsterSpawn::new(200.0, 400.0, MonsterType::Bureaucrat)
                .patrol(150.0, 300.0)
                .speed(1.0),
            MonsterSpawn::new(500.0, 250.0, MonsterType::Taxman)
                .patrol(400.0, 600.0)
                .speed(1.5),
        ],
        background_color: "#374151".to_string(),
        group_sequence: vec![1, 2, 3, 4, 5, 6],
    })
}
